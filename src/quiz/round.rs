use std::fmt;

use rand::Rng;

use crate::error::QuizError;
use crate::quiz::catalog::{CityCatalog, CityRecord};
use crate::quiz::{create_quiz, Question};

/// Progress of one player through one quiz.
///
/// The quiz is active while `round_number < questions.len()` and complete
/// afterwards. `score` never exceeds `round_number`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizState {
    score: usize,
    round_number: usize,
    questions: Vec<Question>,
}

/// What happened when an answer was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_name: String,
    pub city: CityRecord,
}

impl QuizState {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            score: 0,
            round_number: 0,
            questions,
        }
    }

    pub fn start<R: Rng + ?Sized>(catalog: &CityCatalog, rounds: usize, rng: &mut R) -> Self {
        Self::new(create_quiz(catalog, rounds, rng))
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn round_number(&self) -> usize {
        self.round_number
    }

    pub fn rounds(&self) -> usize {
        self.questions.len()
    }

    pub fn is_complete(&self) -> bool {
        self.round_number >= self.questions.len()
    }

    pub fn current_question(&self) -> Result<&Question, QuizError> {
        self.questions
            .get(self.round_number)
            .ok_or(QuizError::QuizComplete {
                rounds: self.rounds(),
            })
    }

    pub fn current_city<'c>(&self, catalog: &'c CityCatalog) -> Result<&'c CityRecord, QuizError> {
        let index = self.current_question()?.city_index;
        catalog.get(index).ok_or(QuizError::UnknownCity { index })
    }

    /// Scores `answer` against the current city and moves to the next round,
    /// whether the answer was right or not. Nothing changes on error.
    pub fn submit_answer(
        &mut self,
        catalog: &CityCatalog,
        answer: &str,
    ) -> Result<AnswerOutcome, QuizError> {
        let city = self.current_city(catalog)?;
        let correct = answers_match(answer, &city.name);

        let outcome = AnswerOutcome {
            correct,
            correct_name: city.name.clone(),
            city: city.clone(),
        };

        if correct {
            self.score += 1;
        }
        self.round_number += 1;

        Ok(outcome)
    }

    pub fn badge(&self) -> Badge {
        compute_badge(self.score)
    }
}

/// Exact comparison, ignoring case and surrounding whitespace.
pub fn answers_match(answer: &str, name: &str) -> bool {
    answer.trim().to_lowercase() == name.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Newbie,
    Explorer,
    Master,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::Newbie => "🔰 Regex Newbie",
            Badge::Explorer => "🕵️ Regex Explorer",
            Badge::Master => "👑 Regex Master",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Badge::Newbie => "Newbie",
            Badge::Explorer => "Explorer",
            Badge::Master => "Master",
        };
        f.write_str(name)
    }
}

pub fn compute_badge(score: usize) -> Badge {
    match score {
        0..=3 => Badge::Newbie,
        4..=7 => Badge::Explorer,
        _ => Badge::Master,
    }
}
