pub mod catalog;
pub mod hint;
pub mod round;

use rand::seq::index;
use rand::Rng;

use catalog::CityCatalog;

pub use round::{AnswerOutcome, QuizState};

/// One round of a quiz: the city to guess and the hint shown for it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub city_index: usize,
    pub hint: String,
}

impl Question {
    pub fn new(city_index: usize, hint: String) -> Self {
        Self { city_index, hint }
    }
}

/// Draws `min(count, catalog.len())` distinct cities in random order and
/// builds a fresh hint for each of them.
pub fn create_quiz<R: Rng + ?Sized>(catalog: &CityCatalog, count: usize, rng: &mut R) -> Vec<Question> {
    let amount = count.min(catalog.len());
    let cities = catalog.cities();

    index::sample(rng, cities.len(), amount)
        .into_iter()
        .map(|city_index| {
            let hint = hint::generate_hint(&cities[city_index].name, rng);
            Question::new(city_index, hint)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;

    use super::catalog::CityRecord;
    use super::*;

    fn catalog_of(size: usize) -> CityCatalog {
        CityCatalog::new(
            (0..size)
                .map(|i| CityRecord::new(&format!("Kota {i}"), "Provinsi", "fact", "img"))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn count_is_clamped_to_catalog_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let catalog = catalog_of(2);
        let questions = create_quiz(&catalog, 10, &mut rng);

        let indices: HashSet<_> = questions.iter().map(|q| q.city_index).collect();
        assert_eq!(questions.len(), 2);
        assert_eq!(indices, HashSet::from([0, 1]));
    }

    #[test]
    fn hints_belong_to_their_cities() {
        let mut rng = StdRng::seed_from_u64(5);
        let catalog = catalog_of(12);

        for question in create_quiz(&catalog, 10, &mut rng) {
            let name = &catalog.get(question.city_index).unwrap().name;
            assert!(Regex::new(&question.hint).unwrap().is_match(name));
        }
    }

    #[test]
    fn play_order_is_shuffled() {
        let mut rng = StdRng::seed_from_u64(99);
        let catalog = catalog_of(20);
        let sorted: Vec<usize> = (0..20).collect();

        let shuffled = (0..10).any(|_| {
            let order: Vec<usize> = create_quiz(&catalog, 20, &mut rng)
                .iter()
                .map(|q| q.city_index)
                .collect();
            order != sorted
        });
        assert!(shuffled);
    }

    proptest! {
        #[test]
        fn questions_are_distinct_and_sized(size in 1usize..40, count in 1usize..60, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = create_quiz(&catalog_of(size), count, &mut rng);

            let indices: HashSet<_> = questions.iter().map(|q| q.city_index).collect();
            prop_assert_eq!(questions.len(), count.min(size));
            prop_assert_eq!(indices.len(), questions.len());
            prop_assert!(indices.iter().all(|i| *i < size));
        }
    }
}
