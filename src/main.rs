mod config;
mod error;
mod quiz;

use std::{path::Path, sync::Arc};

use config::{Config, StorageBackend};
use dotenv::dotenv;
use error::QuizError;
use quiz::{catalog::CityCatalog, AnswerOutcome, QuizState};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, InMemStorage, SqliteStorage, Storage},
    prelude::*,
    types::{InputFile, KeyboardButton, KeyboardMarkup, KeyboardRemove, ParseMode},
    utils::html,
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type QuizStorage = Arc<ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    Playing {
        quiz: QuizState,
    },
}

#[tokio::main]
async fn main() {
    let dotenv_loaded = dotenv().is_ok();
    pretty_env_logger::init();

    if !dotenv_loaded {
        log::debug!("No .env file found, using the process environment only");
    }

    if let Err(err) = run().await {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run() -> HandlerResult {
    log::info!("Starting regex city bot...");

    let config = Config::from_env()?;
    log::info!(
        "Catalog: {}, rounds per quiz: {}",
        config.cities_file.display(),
        config.rounds
    );

    let catalog = Arc::new(CityCatalog::load(&config.cities_file)?);

    let storage: QuizStorage = match config.storage {
        StorageBackend::Sqlite => {
            log::info!("Storing quiz state in {}", config.db_path);
            SqliteStorage::open(&config.db_path, Json).await?.erase()
        }
        StorageBackend::Memory => {
            log::info!("Storing quiz state in memory, it will be lost on restart");
            InMemStorage::<State>::new().erase()
        }
    };

    let bot = Bot::from_env();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(home))
            .branch(dptree::case![State::Playing { quiz }].endpoint(receive_answer)),
    )
    .dependencies(dptree::deps![storage, catalog, Arc::new(config)])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

const START_COMMAND: &str = "/start";
const PLAY_COMMAND: &str = "/play";
const HINT_COMMAND: &str = "/hint";
const START_BUTTON: &str = "Mulai kuis";
const PLAY_AGAIN_BUTTON: &str = "Main lagi";

const GREETING_TEXT: &str = "Halo! Aku akan memberimu pola regex yang menyamarkan nama sebuah kota di Indonesia. Tebak kotanya!\n\n\
. berarti huruf apa saja, [ab] berarti salah satu dari dua huruf itu, dan spasi atau tanda hubung boleh dihilangkan.";

async fn home(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    catalog: Arc<CityCatalog>,
    config: Arc<Config>,
) -> HandlerResult {
    match msg.text().map(str::trim) {
        Some(START_BUTTON) | Some(PLAY_AGAIN_BUTTON) | Some(PLAY_COMMAND) => {
            start_quiz(&bot, &dialogue, msg.chat.id, &catalog, config.rounds).await
        }
        _ => show_home(&bot, &dialogue, msg.chat.id, GREETING_TEXT, START_BUTTON).await,
    }
}

async fn show_home(
    bot: &Bot,
    dialogue: &QuizDialogue,
    chat_id: ChatId,
    text: &str,
    button: &str,
) -> HandlerResult {
    let keyboard = KeyboardMarkup::new(vec![vec![KeyboardButton::new(button)]]);
    bot.send_message(chat_id, text).reply_markup(keyboard).await?;

    dialogue.update(State::Start).await?;
    Ok(())
}

async fn start_quiz(
    bot: &Bot,
    dialogue: &QuizDialogue,
    chat_id: ChatId,
    catalog: &CityCatalog,
    rounds: usize,
) -> HandlerResult {
    let quiz = QuizState::start(catalog, rounds, &mut rand::thread_rng());
    log::debug!("Chat {}: new quiz with {} rounds", chat_id.0, quiz.rounds());

    bot.send_message(
        chat_id,
        format!("Kuis dimulai! Ada {} kota untuk ditebak.", quiz.rounds()),
    )
    .reply_markup(KeyboardRemove::new())
    .await?;

    send_hint(bot, chat_id, &quiz).await?;

    dialogue.update(State::Playing { quiz }).await?;
    Ok(())
}

async fn send_hint(bot: &Bot, chat_id: ChatId, quiz: &QuizState) -> HandlerResult {
    let question = quiz.current_question()?;

    let text = format!(
        "<b>Ronde {}/{}</b> | Skor: {}\n\nKota apa yang cocok dengan pola ini?\n{}",
        quiz.round_number() + 1,
        quiz.rounds(),
        quiz.score(),
        html::code_inline(&question.hint)
    );
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

async fn receive_answer(
    bot: Bot,
    dialogue: QuizDialogue,
    mut quiz: QuizState,
    msg: Message,
    catalog: Arc<CityCatalog>,
    config: Arc<Config>,
) -> HandlerResult {
    let chat_id = msg.chat.id;

    let answer = match msg.text() {
        Some(text) => text,
        None => {
            bot.send_message(chat_id, "Ketik jawabanmu sebagai teks, ya.")
                .await?;
            return Ok(());
        }
    };

    match answer.trim() {
        START_COMMAND => {
            return show_home(&bot, &dialogue, chat_id, GREETING_TEXT, START_BUTTON).await;
        }
        PLAY_COMMAND => {
            return start_quiz(&bot, &dialogue, chat_id, &catalog, config.rounds).await;
        }
        HINT_COMMAND if !quiz.is_complete() => {
            return send_hint(&bot, chat_id, &quiz).await;
        }
        _ => {}
    }

    if quiz.is_complete() {
        return finish_quiz(&bot, &dialogue, chat_id, &quiz).await;
    }

    let outcome = match quiz.submit_answer(&catalog, answer) {
        Ok(outcome) => outcome,
        Err(QuizError::UnknownCity { index }) => {
            log::warn!(
                "Chat {}: stored quiz refers to missing city #{}, discarding it",
                chat_id.0,
                index
            );
            return show_home(
                &bot,
                &dialogue,
                chat_id,
                "Daftar kota sudah berubah sejak kuis ini dimulai. Ayo mulai kuis baru!",
                START_BUTTON,
            )
            .await;
        }
        Err(err) => return Err(err.into()),
    };
    log::debug!(
        "Chat {}: answer was {}, now at round {}/{}",
        chat_id.0,
        if outcome.correct { "correct" } else { "wrong" },
        quiz.round_number(),
        quiz.rounds()
    );

    send_feedback(&bot, chat_id, &outcome).await?;

    if quiz.is_complete() {
        return finish_quiz(&bot, &dialogue, chat_id, &quiz).await;
    }

    send_hint(&bot, chat_id, &quiz).await?;

    dialogue.update(State::Playing { quiz }).await?;
    Ok(())
}

async fn send_feedback(bot: &Bot, chat_id: ChatId, outcome: &AnswerOutcome) -> HandlerResult {
    let verdict = if outcome.correct {
        format!("✅ Benar! Kota itu adalah {}.", outcome.correct_name)
    } else {
        format!("❌ Salah. Jawaban yang benar adalah {}.", outcome.correct_name)
    };
    let text = format!(
        "{}\n\n📍 Provinsi: {}\n💡 {}",
        verdict, outcome.city.province, outcome.city.fact
    );

    let image = Path::new(&outcome.city.image);
    if image.is_file() {
        bot.send_photo(chat_id, InputFile::file(image))
            .caption(text)
            .await?;
    } else {
        log::debug!("Image {} not found, sending text only", image.display());
        bot.send_message(chat_id, text).await?;
    }
    Ok(())
}

async fn finish_quiz(
    bot: &Bot,
    dialogue: &QuizDialogue,
    chat_id: ChatId,
    quiz: &QuizState,
) -> HandlerResult {
    let text = format!(
        "Kuis selesai! Skor akhirmu {} dari {}.\nLencana: {}",
        quiz.score(),
        quiz.rounds(),
        quiz.badge().label()
    );
    show_home(bot, dialogue, chat_id, &text, PLAY_AGAIN_BUTTON).await
}
