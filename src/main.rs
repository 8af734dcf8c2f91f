use anyhow::Result;
use rusqlite::Connection;
use std::env;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use admissions_bot::bot;
use admissions_bot::config::BotConfig;
use admissions_bot::db;
use admissions_bot::localization;
use admissions_bot::state::SessionState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting Admissions Telegram Bot");

    localization::init_localization()?;

    // Get bot token and database path from environment
    let bot_token = env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN must be set");
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    info!("Initializing database at: {}", database_url);
    let conn = Connection::open(&database_url)?;
    db::init_schema(&conn)?;

    // Wrap connection in Arc<Mutex> for sharing across async tasks
    let shared_conn = Arc::new(Mutex::new(conn));
    let config = Arc::new(BotConfig::from_env());

    let bot = Bot::new(bot_token);

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .enter_dialogue::<Message, InMemStorage<SessionState>, SessionState>()
                .endpoint(bot::message_handler),
        )
        .branch(
            Update::filter_callback_query()
                .enter_dialogue::<CallbackQuery, InMemStorage<SessionState>, SessionState>()
                .endpoint(bot::callback_handler),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<SessionState>::new(),
            shared_conn,
            config
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
