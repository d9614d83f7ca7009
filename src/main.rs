use std::{fs::OpenOptions, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use reqwest::Client;
use simplelog::LevelFilter;
use teloxide::{prelude::*, utils::command::BotCommands};
use tokio::{
    signal,
    sync::mpsc::{self, Sender},
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;

use bot_handlers::{register_hooks, store::MemoryStore, BotState, Command};
use common::spawn_with_token;
use hooks::HookRegistry;

use crate::config::Config;
use crate::handlers::tg_logs::{start_tg_logs_job, LogMessage};
use crate::logger::TgLogger;

mod config;
mod handlers;
mod logger;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const LOG_FILE: &str = "bot.log";
const IS_PROD_BUILD: bool = cfg!(feature = "prod");

#[tokio::main]
async fn main() -> Result<()> {
    let is_prod = IS_PROD_BUILD || common::is_prod_env();
    let tg_logs_chan = mpsc::channel(100);
    init_logger(tg_logs_chan.0, is_prod)?;

    let config_path = common::config_path();
    log::debug!("loading config from {config_path}");
    let config = Config::load(&config_path)?;

    let mut registry = HookRegistry::new();
    register_hooks(&mut registry, &config.modules);
    log::debug!("registered hooks: {registry:?}");

    let store = MemoryStore::new(config.keys, config.trial_users).shared();
    let state = BotState::new(Arc::new(registry), store, &config.modules)?;

    let token = common::bot_token().context("BOT_TOKEN env variable is not set")?;
    let bot = Bot::with_client(token, Client::builder().timeout(REQUEST_TIMEOUT).build()?);
    bot.set_my_commands(Command::bot_commands()).await?;

    let cancel_token = CancellationToken::new();

    let mut jobs = JoinSet::new();
    if let Some(log_chat_id) = common::log_chat_id() {
        jobs.spawn(spawn_with_token(
            cancel_token.clone(),
            start_tg_logs_job(bot.clone(), ChatId(log_chat_id), tg_logs_chan.1),
        ));
    } else {
        log::warn!("LOG_CHAT_ID env not set, skip starting tg logs job")
    }
    jobs.spawn(spawn_with_token(
        cancel_token.clone(),
        start_bot(bot.clone(), state),
    ));

    jobs.spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("failed to listen for SIGINT: {e}");
        }
        cancel_token.cancel();
    });

    while (jobs.join_next().await).is_some() {}

    Ok(())
}

fn init_logger(sender: Sender<LogMessage>, is_prod: bool) -> Result<()> {
    use simplelog::*;

    use logger::{Config as TgConfig, ConfigBuilder as TgConfigBuilder};

    let level = if is_prod {
        LevelFilter::Error
    } else {
        LevelFilter::Debug
    };

    let term_config = if is_prod {
        Config::default()
    } else {
        ConfigBuilder::new()
            .add_filter_ignore_str("h2")
            .add_filter_ignore_str("hyper")
            .add_filter_ignore_str("reqwest")
            .add_filter_ignore_str("rustls")
            .build()
    };

    let tg_config = if is_prod {
        TgConfig::default()
    } else {
        TgConfigBuilder::new()
            .add_ignore("ConnectionReset")
            .add_ignore("TerminatedByOtherGetUpdates")
            .build()
    };

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("failed to open {LOG_FILE}"))?;

    CombinedLogger::init(vec![
        TermLogger::new(level, term_config.clone(), TerminalMode::Mixed, ColorChoice::Auto),
        WriteLogger::new(LevelFilter::Info, term_config, log_file),
        TgLogger::new(sender, tg_config),
    ])
    .context("failed to init logger")
}

async fn start_bot(bot: Bot, state: BotState) {
    log::debug!("starting bot");
    Dispatcher::builder(bot, bot_handlers::schema())
        .dependencies(dptree::deps![state])
        .default_handler(|update| async move { log::debug!("unhandled update: {:?}", update.id) })
        .error_handler(LoggingErrorHandler::with_custom_text("error in dispatcher"))
        .build()
        .dispatch()
        .await;
}
