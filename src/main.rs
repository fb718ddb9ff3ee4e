#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Result;
use owo_colors::OwoColorize;
use tokio::sync::mpsc;
use tokio::task;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::BackendName;
use crate::domain::models::Event;
use crate::domain::services::ActionsService;
use crate::infrastructure::backends::BackendManager;

fn handle_error(err: anyhow::Error) {
    eprintln!("{}", "fintalk has crashed with the following error.".red());
    eprintln!();
    eprintln!("{err:?}");
    eprintln!();
    eprintln!("Version: {}", env!("CARGO_PKG_VERSION"));
    process::exit(1);
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("FINTALK_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap()
            .join("fintalk")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("fintalk")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let ready_res = cli::parse().await;
    if let Err(ready_err) = ready_res {
        handle_error(ready_err);
        return;
    }
    if !ready_res.unwrap() {
        process::exit(0);
    }

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        let backend_name = Config::get(ConfigKey::Backend).parse::<BackendName>()?;
        let backend = BackendManager::get(backend_name)?;
        return ActionsService::start(backend, event_tx, &mut action_rx).await;
    });

    let background_res: Result<()> = tokio::select! {
        res = background_futures.join_next() => {
            match res {
                Some(Ok(inner)) => inner,
                Some(Err(err)) => Err(anyhow::anyhow!(err)),
                None => Ok(()),
            }
        }
        res = ui::start(action_tx, &mut event_rx) => res,
    };

    if let Err(err) = background_res {
        handle_error(err);
    }
}
