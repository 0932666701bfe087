#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod check;
mod config;
mod error;
mod fetch;
mod grade;
mod logging;
mod notify;
mod parse;
mod scrape;
mod store;

use std::{future::Future, path::Path, pin::pin, time::Duration};

use clap::Parser;
use tokio::time::{interval, MissedTickBehavior};

use crate::{
    check::check_for_new_grades, config::Config, notify::Discord, scrape::Scraper, store::Store,
};

pub use error::Result;

fn print_recent(db_path: &Path, limit: usize) -> Result<()> {
    let store = Store::open(db_path)?;
    for grade in store.recent(limit)? {
        println!("{}", serde_json::to_string(&grade)?);
    }
    Ok(())
}

/// Runs `pass` now and then every `period` until `shutdown` completes, and
/// returns how many passes ran. Passes never overlap; ticks missed while a pass
/// overruns are dropped.
async fn poll_until<S, P, F>(period: Duration, shutdown: S, mut pass: P) -> usize
where
    S: Future,
    P: FnMut() -> F,
    F: Future,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // polled first, so a ctrl-c handler is registered before the first pass and
    // a shutdown requested during a pass ends the loop right after it
    let mut shutdown = pin!(shutdown);
    let mut passes = 0;
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => return passes,
            _ = ticker.tick() => {
                pass().await;
                passes += 1;
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    // values already in the environment lose to the .env file
    let dotenv = dotenvy::dotenv_override();
    let config = Config::parse();
    logging::init(&config.log_path)?;
    match dotenv {
        Ok(path) => log::debug!("Loaded settings from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Could not read the .env file: {e}"),
    }

    if let Some(limit) = config.recent {
        print_recent(&config.db_path, limit)?;
        return Ok(());
    }

    let scraper = Scraper::new(config.portal.clone());
    let notifier = Discord::new(config.discord_token.clone(), config.discord_user_id);

    if config.once {
        check_for_new_grades(&scraper, &config.db_path, &notifier).await;
        return Ok(());
    }

    log::info!("Checking for new grades every {} minutes", config.interval);
    let passes = poll_until(config.interval_period(), tokio::signal::ctrl_c(), || {
        check_for_new_grades(&scraper, &config.db_path, &notifier)
    })
    .await;
    log::info!("Shutting down after {passes} checks");
    Ok(())
}
