mod catalog;
mod config;
mod dataset;
mod db;
mod entities;
mod error;
mod seed;

use tracing::{error, info};

use crate::{config::Config, dataset::Dataset};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movieseed=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let dataset = match &config.seed_file {
        Some(path) => Dataset::from_path(path)?,
        None => Dataset::builtin()?,
    };

    let db = match db::connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(err) => {
            error!(url = %config.database_url, error = %err, "failed to open database");
            return Err(err.into());
        },
    };
    info!(url = %config.database_url, "tables ready");

    let report = seed::run_and_close(db, &dataset).await?;
    info!(
        genres = report.genres,
        users = report.users,
        movies = report.movies,
        reviews = report.reviews,
        skipped = report.skipped,
        "seeding finished"
    );

    Ok(())
}
