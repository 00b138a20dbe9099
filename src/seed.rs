use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::{
    catalog,
    dataset::Dataset,
    error::{SeedError, SeedResult},
};

/// Items written (or found already present) per kind, plus those skipped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub genres: usize,
    pub users: usize,
    pub movies: usize,
    pub reviews: usize,
    pub skipped: usize,
}

/// Seeds genres, users, movies and reviews in that order.
///
/// Invalid items and items pointing at missing rows are logged and skipped.
/// A storage error stops the run.
pub async fn run(db: &DatabaseConnection, dataset: &Dataset) -> SeedResult<SeedReport> {
    let mut report = SeedReport::default();

    for name in &dataset.genres {
        match catalog::add_genre(db, name).await {
            Ok(id) => {
                info!(genre = %name, id, "seeded genre");
                report.genres += 1;
            },
            Err(err) => skip(&mut report, "genre", name, err)?,
        }
    }

    for u in &dataset.users {
        match catalog::add_user(db, &u.first_name, &u.last_name, &u.email).await {
            Ok(id) => {
                info!(email = %u.email, id, "seeded user");
                report.users += 1;
            },
            Err(err) => skip(&mut report, "user", &u.email, err)?,
        }
    }

    for m in &dataset.movies {
        let result = match catalog::find_genre_id(db, &m.genre).await? {
            Some(genre_id) => catalog::add_movie(db, &m.title, m.release_year, genre_id).await,
            None => Err(SeedError::missing("genre", &m.genre)),
        };
        match result {
            Ok(id) => {
                info!(title = %m.title, release_year = m.release_year, id, "seeded movie");
                report.movies += 1;
            },
            Err(err) => skip(&mut report, "movie", &m.title, err)?,
        }
    }

    for r in &dataset.reviews {
        match catalog::add_review(db, &r.movie_title, &r.user_email, r.rating, r.comment.as_deref())
            .await
        {
            Ok(id) => {
                info!(title = %r.movie_title, email = %r.user_email, rating = r.rating, id, "seeded review");
                report.reviews += 1;
            },
            Err(err) => skip(&mut report, "review", &r.movie_title, err)?,
        }
    }

    Ok(report)
}

/// Runs the seed and releases the connection on both paths.
///
/// A seeding error takes precedence over a failure to close.
pub async fn run_and_close(db: DatabaseConnection, dataset: &Dataset) -> SeedResult<SeedReport> {
    match run(&db, dataset).await {
        Ok(report) => {
            db.close().await?;
            Ok(report)
        },
        Err(err) => {
            error!(error = %err, "seeding aborted");
            if let Err(close_err) = db.close().await {
                error!(error = %close_err, "failed to close database");
            }
            Err(err)
        },
    }
}

fn skip(report: &mut SeedReport, kind: &str, key: &str, err: SeedError) -> SeedResult<()> {
    if err.is_fatal() {
        return Err(err);
    }
    warn!(kind, key = %key, error = %err, "skipping seed item");
    report.skipped += 1;
    Ok(())
}
