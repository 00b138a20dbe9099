//! Natural-key upserts for genres, users and movies, plus review inserts.
//!
//! Genres, users and movies are written with `INSERT ... ON CONFLICT DO NOTHING`
//! against their unique constraints and then read back by natural key, so a
//! repeated call returns the existing row's id instead of adding a second row.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    sea_query::OnConflict,
};
use tracing::debug;

use crate::{
    entities::{genre, movie, review, user},
    error::{SeedError, SeedResult},
};

pub async fn add_genre(db: &DatabaseConnection, genre_name: &str) -> SeedResult<i32> {
    require("genre name", genre_name)?;

    let model = genre::ActiveModel {
        id: Default::default(),
        genre_name: Set(genre_name.to_string()),
    };

    let inserted = genre::Entity::insert(model)
        .on_conflict(OnConflict::column(genre::Column::GenreName).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;

    let id = find_genre_id(db, genre_name)
        .await?
        .ok_or_else(|| SeedError::missing("genre", genre_name))?;

    if inserted == 0 {
        debug!(genre = %genre_name, id, "genre already exists");
    } else {
        debug!(genre = %genre_name, id, "genre created");
    }

    Ok(id)
}

pub async fn find_genre_id(db: &DatabaseConnection, genre_name: &str) -> SeedResult<Option<i32>> {
    let id = genre::Entity::find()
        .select_only()
        .column(genre::Column::Id)
        .filter(genre::Column::GenreName.eq(genre_name))
        .into_tuple::<i32>()
        .one(db)
        .await?;
    Ok(id)
}

pub async fn add_user(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> SeedResult<i32> {
    require("first name", first_name)?;
    require("last name", last_name)?;
    require("email", email)?;

    let model = user::ActiveModel {
        id: Default::default(),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        email: Set(email.to_string()),
    };

    let inserted = user::Entity::insert(model)
        .on_conflict(OnConflict::column(user::Column::Email).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;

    let id = find_user(db, email).await?.ok_or_else(|| SeedError::missing("user", email))?.id;

    if inserted == 0 {
        debug!(email = %email, id, "user already exists");
    } else {
        debug!(email = %email, id, "user created");
    }

    Ok(id)
}

pub async fn add_movie(
    db: &DatabaseConnection,
    title: &str,
    release_year: i32,
    genre_id: i32,
) -> SeedResult<i32> {
    require("movie title", title)?;

    if genre::Entity::find_by_id(genre_id).one(db).await?.is_none() {
        return Err(SeedError::missing("genre", genre_id));
    }

    let model = movie::ActiveModel {
        id: Default::default(),
        title: Set(title.to_string()),
        release_year: Set(release_year),
        genre_id: Set(genre_id),
    };

    let inserted = movie::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([movie::Column::Title, movie::Column::ReleaseYear])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    let id = movie::Entity::find()
        .filter(movie::Column::Title.eq(title))
        .filter(movie::Column::ReleaseYear.eq(release_year))
        .one(db)
        .await?
        .ok_or_else(|| SeedError::missing("movie", format!("{title} ({release_year})")))?
        .id;

    if inserted == 0 {
        debug!(title = %title, release_year, id, "movie already exists");
    } else {
        debug!(title = %title, release_year, id, "movie created");
    }

    Ok(id)
}

/// Appends a review; identical calls produce identical rows.
///
/// The rating is checked before any lookup. When several movies share the
/// title, the one inserted first is reviewed.
pub async fn add_review(
    db: &DatabaseConnection,
    movie_title: &str,
    user_email: &str,
    rating: f64,
    comment: Option<&str>,
) -> SeedResult<i32> {
    if !(0.0..=10.0).contains(&rating) {
        return Err(SeedError::Validation(format!("rating {rating} is outside 0..=10")));
    }

    let movie = movie::Entity::find()
        .filter(movie::Column::Title.eq(movie_title))
        .order_by_asc(movie::Column::Id)
        .one(db)
        .await?
        .ok_or_else(|| SeedError::missing("movie", movie_title))?;

    let user = find_user(db, user_email).await?.ok_or_else(|| SeedError::missing("user", user_email))?;

    let model = review::ActiveModel {
        id: Default::default(),
        movie_id: Set(movie.id),
        user_id: Set(user.id),
        rating: Set(rating),
        comment: Set(comment.map(str::to_string)),
        date: Set(now_local()),
    };

    let id = review::Entity::insert(model).exec(db).await?.last_insert_id;
    debug!(movie_id = movie.id, user_id = user.id, rating, id, "review created");

    Ok(id)
}

async fn find_user(db: &DatabaseConnection, email: &str) -> SeedResult<Option<user::Model>> {
    Ok(user::Entity::find().filter(user::Column::Email.eq(email)).one(db).await?)
}

fn require(field: &str, value: &str) -> SeedResult<()> {
    if value.trim().is_empty() {
        return Err(SeedError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn now_local() -> String {
    jiff::Zoned::now().strftime("%Y-%m-%d %H:%M:%S").to_string()
}
