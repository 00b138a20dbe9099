use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(pk_auto(Genres::Id))
                    .col(string_uniq(Genres::GenreName))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::FirstName))
                    .col(string(Users::LastName))
                    .col(string_uniq(Users::Email))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string(Movies::Title))
                    .col(integer(Movies::ReleaseYear))
                    .col(integer(Movies::GenreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movies_genre_id")
                            .from(Movies::Table, Movies::GenreId)
                            .to(Genres::Table, Genres::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(pk_auto(Reviews::Id))
                    .col(integer(Reviews::MovieId))
                    .col(integer(Reviews::UserId))
                    .col(double(Reviews::Rating).check(Expr::col(Reviews::Rating).between(0.0, 10.0)))
                    .col(text_null(Reviews::Comment))
                    .col(string(Reviews::Date))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_movie_id")
                            .from(Reviews::Table, Reviews::MovieId)
                            .to(Movies::Table, Movies::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_user_id")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reviews::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genres::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
    GenreName,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    ReleaseYear,
    GenreId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    MovieId,
    UserId,
    Rating,
    Comment,
    Date,
}
