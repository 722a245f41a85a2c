use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Searches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Searches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Searches::SearchParams).string().not_null())
                    .col(ColumnDef::new(Searches::Budget).string().null())
                    .col(
                        ColumnDef::new(Searches::Timestamp)
                            .date_time()
                            .null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_owned()),
                    )
                    .to_owned(),
            )
            .await?;

        // search_id is a plain column: favorites may point at searches that no longer exist
        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Favorites::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Favorites::CountryName).string().not_null())
                    .col(ColumnDef::new(Favorites::Capital).string().null())
                    .col(ColumnDef::new(Favorites::FlagUrl).string().null())
                    .col(ColumnDef::new(Favorites::WeatherTemp).integer().null())
                    .col(ColumnDef::new(Favorites::WeatherDesc).string().null())
                    .col(ColumnDef::new(Favorites::SearchId).integer().null())
                    .col(ColumnDef::new(Favorites::Notes).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::CountryName).string().not_null())
                    .col(ColumnDef::new(Feedback::Rating).integer().null())
                    .col(ColumnDef::new(Feedback::Comment).string().null())
                    .col(
                        ColumnDef::new(Feedback::Timestamp)
                            .date_time()
                            .null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_owned()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TravelPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TravelPlans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TravelPlans::CountryName).string().not_null())
                    .col(ColumnDef::new(TravelPlans::StartDate).string().null())
                    .col(ColumnDef::new(TravelPlans::EndDate).string().null())
                    .col(ColumnDef::new(TravelPlans::Budget).double().null())
                    .col(ColumnDef::new(TravelPlans::Activities).string().null())
                    .col(
                        ColumnDef::new(TravelPlans::Status)
                            .string()
                            .not_null()
                            .default("planned"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_country_name")
                    .table(Feedback::Table)
                    .col(Feedback::CountryName)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TravelPlans::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Searches::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Searches {
    Table,
    Id,
    SearchParams,
    Budget,
    Timestamp,
}

#[derive(Iden)]
enum Favorites {
    Table,
    Id,
    CountryName,
    Capital,
    FlagUrl,
    WeatherTemp,
    WeatherDesc,
    SearchId,
    Notes,
}

#[derive(Iden)]
enum Feedback {
    Table,
    Id,
    CountryName,
    Rating,
    Comment,
    Timestamp,
}

#[derive(Iden)]
enum TravelPlans {
    Table,
    Id,
    CountryName,
    StartDate,
    EndDate,
    Budget,
    Activities,
    Status,
}
