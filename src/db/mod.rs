use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::favorite::{FavoriteEntry, NewFavorite};
pub use repositories::feedback::{CountryRating, Review};
pub use repositories::plan::{DEFAULT_PLAN_STATUS, NewTravelPlan, TravelPlan};
pub use repositories::search::SearchEntry;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // Every pooled connection to :memory: would open its own empty database
        if in_memory {
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn search_repo(&self) -> repositories::search::SearchRepository {
        repositories::search::SearchRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    fn feedback_repo(&self) -> repositories::feedback::FeedbackRepository {
        repositories::feedback::FeedbackRepository::new(self.conn.clone())
    }

    fn plan_repo(&self) -> repositories::plan::PlanRepository {
        repositories::plan::PlanRepository::new(self.conn.clone())
    }

    // Searches

    pub async fn save_search(&self, search_params: &str, budget: &str) -> Result<i64> {
        self.search_repo().add(search_params, budget).await
    }

    pub async fn search_history(&self, limit: u64) -> Result<Vec<SearchEntry>> {
        self.search_repo().recent(limit).await
    }

    // Favorites

    pub async fn save_favorite(&self, favorite: &NewFavorite) -> Result<i64> {
        self.favorite_repo().add(favorite).await
    }

    pub async fn list_favorites(&self) -> Result<Vec<FavoriteEntry>> {
        self.favorite_repo().list_with_search().await
    }

    pub async fn update_favorite_note(&self, id: i64, note: Option<&str>) -> Result<bool> {
        self.favorite_repo().update_note(id, note).await
    }

    // Feedback

    pub async fn save_feedback(
        &self,
        country_name: &str,
        rating: Option<i32>,
        comment: &str,
    ) -> Result<i64> {
        self.feedback_repo()
            .add(country_name, rating, comment)
            .await
    }

    pub async fn country_ratings(&self) -> Result<HashMap<String, CountryRating>> {
        self.feedback_repo().ratings().await
    }

    pub async fn recent_reviews(&self, country_name: &str, limit: u64) -> Result<Vec<Review>> {
        self.feedback_repo()
            .recent_for_country(country_name, limit)
            .await
    }

    // Travel plans

    pub async fn save_travel_plan(&self, plan: &NewTravelPlan) -> Result<i64> {
        self.plan_repo().add(plan).await
    }

    pub async fn list_travel_plans(&self) -> Result<Vec<TravelPlan>> {
        self.plan_repo().list().await
    }

    pub async fn update_plan_status(&self, id: i64, status: &str) -> Result<bool> {
        self.plan_repo().update_status(id, status).await
    }

    pub async fn delete_travel_plan(&self, id: i64) -> Result<bool> {
        self.plan_repo().remove(id).await
    }
}
