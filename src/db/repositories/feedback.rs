use crate::entities::{feedback, prelude::*};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set, Statement,
};
use serde::Serialize;
use std::collections::HashMap;

/// Repository for user reviews and rating aggregates
pub struct FeedbackRepository {
    conn: DatabaseConnection,
}

impl FeedbackRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, country_name: &str, rating: Option<i32>, comment: &str) -> Result<i64> {
        let active_model = feedback::ActiveModel {
            country_name: Set(country_name.to_string()),
            rating: Set(rating),
            comment: Set(Some(comment.to_string())),
            ..Default::default()
        };

        let res = Feedback::insert(active_model).exec(&self.conn).await?;
        Ok(i64::from(res.last_insert_id))
    }

    /// Average rating and review count per country. Countries without any
    /// feedback rows do not appear in the map.
    pub async fn ratings(&self) -> Result<HashMap<String, CountryRating>> {
        let backend = self.conn.get_database_backend();
        let rows = RatingRow::find_by_statement(Statement::from_string(
            backend,
            "SELECT country_name, \
                    COALESCE(AVG(rating), 0.0) AS avg_rating, \
                    COUNT(*) AS reviews_count \
             FROM feedback \
             GROUP BY country_name"
                .to_string(),
        ))
        .all(&self.conn)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let rating = CountryRating {
                    rating: (row.avg_rating * 10.0).round() / 10.0,
                    reviews: row.reviews_count,
                };
                (row.country_name, rating)
            })
            .collect())
    }

    pub async fn recent_for_country(&self, country_name: &str, limit: u64) -> Result<Vec<Review>> {
        let rows = Feedback::find()
            .filter(feedback::Column::CountryName.eq(country_name))
            .order_by_desc(feedback::Column::Timestamp)
            .order_by_desc(feedback::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Review {
                rating: r.rating,
                comment: r.comment.unwrap_or_default(),
                timestamp: r.timestamp.unwrap_or_default(),
            })
            .collect())
    }
}

#[derive(Debug, FromQueryResult)]
struct RatingRow {
    country_name: String,
    avg_rating: f64,
    reviews_count: i64,
}

// ============================================================================
// Data Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryRating {
    pub rating: f64,
    pub reviews: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub rating: Option<i32>,
    pub comment: String,
    pub timestamp: String,
}
