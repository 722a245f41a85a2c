use crate::entities::{prelude::*, searches};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::Serialize;
use tracing::debug;

/// Repository for the append-only search log
pub struct SearchRepository {
    conn: DatabaseConnection,
}

impl SearchRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: searches::Model) -> SearchEntry {
        SearchEntry {
            id: i64::from(m.id),
            search_params: m.search_params,
            budget: m.budget,
            timestamp: m.timestamp.unwrap_or_default(),
        }
    }

    pub async fn add(&self, search_params: &str, budget: &str) -> Result<i64> {
        let active_model = searches::ActiveModel {
            search_params: Set(search_params.to_string()),
            budget: Set(Some(budget.to_string())),
            ..Default::default()
        };

        let res = Searches::insert(active_model).exec(&self.conn).await?;
        debug!("Recorded search {}: {}", res.last_insert_id, search_params);
        Ok(i64::from(res.last_insert_id))
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<SearchEntry>> {
        let rows = Searches::find()
            .order_by_desc(searches::Column::Timestamp)
            .order_by_desc(searches::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchEntry {
    pub id: i64,
    pub search_params: String,
    pub budget: Option<String>,
    pub timestamp: String,
}
