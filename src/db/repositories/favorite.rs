use crate::entities::{favorites, prelude::*, searches};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;
use tracing::debug;

/// Repository for favorites and their search snapshots
pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, favorite: &NewFavorite) -> Result<i64> {
        let active_model = favorites::ActiveModel {
            country_name: Set(favorite.country_name.clone()),
            capital: Set(favorite.capital.clone()),
            flag_url: Set(favorite.flag_url.clone()),
            weather_temp: Set(favorite.weather_temp),
            weather_desc: Set(favorite.weather_desc.clone()),
            search_id: Set(favorite.search_id.and_then(|id| i32::try_from(id).ok())),
            notes: Set(favorite.notes.clone()),
            ..Default::default()
        };

        let res = Favorites::insert(active_model).exec(&self.conn).await?;
        debug!(
            "Saved favorite {} ({}) for search {:?}",
            res.last_insert_id, favorite.country_name, favorite.search_id
        );
        Ok(i64::from(res.last_insert_id))
    }

    /// Favorites joined with the search that produced them, newest search first.
    /// Rows whose search no longer exists are left out.
    pub async fn list_with_search(&self) -> Result<Vec<FavoriteEntry>> {
        let rows = Favorites::find()
            .find_also_related(Searches)
            .order_by_desc(searches::Column::Timestamp)
            .order_by_desc(favorites::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(fav, search)| {
                search.map(|s| FavoriteEntry {
                    id: i64::from(fav.id),
                    country_name: fav.country_name,
                    capital: fav.capital,
                    flag_url: fav.flag_url,
                    weather_temp: fav.weather_temp,
                    weather_desc: fav.weather_desc,
                    notes: fav.notes,
                    search_params: s.search_params,
                    searched_at: s.timestamp.unwrap_or_default(),
                })
            })
            .collect())
    }

    pub async fn update_note(&self, id: i64, note: Option<&str>) -> Result<bool> {
        let Ok(id) = i32::try_from(id) else {
            return Ok(false);
        };
        let result = Favorites::update_many()
            .col_expr(
                favorites::Column::Notes,
                sea_orm::sea_query::Expr::value(note.map(ToString::to_string)),
            )
            .filter(favorites::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

// ============================================================================
// Data Types
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewFavorite {
    pub country_name: String,
    pub capital: Option<String>,
    pub flag_url: Option<String>,
    pub weather_temp: Option<i32>,
    pub weather_desc: Option<String>,
    pub search_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteEntry {
    pub id: i64,
    pub country_name: String,
    pub capital: Option<String>,
    pub flag_url: Option<String>,
    pub weather_temp: Option<i32>,
    pub weather_desc: Option<String>,
    pub notes: Option<String>,
    pub search_params: String,
    pub searched_at: String,
}
