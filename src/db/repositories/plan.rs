use crate::entities::{prelude::*, travel_plans};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Serialize;
use tracing::info;

pub const DEFAULT_PLAN_STATUS: &str = "planned";

/// Repository for travel plan operations
pub struct PlanRepository {
    conn: DatabaseConnection,
}

impl PlanRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: travel_plans::Model) -> TravelPlan {
        TravelPlan {
            id: i64::from(m.id),
            country_name: m.country_name,
            start_date: m.start_date,
            end_date: m.end_date,
            budget: m.budget,
            activities: m.activities.unwrap_or_default(),
            status: m.status,
        }
    }

    pub async fn add(&self, plan: &NewTravelPlan) -> Result<i64> {
        let active_model = travel_plans::ActiveModel {
            country_name: Set(plan.country_name.clone()),
            start_date: Set(plan.start_date.clone()),
            end_date: Set(plan.end_date.clone()),
            budget: Set(plan.budget),
            activities: Set(Some(plan.activities.clone())),
            status: Set(DEFAULT_PLAN_STATUS.to_string()),
            ..Default::default()
        };

        let res = TravelPlans::insert(active_model).exec(&self.conn).await?;
        info!("Added travel plan {} for {}", res.last_insert_id, plan.country_name);
        Ok(i64::from(res.last_insert_id))
    }

    pub async fn list(&self) -> Result<Vec<TravelPlan>> {
        let rows = TravelPlans::find()
            .order_by_desc(travel_plans::Column::StartDate)
            .order_by_desc(travel_plans::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn update_status(&self, id: i64, status: &str) -> Result<bool> {
        let Ok(id) = i32::try_from(id) else {
            return Ok(false);
        };
        let result = TravelPlans::update_many()
            .col_expr(
                travel_plans::Column::Status,
                sea_orm::sea_query::Expr::value(status),
            )
            .filter(travel_plans::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn remove(&self, id: i64) -> Result<bool> {
        let Ok(id) = i32::try_from(id) else {
            return Ok(false);
        };
        let result = TravelPlans::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}

// ============================================================================
// Data Types
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewTravelPlan {
    pub country_name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub budget: Option<f64>,
    pub activities: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TravelPlan {
    pub id: i64,
    pub country_name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub budget: Option<f64>,
    pub activities: String,
    pub status: String,
}
