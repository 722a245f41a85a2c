use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{error, info};

use super::validation::{
    PLAN_STATUSES, parse_budget, parse_plan_date, validate_country_name, validate_plan_status,
};
use super::{AppState, PageError, PlanForm, PlanStatusForm, PlansPage, flash};
use crate::db::NewTravelPlan;

pub async fn list_plans(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let plans = state.store().list_travel_plans().await.unwrap_or_else(|e| {
        error!("Failed to load travel plans: {}", e);
        Vec::new()
    });

    state
        .render_page(
            &session,
            "plans",
            "Планы поездок",
            PlansPage {
                plans,
                statuses: PLAN_STATUSES,
            },
        )
        .await
}

pub async fn add_plan(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<PlanForm>,
) -> Redirect {
    let saved = match validate_country_name(&form.country_name) {
        Ok(country) => {
            let plan = NewTravelPlan {
                country_name: country.to_string(),
                start_date: parse_plan_date(form.start_date.as_deref()),
                end_date: parse_plan_date(form.end_date.as_deref()),
                budget: parse_budget(form.budget.as_deref()),
                activities: form.activities,
            };
            state
                .store()
                .save_travel_plan(&plan)
                .await
                .map_err(|e| error!("Failed to save travel plan: {}", e))
                .is_ok()
        }
        Err(e) => {
            info!("Rejected travel plan: {}", e);
            false
        }
    };

    if saved {
        flash::success(&session, "План поездки успешно добавлен").await;
    } else {
        flash::error(&session, "Ошибка при сохранении плана поездки").await;
    }

    Redirect::to("/plans")
}

pub async fn delete_plan(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
) -> Redirect {
    // deleting a plan that is already gone still counts as success
    match state.store().delete_travel_plan(id).await {
        Ok(_) => flash::success(&session, "План поездки удален").await,
        Err(e) => {
            error!("Failed to delete travel plan {}: {}", id, e);
            flash::error(&session, "Ошибка при удалении плана поездки").await;
        }
    }

    Redirect::to("/plans")
}

pub async fn update_plan_status(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<PlanStatusForm>,
) -> Redirect {
    let updated = match validate_plan_status(&form.status) {
        Ok(status) => match state.store().update_plan_status(id, status).await {
            Ok(found) => found,
            Err(e) => {
                error!("Failed to update travel plan {}: {}", id, e);
                false
            }
        },
        Err(e) => {
            info!("Rejected status update for plan {}: {}", id, e);
            false
        }
    };

    if updated {
        flash::success(&session, "Статус плана обновлен").await;
    } else {
        flash::error(&session, "Ошибка при обновлении статуса плана").await;
    }

    Redirect::to("/plans")
}
