use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;

#[derive(Debug)]
pub enum ApiError {
    DatabaseError(String),

    ValidationError(String),

    TemplateError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::TemplateError(msg) => write!(f, "Template error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    /// Status and user-facing message. Server-side details are logged here
    /// and never reach the client.
    fn public_parts(&self) -> (StatusCode, String) {
        match self {
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::TemplateError(msg) => {
                tracing::error!("Template error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Page could not be rendered".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.public_parts();
        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<handlebars::RenderError> for ApiError {
    fn from(err: handlebars::RenderError) -> Self {
        ApiError::TemplateError(err.to_string())
    }
}

impl From<crate::services::RecommendError> for ApiError {
    fn from(err: crate::services::RecommendError) -> Self {
        use crate::services::RecommendError;
        match err {
            RecommendError::SearchNotSaved(msg) | RecommendError::Database(msg) => {
                ApiError::DatabaseError(msg)
            }
        }
    }
}

/// Error from a browser-facing page route, answered with a bare HTML page
/// instead of the JSON envelope.
#[derive(Debug)]
pub struct PageError(pub ApiError);

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.public_parts();
        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"ru\">\n<head><meta charset=\"utf-8\"><title>{code}</title></head>\n<body>\n<h1>{code}</h1>\n<p>{message}</p>\n<p><a href=\"/\">На главную</a></p>\n</body>\n</html>\n",
            code = status.as_u16(),
            message = handlebars::html_escape(&message),
        );
        (status, Html(body)).into_response()
    }
}

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        PageError(err)
    }
}

impl From<crate::services::RecommendError> for PageError {
    fn from(err: crate::services::RecommendError) -> Self {
        PageError(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn database_errors_hide_details() {
        let response = ApiError::DatabaseError("no such table: searches".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "A database error occurred");
    }

    #[tokio::test]
    async fn page_errors_render_html() {
        let response =
            PageError(ApiError::TemplateError("missing helper".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = response.headers()[axum::http::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("<h1>500</h1>"));
        assert!(html.contains("Page could not be rendered"));
        assert!(!html.contains("missing helper"));
    }
}
