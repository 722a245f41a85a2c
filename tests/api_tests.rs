use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Statement};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use travelai::clients::{CountrySource, WeatherSource};
use travelai::config::Config;
use travelai::models::country::Country;
use travelai::models::weather::Weather;
use travelai::state::SharedState;

struct FakeCountries(Vec<Country>);

#[async_trait::async_trait]
impl CountrySource for FakeCountries {
    async fn fetch_countries(&self) -> anyhow::Result<Vec<Country>> {
        Ok(self.0.clone())
    }
}

struct FakeWeather(HashMap<&'static str, i32>);

#[async_trait::async_trait]
impl WeatherSource for FakeWeather {
    async fn current_weather(&self, city: &str) -> Weather {
        match self.0.get(city) {
            Some(temp) => Weather {
                temp: *temp,
                feels_like: *temp,
                description: "Ясно".to_string(),
                ..Weather::fallback()
            },
            None => Weather::fallback(),
        }
    }
}

fn countries() -> Vec<Country> {
    let json = r#"[
        {
            "name": {"common": "Thailand", "official": "Kingdom of Thailand"},
            "capital": ["Bangkok"],
            "flags": {"png": "https://flagcdn.com/w320/th.png"},
            "region": "Asia",
            "subregion": "South-Eastern Asia",
            "landlocked": false,
            "languages": {"tha": "Thai"},
            "currencies": {"THB": {"name": "Thai baht"}},
            "population": 69799978,
            "area": 513120.0
        },
        {
            "name": {"common": "Norway", "official": "Kingdom of Norway"},
            "capital": ["Oslo"],
            "flags": {"png": "https://flagcdn.com/w320/no.png"},
            "region": "Europe",
            "subregion": "Northern Europe",
            "landlocked": false,
            "languages": {"nno": "Norwegian Nynorsk", "nob": "Norwegian Bokmål"},
            "currencies": {"NOK": {"name": "Norwegian krone"}},
            "population": 5379475,
            "area": 323802.0
        }
    ]"#;
    serde_json::from_str(json).unwrap()
}

async fn spawn_app() -> Router {
    spawn_app_with_state().await.1
}

async fn spawn_app_with_state() -> (Arc<travelai::api::AppState>, Router) {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let weather = FakeWeather(HashMap::from([("Bangkok", 32), ("Oslo", 4)]));
    let shared = SharedState::with_sources(
        config,
        Arc::new(FakeCountries(countries())),
        Arc::new(weather),
    )
    .await
    .expect("Failed to create shared state");

    let state = travelai::api::create_app_state(Arc::new(shared), None)
        .await
        .expect("Failed to create app state");
    let router = travelai::api::router(state.clone());
    (state, router)
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> Request<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

/// The `name=value` part of the session cookie set by a response.
fn session_cookie(response: &Response) -> String {
    let raw = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie should be set")
        .to_str()
        .unwrap();
    raw.split(';').next().unwrap().to_string()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_home_page() {
    let app = spawn_app().await;

    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains(r#"action="/recommend""#));
    assert!(body.contains(r#"name="type""#));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = spawn_app().await;

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body_json["success"], true);
    assert_eq!(body_json["data"]["database"], true);
    assert_eq!(body_json["data"]["countries_cached"], false);
}

#[tokio::test]
async fn test_recommend_flow() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/recommend",
            &[("type", "пляж"), ("climate", "tropical"), ("currency", "EUR")],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Thailand"));
    assert!(!body.contains("Norway"));
    assert!(body.contains("1500-2250 EUR"));
    assert!(body.contains("/country/Thailand"));

    let response = app.clone().oneshot(get("/favorites", None)).await.unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Thailand"));
    assert!(body.contains("пляж|1000|tropical|any|week|EUR"));

    let response = app.oneshot(get("/history", None)).await.unwrap();
    let body = body_text(response).await;
    assert!(body.contains("пляж|1000|tropical|any|week|EUR"));
}

#[tokio::test]
async fn test_recommend_falls_back_to_category_backups() {
    let app = spawn_app().await;

    // nothing in the dataset is cold enough for the mountains search
    let response = app
        .oneshot(post_form(
            "/recommend",
            &[("type", "горы"), ("climate", "cold"), ("language", "Swahili")],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Швейцария"));
    assert!(body.contains("Непал"));
    assert!(body.contains("1000-1500 USD"));
}

#[tokio::test]
async fn test_unsaved_search_redirects_home_with_flash() {
    let (state, app) = spawn_app_with_state().await;

    let conn = &state.store().conn;
    conn.execute(Statement::from_string(
        conn.get_database_backend(),
        "DROP TABLE searches",
    ))
    .await
    .unwrap();

    let response = app
        .clone()
        .oneshot(post_form("/recommend", &[("type", "пляж")], None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response);

    let response = app.oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Ошибка при сохранении параметров поиска"));
}

#[tokio::test]
async fn test_country_detail() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/feedback",
            &[
                ("country_name", "Norway"),
                ("rating", "5"),
                ("comment", "Фьорды"),
            ],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/favorites");

    let response = app.oneshot(get("/country/Norway", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Kingdom of Norway"));
    assert!(body.contains("5,379,475"));
    assert!(body.contains("323,802"));
    assert!(body.contains("NOK"));
    assert!(body.contains("Фьорды"));
    assert!(body.contains("4°C"));
}

#[tokio::test]
async fn test_unknown_country_redirects_with_flash() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get("/country/Atlantis", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response);

    let response = app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Страна не найдена"));

    // flashes are shown once
    let response = app.oneshot(get("/", Some(&cookie))).await.unwrap();
    let body = body_text(response).await;
    assert!(!body.contains("Страна не найдена"));
}

#[tokio::test]
async fn test_travel_plan_lifecycle() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/add_plan",
            &[
                ("country_name", "Thailand"),
                ("start_date", "2026-12-20"),
                ("end_date", "2027-01-05"),
                ("budget", "2400"),
                ("activities", "дайвинг"),
            ],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/plans");
    let cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(get("/plans", Some(&cookie)))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("План поездки успешно добавлен"));
    assert!(body.contains("дайвинг"));
    assert!(body.contains("2026-12-20"));

    let response = app
        .clone()
        .oneshot(post_form("/plan_status/1", &[("status", "booked")], Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(get("/plans", Some(&cookie)))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Статус плана обновлен"));
    assert!(body.contains(r#"value="booked" selected"#));

    let response = app
        .clone()
        .oneshot(post_form("/delete_plan/1", &[], Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.oneshot(get("/plans", Some(&cookie))).await.unwrap();
    let body = body_text(response).await;
    assert!(body.contains("План поездки удален"));
    assert!(!body.contains("дайвинг"));
}

#[tokio::test]
async fn test_invalid_forms_flash_errors() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_form("/add_plan", &[("country_name", " ")], None))
        .await
        .unwrap();
    let cookie = session_cookie(&response);
    let response = app
        .clone()
        .oneshot(get("/plans", Some(&cookie)))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("Ошибка при сохранении плана поездки"));

    let response = app
        .clone()
        .oneshot(post_form("/save_note/42", &[("note", "нет такой")], None))
        .await
        .unwrap();
    assert_eq!(location(&response), "/favorites");
    let cookie = session_cookie(&response);
    let response = app
        .oneshot(get("/favorites", Some(&cookie)))
        .await
        .unwrap();
    assert!(body_text(response).await.contains("Ошибка при сохранении заметки"));
}

#[tokio::test]
async fn test_static_assets() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get("/static/style.css", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert_eq!(content_type, mime::TEXT_CSS.as_ref());

    let response = app.oneshot(get("/static/missing.js", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
