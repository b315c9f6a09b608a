use crate::catalog::{CatalogItem, MemoryStore, MenuStore};
use crate::config::AppConfig;
use crate::import::{ImportError, ImportSummary, import_menu_text};
use crate::model::ParsedMenuItem;
use crate::parser::MenuParser;
use crate::pricing::PricingPolicy;
use crate::source::{build_client, download_and_extract_text, extract_text};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub store: MemoryStore,
    pub parser: Arc<MenuParser>,
    pub pricing: Arc<PricingPolicy>,
    pub client: Client,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            store: MemoryStore::new(),
            parser: Arc::new(MenuParser::new(&config.parser)?),
            pricing: Arc::new(PricingPolicy::new(&config.pricing)?),
            client: build_client()?,
        })
    }
}

#[derive(Deserialize)]
pub struct ImportUrlParams {
    pub url: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub active: Option<bool>,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/menu/parse", post(parse_menu))
        .route("/menu/import", post(import_menu))
        .route("/menu/import-url", post(import_menu_url))
        .route("/menu/items", get(list_items))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .with_state(state)
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        let status = match &self {
            ImportError::NoItemsFound => StatusCode::UNPROCESSABLE_ENTITY,
            ImportError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ImportError::Source(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn parse_menu(State(state): State<AppState>, body: String) -> Json<Vec<ParsedMenuItem>> {
    Json(state.parser.parse(&body))
}

async fn import_menu(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ImportSummary>, Response> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let text = match extract_text(&body, content_type) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "unreadable menu upload");
            return Err((StatusCode::BAD_REQUEST, format!("Failed to read menu: {err}")).into_response());
        }
    };

    import_menu_text(&state.store, &state.parser, &state.pricing, &text)
        .await
        .map(Json)
        .map_err(IntoResponse::into_response)
}

async fn import_menu_url(
    State(state): State<AppState>,
    Query(params): Query<ImportUrlParams>,
) -> Result<Json<ImportSummary>, ImportError> {
    let text = download_and_extract_text(&state.client, &params.url)
        .await
        .map_err(|err| {
            warn!(url = %params.url, error = %err, "menu download failed");
            ImportError::Source(err)
        })?;

    import_menu_text(&state.store, &state.parser, &state.pricing, &text)
        .await
        .map(Json)
}

async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CatalogItem>>, ImportError> {
    let items = state.store.list_items().await.map_err(ImportError::Store)?;
    let items = match params.active {
        Some(active) => items.into_iter().filter(|i| i.active == active).collect(),
        None => items,
    };
    Ok(Json(items))
}
