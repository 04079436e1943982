use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use showcase_core::{
    AssetCatalog, DirAssets, PageQuery, Showcase, ShowcaseConfig, ShowcaseError, ViewMode,
    assets::{content_type, placeholder_svg},
    config::{asset_dir_from_env_value, build_mode_from_env_value},
    constants::{ASSET_DIR_ENV_VAR, MODE_ENV_VAR},
    project_case,
};
use showcase_types::AssetName;

/// Application state shared across handlers
///
/// The showcase and its dataset are read-only after startup; every page request builds its own
/// session from the query string.
#[derive(Clone)]
struct AppState {
    showcase: Arc<Showcase>,
    assets: Arc<DirAssets>,
}

#[derive(Serialize, Deserialize, ToSchema)]
struct HealthRes {
    ok: bool,
    message: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
struct NavItemRes {
    id: String,
    label: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
struct CaseSummary {
    id: String,
    title: String,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
struct ListCasesRes {
    cases: Vec<CaseSummary>,
}

#[derive(Serialize, Deserialize, ToSchema)]
struct CaseViewRes {
    id: String,
    view: String,
    #[schema(value_type = Object)]
    data: serde_json::Value,
}

#[derive(Deserialize)]
struct ViewQuery {
    view: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_nav, list_cases, get_case),
    components(schemas(HealthRes, NavItemRes, CaseSummary, ListCasesRes, CaseViewRes))
)]
struct ApiDoc;

/// Main entry point for the showcase preview server
///
/// Serves the rendered page, the asset directory and read-only dataset endpoints.
///
/// # Environment Variables
/// - `SHOWCASE_ADDR`: server address (default: "127.0.0.1:3000")
/// - `SHOWCASE_MODE`: `production` or `development` (default depends on the build profile)
/// - `SHOWCASE_ASSET_DIR`: directory holding page images (default: "assets")
///
/// # Errors
/// Returns an error if the configuration is invalid, the dataset fails its startup checks, or
/// the server cannot bind or fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("showcase_run=info".parse()?)
                .add_directive("showcase_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SHOWCASE_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into());
    let mode = build_mode_from_env_value(std::env::var(MODE_ENV_VAR).ok())?;
    let asset_dir = asset_dir_from_env_value(std::env::var(ASSET_DIR_ENV_VAR).ok());

    let showcase = Showcase::start(ShowcaseConfig::new(mode, asset_dir))?;
    if !showcase.config().asset_dir().is_dir() {
        tracing::warn!(
            "asset directory {} does not exist; images will render as placeholders",
            showcase.config().asset_dir().display()
        );
    }

    tracing::info!("++ Starting showcase preview on http://{}", addr);

    let state = AppState {
        assets: Arc::new(showcase.assets()),
        showcase: Arc::new(showcase),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(page))
        .route("/health", get(health))
        .route("/api/nav", get(list_nav))
        .route("/api/cases", get(list_cases))
        .route("/api/cases/:id", get(get_case))
        .route("/assets/:name", get(asset))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Renders the page for the selection in the query string
///
/// Each link on the page is one discrete event: section, case and view selections are applied
/// in that order to a fresh session before rendering.
async fn page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, (StatusCode, String)> {
    state.showcase.render(&query).map(Html).map_err(|e| match e {
        ShowcaseError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        other => {
            tracing::error!("render error: {:?}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
        }
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "showcase is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/nav",
    responses(
        (status = 200, description = "Page sections in display order", body = [NavItemRes])
    )
)]
/// List the page sections
async fn list_nav(State(state): State<AppState>) -> Json<Vec<NavItemRes>> {
    Json(
        state
            .showcase
            .store()
            .nav_items()
            .iter()
            .map(|item| NavItemRes {
                id: item.id.clone(),
                label: item.label.clone(),
            })
            .collect(),
    )
}

#[utoipa::path(
    get,
    path = "/api/cases",
    responses(
        (status = 200, description = "Demonstration cases", body = ListCasesRes)
    )
)]
/// List the demonstration cases
async fn list_cases(State(state): State<AppState>) -> Json<ListCasesRes> {
    let cases = state
        .showcase
        .store()
        .cases()
        .iter()
        .map(|case| CaseSummary {
            id: case.id.clone(),
            title: case.title.clone(),
            tags: case.tags.clone(),
        })
        .collect();
    Json(ListCasesRes { cases })
}

#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    params(
        ("id" = String, Path, description = "Case id"),
        ("view" = Option<String>, Query, description = "primary (default), structured or raw")
    ),
    responses(
        (status = 200, description = "Case projected in the requested view", body = CaseViewRes),
        (status = 400, description = "Unknown view mode"),
        (status = 404, description = "No such case")
    )
)]
/// Fetch one case in a view mode
async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<CaseViewRes>, (StatusCode, String)> {
    let mode = match query.view.as_deref() {
        Some(view) => view
            .parse::<ViewMode>()
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        None => ViewMode::Primary,
    };
    let case = state
        .showcase
        .store()
        .case(&id)
        .ok_or((StatusCode::NOT_FOUND, format!("no case with id '{id}'")))?;
    let data = project_case(case, mode).map_err(|e| {
        tracing::error!("projection error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
    })?;

    Ok(Json(CaseViewRes {
        id: case.id.clone(),
        view: mode.to_string(),
        data,
    }))
}

/// Serves one image from the asset directory
///
/// A missing or unreadable file is answered with a placeholder SVG naming the expected file and
/// directory, so the page never shows a broken image.
async fn asset(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let name = match AssetName::parse(&name) {
        Ok(name) => name,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match state.assets.read(&name) {
        Ok(Some(bytes)) => ([(header::CONTENT_TYPE, content_type(&name))], bytes).into_response(),
        Ok(None) => {
            tracing::warn!("asset '{}' not found; serving placeholder", name);
            placeholder_response(StatusCode::NOT_FOUND, &name, &state.assets)
        }
        Err(e) => {
            tracing::error!("asset read error for '{}': {:?}", name, e);
            placeholder_response(StatusCode::INTERNAL_SERVER_ERROR, &name, &state.assets)
        }
    }
}

fn placeholder_response(status: StatusCode, name: &AssetName, assets: &DirAssets) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        placeholder_svg(name.as_str(), &assets.location()),
    )
        .into_response()
}
