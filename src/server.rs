use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::catalog::{Catalog, Plant, PlantId};
use crate::engine::{Engine, QuizAnswers};
use crate::error::HerbariumError;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

#[derive(Deserialize)]
pub struct NameQuery {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub plants: usize,
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

// Persistence and lock failures all map onto the same body.
fn storage_error(e: HerbariumError) -> Response {
    let msg = format!("{e}");
    warn!(%msg, code = %StatusCode::INTERNAL_SERVER_ERROR.as_u16(), "query error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            status: "error".into(),
            error: msg,
        }),
    )
        .into_response()
}

// We run every query on a blocking thread since the engine is synchronous today.
async fn run_blocking<T, F>(
    catalog: Arc<Catalog>,
    op: F,
) -> Result<crate::error::Result<T>, (StatusCode, &'static str)>
where
    T: Send + 'static,
    F: FnOnce(&Engine) -> crate::error::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let engine = Engine::new(&catalog);
        op(&engine)
    })
    .await
    .map_err(|e| {
        warn!(error = %e, "Join error");
        (StatusCode::INTERNAL_SERVER_ERROR, "Join error")
    })
}

async fn list_plants(
    State(state): State<AppState>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), |engine| engine.all_plants()).await?;
    match result {
        Ok(plants) => {
            info!(ms = elapsed_ms(started), rows = plants.len(), "list complete");
            Ok((StatusCode::OK, Json(plants)).into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<PlantId>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.plant_by_id(id)
    })
    .await?;
    match result {
        Ok(Some(plant)) => {
            info!(ms = elapsed_ms(started), id, "get complete");
            Ok((StatusCode::OK, Json(plant)).into_response())
        }
        Ok(None) => {
            info!(ms = elapsed_ms(started), id, "get missed");
            Ok((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    status: "error".into(),
                    error: format!("no plant with identifier {id}"),
                }),
            )
                .into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn create_plant(
    State(state): State<AppState>,
    Json(plant): Json<Plant>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.add_plant(plant)
    })
    .await?;
    match result {
        Ok(stored) => {
            info!(ms = elapsed_ms(started), id = stored.id(), "create complete");
            Ok((StatusCode::CREATED, Json(stored)).into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn replace_plant(
    State(state): State<AppState>,
    Path(id): Path<PlantId>,
    Json(plant): Json<Plant>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.replace_plant_by_id(id, plant)
    })
    .await?;
    match result {
        Ok(stored) => {
            info!(ms = elapsed_ms(started), id = stored.id(), "replace complete");
            Ok((StatusCode::OK, Json(stored)).into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<PlantId>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.remove_plant_by_id(id)
    })
    .await?;
    match result {
        Ok(()) => {
            info!(ms = elapsed_ms(started), id, "delete complete");
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn search_plants(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.plants_by_name(&query.name)
    })
    .await?;
    match result {
        Ok(names) => {
            info!(ms = elapsed_ms(started), rows = names.len(), "name search complete");
            Ok((StatusCode::OK, Json(names)).into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn search_plants_full(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.full_plants_by_name(&query.name)
    })
    .await?;
    match result {
        Ok(plants) => {
            info!(ms = elapsed_ms(started), rows = plants.len(), "full name search complete");
            Ok((StatusCode::OK, Json(plants)).into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn plants_by_sun(
    State(state): State<AppState>,
    Path(sun): Path<i32>,
    Query(query): Query<NameQuery>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.plants_by_sun_intensity(sun, &query.name)
    })
    .await?;
    match result {
        Ok(names) => {
            info!(ms = elapsed_ms(started), rows = names.len(), sun, "sun filter complete");
            Ok((StatusCode::OK, Json(names)).into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn plants_by_difficulty(
    State(state): State<AppState>,
    Path(difficulty): Path<i32>,
    Query(query): Query<NameQuery>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.plants_by_difficulty(difficulty, &query.name)
    })
    .await?;
    match result {
        Ok(names) => {
            info!(
                ms = elapsed_ms(started),
                rows = names.len(),
                difficulty,
                "difficulty filter complete"
            );
            Ok((StatusCode::OK, Json(names)).into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn air_purifying_plants(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.air_purifying_plants(&query.name)
    })
    .await?;
    match result {
        Ok(names) => {
            info!(
                ms = elapsed_ms(started),
                rows = names.len(),
                "air purifying filter complete"
            );
            Ok((StatusCode::OK, Json(names)).into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn non_toxic_plants(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.non_toxic_plants(&query.name)
    })
    .await?;
    match result {
        Ok(names) => {
            info!(
                ms = elapsed_ms(started),
                rows = names.len(),
                "non toxic filter complete"
            );
            Ok((StatusCode::OK, Json(names)).into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn quiz_plants(
    State(state): State<AppState>,
    Query(answers): Query<QuizAnswers>,
) -> Result<Response, (StatusCode, &'static str)> {
    let started = Instant::now();
    let result = run_blocking(Arc::clone(&state.catalog), move |engine| {
        engine.plants_by_quiz(&answers)
    })
    .await?;
    match result {
        Ok(names) => {
            info!(ms = elapsed_ms(started), rows = names.len(), "quiz complete");
            Ok((StatusCode::OK, Json(names)).into_response())
        }
        Err(e) => Ok(storage_error(e)),
    }
}

async fn health(State(state): State<AppState>) -> Result<Response, (StatusCode, &'static str)> {
    match state.catalog.len() {
        Ok(plants) => Ok((
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".into(),
                plants,
            }),
        )
            .into_response()),
        Err(e) => Ok(storage_error(e)),
    }
}

pub fn router(catalog: Arc<Catalog>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    Router::new()
        .route("/health", get(health))
        .route("/v1/plants", get(list_plants).post(create_plant))
        .route("/v1/plants/search", get(search_plants))
        .route("/v1/plants/search/full", get(search_plants_full))
        .route("/v1/plants/quiz", get(quiz_plants))
        .route("/v1/plants/sun/:sun", get(plants_by_sun))
        .route("/v1/plants/difficulty/:difficulty", get(plants_by_difficulty))
        .route("/v1/plants/air-purifying", get(air_purifying_plants))
        .route("/v1/plants/non-toxic", get(non_toxic_plants))
        .route(
            "/v1/plants/:id",
            get(get_plant).put(replace_plant).delete(delete_plant),
        )
        .layer(cors)
        .with_state(AppState { catalog })
}

/// Binds the listener and serves the catalog API until the process is stopped.
pub async fn serve(catalog: Arc<Catalog>, bind: &str) -> crate::error::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| HerbariumError::Server(format!("could not bind {bind}: {e}")))?;
    info!(address = %bind, "listening");
    axum::serve(listener, router(catalog))
        .await
        .map_err(|e| HerbariumError::Server(e.to_string()))
}
