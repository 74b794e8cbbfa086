use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::compose;
use crate::error::ApiError;
use crate::features;
use crate::model::Scorer;
use crate::models::{BatchFailure, BatchItem, BatchRequest, BatchResponse, HabitabilityResult};
use crate::ranking::{RankingStore, MAX_TOP};
use crate::state::AppState;
use crate::validator;

pub const MAX_BATCH: usize = 100;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/predict").route(web::post().to(predict)))
        .service(web::resource("/rank").route(web::get().to(rank)))
        .service(web::resource("/batch_predict").route(web::post().to(batch_predict)))
        .service(web::resource("/examples").route(web::get().to(examples)));
}

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "name": "ExoHabitAI API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/health": "GET - Health check",
            "/predict": "POST - Single planet prediction",
            "/rank": "GET - Get ranked candidates",
            "/batch_predict": "POST - Batch predictions (max 100)",
            "/examples": "GET - Example payloads"
        }
    }))
}

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let model_loaded = state.model.is_some();
    HttpResponse::Ok().json(json!({
        "status": if model_loaded { "healthy" } else { "degraded" },
        "model_loaded": model_loaded,
        "ranking_loaded": state.ranking.is_some(),
    }))
}

pub async fn predict(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    // Validation happens before the model-readiness check so that bad
    // input is reported as such even while the service is degraded.
    let obs = validator::validate(&body).map_err(|err| {
        warn!(error = %err, "prediction rejected");
        err
    })?;
    let scorer = state.scorer()?;
    let probability = scorer.score(&features::encode(&obs))?;
    let result = compose::compose(&obs.planet_name, probability, state.ranking.as_ref());
    Ok(HttpResponse::Ok().json(result))
}

#[derive(Debug, Deserialize)]
pub struct RankQuery {
    top: Option<usize>,
    threshold: Option<f64>,
}

pub async fn rank(
    state: web::Data<AppState>,
    query: web::Query<RankQuery>,
) -> Result<HttpResponse, ApiError> {
    let store = state.ranking()?;
    // Oversized `top` is clamped rather than rejected.
    let top = query.top.unwrap_or(10).clamp(1, MAX_TOP);
    let threshold = query.threshold.unwrap_or(0.0);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ApiError::bad_request("threshold must be between 0.0 and 1.0"));
    }
    let candidates = store.top(top, threshold);
    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "count": candidates.len(),
        "threshold": threshold,
        "candidates": candidates,
    })))
}

pub async fn batch_predict(
    state: web::Data<AppState>,
    body: web::Json<BatchRequest>,
) -> Result<HttpResponse, ApiError> {
    if body.planets.is_empty() {
        return Err(ApiError::bad_request("No planets provided"));
    }
    if body.planets.len() > MAX_BATCH {
        return Err(ApiError::bad_request(format!(
            "Maximum {MAX_BATCH} planets per batch"
        )));
    }
    let scorer = state.scorer()?;
    let response = run_batch(scorer, state.ranking.as_ref(), &body.planets);
    Ok(HttpResponse::Ok().json(response))
}

pub async fn examples() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "examples": [
            {
                "planet_name": "Kepler-442b",
                "pl_orbper": 112.3,
                "pl_orbsmax": 0.409,
                "pl_bmasse": 2.34,
                "st_met": 0.0,
                "st_logg": 4.48,
                "disc_year": 2015,
                "st_type": "K",
                "pl_type": "super_earth"
            },
            {
                "planet_name": "Proxima Centauri b",
                "pl_orbper": 11.2,
                "pl_orbsmax": 0.0485,
                "pl_bmasse": 1.27,
                "st_met": 0.21,
                "st_logg": 5.2,
                "disc_year": 2016,
                "st_type": "M",
                "pl_type": "rocky"
            }
        ]
    }))
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "status": "error",
        "message": "Endpoint not found",
    }))
}

/// Validate, encode and score one raw observation.
fn score_one(
    scorer: &dyn Scorer,
    ranking: Option<&RankingStore>,
    raw: &Value,
) -> Result<HabitabilityResult, ApiError> {
    let obs = validator::validate(raw)?;
    let probability = scorer.score(&features::encode(&obs))?;
    Ok(compose::compose(&obs.planet_name, probability, ranking))
}

/// Score each item independently; one failure never aborts the batch,
/// and output position `i` corresponds to input position `i`.
pub fn run_batch(
    scorer: &dyn Scorer,
    ranking: Option<&RankingStore>,
    planets: &[Value],
) -> BatchResponse {
    let mut results = Vec::with_capacity(planets.len());
    let mut successful = 0;
    let mut failed = 0;
    for raw in planets {
        match score_one(scorer, ranking, raw) {
            Ok(result) => {
                successful += 1;
                results.push(BatchItem::Success(result));
            }
            Err(err) => {
                failed += 1;
                let planet_name = raw
                    .get("planet_name")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string();
                results.push(BatchItem::Failure(BatchFailure {
                    status: "error",
                    planet_name,
                    error: err.to_string(),
                }));
            }
        }
    }
    BatchResponse {
        status: "success",
        total: planets.len(),
        successful,
        failed,
        results,
    }
}
