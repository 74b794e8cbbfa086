//! Endpoint-level tests over the actix test harness. The model artifact
//! is not available here, so these exercise the degraded paths plus
//! everything that does not need a scorer (validation, ranking, docs).

use std::io::Write;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use exohabit_backend::handlers;
use exohabit_backend::ranking::RankingStore;
use exohabit_backend::state::AppState;

fn ranking_with(n: usize) -> RankingStore {
    let mut csv = String::from(
        "planet_name,habitability_probability,predicted_habitable,discovery_year\n",
    );
    for i in 0..n {
        let p = 1.0 - (i as f64 / n as f64);
        csv.push_str(&format!("Planet-{i},{p:.4},{},2015\n", p >= 0.5));
    }
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(csv.as_bytes()).unwrap();
    RankingStore::load(file.path()).unwrap()
}

async fn service(
    ranking: Option<RankingStore>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let state = web::Data::new(AppState {
        model: None,
        ranking,
    });
    test::init_service(
        App::new()
            .app_data(state)
            .configure(handlers::configure)
            .default_service(web::route().to(handlers::not_found)),
    )
    .await
}

fn valid_observation() -> Value {
    json!({
        "planet_name": "Earth analogue",
        "pl_orbper": 365.25,
        "pl_orbsmax": 1.0,
        "pl_bmasse": 1.0,
        "st_met": 0.0,
        "st_logg": 4.5,
        "disc_year": 2020,
        "st_type": "G",
        "pl_type": "rocky"
    })
}

#[actix_web::test]
async fn health_reports_missing_artifacts() {
    let app = service(None).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["ranking_loaded"], false);
}

#[actix_web::test]
async fn health_reports_ranking_when_loaded() {
    let app = service(Some(ranking_with(5))).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ranking_loaded"], true);
    assert_eq!(body["model_loaded"], false);
}

#[actix_web::test]
async fn predict_with_invalid_field_is_400_even_when_degraded() {
    let app = service(None).await;
    let mut raw = valid_observation();
    raw["pl_orbper"] = json!(0.05);
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(&raw)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["field"], "pl_orbper");
    assert_eq!(body["message"], "pl_orbper must be between 0.1 and 100000.0");
}

#[actix_web::test]
async fn predict_without_model_is_500() {
    let app = service(None).await;
    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(&valid_observation())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Model not loaded");
}

#[actix_web::test]
async fn rank_without_ranking_is_500() {
    let app = service(None).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/rank").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn rank_clamps_oversized_top_to_100() {
    let app = service(Some(ranking_with(150))).await;
    let req = test::TestRequest::get().uri("/rank?top=200").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 100);
    assert_eq!(body["candidates"].as_array().unwrap().len(), 100);
}

#[actix_web::test]
async fn rank_filters_and_sorts_descending() {
    let app = service(Some(ranking_with(20))).await;
    let req = test::TestRequest::get()
        .uri("/rank?top=5&threshold=0.5")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let candidates = body["candidates"].as_array().unwrap();
    assert!(candidates.len() <= 5);
    let probs: Vec<f64> = candidates
        .iter()
        .map(|c| c["habitability_probability"].as_f64().unwrap())
        .collect();
    assert!(probs.iter().all(|&p| p >= 0.5));
    assert!(probs.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(candidates[0]["rank"], 1);
}

#[actix_web::test]
async fn rank_rejects_out_of_range_threshold() {
    let app = service(Some(ranking_with(5))).await;
    let req = test::TestRequest::get()
        .uri("/rank?threshold=1.5")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn batch_rejects_empty_and_oversized_requests() {
    let app = service(None).await;

    let req = test::TestRequest::post()
        .uri("/batch_predict")
        .set_json(json!({ "planets": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let planets: Vec<Value> = (0..101).map(|_| valid_observation()).collect();
    let req = test::TestRequest::post()
        .uri("/batch_predict")
        .set_json(json!({ "planets": planets }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Maximum 100 planets per batch");
}

#[actix_web::test]
async fn examples_returns_static_payloads() {
    let app = service(None).await;
    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/examples").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let examples = body["examples"].as_array().unwrap();
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0]["planet_name"], "Kepler-442b");
    assert_eq!(examples[1]["st_type"], "M");
}

#[actix_web::test]
async fn index_documents_the_endpoints() {
    let app = service(None).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "ExoHabitAI API");
    assert!(body["endpoints"]["/predict"].is_string());
}

#[actix_web::test]
async fn unknown_route_returns_json_404() {
    let app = service(None).await;
    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Endpoint not found");
}
