use std::env;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use exohabit_backend::handlers;
use exohabit_backend::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let model_path =
        env::var("MODEL_PATH").unwrap_or_else(|_| "models/habitability.onnx".to_string());
    let ranking_path =
        env::var("RANKING_PATH").unwrap_or_else(|_| "data/habitability_ranking.csv".to_string());
    let state = web::Data::new(AppState::load(&model_path, &ranking_path));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    info!("server listening on http://{host}:{port}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(handlers::configure)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
