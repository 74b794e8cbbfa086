//! Shared application state: the scoring model and the ranking table,
//! loaded once at startup and read-only for the process lifetime.

use tracing::{error, info};

use crate::error::ApiError;
use crate::model::{OnnxScorer, Scorer};
use crate::ranking::RankingStore;

pub struct AppState {
    pub model: Option<OnnxScorer>,
    pub ranking: Option<RankingStore>,
}

impl AppState {
    /// Load both startup artifacts. A failed load degrades the service
    /// (visible on /health) rather than aborting startup.
    pub fn load(model_path: &str, ranking_path: &str) -> Self {
        let model = match OnnxScorer::load(model_path) {
            Ok(m) => {
                info!(path = model_path, "model loaded");
                Some(m)
            }
            Err(err) => {
                error!(path = model_path, error = %err, "failed to load model");
                None
            }
        };
        let ranking = match RankingStore::load(ranking_path) {
            Ok(store) => {
                info!(path = ranking_path, candidates = store.len(), "ranking data loaded");
                Some(store)
            }
            Err(err) => {
                error!(path = ranking_path, error = %err, "failed to load ranking data");
                None
            }
        };
        AppState { model, ranking }
    }

    pub fn scorer(&self) -> Result<&dyn Scorer, ApiError> {
        self.model
            .as_ref()
            .map(|m| m as &dyn Scorer)
            .ok_or(ApiError::NotReady("Model"))
    }

    pub fn ranking(&self) -> Result<&RankingStore, ApiError> {
        self.ranking.as_ref().ok_or(ApiError::NotReady("Ranking data"))
    }
}
