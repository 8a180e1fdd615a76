// src/state.rs
use std::sync::Arc;

use crate::services::upstream::ChatModel;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub model: Arc<dyn ChatModel>,
}

impl AppState {
    pub fn new(model: impl ChatModel) -> Self {
        Self { model: Arc::new(model) }
    }

    pub fn shared(model: impl ChatModel) -> SharedState {
        Arc::new(Self::new(model))
    }
}
