use chora_core::ports::LayerSource;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub layers: Arc<dyn LayerSource>,
}

impl AppState {
    pub fn new(layers: Arc<dyn LayerSource>) -> Self {
        Self { layers }
    }
}
