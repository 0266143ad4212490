//! Shared handler state

use calcouncil_application::{CompletionGateway, CouncilPacing};
use std::sync::Arc;

/// Everything the handlers need: the gateway adapter and council pacing
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn CompletionGateway>,
    pub pacing: CouncilPacing,
}

impl AppState {
    pub fn new(gateway: Arc<dyn CompletionGateway>, pacing: CouncilPacing) -> Self {
        Self { gateway, pacing }
    }
}
