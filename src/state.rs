use crate::config::Config;
use crate::store::StoreHandles;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub stores: StoreHandles,
    pub config: Arc<Config>,
}
