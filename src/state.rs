use crate::progress::ProgressStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<ProgressStore>>,
}

impl AppState {
    pub fn new(store: ProgressStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}
