pub mod app;
pub mod errors;
pub mod handlers;
pub mod insights;
pub mod models;
pub mod progress;
pub mod stats;
pub mod storage;
pub mod state;

pub use app::router;
pub use progress::{ChallengeState, ProgressStore};
pub use state::AppState;
pub use storage::{load_state, resolve_data_path};
