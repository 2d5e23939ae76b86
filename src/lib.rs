pub mod app;
pub mod backup;
pub mod commentary;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod period;
pub mod stats;
pub mod storage;
pub mod store;
pub mod trend;
pub mod ui;
pub mod state;
pub mod validation;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use store::RecordStore;
