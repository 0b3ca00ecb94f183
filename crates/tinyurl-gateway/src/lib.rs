//! HTTP front end of the tiny url service.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod reaper;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
