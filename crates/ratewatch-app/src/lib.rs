//! Live currency-conversion engine over a multiplexed ticker feed.
//!
//! Orchestrates the components:
//! - WebSocket connection to the ticker feed
//! - Per-currency rate cache
//! - Conversion engine and readiness tracking
//! - View-state publication for the presentation layer

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod readiness;
pub mod session;

pub use app::Application;
pub use config::AppConfig;
pub use engine::{ConversionEngine, ConversionMode};
pub use error::{AppError, AppResult};
pub use readiness::Readiness;
pub use session::{Session, UserEvent, ViewState};
