pub mod commands;
pub mod config;
pub mod error;
pub mod food;

// Re-export commonly used items
pub use config::ScannerConfig;
pub use error::{ScannerError, TransportError};
pub use food::api::{Gateway, HttpGateway};
pub use food::{FoodScanner, Outcome, StateStore, Tab, ViewState};
