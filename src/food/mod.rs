pub mod api;
pub mod models;
pub mod presentation;
pub mod state;
pub mod store;
pub mod workflows;

pub use models::{FoodAnalysis, FoodRecord, LabelAnalysisResult, Level, LevelValue, UploadedImage};
pub use state::{Section, Tab, ViewState, Workflow};
pub use store::StateStore;
pub use workflows::{FoodScanner, Outcome};
