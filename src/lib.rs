pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod metadata;
pub mod models;

pub use config::Config;
pub use error::{Result, SageError};
pub use models::{NewProblem, PracticeOverview, PracticeTracker, ProblemRecord, ReviewUpdate};
