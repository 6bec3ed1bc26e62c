pub mod db;

use crate::error::Result;
use crate::models::{ProblemId, ProblemRecord, ReviewUpdate};

pub use db::SqliteStorage;

/// Persistence collaborator for problem records.
pub trait ProblemStorage {
    /// All problems owned by `user_id`, in no particular order.
    fn load_problems(&self, user_id: &str) -> Result<Vec<ProblemRecord>>;

    /// Stores a new problem and returns its assigned ID.
    fn create_problem(&self, user_id: &str, problem: &ProblemRecord) -> Result<ProblemId>;

    /// Merges the fields of a review patch into a stored problem.
    fn apply_review_update(&self, id: ProblemId, update: &ReviewUpdate) -> Result<()>;

    fn delete_problem(&self, user_id: &str, id: ProblemId) -> Result<()>;
}
