//! JSON backup of problem records.
//! Saves a user's problems to a file and restores them into storage.

use crate::database::ProblemStorage;
use crate::error::Result;
use crate::models::ProblemRecord;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Exports problems to a pretty-printed JSON array at the specified path.
pub fn export_json_to_path(problems: &[ProblemRecord], path: impl AsRef<Path>) -> Result<()> {
    let json_string = serde_json::to_string_pretty(problems)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(json_string.as_bytes())?;
    log::info!(
        "Exported {} problems to '{}'",
        problems.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Imports problems from a JSON file.
/// Fields missing from a record take their defaults (no reviews, no review date).
pub fn import_json(path: impl AsRef<Path>) -> Result<Vec<ProblemRecord>> {
    let mut file = File::open(path.as_ref())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let problems: Vec<ProblemRecord> = serde_json::from_str(&contents)?;

    log::info!(
        "Read {} problems from '{}'",
        problems.len(),
        path.as_ref().display()
    );
    Ok(problems)
}

/// Stores imported problems for `user_id`, keeping their review state.
/// Mastered problems are stored without a review date. Storage assigns fresh
/// IDs; returns how many were stored.
pub fn restore<S: ProblemStorage>(
    storage: &S,
    user_id: &str,
    problems: &[ProblemRecord],
) -> Result<usize> {
    for problem in problems {
        if problem.mastery_achieved && problem.next_review_date.is_some() {
            let mut fixed = problem.clone();
            fixed.next_review_date = None;
            storage.create_problem(user_id, &fixed)?;
        } else {
            storage.create_problem(user_id, problem)?;
        }
    }
    Ok(problems.len())
}
