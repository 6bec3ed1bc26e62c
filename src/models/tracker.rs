//! Practice tracker state for one user.
//! Owns the storage collaborator, mirrors the stored problems in an immutable
//! snapshot and caches the derived views for it.

use super::aggregate::PracticeOverview;
use super::scheduler::review_update;
use super::{NewProblem, ProblemId, ProblemRecord, ReviewUpdate};
use crate::database::ProblemStorage;
use crate::error::{Result, SageError};
use chrono::NaiveDate;
use std::sync::Arc;

/// Each mutation replaces the snapshot with a new one instead of editing it in
/// place, so snapshots handed out earlier stay valid.
pub struct PracticeTracker<S: ProblemStorage> {
    storage: S,
    user_id: String,
    problems: Arc<Vec<ProblemRecord>>,
    version: u64,
    overview: Option<(u64, NaiveDate, Arc<PracticeOverview>)>,
}

impl<S: ProblemStorage> PracticeTracker<S> {
    pub fn new(storage: S, user_id: impl Into<String>) -> Self {
        Self {
            storage,
            user_id: user_id.into(),
            problems: Arc::new(Vec::new()),
            version: 0,
            overview: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn snapshot(&self) -> Arc<Vec<ProblemRecord>> {
        Arc::clone(&self.problems)
    }

    pub fn get(&self, id: ProblemId) -> Option<&ProblemRecord> {
        self.problems.iter().find(|p| p.id == id)
    }

    fn replace(&mut self, problems: Vec<ProblemRecord>) {
        self.problems = Arc::new(problems);
        self.version += 1;
    }

    /// Reloads the user's problems from storage, most recently solved first.
    pub fn load(&mut self) -> Result<Arc<Vec<ProblemRecord>>> {
        let mut problems = self.storage.load_problems(&self.user_id)?;
        problems.sort_by(|a, b| b.solved_date.cmp(&a.solved_date));
        log::debug!("Loaded {} problems for {}", problems.len(), self.user_id);
        self.replace(problems);
        Ok(self.snapshot())
    }

    /// Logs a solved problem with its first review scheduled.
    pub fn add(&mut self, new_problem: NewProblem, today: NaiveDate) -> Result<ProblemRecord> {
        let mut record = new_problem.into_record(&self.user_id, today)?;
        record.id = self.storage.create_problem(&self.user_id, &record)?;

        let mut problems = Vec::with_capacity(self.problems.len() + 1);
        problems.push(record.clone());
        problems.extend(self.problems.iter().cloned());
        self.replace(problems);

        Ok(record)
    }

    pub fn delete(&mut self, id: ProblemId) -> Result<()> {
        self.storage.delete_problem(&self.user_id, id)?;
        let problems = self.problems.iter().filter(|p| p.id != id).cloned().collect();
        self.replace(problems);
        log::info!("Deleted problem {}", id);
        Ok(())
    }

    /// Records a completed review of `id`, advancing it from the review count
    /// held in the current snapshot.
    ///
    /// Nothing guards against two trackers reviewing the same problem from
    /// stale snapshots; the last write to storage wins.
    pub fn mark_reviewed(&mut self, id: ProblemId, today: NaiveDate) -> Result<ReviewUpdate> {
        let current = self.get(id).ok_or(SageError::ProblemNotFound(id))?;
        if current.mastery_achieved {
            return Err(SageError::AlreadyMastered(id));
        }

        let update = review_update(current.review_count, today);
        self.storage.apply_review_update(id, &update)?;

        let problems = self
            .problems
            .iter()
            .map(|p| {
                let mut p = p.clone();
                if p.id == id {
                    p.apply_review(&update);
                }
                p
            })
            .collect();
        self.replace(problems);

        match update.next_review_date.as_deref() {
            Some(next) => log::info!("Problem {} reviewed, next review on {}", id, next),
            None => log::info!("Problem {} mastered after {} reviews", id, update.review_count),
        }
        Ok(update)
    }

    /// Derived views for the current snapshot, rebuilt only when the snapshot
    /// or `today` changed since the last call.
    pub fn overview(&mut self, today: NaiveDate) -> Arc<PracticeOverview> {
        if let Some((version, day, overview)) = &self.overview {
            if *version == self.version && *day == today {
                return Arc::clone(overview);
            }
        }

        let overview = Arc::new(PracticeOverview::build(&self.problems, today));
        self.overview = Some((self.version, today, Arc::clone(&overview)));
        overview
    }
}
