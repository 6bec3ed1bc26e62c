pub mod aggregate;
pub mod dates;
pub mod interval;
pub mod problem;
pub mod roadmap;
pub mod scheduler;
pub mod tracker;

pub use aggregate::{CalendarBuckets, CalendarDay, PatternGroup, PracticeOverview, PracticeStats};
pub use problem::{NewProblem, ProblemId, ProblemRecord, ReviewUpdate};
pub use scheduler::{ReviewState, review_update, schedule_initial};
pub use tracker::PracticeTracker;
