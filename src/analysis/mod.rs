//! Derived nutrition state: per-day summaries and the goal and trend analyzers.
//!
//! Everything here is a pure function of its inputs; no I/O.

pub mod goals;
pub mod summary;
pub mod trends;

pub use goals::{analyze_goals, GoalAnalysis, LimitStatus};
pub use summary::calculate_summary;
pub use trends::{analyze_trends, TrendAnalysis};
