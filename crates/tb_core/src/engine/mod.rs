//! The team-assignment engine: scoring, assignment, validation, analysis and
//! the randomized search tying them together.

pub mod assign;
pub mod complement;
pub mod history;
pub mod scoring;
pub mod search;
pub mod synergy;
pub mod validate;

pub use assign::{AssignedSlot, Assignment, PositionAssigner};
pub use complement::{ComplementarityAnalyzer, ComplementarityReport, Line, LineReport};
pub use history::{HistoryEntry, HistoryPenalizer};
pub use scoring::{PlayerScorer, DISQUALIFIED_SCORE};
pub use search::{PlayerReport, SearchOutcome, TeamEvaluation, TeamSearch};
pub use synergy::SynergyEngine;
pub use validate::{ConstraintValidator, ConstraintViolation};
