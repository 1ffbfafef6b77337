//! Reporter
//!
//! Presents a [`MigrationPlan`](crate::migration::MigrationPlan) either as a
//! human-readable summary or as a structured JSON record. Neither form adds
//! any logic of its own.

mod human;
mod report;

pub use human::{render_human, Mode};
pub use report::{MigrationReport, SourceSummary};
