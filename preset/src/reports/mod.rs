//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod compose;
mod explain;
mod localize;
mod needs_linking;
mod output;

pub use compose::ComposeReport;
pub use explain::{ExplainReport, StepSummary};
pub use localize::{LocalizeReport, LocalizedFile};
pub use needs_linking::{LinkingEntry, NeedsLinkingReport};
pub use output::{Report, TerminalOutput};
