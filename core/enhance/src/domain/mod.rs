//! enhance 固有のドメイン型（型と不変条件）

pub mod attempts;
pub mod command;
pub mod fence;
pub mod improvement;
pub mod outcome;
pub mod settings;
pub mod source_unit;

pub use attempts::AttemptCounter;
pub use command::EnhanceCommand;
pub use fence::{is_usable, strip_code_fence};
pub use improvement::{FixRequest, ImprovementRequest};
pub use outcome::{AbandonReason, FileOutcome, RunOutcome, RunSummary};
pub use settings::EnhanceSettings;
pub use source_unit::{arrange_units, Enumeration, SourceUnit, UnitRules};
