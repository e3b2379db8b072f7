mod condition;
mod error;
mod options;
mod probe;
mod request;
mod rule;
mod value;

pub use condition::{Condition, ConditionClause, MatchField, PredicateFn};
pub use error::{ConfigError, GenerateError, PatternError, StageError};
pub use options::{PluginOptions, StyleMode};
pub use probe::MatchProbe;
pub use request::{SideChannel, StageRequest, SKIP_KEY};
pub use rule::{Enforce, RuleMatch, RuleNode, StageRef};
pub use value::Value;
