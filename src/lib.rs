mod error;
mod matcher;
mod pipeline;
mod plugin;
mod rewrite;
mod stages;
mod types;

pub use error::RulegraftError;
pub use matcher::{find_matches, select_branch, ConditionEvaluator, MatcherCapability, RuleEvaluator};
pub use pipeline::{Pipeline, Stage};
pub use plugin::{
    BuildConfig, GraftPlugin, NULL_STAGE_ID, STYLE_RESOLVER, TARGET_EXTENSION, TARGET_STAGE,
};
pub use rewrite::{rewrite, MARKER_QUERY};
pub use stages::{
    GeneratedImports, ImportGenerator, ScriptStage, StyleStage, PITCHER_SUFFIX, SCRIPT_STAGE_ID,
    STYLE_STAGE_ID,
};
pub use types::{
    Condition, ConditionClause, ConfigError, Enforce, GenerateError, MatchField, MatchProbe,
    PatternError, PluginOptions, PredicateFn, RuleMatch, RuleNode, SideChannel, StageError,
    StageRef, StageRequest, StyleMode, Value, SKIP_KEY,
};
