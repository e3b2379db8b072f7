use tracing::debug;

use crate::matcher::{find_matches, ConditionEvaluator};
use crate::rewrite::rewrite;
use crate::stages::{SCRIPT_STAGE_ID, STYLE_STAGE_ID};
use crate::types::{
    Condition, ConfigError, Enforce, MatchField, MatchProbe, PatternError, PluginOptions,
    RuleNode, StageRef, StyleMode,
};

/// File extension of the target single-file components.
pub const TARGET_EXTENSION: &str = "vue";

/// Identifier of the upstream loader whose rules get rewritten.
pub const TARGET_STAGE: &str = "vue-loader";

/// Loader identifier used to stub out framework style assets.
pub const NULL_STAGE_ID: &str = "null-loader";

/// Resolver scheme registered when styles are exposed.
pub const STYLE_RESOLVER: &str = "vuetify-loader";

/// The slice of bundler configuration this plugin operates on: the top-level
/// rule list plus the registered resolver hooks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildConfig {
    pub rules: Vec<RuleNode>,
    pub resolver_hooks: Vec<String>,
}

impl BuildConfig {
    #[must_use]
    pub fn new(rules: Vec<RuleNode>) -> Self {
        Self {
            rules,
            resolver_hooks: Vec::new(),
        }
    }
}

/// Configuration-finalization plugin: discovers the vue-loader rules and
/// grafts the auto-import stage onto them, then wires the optional style
/// handling.
///
/// `apply` runs once, before any file is processed. Discovery failure is a
/// configuration error, not a runtime fault.
#[derive(Debug, Clone, Default)]
pub struct GraftPlugin {
    options: PluginOptions,
}

impl GraftPlugin {
    #[must_use]
    pub fn new(options: PluginOptions) -> Self {
        Self { options }
    }

    /// Rewrite the configuration's rule list in place.
    ///
    /// The rule list is replaced atomically: either every matched rule is
    /// rewritten and the new list substituted once, or the configuration is
    /// left untouched and an error returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoTargetRule`] when no root-level rule handles
    /// the target file type through the target loader.
    pub fn apply(&self, config: &mut BuildConfig) -> Result<(), ConfigError> {
        if self.options.auto_import {
            let evaluator = ConditionEvaluator::negotiate();
            let probe = MatchProbe::for_extension(TARGET_EXTENSION);
            let matches = find_matches(&config.rules, &probe, TARGET_STAGE, &evaluator);

            if matches.is_empty() {
                return Err(ConfigError::NoTargetRule {
                    target: TARGET_STAGE.to_owned(),
                });
            }

            let script = StageRef::new(SCRIPT_STAGE_ID);
            let mut rules = config.rules.clone();
            for m in &matches {
                rules[m.index] = rewrite(m, &script);
            }
            debug!(rewritten = matches.len(), "substituted rewritten rule list");
            config.rules = rules;
        }

        match self.options.styles {
            StyleMode::Stub => {
                config.rules.push(framework_style_rule(NULL_STAGE_ID)?);
            }
            StyleMode::Expose => {
                config.resolver_hooks.push(STYLE_RESOLVER.to_owned());
                config.rules.push(framework_style_rule(STYLE_STAGE_ID)?);
            }
            StyleMode::Enabled | StyleMode::Disabled => {}
        }

        Ok(())
    }
}

/// A pre-enforced rule routing framework CSS (imported by the framework
/// itself) through the given loader.
fn framework_style_rule(loader: &str) -> Result<RuleNode, PatternError> {
    Ok(RuleNode::new()
        .when(MatchField::Resource, Condition::pattern(r"\.css$")?)
        .when(
            MatchField::Resource,
            Condition::pattern(r"node_modules/vuetify/")?,
        )
        .when(
            MatchField::Issuer,
            Condition::pattern(r"node_modules/vuetify/")?,
        )
        .stage(StageRef::new(loader))
        .enforced(Enforce::Pre))
}
