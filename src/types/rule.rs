use std::collections::BTreeMap;

use super::condition::{Condition, ConditionClause, MatchField};
use super::value::Value;

/// One step of a processing chain: a loader identifier plus its options.
#[derive(Debug, Clone, PartialEq)]
pub struct StageRef {
    pub loader: String,
    pub options: BTreeMap<String, Value>,
}

impl StageRef {
    #[must_use]
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: BTreeMap::new(),
        }
    }

    /// Attach an option to this stage reference.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Rule scheduling class, for rules that must run before or after the
/// normal chain (e.g. lint or stub rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enforce {
    Pre,
    Post,
}

/// A node in the rule tree.
///
/// A node carries match clauses and either a direct processing chain or a
/// branch list, never both: a node whose `branches` is non-empty must have an
/// empty `stages`. Branches use first-match-wins semantics.
///
/// Built with fluent methods:
///
/// ```
/// use rulegraft::{Condition, MatchField, RuleNode, StageRef};
///
/// let rule = RuleNode::new()
///     .when(MatchField::Resource, Condition::pattern(r"\.vue$").unwrap())
///     .stage(StageRef::new("vue-loader"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleNode {
    pub clauses: Vec<ConditionClause>,
    pub stages: Vec<StageRef>,
    pub branches: Vec<RuleNode>,
    pub enforce: Option<Enforce>,
}

impl RuleNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a match clause. All clauses must accept for the node to match.
    #[must_use]
    pub fn when(mut self, field: MatchField, condition: Condition) -> Self {
        self.clauses.push(ConditionClause::new(field, condition));
        self
    }

    /// Append a stage to the direct processing chain.
    #[must_use]
    pub fn stage(mut self, stage: StageRef) -> Self {
        self.stages.push(stage);
        self
    }

    /// Append a child branch. First matching branch wins.
    #[must_use]
    pub fn branch(mut self, node: RuleNode) -> Self {
        self.branches.push(node);
        self
    }

    /// Mark this rule as pre- or post-enforced.
    #[must_use]
    pub fn enforced(mut self, enforce: Enforce) -> Self {
        self.enforce = Some(enforce);
        self
    }

    /// Whether the direct chain contains a stage with the given loader id.
    #[must_use]
    pub fn chain_references(&self, loader: &str) -> bool {
        self.stages.iter().any(|s| s.loader == loader)
    }
}

/// A discovered rule together with its position in the top-level rule list,
/// so the rewritten node can be spliced back in place.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub rule: RuleNode,
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ref_with_options() {
        let stage = StageRef::new("vue-loader").with_option("reactivityTransform", true);
        assert_eq!(stage.loader, "vue-loader");
        assert_eq!(
            stage.options.get("reactivityTransform"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn builder_collects_clauses_and_stages() {
        let rule = RuleNode::new()
            .when(MatchField::Resource, Condition::pattern(r"\.vue$").unwrap())
            .when(MatchField::ResourceQuery, Condition::exact("?vue"))
            .stage(StageRef::new("vue-loader"));

        assert_eq!(rule.clauses.len(), 2);
        assert_eq!(rule.stages.len(), 1);
        assert!(rule.branches.is_empty());
        assert_eq!(rule.clauses[0].field, MatchField::Resource);
    }

    #[test]
    fn chain_references_finds_loader() {
        let rule = RuleNode::new()
            .stage(StageRef::new("cache-loader"))
            .stage(StageRef::new("vue-loader"));
        assert!(rule.chain_references("vue-loader"));
        assert!(!rule.chain_references("ts-loader"));
    }

    #[test]
    fn enforced_sets_class() {
        let rule = RuleNode::new().enforced(Enforce::Pre);
        assert_eq!(rule.enforce, Some(Enforce::Pre));
    }

    #[test]
    fn branches_nest_one_level() {
        let rule = RuleNode::new()
            .branch(RuleNode::new().stage(StageRef::new("a")))
            .branch(RuleNode::new().stage(StageRef::new("b")));
        assert_eq!(rule.branches.len(), 2);
        assert!(rule.stages.is_empty());
    }
}
