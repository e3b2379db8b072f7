use tracing::debug;

use crate::types::{MatchField, MatchProbe, RuleMatch, RuleNode};

/// The rule-evaluation capability: decides whether a rule's conditions accept
/// a probe. Side-effect-free and authoritative; swap in a test double to
/// exercise the matcher without the built-in interpreter.
pub trait RuleEvaluator {
    fn accepts(&self, rule: &RuleNode, probe: &MatchProbe) -> bool;
}

/// Which condition fields the active evaluator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherCapability {
    /// Resource, query, and issuer clauses only. `DescriptionData` clauses
    /// reject every probe.
    Basic,
    /// Additionally evaluates `DescriptionData` clauses.
    Extended,
}

/// The built-in condition interpreter.
///
/// Evaluates every clause of a rule against the probe; the rule accepts when
/// all clauses do.
#[derive(Debug, Clone, Copy)]
pub struct ConditionEvaluator {
    capability: MatcherCapability,
}

impl ConditionEvaluator {
    /// Negotiate the evaluator capability at startup: take the extended
    /// matcher when available, fall back to basic, and record the selection.
    /// The built-in interpreter ships the description-data matcher, so this
    /// resolves to [`MatcherCapability::Extended`]; hosts embedding an older
    /// evaluator construct one via [`with_capability`](Self::with_capability).
    #[must_use]
    pub fn negotiate() -> Self {
        let evaluator = Self::with_capability(MatcherCapability::Extended);
        debug!(capability = ?evaluator.capability, "negotiated matcher capability");
        evaluator
    }

    #[must_use]
    pub fn with_capability(capability: MatcherCapability) -> Self {
        Self { capability }
    }

    #[must_use]
    pub fn capability(&self) -> MatcherCapability {
        self.capability
    }
}

impl RuleEvaluator for ConditionEvaluator {
    fn accepts(&self, rule: &RuleNode, probe: &MatchProbe) -> bool {
        rule.clauses.iter().all(|clause| {
            if matches!(clause.field, MatchField::DescriptionData(_))
                && self.capability == MatcherCapability::Basic
            {
                return false;
            }
            clause.condition.accepts(probe.attribute(&clause.field))
        })
    }
}

/// Discover the top-level rules responsible for the probed file type.
///
/// A rule qualifies when the evaluator accepts the probe, its direct chain
/// references `target_stage`, and it has no branch list. The branch-list
/// check keeps the matcher idempotent: a node produced by
/// [`rewrite`](crate::rewrite) carries its chains inside branches and is
/// never picked up as a fresh target. Branch lists written by other plugins
/// are likewise not traversed; only root-level rules are considered.
///
/// Returns matches in list order. An empty result is the caller's cue to
/// fail configuration; this function never errors itself.
#[must_use]
pub fn find_matches(
    rules: &[RuleNode],
    probe: &MatchProbe,
    target_stage: &str,
    evaluator: &dyn RuleEvaluator,
) -> Vec<RuleMatch> {
    rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| {
            rule.branches.is_empty()
                && rule.chain_references(target_stage)
                && evaluator.accepts(rule, probe)
        })
        .map(|(index, rule)| {
            debug!(index, target_stage, "rule qualifies for rewrite");
            RuleMatch {
                rule: rule.clone(),
                index,
            }
        })
        .collect()
}

/// Resolve which branch of a rewritten rule handles a request:
/// first-match-wins over the branch list.
#[must_use]
pub fn select_branch<'a>(
    rule: &'a RuleNode,
    probe: &MatchProbe,
    evaluator: &dyn RuleEvaluator,
) -> Option<&'a RuleNode> {
    rule.branches
        .iter()
        .find(|branch| evaluator.accepts(branch, probe))
}
