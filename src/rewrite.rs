use crate::types::{Condition, ConditionClause, MatchField, RuleMatch, RuleNode, StageRef};

/// The reserved resource-query token flagging a request that must bypass the
/// grafted stage. The upstream loader issues such sub-requests itself;
/// re-augmenting them would recurse.
pub const MARKER_QUERY: &str = "?";

/// Split a matched rule into two mutually exclusive branches.
///
/// The replacement keeps the original match clauses, drops the direct chain,
/// and carries exactly two branches:
///
/// 1. the marker branch, `resourceQuery == "?"` (exact, not a pattern), with
///    the original chain untouched;
/// 2. the default branch, no extra clauses, with `new_stage` prepended so it
///    sits textually first in the chain.
///
/// The marker branch comes first on purpose: branch resolution is
/// first-match-wins and the marker is the more specific condition.
///
/// Pure; the caller splices the result back at [`RuleMatch::index`]. Apply
/// once per match — the matcher will not rediscover the output.
#[must_use]
pub fn rewrite(m: &RuleMatch, new_stage: &StageRef) -> RuleNode {
    let original = &m.rule;

    let marker_branch = RuleNode {
        clauses: vec![ConditionClause::new(
            MatchField::ResourceQuery,
            Condition::exact(MARKER_QUERY),
        )],
        stages: original.stages.clone(),
        branches: Vec::new(),
        enforce: None,
    };

    let mut grafted = Vec::with_capacity(original.stages.len() + 1);
    grafted.push(new_stage.clone());
    grafted.extend(original.stages.iter().cloned());
    let default_branch = RuleNode {
        clauses: Vec::new(),
        stages: grafted,
        branches: Vec::new(),
        enforce: None,
    };

    RuleNode {
        clauses: original.clauses.clone(),
        stages: Vec::new(),
        branches: vec![marker_branch, default_branch],
        enforce: original.enforce,
    }
}
