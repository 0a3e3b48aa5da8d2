use serde::Serialize;
use tracing::debug;

use crate::types::{InputValues, OutcomeMessage, RecommendationRule, ScoringRule, ToolDefinition};

// ----------------- Result -----------------

/// Favor/against tally from [`compute_scores`]. Each side is bounded by the
/// number of scoring rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreTally {
    pub favor: usize,
    pub against: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub outcome: OutcomeMessage,
    /// Name of the selected rule; `None` when the fallback was used.
    pub matched_rule: Option<String>,
    pub scores: ScoreTally,
}

/// Direction a single scoring rule pushes the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Favor,
    Against,
    Neutral,
}

// ----------------- Recommendation rules -----------------

/// Whether every condition of `rule` holds. Empty rules never match, and a
/// condition without an input id never holds.
pub fn rule_matches(rule: &RecommendationRule, values: &InputValues) -> bool {
    if rule.conditions.is_empty() {
        return false;
    }
    rule.conditions.iter().all(|cond| {
        !cond.input_id.is_empty()
            && values
                .get(&cond.input_id)
                .map(|v| v.equals_literal(&cond.value))
                .unwrap_or(false)
    })
}

/// Ordered scan; the earliest rule whose conditions all hold wins.
pub fn first_match<'a>(
    tool: &'a ToolDefinition,
    values: &InputValues,
) -> Option<&'a RecommendationRule> {
    tool.rules.iter().find(|rule| rule_matches(rule, values))
}

/// Outcome of the first matching rule, else the tool's fallback, else the
/// built-in `warning` "No rules matched.".
pub fn evaluate_rules(tool: &ToolDefinition, values: &InputValues) -> OutcomeMessage {
    outcome_for(tool, first_match(tool, values))
}

fn outcome_for(tool: &ToolDefinition, matched: Option<&RecommendationRule>) -> OutcomeMessage {
    match matched {
        Some(rule) => rule.outcome(),
        None => tool.fallback.clone().unwrap_or_else(OutcomeMessage::no_match),
    }
}

// ----------------- Scoring -----------------

/// Classify one scoring rule against the collected values.
///
/// Favor membership is tested first, so a value listed in both sets counts
/// as favor (before inversion).
pub fn score_polarity(rule: &ScoringRule, values: &InputValues) -> Polarity {
    if rule.input_id.is_empty() {
        return Polarity::Neutral;
    }
    let Some(value) = values.get(&rule.input_id) else {
        return Polarity::Neutral;
    };
    let in_set = |set: &[String]| set.iter().any(|member| value.equals_literal(member));
    let raw = if in_set(&rule.favor_values) {
        Polarity::Favor
    } else if in_set(&rule.against_values) {
        Polarity::Against
    } else {
        Polarity::Neutral
    };
    match (raw, rule.invert_favor) {
        (Polarity::Favor, true) => Polarity::Against,
        (Polarity::Against, true) => Polarity::Favor,
        (p, _) => p,
    }
}

pub fn compute_scores(tool: &ToolDefinition, values: &InputValues) -> ScoreTally {
    tool.scoring_rules
        .iter()
        .fold(ScoreTally::default(), |mut tally, rule| {
            match score_polarity(rule, values) {
                Polarity::Favor => tally.favor += 1,
                Polarity::Against => tally.against += 1,
                Polarity::Neutral => {}
            }
            tally
        })
}

// ----------------- Core -----------------

/// Run both algorithms over the same values.
pub fn evaluate(tool: &ToolDefinition, values: &InputValues) -> Evaluation {
    let matched = first_match(tool, values);
    let outcome = outcome_for(tool, matched);
    let scores = compute_scores(tool, values);
    debug!(
        tool = %tool.name,
        matched_rule = matched.map(|r| r.name.as_str()).unwrap_or("<fallback>"),
        level = %outcome.level,
        favor = scores.favor,
        against = scores.against,
        "evaluated tool"
    );
    Evaluation {
        outcome,
        matched_rule: matched.map(|r| r.name.clone()),
        scores,
    }
}
