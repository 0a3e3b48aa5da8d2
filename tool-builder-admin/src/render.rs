use tool_builder::evaluator::{Evaluation, ScoreTally};
use tool_builder::types::{Level, OutcomeMessage};

/// Fixed tag per severity.
pub fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Success => "[ok]",
        Level::Info => "[info]",
        Level::Warning => "[warn]",
        Level::Error => "[error]",
    }
}

pub fn outcome_line(outcome: &OutcomeMessage) -> String {
    format!("{} {}", level_tag(outcome.level), outcome.message)
}

pub fn score_lines(scores: &ScoreTally) -> [String; 2] {
    [
        format!("Factors favoring: {}", scores.favor),
        format!("Factors against: {}", scores.against),
    ]
}

pub fn evaluation_report(eval: &Evaluation) -> String {
    let [favor, against] = score_lines(&eval.scores);
    format!("{}\n{favor}\n{against}", outcome_line(&eval.outcome))
}
