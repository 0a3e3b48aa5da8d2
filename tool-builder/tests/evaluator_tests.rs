use tool_builder::evaluator::{compute_scores, evaluate, evaluate_rules, first_match, ScoreTally};
use tool_builder::types::{
    Condition, InputField, InputKind, InputValues, Level, OutcomeMessage, RecommendationRule,
    Scalar, ScoringRule, ToolDefinition,
};
use tool_builder::{evaluate_tool_json, template_tool};

fn values(pairs: &[(&str, &str)]) -> InputValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Scalar::from(*v)))
        .collect()
}

fn rule(name: &str, level: Level, message: &str, conds: &[(&str, &str)]) -> RecommendationRule {
    RecommendationRule {
        name: name.to_string(),
        level,
        message: message.to_string(),
        conditions: conds.iter().map(|(id, v)| Condition::equals(*id, *v)).collect(),
    }
}

fn go_tool() -> ToolDefinition {
    ToolDefinition {
        inputs: vec![InputField {
            id: "q".into(),
            label: "Proceed?".into(),
            kind: InputKind::Select,
            options: vec!["Yes".into(), "No".into()],
        }],
        rules: vec![rule("go", Level::Success, "Go", &[("q", "Yes")])],
        fallback: Some(OutcomeMessage::new(Level::Warning, "No")),
        ..ToolDefinition::default()
    }
}

fn scoring_tool(invert: bool) -> ToolDefinition {
    ToolDefinition {
        scoring_rules: vec![ScoringRule {
            input_id: "q".into(),
            favor_values: vec!["Yes".into()],
            against_values: vec!["No".into()],
            invert_favor: invert,
        }],
        ..ToolDefinition::default()
    }
}

// ----------------------- recommendation rules -----------------------

#[test]
fn test_matching_rule_selected() {
    let out = evaluate_rules(&go_tool(), &values(&[("q", "Yes")]));
    assert_eq!(out, OutcomeMessage::new(Level::Success, "Go"));
}

#[test]
fn test_fallback_when_nothing_matches() {
    let out = evaluate_rules(&go_tool(), &values(&[("q", "No")]));
    assert_eq!(out, OutcomeMessage::new(Level::Warning, "No"));
}

#[test]
fn test_missing_fallback_defaults_to_warning() {
    let mut tool = go_tool();
    tool.fallback = None;
    let out = evaluate_rules(&tool, &values(&[]));
    assert_eq!(out.level, Level::Warning);
    assert_eq!(out.message, "No rules matched.");
}

#[test]
fn test_earlier_rule_wins_regardless_of_specificity() {
    let mut tool = go_tool();
    tool.rules = vec![
        rule("broad", Level::Info, "broad", &[("q", "Yes")]),
        rule("narrow", Level::Error, "narrow", &[("q", "Yes"), ("r", "High")]),
    ];
    let vals = values(&[("q", "Yes"), ("r", "High")]);
    assert_eq!(evaluate_rules(&tool, &vals).message, "broad");
    assert_eq!(first_match(&tool, &vals).map(|r| r.name.as_str()), Some("broad"));

    tool.rules.reverse();
    assert_eq!(evaluate_rules(&tool, &vals).message, "narrow");
}

#[test]
fn test_rule_without_conditions_never_selected() {
    let mut tool = go_tool();
    tool.rules = vec![rule("always?", Level::Error, "should not fire", &[])];
    let out = evaluate_rules(&tool, &values(&[("q", "Yes")]));
    assert_eq!(out, OutcomeMessage::new(Level::Warning, "No"));

    tool.rules.push(rule("go", Level::Success, "Go", &[("q", "Yes")]));
    assert_eq!(evaluate_rules(&tool, &values(&[("q", "Yes")])).message, "Go");
}

#[test]
fn test_all_conditions_required() {
    let mut tool = go_tool();
    tool.rules = vec![rule("both", Level::Success, "both", &[("a", "1"), ("b", "2")])];
    assert_eq!(evaluate_rules(&tool, &values(&[("a", "1")])).message, "No");
    assert_eq!(evaluate_rules(&tool, &values(&[("a", "1"), ("b", "3")])).message, "No");
    assert_eq!(evaluate_rules(&tool, &values(&[("a", "1"), ("b", "2")])).message, "both");
}

#[test]
fn test_dangling_input_reference_is_inert() {
    let mut tool = go_tool();
    tool.rules.insert(0, rule("ghost", Level::Error, "ghost", &[("missing", "Yes")]));
    let out = evaluate_rules(&tool, &values(&[("q", "Yes")]));
    assert_eq!(out.message, "Go");
}

#[test]
fn test_numbers_do_not_coerce_to_text() {
    let mut tool = go_tool();
    tool.rules = vec![rule("one", Level::Info, "one", &[("n", "1")])];
    let mut vals = InputValues::new();
    vals.insert("n".into(), Scalar::Number(1.0));
    assert_eq!(evaluate_rules(&tool, &vals).message, "No");
}

// ----------------------- scoring -----------------------

#[test]
fn test_scoring_examples() {
    let tool = scoring_tool(false);
    assert_eq!(
        compute_scores(&tool, &values(&[("q", "Yes")])),
        ScoreTally { favor: 1, against: 0 }
    );
    assert_eq!(
        compute_scores(&tool, &values(&[("q", "No")])),
        ScoreTally { favor: 0, against: 1 }
    );
    assert_eq!(
        compute_scores(&tool, &values(&[("q", "Unknown")])),
        ScoreTally { favor: 0, against: 0 }
    );
}

#[test]
fn test_inverted_scoring() {
    let tool = scoring_tool(true);
    assert_eq!(
        compute_scores(&tool, &values(&[("q", "Yes")])),
        ScoreTally { favor: 0, against: 1 }
    );
    assert_eq!(
        compute_scores(&tool, &values(&[("q", "No")])),
        ScoreTally { favor: 1, against: 0 }
    );
}

#[test]
fn test_missing_value_scores_nothing() {
    let tool = scoring_tool(false);
    assert_eq!(compute_scores(&tool, &values(&[])), ScoreTally::default());
}

#[test]
fn test_tally_bounded_by_rule_count() {
    let mut tool = scoring_tool(false);
    tool.scoring_rules.push(ScoringRule {
        input_id: "q".into(),
        favor_values: vec!["Yes".into()],
        against_values: vec![],
        invert_favor: true,
    });
    tool.scoring_rules.push(ScoringRule {
        input_id: String::new(),
        favor_values: vec!["Yes".into()],
        against_values: vec![],
        invert_favor: false,
    });
    let tally = compute_scores(&tool, &values(&[("q", "Yes"), ("", "Yes")]));
    assert_eq!(tally, ScoreTally { favor: 1, against: 1 });
    assert!(tally.favor + tally.against <= tool.scoring_rules.len());
}

// ----------------------- combined -----------------------

#[test]
fn test_template_tool_end_to_end() {
    let tool = template_tool();
    let yes = evaluate(&tool, &values(&[("example_yes_no", "Yes")]));
    assert_eq!(yes.matched_rule.as_deref(), Some("Example Rule"));
    assert_eq!(yes.outcome.level, Level::Info);
    assert_eq!(yes.scores, ScoreTally { favor: 1, against: 0 });

    let unknown = evaluate(&tool, &values(&[("example_yes_no", "Unknown")]));
    assert_eq!(unknown.matched_rule, None);
    assert_eq!(unknown.outcome, OutcomeMessage::no_match());
    assert_eq!(unknown.scores, ScoreTally::default());
}

#[test]
fn test_evaluate_does_not_mutate_inputs() {
    let tool = go_tool();
    let vals = values(&[("q", "Yes")]);
    let (tool_before, vals_before) = (tool.clone(), vals.clone());
    let _ = evaluate(&tool, &vals);
    assert_eq!(tool, tool_before);
    assert_eq!(vals, vals_before);
}

#[test]
fn test_evaluate_tool_json() {
    let tool = r#"{
        "name": "Go/No-go",
        "inputs": [{"id": "q", "label": "Proceed?", "type": "select", "options": ["Yes", "No"]}],
        "scoring_rules": [{"input_id": "q", "favor_values": ["Yes"],
                           "against_values": ["No"], "invert_favor": false}],
        "rules": [{"name": "go", "level": "success", "message": "Go",
                   "conditions": [{"input_id": "q", "op": "equals", "value": "Yes"}]}],
        "fallback": {"level": "warning", "message": "No"}
    }"#;
    let res = evaluate_tool_json(tool, r#"{"q": "Yes"}"#).expect("valid json");
    assert_eq!(res.outcome, OutcomeMessage::new(Level::Success, "Go"));
    assert_eq!(res.scores, ScoreTally { favor: 1, against: 0 });

    let res = evaluate_tool_json(tool, r#"{"q": 1}"#).expect("valid json");
    assert_eq!(res.outcome.message, "No");

    assert!(evaluate_tool_json("{not json", "{}").is_err());
}
