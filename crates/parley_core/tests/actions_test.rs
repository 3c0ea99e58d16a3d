//! Tests for the system action codec.

use parley_core::{BracketBalance, bracket_balance, display_action, format_actions, parse_actions};

#[test]
fn empty_and_blank_input_parse_to_nothing() {
    assert!(parse_actions("").is_empty());
    assert!(parse_actions("   ").is_empty());
    assert!(parse_actions("\n\t").is_empty());
}

#[test]
fn commas_inside_brackets_are_kept() {
    assert_eq!(
        parse_actions("[A, with comma],[B]"),
        vec!["[A, with comma]", "[B]"]
    );
}

#[test]
fn bare_segments_are_split_on_commas() {
    assert_eq!(
        parse_actions("Checks stock, Creates order"),
        vec!["Checks stock", "Creates order"]
    );
}

#[test]
fn nested_brackets_keep_inner_commas() {
    assert_eq!(
        parse_actions("[Calls API [region: us, eu]],[Done]"),
        vec!["[Calls API [region: us, eu]]", "[Done]"]
    );
}

#[test]
fn format_wraps_only_bare_actions() {
    assert_eq!(format_actions(&["x", "[y]"]), "[x],[y]");
    assert_eq!(format_actions(&["  padded  "]), "[padded]");
}

#[test]
fn format_of_empty_list_is_empty_string() {
    let empty: Vec<String> = Vec::new();
    assert_eq!(format_actions(&empty), "");
}

#[test]
fn bracketed_actions_round_trip_exactly() {
    let actions = vec![
        "[Fetches merchant profile]".to_string(),
        "[Creates campaign draft]".to_string(),
        "[Activates campaign]".to_string(),
    ];
    assert_eq!(parse_actions(&format_actions(&actions)), actions);
}

#[test]
fn bare_actions_round_trip_through_display() {
    let bare = vec!["first".to_string(), "second one".to_string()];
    let parsed = parse_actions(&format_actions(&bare));
    assert_eq!(parsed, vec!["[first]", "[second one]"]);

    let shown: Vec<&str> = parsed.iter().map(|a| display_action(a)).collect();
    assert_eq!(shown, bare);
}

#[test]
fn reformatting_is_stable() {
    let text = "[Pulls sales data, last 30 days], Updates dashboard";
    let once = format_actions(&parse_actions(text));
    let twice = format_actions(&parse_actions(&once));
    assert_eq!(once, "[Pulls sales data, last 30 days],[Updates dashboard]");
    assert_eq!(once, twice);
}

#[test]
fn display_strips_outer_brackets_only() {
    assert_eq!(display_action("[Sets up alerts]"), "Sets up alerts");
    assert_eq!(display_action("[[nested]]"), "[nested]");
    assert_eq!(display_action("no brackets"), "no brackets");
}

#[test]
fn bracket_balance_reports_problems() {
    assert_eq!(bracket_balance("[a],[b, c]"), BracketBalance::Balanced);
    assert_eq!(bracket_balance("[a,[b"), BracketBalance::Unclosed(2));
    assert_eq!(bracket_balance("a],[b]"), BracketBalance::Unopened(1));
    assert!(bracket_balance("").is_balanced());
}
