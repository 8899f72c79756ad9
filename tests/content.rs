use bias_report::content::{
    build_blocks, DISCLAIMER_TEXT, FINDINGS_HEADING, NO_FINDINGS_TEXT, REPORT_TITLE,
};
use bias_report::model::DocumentBlock;
use bias_report::AnalysisReport;

const JANE: &str = r#"{"filename":"jane.pdf","score":72,"riskLevel":"Medium","analysis":{"biasFlags":[{"category":"Age","description":"Mentions graduation year","severity":"Medium","suggestion":"Remove the year"}]}}"#;

fn blocks_for(json: &str) -> Vec<DocumentBlock> {
    build_blocks(&AnalysisReport::from_json(json).expect("valid report"))
}

fn texts(blocks: &[DocumentBlock]) -> Vec<String> {
    blocks
        .iter()
        .filter(|block| !block.is_spacer())
        .map(DocumentBlock::plain_text)
        .collect()
}

fn flag_json(categories: &[&str]) -> String {
    let flags = categories
        .iter()
        .map(|category| format!(r#"{{"category":"{category}","severity":"High"}}"#))
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"analysis":{{"biasFlags":[{flags}]}}}}"#)
}

#[test]
fn sections_appear_in_fixed_order() {
    let texts = texts(&blocks_for(JANE));
    let position = |needle: &str| {
        texts
            .iter()
            .position(|text| text.starts_with(needle))
            .unwrap_or_else(|| panic!("missing {needle}"))
    };

    let order = [
        position(REPORT_TITLE),
        position("Filename:"),
        position("Timestamp:"),
        position("Metric | Value"),
        position(FINDINGS_HEADING),
        position("Category:"),
        position(DISCLAIMER_TEXT),
    ];
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]), "{order:?}");
    assert_eq!(texts.last().map(String::as_str), Some(DISCLAIMER_TEXT));
}

#[test]
fn absent_flags_print_the_no_findings_sentence() {
    for json in ["{}", r#"{"analysis":{}}"#, r#"{"analysis":{"biasFlags":[]}}"#] {
        let texts = texts(&blocks_for(json));
        assert!(texts.iter().any(|text| text == NO_FINDINGS_TEXT), "{json}");
        assert!(!texts.iter().any(|text| text.starts_with("Category:")), "{json}");
    }
}

#[test]
fn every_flag_is_rendered_in_input_order() {
    let categories = ["Name", "Age", "Gender", "Age"];
    let texts = texts(&blocks_for(&flag_json(&categories)));

    let rendered: Vec<_> = texts
        .iter()
        .filter_map(|text| text.strip_prefix("Category: "))
        .collect();
    assert_eq!(rendered, categories);

    for label in ["Description: ", "Severity: ", "AI Suggestion: "] {
        let count = texts.iter().filter(|text| text.starts_with(label)).count();
        assert_eq!(count, categories.len(), "{label}");
    }
    assert!(!texts.iter().any(|text| text == NO_FINDINGS_TEXT));
}

#[test]
fn flag_lines_are_grouped_per_flag() {
    let texts = texts(&blocks_for(&flag_json(&["First", "Second"])));
    let start = texts
        .iter()
        .position(|text| text == FINDINGS_HEADING)
        .expect("findings heading")
        + 1;
    let labels: Vec<_> = texts[start..start + 8]
        .iter()
        .map(|text| text.split(':').next().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(
        labels,
        [
            "Category",
            "Description",
            "Severity",
            "AI Suggestion",
            "Category",
            "Description",
            "Severity",
            "AI Suggestion",
        ]
    );
}

#[test]
fn empty_object_uses_every_default() {
    let texts = texts(&blocks_for("{}"));
    assert!(texts.contains(&"Filename: Unknown".to_owned()));
    assert!(texts.contains(
        &"Metric | Value\nOverall Fairness Score | 0/100\nRisk Level | N/A".to_owned()
    ));

    let timestamp = texts
        .iter()
        .find_map(|text| text.strip_prefix("Timestamp: "))
        .expect("timestamp line");
    assert!(
        chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok(),
        "timestamp {timestamp} should be formatted as YYYY-MM-DD HH:MM:SS"
    );
}

#[test]
fn sample_report_lines() {
    let texts = texts(&blocks_for(JANE));
    for expected in [
        "Filename: jane.pdf",
        "Metric | Value\nOverall Fairness Score | 72/100\nRisk Level | Medium",
        "Category: Age",
        "Description: Mentions graduation year",
        "Severity: Medium",
        "AI Suggestion: Remove the year",
    ] {
        assert!(texts.iter().any(|text| text == expected), "missing {expected:?}");
    }
    assert_eq!(
        texts.iter().filter(|text| text.starts_with("Category:")).count(),
        1
    );
}

#[test]
fn wrong_typed_score_is_passed_through() {
    let texts = texts(&blocks_for(r#"{"score":"abc"}"#));
    assert!(texts.iter().any(|text| text.contains("Overall Fairness Score | abc/100")));
}

#[test]
fn content_is_a_pure_function_of_the_input() {
    let json = r#"{"timestamp":"2024-05-01 10:00:00","score":55,"analysis":{"biasFlags":[{}]}}"#;
    assert_eq!(blocks_for(json), blocks_for(json));
}
