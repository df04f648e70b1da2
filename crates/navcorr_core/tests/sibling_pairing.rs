use navcorr_core::{validate, Level, Paragraph, ValidationPolicy};

fn para(id: u64, level: u8, content: &str) -> Paragraph {
    Paragraph::new(id, Level::new(level).unwrap(), content)
}

#[test]
fn single_top_level_paragraph_is_exempt() {
    let report = validate(&[para(1, 1, "Only paragraph.")], ValidationPolicy::Warn);
    assert!(report.is_clean());
}

#[test]
fn single_child_under_parent_is_one_violation() {
    let sequence = vec![para(1, 1, ""), para(2, 2, "x")];
    let report = validate(&sequence, ValidationPolicy::Warn);

    assert_eq!(report.violations.len(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.level.get(), 2);
    assert_eq!(violation.paragraph_id, 2);
    assert_eq!(violation.citation, "a.");
    assert_eq!(violation.ancestor_path, vec!["1.".to_string()]);
}

#[test]
fn nested_example_has_no_violations() {
    let sequence = vec![
        para(1, 1, "A"),
        para(2, 2, "B"),
        para(3, 2, "C"),
        para(4, 3, "D"),
        para(5, 3, "E"),
    ];
    assert!(validate(&sequence, ValidationPolicy::Warn).is_clean());
}

#[test]
fn one_violation_per_group_not_per_paragraph() {
    let sequence = vec![
        para(1, 1, "A"),
        para(2, 2, "a"),
        para(3, 2, ""),
        para(4, 2, " "),
    ];
    let report = validate(&sequence, ValidationPolicy::Warn);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].paragraph_id, 2);
}

#[test]
fn titled_sibling_completes_the_pair() {
    let sequence = vec![
        para(1, 1, "A"),
        para(2, 2, "a"),
        para(3, 2, "").with_title("Discussion"),
    ];
    assert!(validate(&sequence, ValidationPolicy::Warn).is_clean());
}

#[test]
fn warn_policy_passes_block_policy_refuses() {
    let sequence = vec![para(1, 1, "A"), para(2, 2, "lonely")];

    let warned = validate(&sequence, ValidationPolicy::Warn);
    assert!(!warned.is_blocking());
    assert_eq!(warned.into_result().unwrap().len(), 1);

    let blocked = validate(&sequence, ValidationPolicy::Block);
    assert!(blocked.is_blocking());
    let err = blocked.into_result().unwrap_err();
    assert_eq!(err.violations.len(), 1);
    assert!(err.to_string().contains("1 paragraph structure violation"));
}

#[test]
fn clean_document_never_blocks() {
    let report = validate(
        &[para(1, 1, "A"), para(2, 1, "B")],
        ValidationPolicy::Block,
    );
    assert!(!report.is_blocking());
    assert!(report.into_result().unwrap().is_empty());
}

#[test]
fn same_citation_paths_under_different_parents_stay_distinct() {
    // Both top-level paragraphs are empty drafts and number as `1.`.
    let sequence = vec![
        para(1, 1, ""),
        para(2, 2, "first a"),
        para(3, 2, "first b"),
        para(4, 1, ""),
        para(5, 2, "second a"),
    ];
    let report = validate(&sequence, ValidationPolicy::Warn);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].paragraph_id, 5);
    assert_eq!(report.violations[0].full_citation(), "1.a.");
}
