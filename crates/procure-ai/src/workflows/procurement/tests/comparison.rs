use super::common::proposal;
use crate::workflows::procurement::comparison::{compare_proposals, ComparisonError};

#[test]
fn cheaper_proposal_outscores_costlier_on_price() {
    let proposals = vec![
        proposal("a", Some(5_000.0), Some(14), None),
        proposal("b", Some(8_000.0), Some(14), None),
    ];

    let outcome = compare_proposals(&proposals).expect("comparison succeeds");
    let cheap = outcome
        .scores
        .iter()
        .find(|score| score.vendor_id.0 == "vendor-a")
        .expect("vendor a scored");
    let costly = outcome
        .scores
        .iter()
        .find(|score| score.vendor_id.0 == "vendor-b")
        .expect("vendor b scored");

    assert!(cheap.price_score > costly.price_score);
    assert_eq!(cheap.price_score, 100);
    assert_eq!(costly.price_score, 50);
    assert_eq!(cheap.terms_score, 60);
    assert_eq!(costly.terms_score, 60);
    assert_eq!(
        outcome.recommendation.recommended_vendor_id.0,
        "vendor-a"
    );
}

#[test]
fn missing_price_scores_the_neutral_midpoint() {
    let proposals = vec![
        proposal("a", Some(5_000.0), Some(14), Some("1 year warranty")),
        proposal("b", None, Some(14), Some("1 year warranty")),
    ];

    let outcome = compare_proposals(&proposals).expect("comparison succeeds");
    let unpriced = outcome
        .scores
        .iter()
        .find(|score| score.vendor_id.0 == "vendor-b")
        .expect("vendor b scored");

    assert_eq!(unpriced.price_score, 50);
    assert!(unpriced
        .cons
        .iter()
        .any(|con| con == "No total price provided"));
}

#[test]
fn all_scores_stay_within_bounds() {
    let proposals = vec![
        proposal("a", Some(0.0), Some(500), None),
        proposal("b", Some(1_000_000.0), Some(1), Some("5 years warranty")),
        proposal("c", None, None, None),
    ];

    let outcome = compare_proposals(&proposals).expect("comparison succeeds");
    for score in &outcome.scores {
        assert!(score.price_score <= 100);
        assert!(score.delivery_score <= 100);
        assert!(score.terms_score <= 100);
        assert!(score.overall_score <= 100);
    }

    let slow = outcome
        .scores
        .iter()
        .find(|score| score.vendor_id.0 == "vendor-a")
        .expect("vendor a scored");
    assert_eq!(slow.delivery_score, 0);

    let unknown = outcome
        .scores
        .iter()
        .find(|score| score.vendor_id.0 == "vendor-c")
        .expect("vendor c scored");
    assert_eq!(unknown.delivery_score, 50);
    assert!(unknown
        .cons
        .iter()
        .any(|con| con == "Delivery timeline unclear"));
}

#[test]
fn warranty_flips_terms_score_to_eighty() {
    let proposals = vec![
        proposal("a", Some(5_000.0), Some(10), Some("2 years warranty")),
        proposal("b", Some(5_000.0), Some(10), None),
    ];

    let outcome = compare_proposals(&proposals).expect("comparison succeeds");
    let covered = outcome
        .scores
        .iter()
        .find(|score| score.vendor_id.0 == "vendor-a")
        .expect("vendor a scored");
    let uncovered = outcome
        .scores
        .iter()
        .find(|score| score.vendor_id.0 == "vendor-b")
        .expect("vendor b scored");

    assert_eq!(covered.terms_score, 80);
    assert_eq!(uncovered.terms_score, 60);
    assert!(covered
        .pros
        .iter()
        .any(|pro| pro == "Warranty: 2 years warranty"));
    assert!(uncovered
        .cons
        .iter()
        .any(|con| con == "No warranty information"));
}

#[test]
fn equal_scores_keep_input_order() {
    let proposals = vec![
        proposal("first", Some(5_000.0), Some(10), None),
        proposal("second", Some(5_000.0), Some(10), None),
        proposal("third", Some(5_000.0), Some(10), None),
    ];

    let outcome = compare_proposals(&proposals).expect("comparison succeeds");
    let order: Vec<&str> = outcome
        .scores
        .iter()
        .map(|score| score.vendor_id.0.as_str())
        .collect();
    assert_eq!(order, vec!["vendor-first", "vendor-second", "vendor-third"]);
    assert_eq!(
        outcome.recommendation.alternative.as_deref(),
        Some("Vendor SECOND")
    );
}

#[test]
fn sole_proposal_short_circuits_to_a_trivial_recommendation() {
    let proposals = vec![proposal("only", Some(4_200.0), Some(7), None)];

    let outcome = compare_proposals(&proposals).expect("comparison succeeds");
    assert_eq!(outcome.scores.len(), 1);
    assert_eq!(outcome.scores[0].overall_score, 100);
    assert!(outcome.scores[0].summary.contains("sole responsive vendor"));
    assert_eq!(
        outcome.recommendation.recommended_vendor_id.0,
        "vendor-only"
    );
    assert!(outcome.recommendation.reasoning.contains("Only one proposal"));
    assert_eq!(outcome.recommendation.alternative, None);
}

#[test]
fn empty_input_is_rejected_before_scoring() {
    let error = compare_proposals(&[]).expect_err("no proposals to compare");
    assert!(matches!(error, ComparisonError::NoProposals));
}

#[test]
fn recommendation_carries_the_runner_up_and_top_risks() {
    let proposals = vec![
        proposal("slow", Some(9_000.0), Some(45), None),
        proposal("fast", Some(5_000.0), Some(7), Some("1 year warranty")),
    ];

    let outcome = compare_proposals(&proposals).expect("comparison succeeds");
    assert_eq!(outcome.scores[0].vendor_id.0, "vendor-fast");
    assert_eq!(
        outcome.recommendation.alternative.as_deref(),
        Some("Vendor SLOW")
    );
    assert_eq!(outcome.recommendation.risks, outcome.scores[0].cons);
}
