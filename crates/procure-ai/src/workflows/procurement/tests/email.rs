use super::common::sample_rfp;
use crate::workflows::procurement::email::render_rfp_email;

#[test]
fn every_item_gets_exactly_one_line() {
    let rfp = sample_rfp("email");
    let draft = render_rfp_email(&rfp, "Acme Supply");

    let item_lines: Vec<&str> = draft
        .body
        .lines()
        .filter(|line| line.starts_with("- "))
        .collect();
    assert_eq!(item_lines.len(), rfp.request.items.len());

    for (line, item) in item_lines.iter().zip(&rfp.request.items) {
        assert!(line.contains(&item.name));
        assert!(line.contains(&item.quantity.to_string()));
        assert!(line.contains(&item.specifications));
    }
}

#[test]
fn subject_and_sections_come_from_the_rfp() {
    let rfp = sample_rfp("email");
    let draft = render_rfp_email(&rfp, "Acme Supply");

    assert_eq!(
        draft.subject,
        "Request for Proposal: Laptop and Monitor Procurement"
    );
    assert!(draft.body.starts_with("Dear Acme Supply,"));
    assert!(draft.body.contains("Budget: USD 10000"));
    assert!(draft.body.contains("Expected delivery: within 14 days"));
    assert!(draft.body.contains("Payment terms: Net 30"));
    assert!(draft.body.contains("Warranty requirement: 2 years warranty"));
}

#[test]
fn checklist_always_lists_six_points() {
    let draft = render_rfp_email(&sample_rfp("email"), "Acme Supply");

    for point in 1..=6 {
        assert!(
            draft.body.contains(&format!("{point}. ")),
            "checklist point {point} missing"
        );
    }
    assert!(draft.body.contains("6. Quote validity period"));
}

#[test]
fn missing_budget_and_delivery_fall_back_to_neutral_wording() {
    let mut rfp = sample_rfp("email");
    rfp.request.budget = None;
    rfp.request.delivery_days = None;
    rfp.request.requirements.payment_terms = None;
    rfp.request.requirements.warranty = None;

    let draft = render_rfp_email(&rfp, "Acme Supply");
    assert!(draft.body.contains("Budget: to be discussed"));
    assert!(draft
        .body
        .contains("Expected delivery: please propose a timeline"));
    assert!(!draft.body.contains("Payment terms:"));
    assert!(!draft.body.contains("Warranty requirement:"));
}

#[test]
fn items_without_specifications_render_without_the_suffix() {
    let mut rfp = sample_rfp("email");
    rfp.request.items[0].specifications.clear();

    let draft = render_rfp_email(&rfp, "Acme Supply");
    assert!(draft.body.contains("- Laptop | Quantity: 5\n"));
    assert!(draft
        .body
        .contains("- Monitor | Quantity: 2 | Specifications: 24 inch"));
}
