use crate::workflows::procurement::domain::{EmailDraft, RfpRecord};
use std::fmt::Write as _;

/// Render the fixed-structure RFP email for one vendor.
///
/// Every requested item gets exactly one line reproducing its name, quantity,
/// and specifications verbatim, so replies can be checked against the ask.
pub fn render_rfp_email(rfp: &RfpRecord, vendor_name: &str) -> EmailDraft {
    let request = &rfp.request;
    let subject = format!("Request for Proposal: {}", request.title);

    let mut body = String::new();
    writeln!(body, "Dear {vendor_name},").expect("write greeting");
    body.push('\n');
    writeln!(
        body,
        "We invite you to submit a proposal for the following procurement."
    )
    .expect("write invitation");
    body.push('\n');
    writeln!(body, "Project: {}", request.title).expect("write project");
    writeln!(body, "Description: {}", request.description).expect("write description");
    body.push('\n');

    writeln!(body, "Requested items:").expect("write items header");
    for item in &request.items {
        if item.specifications.is_empty() {
            writeln!(body, "- {} | Quantity: {}", item.name, item.quantity)
                .expect("write item line");
        } else {
            writeln!(
                body,
                "- {} | Quantity: {} | Specifications: {}",
                item.name, item.quantity, item.specifications
            )
            .expect("write item line");
        }
    }
    body.push('\n');

    match request.budget {
        Some(budget) => writeln!(body, "Budget: {} {}", request.currency, budget),
        None => writeln!(body, "Budget: to be discussed"),
    }
    .expect("write budget");

    match request.delivery_days {
        Some(days) => writeln!(body, "Expected delivery: within {days} days"),
        None => writeln!(body, "Expected delivery: please propose a timeline"),
    }
    .expect("write delivery");

    if let Some(terms) = &request.requirements.payment_terms {
        writeln!(body, "Payment terms: {terms}").expect("write payment terms");
    }
    if let Some(warranty) = &request.requirements.warranty {
        writeln!(body, "Warranty requirement: {warranty}").expect("write warranty");
    }
    if let Some(location) = &request.requirements.delivery_location {
        writeln!(body, "Delivery location: {location}").expect("write location");
    }
    body.push('\n');

    writeln!(body, "Please include in your response:").expect("write checklist header");
    writeln!(body, "1. Itemized pricing for every requested item").expect("write checklist");
    writeln!(body, "2. Total cost including any delivery charges").expect("write checklist");
    writeln!(body, "3. Delivery timeline").expect("write checklist");
    writeln!(body, "4. Payment terms").expect("write checklist");
    writeln!(body, "5. Warranty coverage").expect("write checklist");
    writeln!(body, "6. Quote validity period").expect("write checklist");
    body.push('\n');

    writeln!(body, "We look forward to your proposal.").expect("write closing");
    body.push('\n');
    writeln!(body, "Kind regards,").expect("write signoff");
    writeln!(body, "Procurement Team").expect("write signature");

    EmailDraft { subject, body }
}
