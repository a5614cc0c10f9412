use crate::workflows::procurement::domain::VendorRecord;
use crate::workflows::procurement::mail::InboundEmail;

/// An inbound message matched to the vendor it came from.
#[derive(Debug)]
pub struct VendorReply {
    pub vendor: VendorRecord,
    pub message: InboundEmail,
}

/// Filter polled messages down to replies from known vendors.
///
/// Addresses compare case-insensitively after reducing `Display Name <addr>`
/// forms to the bare addr-spec; mail from unknown senders is dropped.
pub fn match_vendor_replies(
    messages: Vec<InboundEmail>,
    vendors: &[VendorRecord],
) -> Vec<VendorReply> {
    messages
        .into_iter()
        .filter_map(|message| {
            let sender = normalize_address(&message.from_address);
            let vendor = vendors
                .iter()
                .find(|vendor| normalize_address(&vendor.email) == sender)?;
            Some(VendorReply {
                vendor: vendor.clone(),
                message,
            })
        })
        .collect()
}

fn normalize_address(raw: &str) -> String {
    let trimmed = raw.trim();
    let addr_spec = match (trimmed.rfind('<'), trimmed.rfind('>')) {
        (Some(open), Some(close)) if open < close => &trimmed[open + 1..close],
        _ => trimmed,
    };
    addr_spec.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_display_name_forms() {
        assert_eq!(
            normalize_address("Acme Sales <Sales@Acme.example>"),
            "sales@acme.example"
        );
        assert_eq!(normalize_address("  ops@vendor.example "), "ops@vendor.example");
    }
}
