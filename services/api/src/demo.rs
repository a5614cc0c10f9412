use crate::infra::{
    InMemoryMailbox, InMemoryProposalStore, InMemoryRfpRepository, InMemoryVendorDirectory,
    LoggingMailSender,
};
use chrono::{Duration, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use procure_ai::error::AppError;
use procure_ai::workflows::procurement::{
    EmailAttachment, InboundEmail, ProcurementService, VendorDirectory, VendorRecord,
    VendorSubmission,
};
use procure_ai::workflows::vendors::VendorDirectoryImporter;

const DEMO_REQUEST: &str = "We need 5 laptops with 16GB RAM and 2 monitors 24 inch, \
budget $10000, delivery in 2 weeks, Net 30 payment, 2 year warranty";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Free-text purchase request to ingest. Defaults to a hardware refresh.
    #[arg(long)]
    pub(crate) request: Option<String>,
    /// Optional vendor CSV export (Name,Email,Category) to load instead of
    /// the built-in demo vendors.
    #[arg(long)]
    pub(crate) vendors_csv: Option<PathBuf>,
    /// Optional file to attach to every outbound RFP email.
    #[arg(long)]
    pub(crate) attach: Option<PathBuf>,
    /// Only ingest replies received after this RFC 3339 timestamp.
    #[arg(long, value_parser = crate::infra::parse_datetime)]
    pub(crate) since: Option<chrono::DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub(crate) struct VendorImportArgs {
    /// Vendor CSV export (Name,Email,Category)
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

pub(crate) fn run_vendor_import(args: VendorImportArgs) -> Result<(), AppError> {
    let records = VendorDirectoryImporter::from_path(&args.csv)?;

    println!("Imported {} vendor(s) from {}", records.len(), args.csv.display());
    for record in &records {
        let category = record.category.as_deref().unwrap_or("uncategorized");
        println!("- {} <{}> [{}] ({})", record.name, record.email, category, record.id.0);
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        request,
        vendors_csv,
        attach,
        since,
    } = args;

    let rfps = Arc::new(InMemoryRfpRepository::default());
    let vendors = Arc::new(InMemoryVendorDirectory::default());
    let proposals = Arc::new(InMemoryProposalStore::default());
    let mailbox = InMemoryMailbox::default();

    let service = ProcurementService::new(
        rfps,
        vendors.clone(),
        proposals,
        Box::new(LoggingMailSender::default()),
        Box::new(mailbox.clone()),
        None,
    );

    println!("Procurement workflow demo");

    let directory = load_vendors(&service, &vendors, vendors_csv)?;
    println!("\nVendor directory ({} vendors)", directory.len());
    for vendor in &directory {
        println!("- {} <{}>", vendor.name, vendor.email);
    }

    let text = request.unwrap_or_else(|| DEMO_REQUEST.to_string());
    let parsed = service.ingest_request(&text).await?;
    let rfp = parsed.data;

    println!("\nIngested request {} ({})", rfp.id.0, rfp.request.title);
    println!(
        "- extraction path: {}",
        if parsed.used_fallback {
            "pattern fallback"
        } else {
            "generative"
        }
    );
    for item in &rfp.request.items {
        if item.specifications.is_empty() {
            println!("- {} x{}", item.name, item.quantity);
        } else {
            println!("- {} x{} ({})", item.name, item.quantity, item.specifications);
        }
    }
    if let Some(budget) = rfp.request.budget {
        println!("- budget {} {}", rfp.request.currency, budget);
    }
    if let Some(days) = rfp.request.delivery_days {
        println!("- delivery within {days} days");
    }

    let attachments = load_attachment(attach)?;
    let vendor_ids: Vec<_> = directory.iter().map(|vendor| vendor.id.clone()).collect();
    let report = service.dispatch(&rfp.id, &vendor_ids, &attachments).await?;
    println!(
        "\nDispatched RFP to {}/{} vendor(s)",
        report.delivered(),
        report.dispatches.len()
    );

    for (index, vendor) in directory.iter().enumerate() {
        mailbox.push(demo_reply(vendor, index));
    }

    let since = since.unwrap_or_else(|| Utc::now() - Duration::hours(1));
    let stored = service.ingest_replies(&rfp.id, Some(since)).await?;
    println!("\nIngested {} vendor repl(ies)", stored.len());
    for proposal in &stored {
        let price = proposal
            .extraction
            .total_price
            .map(|value| format!("${value:.0}"))
            .unwrap_or_else(|| "unpriced".to_string());
        let delivery = proposal
            .extraction
            .delivery_days
            .map(|days| format!("{days} days"))
            .unwrap_or_else(|| "unspecified".to_string());
        println!(
            "- {}: {} | delivery {} | warranty {}",
            proposal.vendor_name,
            price,
            delivery,
            proposal.extraction.warranty.as_deref().unwrap_or("none"),
        );
    }

    let comparison = service.compare(&rfp.id).await?;
    println!("\nRanked proposals");
    for (rank, score) in comparison.data.scores.iter().enumerate() {
        println!(
            "{}. {} — overall {}/100 (price {}, delivery {}, terms {})",
            rank + 1,
            score.vendor_name,
            score.overall_score,
            score.price_score,
            score.delivery_score,
            score.terms_score
        );
        for pro in &score.pros {
            println!("   + {pro}");
        }
        for con in &score.cons {
            println!("   - {con}");
        }
    }

    let recommendation = &comparison.data.recommendation;
    println!("\nRecommendation: {}", recommendation.reasoning);
    if let Some(alternative) = &recommendation.alternative {
        println!("Alternative: {alternative}");
    }

    let awarded = service.award(&rfp.id, &recommendation.recommended_vendor_id)?;
    println!(
        "Awarded {} to {}",
        awarded.id.0, recommendation.recommended_vendor_id.0
    );

    Ok(())
}

fn load_vendors(
    service: &ProcurementService<
        InMemoryRfpRepository,
        InMemoryVendorDirectory,
        InMemoryProposalStore,
    >,
    directory: &Arc<InMemoryVendorDirectory>,
    vendors_csv: Option<PathBuf>,
) -> Result<Vec<VendorRecord>, AppError> {
    if let Some(path) = vendors_csv {
        let records = VendorDirectoryImporter::from_path(path)?;
        for record in &records {
            directory
                .insert(record.clone())
                .map_err(|err| AppError::Workflow(err.into()))?;
        }
        return Ok(records);
    }

    let mut records = Vec::new();
    for (name, email) in [
        ("Acme Supply", "acme@vendor.example"),
        ("Bolt Hardware", "bolt@vendor.example"),
    ] {
        let record = service.register_vendor(VendorSubmission {
            name: name.to_string(),
            email: email.to_string(),
            category: None,
        })?;
        records.push(record);
    }
    Ok(records)
}

fn load_attachment(path: Option<PathBuf>) -> Result<Vec<EmailAttachment>, AppError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let content = std::fs::read(&path)?;
    let content_type = mime_guess::from_path(&path).first_or_octet_stream();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());

    Ok(vec![EmailAttachment {
        file_name,
        content_type,
        content,
    }])
}

/// Deterministic canned replies so the demo exercises varied scoring inputs.
fn demo_reply(vendor: &VendorRecord, index: usize) -> InboundEmail {
    let price = 9_000 + (index as u32) * 1_800;
    let delivery_days = 10 + (index as u32) * 9;
    let warranty = if index % 2 == 0 {
        " All hardware ships with a 2 year warranty."
    } else {
        ""
    };

    InboundEmail {
        subject: "Re: Request for Proposal".to_string(),
        from_address: vendor.email.clone(),
        received_at: Utc::now(),
        text: format!(
            "Thank you for the opportunity. Our total is ${price} with delivery in \
{delivery_days} days. Net 30 payment, quote valid for 30 days.{warranty}"
        ),
        html: None,
        attachments: Vec::new(),
    }
}
