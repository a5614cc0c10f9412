//! Vendor directory intake from CSV exports (`Name,Email,Category`).

mod parser;

use crate::workflows::procurement::domain::{VendorId, VendorRecord};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum VendorImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for VendorImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VendorImportError::Io(err) => write!(f, "failed to read vendor export: {}", err),
            VendorImportError::Csv(err) => write!(f, "invalid vendor CSV data: {}", err),
        }
    }
}

impl std::error::Error for VendorImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VendorImportError::Io(err) => Some(err),
            VendorImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for VendorImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for VendorImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct VendorDirectoryImporter;

impl VendorDirectoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<VendorRecord>, VendorImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse a vendor export, normalizing names and lowercasing addresses.
    /// Duplicate addresses keep the first row seen.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<VendorRecord>, VendorImportError> {
        let mut seen_addresses: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for row in parser::parse_rows(reader)? {
            let name = normalize_name(&row.name);
            let email = row.email.to_lowercase();
            if !seen_addresses.insert(email.clone()) {
                continue;
            }

            records.push(VendorRecord {
                id: vendor_id_for_name(&name),
                name,
                email,
                category: row.category,
                active: true,
            });
        }

        Ok(records)
    }
}

fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Stable directory id derived from the display name.
pub fn vendor_id_for_name(name: &str) -> VendorId {
    let mut slug = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        VendorId("vendor-unnamed".to_string())
    } else {
        VendorId(format!("vendor-{}", trimmed))
    }
}
