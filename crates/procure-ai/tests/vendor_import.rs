//! Integration checks for the vendor directory CSV importer.

use std::io::Cursor;

use procure_ai::workflows::procurement::VendorId;
use procure_ai::workflows::vendors::{VendorDirectoryImporter, VendorImportError};

#[test]
fn import_builds_directory_records_from_an_export() {
    let csv = "Name,Email,Category\n\
Acme Office Supply,sales@acme.example,furniture\n\
Brightline Tech,quotes@Brightline.example,compute\n\
Northwind Traders,rfp@northwind.example,\n";

    let records = VendorDirectoryImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].id, VendorId("vendor-acme-office-supply".into()));
    assert_eq!(records[1].email, "quotes@brightline.example");
    assert_eq!(records[2].category, None);
    assert!(records.iter().all(|record| record.active));
}

#[test]
fn import_tolerates_messy_exports() {
    let csv = "Name,Email,Category\n\
  Acme   Office  Supply  ,  sales@acme.example , furniture \n\
,orphan@vendor.example,\n\
No Email Vendor,,\n\
Acme Again,SALES@ACME.example,duplicates\n";

    let records = VendorDirectoryImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Acme Office Supply");
    assert_eq!(records[0].email, "sales@acme.example");
}

#[test]
fn import_surfaces_io_failures() {
    let error =
        VendorDirectoryImporter::from_path("./missing-vendors.csv").expect_err("io error expected");
    assert!(matches!(error, VendorImportError::Io(_)));
}
