use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct VendorRow {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) category: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<VendorRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<CsvRow>() {
        let row = record?;
        let name = row.name.trim().to_string();
        let email = row.email.trim().to_string();
        if name.is_empty() || email.is_empty() {
            continue;
        }

        rows.push(VendorRow {
            name,
            email,
            category: row.category,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
