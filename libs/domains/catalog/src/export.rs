//! Bulk export of the product collection as JSON or CSV.

use chrono::{DateTime, Utc};
use database::DocumentId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{CatalogError, CatalogResult};

/// Product as read back for export.
///
/// Deserialization is deliberately lenient: documents written before
/// timestamps were recorded still export, with the missing fields left empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportedProduct {
    #[serde(rename = "_id", alias = "id")]
    pub id: DocumentId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub category_id: DocumentId,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One exported product row, with ids rendered as hex strings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductExportRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    pub category_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ExportedProduct> for ProductExportRecord {
    fn from(product: ExportedProduct) -> Self {
        Self {
            id: product.id.to_hex(),
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            category_id: product.category_id.to_hex(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Render export records as CSV.
///
/// The header row is fixed; absent descriptions and timestamps become empty
/// cells. Timestamps are RFC 3339, matching the JSON export.
pub fn records_to_csv(records: &[ProductExportRecord]) -> CatalogResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        "id",
        "name",
        "description",
        "price",
        "quantity",
        "category_id",
        "created_at",
        "updated_at",
    ])?;

    for record in records {
        let price = record.price.to_string();
        let quantity = record.quantity.to_string();
        let created_at = record
            .created_at
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();
        let updated_at = record
            .updated_at
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();

        writer.write_record([
            record.id.as_str(),
            record.name.as_str(),
            record.description.as_deref().unwrap_or(""),
            price.as_str(),
            quantity.as_str(),
            record.category_id.as_str(),
            created_at.as_str(),
            updated_at.as_str(),
        ])?;
    }

    // into_inner flushes the writer
    writer
        .into_inner()
        .map_err(|e| CatalogError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(name: &str) -> ProductExportRecord {
        ProductExportRecord {
            id: DocumentId::new().to_hex(),
            name: name.to_string(),
            description: Some("A sample product".to_string()),
            price: 9.99,
            quantity: 5,
            category_id: DocumentId::new().to_hex(),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    fn csv_lines(bytes: Vec<u8>) -> Vec<String> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_header_row_is_fixed() {
        let bytes = records_to_csv(&[]).unwrap();
        let lines = csv_lines(bytes);
        assert_eq!(
            lines,
            vec!["id,name,description,price,quantity,category_id,created_at,updated_at"]
        );
    }

    #[test]
    fn test_one_line_per_record() {
        let records = vec![
            sample_record("Widget"),
            sample_record("Gadget"),
            sample_record("Gizmo"),
        ];
        let bytes = records_to_csv(&records).unwrap();
        let lines = csv_lines(bytes);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with(&records[0].id));
        assert!(lines[3].starts_with(&records[2].id));
    }

    #[test]
    fn test_missing_optionals_become_empty_cells() {
        let mut record = sample_record("Widget");
        record.description = None;
        record.created_at = None;
        record.updated_at = None;

        let bytes = records_to_csv(&[record]).unwrap();
        let lines = csv_lines(bytes);
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[2], "");
        assert_eq!(fields[6], "");
        assert_eq!(fields[7], "");
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut record = sample_record("Nuts, assorted");
        record.description = Some("Mixed nuts, salted".to_string());

        let bytes = records_to_csv(&[record]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Nuts, assorted\""));
        assert!(text.contains("\"Mixed nuts, salted\""));
    }

    #[test]
    fn test_record_from_exported_product_renders_hex_ids() {
        let exported = ExportedProduct {
            id: DocumentId::new(),
            name: "Widget".to_string(),
            description: None,
            price: 1.5,
            quantity: 2,
            category_id: DocumentId::new(),
            created_at: None,
            updated_at: None,
        };
        let hex = exported.id.to_hex();
        let category_hex = exported.category_id.to_hex();

        let record = ProductExportRecord::from(exported);
        assert_eq!(record.id, hex);
        assert_eq!(record.category_id, category_hex);
        assert_eq!(record.id.len(), 24);
    }
}
