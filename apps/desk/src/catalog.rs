//! Inventory loading for the desk.
//!
//! The inventory file is a JSON array of catalog items. Without one the
//! desk offers a small built-in sample catalog.

use std::path::Path;

use tally_core::{CatalogItem, Money, Percent};
use tracing::info;

use crate::error::{DeskError, DeskResult};

/// Reads a JSON array of catalog items.
pub fn load_inventory(path: &Path) -> DeskResult<Vec<CatalogItem>> {
    let contents = std::fs::read_to_string(path).map_err(|e| DeskError::Inventory {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let items: Vec<CatalogItem> =
        serde_json::from_str(&contents).map_err(|e| DeskError::Inventory {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    info!(?path, count = items.len(), "Inventory loaded");
    Ok(items)
}

/// The built-in sample catalog.
pub fn sample_catalog() -> Vec<CatalogItem> {
    vec![
        sample_item(
            1,
            "LAPTOP001",
            "Gaming Laptop",
            "High-performance gaming laptop with RTX graphics",
            "85000",
            5,
            10,
        ),
        sample_item(
            2,
            "MOUSE001",
            "Wireless Gaming Mouse",
            "RGB lighting, 16000 DPI, ergonomic design",
            "2500",
            10,
            50,
        ),
        sample_item(
            3,
            "KEYBOARD001",
            "Mechanical Keyboard",
            "Cherry MX switches, backlit keys, compact design",
            "8500",
            0,
            25,
        ),
        sample_item(
            4,
            "MONITOR001",
            "4K Monitor",
            "27-inch 4K UHD monitor with HDR support",
            "35000",
            5,
            15,
        ),
        sample_item(
            5,
            "CHAIR001",
            "Gaming Chair",
            "Ergonomic chair with lumbar support and adjustable armrests",
            "15000",
            0,
            30,
        ),
    ]
}

fn sample_item(
    id: i64,
    sku: &str,
    name: &str,
    description: &str,
    price: &str,
    discount: u32,
    stock: i64,
) -> CatalogItem {
    CatalogItem {
        id,
        sku: sku.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price: Money::from_input(price),
        tax_rate: Percent::from_whole(18),
        default_discount_rate: Percent::from_whole(discount),
        category: "Electronics".to_string(),
        unit: "piece".to_string(),
        stock_quantity: stock,
        display_text: CatalogItem::compose_display_text(name, sku),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::InventoryIndex;

    #[test]
    fn test_sample_catalog_is_searchable() {
        let index = InventoryIndex::new(sample_catalog());
        assert_eq!(index.len(), 5);

        let hits = index.search("gaming");
        let skus: Vec<&str> = hits.iter().map(|item| item.sku.as_str()).collect();
        assert_eq!(skus, vec!["LAPTOP001", "MOUSE001", "CHAIR001"]);

        let monitor = index.find_by_sku("MONITOR001").unwrap();
        assert_eq!(monitor.label(), "4K Monitor (MONITOR001)");
        assert_eq!(monitor.price, Money::from_input("35000"));
    }

    #[test]
    fn test_load_inventory_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        std::fs::write(
            &path,
            r#"[{"id": 9, "sku": "CABLE01", "name": "HDMI Cable", "price": 450}]"#,
        )
        .unwrap();

        let items = load_inventory(&path).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label(), "HDMI Cable (CABLE01)");
        assert_eq!(items[0].unit, "nos");
    }

    #[test]
    fn test_load_inventory_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_inventory(&missing),
            Err(DeskError::Inventory { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{not json").unwrap();
        assert!(matches!(load_inventory(&bad), Err(DeskError::Inventory { .. })));
    }
}
