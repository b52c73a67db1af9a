use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::models::Product;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The in-memory product catalog. Built once at startup, never mutated.
///
/// Products keep the order of the source document, and every lookup is a
/// linear scan over that order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Read and parse the catalog file. Any failure is fatal to the caller;
    /// no partial catalog is ever returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let start = Instant::now();

        let raw = std::fs::read(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            count = catalog.len(),
            path = %path.display(),
            elapsed_ms = start.elapsed().as_millis(),
            "Loaded product catalog"
        );
        Ok(catalog)
    }

    /// Parse a JSON array of products.
    pub fn from_json(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw).map(Self::new)
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// First product with this id, in load order. Duplicate ids after the
    /// first are unreachable through this lookup.
    pub fn find_by_id(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Every product with `price > threshold`, in load order.
    pub fn priced_above(&self, threshold: f64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_priced_above(threshold))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn make(id: i64, name: &str, price: f64) -> Product {
        Product {
            id,
            name: name.to_string(),
            quantity: 5,
            code_value: format!("C{id}"),
            is_published: id % 2 == 0,
            expiration: "01/01/2030".to_string(),
            price,
        }
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            make(3, "Gamma", 250.0),
            make(1, "Alpha", 10.0),
            make(2, "Beta", 99.5),
            make(1, "Alpha duplicate", 500.0),
        ])
    }

    // ── Parsing ────────────────────────────────────────────────────────────────

    #[test]
    fn from_json_preserves_document_order() {
        let raw = br#"[{"id": 9, "price": 1.0}, {"id": 4, "price": 2.0}, {"id": 6}]"#;
        let catalog = Catalog::from_json(raw).unwrap();
        let ids: Vec<i64> = catalog.all().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 4, 6]);
    }

    #[test]
    fn from_json_accepts_empty_array() {
        let catalog = Catalog::from_json(b"[]").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn from_json_rejects_non_array_document() {
        assert!(Catalog::from_json(br#"{"id": 1}"#).is_err());
        assert!(Catalog::from_json(b"not json").is_err());
    }

    // ── Lookup ─────────────────────────────────────────────────────────────────

    #[test]
    fn find_by_id_returns_matching_product() {
        let catalog = sample();
        assert_eq!(catalog.find_by_id(2).map(|p| p.name.as_str()), Some("Beta"));
    }

    #[test]
    fn find_by_id_first_duplicate_wins() {
        let catalog = sample();
        let found = catalog.find_by_id(1).unwrap();
        assert_eq!(found.name, "Alpha", "First product in load order must win");
    }

    #[test]
    fn find_by_id_missing_is_none() {
        assert!(sample().find_by_id(42).is_none());
    }

    // ── Price filter ───────────────────────────────────────────────────────────

    #[test]
    fn priced_above_keeps_catalog_order() {
        let catalog = sample();
        let names: Vec<&str> = catalog
            .priced_above(50.0)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Gamma", "Beta", "Alpha duplicate"]);
    }

    #[test]
    fn priced_above_excludes_equal_price() {
        let catalog = sample();
        let ids: Vec<i64> = catalog.priced_above(250.0).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn priced_above_can_be_empty() {
        assert!(sample().priced_above(1_000.0).is_empty());
    }

    #[test]
    fn priced_above_is_subset_of_catalog() {
        let catalog = sample();
        for threshold in [-1.0, 0.0, 10.0, 99.5, 250.0, 499.99, f64::INFINITY] {
            let matched = catalog.priced_above(threshold);
            let expected: Vec<&Product> =
                catalog.all().iter().filter(|p| p.price > threshold).collect();
            assert_eq!(matched, expected, "threshold {threshold}");
            assert!(matched.len() <= catalog.len());
        }
    }

    // ── Loading from disk ──────────────────────────────────────────────────────

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1, "name": "Disk", "price": 3.5}}]"#).unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.all()[0].name, "Disk");
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }), "got {err:?}");
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1,"#).unwrap();

        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }), "got {err:?}");
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
