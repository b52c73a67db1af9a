use serde::{Deserialize, Deserializer, Serialize};

/// Core catalog entity, deserialized as-is from the catalog file.
///
/// Missing or `null` fields fall back to their zero value and unknown fields
/// are ignored; only a wrong JSON type for a known field is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub code_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_published: bool,
    /// Free-form date text, never parsed.
    #[serde(deserialize_with = "null_as_default")]
    pub expiration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Product {
    pub fn is_priced_above(&self, threshold: f64) -> bool {
        self.price > threshold
    }
}

// ── Query parameters ──────────────────────────────────────────────────────────

/// Raw `?priceGt=` value. Kept as text so the handler owns the 400 message
/// instead of axum's plaintext query rejection.
#[derive(Debug, Default)]
pub struct PriceFilter {
    pub price_gt: Option<String>,
}

impl PriceFilter {
    /// Build from decoded query pairs. A repeated `priceGt` keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let price_gt = pairs
            .into_iter()
            .find(|(key, _)| key == "priceGt")
            .map(|(_, value)| value);
        Self { price_gt }
    }
}
