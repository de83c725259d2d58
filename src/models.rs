//! Product record and item-code helpers

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Prefix shared by every generated item code
pub const ITEM_CODE_PREFIX: &str = "ITM";

/// One inventory line item
///
/// Field order matches the snapshot file: `name`, `price`, `stock`, `item_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    #[serde(deserialize_with = "deserialize_stock")]
    pub stock: u32,
    pub item_code: String,
}

/// Accepts whole numbers written either as integers or as floats (`5.0`)
fn deserialize_stock<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if raw.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&raw) {
        Ok(raw as u32)
    } else {
        Err(de::Error::custom(format!(
            "stock must be a whole number between 0 and {}, got {}",
            u32::MAX,
            raw
        )))
    }
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        stock: u32,
        item_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
            item_code: item_code.into(),
        }
    }

    /// Monetary value of the units on hand
    pub fn value(&self) -> f64 {
        self.price * f64::from(self.stock)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Code: {:<6} | Name: {:<20} | Price: Rs{:7.2} | Stock: {:>5}",
            self.item_code, self.name, self.price, self.stock
        )
    }
}

/// Numeric suffix of an `ITM###` code, or `None` for any other shape
pub fn item_code_number(code: &str) -> Option<u64> {
    let digits = code.strip_prefix(ITEM_CODE_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Format a sequence number as an item code, zero-padded to three digits
pub fn format_item_code(number: u64) -> String {
    format!("{}{:03}", ITEM_CODE_PREFIX, number)
}
