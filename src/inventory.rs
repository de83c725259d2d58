//! In-memory inventory and the operations on it
//!
//! Every operation is synchronous and works on the collection in place.
//! Persisting the result is the caller's job (see [`crate::storage`]).

use crate::error::Rejection;
use crate::models::{format_item_code, item_code_number, Product};
use serde::{Deserialize, Serialize};

/// Stock level below which a product counts as low on stock
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Ordered collection of products, unique by item code and by
/// case-insensitive name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list as-is (used when loading a snapshot)
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    fn position_by_code(&self, code: &str) -> Option<usize> {
        let code = code.trim();
        self.products
            .iter()
            .position(|p| p.item_code.eq_ignore_ascii_case(code))
    }

    /// Find a product by item code (trimmed, case-insensitive)
    pub fn find_by_code(&self, code: &str) -> Option<&Product> {
        self.position_by_code(code).map(|idx| &self.products[idx])
    }

    /// Find a product by exact name, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let wanted = name.to_lowercase();
        self.products
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }

    /// Next item code: highest existing `ITM###` number plus one.
    ///
    /// Gaps left by deleted products are never reused. Codes that don't match
    /// the `ITM###` shape are ignored. Fails only when the highest existing
    /// number is already `u64::MAX`.
    pub fn generate_code(&self) -> Result<String, Rejection> {
        let next = match self
            .products
            .iter()
            .filter_map(|p| item_code_number(&p.item_code))
            .max()
        {
            Some(max) => max.checked_add(1).ok_or(Rejection::CodeSpaceExhausted)?,
            None => 1,
        };
        Ok(format_item_code(next))
    }

    /// Add a new product with a freshly generated code.
    ///
    /// Rejected without touching the inventory when the price is not a
    /// positive number, the stock is negative, the name is already taken, or
    /// no further item code can be issued.
    pub fn add(&mut self, name: &str, price: f64, stock: i64) -> Result<&Product, Rejection> {
        validate_price(price)?;
        let stock = validate_stock(stock)?;
        if let Some(existing) = self.find_by_name(name) {
            return Err(Rejection::DuplicateName(existing.name.clone()));
        }

        let code = self.generate_code()?;
        let product = Product::new(name, price, stock, code);
        self.products.push(product);
        Ok(&self.products[self.products.len() - 1])
    }

    /// Change the stock and/or price of an existing product.
    ///
    /// Both provided values are validated before either is written, so a bad
    /// price never leaves a new stock level behind. `None` keeps the field.
    pub fn update_details(
        &mut self,
        code: &str,
        new_stock: Option<i64>,
        new_price: Option<f64>,
    ) -> Result<&Product, Rejection> {
        let idx = self
            .position_by_code(code)
            .ok_or_else(|| Rejection::NotFound(code.trim().to_uppercase()))?;

        let stock = new_stock.map(validate_stock).transpose()?;
        if let Some(price) = new_price {
            validate_price(price)?;
        }

        let product = &mut self.products[idx];
        if let Some(stock) = stock {
            product.stock = stock;
        }
        if let Some(price) = new_price {
            product.price = price;
        }
        Ok(&*product)
    }

    /// Remove the product with the given code, returning it if it existed
    pub fn delete(&mut self, code: &str) -> Option<Product> {
        self.position_by_code(code)
            .map(|idx| self.products.remove(idx))
    }

    /// Sum of price * stock over every product
    pub fn total_value(&self) -> f64 {
        self.products.iter().map(Product::value).sum()
    }

    /// Products whose stock is strictly below `threshold`, in inventory order
    pub fn low_stock_items(&self, threshold: u32) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.stock < threshold)
            .collect()
    }

    /// All products ordered by item code (lexicographic)
    pub fn sorted_by_code(&self) -> Vec<&Product> {
        let mut sorted: Vec<&Product> = self.products.iter().collect();
        sorted.sort_by(|a, b| a.item_code.cmp(&b.item_code));
        sorted
    }
}

fn validate_price(price: f64) -> Result<(), Rejection> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(Rejection::InvalidPrice)
    }
}

fn validate_stock(stock: i64) -> Result<u32, Rejection> {
    if stock < 0 {
        return Err(Rejection::NegativeStock);
    }
    u32::try_from(stock).map_err(|_| Rejection::StockOutOfRange)
}
