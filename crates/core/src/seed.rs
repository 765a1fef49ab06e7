use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Collection, Customer, Product};

/// Input document the batch flows read their payloads from.
///
/// Every key is optional: an absent list seeds nothing and an absent update
/// document skips that update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub smart_collections: Vec<Collection>,
    #[serde(default)]
    pub custom_collections: Vec<Collection>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    /// Single product created on its own; target of `update_product`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    /// Single product with options; target of the variant update chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_with_options: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_product: Option<ProductDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_product_with_options: Option<ProductDocument>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A product update document, written either bare or wrapped the way the
/// API wraps it (`{"product": {...}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductDocument {
    Wrapped { product: Product },
    Bare(Product),
}

impl ProductDocument {
    pub fn product(&self) -> &Product {
        match self {
            ProductDocument::Wrapped { product } | ProductDocument::Bare(product) => product,
        }
    }

    pub fn into_product(self) -> Product {
        match self {
            ProductDocument::Wrapped { product } | ProductDocument::Bare(product) => product,
        }
    }
}
