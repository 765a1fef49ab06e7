use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Collection, Customer, Order, Product};
use crate::resource::ResourceKind;

/// Records returned by the API for everything a session created, keyed by
/// resource-type name. Written wholesale to the save file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub smart_collections: Vec<Collection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_collections: Vec<Collection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customers: Vec<Customer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_with_options: Option<Product>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SavedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.smart_collections.is_empty()
            && self.custom_collections.is_empty()
            && self.products.is_empty()
            && self.customers.is_empty()
            && self.orders.is_empty()
            && self.product.is_none()
            && self.product_with_options.is_none()
            && self.extra.is_empty()
    }

    /// Number of records held for a resource kind, counting the single
    /// `product` entries as products.
    pub fn count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::SmartCollection => self.smart_collections.len(),
            ResourceKind::CustomCollection => self.custom_collections.len(),
            ResourceKind::Product => {
                self.products.len()
                    + usize::from(self.product.is_some())
                    + usize::from(self.product_with_options.is_some())
            }
            ResourceKind::Customer => self.customers.len(),
            ResourceKind::Order => self.orders.len(),
        }
    }
}
