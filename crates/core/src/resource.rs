use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Resource categories the admin API exposes as top-level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    SmartCollection,
    CustomCollection,
    Product,
    Customer,
    Order,
}

impl ResourceKind {
    /// Key wrapping a single resource in request and response bodies.
    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::SmartCollection => "smart_collection",
            ResourceKind::CustomCollection => "custom_collection",
            ResourceKind::Product => "product",
            ResourceKind::Customer => "customer",
            ResourceKind::Order => "order",
        }
    }

    /// Key of the list in collection responses and in the local documents.
    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::SmartCollection => "smart_collections",
            ResourceKind::CustomCollection => "custom_collections",
            ResourceKind::Product => "products",
            ResourceKind::Customer => "customers",
            ResourceKind::Order => "orders",
        }
    }

    pub fn collection_endpoint(self) -> String {
        format!("{}.json", self.plural())
    }

    pub fn item_endpoint(self, id: impl std::fmt::Display) -> String {
        format!("{}/{id}.json", self.plural())
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ResourceKind::SmartCollection => "smart collection",
            ResourceKind::CustomCollection => "custom collection",
            ResourceKind::Product => "product",
            ResourceKind::Customer => "customer",
            ResourceKind::Order => "order",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "smart_collection" | "smart_collections" => Ok(ResourceKind::SmartCollection),
            "custom_collection" | "custom_collections" => Ok(ResourceKind::CustomCollection),
            "product" | "products" => Ok(ResourceKind::Product),
            "customer" | "customers" => Ok(ResourceKind::Customer),
            "order" | "orders" => Ok(ResourceKind::Order),
            _ => anyhow::bail!("unknown resource kind: {s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_use_plural_key() {
        assert_eq!(
            ResourceKind::CustomCollection.collection_endpoint(),
            "custom_collections.json"
        );
        assert_eq!(ResourceKind::Order.item_endpoint(42), "orders/42.json");
    }

    #[test]
    fn parses_singular_and_plural() {
        assert_eq!(
            "smart_collections".parse::<ResourceKind>().unwrap(),
            ResourceKind::SmartCollection
        );
        assert_eq!("Customer".parse::<ResourceKind>().unwrap(), ResourceKind::Customer);
        assert!("variant".parse::<ResourceKind>().is_err());
    }
}
