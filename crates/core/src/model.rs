use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Server-assigned identifier. The API returns numbers, hand-written seed
/// files sometimes quote them, so both forms are accepted and compared by
/// their string form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(u64),
    Text(String),
}

impl ResourceId {
    pub fn matches(&self, other: &ResourceId) -> bool {
        self.to_string() == other.to_string()
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{n}"),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for ResourceId {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other)
    }
}

impl Eq for ResourceId {}

impl Hash for ResourceId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        ResourceId::Number(id)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Text(id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// A free-form scalar such as a price, SKU or option value. The API sends
/// prices as strings while hand-written files often use bare numbers; both
/// are accepted and written back in the form they were read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Flag(bool),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Draft,
    Archived,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Comma-separated string or list, kept as written.
    pub tags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ProductOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<Variant>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn variants(&self) -> &[Variant] {
        self.variants.as_deref().unwrap_or_default()
    }

    pub fn images(&self) -> &[Image] {
        self.images.as_deref().unwrap_or_default()
    }

    pub fn first_variant_id(&self) -> Option<&ResourceId> {
        self.variants().first().and_then(|v| v.id.as_ref())
    }

    /// Finds a variant by id, comparing the string forms.
    pub fn find_variant(&self, variant_id: &ResourceId) -> Option<&Variant> {
        self.variants()
            .iter()
            .find(|v| v.id.as_ref().is_some_and(|id| id.matches(variant_id)))
    }

    pub fn first_image_src(&self) -> Option<&str> {
        self.images().first().and_then(|i| i.src.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Scalar>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option1: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option2: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option3: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_item_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_quantity: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Customers and collections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Scalar>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Custom and smart collections share one shape; smart ones carry `rules`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<CollectionRule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disjunctive: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRule {
    pub column: String,
    pub relation: String,
    pub condition: Scalar,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Order {
    pub fn line_items(&self) -> &[LineItem] {
        self.line_items.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Scalar>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_id_compares_by_string_form() {
        let numeric = ResourceId::from(808950810);
        let quoted = ResourceId::from("808950810");
        assert_eq!(numeric, quoted);
        assert_ne!(numeric, ResourceId::from(1));
    }

    #[test]
    fn deserialize_product_with_variants() {
        let json = r#"{
            "id": 632910392,
            "title": "IPod Nano - 8GB",
            "status": "active",
            "published_at": "2025-03-21T23:06:25-04:00",
            "variants": [
                {"id": 808950810, "option1": "Pink", "price": "199.00", "inventory_item_id": 808950810},
                {"id": "49148385", "option1": "Red"}
            ],
            "images": [{"src": "https://example.com/ipod.png"}],
            "handle": "ipod-nano"
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.title.as_deref(), Some("IPod Nano - 8GB"));
        assert_eq!(p.status, Some(ProductStatus::Active));
        assert_eq!(p.variants().len(), 2);
        assert_eq!(p.first_variant_id(), Some(&ResourceId::Number(808950810)));
        assert!(p.find_variant(&ResourceId::from(49148385)).is_some());
        assert!(p.find_variant(&ResourceId::from(1)).is_none());
        assert_eq!(p.first_image_src(), Some("https://example.com/ipod.png"));
        assert_eq!(p.extra.get("handle"), Some(&Value::from("ipod-nano")));
    }

    #[test]
    fn product_without_variants() {
        let p: Product = serde_json::from_str(r#"{"title":"Bare"}"#).unwrap();
        assert!(p.variants().is_empty());
        assert!(p.first_variant_id().is_none());
        assert!(p.first_image_src().is_none());
    }

    #[test]
    fn unknown_fields_survive_reserialization() {
        let json = r#"{"id":1,"email":"bob@example.com","tags":"vip","addresses":[{"city":"Ottawa"}]}"#;
        let c: Customer = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&c).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn hand_written_scalars_are_accepted() {
        let json = r#"{
            "title": "Burton Custom Freestyle 151",
            "tags": ["Barnes & Noble", "Big Air"],
            "options": [{"name": "Size", "values": [151, 155]}],
            "variants": [
                {"option1": 151, "price": 19.99, "sku": 1001, "inventory_quantity": "30"},
                {"option1": "155", "price": "21.00"}
            ]
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        let v = &p.variants()[0];
        assert_eq!(v.price.as_ref().map(ToString::to_string), Some("19.99".to_string()));
        assert_eq!(v.option1, Some(Scalar::from(151)));
        assert_eq!(p.variants()[1].price, Some(Scalar::from("21.00")));

        let back = serde_json::to_value(&p).unwrap();
        let original: Value = serde_json::from_str(json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn deserialize_order_line_items() {
        let json = r#"{
            "id": 450789469,
            "financial_status": "paid",
            "line_items": [{"id": 466157049, "variant_id": 39072856, "quantity": 2}]
        }"#;
        let o: Order = serde_json::from_str(json).unwrap();
        assert_eq!(o.line_items().len(), 1);
        assert_eq!(o.line_items()[0].quantity, Some(2));
    }

    #[test]
    fn deserialize_smart_collection_rules() {
        let json = r#"{
            "title": "Macbooks",
            "rules": [{"column": "vendor", "relation": "equals", "condition": "Apple"}]
        }"#;
        let c: Collection = serde_json::from_str(json).unwrap();
        let rules = c.rules.unwrap();
        assert_eq!(rules[0].condition, Scalar::from("Apple"));
    }
}
