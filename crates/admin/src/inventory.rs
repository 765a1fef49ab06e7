use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use storeseed_core::model::{Location, ResourceId, Variant};

use crate::client::{AdminClient, extract};
use crate::error::{AdminError, AdminResult};

/// Available quantity the variant update chain stocks each variant with.
pub const DEFAULT_AVAILABLE: i64 = 30;

const SET_LEVEL_ENDPOINT: &str = "inventory_levels/set.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryLevel {
    pub inventory_item_id: Option<ResourceId>,
    pub location_id: Option<ResourceId>,
    pub available: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct SetLevel<'a> {
    location_id: &'a ResourceId,
    inventory_item_id: &'a ResourceId,
    available: i64,
}

/// The store's first location.
pub async fn get_location_id(client: &AdminClient) -> AdminResult<ResourceId> {
    let locations: Vec<Location> = client.get_list("locations.json", "locations").await?;
    locations
        .into_iter()
        .find_map(|l| l.id)
        .ok_or_else(|| AdminError::NotFound("store has no locations".to_string()))
}

pub async fn get_variant_inventory_item_id(
    client: &AdminClient,
    variant_id: &ResourceId,
) -> AdminResult<ResourceId> {
    let variant: Variant = client
        .get_resource(&format!("variants/{variant_id}.json"), "variant")
        .await?;
    variant.inventory_item_id.ok_or_else(|| {
        AdminError::NotFound(format!("inventory item of variant {variant_id}"))
    })
}

/// Sets the available quantity of a variant's inventory item at the store's
/// first location.
pub async fn update_inventory_quantity(
    client: &AdminClient,
    variant_id: &ResourceId,
    available: i64,
) -> AdminResult<InventoryLevel> {
    let location_id = get_location_id(client).await.inspect_err(|e| {
        warn!(variant_id = %variant_id, error = %e, "missing location id");
    })?;
    let inventory_item_id = get_variant_inventory_item_id(client, variant_id)
        .await
        .inspect_err(|e| {
            warn!(variant_id = %variant_id, error = %e, "missing inventory item id");
        })?;

    let body = serde_json::to_value(SetLevel {
        location_id: &location_id,
        inventory_item_id: &inventory_item_id,
        available,
    })?;
    let resp = client.post(SET_LEVEL_ENDPOINT, Some(body)).await?;
    let level = extract(resp, SET_LEVEL_ENDPOINT, "inventory_level")?;
    info!(variant_id = %variant_id, available, "Updated inventory");
    Ok(level)
}
