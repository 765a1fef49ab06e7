use chrono::DateTime;
use tracing::{info, warn};

use storeseed_core::ResourceKind;
use storeseed_core::model::{Image, Product, ProductStatus, ResourceId, Variant};

use crate::client::{AdminClient, envelope, extract};
use crate::error::AdminResult;
use crate::inventory::{self, DEFAULT_AVAILABLE};

/// Publication time stamped on products when they are force-published.
pub const PUBLISHED_AT: &str = "2025-03-21T23:06:25-04:00";

/// Outcome of [`update_product_variant_data`].
#[derive(Debug)]
pub enum VariantUpdate {
    /// The update document has no variant with the requested id; nothing
    /// was sent.
    NotFound,
    Updated(VariantUpdateReport),
}

#[derive(Debug)]
pub struct VariantUpdateReport {
    pub variant: Variant,
    pub published: bool,
    pub inventory_updated: bool,
    /// `None` when the document carries no image.
    pub image_updated: Option<bool>,
}

async fn put_product(client: &AdminClient, product_id: &ResourceId, product: &Product) -> AdminResult<Product> {
    let endpoint = ResourceKind::Product.item_endpoint(product_id);
    let body = client.put(&endpoint, envelope("product", product)?).await?;
    extract(body, &endpoint, "product")
}

/// Replaces the product's fields with those in `document`.
pub async fn update_product(
    client: &AdminClient,
    product_id: &ResourceId,
    document: &Product,
) -> AdminResult<Product> {
    let updated = put_product(client, product_id, document).await?;
    info!(product_id = %product_id, "Updated product");
    Ok(updated)
}

/// Replaces every image of the product with the single image at `src`.
pub async fn update_product_image(
    client: &AdminClient,
    product_id: &ResourceId,
    src: &str,
) -> AdminResult<Product> {
    let change = Product {
        id: Some(product_id.clone()),
        images: Some(vec![Image {
            src: Some(src.to_string()),
            ..Default::default()
        }]),
        ..Default::default()
    };
    let updated = put_product(client, product_id, &change).await?;
    info!(product_id = %product_id, src, "Updated product image");
    Ok(updated)
}

/// Makes the product active and visible on every sales channel.
pub async fn update_product_status(client: &AdminClient, product_id: &ResourceId) -> AdminResult<Product> {
    let change = Product {
        id: Some(product_id.clone()),
        status: Some(ProductStatus::Active),
        published_scope: Some("global".to_string()),
        published_at: DateTime::parse_from_rfc3339(PUBLISHED_AT).ok(),
        ..Default::default()
    };
    let updated = put_product(client, product_id, &change).await?;
    info!(product_id = %product_id, "Product is now published");
    Ok(updated)
}

/// Pushes the variant `variant_id` from `document` to the store, then stocks
/// it and applies the document's first image.
///
/// The variant is matched by the string form of its id. The product is
/// published before the variant PUT; publishing, stocking and the image are
/// best-effort and only reported.
pub async fn update_product_variant_data(
    client: &AdminClient,
    product_id: &ResourceId,
    variant_id: &ResourceId,
    document: &Product,
) -> AdminResult<VariantUpdate> {
    let Some(selected) = document.find_variant(variant_id) else {
        warn!(product_id = %product_id, variant_id = %variant_id, "variant not found in update data");
        return Ok(VariantUpdate::NotFound);
    };

    let published = match update_product_status(client, product_id).await {
        Ok(_) => true,
        Err(e) => {
            warn!(product_id = %product_id, error = %e, "failed to publish product");
            false
        }
    };

    let endpoint = format!("products/{product_id}/variants/{variant_id}.json");
    let body = client.put(&endpoint, envelope("variant", selected)?).await?;
    let variant: Variant = extract(body, &endpoint, "variant")?;
    info!(product_id = %product_id, variant_id = %variant_id, "Updated variant");

    let inventory_updated =
        match inventory::update_inventory_quantity(client, variant_id, DEFAULT_AVAILABLE).await {
            Ok(_) => true,
            Err(e) => {
                warn!(variant_id = %variant_id, error = %e, "failed to update inventory quantity");
                false
            }
        };

    let image_updated = match document.first_image_src() {
        Some(src) => Some(match update_product_image(client, product_id, src).await {
            Ok(_) => true,
            Err(e) => {
                warn!(product_id = %product_id, error = %e, "failed to update product image");
                false
            }
        }),
        None => None,
    };

    Ok(VariantUpdate::Updated(VariantUpdateReport {
        variant,
        published,
        inventory_updated,
        image_updated,
    }))
}
