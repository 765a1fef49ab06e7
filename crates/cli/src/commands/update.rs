use anyhow::Result;
use tracing::{info, warn};

use storeseed_admin::products::{self, VariantUpdate};
use storeseed_core::SeedData;

use crate::session::{Session, tolerate};

/// Applies `update_product` to the saved `product` record and
/// `update_product_with_options` to the saved `product_with_options` record,
/// including the variant chain for its first variant, then saves.
pub async fn run(session: &mut Session) -> Result<()> {
    session.ensure_state().await?;
    let seed: SeedData = session.seed.load().await?;
    let client = &session.client;

    let target = session.state.product.as_ref().and_then(|p| p.id.clone());
    match (target, seed.update_product.as_ref()) {
        (Some(product_id), Some(document)) => {
            let result = products::update_product(client, &product_id, document.product()).await;
            if let Some(updated) = tolerate(result, "product update")? {
                session.state.product = Some(updated);
            }
        }
        (None, _) => warn!("no saved `product` record, run create first"),
        (_, None) => warn!("seed file has no `update_product` document"),
    }

    let Some(record) = session.state.product_with_options.clone() else {
        warn!("no saved `product_with_options` record, run create first");
        return save(session).await;
    };
    let Some(document) = seed.update_product_with_options.as_ref() else {
        warn!("seed file has no `update_product_with_options` document");
        return save(session).await;
    };
    let Some(product_id) = record.id.as_ref() else {
        warn!("saved `product_with_options` has no id");
        return save(session).await;
    };

    let result = products::update_product(client, product_id, document.product()).await;
    if let Some(updated) = tolerate(result, "product update")? {
        session.state.product_with_options = Some(updated);
    }

    match record.first_variant_id() {
        Some(variant_id) => {
            let result =
                products::update_product_variant_data(client, product_id, variant_id, document.product())
                    .await;
            match tolerate(result, "variant update")? {
                Some(VariantUpdate::Updated(report)) => {
                    info!(
                        variant_id = %variant_id,
                        published = report.published,
                        inventory_updated = report.inventory_updated,
                        image_updated = ?report.image_updated,
                        "Variant updated"
                    );
                }
                Some(VariantUpdate::NotFound) => {
                    println!("Variant {variant_id} not found in update data!");
                }
                None => {}
            }
        }
        None => warn!(product_id = %product_id, "saved product has no variant"),
    }

    save(session).await
}

async fn save(session: &Session) -> Result<()> {
    session.save.save(&session.state).await
}
