use anyhow::{Context, Result};
use tracing::{error, info, warn};

use storeseed_admin::AdminClient;
use storeseed_admin::resources::{create_orders_into, create_resource, create_resources_into};
use storeseed_core::model::Product;
use storeseed_core::{ResourceKind, SavedState, SeedData};

use crate::progress;
use crate::session::{Session, tolerate};

/// Creates everything the seed file lists, orders last, and saves the
/// returned records over the save file.
///
/// When a request fails fatally partway through, the records created up to
/// that point are still saved before the error is returned.
pub async fn run(session: &mut Session) -> Result<()> {
    let seed: SeedData = session.seed.load().await?;

    let spinner = progress::create_spinner("Creating resources...");
    let mut state = SavedState::new();
    let result = create_all(&session.client, &seed, &mut state).await;
    spinner.finish_and_clear();

    let saved = session
        .save
        .save(&state)
        .await
        .with_context(|| {
            format!(
                "failed to save created records to {}",
                session.save.path().display()
            )
        });
    session.state = state;
    if let Err(e) = result {
        match &saved {
            Ok(()) => warn!(
                save_file = %session.save.path().display(),
                "creation stopped early, records created so far were saved"
            ),
            Err(save_err) => error!(
                error = %format!("{save_err:#}"),
                "creation stopped early and nothing was saved"
            ),
        }
        return Err(e);
    }
    saved?;

    for kind in [
        ResourceKind::SmartCollection,
        ResourceKind::CustomCollection,
        ResourceKind::Product,
        ResourceKind::Customer,
        ResourceKind::Order,
    ] {
        println!("  {:<20} {}", kind.plural(), session.state.count(kind));
    }

    info!(save_file = %session.save.path().display(), "Batch creation completed");
    Ok(())
}

async fn create_all(client: &AdminClient, seed: &SeedData, state: &mut SavedState) -> Result<()> {
    create_resources_into(
        client,
        ResourceKind::SmartCollection,
        &seed.smart_collections,
        &mut state.smart_collections,
    )
    .await?;
    create_resources_into(
        client,
        ResourceKind::CustomCollection,
        &seed.custom_collections,
        &mut state.custom_collections,
    )
    .await?;
    create_resources_into(client, ResourceKind::Product, &seed.products, &mut state.products).await?;
    create_resources_into(client, ResourceKind::Customer, &seed.customers, &mut state.customers).await?;
    state.product = create_single(client, seed.product.as_ref()).await?;
    state.product_with_options = create_single(client, seed.product_with_options.as_ref()).await?;
    create_orders_into(client, &state.customers, &state.products, &mut state.orders).await?;
    Ok(())
}

async fn create_single(client: &AdminClient, entry: Option<&Product>) -> Result<Option<Product>> {
    match entry {
        Some(product) => tolerate(
            create_resource(client, ResourceKind::Product, product).await,
            "product creation",
        ),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use storeseed_admin::Method;
    use storeseed_admin::mock::{MockTransport, Reply};
    use storeseed_core::model::ResourceId;

    use super::*;
    use crate::session::testing;

    #[tokio::test]
    async fn one_customer_one_product_makes_one_order() {
        let dir = tempfile::tempdir().unwrap();
        testing::write_seed(
            dir.path(),
            json!({
                "products": [{"title": "Snowboard", "variants": [{"price": "10.00"}]}],
                "customers": [{"email": "steve.lastnameson@example.com"}]
            }),
        );
        let mock = Arc::new(
            MockTransport::new()
                .on(
                    Method::POST,
                    "products.json",
                    Reply::ok(json!({"product": {
                        "id": 1072481042,
                        "title": "Snowboard",
                        "variants": [{"id": 1070325053, "price": "10.00"}]
                    }})),
                )
                .on(
                    Method::POST,
                    "customers.json",
                    Reply::ok(json!({"customer": {"id": 1073339460, "email": "steve.lastnameson@example.com"}})),
                )
                .on(
                    Method::POST,
                    "orders.json",
                    Reply::ok(json!({"order": {
                        "id": 1073459962,
                        "line_items": [{"id": 1, "variant_id": 1070325053, "quantity": 1}]
                    }})),
                ),
        );
        let mut session = testing::session(&mock, dir.path());

        run(&mut session).await.unwrap();

        let orders = mock.calls_to(Method::POST, "orders.json");
        assert_eq!(orders.len(), 1);
        assert_eq!(
            orders[0].payload,
            Some(json!({"order": {
                "customer": {"id": 1073339460},
                "line_items": [{"variant_id": 1070325053, "quantity": 1}]
            }}))
        );
        assert_eq!(mock.calls_to(Method::POST, "smart_collections.json").len(), 0);

        assert_eq!(session.state.orders.len(), 1);
        let saved: SavedState = session.save.load().await.unwrap();
        assert_eq!(saved, session.state);
        assert_eq!(
            saved.orders[0].line_items()[0].variant_id,
            Some(ResourceId::from(1070325053))
        );
    }

    #[tokio::test]
    async fn rejected_products_are_left_out() {
        let dir = tempfile::tempdir().unwrap();
        testing::write_seed(
            dir.path(),
            json!({
                "products": [{"title": ""}],
                "customers": [{"email": "a@example.com"}],
                "product": {"title": "Single", "variants": [{"price": "1.00"}]}
            }),
        );
        let mock = Arc::new(
            MockTransport::new()
                .on(Method::POST, "products.json", Reply::status(422))
                .on(
                    Method::POST,
                    "products.json",
                    Reply::ok(json!({"product": {"id": 5, "title": "Single"}})),
                )
                .on(
                    Method::POST,
                    "customers.json",
                    Reply::ok(json!({"customer": {"id": 9}})),
                ),
        );
        let mut session = testing::session(&mock, dir.path());

        run(&mut session).await.unwrap();

        assert!(session.state.products.is_empty());
        assert_eq!(session.state.customers.len(), 1);
        assert_eq!(
            session.state.product.as_ref().and_then(|p| p.id.clone()),
            Some(ResourceId::from(5))
        );
        assert!(mock.calls_to(Method::POST, "orders.json").is_empty());
    }

    #[tokio::test]
    async fn missing_seed_file_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockTransport::new());
        let mut session = testing::session(&mock, dir.path());

        run(&mut session).await.unwrap();

        assert!(mock.calls().is_empty());
        assert!(session.state.is_empty());
        let raw = std::fs::read_to_string(dir.path().join("save.json")).unwrap();
        assert_eq!(raw, "{}");
    }

    #[tokio::test]
    async fn numeric_price_seed_is_created() {
        let dir = tempfile::tempdir().unwrap();
        testing::write_seed(
            dir.path(),
            json!({
                "customers": [{"email": "steve.lastnameson@example.com"}],
                "products": [{"title": "Snowboard", "variants": [{"price": 19.99}]}]
            }),
        );
        let mock = Arc::new(
            MockTransport::new()
                .on(
                    Method::POST,
                    "products.json",
                    Reply::ok(json!({"product": {"id": 1, "variants": [{"id": 11, "price": "19.99"}]}})),
                )
                .on(
                    Method::POST,
                    "customers.json",
                    Reply::ok(json!({"customer": {"id": 2}})),
                )
                .on(
                    Method::POST,
                    "orders.json",
                    Reply::ok(json!({"order": {"id": 3}})),
                ),
        );
        let mut session = testing::session(&mock, dir.path());

        run(&mut session).await.unwrap();

        assert_eq!(
            mock.calls_to(Method::POST, "products.json")[0].payload,
            Some(json!({"product": {"title": "Snowboard", "variants": [{"price": 19.99}]}}))
        );
        assert_eq!(session.state.customers.len(), 1);
        assert_eq!(session.state.orders.len(), 1);
    }

    #[tokio::test]
    async fn mismatched_seed_keeps_save_file() {
        let dir = tempfile::tempdir().unwrap();
        let saved = json!({"orders": [{"id": 1}]}).to_string();
        std::fs::write(dir.path().join("save.json"), &saved).unwrap();
        testing::write_seed(dir.path(), json!({"customers": "steve"}));
        let mock = Arc::new(MockTransport::new());
        let mut session = testing::session(&mock, dir.path());

        let err = run(&mut session).await.unwrap_err();

        assert!(format!("{err:#}").contains("customers"));
        assert!(mock.calls().is_empty());
        let raw = std::fs::read_to_string(dir.path().join("save.json")).unwrap();
        assert_eq!(raw, saved);
    }

    #[tokio::test]
    async fn fatal_error_saves_records_created_so_far() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("save.json"),
            json!({"orders": [{"id": 1}]}).to_string(),
        )
        .unwrap();
        testing::write_seed(
            dir.path(),
            json!({
                "products": [{"title": "Snowboard"}],
                "customers": [{"email": "a@example.com"}, {"email": "b@example.com"}]
            }),
        );
        let mock = Arc::new(
            MockTransport::new()
                .on(
                    Method::POST,
                    "products.json",
                    Reply::ok(json!({"product": {"id": 42, "title": "Snowboard"}})),
                )
                .on(
                    Method::POST,
                    "customers.json",
                    Reply::ok(json!({"customer": {"id": 7}})),
                )
                .on(Method::POST, "customers.json", Reply::raw("{\"customer\": ")),
        );
        let mut session = testing::session(&mock, dir.path());

        assert!(run(&mut session).await.is_err());

        let saved: SavedState = session.save.load().await.unwrap();
        assert_eq!(saved.products[0].id, Some(ResourceId::from(42)));
        assert_eq!(saved.customers.len(), 1);
        assert!(saved.orders.is_empty());
        assert_eq!(saved, session.state);
        assert!(mock.calls_to(Method::POST, "orders.json").is_empty());
    }
}
