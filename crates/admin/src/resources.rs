use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use storeseed_core::ResourceKind;
use storeseed_core::model::{Customer, Order, Product, ResourceId};

use crate::client::{AdminClient, envelope, extract};
use crate::error::AdminResult;

#[derive(Debug, Serialize)]
struct NewOrder<'a> {
    customer: IdRef<'a>,
    line_items: Vec<NewLineItem<'a>>,
}

#[derive(Debug, Serialize)]
struct IdRef<'a> {
    id: &'a ResourceId,
}

#[derive(Debug, Serialize)]
struct NewLineItem<'a> {
    variant_id: &'a ResourceId,
    quantity: u32,
}

/// Creates one resource and returns the record the store assigned.
pub async fn create_resource<T>(client: &AdminClient, kind: ResourceKind, entry: &T) -> AdminResult<T>
where
    T: Serialize + DeserializeOwned,
{
    post_resource(client, kind, entry).await
}

async fn post_resource<P, R>(client: &AdminClient, kind: ResourceKind, payload: &P) -> AdminResult<R>
where
    P: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let endpoint = kind.collection_endpoint();
    let body = client
        .post(&endpoint, Some(envelope(kind.singular(), payload)?))
        .await?;
    extract(body, &endpoint, kind.singular())
}

/// Creates every entry in order. Entries the store rejects are logged and
/// left out of the result; only transport-level failures abort the batch.
pub async fn create_resources<T>(
    client: &AdminClient,
    kind: ResourceKind,
    entries: &[T],
) -> AdminResult<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    let mut created = Vec::with_capacity(entries.len());
    create_resources_into(client, kind, entries, &mut created).await?;
    Ok(created)
}

/// Like [`create_resources`], appending each record to `created` as soon as
/// the store returns it, so the records made before a fatal error are kept.
pub async fn create_resources_into<T>(
    client: &AdminClient,
    kind: ResourceKind,
    entries: &[T],
    created: &mut Vec<T>,
) -> AdminResult<()>
where
    T: Serialize + DeserializeOwned,
{
    let before = created.len();
    for (index, entry) in entries.iter().enumerate() {
        match create_resource(client, kind, entry).await {
            Ok(record) => created.push(record),
            Err(e) if e.is_recoverable() => {
                warn!(kind = %kind, index, error = %e, "skipping entry");
            }
            Err(e) => return Err(e),
        }
    }
    info!(
        kind = %kind,
        created = created.len() - before,
        requested = entries.len(),
        "Created resources"
    );
    Ok(())
}

/// One order per customer and product pair, each ordering the product's
/// first variant once.
pub async fn create_orders(
    client: &AdminClient,
    customers: &[Customer],
    products: &[Product],
) -> AdminResult<Vec<Order>> {
    let mut orders = Vec::new();
    create_orders_into(client, customers, products, &mut orders).await?;
    Ok(orders)
}

/// Like [`create_orders`], appending each order to `orders` as it is created.
pub async fn create_orders_into(
    client: &AdminClient,
    customers: &[Customer],
    products: &[Product],
    orders: &mut Vec<Order>,
) -> AdminResult<()> {
    let before = orders.len();
    for customer in customers {
        let Some(customer_id) = customer.id.as_ref() else {
            warn!(email = ?customer.email, "customer has no id, skipping its orders");
            continue;
        };
        for product in products {
            let Some(variant_id) = product.first_variant_id() else {
                warn!(product = ?product.id, "product has no variant, skipping order");
                continue;
            };
            let order = NewOrder {
                customer: IdRef { id: customer_id },
                line_items: vec![NewLineItem {
                    variant_id,
                    quantity: 1,
                }],
            };
            match post_resource::<_, Order>(client, ResourceKind::Order, &order).await {
                Ok(created) => orders.push(created),
                Err(e) if e.is_recoverable() => {
                    warn!(customer_id = %customer_id, variant_id = %variant_id, error = %e, "order not created");
                }
                Err(e) => return Err(e),
            }
        }
    }
    info!(created = orders.len() - before, "Created orders");
    Ok(())
}
