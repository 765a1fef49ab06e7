use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, info, warn};

use storeseed_core::ResourceKind;
use storeseed_core::model::ResourceId;

use crate::client::AdminClient;
use crate::error::AdminResult;
use crate::orders;

/// Largest page the list endpoints return.
pub const PAGE_SIZE: u32 = 250;

/// Kinds are swept in this order: orders go first so products and customers
/// are no longer referenced when they are deleted.
pub const SWEEP_ORDER: [ResourceKind; 5] = [
    ResourceKind::Order,
    ResourceKind::Product,
    ResourceKind::CustomCollection,
    ResourceKind::SmartCollection,
    ResourceKind::Customer,
];

#[derive(Debug, Deserialize)]
struct Listed {
    id: Option<ResourceId>,
}

#[derive(Debug, Clone)]
pub struct SweepReport {
    pub kind: ResourceKind,
    pub pages: u32,
    pub deleted: Vec<ResourceId>,
    /// Resources that could not be removed. They are never retried within
    /// a sweep.
    pub failed: Vec<ResourceId>,
}

impl SweepReport {
    fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            pages: 0,
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CleanupReport {
    pub sweeps: Vec<SweepReport>,
}

impl CleanupReport {
    pub fn deleted(&self) -> usize {
        self.sweeps.iter().map(|s| s.deleted.len()).sum()
    }

    pub fn failed(&self) -> usize {
        self.sweeps.iter().map(|s| s.failed.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    pub fn sweep(&self, kind: ResourceKind) -> Option<&SweepReport> {
        self.sweeps.iter().find(|s| s.kind == kind)
    }
}

/// Removes every order, product, collection and customer from the store.
///
/// Each sweep keeps fetching the first page of its kind until the page is
/// empty, missing, or holds nothing but resources that already failed.
/// Orders are refunded and cancelled before deletion and are left alone when
/// the refund fails.
pub async fn delete_all(client: &AdminClient) -> AdminResult<CleanupReport> {
    let mut report = CleanupReport::default();
    for kind in SWEEP_ORDER {
        let sweep = sweep(client, kind).await?;
        info!(
            kind = %kind,
            deleted = sweep.deleted.len(),
            failed = sweep.failed.len(),
            "Sweep finished"
        );
        report.sweeps.push(sweep);
    }
    info!(
        deleted = report.deleted(),
        failed = report.failed(),
        "All records deleted"
    );
    Ok(report)
}

async fn sweep(client: &AdminClient, kind: ResourceKind) -> AdminResult<SweepReport> {
    let mut report = SweepReport::new(kind);
    let mut deleted: HashSet<ResourceId> = HashSet::new();
    let mut failed: HashSet<ResourceId> = HashSet::new();

    loop {
        let page = match fetch_page(client, kind).await {
            Ok(page) => page,
            Err(e) if e.is_recoverable() => {
                warn!(kind = %kind, error = %e, "listing failed, ending sweep");
                break;
            }
            Err(e) => return Err(e),
        };

        let mut pending = Vec::new();
        for id in page {
            if failed.contains(&id) {
                continue;
            }
            if deleted.remove(&id) {
                // Deleted earlier but still listed.
                warn!(kind = %kind, id = %id, "still present after delete");
                report.deleted.retain(|d| d != &id);
                report.failed.push(id.clone());
                failed.insert(id);
                continue;
            }
            pending.push(id);
        }
        if pending.is_empty() {
            break;
        }
        report.pages += 1;
        debug!(kind = %kind, page = report.pages, count = pending.len(), "sweeping page");

        for id in pending {
            match remove(client, kind, &id).await {
                Ok(()) => {
                    info!(kind = %kind, id = %id, "Deleted");
                    report.deleted.push(id.clone());
                    deleted.insert(id);
                }
                Err(e) if e.is_recoverable() => {
                    warn!(kind = %kind, id = %id, error = %e, "skipping deletion");
                    report.failed.push(id.clone());
                    failed.insert(id);
                }
                Err(e) => return Err(e),
            }
        }
    }

    Ok(report)
}

async fn fetch_page(client: &AdminClient, kind: ResourceKind) -> AdminResult<Vec<ResourceId>> {
    let endpoint = format!("{}?limit={PAGE_SIZE}", kind.collection_endpoint());
    let listed: Vec<Listed> = client.get_list(&endpoint, kind.plural()).await?;
    Ok(listed.into_iter().filter_map(|l| l.id).collect())
}

async fn remove(client: &AdminClient, kind: ResourceKind, id: &ResourceId) -> AdminResult<()> {
    match kind {
        ResourceKind::Order => orders::remove_order(client, id).await,
        _ => client.delete(&kind.item_endpoint(id)).await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::mock::{MockTransport, Reply};

    fn empty_store() -> MockTransport {
        empty_store_except(None)
    }

    /// Every list endpoint answers with an empty page, except `skip`'s,
    /// which the test scripts itself.
    fn empty_store_except(skip: Option<ResourceKind>) -> MockTransport {
        SWEEP_ORDER
            .iter()
            .filter(|kind| Some(**kind) != skip)
            .fold(MockTransport::new(), |mock, kind| {
                mock.on(
                    Method::GET,
                    &format!("{}?limit=250", kind.collection_endpoint()),
                    Reply::ok(json!({ kind.plural(): [] })),
                )
            })
    }

    #[tokio::test]
    async fn empty_store_deletes_nothing() {
        let mock = Arc::new(empty_store());
        let client = AdminClient::with_transport(mock.clone());

        let report = delete_all(&client).await.unwrap();

        assert_eq!(report.deleted(), 0);
        assert!(report.is_clean());
        assert_eq!(mock.count(Method::DELETE), 0);
        assert_eq!(mock.count(Method::POST), 0);
        let listed: Vec<_> = mock.calls().into_iter().map(|c| c.endpoint).collect();
        assert_eq!(
            listed,
            vec![
                "orders.json?limit=250",
                "products.json?limit=250",
                "custom_collections.json?limit=250",
                "smart_collections.json?limit=250",
                "customers.json?limit=250",
            ]
        );
    }

    #[tokio::test]
    async fn missing_list_key_or_failed_listing_ends_sweep() {
        let mock = Arc::new(
            MockTransport::new()
                .on(
                    Method::GET,
                    "orders.json?limit=250",
                    Reply::ok(json!({"errors": "Not Found"})),
                )
                .on(Method::GET, "products.json?limit=250", Reply::status(500)),
        );
        let client = AdminClient::with_transport(mock.clone());

        let report = delete_all(&client).await.unwrap();

        assert_eq!(report.sweeps.len(), 5);
        assert_eq!(mock.count(Method::GET), 5);
    }

    #[tokio::test]
    async fn sweeps_refetch_until_empty() {
        let mock = Arc::new(
            empty_store_except(Some(ResourceKind::Product))
                .on(
                    Method::GET,
                    "products.json?limit=250",
                    Reply::ok(json!({"products": [{"id": 1}, {"id": 2}]})),
                )
                .on(
                    Method::GET,
                    "products.json?limit=250",
                    Reply::ok(json!({"products": [{"id": 3}]})),
                )
                .on(
                    Method::GET,
                    "products.json?limit=250",
                    Reply::ok(json!({"products": []})),
                )
                .on_any(Method::DELETE, Reply::ok(json!({}))),
        );
        let client = AdminClient::with_transport(mock.clone());

        let report = delete_all(&client).await.unwrap();

        let products = report.sweep(ResourceKind::Product).unwrap();
        assert_eq!(products.pages, 2);
        assert_eq!(products.deleted.len(), 3);
        assert_eq!(mock.calls_to(Method::DELETE, "products/").len(), 3);
    }

    #[tokio::test]
    async fn failed_deletes_do_not_loop() {
        let mock = Arc::new(
            empty_store_except(Some(ResourceKind::Customer))
                .on(
                    Method::GET,
                    "customers.json?limit=250",
                    Reply::ok(json!({"customers": [{"id": 7}, {"id": 8}]})),
                )
                .on(Method::DELETE, "customers/7.json", Reply::status(422))
                .on(Method::DELETE, "customers/8.json", Reply::ok(json!({}))),
        );
        let client = AdminClient::with_transport(mock.clone());

        let report = delete_all(&client).await.unwrap();

        let customers = report.sweep(ResourceKind::Customer).unwrap();
        // 8 kept reappearing after a successful delete.
        assert_eq!(
            customers.failed,
            vec![ResourceId::from(7), ResourceId::from(8)]
        );
        assert!(customers.deleted.is_empty());
        assert_eq!(mock.calls_to(Method::DELETE, "customers/7.json").len(), 1);
        assert_eq!(mock.calls_to(Method::DELETE, "customers/8.json").len(), 1);
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn unrefundable_orders_are_left_in_place() {
        let mock = Arc::new(
            empty_store_except(Some(ResourceKind::Order))
                .on(
                    Method::GET,
                    "orders.json?limit=250",
                    Reply::ok(json!({"orders": [{"id": 100}]})),
                )
                .on(
                    Method::GET,
                    "orders/100/transactions.json",
                    Reply::ok(json!({"transactions": []})),
                )
                .on_any(Method::DELETE, Reply::ok(json!({}))),
        );
        let client = AdminClient::with_transport(mock.clone());

        let report = delete_all(&client).await.unwrap();

        let orders = report.sweep(ResourceKind::Order).unwrap();
        assert_eq!(orders.failed, vec![ResourceId::from(100)]);
        assert!(mock.calls_to(Method::POST, "orders/100/refunds.json").is_empty());
        assert!(mock.calls_to(Method::POST, "orders/100/cancel.json").is_empty());
        assert_eq!(mock.count(Method::DELETE), 0);
        // Listed twice: once to sweep it, once to see only failures remain.
        assert_eq!(mock.calls_to(Method::GET, "orders.json").len(), 2);
    }
}
