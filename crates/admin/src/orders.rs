use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use storeseed_core::ResourceKind;
use storeseed_core::model::{Order, ResourceId, Transaction};

use crate::client::{AdminClient, envelope, extract};
use crate::error::{AdminError, AdminResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Refund {
    pub id: Option<ResourceId>,
    pub order_id: Option<ResourceId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct RefundRequest<'a> {
    order_id: &'a ResourceId,
    notify: bool,
    refund_line_items: Vec<RefundLineItem<'a>>,
    state: &'static str,
}

#[derive(Debug, Serialize)]
struct RefundLineItem<'a> {
    line_item_id: &'a ResourceId,
    quantity: u32,
}

pub async fn get_order(client: &AdminClient, order_id: &ResourceId) -> AdminResult<Order> {
    client
        .get_resource(&ResourceKind::Order.item_endpoint(order_id), "order")
        .await
}

pub async fn get_transactions(
    client: &AdminClient,
    order_id: &ResourceId,
) -> AdminResult<Vec<Transaction>> {
    client
        .get_list(&format!("orders/{order_id}/transactions.json"), "transactions")
        .await
}

/// Refunds every line item of the order at its original quantity, without
/// notifying the customer.
///
/// Orders with no transactions cannot be refunded and fail with
/// `NotFound`, as does an order the store will not return.
pub async fn refund_order(client: &AdminClient, order_id: &ResourceId) -> AdminResult<Refund> {
    let transactions = get_transactions(client, order_id).await.inspect_err(|e| {
        warn!(order_id = %order_id, error = %e, "could not fetch transactions");
    })?;
    if transactions.is_empty() {
        warn!(order_id = %order_id, "no transactions found");
        return Err(AdminError::NotFound(format!("transactions of order {order_id}")));
    }

    let order = get_order(client, order_id).await.inspect_err(|e| {
        warn!(order_id = %order_id, error = %e, "could not retrieve order");
    })?;

    let refund_line_items = order
        .line_items()
        .iter()
        .filter_map(|item| match (&item.id, item.quantity) {
            (Some(id), Some(quantity)) => Some(RefundLineItem {
                line_item_id: id,
                quantity,
            }),
            _ => None,
        })
        .collect();

    let request = RefundRequest {
        order_id,
        notify: false,
        refund_line_items,
        state: "disable",
    };
    let endpoint = format!("orders/{order_id}/refunds.json");
    let body = client.post(&endpoint, Some(envelope("refund", &request)?)).await?;
    let refund = extract(body, &endpoint, "refund")?;
    info!(order_id = %order_id, "Refunded order");
    Ok(refund)
}

pub async fn cancel_order(client: &AdminClient, order_id: &ResourceId) -> AdminResult<()> {
    client
        .post(&format!("orders/{order_id}/cancel.json"), None)
        .await?;
    Ok(())
}

pub async fn delete_order(client: &AdminClient, order_id: &ResourceId) -> AdminResult<()> {
    client
        .delete(&ResourceKind::Order.item_endpoint(order_id))
        .await
}

/// Refund, then cancel, then delete. Nothing after a failed refund is sent.
/// A failed cancel is logged and the delete still goes ahead; the delete's
/// outcome is the result.
pub async fn remove_order(client: &AdminClient, order_id: &ResourceId) -> AdminResult<()> {
    info!(order_id = %order_id, "Refunding and cancelling order");
    refund_order(client, order_id).await?;
    if let Err(e) = cancel_order(client, order_id).await {
        if !e.is_recoverable() {
            return Err(e);
        }
        warn!(order_id = %order_id, error = %e, "cancel failed");
    }
    delete_order(client, order_id).await?;
    info!(order_id = %order_id, "Order deleted");
    Ok(())
}
