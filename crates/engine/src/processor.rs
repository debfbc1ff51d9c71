//! Per-order processing.
//!
//! For each order:
//! 1. Evaluate the delivered predicate over every item, in listed order
//! 2. For delivered items, send the alert *before* touching the counter
//! 3. Increment that item's `deliveryNotification` by exactly 1
//!
//! Counter mutations are applied to a clone of the item list and committed
//! only when the whole order succeeds; a malformed order is diagnosed and
//! returned unchanged. Alerts already sent for earlier items in a failed
//! order are not recalled — counters are all-or-nothing per order, alerts
//! are best-effort per item.

use std::sync::Arc;

use serde_json::Value;

use herald_common::diag::DiagnosticSink;
use herald_common::error::HeraldError;
use herald_common::types::{AlertSink, DELIVERED_STATUS, NOTIFICATION_FIELD, Order, STATUS_FIELD};

/// Walks an order's items, alerting and counting delivered ones.
pub struct OrderProcessor {
    alerts: Arc<dyn AlertSink>,
    diag: Arc<dyn DiagnosticSink>,
}

impl OrderProcessor {
    pub fn new(alerts: Arc<dyn AlertSink>, diag: Arc<dyn DiagnosticSink>) -> Self {
        Self { alerts, diag }
    }

    /// Process one order, returning it with updated counters.
    ///
    /// On failure the original order is returned unmodified and the error is
    /// diagnosed; one order's failure never aborts its siblings, so this
    /// never returns an error.
    pub async fn process_order(&self, order: &Order) -> Order {
        match self.process_items(order).await {
            Ok(items) => Order {
                order_id: order.order_id.clone(),
                items,
            },
            Err(e) => {
                self.diag.record(&format!(
                    "Error processing order {}: {e}",
                    order.id_display()
                ));
                tracing::warn!(
                    order_id = %order.id_display(),
                    error = %e,
                    "order processing failed, keeping original"
                );
                order.clone()
            }
        }
    }

    async fn process_items(&self, order: &Order) -> Result<Value, HeraldError> {
        let mut items = order
            .items
            .as_array()
            .cloned()
            .ok_or_else(|| HeraldError::MalformedData("Items is not an array".to_string()))?;

        let order_id = order.id_display();
        for item in items.iter_mut() {
            if self.is_delivered(item) {
                // Alert carries the pre-increment count.
                self.alerts.notify(&order_id, item).await;

                let count = item
                    .get(NOTIFICATION_FIELD)
                    .and_then(Value::as_u64)
                    .ok_or_else(|| {
                        HeraldError::MalformedData(format!(
                            "delivered item has no numeric {NOTIFICATION_FIELD} field"
                        ))
                    })?;
                item[NOTIFICATION_FIELD] = Value::from(count + 1);
            }
        }

        Ok(Value::Array(items))
    }

    /// True iff the item's status exists and case-insensitively equals
    /// "Delivered". A missing or non-string status is diagnosed and resolves
    /// to false; it never raises.
    pub fn is_delivered(&self, item: &Value) -> bool {
        match item.get(STATUS_FIELD).and_then(Value::as_str) {
            Some(status) => status.eq_ignore_ascii_case(DELIVERED_STATUS),
            None => {
                self.diag.record(&format!(
                    "Delivered check skipped item with no readable {STATUS_FIELD} field"
                ));
                false
            }
        }
    }
}
