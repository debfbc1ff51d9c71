use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire field holding an item's fulfillment status.
pub const STATUS_FIELD: &str = "Status";

/// Wire field holding an item's human-readable description.
pub const DESCRIPTION_FIELD: &str = "Description";

/// Wire field holding the per-item delivery-notification counter.
pub const NOTIFICATION_FIELD: &str = "deliveryNotification";

/// Status value that marks an item as delivered (compared case-insensitively).
pub const DELIVERED_STATUS: &str = "Delivered";

/// An order as fetched from the orders source.
///
/// The identifier is an opaque token (string or integer on the wire), and the
/// item list is kept as raw JSON so a single structurally broken order can be
/// diagnosed and skipped without poisoning the rest of the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "OrderId", default)]
    pub order_id: Value,

    #[serde(rename = "Items", default)]
    pub items: Value,
}

impl Order {
    /// Render the opaque identifier for messages and diagnostics.
    /// Strings render without quotes; anything else uses its JSON form.
    pub fn id_display(&self) -> String {
        match self.order_id.as_str() {
            Some(s) => s.to_string(),
            None => self.order_id.to_string(),
        }
    }
}

/// Outbound alert delivery, invoked once per newly delivered item.
///
/// Fire-and-forget from the caller's perspective: the call is awaited so the
/// alert precedes counter bookkeeping, but delivery failure must be handled
/// (and diagnosed) by the implementation, never surfaced to the caller.
#[async_trait::async_trait]
pub trait AlertSink: Send + Sync {
    async fn notify(&self, order_id: &str, item: &Value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_deserializes_wire_shape() {
        let order: Order = serde_json::from_value(json!({
            "OrderId": 1,
            "Items": [{"Status": "Delivered", "Description": "X-Ray machine", "deliveryNotification": 0}],
        }))
        .unwrap();

        assert_eq!(order.order_id, json!(1));
        assert_eq!(order.items.as_array().unwrap().len(), 1);
    }

    #[test]
    fn order_tolerates_missing_fields() {
        let order: Order = serde_json::from_value(json!({})).unwrap();
        assert!(order.order_id.is_null());
        assert!(order.items.is_null());
    }

    #[test]
    fn id_display_strips_quotes_from_strings() {
        let order: Order = serde_json::from_value(json!({"OrderId": "A-17"})).unwrap();
        assert_eq!(order.id_display(), "A-17");

        let order: Order = serde_json::from_value(json!({"OrderId": 42})).unwrap();
        assert_eq!(order.id_display(), "42");
    }

    #[test]
    fn order_serializes_back_to_wire_names() {
        let order: Order = serde_json::from_value(json!({"OrderId": 2, "Items": []})).unwrap();
        let value = serde_json::to_value(&order).unwrap();
        assert!(value.get("OrderId").is_some());
        assert!(value.get("Items").is_some());
    }
}
