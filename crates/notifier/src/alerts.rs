//! Alert delivery: one POST per newly delivered item.

use std::sync::Arc;

use serde_json::{Value, json};

use herald_common::diag::DiagnosticSink;
use herald_common::error::HeraldError;
use herald_common::transport::Transport;
use herald_common::types::{AlertSink, DESCRIPTION_FIELD, NOTIFICATION_FIELD};

/// Delivers delivered-item alerts to the alert endpoint.
///
/// Failures are diagnosed and swallowed: a lost alert must not block the
/// counter increment or the rest of the order.
pub struct AlertDelivery {
    transport: Arc<dyn Transport>,
    url: String,
    diag: Arc<dyn DiagnosticSink>,
}

impl AlertDelivery {
    pub fn new(transport: Arc<dyn Transport>, url: String, diag: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            transport,
            url,
            diag,
        }
    }

    async fn try_notify(&self, message: &str) -> Result<(), HeraldError> {
        self.transport
            .post_json(&self.url, &json!({ "Message": message }))
            .await
    }
}

#[async_trait::async_trait]
impl AlertSink for AlertDelivery {
    async fn notify(&self, order_id: &str, item: &Value) {
        let description = item
            .get(DESCRIPTION_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default();
        // Current (pre-increment) count; the caller increments afterwards.
        let count = item
            .get(NOTIFICATION_FIELD)
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let message = format!(
            "Alert for delivered item: Order {order_id}, Item: {description}, \
             Delivery Notifications: {count}"
        );

        match self.try_notify(&message).await {
            Ok(()) => {
                self.diag
                    .record(&format!("Alert sent for delivered item: {description}"));
            }
            Err(e) => {
                self.diag.record(&format!(
                    "Failed to send alert for delivered item: {description}: {e}"
                ));
                tracing::warn!(order_id, description, error = %e, "alert delivery failed");
            }
        }
    }
}
