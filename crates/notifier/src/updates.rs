//! Batched order update: one POST per run carrying every processed order.

use std::sync::Arc;

use herald_common::diag::DiagnosticSink;
use herald_common::error::HeraldError;
use herald_common::transport::Transport;
use herald_common::types::Order;

/// Publishes the full processed batch to the update endpoint.
pub struct UpdateSink {
    transport: Arc<dyn Transport>,
    url: String,
    diag: Arc<dyn DiagnosticSink>,
}

impl UpdateSink {
    pub fn new(transport: Arc<dyn Transport>, url: String, diag: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            transport,
            url,
            diag,
        }
    }

    /// Post all updated orders in one call. Called once per run, and only
    /// with a non-empty batch.
    ///
    /// Each order in the batch gets its own diagnostic record afterwards,
    /// confirming submission or reporting the shared failure. Errors never
    /// propagate.
    pub async fn post_updated_orders(&self, orders: &[Order]) {
        match self.try_post(orders).await {
            Ok(()) => {
                for order in orders {
                    self.diag.record(&format!(
                        "Updated order sent for processing: OrderId {}",
                        order.id_display()
                    ));
                }
            }
            Err(e) => {
                tracing::warn!(batch_size = orders.len(), error = %e, "order update failed");
                for order in orders {
                    self.diag.record(&format!(
                        "Failed to send updated order for processing: OrderId {}",
                        order.id_display()
                    ));
                }
            }
        }
    }

    async fn try_post(&self, orders: &[Order]) -> Result<(), HeraldError> {
        let body = serde_json::to_value(orders)
            .map_err(|e| HeraldError::MalformedData(e.to_string()))?;
        self.transport.post_json(&self.url, &body).await
    }
}
