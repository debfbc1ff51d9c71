//! Processor behavior: the delivered predicate, counter bookkeeping, and
//! per-order failure isolation.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use herald_common::testing::MemorySink;
use herald_common::types::{AlertSink, Order};
use herald_engine::processor::OrderProcessor;

/// Alert double recording (order_id, description, pre-increment count).
#[derive(Default)]
struct RecordingAlerts {
    calls: Mutex<Vec<(String, String, Option<u64>)>>,
}

impl RecordingAlerts {
    fn calls(&self) -> Vec<(String, String, Option<u64>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AlertSink for RecordingAlerts {
    async fn notify(&self, order_id: &str, item: &Value) {
        let description = item
            .get("Description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let count = item.get("deliveryNotification").and_then(Value::as_u64);
        self.calls
            .lock()
            .unwrap()
            .push((order_id.to_string(), description, count));
    }
}

fn order(value: Value) -> Order {
    serde_json::from_value(value).unwrap()
}

fn processor() -> (OrderProcessor, Arc<RecordingAlerts>, Arc<MemorySink>) {
    let alerts = Arc::new(RecordingAlerts::default());
    let diag = Arc::new(MemorySink::new());
    let processor = OrderProcessor::new(alerts.clone(), diag.clone());
    (processor, alerts, diag)
}

#[tokio::test]
async fn delivered_item_increments_and_alerts_once() {
    let (processor, alerts, _) = processor();
    let input = order(json!({
        "OrderId": 1,
        "Items": [
            {"Status": "Ready_to_Deliver", "Description": "LHZ 300 Kit", "deliveryNotification": 0},
            {"Status": "Delivered", "Description": "X-Ray machine", "deliveryNotification": 0},
        ],
    }));

    let processed = processor.process_order(&input).await;

    let items = processed.items.as_array().unwrap();
    assert_eq!(items[0]["deliveryNotification"], json!(0));
    assert_eq!(items[1]["deliveryNotification"], json!(1));

    let calls = alerts.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "1");
    assert_eq!(calls[0].1, "X-Ray machine");
}

#[tokio::test]
async fn alert_is_sent_before_the_counter_increment() {
    let (processor, alerts, _) = processor();
    let input = order(json!({
        "OrderId": 7,
        "Items": [{"Status": "Delivered", "Description": "New Chairs", "deliveryNotification": 3}],
    }));

    let processed = processor.process_order(&input).await;

    // The alert saw the pre-increment value.
    assert_eq!(alerts.calls()[0].2, Some(3));
    assert_eq!(processed.items[0]["deliveryNotification"], json!(4));
}

#[tokio::test]
async fn predicate_is_case_insensitive() {
    let (processor, _, _) = processor();
    for status in ["Delivered", "delivered", "DELIVERED", "dElIvErEd"] {
        assert!(
            processor.is_delivered(&json!({"Status": status})),
            "expected {status:?} to count as delivered"
        );
    }
    for status in ["Ready_to_Deliver", "Shipped", "", "Delivered "] {
        assert!(
            !processor.is_delivered(&json!({"Status": status})),
            "expected {status:?} to NOT count as delivered"
        );
    }
}

#[tokio::test]
async fn predicate_resolves_structural_misses_to_false() {
    let (processor, _, diag) = processor();

    assert!(!processor.is_delivered(&json!({})));
    assert!(!processor.is_delivered(&json!({"status": "Delivered"}))); // misnamed
    assert!(!processor.is_delivered(&json!({"Status": 7}))); // wrong shape
    assert!(!processor.is_delivered(&json!("not an object")));

    assert_eq!(diag.count_containing("no readable Status"), 4);
}

#[tokio::test]
async fn reprocessing_a_delivered_item_increments_again() {
    let (processor, alerts, _) = processor();
    let input = order(json!({
        "OrderId": 2,
        "Items": [{"Status": "Delivered", "Description": "X-Ray computer", "deliveryNotification": 0}],
    }));

    let once = processor.process_order(&input).await;
    let twice = processor.process_order(&once).await;

    assert_eq!(twice.items[0]["deliveryNotification"], json!(2));
    assert_eq!(alerts.calls().len(), 2);
}

#[tokio::test]
async fn malformed_item_list_returns_original_order() {
    let (processor, alerts, diag) = processor();
    let input = order(json!({"OrderId": 3, "Items": "not a list"}));

    let processed = processor.process_order(&input).await;

    assert_eq!(processed, input);
    assert!(alerts.calls().is_empty());
    assert_eq!(diag.count_containing("Error processing order 3"), 1);
}

#[tokio::test]
async fn order_failure_does_not_halt_siblings() {
    let (processor, alerts, diag) = processor();
    let broken = order(json!({"OrderId": 3, "Items": 42}));
    let healthy = order(json!({
        "OrderId": 4,
        "Items": [{"Status": "Delivered", "Description": "New Chairs", "deliveryNotification": 0}],
    }));

    let mut updated = Vec::new();
    for input in [&broken, &healthy] {
        updated.push(processor.process_order(input).await);
    }

    assert_eq!(updated[0], broken);
    assert_eq!(updated[1].items[0]["deliveryNotification"], json!(1));
    assert_eq!(alerts.calls().len(), 1);
    assert_eq!(diag.count_containing("Error processing order 3"), 1);
}

#[tokio::test]
async fn failed_order_discards_earlier_counter_mutations() {
    let (processor, alerts, diag) = processor();
    // First item is fine; second is delivered but has no counter field, which
    // fails the order after the first item was already alerted and counted.
    let input = order(json!({
        "OrderId": 5,
        "Items": [
            {"Status": "Delivered", "Description": "X-Ray machine", "deliveryNotification": 1},
            {"Status": "Delivered", "Description": "X-Ray computer"},
        ],
    }));

    let processed = processor.process_order(&input).await;

    // Counters roll back as a unit...
    assert_eq!(processed, input);
    assert_eq!(processed.items[0]["deliveryNotification"], json!(1));
    // ...but the alert for the first item already went out.
    assert_eq!(alerts.calls().len(), 2);
    assert_eq!(diag.count_containing("Error processing order 5"), 1);
}
