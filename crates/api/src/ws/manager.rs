use std::collections::HashMap;

use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};
use vitalwatch_core::broadcast::BroadcastMessage;
use vitalwatch_core::types::Timestamp;

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single observer connection.
pub struct WsConnection {
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active observer connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc`
/// and shared across the application. Fan-out is best-effort: there is
/// no retry, no backpressure queue, and no message durability. A
/// connection whose channel has closed misses messages until it is
/// pruned.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller
    /// can forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID. No-op if it is already gone.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Broadcast a message to all connected observers.
    ///
    /// Every registered connection gets one delivery attempt. A failed
    /// send is logged and marks the connection dead; dead connections
    /// are pruned after the sweep. A failure never aborts delivery to
    /// the remaining connections and never surfaces to the caller.
    ///
    /// Returns the number of successful deliveries.
    pub async fn broadcast(&self, message: &BroadcastMessage) -> usize {
        let payload = match serde_json::to_string(message) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode broadcast message");
                return 0;
            }
        };

        let mut dead = Vec::new();
        let mut delivered = 0;
        {
            let conns = self.connections.read().await;
            for (conn_id, conn) in conns.iter() {
                if conn.sender.send(Message::Text(payload.clone().into())).is_err() {
                    tracing::debug!(conn_id = %conn_id, "WebSocket send failed, pruning connection");
                    dead.push(conn_id.clone());
                } else {
                    delivered += 1;
                }
            }
        }

        if !dead.is_empty() {
            let mut conns = self.connections.write().await;
            for conn_id in &dead {
                conns.remove(conn_id);
            }
            tracing::info!(pruned = dead.len(), "Pruned dead WebSocket connections");
        }

        delivered
    }

    /// Push a raw frame to one connection (handshake acknowledgment).
    pub async fn send_to(&self, conn_id: &str, message: Message) {
        let conns = self.connections.read().await;
        if let Some(conn) = conns.get(conn_id) {
            let _ = conn.sender.send(message);
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalwatch_core::record::{PredictionResult, SensorRecord};
    use vitalwatch_core::reading::SensorReading;
    use vitalwatch_core::severity;

    fn data_message() -> BroadcastMessage {
        let reading = SensorReading {
            patient_id: "P-001".into(),
            heart_rate: 72,
            spo2: 98,
            temperature: 36.6,
            ecg_mean: 1.2,
        };
        let prediction = PredictionResult {
            systolic: 118.0,
            diastolic: 76.0,
            confidence: 90.0,
        };
        let record = SensorRecord::assemble(
            &reading,
            prediction,
            severity::classify(118.0, 76.0),
            chrono::Utc::now(),
        );
        BroadcastMessage::sensor_data(record)
    }

    #[tokio::test]
    async fn broadcast_reaches_every_connection() {
        let manager = WsManager::new();
        let mut rx_a = manager.add("a".into()).await;
        let mut rx_b = manager.add("b".into()).await;
        let mut rx_c = manager.add("c".into()).await;

        let delivered = manager.broadcast(&data_message()).await;
        assert_eq!(delivered, 3);

        for rx in [&mut rx_a, &mut rx_b, &mut rx_c] {
            let msg = rx.recv().await.expect("receiver should get the message");
            let Message::Text(text) = msg else {
                panic!("expected a text frame");
            };
            let json: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(json["type"], "sensor-data");
        }
    }

    #[tokio::test]
    async fn dead_connection_does_not_block_the_rest() {
        let manager = WsManager::new();
        let mut rx_a = manager.add("a".into()).await;
        let rx_dead = manager.add("dead".into()).await;
        let mut rx_c = manager.add("c".into()).await;

        // Dropping the receiver closes the channel; the next send fails.
        drop(rx_dead);

        let delivered = manager.broadcast(&data_message()).await;
        assert_eq!(delivered, 2);

        assert!(rx_a.recv().await.is_some());
        assert!(rx_c.recv().await.is_some());

        // The dead connection was pruned during the sweep.
        assert_eq!(manager.connection_count().await, 2);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let manager = WsManager::new();
        let _rx = manager.add("a".into()).await;

        manager.remove("a").await;
        manager.remove("a").await;
        manager.remove("never-registered").await;

        assert_eq!(manager.connection_count().await, 0);
    }

    #[tokio::test]
    async fn broadcast_with_no_connections_is_a_noop() {
        let manager = WsManager::new();
        assert_eq!(manager.broadcast(&data_message()).await, 0);
    }

    #[tokio::test]
    async fn concurrent_register_and_broadcast_do_not_interfere() {
        use std::sync::Arc;

        let manager = Arc::new(WsManager::new());
        let mut receivers = Vec::new();
        for i in 0..8 {
            receivers.push(manager.add(format!("conn-{i}")).await);
        }

        let broadcaster = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move {
                for _ in 0..50 {
                    manager.broadcast(&data_message()).await;
                }
            })
        };
        let churner = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move {
                for i in 0..50 {
                    let _rx = manager.add(format!("churn-{i}")).await;
                    manager.remove(&format!("churn-{i}")).await;
                }
            })
        };

        broadcaster.await.unwrap();
        churner.await.unwrap();

        // The first eight connections are still registered.
        assert_eq!(manager.connection_count().await, 8);
    }

    #[tokio::test]
    async fn shutdown_sends_close_and_clears() {
        let manager = WsManager::new();
        let mut rx = manager.add("a".into()).await;

        manager.shutdown_all().await;

        assert!(matches!(rx.recv().await, Some(Message::Close(None))));
        assert_eq!(manager.connection_count().await, 0);
    }
}
