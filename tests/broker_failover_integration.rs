//! Integration tests for connecting to a broker pair.
//!
//! Brokers are stood in for by local TCP listeners; a listener that has been
//! dropped plays the part of a broker that is down.

use std::time::Duration;

use tokio::net::TcpListener;

use stomp_relay::adapters::{TcpBrokerConnector, TcpConnectorConfig};
use stomp_relay::domain::relay::BrokerAddress;
use stomp_relay::ports::{BrokerConnector, RelayError};

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn live_broker() -> (TcpListener, BrokerAddress) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, BrokerAddress::new("127.0.0.1", port).unwrap())
}

async fn dead_broker() -> BrokerAddress {
    let (listener, address) = live_broker().await;
    drop(listener);
    address
}

fn config() -> TcpConnectorConfig {
    TcpConnectorConfig::default().with_connect_timeout(Duration::from_secs(2))
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn sessions_alternate_between_brokers() {
    let (_first_listener, first) = live_broker().await;
    let (_second_listener, second) = live_broker().await;
    let connector = TcpBrokerConnector::new(vec![first.clone(), second.clone()], config()).unwrap();

    let order: Vec<BrokerAddress> = {
        let mut order = Vec::new();
        for _ in 0..4 {
            order.push(connector.connect().await.unwrap().address);
        }
        order
    };

    assert_eq!(order, vec![first.clone(), second.clone(), first, second]);
}

#[tokio::test]
async fn fails_over_to_standby() {
    let down = dead_broker().await;
    let (_listener, standby) = live_broker().await;
    let connector = TcpBrokerConnector::new(vec![down, standby.clone()], config()).unwrap();

    let connection = connector.connect().await.unwrap();
    assert_eq!(connection.address, standby);
}

#[tokio::test]
async fn all_brokers_down_is_unavailable() {
    let connector =
        TcpBrokerConnector::new(vec![dead_broker().await, dead_broker().await], config()).unwrap();

    match connector.connect().await {
        Err(RelayError::Unavailable { attempts, last }) => {
            assert_eq!(attempts, 2);
            assert!(matches!(*last, RelayError::Connect { .. }));
        }
        other => panic!("expected Unavailable, got {:?}", other.map(|c| c.address)),
    }
}
