//! Integration tests for broker endpoint resolution.
//!
//! Covers the connection string shapes accepted from configuration:
//! 1. Plain `host:port` and `stomp+ssl://host:port`
//! 2. Active/standby `failover:(...)` URIs
//! 3. Strings that must fail startup

use proptest::prelude::*;

use stomp_relay::config::RelayConfig;
use stomp_relay::domain::relay::{BrokerAddress, Endpoint, EndpointError, RelayMode};

// =============================================================================
// Concrete connection strings
// =============================================================================

#[test]
fn amazon_mq_active_standby_pair() {
    let raw = "failover:(stomp+ssl://b-1.mq.eu-central-1.amazonaws.com:61614,\
               stomp+ssl://b-2.mq.eu-central-1.amazonaws.com:61614)";
    let endpoint: Endpoint = raw.parse().unwrap();

    assert_eq!(
        endpoint,
        Endpoint::MultiHost {
            hosts: vec![
                "b-1.mq.eu-central-1.amazonaws.com:61614".to_string(),
                "b-2.mq.eu-central-1.amazonaws.com:61614".to_string(),
            ]
        }
    );
    assert_eq!(RelayMode::from(Some(&endpoint)), RelayMode::MultiHost);

    let addresses = endpoint.addresses().unwrap();
    assert_eq!(addresses[0].host(), "b-1.mq.eu-central-1.amazonaws.com");
    assert_eq!(addresses[1].port(), 61614);
}

#[test]
fn single_broker_with_ssl_scheme() {
    let endpoint: Endpoint = "stomp+ssl://broker.internal:61614".parse().unwrap();
    assert_eq!(
        endpoint,
        Endpoint::SingleHost {
            host: "broker.internal".to_string(),
            port: 61614
        }
    );
    assert_eq!(endpoint.to_string(), "broker.internal:61614");
}

#[test]
fn unparseable_strings_fail() {
    assert!(matches!(
        "localhost".parse::<Endpoint>(),
        Err(EndpointError::InvalidFormat(_))
    ));
    assert!(matches!(
        "localhost:70000".parse::<Endpoint>(),
        Err(EndpointError::InvalidPort(_))
    ));
    assert!(matches!(
        "failover:()".parse::<Endpoint>(),
        Err(EndpointError::NoFailoverHosts(_))
    ));
    assert!(matches!(
        "failover:(stomp+ssl://a:1,b)".parse::<Endpoint>(),
        Err(EndpointError::MalformedHost { .. })
    ));
}

#[test]
fn relay_config_without_endpoint_is_disabled() {
    let config = RelayConfig {
        endpoint: Some("   ".to_string()),
        ..Default::default()
    };
    assert_eq!(config.resolve_endpoint().unwrap(), None);
}

// =============================================================================
// Properties
// =============================================================================

fn host() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}(\\.[a-z][a-z0-9-]{0,10}){0,3}"
}

fn address() -> impl Strategy<Value = (String, u16)> {
    (host(), any::<u16>())
}

proptest! {
    #[test]
    fn host_and_port_resolve_to_single_host((host, port) in address()) {
        let endpoint: Endpoint = format!("{host}:{port}").parse().unwrap();
        prop_assert_eq!(endpoint, Endpoint::SingleHost { host, port });
    }

    #[test]
    fn ssl_scheme_is_stripped((host, port) in address()) {
        let endpoint: Endpoint = format!("stomp+ssl://{host}:{port}").parse().unwrap();
        prop_assert_eq!(endpoint, Endpoint::SingleHost { host, port });
    }

    #[test]
    fn failover_keeps_host_order(pairs in proptest::collection::vec(address(), 1..5)) {
        let entries: Vec<String> = pairs
            .iter()
            .map(|(h, p)| format!("stomp+ssl://{h}:{p}"))
            .collect();
        let endpoint: Endpoint = format!("failover:({})", entries.join(",")).parse().unwrap();

        let expected: Vec<BrokerAddress> = pairs
            .iter()
            .map(|(h, p)| BrokerAddress::new(h.clone(), *p).unwrap())
            .collect();
        prop_assert_eq!(endpoint.addresses().unwrap(), expected);
    }
}
