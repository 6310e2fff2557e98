//! Integration tests for the dispatcher against loopback listeners.
//!
//! Every test stands up real `TcpListener`s on 127.0.0.1 and points a
//! cluster at them, so failover, empty-close and timeout behavior are
//! exercised on actual sockets.

use std::time::Duration;

use alert_core::{AlertCategory, ServerCluster, Station};
use telnet_dispatch::{ClusterEndpoint, ClusterTable, DispatcherConfig, TelnetDispatcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

fn station(serial: &str, cluster: ServerCluster, code: &str) -> Station {
    Station {
        serial: serial.to_string(),
        area_name: format!("Area {serial}"),
        display_name: format!("Station {serial}"),
        cluster,
        station_code: code.to_string(),
        region_label: String::new(),
    }
}

fn dispatcher_for(cluster: ServerCluster, ports: Vec<u16>) -> TelnetDispatcher {
    let mut clusters = ClusterTable::default();
    clusters.set(cluster, ClusterEndpoint::new("127.0.0.1", ports));
    TelnetDispatcher::new(DispatcherConfig {
        clusters,
        attempt_timeout: Duration::from_millis(500),
        pacing: Duration::from_millis(1),
    })
}

/// Listener that acknowledges every connection with `ACK` and forwards the
/// received bytes to the test.
async fn ack_server() -> (u16, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 256];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());
                let _ = socket.write_all(b"ACK\r\n").await;
            });
        }
    });
    (port, rx)
}

/// Listener that accepts and immediately closes without sending anything.
async fn empty_close_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });
    port
}

/// Listener that accepts and never answers, to force the attempt timeout.
async fn silent_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    port
}

/// A port nothing listens on.
fn refused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

#[tokio::test]
async fn test_success_records_port_and_command_bytes() {
    let (port, mut rx) = ack_server().await;
    let dispatcher = dispatcher_for(ServerCluster::A, vec![port]);

    let outcomes = dispatcher
        .send_to_stations(&[station("1", ServerCluster::A, "121")], AlertCategory::Missiles)
        .await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].success);
    let used = outcomes[0].server_used.unwrap();
    assert_eq!(used.cluster, ServerCluster::A);
    assert_eq!(used.port, port);

    let received = rx.recv().await.unwrap();
    assert_eq!(received, "$GMNG121 L00112\r\n");
}

#[tokio::test]
async fn test_port_failover_in_declared_order() {
    let dead = refused_port();
    let (alive, _rx) = ack_server().await;
    let dispatcher = dispatcher_for(ServerCluster::B, vec![dead, alive]);

    let outcomes = dispatcher
        .send_to_stations(
            &[station("1", ServerCluster::B, "129")],
            AlertCategory::Earthquake,
        )
        .await;

    assert!(outcomes[0].success);
    assert_eq!(outcomes[0].server_used.unwrap().port, alive);
}

#[tokio::test]
async fn test_empty_close_advances_to_next_port() {
    let closer = empty_close_server().await;
    let (alive, _rx) = ack_server().await;
    let dispatcher = dispatcher_for(ServerCluster::C, vec![closer, alive]);

    let outcomes = dispatcher
        .send_to_stations(&[station("1", ServerCluster::C, "121")], AlertCategory::Missiles)
        .await;

    assert!(outcomes[0].success, "empty close must not count as success");
    assert_eq!(outcomes[0].server_used.unwrap().port, alive);
}

#[tokio::test]
async fn test_all_ports_exhausted_reports_last_error() {
    let dispatcher = dispatcher_for(ServerCluster::A, vec![refused_port(), refused_port()]);

    let outcomes = dispatcher
        .send_to_stations(&[station("1", ServerCluster::A, "121")], AlertCategory::Missiles)
        .await;

    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].success);
    assert!(!outcomes[0].skipped);
    assert!(outcomes[0].error.is_some());
    assert!(outcomes[0].server_used.is_none());
}

#[tokio::test]
async fn test_attempt_timeout_is_a_port_failure() {
    let silent = silent_server().await;
    let (alive, _rx) = ack_server().await;
    let dispatcher = dispatcher_for(ServerCluster::A, vec![silent, alive]);

    let outcomes = dispatcher
        .send_to_stations(&[station("1", ServerCluster::A, "121")], AlertCategory::Missiles)
        .await;

    assert!(outcomes[0].success, "timeout must fail over, not abort");
    assert_eq!(outcomes[0].server_used.unwrap().port, alive);
}

#[tokio::test]
async fn test_batch_independence_across_stations() {
    let (alive, _rx) = ack_server().await;
    let mut clusters = ClusterTable::default();
    clusters.set(
        ServerCluster::A,
        ClusterEndpoint::new("127.0.0.1", vec![refused_port()]),
    );
    clusters.set(ServerCluster::B, ClusterEndpoint::new("127.0.0.1", vec![alive]));
    let dispatcher = TelnetDispatcher::new(DispatcherConfig {
        clusters,
        attempt_timeout: Duration::from_millis(500),
        pacing: Duration::from_millis(1),
    });

    let stations = [
        station("doomed", ServerCluster::A, "121"),
        station("fine", ServerCluster::B, "122"),
    ];
    let outcomes = dispatcher
        .send_to_stations(&stations, AlertCategory::Missiles)
        .await;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].station.serial, "doomed");
    assert!(!outcomes[0].success);
    assert_eq!(outcomes[1].station.serial, "fine");
    assert!(outcomes[1].success, "one failing station must not drag down another");
}

#[tokio::test]
async fn test_codeless_category_skips_without_connecting() {
    let (port, mut rx) = ack_server().await;
    let dispatcher = dispatcher_for(ServerCluster::A, vec![port]);

    let outcomes = dispatcher
        .send_to_stations(&[station("1", ServerCluster::A, "121")], AlertCategory::Tsunami)
        .await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].skipped);
    assert!(!outcomes[0].success);
    assert!(outcomes[0].error.is_none());

    // No connection may have been opened for a skipped station
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_outcomes_keep_input_order_across_clusters() {
    let (port_a, _rx_a) = ack_server().await;
    let (port_b, _rx_b) = ack_server().await;
    let (port_c, _rx_c) = ack_server().await;
    let mut clusters = ClusterTable::default();
    clusters.set(ServerCluster::A, ClusterEndpoint::new("127.0.0.1", vec![port_a]));
    clusters.set(ServerCluster::B, ClusterEndpoint::new("127.0.0.1", vec![port_b]));
    clusters.set(ServerCluster::C, ClusterEndpoint::new("127.0.0.1", vec![port_c]));
    let dispatcher = TelnetDispatcher::new(DispatcherConfig {
        clusters,
        attempt_timeout: Duration::from_millis(500),
        pacing: Duration::from_millis(1),
    });

    let stations = [
        station("1", ServerCluster::C, "101"),
        station("2", ServerCluster::A, "102"),
        station("3", ServerCluster::B, "103"),
        station("4", ServerCluster::C, "104"),
    ];
    let outcomes = dispatcher
        .send_to_stations(&stations, AlertCategory::NewsFlash)
        .await;

    let serials: Vec<&str> = outcomes.iter().map(|o| o.station.serial.as_str()).collect();
    assert_eq!(serials, vec!["1", "2", "3", "4"]);
    assert!(outcomes.iter().all(|o| o.success));
}

#[tokio::test]
async fn test_empty_batch() {
    let dispatcher = dispatcher_for(ServerCluster::A, vec![refused_port()]);
    let outcomes = dispatcher
        .send_to_stations(&[], AlertCategory::Missiles)
        .await;
    assert!(outcomes.is_empty());
}
