//! Cluster endpoint table and dispatcher knobs.

use std::time::Duration;

use alert_core::ServerCluster;

/// Ports every cluster listens on, tried strictly in this order.
pub const DEFAULT_PORTS: [u16; 4] = [10000, 10001, 10002, 61113];

/// One cluster's host and its ordered port list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEndpoint {
    pub host: String,
    pub ports: Vec<u16>,
}

impl ClusterEndpoint {
    pub fn new(host: impl Into<String>, ports: impl Into<Vec<u16>>) -> Self {
        Self {
            host: host.into(),
            ports: ports.into(),
        }
    }
}

/// Fixed cluster configuration, not derived from the station registry.
///
/// Defaults are the production deployment's addresses; tests override them
/// with loopback listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterTable {
    a: ClusterEndpoint,
    b: ClusterEndpoint,
    c: ClusterEndpoint,
}

impl ClusterTable {
    pub fn new(a: ClusterEndpoint, b: ClusterEndpoint, c: ClusterEndpoint) -> Self {
        Self { a, b, c }
    }

    pub fn endpoint(&self, cluster: ServerCluster) -> &ClusterEndpoint {
        match cluster {
            ServerCluster::A => &self.a,
            ServerCluster::B => &self.b,
            ServerCluster::C => &self.c,
        }
    }

    pub fn set(&mut self, cluster: ServerCluster, endpoint: ClusterEndpoint) {
        match cluster {
            ServerCluster::A => self.a = endpoint,
            ServerCluster::B => self.b = endpoint,
            ServerCluster::C => self.c = endpoint,
        }
    }
}

impl Default for ClusterTable {
    fn default() -> Self {
        Self {
            a: ClusterEndpoint::new("100.71.0.249", DEFAULT_PORTS),
            b: ClusterEndpoint::new("100.71.0.246", DEFAULT_PORTS),
            c: ClusterEndpoint::new("100.71.0.243", DEFAULT_PORTS),
        }
    }
}

/// Dispatcher configuration.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub clusters: ClusterTable,
    /// Bound on one port attempt: connect, write and first read together.
    pub attempt_timeout: Duration,
    /// Fixed delay between consecutive stations of one cluster. A deliberate
    /// throttle, not adaptive backpressure.
    pub pacing: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            clusters: ClusterTable::default(),
            attempt_timeout: Duration::from_secs(5),
            pacing: Duration::from_millis(100),
        }
    }
}
