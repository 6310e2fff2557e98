//! The TCP dispatcher.

use alert_core::{AlertCategory, DispatchOutcome, ServerCluster, Station};
use futures::future::join_all;
use indexmap::IndexMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::codec::{build_command, LINE_TERMINATOR};
use crate::config::DispatcherConfig;
use crate::error::DispatchError;

/// Dispatches one protocol command per station, with strict in-order port
/// failover inside a cluster and concurrent fan-out across clusters.
///
/// Stations of one cluster are sent to sequentially (with a fixed pacing
/// delay between them) so a cluster is never hammered; the three clusters
/// are independent and run concurrently. The outcome list is only returned
/// once every station has finished, restored to input order.
#[derive(Debug, Clone)]
pub struct TelnetDispatcher {
    config: DispatcherConfig,
}

impl TelnetDispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Send the category's command to every station.
    ///
    /// Never fails as a whole: each station yields exactly one
    /// [`DispatchOutcome`], and a category with no protocol code yields
    /// `skipped` outcomes without opening a single connection.
    pub async fn send_to_stations(
        &self,
        stations: &[Station],
        category: AlertCategory,
    ) -> Vec<DispatchOutcome> {
        if stations.is_empty() {
            return Vec::new();
        }
        info!(
            category = %category,
            stations = stations.len(),
            "dispatching alert to stations"
        );

        let mut indexed: Vec<(usize, DispatchOutcome)> = Vec::with_capacity(stations.len());
        let mut by_cluster: IndexMap<ServerCluster, Vec<(usize, &Station)>> = IndexMap::new();

        for (pos, station) in stations.iter().enumerate() {
            // Decide skips up front so a code-less category never touches
            // the network and never pays the pacing delay.
            if build_command(&station.station_code, category).is_none() {
                debug!(
                    station = %station.display_name,
                    category = %category,
                    "no protocol code for category, skipping station"
                );
                indexed.push((pos, DispatchOutcome::skipped(station.clone())));
            } else {
                by_cluster.entry(station.cluster).or_default().push((pos, station));
            }
        }

        let cluster_runs = by_cluster
            .into_iter()
            .map(|(cluster, group)| self.dispatch_cluster(cluster, group, category));
        for mut outcomes in join_all(cluster_runs).await {
            indexed.append(&mut outcomes);
        }

        indexed.sort_by_key(|(pos, _)| *pos);
        indexed.into_iter().map(|(_, outcome)| outcome).collect()
    }

    /// Sequentially notify one cluster's stations, pacing between them.
    async fn dispatch_cluster(
        &self,
        cluster: ServerCluster,
        group: Vec<(usize, &Station)>,
        category: AlertCategory,
    ) -> Vec<(usize, DispatchOutcome)> {
        debug!(cluster = %cluster, stations = group.len(), "cluster dispatch started");
        let mut outcomes = Vec::with_capacity(group.len());
        for (i, (pos, station)) in group.into_iter().enumerate() {
            if i > 0 {
                sleep(self.config.pacing).await;
            }
            outcomes.push((pos, self.send_to_station(station, category).await));
        }
        outcomes
    }

    /// Try each of the station's cluster ports in declared order.
    async fn send_to_station(&self, station: &Station, category: AlertCategory) -> DispatchOutcome {
        // Presence of a code was checked by the caller; re-check rather
        // than unwrap so this stays safe standalone.
        let command = match build_command(&station.station_code, category) {
            Some(command) => command,
            None => return DispatchOutcome::skipped(station.clone()),
        };

        let endpoint = self.config.clusters.endpoint(station.cluster);
        let mut last_error: Option<DispatchError> = None;

        for &port in &endpoint.ports {
            match self.send_to_port(&endpoint.host, port, &command).await {
                Ok(response) => {
                    info!(
                        station = %station.display_name,
                        cluster = %station.cluster,
                        port,
                        response = %response,
                        "station notified"
                    );
                    return DispatchOutcome::succeeded(station.clone(), station.cluster, port);
                }
                Err(error) => {
                    warn!(
                        station = %station.display_name,
                        cluster = %station.cluster,
                        port,
                        error = %error,
                        "port attempt failed, trying next"
                    );
                    last_error = Some(error);
                }
            }
        }

        warn!(
            station = %station.display_name,
            cluster = %station.cluster,
            "all ports exhausted"
        );
        let reason = match last_error {
            Some(error) => error.to_string(),
            None => "no ports configured for cluster".to_string(),
        };
        DispatchOutcome::failed(station.clone(), reason)
    }

    /// One bounded attempt: connect, write the terminated command, read the
    /// first inbound chunk. A clean close before any data is an
    /// [`DispatchError::EmptyResponse`], never a success.
    async fn send_to_port(
        &self,
        host: &str,
        port: u16,
        command: &str,
    ) -> Result<String, DispatchError> {
        let addr = format!("{host}:{port}");
        let attempt = async {
            let mut stream =
                TcpStream::connect(&addr)
                    .await
                    .map_err(|source| DispatchError::Connect {
                        addr: addr.clone(),
                        source,
                    })?;
            debug!(addr = %addr, command = %command, "connected, sending command");

            stream
                .write_all(command.as_bytes())
                .await
                .map_err(|source| DispatchError::Io {
                    addr: addr.clone(),
                    source,
                })?;
            stream
                .write_all(LINE_TERMINATOR.as_bytes())
                .await
                .map_err(|source| DispatchError::Io {
                    addr: addr.clone(),
                    source,
                })?;

            let mut buf = [0u8; 1024];
            let n = stream
                .read(&mut buf)
                .await
                .map_err(|source| DispatchError::Io {
                    addr: addr.clone(),
                    source,
                })?;
            if n == 0 {
                return Err(DispatchError::EmptyResponse { addr: addr.clone() });
            }
            Ok(String::from_utf8_lossy(&buf[..n]).trim().to_string())
        };

        match timeout(self.config.attempt_timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(DispatchError::Timeout {
                addr,
                timeout: self.config.attempt_timeout,
            }),
        }
    }
}
