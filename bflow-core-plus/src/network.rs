//! Validated network and request types owned by the planner.

use bflow_core::Connection;

use crate::error::{PlanError, PlanResult};
use crate::validate::{validate_network, validate_request};

/// Connections plus per-node limits, checked once on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "NetworkRepr", into = "NetworkRepr"))]
pub struct BackupNetwork {
    connections: Vec<Connection>,
    max_in: Vec<u32>,
    max_out: Vec<u32>,
}

impl BackupNetwork {
    pub fn new(connections: Vec<Connection>, max_in: Vec<u32>, max_out: Vec<u32>) -> PlanResult<Self> {
        validate_network(&connections, &max_in, &max_out)?;
        Ok(Self { connections, max_in, max_out })
    }

    pub fn node_count(&self) -> usize {
        self.max_in.len()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn max_in(&self) -> &[u32] {
        &self.max_in
    }

    pub fn max_out(&self) -> &[u32] {
        &self.max_out
    }
}

/// Which node should be backed up, and where the data may go.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackupRequest {
    pub origin: usize,
    pub targets: Vec<usize>,
}

impl BackupRequest {
    pub fn new(origin: usize, targets: Vec<usize>) -> Self {
        Self { origin, targets }
    }

    pub fn validate(&self, network: &BackupNetwork) -> PlanResult<()> {
        validate_request(network.node_count(), self.origin, &self.targets)
    }
}

/// On-disk shape: connections as `[from, to, throughput]` triples.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct NetworkRepr {
    connections: Vec<(usize, usize, u32)>,
    max_in: Vec<u32>,
    max_out: Vec<u32>,
}

#[cfg(feature = "serde")]
impl TryFrom<NetworkRepr> for BackupNetwork {
    type Error = PlanError;

    fn try_from(repr: NetworkRepr) -> PlanResult<Self> {
        let connections = repr.connections.into_iter().map(Connection::from).collect();
        BackupNetwork::new(connections, repr.max_in, repr.max_out)
    }
}

#[cfg(feature = "serde")]
impl From<BackupNetwork> for NetworkRepr {
    fn from(net: BackupNetwork) -> Self {
        Self {
            connections: net.connections.iter().map(|c| (c.from, c.to, c.throughput)).collect(),
            max_in: net.max_in,
            max_out: net.max_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates() {
        let ok = BackupNetwork::new(vec![Connection::new(0, 1, 10)], vec![10, 10], vec![10, 10]);
        assert!(ok.is_ok());
        let bad = BackupNetwork::new(vec![Connection::new(0, 1, 10)], vec![10, 10, 10], vec![10, 10, 10]);
        assert_eq!(bad, Err(PlanError::IsolatedNode(2)));
    }

    #[test]
    fn request_checked_against_network() {
        let net = BackupNetwork::new(vec![Connection::new(0, 1, 10)], vec![10, 10], vec![10, 10]).unwrap();
        assert!(BackupRequest::new(0, vec![1]).validate(&net).is_ok());
        assert_eq!(
            BackupRequest::new(0, vec![2]).validate(&net),
            Err(PlanError::NodeOutOfRange { node: 2, node_count: 2 })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn reads_triples_and_rejects_invalid() {
        let json = r#"{"connections": [[0, 1, 30], [1, 2, 20]], "max_in": [50, 50, 50], "max_out": [50, 50, 50]}"#;
        let net: BackupNetwork = serde_json::from_str(json).unwrap();
        assert_eq!(net.connections()[1], Connection::new(1, 2, 20));

        let dup = r#"{"connections": [[0, 1, 30], [0, 1, 20]], "max_in": [50, 50], "max_out": [50, 50]}"#;
        let err = serde_json::from_str::<BackupNetwork>(dup).unwrap_err();
        assert!(err.to_string().contains("duplicate connection 0 -> 1"));
    }
}
