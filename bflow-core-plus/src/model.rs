//! Capacity models: how node limits enter the flow network.
//!
//! - `EdgeFolding`: per-edge `min(throughput, max_out[u], max_in[v])` plus the synthetic
//!   sink, exactly what `bflow_core::max_throughput` computes. Aggregate node limits are
//!   not enforced when several edges meet at a node, the origin included.
//! - `NodeSplitting`: node `v` becomes `v_in = v` and `v_out = v + D` joined by one edge
//!   carrying the node limit, so aggregate in/out flow through `v` is bounded exactly.
//!   The sink is `2D`.

use bflow_core::{CapacityGraph, EdgeId, ResidualNetwork, SinkAggregator};

use crate::network::{BackupNetwork, BackupRequest};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CapacityModel {
    EdgeFolding,
    #[default]
    NodeSplitting,
}

/// Flow network for one request, ready for the engine.
#[derive(Clone, Debug)]
pub struct ExtendedNetwork {
    pub network: ResidualNetwork,
    pub source: usize,
    pub sink: usize,
    /// Connection index (input order) -> forward residual edge.
    pub connection_edges: Vec<EdgeId>,
    /// `(target, edge into the sink)`.
    pub target_edges: Vec<(usize, EdgeId)>,
}

impl CapacityModel {
    /// Build the extended network for `request` on top of `base`.
    ///
    /// `base` must have been built from `network`; it is only read.
    pub fn extend(self, base: &CapacityGraph, network: &BackupNetwork, request: &BackupRequest) -> ExtendedNetwork {
        match self {
            CapacityModel::EdgeFolding => fold(base, network, request),
            CapacityModel::NodeSplitting => split(base, network, request),
        }
    }
}

fn fold(base: &CapacityGraph, network: &BackupNetwork, request: &BackupRequest) -> ExtendedNetwork {
    let agg = SinkAggregator::aggregate(base, &request.targets, network.max_in(), network.max_out());

    let mut connection_edges = vec![0; base.edge_count()];
    for (slot, &e) in agg.slot_edges.iter().enumerate() {
        connection_edges[base.connection_index(slot)] = e;
    }

    ExtendedNetwork {
        network: agg.network,
        source: request.origin,
        sink: agg.sink,
        connection_edges,
        target_edges: agg.target_edges,
    }
}

fn split(base: &CapacityGraph, network: &BackupNetwork, request: &BackupRequest) -> ExtendedNetwork {
    let d = base.node_count();
    let sink = 2 * d;
    let (max_in, max_out) = (network.max_in(), network.max_out());
    let mut residual = ResidualNetwork::new(2 * d + 1);

    // v_in -> v_out; the origin only sends, so only its outbound limit applies
    for v in 0..d {
        let limit = if v == request.origin {
            max_out[v]
        } else {
            max_in[v].min(max_out[v])
        };
        residual.add_edge(v, v + d, limit as u64);
    }

    let mut connection_edges = vec![0; base.edge_count()];
    for u in 0..d {
        for slot in base.row(u) {
            let e = residual.add_edge(u + d, base.col_idx[slot], base.values[slot]);
            connection_edges[base.connection_index(slot)] = e;
        }
    }

    let target_edges = request
        .targets
        .iter()
        .map(|&t| {
            let cap = max_in[t].min(max_out[t]) as u64;
            (t, residual.add_edge(t + d, sink, cap))
        })
        .collect();

    ExtendedNetwork {
        network: residual,
        source: request.origin,
        sink,
        connection_edges,
        target_edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bflow_core::{Connection, MaxFlowEngine};

    fn funnel() -> BackupNetwork {
        // Two routes converge on node 1, whose inbound limit is 10.
        let conns = [(0, 1, 100), (0, 2, 100), (2, 1, 100), (1, 3, 100)]
            .into_iter()
            .map(Connection::from)
            .collect();
        BackupNetwork::new(conns, vec![200, 10, 100, 100], vec![200, 100, 100, 100]).unwrap()
    }

    fn solve(model: CapacityModel, net: &BackupNetwork, req: &BackupRequest) -> u64 {
        let base = CapacityGraph::build(net.node_count(), net.connections(), net.max_in(), net.max_out());
        let ext = model.extend(&base, net, req);
        MaxFlowEngine::new(ext.network, ext.source, ext.sink).run()
    }

    #[test]
    fn folding_overshoots_aggregate_inbound_limit() {
        let net = funnel();
        let req = BackupRequest::new(0, vec![3]);
        assert_eq!(solve(CapacityModel::EdgeFolding, &net, &req), 20);
        assert_eq!(solve(CapacityModel::NodeSplitting, &net, &req), 10);
    }

    #[test]
    fn split_layout() {
        let net = funnel();
        let base = CapacityGraph::build(4, net.connections(), net.max_in(), net.max_out());
        let ext = CapacityModel::NodeSplitting.extend(&base, &net, &BackupRequest::new(0, vec![3]));

        assert_eq!(ext.sink, 8);
        assert_eq!(ext.network.node_count(), 9);
        // 4 internal + 4 connections + 1 sink edge
        assert_eq!(ext.network.edge_count(), 9);

        let e = ext.connection_edges[2]; // 2 -> 1
        assert_eq!(ext.network.tail(e), 2 + 4);
        assert_eq!(ext.network.head(e), 1);

        let (t, e) = ext.target_edges[0];
        assert_eq!(t, 3);
        assert_eq!(ext.network.tail(e), 3 + 4);
        assert_eq!(ext.network.head(e), 8);
    }

    #[test]
    fn fold_maps_connections_in_input_order() {
        let net = funnel();
        let base = CapacityGraph::build(4, net.connections(), net.max_in(), net.max_out());
        let ext = CapacityModel::EdgeFolding.extend(&base, &net, &BackupRequest::new(0, vec![3]));
        for (i, conn) in net.connections().iter().enumerate() {
            let e = ext.connection_edges[i];
            assert_eq!(ext.network.tail(e), conn.from);
            assert_eq!(ext.network.head(e), conn.to);
        }
    }
}
