//! Sink aggregation: one synthetic node standing for "any acceptable target".

use crate::{CapacityGraph, EdgeId, ResidualNetwork};

/// Residual network extended with the synthetic sink.
///
/// Built fresh per request; the base [`CapacityGraph`] is never touched.
#[derive(Clone, Debug)]
pub struct AggregatedNetwork {
    pub network: ResidualNetwork,
    pub sink: usize,
    /// CSR slot of the capacity graph -> forward residual edge.
    pub slot_edges: Vec<EdgeId>,
    /// `(target, target -> sink edge)` in the order targets were given.
    pub target_edges: Vec<(usize, EdgeId)>,
}

pub struct SinkAggregator;

impl SinkAggregator {
    /// Copy `graph` into a residual network of `D + 1` nodes and connect every target
    /// to sink `D` with capacity `min(max_in[t], max_out[t])`. The sink has no outgoing
    /// capacity, so with no targets it is unreachable.
    pub fn aggregate(graph: &CapacityGraph, targets: &[usize], max_in: &[u32], max_out: &[u32]) -> AggregatedNetwork {
        let sink = graph.node_count();
        let mut network = ResidualNetwork::new(sink + 1);

        let mut slot_edges = Vec::with_capacity(graph.edge_count());
        for u in 0..graph.node_count() {
            for slot in graph.row(u) {
                slot_edges.push(network.add_edge(u, graph.col_idx[slot], graph.values[slot]));
            }
        }

        let target_edges = targets
            .iter()
            .map(|&t| {
                let cap = max_in[t].min(max_out[t]) as u64;
                (t, network.add_edge(t, sink, cap))
            })
            .collect();

        AggregatedNetwork {
            network,
            sink,
            slot_edges,
            target_edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Connection;

    fn graph() -> (CapacityGraph, Vec<u32>, Vec<u32>) {
        let conns: Vec<Connection> = vec![(0, 1, 50).into(), (1, 2, 40).into(), (0, 2, 10).into()];
        let max_in = vec![100, 100, 30];
        let max_out = vec![100, 60, 25];
        (CapacityGraph::build(3, &conns, &max_in, &max_out), max_in, max_out)
    }

    #[test]
    fn adds_one_sink_node() {
        let (g, max_in, max_out) = graph();
        let agg = SinkAggregator::aggregate(&g, &[2], &max_in, &max_out);
        assert_eq!(agg.sink, 3);
        assert_eq!(agg.network.node_count(), 4);
        assert_eq!(agg.network.edge_count(), g.edge_count() + 1);
    }

    #[test]
    fn target_edge_uses_own_limits() {
        let (g, max_in, max_out) = graph();
        let agg = SinkAggregator::aggregate(&g, &[2, 1], &max_in, &max_out);

        let (t, e) = agg.target_edges[0];
        assert_eq!(t, 2);
        assert_eq!(agg.network.capacity(e), 25);
        assert_eq!(agg.network.head(e), agg.sink);

        let (t, e) = agg.target_edges[1];
        assert_eq!(t, 1);
        assert_eq!(agg.network.capacity(e), 60);
    }

    #[test]
    fn sink_has_no_outgoing_capacity() {
        let (g, max_in, max_out) = graph();
        let agg = SinkAggregator::aggregate(&g, &[1, 2], &max_in, &max_out);
        assert!(agg
            .network
            .out_edges(agg.sink)
            .iter()
            .all(|&e| agg.network.residual(e) == 0));
    }

    #[test]
    fn slot_edges_mirror_capacity_graph() {
        let (g, max_in, max_out) = graph();
        let agg = SinkAggregator::aggregate(&g, &[], &max_in, &max_out);
        assert!(agg.target_edges.is_empty());
        for u in 0..g.node_count() {
            for slot in g.row(u) {
                let e = agg.slot_edges[slot];
                assert_eq!(agg.network.tail(e), u);
                assert_eq!(agg.network.head(e), g.col_idx[slot]);
                assert_eq!(agg.network.capacity(e), g.values[slot]);
            }
        }
    }

    #[test]
    fn base_graph_is_reusable() {
        let (g, max_in, max_out) = graph();
        let before = g.clone();
        let _ = SinkAggregator::aggregate(&g, &[2], &max_in, &max_out);
        let _ = SinkAggregator::aggregate(&g, &[1], &max_in, &max_out);
        assert_eq!(g, before);
    }
}
