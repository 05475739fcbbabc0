//! bflow-core: Zero-dependency max-throughput solver for backup distribution networks
//!
//! Pipeline: [`CapacityGraph`] (node limits folded into edges) ->
//! [`SinkAggregator`] (one synthetic sink for all targets) -> [`MaxFlowEngine`].
//! Input is trusted; validation lives in `bflow-core-plus`.

pub mod connection;
pub mod capacity;
pub mod residual;
pub mod sink;
pub mod engine;

// Re-exports
pub use connection::Connection;
pub use capacity::{CapacityGraph, folded_capacity};
pub use residual::{EdgeId, ResidualNetwork};
pub use sink::{AggregatedNetwork, SinkAggregator};
pub use engine::{AugmentingPath, EngineState, MaxFlowEngine};

/// Maximum throughput deliverable from `origin` to any combination of `targets`.
///
/// The node count is `max_in.len()`. Preconditions (not checked): `origin` is not a
/// target, targets are distinct, every id is in range, at most one connection per
/// ordered pair, every throughput is positive.
pub fn max_throughput(
    connections: &[Connection],
    max_in: &[u32],
    max_out: &[u32],
    origin: usize,
    targets: &[usize],
) -> u64 {
    let graph = CapacityGraph::build(max_in.len(), connections, max_in, max_out);
    let aggregated = SinkAggregator::aggregate(&graph, targets, max_in, max_out);
    MaxFlowEngine::new(aggregated.network, origin, aggregated.sink).run()
}
