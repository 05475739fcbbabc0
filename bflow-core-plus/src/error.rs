/// Rejections raised at the planner boundary, before any graph is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("network has no nodes")]
    EmptyNetwork,
    #[error("limit arrays differ in length: max_in has {max_in}, max_out has {max_out}")]
    LimitLengthMismatch { max_in: usize, max_out: usize },
    #[error("node {node} out of range (network has {node_count} nodes)")]
    NodeOutOfRange { node: usize, node_count: usize },
    #[error("connection {from} -> {to} has zero throughput")]
    ZeroThroughput { from: usize, to: usize },
    #[error("duplicate connection {from} -> {to}")]
    DuplicateConnection { from: usize, to: usize },
    #[error("node {0} has no incident connection")]
    IsolatedNode(usize),
    #[error("origin {0} is listed as a target")]
    OriginIsTarget(usize),
    #[error("target {0} listed more than once")]
    DuplicateTarget(usize),
}

pub type PlanResult<T, E = PlanError> = core::result::Result<T, E>;
