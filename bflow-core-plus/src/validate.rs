//! Boundary checks for everything the core takes on trust.

use std::collections::HashSet;

use bflow_core::Connection;

use crate::error::{PlanError, PlanResult};

/// Check limits and connections of a network of `max_in.len()` nodes.
pub fn validate_network(connections: &[Connection], max_in: &[u32], max_out: &[u32]) -> PlanResult<()> {
    if max_in.len() != max_out.len() {
        return Err(PlanError::LimitLengthMismatch {
            max_in: max_in.len(),
            max_out: max_out.len(),
        });
    }
    let node_count = max_in.len();
    if node_count == 0 {
        return Err(PlanError::EmptyNetwork);
    }

    let mut seen = HashSet::with_capacity(connections.len());
    let mut incident = vec![false; node_count];
    for conn in connections {
        check_node(conn.from, node_count)?;
        check_node(conn.to, node_count)?;
        if conn.throughput == 0 {
            return Err(PlanError::ZeroThroughput { from: conn.from, to: conn.to });
        }
        if !seen.insert((conn.from, conn.to)) {
            return Err(PlanError::DuplicateConnection { from: conn.from, to: conn.to });
        }
        incident[conn.from] = true;
        incident[conn.to] = true;
    }

    match incident.iter().position(|&touched| !touched) {
        Some(node) => Err(PlanError::IsolatedNode(node)),
        None => Ok(()),
    }
}

/// Check origin and targets against a network of `node_count` nodes.
pub fn validate_request(node_count: usize, origin: usize, targets: &[usize]) -> PlanResult<()> {
    check_node(origin, node_count)?;
    let mut seen = HashSet::with_capacity(targets.len());
    for &t in targets {
        check_node(t, node_count)?;
        if t == origin {
            return Err(PlanError::OriginIsTarget(origin));
        }
        if !seen.insert(t) {
            return Err(PlanError::DuplicateTarget(t));
        }
    }
    Ok(())
}

#[inline]
fn check_node(node: usize, node_count: usize) -> PlanResult<()> {
    if node < node_count {
        Ok(())
    } else {
        Err(PlanError::NodeOutOfRange { node, node_count })
    }
}
