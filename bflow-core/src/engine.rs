//! Augmenting-path max-flow engine (depth-first Ford-Fulkerson).
//!
//! Each step searches the residual network for a source -> sink path of strictly
//! positive residual capacity, then pushes the path bottleneck along it. The engine
//! owns its network; the mutation is destructive, so independent requests need
//! their own network.

use crate::{EdgeId, ResidualNetwork};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// More augmenting paths may exist.
    Searching,
    /// The last search found no path; `total_flow` is the maximum.
    Terminated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AugmentingPath {
    /// Nodes from source to sink, inclusive.
    pub nodes: Vec<usize>,
    /// Residual edges traversed, `edges[i]` goes `nodes[i] -> nodes[i + 1]`.
    pub edges: Vec<EdgeId>,
    pub bottleneck: u64,
}

struct Frame {
    node: usize,
    // next position in out_edges(node) to try
    cursor: usize,
    via: Option<EdgeId>,
    bottleneck: u64,
}

pub struct MaxFlowEngine {
    network: ResidualNetwork,
    source: usize,
    sink: usize,
    state: EngineState,
    total: u64,
    augmentations: usize,
    // scratch reused across searches
    visited: Vec<bool>,
    stack: Vec<Frame>,
}

impl MaxFlowEngine {
    pub fn new(network: ResidualNetwork, source: usize, sink: usize) -> Self {
        let n = network.node_count();
        Self {
            network,
            source,
            sink,
            state: EngineState::Searching,
            total: 0,
            augmentations: 0,
            visited: vec![false; n],
            stack: Vec::new(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn total_flow(&self) -> u64 {
        self.total
    }

    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn sink(&self) -> usize {
        self.sink
    }

    pub fn network(&self) -> &ResidualNetwork {
        &self.network
    }

    pub fn into_network(self) -> ResidualNetwork {
        self.network
    }

    /// Depth-first search for a path with positive bottleneck.
    ///
    /// Each node is visited at most once; out-edges are tried in adjacency order and the
    /// first eligible one is taken.
    fn find_path(&mut self) -> Option<AugmentingPath> {
        if self.source == self.sink {
            return None;
        }
        self.visited.iter_mut().for_each(|v| *v = false);
        self.stack.clear();

        self.visited[self.source] = true;
        self.stack.push(Frame {
            node: self.source,
            cursor: 0,
            via: None,
            bottleneck: u64::MAX,
        });

        while let Some(top) = self.stack.last_mut() {
            if top.node == self.sink {
                break;
            }

            let out = self.network.out_edges(top.node);
            let mut next = None;
            while top.cursor < out.len() {
                let e = out[top.cursor];
                top.cursor += 1;
                let r = self.network.residual(e);
                let v = self.network.head(e);
                if r > 0 && !self.visited[v] {
                    next = Some(Frame {
                        node: v,
                        cursor: 0,
                        via: Some(e),
                        bottleneck: top.bottleneck.min(r),
                    });
                    break;
                }
            }

            match next {
                Some(frame) => {
                    self.visited[frame.node] = true;
                    self.stack.push(frame);
                }
                None => {
                    self.stack.pop();
                }
            }
        }

        let reached = self.stack.last()?;
        let bottleneck = reached.bottleneck;
        let nodes = self.stack.iter().map(|f| f.node).collect();
        let edges = self.stack.iter().filter_map(|f| f.via).collect();
        Some(AugmentingPath { nodes, edges, bottleneck })
    }

    fn augment(&mut self, path: &AugmentingPath) {
        for &e in &path.edges {
            self.network.push(e, path.bottleneck);
        }
        self.total += path.bottleneck;
        self.augmentations += 1;
    }

    /// One search + augmentation. Returns `None` (and terminates) once no path is left.
    pub fn step(&mut self) -> Option<AugmentingPath> {
        if self.state == EngineState::Terminated {
            return None;
        }
        match self.find_path() {
            Some(path) => {
                self.augment(&path);
                Some(path)
            }
            None => {
                self.state = EngineState::Terminated;
                None
            }
        }
    }

    /// Augment until no path remains; returns the maximum flow.
    pub fn run(&mut self) -> u64 {
        while self.step().is_some() {}
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> ResidualNetwork {
        // 0 -> 1 -> 3, 0 -> 2 -> 3, 1 -> 2
        let mut net = ResidualNetwork::new(4);
        net.add_edge(0, 1, 10);
        net.add_edge(0, 2, 8);
        net.add_edge(1, 2, 3);
        net.add_edge(1, 3, 5);
        net.add_edge(2, 3, 7);
        net
    }

    #[test]
    fn diamond_max_flow() {
        let mut engine = MaxFlowEngine::new(diamond(), 0, 3);
        assert_eq!(engine.run(), 12);
        assert_eq!(engine.state(), EngineState::Terminated);
    }

    #[test]
    fn first_path_follows_adjacency_order() {
        let mut engine = MaxFlowEngine::new(diamond(), 0, 3);
        let path = engine.step().unwrap();
        // 0 -> 1 first, then 1 -> 2 (added before 1 -> 3), then 2 -> 3
        assert_eq!(path.nodes, vec![0, 1, 2, 3]);
        assert_eq!(path.bottleneck, 3);
        assert_eq!(path.edges.len(), 3);
        assert_eq!(engine.total_flow(), 3);
        assert_eq!(engine.augmentations(), 1);
    }

    #[test]
    fn uses_reverse_edges_to_reroute() {
        // The greedy first path 0 -> 1 -> 2 -> 3 blocks both direct routes
        // unless flow on 1 -> 2 is undone.
        let mut net = ResidualNetwork::new(4);
        net.add_edge(0, 1, 1);
        net.add_edge(1, 2, 1);
        net.add_edge(0, 2, 1);
        net.add_edge(2, 3, 1);
        net.add_edge(1, 3, 1);
        let mut engine = MaxFlowEngine::new(net, 0, 3);
        assert_eq!(engine.run(), 2);

        let balance = engine.network().node_balance();
        assert_eq!(balance, vec![-2, 0, 0, 2]);
    }

    #[test]
    fn step_after_termination_is_noop() {
        let mut net = ResidualNetwork::new(2);
        net.add_edge(0, 1, 4);
        let mut engine = MaxFlowEngine::new(net, 0, 1);
        assert!(engine.step().is_some());
        assert!(engine.step().is_none());
        assert_eq!(engine.state(), EngineState::Terminated);
        assert!(engine.step().is_none());
        assert_eq!(engine.total_flow(), 4);
    }

    #[test]
    fn unreachable_sink_yields_zero() {
        let mut net = ResidualNetwork::new(3);
        net.add_edge(0, 1, 9);
        let mut engine = MaxFlowEngine::new(net, 0, 2);
        assert_eq!(engine.run(), 0);
        assert_eq!(engine.augmentations(), 0);
    }

    #[test]
    fn residual_pairs_conserved_after_run() {
        let original = diamond();
        let mut engine = MaxFlowEngine::new(original.clone(), 0, 3);
        engine.run();
        let net = engine.network();
        for e in (0..2 * net.edge_count()).step_by(2) {
            assert_eq!(net.residual(e) + net.residual(e ^ 1), original.capacity(e));
        }
    }
}
