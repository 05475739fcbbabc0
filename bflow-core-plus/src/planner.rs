//! Backup planner that composes bflow-core and adds:
//! - boundary validation of networks and requests
//! - a base capacity graph built once and shared by every request
//! - a choice of capacity model (edge folding or node splitting)
//! - stepwise solving with per-augmentation tracing, and a per-connection report
//!
//! Every request gets its own extended network; the base graph is never mutated.

use bflow_core::{AugmentingPath, CapacityGraph, EdgeId, EngineState, MaxFlowEngine};
use tracing::{debug, info, warn};

use crate::error::PlanResult;
use crate::model::CapacityModel;
use crate::network::{BackupNetwork, BackupRequest};
use crate::report::BackupPlan;

pub struct BackupPlanner {
    network: BackupNetwork,
    base: CapacityGraph,
    model: CapacityModel,
}

impl BackupPlanner {
    pub fn new(network: BackupNetwork) -> Self {
        let base = CapacityGraph::build(
            network.node_count(),
            network.connections(),
            network.max_in(),
            network.max_out(),
        );
        Self {
            network,
            base,
            model: CapacityModel::default(),
        }
    }

    pub fn with_model(mut self, model: CapacityModel) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> CapacityModel {
        self.model
    }

    pub fn network(&self) -> &BackupNetwork {
        &self.network
    }

    pub fn base_graph(&self) -> &CapacityGraph {
        &self.base
    }

    /// Validate `request` and build a fresh engine for it without running it.
    pub fn prepare(&self, request: &BackupRequest) -> PlanResult<PreparedFlow> {
        if let Err(err) = request.validate(&self.network) {
            warn!(origin = request.origin, error = %err, "rejected backup request");
            return Err(err);
        }

        let ext = self.model.extend(&self.base, &self.network, request);
        debug!(
            model = ?self.model,
            nodes = ext.network.node_count(),
            edges = ext.network.edge_count(),
            "built extended network"
        );

        Ok(PreparedFlow {
            engine: MaxFlowEngine::new(ext.network, ext.source, ext.sink),
            connection_edges: ext.connection_edges,
            target_edges: ext.target_edges,
            origin: request.origin,
            model: self.model,
        })
    }

    /// Validate, solve to completion and report.
    pub fn plan(&self, request: &BackupRequest) -> PlanResult<BackupPlan> {
        let span = tracing::info_span!("plan", origin = request.origin, targets = request.targets.len());
        let _enter = span.enter();

        let mut flow = self.prepare(request)?;
        flow.run();
        Ok(flow.finish())
    }
}

/// An engine bound to one request, with the mapping back onto connections and targets.
pub struct PreparedFlow {
    engine: MaxFlowEngine,
    connection_edges: Vec<EdgeId>,
    target_edges: Vec<(usize, EdgeId)>,
    origin: usize,
    model: CapacityModel,
}

impl PreparedFlow {
    /// One augmentation; `None` once the maximum is reached.
    pub fn step(&mut self) -> Option<AugmentingPath> {
        let path = self.engine.step();
        match &path {
            Some(p) => debug!(
                bottleneck = p.bottleneck,
                hops = p.edges.len(),
                total = self.engine.total_flow(),
                "augmented"
            ),
            None => debug!(augmentations = self.engine.augmentations(), "no augmenting path left"),
        }
        path
    }

    pub fn run(&mut self) -> u64 {
        while self.step().is_some() {}
        self.engine.total_flow()
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn total_flow(&self) -> u64 {
        self.engine.total_flow()
    }

    pub fn augmentations(&self) -> usize {
        self.engine.augmentations()
    }

    pub fn model(&self) -> CapacityModel {
        self.model
    }

    pub fn engine(&self) -> &MaxFlowEngine {
        &self.engine
    }

    /// Flow currently routed over connection `idx` (input order).
    pub fn connection_flow(&self, idx: usize) -> u64 {
        self.engine.network().flow(self.connection_edges[idx])
    }

    /// Usable capacity of connection `idx` after folding in node limits.
    pub fn connection_capacity(&self, idx: usize) -> u64 {
        self.engine.network().capacity(self.connection_edges[idx])
    }

    /// `(target, amount absorbed by the sink)`.
    pub fn delivered(&self) -> Vec<(usize, u64)> {
        let net = self.engine.network();
        self.target_edges.iter().map(|&(t, e)| (t, net.flow(e))).collect()
    }

    /// Snapshot the current flow as a plan (final once the engine has terminated).
    pub fn finish(&self) -> BackupPlan {
        let plan = BackupPlan {
            origin: self.origin,
            model: self.model,
            throughput: self.engine.total_flow(),
            augmentations: self.engine.augmentations(),
            connection_flows: (0..self.connection_edges.len()).map(|i| self.connection_flow(i)).collect(),
            delivered: self.delivered(),
        };
        info!(
            throughput = plan.throughput,
            augmentations = plan.augmentations,
            "backup plan ready"
        );
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use bflow_core::Connection;

    fn scenario_a() -> BackupNetwork {
        let conns = [(0, 1, 3000), (1, 2, 2000), (1, 3, 1000), (0, 3, 2000), (3, 4, 2000), (3, 2, 1000)]
            .into_iter()
            .map(Connection::from)
            .collect();
        BackupNetwork::new(conns, vec![5000, 3000, 3000, 3000, 2000], vec![5000, 3000, 3000, 2500, 1500]).unwrap()
    }

    #[test]
    fn plan_reports_throughput_and_deliveries() {
        let planner = BackupPlanner::new(scenario_a());
        let plan = planner.plan(&BackupRequest::new(0, vec![4, 2])).unwrap();

        assert_eq!(plan.throughput, 4500);
        let delivered: u64 = plan.delivered.iter().map(|&(_, f)| f).sum();
        assert_eq!(delivered, 4500);
        assert_eq!(plan.connection_flows.len(), 6);
        // everything leaves the origin over 0 -> 1 and 0 -> 3
        assert_eq!(plan.connection_flows[0] + plan.connection_flows[3], 4500);
    }

    #[test]
    fn planner_is_reusable_across_requests() {
        let planner = BackupPlanner::new(scenario_a());
        let first = planner.plan(&BackupRequest::new(0, vec![4, 2])).unwrap();
        let _ = planner.plan(&BackupRequest::new(1, vec![2])).unwrap();
        let again = planner.plan(&BackupRequest::new(0, vec![4, 2])).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn rejects_invalid_request() {
        let planner = BackupPlanner::new(scenario_a());
        assert_eq!(
            planner.plan(&BackupRequest::new(0, vec![0, 4])).unwrap_err(),
            PlanError::OriginIsTarget(0)
        );
        assert!(planner.prepare(&BackupRequest::new(9, vec![4])).is_err());
    }

    #[test]
    fn stepping_matches_plan() {
        let planner = BackupPlanner::new(scenario_a());
        let mut flow = planner.prepare(&BackupRequest::new(0, vec![4, 2])).unwrap();
        assert_eq!(flow.state(), EngineState::Searching);

        let mut pushed = 0;
        while let Some(path) = flow.step() {
            assert!(path.bottleneck > 0);
            assert_eq!(path.nodes.first(), Some(&0));
            pushed += path.bottleneck;
            assert_eq!(flow.total_flow(), pushed);
        }
        assert_eq!(flow.state(), EngineState::Terminated);
        assert_eq!(pushed, 4500);

        for i in 0..planner.network().connections().len() {
            assert!(flow.connection_flow(i) <= flow.connection_capacity(i));
        }
    }

    #[test]
    fn defaults_to_node_splitting() {
        let planner = BackupPlanner::new(scenario_a());
        assert_eq!(planner.model(), CapacityModel::NodeSplitting);
    }

    #[test]
    fn edge_folding_model_on_scenario() {
        let planner = BackupPlanner::new(scenario_a()).with_model(CapacityModel::EdgeFolding);
        let plan = planner.plan(&BackupRequest::new(0, vec![4, 2])).unwrap();
        assert_eq!(plan.throughput, 4500);
        assert_eq!(plan.model, CapacityModel::EdgeFolding);
    }
}
