// Backend abstraction for the TUI so the stepper is independent of how flow is solved.

use anyhow::Result;
use bflow_core::{AugmentingPath, Connection, EngineState};
use bflow_core_plus::{BackupPlan, BackupPlanner, CapacityModel, PreparedFlow};

use crate::config::Scenario;

/// Common interface for anything that can drive the stepper.
pub trait FlowBackend {
    /// One augmentation; `None` once no augmenting path is left.
    fn step(&mut self) -> Option<AugmentingPath>;
    /// Connections in input order (rows of the utilisation panel).
    fn connections(&self) -> &[Connection];
    /// `(flow, usable capacity)` of connection `idx`.
    fn load(&self, idx: usize) -> (u64, u64);
    fn total_flow(&self) -> u64;
    fn augmentations(&self) -> usize;
    fn state(&self) -> EngineState;
    fn model(&self) -> CapacityModel;
    /// Human readable route, in original node ids.
    fn describe(&self, path: &AugmentingPath) -> String;
    /// Snapshot of the current flow.
    fn plan(&self) -> BackupPlan;
}

/// Implementation backed by bflow-core-plus (validated planner, either capacity model).
pub struct PlannerBackend {
    planner: BackupPlanner,
    flow: PreparedFlow,
}

impl PlannerBackend {
    pub fn new(scenario: Scenario, model: CapacityModel) -> Result<Self> {
        let planner = BackupPlanner::new(scenario.network).with_model(model);
        let flow = planner.prepare(&scenario.request)?;
        Ok(Self { planner, flow })
    }

    /// Map an engine node to `Some(original id)`, or `None` for the synthetic sink.
    fn original_node(&self, node: usize) -> Option<usize> {
        let d = self.planner.network().node_count();
        if node == self.flow.engine().sink() {
            None
        } else if node >= d {
            // out-twin under node splitting
            Some(node - d)
        } else {
            Some(node)
        }
    }
}

impl FlowBackend for PlannerBackend {
    fn step(&mut self) -> Option<AugmentingPath> {
        self.flow.step()
    }

    fn connections(&self) -> &[Connection] {
        self.planner.network().connections()
    }

    fn load(&self, idx: usize) -> (u64, u64) {
        (self.flow.connection_flow(idx), self.flow.connection_capacity(idx))
    }

    fn total_flow(&self) -> u64 {
        self.flow.total_flow()
    }

    fn augmentations(&self) -> usize {
        self.flow.augmentations()
    }

    fn state(&self) -> EngineState {
        self.flow.state()
    }

    fn model(&self) -> CapacityModel {
        self.flow.model()
    }

    fn describe(&self, path: &AugmentingPath) -> String {
        let mut hops: Vec<String> = Vec::with_capacity(path.nodes.len());
        let mut last = None;
        for &node in &path.nodes {
            let original = self.original_node(node);
            // in/out twins of one node collapse into a single hop
            if last == Some(original) {
                continue;
            }
            last = Some(original);
            hops.push(match original {
                Some(id) => id.to_string(),
                None => "sink".to_string(),
            });
        }
        format!("+{}  {}", path.bottleneck, hops.join(" -> "))
    }

    fn plan(&self) -> BackupPlan {
        self.flow.finish()
    }
}
