//! Result of one backup request.

use core::fmt;

use crate::model::CapacityModel;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BackupPlan {
    pub origin: usize,
    pub model: CapacityModel,
    pub throughput: u64,
    pub augmentations: usize,
    /// Flow per connection, in the order connections were supplied.
    pub connection_flows: Vec<u64>,
    /// `(target, amount delivered to it)`, in request order.
    pub delivered: Vec<(usize, u64)>,
}

impl BackupPlan {
    /// Connections that carry any flow, as `(index, flow)`.
    pub fn used_connections(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.connection_flows
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, f)| f > 0)
    }
}

impl fmt::Display for BackupPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "origin {}: max throughput {} ({} augmenting paths, {:?})",
            self.origin, self.throughput, self.augmentations, self.model
        )?;
        for &(target, amount) in &self.delivered {
            writeln!(f, "  target {:>4} <- {}", target, amount)?;
        }
        Ok(())
    }
}
