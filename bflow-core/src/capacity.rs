//! Capacity graph in CSR (Compressed Sparse Row) form.
//!
//! Every stored value is already folded against the node limits:
//! `capacity(u, v) = min(throughput(u, v), max_out[u], max_in[v])`.
//! Rows are sorted by destination, so scanning a row enumerates neighbours in the
//! same order a dense `D x D` matrix row scan would.

use crate::Connection;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapacityGraph {
    pub row_ptr: Vec<usize>,
    pub col_idx: Vec<usize>,
    pub values: Vec<u64>,
    // CSR slot -> index into the connection list the graph was built from
    connection_idx: Vec<usize>,
}

/// Folded capacity of one connection: the tightest of edge throughput,
/// sender's outbound limit and receiver's inbound limit.
#[inline]
pub fn folded_capacity(conn: &Connection, max_in: &[u32], max_out: &[u32]) -> u64 {
    conn.throughput.min(max_out[conn.from]).min(max_in[conn.to]) as u64
}

impl CapacityGraph {
    /// Build the graph for `node_count` nodes.
    ///
    /// Input is assumed well formed: ids in range, at most one connection per ordered pair,
    /// `max_in`/`max_out` of length `node_count`. Out-of-range ids panic on indexing.
    pub fn build(node_count: usize, connections: &[Connection], max_in: &[u32], max_out: &[u32]) -> Self {
        debug_assert_eq!(max_in.len(), node_count);
        debug_assert_eq!(max_out.len(), node_count);

        let mut order: Vec<usize> = (0..connections.len()).collect();
        order.sort_unstable_by_key(|&i| (connections[i].from, connections[i].to));

        let mut row_ptr = vec![0usize; node_count + 1];
        for conn in connections {
            row_ptr[conn.from + 1] += 1;
        }
        for r in 0..node_count {
            row_ptr[r + 1] += row_ptr[r];
        }

        let mut col_idx = Vec::with_capacity(connections.len());
        let mut values = Vec::with_capacity(connections.len());
        for &i in &order {
            let conn = &connections[i];
            col_idx.push(conn.to);
            values.push(folded_capacity(conn, max_in, max_out));
        }

        Self {
            row_ptr,
            col_idx,
            values,
            connection_idx: order,
        }
    }

    pub fn node_count(&self) -> usize {
        self.row_ptr.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.col_idx.len()
    }

    /// CSR slot range of row `u`.
    #[inline]
    pub fn row(&self, u: usize) -> core::ops::Range<usize> {
        self.row_ptr[u]..self.row_ptr[u + 1]
    }

    /// Folded capacity from `u` to `v`; zero when no connection exists.
    pub fn capacity(&self, u: usize, v: usize) -> u64 {
        let range = self.row(u);
        match self.col_idx[range.clone()].binary_search(&v) {
            Ok(k) => self.values[range.start + k],
            Err(_) => 0,
        }
    }

    /// `(to, capacity)` pairs leaving `u`, in ascending `to` order.
    pub fn out_edges(&self, u: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.row(u).map(move |k| (self.col_idx[k], self.values[k]))
    }

    /// Index of the input connection stored at CSR `slot`.
    #[inline]
    pub fn connection_index(&self, slot: usize) -> usize {
        self.connection_idx[slot]
    }

    /// Total folded capacity leaving `u`.
    pub fn out_capacity(&self, u: usize) -> u64 {
        self.values[self.row(u)].iter().sum()
    }
}
