//! Residual network: adjacency lists over paired forward/reverse edges.
//!
//! Edges are stored in pairs, so the reverse of edge `e` is always `e ^ 1`.
//! Forward edges have even ids. A freshly added reverse edge has zero residual
//! capacity; pushing flow along `e` moves that amount of residual onto `e ^ 1`,
//! keeping `residual(e) + residual(e ^ 1)` constant.

pub type EdgeId = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResidualNetwork {
    // node -> edge ids leaving it (forward and reverse)
    adjacency: Vec<Vec<EdgeId>>,
    heads: Vec<usize>,
    residual: Vec<u64>,
    initial: Vec<u64>,
}

impl ResidualNetwork {
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            heads: Vec::new(),
            residual: Vec::new(),
            initial: Vec::new(),
        }
    }

    /// Add edge `from -> to` with `capacity` and its zero-capacity reverse.
    /// Returns the id of the forward edge.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: u64) -> EdgeId {
        let id = self.heads.len();

        self.heads.push(to);
        self.residual.push(capacity);
        self.initial.push(capacity);
        self.adjacency[from].push(id);

        self.heads.push(from);
        self.residual.push(0);
        self.initial.push(0);
        self.adjacency[to].push(id + 1);

        id
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of forward edges.
    pub fn edge_count(&self) -> usize {
        self.heads.len() / 2
    }

    #[inline]
    pub fn reverse(e: EdgeId) -> EdgeId {
        e ^ 1
    }

    #[inline]
    pub fn is_forward(e: EdgeId) -> bool {
        e & 1 == 0
    }

    #[inline]
    pub fn head(&self, e: EdgeId) -> usize {
        self.heads[e]
    }

    #[inline]
    pub fn tail(&self, e: EdgeId) -> usize {
        self.heads[e ^ 1]
    }

    #[inline]
    pub fn residual(&self, e: EdgeId) -> u64 {
        self.residual[e]
    }

    /// Capacity the edge was created with (zero for reverse edges).
    #[inline]
    pub fn capacity(&self, e: EdgeId) -> u64 {
        self.initial[e]
    }

    /// Net flow currently carried by forward edge `e`.
    #[inline]
    pub fn flow(&self, e: EdgeId) -> u64 {
        debug_assert!(Self::is_forward(e));
        self.initial[e] - self.residual[e]
    }

    #[inline]
    pub fn out_edges(&self, u: usize) -> &[EdgeId] {
        &self.adjacency[u]
    }

    /// Push `amount` along `e`. Caller guarantees `amount <= residual(e)`.
    #[inline]
    pub fn push(&mut self, e: EdgeId, amount: u64) {
        debug_assert!(amount <= self.residual[e]);
        self.residual[e] -= amount;
        self.residual[e ^ 1] += amount;
    }

    /// Per node: forward flow in minus forward flow out.
    ///
    /// Zero everywhere except the source (negative) and sink (positive) of a valid flow.
    pub fn node_balance(&self) -> Vec<i128> {
        let mut balance = vec![0i128; self.node_count()];
        for e in (0..self.heads.len()).step_by(2) {
            let f = self.flow(e) as i128;
            balance[self.tail(e)] -= f;
            balance[self.head(e)] += f;
        }
        balance
    }
}
