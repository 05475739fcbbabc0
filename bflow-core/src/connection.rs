//! Directed communication channel between two data centres.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub throughput: u32,
}

impl Connection {
    pub fn new(from: usize, to: usize, throughput: u32) -> Self {
        Self { from, to, throughput }
    }
}

impl From<(usize, usize, u32)> for Connection {
    fn from((from, to, throughput): (usize, usize, u32)) -> Self {
        Self { from, to, throughput }
    }
}
