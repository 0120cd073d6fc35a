// Elementary-operation counters for benchmarking read paths
//
// Read-path functions take a `&mut dyn Metrics`. The plain entry points pass
// `NoopMetrics`, so counting never changes what a search returns.

/// One unit of work on a read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// A trie node was entered.
    NodeVisit,
    /// A child slot was inspected.
    EdgeProbe,
    /// One cell of an edit-distance row was computed.
    DpCell,
    /// Two strings were compared (sorted-array baseline).
    KeyComparison,
}

/// Sink for operation counts.
pub trait Metrics {
    fn record(&mut self, op: Operation);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl Metrics for NoopMetrics {
    #[inline]
    fn record(&mut self, _op: Operation) {}
}

/// Tallies each operation kind separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingMetrics {
    pub node_visits: u64,
    pub edge_probes: u64,
    pub dp_cells: u64,
    pub key_comparisons: u64,
}

impl CountingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum over all operation kinds.
    pub fn total(&self) -> u64 {
        self.node_visits + self.edge_probes + self.dp_cells + self.key_comparisons
    }
}

impl Metrics for CountingMetrics {
    fn record(&mut self, op: Operation) {
        match op {
            Operation::NodeVisit => self.node_visits += 1,
            Operation::EdgeProbe => self.edge_probes += 1,
            Operation::DpCell => self.dp_cells += 1,
            Operation::KeyComparison => self.key_comparisons += 1,
        }
    }
}
