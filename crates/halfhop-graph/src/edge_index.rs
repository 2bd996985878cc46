use halfhop_core::errors::{ErrorInfo, HalfHopError};

/// Directed edge list stored as a `[2, E]` matrix: one row of sources, one of targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EdgeIndex {
    sources: Vec<usize>,
    targets: Vec<usize>,
}

impl EdgeIndex {
    /// Creates an edge index from its two rows.
    fn new(sources: Vec<usize>, targets: Vec<usize>) -> Result<Self, HalfHopError> {
        if sources.len() != targets.len() {
            return Err(HalfHopError::Validation(
                ErrorInfo::new("edge-index-ragged", "edge index rows differ in length")
                    .with_context("sources", sources.len().to_string())
                    .with_context("targets", targets.len().to_string()),
            ));
        }
        Ok(Self { sources, targets })
    }

    /// Creates an edge index from signed rows, as produced by tensor exports.
    ///
    /// Fails unless there are exactly two rows of equal length holding
    /// non-negative ids.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, HalfHopError> {
        if rows.len() != 2 {
            return Err(HalfHopError::Validation(
                ErrorInfo::new("edge-index-rows", "edge index must have exactly two rows")
                    .with_context("rows", rows.len().to_string()),
            ));
        }
        let convert = |row: &[i64]| -> Result<Vec<usize>, HalfHopError> {
            row.iter()
                .enumerate()
                .map(|(column, &raw)| {
                    usize::try_from(raw).map_err(|_| {
                        HalfHopError::Validation(
                            ErrorInfo::new("node-out-of-range", "edge index holds a negative node id")
                                .with_context("column", column.to_string())
                                .with_context("node", raw.to_string()),
                        )
                    })
                })
                .collect()
        };
        Self::new(convert(&rows[0])?, convert(&rows[1])?)
    }

    /// Creates an edge index from `(source, target)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let (sources, targets) = pairs.into_iter().unzip();
        Self { sources, targets }
    }

    /// Empty edge index with room for `capacity` edges.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sources: Vec::with_capacity(capacity),
            targets: Vec::with_capacity(capacity),
        }
    }

    /// Number of edges (columns).
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns whether there are no edges.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Iterates over `(source, target)` pairs in column order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + '_ {
        self.sources
            .iter()
            .copied()
            .zip(self.targets.iter().copied())
    }

    /// Appends an edge.
    pub fn push(&mut self, source: usize, target: usize) {
        self.sources.push(source);
        self.targets.push(target);
    }

    /// Number of columns whose source equals their target.
    pub fn self_loop_count(&self) -> usize {
        self.iter().filter(|(src, dst)| src == dst).count()
    }

    /// Checks that every referenced node id lies in `[0, num_nodes)`.
    pub fn check_bounds(&self, num_nodes: usize) -> Result<(), HalfHopError> {
        for (column, (src, dst)) in self.iter().enumerate() {
            for (role, node) in [("source", src), ("target", dst)] {
                if node >= num_nodes {
                    return Err(HalfHopError::Validation(
                        ErrorInfo::new("node-out-of-range", "edge references a missing node")
                            .with_context("column", column.to_string())
                            .with_context("role", role)
                            .with_context("node", node.to_string())
                            .with_context("num_nodes", num_nodes.to_string()),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Copies both rows out as signed integers.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        [&self.sources, &self.targets]
            .iter()
            .map(|row| row.iter().map(|&node| node as i64).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_row_count() {
        let err = EdgeIndex::from_rows(&[vec![0, 1]]).unwrap_err();
        assert_eq!(err.info().code, "edge-index-rows");
        let err = EdgeIndex::from_rows(&[vec![0], vec![1], vec![2]]).unwrap_err();
        assert_eq!(err.info().code, "edge-index-rows");
    }

    #[test]
    fn rejects_ragged_and_negative_rows() {
        let err = EdgeIndex::from_rows(&[vec![0, 1], vec![1]]).unwrap_err();
        assert_eq!(err.info().code, "edge-index-ragged");
        let err = EdgeIndex::from_rows(&[vec![0, -1], vec![1, 0]]).unwrap_err();
        assert_eq!(err.info().code, "node-out-of-range");
        assert_eq!(err.info().context.get("column").map(String::as_str), Some("1"));
    }

    #[test]
    fn bounds_report_offending_column() {
        let edges = EdgeIndex::from_pairs([(0, 1), (1, 3)]);
        assert!(edges.check_bounds(4).is_ok());
        let err = edges.check_bounds(3).unwrap_err();
        assert_eq!(err.info().context.get("column").map(String::as_str), Some("1"));
        assert_eq!(err.info().context.get("role").map(String::as_str), Some("target"));
    }

    #[test]
    fn counts_self_loops() {
        let edges = EdgeIndex::from_pairs([(0, 0), (0, 1), (2, 2)]);
        assert_eq!(edges.self_loop_count(), 2);
        assert_eq!(edges.to_rows(), vec![vec![0, 0, 2], vec![0, 1, 2]]);
    }
}
