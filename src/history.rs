use crate::tableau::Tableau;

use nalgebra::DMatrix;

/// An append-only log of tableau snapshots, one per iteration plus the
/// initial tableau. Snapshots are for external inspection only; the engine
/// never reads them back. Consumers may rely on the first row being the
/// objective row and the last column being the right-hand side, but not on
/// a fixed column or snapshot count.
#[derive(Debug, Clone, Default)]
pub struct TableauHistory {
    snapshots: Vec<DMatrix<f64>>,
}

impl TableauHistory {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    pub(crate) fn record(&mut self, tableau: &Tableau) {
        self.snapshots.push(tableau.snapshot());
    }

    pub(crate) fn append(&mut self, mut other: TableauHistory) {
        self.snapshots.append(&mut other.snapshots);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, iteration: usize) -> Option<&DMatrix<f64>> {
        self.snapshots.get(iteration)
    }

    pub fn iter(&self) -> std::slice::Iter<DMatrix<f64>> {
        self.snapshots.iter()
    }

    pub fn snapshots(&self) -> &[DMatrix<f64>] {
        self.snapshots.as_slice()
    }
}
