#![allow(non_snake_case)]

use crate::problem::{ConstraintOp, Problem};
use crate::util::EPS;

use nalgebra::{DMatrix, DVector};

/// The constraint system with every ≥ row rewritten as ≤ by negating the row
/// and its right-hand side. Equality rows keep their original sign.
///
/// Used for the post-optimal feasibility re-check and for the dual
/// construction; tableau column placement still follows the original senses.
#[derive(Debug, Clone)]
pub struct NormalForm {
    pub A: DMatrix<f64>,
    pub b: DVector<f64>,
}

impl std::convert::From<&Problem> for NormalForm {
    fn from(prob: &Problem) -> NormalForm {
        let mut A = prob.constraints().clone();
        let mut b = prob.rhs().clone();

        for (i, op) in prob.senses().iter().enumerate() {
            if let ConstraintOp::Gte = op {
                for a in A.row_mut(i).iter_mut() {
                    *a = -*a;
                }

                b[i] = -b[i];
            }
        }

        NormalForm { A, b }
    }
}

impl NormalForm {
    pub fn rows(&self) -> usize {
        self.A.nrows()
    }

    pub fn cols(&self) -> usize {
        self.A.ncols()
    }

    /// Every row is checked as ≤ against the normalized right-hand side.
    pub fn is_feasible(&self, x: &DVector<f64>) -> bool {
        let lhs = &self.A * x;
        lhs.iter().zip(self.b.iter()).all(|(l, b)| *l <= b + EPS)
    }
}
