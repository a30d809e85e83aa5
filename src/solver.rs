use crate::dual::solve_via_dual;
use crate::error::TabsimError;
use crate::history::TableauHistory;
use crate::normal_form::NormalForm;
use crate::problem::{Direction, Problem};
use crate::tableau::Tableau;
use crate::util::ITER_WIDTH;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, trace};

pub type TabsimResult = Result<Solution, TabsimError>;

/// Tabular simplex solver.
///
/// Each solve call owns its tableau and history exclusively and holds no
/// state between calls, so independent calls may run concurrently.
pub struct SimplexSolver {
    max_iter: u64,
    cancel: Option<Arc<AtomicBool>>,
}

impl std::default::Default for SimplexSolver {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            cancel: None,
        }
    }
}

impl SimplexSolver {
    pub fn new(max_iter: Option<u64>) -> Self {
        Self {
            max_iter: max_iter.unwrap_or(u64::MAX),
            cancel: None,
        }
    }

    /// Installs a cooperative cancellation token, checked once per pivot.
    pub fn with_cancel_token(mut self, token: Arc<AtomicBool>) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn solve(&self, prob: &Problem) -> TabsimResult {
        info!(
            "solving problem with {} variables and {} constraints",
            prob.num_vars(),
            prob.num_constraints()
        );

        let normal = NormalForm::from(prob);
        let mut tableau = Tableau::new(prob, &normal);

        let mut history = TableauHistory::new();
        history.record(&tableau);

        trace!("initial tableau: {}", tableau.grid());

        if let Direction::Min = prob.direction() {
            return solve_via_dual(self, prob, history);
        }

        if tableau.initial_basis_infeasible() {
            info!("problem is infeasible at the initial tableau");
            return Ok(Solution::terminal(Status::Infeasible, history));
        }

        info!("Iteration  |  Objective");

        let mut iter = 1u64;

        loop {
            info!(
                "{:it$}  |  {:.8E}",
                iter,
                tableau.objective_value(),
                it = ITER_WIDTH,
            );

            if iter > self.max_iter {
                debug!("reached max iterations");
                return Ok(Solution::terminal(Status::MaxIter, history));
            }

            if self.cancelled() {
                info!("solve cancelled");
                return Ok(Solution::terminal(Status::Cancelled, history));
            }

            let entering = match tableau.entering_column() {
                Some(entering) => entering,

                None => {
                    let (x, obj) = tableau.extract(prob.direction());

                    if !normal.is_feasible(&x) {
                        info!("extracted point violates the constraints, problem is infeasible");
                        return Ok(Solution::terminal(Status::Infeasible, history));
                    }

                    info!("found optimal point with objective value {}", obj);
                    return Ok(Solution::optimal(x, obj, history));
                }
            };

            debug!("entering column: {}", entering);

            let leaving = match tableau.leaving_row(entering) {
                Some(leaving) => leaving,

                None => {
                    info!("problem is unbounded");
                    return Ok(Solution::terminal(Status::Unbounded, history));
                }
            };

            debug!("leaving row: {}", leaving);

            tableau.pivot(leaving, entering)?;
            history.record(&tableau);

            trace!("tableau after pivot: {}", tableau.grid());

            iter += 1;
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|token| token.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
    MaxIter,
    Cancelled,
}

/// The outcome of a solve call. The solution vector and objective value are
/// absent for non-optimal verdicts, and the vector may also be absent for an
/// optimal minimization whose primal recovery failed.
#[derive(Debug, Clone)]
pub struct Solution {
    pub(crate) status: Status,
    pub(crate) x: Option<nalgebra::DVector<f64>>,
    pub(crate) obj: Option<f64>,
    pub(crate) history: TableauHistory,
}

impl Solution {
    pub(crate) fn optimal(
        x: nalgebra::DVector<f64>,
        obj: f64,
        history: TableauHistory,
    ) -> Self {
        Self {
            status: Status::Optimal,
            x: Some(x),
            obj: Some(obj),
            history,
        }
    }

    pub(crate) fn terminal(status: Status, history: TableauHistory) -> Self {
        Self {
            status,
            x: None,
            obj: None,
            history,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn x(&self) -> Option<&nalgebra::DVector<f64>> {
        self.x.as_ref()
    }

    pub fn obj(&self) -> Option<f64> {
        self.obj
    }

    pub fn history(&self) -> &TableauHistory {
        &self.history
    }
}
