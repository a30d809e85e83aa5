mod dual;
mod error;
mod history;
mod normal_form;
pub mod problem;
pub mod solver;
mod tableau;
mod util;

pub use crate::dual::dual_problem;
pub use crate::error::TabsimError;
pub use crate::history::TableauHistory;
pub use crate::problem::{ConstraintOp, Direction, Problem};
pub use crate::solver::{SimplexSolver, Solution, Status, TabsimResult};
