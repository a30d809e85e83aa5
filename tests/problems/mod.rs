use tabsim::*;

const EPS: f64 = 1e-6;

pub fn assert_optimal(result: &Solution, expected_obj: f64, expected_x: &[f64]) {
    assert_eq!(result.status(), Status::Optimal, "not optimal: {:?}", result);

    let obj = result.obj().unwrap();

    assert!(
        (obj - expected_obj).abs() < EPS,
        "obj: {}, expected: {}",
        obj,
        expected_obj
    );

    let x = result.x().expect("expected a solution vector");

    assert_eq!(x.len(), expected_x.len());

    for (x1, x2) in x.iter().zip(expected_x) {
        assert!((x1 - x2).abs() < EPS, "x_i: {}, expected: {}", x1, x2);
    }
}

pub fn assert_optimal_obj_without_x(result: &Solution, expected_obj: f64) {
    assert_eq!(result.status(), Status::Optimal, "not optimal: {:?}", result);

    let obj = result.obj().unwrap();

    assert!(
        (obj - expected_obj).abs() < EPS,
        "obj: {}, expected: {}",
        obj,
        expected_obj
    );

    assert!(result.x().is_none(), "expected no solution vector");
}

pub fn assert_infeasible(result: &Solution) {
    assert_eq!(result.status(), Status::Infeasible, "not infeasible: {:?}", result);
    assert!(result.x().is_none());
    assert!(result.obj().is_none());
}

pub fn assert_unbounded(result: &Solution) {
    assert_eq!(result.status(), Status::Unbounded, "not unbounded: {:?}", result);
    assert!(result.x().is_none());
    assert!(result.obj().is_none());
}

pub struct TestProblem {
    pub prob: Problem,
    pub check_result: Box<dyn FnOnce(&Solution)>,
}

impl TestProblem {
    fn new<F: FnOnce(&Solution) + 'static>(prob: Problem, check_result: F) -> Self {
        Self {
            prob,
            check_result: Box::new(check_result),
        }
    }
}

/// maximize 3x + 5y subject to x ≤ 4, 2y ≤ 12, 3x + 2y ≤ 18
pub fn production_mix() -> TestProblem {
    let prob = Problem::from_rows(
        &[3., 5.],
        &[
            (vec![1., 0.], ConstraintOp::Lte, 4.),
            (vec![0., 2.], ConstraintOp::Lte, 12.),
            (vec![3., 2.], ConstraintOp::Lte, 18.),
        ],
        Direction::Max,
    )
    .unwrap();

    TestProblem::new(prob, |result: &Solution| {
        assert_optimal(result, 36., &[2., 6.])
    })
}

/// maximize x + y subject to x − y ≥ 1, x ≥ 0; the objective grows without bound
pub fn unbounded_difference() -> TestProblem {
    let prob = Problem::from_rows(
        &[1., 1.],
        &[
            (vec![1., -1.], ConstraintOp::Gte, 1.),
            (vec![1., 0.], ConstraintOp::Gte, 0.),
        ],
        Direction::Max,
    )
    .unwrap();

    TestProblem::new(prob, |result: &Solution| assert_unbounded(result))
}

/// x + y ≤ 5 and x + y ≥ 10 cannot both hold
pub fn conflicting_rows() -> TestProblem {
    let prob = Problem::from_rows(
        &[1., 1.],
        &[
            (vec![1., 1.], ConstraintOp::Lte, 5.),
            (vec![1., 1.], ConstraintOp::Gte, 10.),
        ],
        Direction::Max,
    )
    .unwrap();

    TestProblem::new(prob, |result: &Solution| assert_infeasible(result))
}

/// minimize 2x + 3y subject to x + y ≥ 10, 2x + y = 16; solved through the
/// dual, whose recovery is underdetermined here, so only the value survives
pub fn min_via_dual() -> TestProblem {
    let prob = Problem::from_rows(
        &[2., 3.],
        &[
            (vec![1., 1.], ConstraintOp::Gte, 10.),
            (vec![2., 1.], ConstraintOp::Eq, 16.),
        ],
        Direction::Min,
    )
    .unwrap();

    TestProblem::new(prob, |result: &Solution| {
        assert_optimal_obj_without_x(result, 16.)
    })
}

/// minimize 3x + 2y subject to x + y ≤ 4, x ≤ 3; both dual components bind,
/// so the primal point is recovered from the binding system
pub fn min_with_recovery() -> TestProblem {
    let prob = Problem::from_rows(
        &[3., 2.],
        &[
            (vec![1., 1.], ConstraintOp::Lte, 4.),
            (vec![1., 0.], ConstraintOp::Lte, 3.),
        ],
        Direction::Min,
    )
    .unwrap();

    TestProblem::new(prob, |result: &Solution| {
        assert_optimal(result, 11., &[2., 1.])
    })
}

/// maximize 2x + y subject to x + y = 4
pub fn equality_row() -> TestProblem {
    let prob = Problem::from_rows(
        &[2., 1.],
        &[(vec![1., 1.], ConstraintOp::Eq, 4.)],
        Direction::Max,
    )
    .unwrap();

    TestProblem::new(prob, |result: &Solution| {
        assert_optimal(result, 8., &[4., 0.])
    })
}

/// a ≥ row with zero right-hand side keeps its artificial variable at zero
pub fn ge_row_with_zero_rhs() -> TestProblem {
    let prob = Problem::from_rows(
        &[1.],
        &[
            (vec![1.], ConstraintOp::Lte, 5.),
            (vec![1.], ConstraintOp::Gte, 0.),
        ],
        Direction::Max,
    )
    .unwrap();

    TestProblem::new(prob, |result: &Solution| assert_optimal(result, 5., &[5.]))
}

pub fn no_constraints_unbounded() -> TestProblem {
    let prob = Problem::from_rows(&[1.], &[], Direction::Max).unwrap();

    TestProblem::new(prob, |result: &Solution| assert_unbounded(result))
}

pub fn no_constraints_optimal_at_origin() -> TestProblem {
    let prob = Problem::from_rows(&[-1.], &[], Direction::Max).unwrap();

    TestProblem::new(prob, |result: &Solution| assert_optimal(result, 0., &[0.]))
}

/// two rows tie at the minimum ratio; the lower row index leaves first
pub fn degenerate_ratio_tie() -> TestProblem {
    let prob = Problem::from_rows(
        &[2., 1.],
        &[
            (vec![1., 1.], ConstraintOp::Lte, 2.),
            (vec![1., 0.], ConstraintOp::Lte, 2.),
        ],
        Direction::Max,
    )
    .unwrap();

    TestProblem::new(prob, |result: &Solution| assert_optimal(result, 4., &[2., 0.]))
}
