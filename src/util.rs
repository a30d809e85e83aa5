pub const EPS: f64 = 1e-6;

pub const ITER_WIDTH: usize = 9;
