//! Miscellaneous tools.

use std::f64::consts::TAU;
use ndarray::{ self as nd, Ix1 };
use num_traits::Float;
use crate::{
    Arr2,
    Arr3,
    error::ShapeError,
    grid::SphericalGrid,
};

/// Integrate using the trapezoidal rule.
///
/// *Panics if `y` has length less than 2*.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    let two = A::one() + A::one();
    let inner = y.slice(nd::s![1..n - 1]).iter()
        .fold(A::zero(), |acc, yk| acc + *yk);
    (dx / two) * (y[0] + two * inner + y[n - 1])
}

/// Collapse a 3D field over its azimuthal (last) axis by summation.
///
/// For a grid with a single azimuthal sample this only drops the axis.
pub fn reduce_azimuth<S>(field: &Arr3<S>) -> nd::Array2<f64>
where S: nd::Data<Elem = f64>
{
    field.sum_axis(nd::Axis(2))
}

/// Maximum of a field, ignoring NaNs.
///
/// Returns `None` if the field is empty or contains only NaNs.
pub fn fmax<S, D>(field: &nd::ArrayBase<S, D>) -> Option<f64>
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    field.iter().copied()
        .filter(|x| !x.is_nan())
        .fold(None, |acc: Option<f64>, x| Some(acc.map_or(x, |a| a.max(x))))
}

/// Integrate a density sampled on the `(r, θ)` slice of `grid` over all
/// space, assuming it to be independent of azimuth:
/// ```text
/// P = 2π ∫ dθ sin θ ∫ dr r² ρ(r, θ)
/// ```
pub fn slice_probability<S>(grid: &SphericalGrid, density: &Arr2<S>)
    -> Result<f64, ShapeError>
where S: nd::Data<Elem = f64>
{
    let n = grid.resolution();
    ShapeError::check(density.shape(), &[n, n])?;
    let r = grid.r_axis();
    let radial: nd::Array1<f64>
        = density.axis_iter(nd::Axis(1))
        .map(|col| {
            let integrand: nd::Array1<f64>
                = nd::Zip::from(&col).and(&r)
                .map_collect(|&rho, &rk| rho * rk * rk);
            trapz(&integrand, grid.dr())
        })
        .collect();
    let angular: nd::Array1<f64>
        = nd::Zip::from(&radial).and(&grid.theta_axis())
        .map_collect(|&pk, &thk| pk * thk.sin());
    Ok(TAU * trapz(&angular, grid.dtheta()))
}

/// Compute the expectation value of *r* for a density sampled on the `(r, θ)`
/// slice of `grid`, under the same azimuthal-symmetry assumption as
/// [`slice_probability`].
pub fn slice_mean_radius<S>(grid: &SphericalGrid, density: &Arr2<S>)
    -> Result<f64, ShapeError>
where S: nd::Data<Elem = f64>
{
    let r = grid.r_axis();
    let weighted: nd::Array2<f64>
        = nd::Zip::from(density)
        .and_broadcast(&r.insert_axis(nd::Axis(1)))
        .map_collect(|&rho, &rk| rho * rk);
    let norm = slice_probability(grid, density)?;
    Ok(slice_probability(grid, &weighted)? / norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use approx::assert_abs_diff_eq;

    #[test]
    fn trapz_is_exact_for_lines() {
        let x: nd::Array1<f64> = nd::Array1::linspace(0.0, 2.0, 21);
        let y = x.mapv(|xk| 3.0 * xk + 1.0);
        assert_abs_diff_eq!(trapz(&y, 0.1), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn fmax_skips_nan() {
        let a = nd::array![1.0, f64::NAN, 3.5, -2.0];
        assert_eq!(fmax(&a), Some(3.5));
        let b = nd::array![f64::NAN];
        assert_eq!(fmax(&b), None);
    }

    #[test]
    fn uniform_ball() {
        // ρ = 1 out to r_max integrates to the volume of the ball
        let grid = SphericalGrid::new(201, 2.0, PI / 2.0).unwrap();
        let rho = nd::Array2::<f64>::ones((201, 201));
        let p = slice_probability(&grid, &rho).unwrap();
        assert_abs_diff_eq!(p, 4.0 / 3.0 * PI * 8.0, epsilon = 1e-2);
        // <r> = 3 R / 4
        let rbar = slice_mean_radius(&grid, &rho).unwrap();
        assert_abs_diff_eq!(rbar, 1.5, epsilon = 1e-3);
    }

    #[test]
    fn azimuth_reduction() {
        let field = nd::Array3::from_shape_fn((3, 4, 1), |(i, j, _)| (i * 4 + j) as f64);
        let flat = reduce_azimuth(&field);
        assert_eq!(flat.shape(), &[3, 4]);
        assert_eq!(flat[[2, 3]], 11.0);
        let wrong = nd::Array2::<f64>::zeros((3, 4));
        let grid = SphericalGrid::new(5, 1.0, 0.0).unwrap();
        assert!(slice_probability(&grid, &wrong).is_err());
    }
}
