//! The fixed spherical-coordinate grid over which every frame is evaluated.
//!
//! The grid samples a single azimuthal half-plane: *r* ∊ [0, *r*<sub>max</sub>]
//! and *θ* ∊ [0, π] at fixed *φ*. Coordinate arrays are stored expanded to
//! shape `(S, S, 1)` with index order `(r, θ, φ)`; Cartesian projections are
//! stored with shape `(S, S)`.

use std::f64::consts::PI;
use ndarray as nd;
use crate::{ A0, error::GridError };

pub type GridResult<T> = Result<T, GridError>;

/// Default number of samples along each of *r* and *θ*.
pub const DEF_RESOLUTION: usize = 200;

/// Default radial extent of the grid.
pub const DEF_R_MAX: f64 = 40.0 * A0;

/// Default azimuthal angle of the slice.
pub const DEF_PHI: f64 = PI / 2.0;

/// Immutable coordinate grid, built once and shared by reference.
#[derive(Clone, Debug)]
pub struct SphericalGrid {
    r_max: f64,
    r_axis: nd::Array1<f64>,
    theta_axis: nd::Array1<f64>,
    phi_axis: nd::Array1<f64>,
    r: nd::Array3<f64>,
    theta: nd::Array3<f64>,
    phi: nd::Array3<f64>,
    x: nd::Array2<f64>,
    z: nd::Array2<f64>,
    s: nd::Array2<f64>,
}

impl SphericalGrid {
    /// Build a grid with `resolution` samples over *r* ∊ [0, `r_max`] and
    /// *θ* ∊ [0, π], at the fixed azimuth `phi`.
    ///
    /// ```
    /// use hydrogen::grid::SphericalGrid;
    ///
    /// let grid = SphericalGrid::new(10, 40.0, std::f64::consts::FRAC_PI_2).unwrap();
    /// assert_eq!(grid.r().shape(), &[10, 10, 1]);
    /// assert_eq!(grid.z().shape(), &[10, 10]);
    /// ```
    pub fn new(resolution: usize, r_max: f64, phi: f64) -> GridResult<Self> {
        if resolution < 2 { return Err(GridError::BadResolution(resolution)); }
        if !(r_max.is_finite() && r_max > 0.0) {
            return Err(GridError::BadExtent(r_max));
        }
        let r_axis: nd::Array1<f64>
            = nd::Array1::linspace(0.0, r_max, resolution);
        let theta_axis: nd::Array1<f64>
            = nd::Array1::linspace(0.0, PI, resolution);
        let phi_axis: nd::Array1<f64> = nd::array![phi];
        let shape = (resolution, resolution, 1);
        let r: nd::Array3<f64>
            = nd::Array3::from_shape_fn(shape, |(i, _, _)| r_axis[i]);
        let theta: nd::Array3<f64>
            = nd::Array3::from_shape_fn(shape, |(_, j, _)| theta_axis[j]);
        let phi: nd::Array3<f64>
            = nd::Array3::from_shape_fn(shape, |(_, _, k)| phi_axis[k]);

        let r0 = r.index_axis(nd::Axis(2), 0);
        let th0 = theta.index_axis(nd::Axis(2), 0);
        let ph0 = phi.index_axis(nd::Axis(2), 0);
        let x: nd::Array2<f64>
            = nd::Zip::from(&r0).and(&th0).and(&ph0)
            .map_collect(|&rk, &thk, &phk| rk * thk.sin() * phk.cos());
        let z: nd::Array2<f64>
            = nd::Zip::from(&r0).and(&th0)
            .map_collect(|&rk, &thk| rk * thk.cos());
        let s: nd::Array2<f64>
            = nd::Zip::from(&r0).and(&th0)
            .map_collect(|&rk, &thk| rk * thk.sin());

        Ok(Self {
            r_max, r_axis, theta_axis, phi_axis, r, theta, phi, x, z, s,
        })
    }

    /// Build the reference grid: 200 × 200 samples out to 40 Bohr radii at
    /// *φ* = π/2.
    pub fn reference() -> GridResult<Self> {
        Self::new(DEF_RESOLUTION, DEF_R_MAX, DEF_PHI)
    }

    /// Number of samples along each of *r* and *θ*.
    pub fn resolution(&self) -> usize { self.r_axis.len() }

    /// Radial extent.
    pub fn r_max(&self) -> f64 { self.r_max }

    /// Radial grid spacing.
    pub fn dr(&self) -> f64 { self.r_axis[1] - self.r_axis[0] }

    /// Polar grid spacing.
    pub fn dtheta(&self) -> f64 { self.theta_axis[1] - self.theta_axis[0] }

    /// Azimuth of the slice.
    pub fn phi0(&self) -> f64 { self.phi_axis[0] }

    /// 1D radial samples.
    pub fn r_axis(&self) -> nd::ArrayView1<f64> { self.r_axis.view() }

    /// 1D polar-angle samples.
    pub fn theta_axis(&self) -> nd::ArrayView1<f64> { self.theta_axis.view() }

    /// Radial coordinate, shape `(S, S, 1)`.
    pub fn r(&self) -> nd::ArrayView3<f64> { self.r.view() }

    /// Polar coordinate, shape `(S, S, 1)`.
    pub fn theta(&self) -> nd::ArrayView3<f64> { self.theta.view() }

    /// Azimuthal coordinate, shape `(S, S, 1)`.
    pub fn phi(&self) -> nd::ArrayView3<f64> { self.phi.view() }

    /// Cartesian *x = r sin θ cos φ*, shape `(S, S)`.
    pub fn x(&self) -> nd::ArrayView2<f64> { self.x.view() }

    /// Cartesian *z = r cos θ*, shape `(S, S)`.
    pub fn z(&self) -> nd::ArrayView2<f64> { self.z.view() }

    /// Distance from the *z*-axis within the slice, *r sin θ*, shape `(S, S)`.
    ///
    /// This is the horizontal plot coordinate: at *φ* = π/2 the projection
    /// onto *x* collapses to zero.
    pub fn s(&self) -> nd::ArrayView2<f64> { self.s.view() }

    /// Bilinearly interpolate a field sampled on the `(r, θ)` grid at the
    /// point `(r, theta)`.
    ///
    /// Returns `None` outside the grid.
    pub fn interp<S>(&self, field: &nd::ArrayBase<S, nd::Ix2>, r: f64, theta: f64)
        -> Option<f64>
    where S: nd::Data<Elem = f64>
    {
        let n = self.resolution();
        if !(0.0..=self.r_max).contains(&r) || !(0.0..=PI).contains(&theta) {
            return None;
        }
        let fr = (r / self.dr()).min((n - 1) as f64);
        let ft = (theta / self.dtheta()).min((n - 1) as f64);
        let i = (fr.floor() as usize).min(n - 2);
        let j = (ft.floor() as usize).min(n - 2);
        let u = fr - i as f64;
        let v = ft - j as f64;
        let val
            = (1.0 - u) * (1.0 - v) * field[[i, j]]
            + u * (1.0 - v) * field[[i + 1, j]]
            + (1.0 - u) * v * field[[i, j + 1]]
            + u * v * field[[i + 1, j + 1]];
        Some(val)
    }
}
