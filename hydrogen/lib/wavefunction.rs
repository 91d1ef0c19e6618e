//! Hydrogen-like bound-state wavefunctions and their superpositions.
//!
//! All functions here work in atomic units, with lengths measured in Bohr radii
//! ([`A0`][crate::A0]). Array-valued functions accept coordinate arrays of any
//! dimension, provided that all coordinate arrays share the same shape.
//!
//! ```
//! use std::f64::consts::PI;
//! use hydrogen::{ state::QuantumState, wavefunction::psi_nlm };
//!
//! // ψ₁₀₀(r) = e^(-r) / √π
//! let gs = QuantumState::new(1, 0, 0).unwrap();
//! let psi = psi_nlm(gs, 0.5, 0.3, 1.2);
//! assert!((psi.re - (-0.5_f64).exp() / PI.sqrt()).abs() < 1e-12);
//! assert!(psi.im.abs() < 1e-12);
//! ```

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::{
    A0,
    error::{ LengthError, ShapeError, WfError },
    special::{ factorial, harmonic_norm, laguerre, spherical_harmonic_normed },
    state::QuantumState,
};

pub type WfResult<T> = Result<T, WfError>;

/// A single stationary state with all of its state-dependent constants
/// precomputed, so that it can be cheaply evaluated at many points.
#[derive(Copy, Clone, Debug)]
pub struct Orbital {
    state: QuantumState,
    // N(n, l)
    radial_norm: f64,
    // K_lm
    angular_norm: f64,
}

impl Orbital {
    /// Precompute constants for `state`.
    pub fn new(state: QuantumState) -> Self {
        let n = state.n();
        let l = state.l();
        let nf = f64::from(n);
        let radial_norm: f64
            = (
                (2.0 / (nf * A0)).powi(3)
                * factorial(n - l - 1) / (2.0 * nf * factorial(n + l))
            ).sqrt();
        let angular_norm = harmonic_norm(l, state.m());
        Self { state, radial_norm, angular_norm }
    }

    /// The state described by `self`.
    pub fn state(&self) -> QuantumState { self.state }

    /// Evaluate the normalized radial part *N*<sub>*nl*</sub> *R*<sub>*nl*</sub>(*r*).
    pub fn radial(&self, r: f64) -> f64 {
        let n = self.state.n();
        let l = self.state.l();
        let rho = 2.0 * r / (f64::from(n) * A0);
        self.radial_norm
            * (-rho / 2.0).exp()
            * rho.powi(l as i32)
            * laguerre(n - l - 1, f64::from(2 * l + 1), rho)
    }

    /// Evaluate the wavefunction at a single point in spherical coordinates,
    /// with `theta` the polar and `phi` the azimuthal angle.
    pub fn eval(&self, r: f64, theta: f64, phi: f64) -> C64 {
        let y = spherical_harmonic_normed(
            self.state.l(), self.state.m(), self.angular_norm, theta, phi);
        self.radial(r) * y
    }

    /// Evaluate the wavefunction elementwise over equal-shaped coordinate
    /// arrays.
    pub fn eval_arr<S, T, U, D>(
        &self,
        r: &nd::ArrayBase<S, D>,
        theta: &nd::ArrayBase<T, D>,
        phi: &nd::ArrayBase<U, D>,
    ) -> WfResult<nd::Array<C64, D>>
    where
        S: nd::Data<Elem = f64>,
        T: nd::Data<Elem = f64>,
        U: nd::Data<Elem = f64>,
        D: nd::Dimension,
    {
        check_shapes(r, theta, phi)?;
        let psi: nd::Array<C64, D>
            = nd::Zip::from(r).and(theta).and(phi)
            .map_collect(|&rk, &thk, &phk| self.eval(rk, thk, phk));
        Ok(psi)
    }
}

impl From<QuantumState> for Orbital {
    fn from(state: QuantumState) -> Self { Self::new(state) }
}

fn check_shapes<S, T, U, D>(
    r: &nd::ArrayBase<S, D>,
    theta: &nd::ArrayBase<T, D>,
    phi: &nd::ArrayBase<U, D>,
) -> Result<(), ShapeError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    ShapeError::check(r.shape(), theta.shape())?;
    ShapeError::check(r.shape(), phi.shape())
}

/// Evaluate *ψ*<sub>*nlm*</sub>(*r*, *θ*, *φ*) at a single point.
///
/// `theta` is the polar and `phi` the azimuthal angle.
pub fn psi_nlm(state: QuantumState, r: f64, theta: f64, phi: f64) -> C64 {
    Orbital::new(state).eval(r, theta, phi)
}

/// Evaluate *ψ*<sub>*nlm*</sub> elementwise over equal-shaped coordinate
/// arrays.
pub fn psi_nlm_arr<S, T, U, D>(
    state: QuantumState,
    r: &nd::ArrayBase<S, D>,
    theta: &nd::ArrayBase<T, D>,
    phi: &nd::ArrayBase<U, D>,
) -> WfResult<nd::Array<C64, D>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    Orbital::new(state).eval_arr(r, theta, phi)
}

/// Compute the (unnormalized) superposition `Σᵢ weights[i] ψ(states[i])` over
/// equal-shaped coordinate arrays.
///
/// The result is accumulated in a complex array, so imaginary parts of the
/// spherical harmonics are retained even for real weights. No renormalization
/// is performed.
pub fn superpose<S, T, U, D, W>(
    states: &[QuantumState],
    weights: &[W],
    r: &nd::ArrayBase<S, D>,
    theta: &nd::ArrayBase<T, D>,
    phi: &nd::ArrayBase<U, D>,
) -> WfResult<nd::Array<C64, D>>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::Data<Elem = f64>,
    D: nd::Dimension,
    W: Into<C64> + Copy,
{
    LengthError::check(states, weights)?;
    check_shapes(r, theta, phi)?;
    let mut psi: nd::Array<C64, D> = nd::Array::zeros(r.raw_dim());
    for (state, &w) in states.iter().zip(weights) {
        let w: C64 = w.into();
        if w.is_zero() { continue; }
        let orbital = Orbital::new(*state);
        nd::Zip::from(&mut psi).and(r).and(theta).and(phi)
            .for_each(|pk, &rk, &thk, &phk| {
                *pk += w * orbital.eval(rk, thk, phk);
            });
    }
    Ok(psi)
}

/// Like [`superpose`], but for basis fields that have already been evaluated.
pub fn combine<S, D, W>(fields: &[nd::ArrayBase<S, D>], weights: &[W])
    -> WfResult<nd::Array<C64, D>>
where
    S: nd::Data<Elem = C64>,
    D: nd::Dimension,
    W: Into<C64> + Copy,
{
    LengthError::check(fields, weights)?;
    let Some(first) = fields.first() else {
        return Ok(nd::Array::zeros(D::zeros(D::NDIM.unwrap_or(0))));
    };
    let mut psi: nd::Array<C64, D> = nd::Array::zeros(first.raw_dim());
    for (field, &w) in fields.iter().zip(weights) {
        ShapeError::check(first.shape(), field.shape())?;
        let w: C64 = w.into();
        if w.is_zero() { continue; }
        psi.scaled_add(w, field);
    }
    Ok(psi)
}

/// Compute the probability density `|ψ|²` elementwise.
pub fn density<S, D>(psi: &nd::ArrayBase<S, D>) -> nd::Array<f64, D>
where
    S: nd::Data<Elem = C64>,
    D: nd::Dimension,
{
    psi.mapv(|pk| pk.norm_sqr())
}
