//! Theoretical background.
//!
//! # Contents
//! - [Wavefunctions](#wavefunctions)
//! - [Transitions](#transitions)
//! - [Slices and densities](#slices-and-densities)
//! - [Rendering](#rendering)
//!
//! # Wavefunctions
//! The bound states of a single electron in a Coulomb potential are labeled by
//! the principal, orbital, and magnetic quantum numbers *n*, *l*, and *m*,
//! subject to
//! ```text
//! n ≥ 1
//! 0 ≤ l ≤ n - 1
//! -l ≤ m ≤ l
//! ```
//! In atomic units (*a*₀ = 1) the position-space wavefunctions are separable,
//! ```text
//! ψ_nlm(r, θ, φ) = N_nl R_nl(ρ) Y_lm(θ, φ)
//! ```
//! with the scaled radius *ρ* = 2*r* / (*n a*₀), the radial function
//! ```text
//! R_nl(ρ) = exp(-ρ/2) ρ^l L_(n-l-1)^(2l+1)(ρ)
//! ```
//! where *L*<sub>*k*</sub><sup>(*α*)</sup> is a generalized Laguerre polynomial,
//! and the normalization
//! ```text
//!        ⎡ ⎛  2   ⎞3 (n - l - 1)! ⎤ 1/2
//! N_nl = ⎢ ⎜ ---- ⎟  ------------ ⎥
//!        ⎣ ⎝ n a₀ ⎠   2n (n + l)! ⎦
//! ```
//! The angular part *Y*<sub>*lm*</sub> is the complex spherical harmonic with
//! the Condon-Shortley phase, built from associated Legendre functions:
//! ```text
//! Y_lm(θ, φ) = K_lm P_l^m(cos θ) exp(i m φ)
//! ```
//! All of these are implemented in [`special`][crate::special] and
//! [`wavefunction`][crate::wavefunction]. With this normalization,
//! ```text
//! ∫ dV |ψ_nlm|² = 1
//! ```
//!
//! # Transitions
//! A transition between states *a* and *b* is modeled as a plain linear blend
//! of amplitudes,
//! ```text
//! ψ(w) = (1 - w) ψ_a + w ψ_b,  w ∊ [0, 1)
//! ```
//! where *w* is an eased function of the progress through the transition. This
//! is not time evolution under any Hamiltonian and the blend is not
//! renormalized; for orthogonal *a* and *b* its norm is
//! (1 - *w*)² + *w*², dipping to 1/2 halfway through. Because the color scale of
//! every frame is set by that frame's own maximum, the missing norm does not
//! show up in the rendered images.
//!
//! # Slices and densities
//! Only a single half-plane at fixed azimuth *φ*₀ is sampled. The density
//! |*ψ*|² is computed on the `(S, S, 1)` grid and summed over the last axis to
//! give the `(S, S)` field that is drawn; with one azimuthal sample the sum is
//! trivial.
//!
//! Total probabilities can be estimated from the slice alone if the density is
//! independent of *φ*, which holds for every single eigenstate:
//! ```text
//! P = 2π ∫₀^π dθ sin θ ∫₀^∞ dr r² |ψ(r, θ, φ₀)|²
//! ```
//! For blends of states with different *m* the density picks up a
//! cos((*m*₁ - *m*₂)(*φ* - *φ*₀)) interference term and the estimate is only
//! indicative.
//!
//! # Rendering
//! A slice point (*r*, *θ*) lies at distance *s* = *r* sin *θ* from the *z*-axis
//! and height *z* = *r* cos *θ*. The slice is drawn on both sides of the
//! *z*-axis, which for φ-independent densities is exactly the cut through the
//! atom in any plane containing the *z*-axis. Contour bands are linear in
//! density while colors are logarithmic, so that the faint outer lobes of
//! higher states remain visible next to the bright core.
