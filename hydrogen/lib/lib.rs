#![allow(dead_code, non_snake_case)]

//! Provides functions and higher-level constructs to evaluate hydrogen-like
//! bound-state wavefunctions on a spherical grid, blend them along a scripted
//! sequence of state-to-state transitions, and render the resulting
//! probability densities as frames of an animation.
//!
//! The pipeline is:
//! - [`grid`]: a fixed (*r*, *θ*) slice of space at constant azimuth, built
//!   once
//! - [`wavefunction`]: *ψ*<sub>*nlm*</sub> on that grid, and weighted
//!   superpositions thereof
//! - [`schedule`]: maps a frame index to a pair of states and blend weights
//! - [`render`]: filled-contour drawing of a density slice into an RGB canvas
//! - [`encode`]: frame sinks, most importantly an `ffmpeg` pipe
//! - [`animate`]: drives all of the above, frame by frame
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod special;
pub mod state;
pub mod wavefunction;
pub mod grid;
pub mod schedule;
pub mod render;
pub mod encode;
pub mod animate;
pub mod config;
pub mod utils;

pub mod docs;

/// Bohr radius in atomic units.
pub const A0: f64 = 1.0;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
pub type Arr3<S> = ndarray::ArrayBase<S, ndarray::Ix3>;
