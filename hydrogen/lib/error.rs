//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::io;
use thiserror::Error;

/// Returned when a set of quantum numbers violates `n ≥ 1`, `0 ≤ l ≤ n - 1`,
/// or `-l ≤ m ≤ l`.
#[derive(Debug, Error)]
#[error("invalid quantum numbers (n, l, m) = ({0}, {1}, {2})")]
pub struct StateError(pub u32, pub u32, pub i32);

impl StateError {
    pub(crate) fn check(n: u32, l: u32, m: i32) -> Result<(), Self> {
        (n >= 1 && l < n && m.unsigned_abs() <= l)
            .then_some(())
            .ok_or(Self(n, l, m))
    }
}

/// Returned when an operation requiring equal-length sequences encounters
/// sequences with unequal length.
#[derive(Debug, Error)]
#[error("encountered sequences with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<A, B>(a: &[A], b: &[B]) -> Result<(), Self> {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when coordinate arrays that must be evaluated together have
/// different shapes.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible shapes; got {0:?} and {1:?}")]
pub struct ShapeError(pub Vec<usize>, pub Vec<usize>);

impl ShapeError {
    pub(crate) fn check(a: &[usize], b: &[usize]) -> Result<(), Self> {
        (a == b).then_some(()).ok_or_else(|| Self(a.to_vec(), b.to_vec()))
    }
}

/// Returned from functions in [`wavefunction`][crate::wavefunction].
#[derive(Debug, Error)]
pub enum WfError {
    /// [`LengthError`]
    #[error("length error: {0}")]
    Length(#[from] LengthError),

    /// [`ShapeError`]
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),
}

/// Returned from [`SphericalGrid`][crate::grid::SphericalGrid] construction.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when fewer than two samples per axis are requested.
    #[error("grid resolution must be at least 2; got {0}")]
    BadResolution(usize),

    /// Returned when a non-positive or non-finite radial extent is requested.
    #[error("radial extent must be finite and greater than 0; got {0}")]
    BadExtent(f64),
}

/// Returned from [`Schedule`][crate::schedule::Schedule] construction.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Returned when a schedule is given no transitions.
    #[error("schedule must contain at least one transition")]
    Empty,

    /// Returned when there are fewer total frames than transitions, which
    /// would leave some transition with zero frames.
    #[error("cannot split {0} frames over {1} transitions")]
    TooFewFrames(usize, usize),

    /// [`StateError`]
    #[error("state error: {0}")]
    State(#[from] StateError),
}

/// Returned from functions in [`render`][crate::render].
#[derive(Debug, Error)]
pub enum RenderError {
    /// Returned when a logarithmic normalization is requested with a floor
    /// that is non-positive or a ceiling that does not exceed the floor.
    #[error("log-normalization requires 0 < vmin < vmax; got vmin = {0:e}, vmax = {1:e}")]
    BadNorm(f64, f64),

    /// Returned when a canvas is too small to hold a plot area.
    #[error("canvas of {0}x{1} pixels is too small to render into")]
    BadCanvas(u32, u32),

    /// Returned when fewer than two contour levels are requested.
    #[error("contour plots need at least 2 levels; got {0}")]
    BadLevels(usize),

    /// [`ShapeError`]
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),
}

impl RenderError {
    pub(crate) fn check_norm(vmin: f64, vmax: f64) -> Result<(), Self> {
        (vmin > 0.0 && vmax > vmin && vmax.is_finite())
            .then_some(())
            .ok_or(Self::BadNorm(vmin, vmax))
    }
}

/// Returned from frame sinks in [`encode`][crate::encode].
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Returned when the video-encoding program cannot be located.
    #[error("video encoder `{0}` not found; is it installed and on PATH?")]
    BackendNotFound(String),

    /// Returned when the encoder exits unsuccessfully.
    #[error("video encoder exited unsuccessfully: {0}")]
    BackendFailed(String),

    /// Returned when a frame does not match the size the sink was opened with.
    #[error("frame of {0}x{1} pixels does not match the sink size {2}x{3}")]
    FrameSize(u32, u32, u32, u32),

    /// Returned when frames are pushed to a sink that was already finished.
    #[error("frame sink has already been finished")]
    Finished,

    /// [`io::Error`]
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// [`image::ImageError`]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Returned from the animation driver in [`animate`][crate::animate].
#[derive(Debug, Error)]
pub enum AnimError {
    /// [`WfError`]
    #[error("wavefunction error: {0}")]
    Wf(#[from] WfError),

    /// [`RenderError`]
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// [`EncodeError`]
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}
