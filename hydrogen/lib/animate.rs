//! Frame-by-frame driver tying together the grid, schedule, renderer, and
//! frame sink.
//!
//! Frames are produced strictly in order, one at a time, into a single
//! [`RenderContext`]; each finished canvas is handed to a [`FrameSink`] before
//! the next frame is drawn.

use std::time::Instant;
use log::{ debug, info, warn };
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    error::{ AnimError, RenderError },
    encode::FrameSink,
    grid::SphericalGrid,
    render::{ FrameScale, RenderContext },
    schedule::{ FrameInfo, Schedule, Transition },
    utils::{ reduce_azimuth, slice_probability },
    wavefunction::{ WfResult, combine, density, psi_nlm_arr, superpose },
};

pub type AnimResult<T> = Result<T, AnimError>;

/// Compute the 2D density slice for a single frame directly, evaluating every
/// basis state anew.
///
/// The `(S, S, 1)` density is summed over its azimuthal axis to give the
/// `(S, S)` field that is plotted.
pub fn frame_density(grid: &SphericalGrid, schedule: &Schedule, frame: usize)
    -> WfResult<nd::Array2<f64>>
{
    let info = schedule.resolve(frame);
    let psi: nd::Array3<C64>
        = superpose(
            &info.transition.states(),
            &info.weights(),
            &grid.r(),
            &grid.theta(),
            &grid.phi(),
        )?;
    Ok(reduce_azimuth(&density(&psi)))
}

/// Holds the evaluated basis fields of the most recent transition, so that
/// consecutive frames of one transition only need to re-blend them.
#[derive(Clone, Debug, Default)]
pub struct BasisCache {
    transition: Option<Transition>,
    fields: Vec<nd::Array3<C64>>,
}

impl BasisCache {
    pub fn new() -> Self { Self::default() }

    /// The transition whose fields are currently held, if any.
    pub fn transition(&self) -> Option<Transition> { self.transition }

    /// Return the basis fields for `transition`, evaluating them if they are
    /// not already held.
    pub fn fields(&mut self, transition: Transition, grid: &SphericalGrid)
        -> WfResult<&[nd::Array3<C64>]>
    {
        if self.transition != Some(transition) {
            self.fields
                = transition.states().iter()
                .map(|s| psi_nlm_arr(*s, &grid.r(), &grid.theta(), &grid.phi()))
                .collect::<WfResult<Vec<_>>>()?;
            self.transition = Some(transition);
        }
        Ok(&self.fields)
    }

    /// Compute the superposed wavefunction for a resolved frame.
    pub fn compose(&mut self, info: &FrameInfo, grid: &SphericalGrid)
        -> WfResult<nd::Array3<C64>>
    {
        let fields = self.fields(info.transition, grid)?;
        combine(fields, &info.weights())
    }
}

/// Summary of a single rendered frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Where the frame sits in the schedule.
    pub info: FrameInfo,
    /// Color scale of the frame.
    pub scale: FrameScale,
    /// Total probability of the (unnormalized) blend, estimated from the slice
    /// assuming azimuthal symmetry.
    pub probability: f64,
}

/// Drives rendering of every frame of a [`Schedule`].
#[derive(Debug)]
pub struct Animation<'a> {
    grid: &'a SphericalGrid,
    schedule: &'a Schedule,
    ctx: RenderContext,
    cache: BasisCache,
}

impl<'a> Animation<'a> {
    /// Create a new driver drawing into `ctx`.
    pub fn new(grid: &'a SphericalGrid, schedule: &'a Schedule, ctx: RenderContext)
        -> Self
    {
        Self { grid, schedule, ctx, cache: BasisCache::new() }
    }

    pub fn grid(&self) -> &SphericalGrid { self.grid }

    pub fn schedule(&self) -> &Schedule { self.schedule }

    /// The render context, holding the most recently drawn frame.
    pub fn context(&self) -> &RenderContext { &self.ctx }

    /// Resolve a frame and compute its 2D density slice.
    pub fn density(&mut self, frame: usize)
        -> AnimResult<(FrameInfo, nd::Array2<f64>)>
    {
        let info = self.schedule.resolve(frame);
        let psi = self.cache.compose(&info, self.grid)?;
        Ok((info, reduce_azimuth(&density(&psi))))
    }

    /// Draw a single frame into the render context.
    pub fn render_frame(&mut self, frame: usize) -> AnimResult<FrameReport> {
        let (info, rho) = self.density(frame)?;
        let title = format!("Transition Frame: {}", frame);
        let scale = self.ctx.draw_frame(self.grid, &rho, &title)?;
        let probability = slice_probability(self.grid, &rho)
            .map_err(RenderError::from)?;
        Ok(FrameReport { info, scale, probability })
    }

    /// Render every frame of the schedule in order, pushing each into `sink`,
    /// then finish the sink.
    pub fn run<K>(&mut self, sink: &mut K) -> AnimResult<usize>
    where K: FrameSink + ?Sized
    {
        let total = self.schedule.total_frames();
        let ntrans = self.schedule.len();
        info!(
            "rendering {} frames over {} transitions on a {}x{} grid",
            total, ntrans, self.grid.resolution(), self.grid.resolution(),
        );
        let t0 = Instant::now();
        for frame in 0..total {
            let report = self.render_frame(frame)?;
            let FrameReport { info: fi, scale, probability } = report;
            if fi.starts_transition() {
                info!(
                    "transition {}/{}: {} -> {}",
                    fi.transition_index + 1, ntrans,
                    fi.transition.from, fi.transition.to,
                );
            }
            debug!(
                "frame {}: weight = {:.4}, max density = {:.3e}, P ≈ {:.4}",
                frame, fi.weight, scale.max_density, probability,
            );
            if !probability.is_finite() {
                warn!("frame {}: non-finite total probability", frame);
            }
            sink.push(self.ctx.canvas())?;
        }
        sink.finish()?;
        info!(
            "rendered {} frames in {:.1}s",
            total, t0.elapsed().as_secs_f64(),
        );
        Ok(total)
    }
}
