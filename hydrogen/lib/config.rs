//! Parameters of an animation run.
//!
//! The reference values are fixed at compile time through
//! [`AnimationConfig::default`]; there is no configuration file or command
//! line.

use std::path::PathBuf;
use crate::{
    encode::{ DEF_ENCODER, DEF_FPS, EncodeConfig },
    grid::{ DEF_PHI, DEF_RESOLUTION, DEF_R_MAX, GridResult, SphericalGrid },
    render::{ DEF_DPI, DEF_FIGSIZE, DEF_LEVELS, DEF_VMIN, RenderContext, RenderResult },
    schedule::{
        DEF_FRAMES_PER_TRANSITION,
        Easing,
        FrameAllocation,
        Schedule,
        ScheduleResult,
        Transition,
    },
};

/// Default output file.
pub const DEF_OUTPUT: &str = "hydrogen_atom_transitions.mp4";

/// Everything needed to build the grid, schedule, renderer, and encoder of an
/// animation.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Samples along each of *r* and *θ*.
    pub resolution: usize,
    /// Radial extent of the grid, in Bohr radii.
    pub r_max: f64,
    /// Azimuth of the rendered slice.
    pub phi: f64,
    /// Frames given to each transition.
    pub frames_per_transition: usize,
    /// Easing of blend weights within a transition.
    pub easing: Easing,
    /// Frame allocation over transitions.
    pub allocation: FrameAllocation,
    /// Output frame rate.
    pub fps: u32,
    /// Pixel density.
    pub dpi: u32,
    /// Figure size in inches.
    pub figsize: (f64, f64),
    /// Floor of the logarithmic color scale.
    pub vmin: f64,
    /// Number of contour levels.
    pub levels: usize,
    /// Output video file.
    pub output: PathBuf,
    /// Video encoder program.
    pub encoder: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            resolution: DEF_RESOLUTION,
            r_max: DEF_R_MAX,
            phi: DEF_PHI,
            frames_per_transition: DEF_FRAMES_PER_TRANSITION,
            easing: Easing::Linear,
            allocation: FrameAllocation::Truncate,
            fps: DEF_FPS,
            dpi: DEF_DPI,
            figsize: DEF_FIGSIZE,
            vmin: DEF_VMIN,
            levels: DEF_LEVELS,
            output: PathBuf::from(DEF_OUTPUT),
            encoder: DEF_ENCODER.into(),
        }
    }
}

impl AnimationConfig {
    /// Build the coordinate grid.
    pub fn grid(&self) -> GridResult<SphericalGrid> {
        SphericalGrid::new(self.resolution, self.r_max, self.phi)
    }

    /// Build a schedule over `transitions`, with
    /// `frames_per_transition × transitions.len()` frames in total.
    pub fn schedule(&self, transitions: Vec<Transition>)
        -> ScheduleResult<Schedule>
    {
        let total = self.frames_per_transition * transitions.len();
        Schedule::new(transitions, total, self.easing, self.allocation)
    }

    /// Build a render context sized by `figsize` and `dpi`.
    pub fn render_context(&self) -> RenderResult<RenderContext> {
        RenderContext::from_figure(self.figsize, self.dpi, self.vmin, self.levels)
    }

    /// Encoder settings for frames drawn by `ctx`.
    pub fn encode_config(&self, ctx: &RenderContext) -> EncodeConfig {
        EncodeConfig {
            program: self.encoder.clone(),
            output: self.output.clone(),
            fps: self.fps,
            width: ctx.width(),
            height: ctx.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::reference_transitions;

    #[test]
    fn reference_configuration() {
        let config = AnimationConfig::default();
        let sched = config.schedule(reference_transitions().unwrap()).unwrap();
        assert_eq!(sched.total_frames(), 780);
        assert_eq!(sched.easing(), Easing::Linear);
        let ctx = config.render_context().unwrap();
        let enc = config.encode_config(&ctx);
        assert_eq!((enc.width, enc.height, enc.fps), (2000, 1400, 60));
        assert_eq!(enc.output, PathBuf::from("hydrogen_atom_transitions.mp4"));
        assert_eq!(config.grid().unwrap().resolution(), 200);
    }
}
