//! The scripted sequence of state-to-state transitions making up an animation,
//! and the mapping from frame indices to blend weights.
//!
//! ```
//! use hydrogen::schedule::{ Easing, FrameAllocation, Schedule, Transition };
//!
//! let tr = Transition::from_tuples((1, 0, 0), (2, 0, 0)).unwrap();
//! let sched = Schedule::new(vec![tr], 4, Easing::Linear, FrameAllocation::Truncate)
//!     .unwrap();
//! let frame = sched.resolve(2);
//! assert_eq!(frame.transition_index, 0);
//! assert_eq!(frame.progress, 0.5);
//! assert_eq!(frame.weights(), [0.5, 0.5]);
//! ```

use std::f64::consts::PI;
use crate::{
    error::ScheduleError,
    state::QuantumState,
};

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Number of frames given to each transition in the reference schedule.
pub const DEF_FRAMES_PER_TRANSITION: usize = 30;

/// Maps transition progress in [0, 1] to the weight of the target state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// `w = x`
    #[default]
    Linear,
    /// `w = (1 - cos(πx)) / 2`
    EaseInOutSine,
}

impl Easing {
    /// Apply the easing function.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::EaseInOutSine => -((PI * x).cos() - 1.0) / 2.0,
        }
    }
}

/// Strategy for splitting the total number of frames over transitions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FrameAllocation {
    /// Every transition gets `total / len` frames (integer division). Frames
    /// left over by the division all fall in the last transition, restarting
    /// its progress count.
    #[default]
    Truncate,
    /// The first `total % len` transitions get one extra frame each, so that
    /// every frame belongs to exactly one transition and progress is always
    /// increasing within a transition.
    Distribute,
}

/// A blend from one state to another.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Initial state.
    pub from: QuantumState,
    /// Final state.
    pub to: QuantumState,
}

impl Transition {
    /// Create a new transition.
    pub fn new(from: QuantumState, to: QuantumState) -> Self { Self { from, to } }

    /// Create a new transition from plain `(n, l, m)` tuples, validating both.
    pub fn from_tuples(from: (u32, u32, i32), to: (u32, u32, i32))
        -> ScheduleResult<Self>
    {
        Ok(Self::new(from.try_into()?, to.try_into()?))
    }

    /// Both states, in `[from, to]` order.
    pub fn states(&self) -> [QuantumState; 2] { [self.from, self.to] }
}

/// Where a single frame falls in a [`Schedule`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameInfo {
    /// Frame index.
    pub frame: usize,
    /// Index of the active transition.
    pub transition_index: usize,
    /// The active transition.
    pub transition: Transition,
    /// Progress through the active transition, in [0, 1).
    pub progress: f64,
    /// Eased progress; the weight of the target state.
    pub weight: f64,
}

impl FrameInfo {
    /// Blend weights for `[from, to]`.
    pub fn weights(&self) -> [f64; 2] { [1.0 - self.weight, self.weight] }

    /// `true` if this is the first frame of its transition.
    pub fn starts_transition(&self) -> bool {
        self.frame == 0 || self.progress == 0.0
    }
}

/// An ordered list of transitions spread over a fixed number of frames.
///
/// Resolution of a frame index is a pure function; a `Schedule` carries no
/// playback state.
#[derive(Clone, Debug)]
pub struct Schedule {
    transitions: Vec<Transition>,
    total_frames: usize,
    easing: Easing,
    allocation: FrameAllocation,
}

impl Schedule {
    /// Create a new schedule.
    ///
    /// Fails if `transitions` is empty or if `total_frames` is smaller than the
    /// number of transitions.
    pub fn new(
        transitions: Vec<Transition>,
        total_frames: usize,
        easing: Easing,
        allocation: FrameAllocation,
    ) -> ScheduleResult<Self>
    {
        if transitions.is_empty() { return Err(ScheduleError::Empty); }
        if total_frames < transitions.len() {
            return Err(
                ScheduleError::TooFewFrames(total_frames, transitions.len()));
        }
        Ok(Self { transitions, total_frames, easing, allocation })
    }

    /// Create a new schedule giving each transition `frames_per_transition`
    /// frames.
    pub fn with_frames_per_transition(
        transitions: Vec<Transition>,
        frames_per_transition: usize,
        easing: Easing,
    ) -> ScheduleResult<Self>
    {
        let total = transitions.len() * frames_per_transition;
        Self::new(transitions, total, easing, FrameAllocation::Truncate)
    }

    /// The 26-transition reference script, stepping through every state up to
    /// `4f0` with 30 linearly eased frames per transition.
    pub fn reference() -> ScheduleResult<Self> {
        Self::with_frames_per_transition(
            reference_transitions()?,
            DEF_FRAMES_PER_TRANSITION,
            Easing::Linear,
        )
    }

    /// All transitions, in playback order.
    pub fn transitions(&self) -> &[Transition] { &self.transitions }

    /// Number of transitions.
    pub fn len(&self) -> usize { self.transitions.len() }

    /// Always `false`; schedules cannot be empty.
    pub fn is_empty(&self) -> bool { self.transitions.is_empty() }

    /// Total number of frames.
    pub fn total_frames(&self) -> usize { self.total_frames }

    /// Easing function.
    pub fn easing(&self) -> Easing { self.easing }

    /// Frame allocation strategy.
    pub fn allocation(&self) -> FrameAllocation { self.allocation }

    /// Nominal number of frames per transition, `total / len`.
    pub fn frames_per_transition(&self) -> usize {
        self.total_frames / self.transitions.len()
    }

    /// Number of frames allotted to transition `index`.
    pub fn frames_in(&self, index: usize) -> usize {
        let base = self.frames_per_transition();
        match self.allocation {
            FrameAllocation::Truncate => base,
            FrameAllocation::Distribute => {
                let rem = self.total_frames % self.transitions.len();
                base + usize::from(index < rem)
            },
        }
    }

    // index of the active transition and the frame offset within it
    fn locate(&self, frame: usize) -> (usize, usize) {
        let len = self.transitions.len();
        let base = self.frames_per_transition();
        match self.allocation {
            FrameAllocation::Truncate => {
                ((frame / base).min(len - 1), frame % base)
            },
            FrameAllocation::Distribute => {
                let rem = self.total_frames % len;
                // the first `rem` transitions are one frame longer
                let long = rem * (base + 1);
                let (index, offset)
                    = if frame < long {
                        (frame / (base + 1), frame % (base + 1))
                    } else {
                        let k = frame - long;
                        (rem + k / base, k % base)
                    };
                if index >= len {
                    (len - 1, self.frames_in(len - 1) - 1)
                } else {
                    (index, offset)
                }
            },
        }
    }

    /// Resolve a frame index to the active transition and blend weight.
    ///
    /// Frames past the end of the schedule resolve to the last transition.
    pub fn resolve(&self, frame: usize) -> FrameInfo {
        let (transition_index, offset) = self.locate(frame);
        let progress = offset as f64 / self.frames_in(transition_index) as f64;
        FrameInfo {
            frame,
            transition_index,
            transition: self.transitions[transition_index],
            progress,
            weight: self.easing.apply(progress),
        }
    }

    /// Iterate over every frame in order.
    pub fn frames(&self) -> impl Iterator<Item = FrameInfo> + '_ {
        (0..self.total_frames).map(|f| self.resolve(f))
    }
}

/// Transitions of the reference script.
pub fn reference_transitions() -> ScheduleResult<Vec<Transition>> {
    const SCRIPT: [((u32, u32, i32), (u32, u32, i32)); 26] = [
        ((1, 0,  0), (2, 0,  0)),
        ((2, 0,  0), (2, 1, -1)),
        ((2, 1, -1), (2, 1,  0)),
        ((2, 1,  0), (2, 1,  1)),
        ((2, 1,  1), (3, 0,  0)),
        ((3, 0,  0), (3, 1, -1)),
        ((3, 1, -1), (3, 1,  0)),
        ((3, 1,  0), (3, 1,  1)),
        ((3, 1,  1), (3, 2, -2)),
        ((3, 2, -2), (3, 2, -1)),
        ((3, 2, -1), (3, 2,  0)),
        ((3, 2,  0), (3, 2,  1)),
        ((3, 2,  1), (3, 2,  2)),
        ((3, 2,  2), (4, 0,  0)),
        ((4, 0,  0), (4, 1, -1)),
        ((4, 1, -1), (4, 1,  0)),
        ((4, 1,  0), (4, 1,  1)),
        ((4, 1,  1), (4, 2, -2)),
        ((4, 2, -2), (4, 2, -1)),
        ((4, 2, -1), (4, 2,  0)),
        ((4, 2,  0), (4, 2,  1)),
        ((4, 2,  1), (4, 2,  2)),
        ((4, 2,  2), (4, 3, -3)),
        ((4, 3, -3), (4, 3, -2)),
        ((4, 3, -2), (4, 3, -1)),
        ((4, 3, -1), (4, 3,  0)),
    ];
    SCRIPT.iter()
        .map(|&(from, to)| Transition::from_tuples(from, to))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn one_transition(frames: usize, allocation: FrameAllocation) -> Schedule {
        let tr = Transition::from_tuples((1, 0, 0), (2, 0, 0)).unwrap();
        Schedule::new(vec![tr], frames, Easing::Linear, allocation).unwrap()
    }

    #[test]
    fn reference_script() {
        let sched = Schedule::reference().unwrap();
        assert_eq!(sched.len(), 26);
        assert_eq!(sched.total_frames(), 780);
        assert_eq!(sched.frames_per_transition(), 30);
        // each transition starts where the previous one ended
        for pair in sched.transitions().windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        let last = sched.transitions()[25];
        assert_eq!(last.to, QuantumState::new(4, 3, 0).unwrap());
    }

    #[test]
    fn first_frame() {
        let sched = Schedule::reference().unwrap();
        let f = sched.resolve(0);
        assert_eq!(f.transition_index, 0);
        assert_eq!(f.progress, 0.0);
        assert_eq!(f.weight, 0.0);
        assert_eq!(f.weights(), [1.0, 0.0]);
        assert!(f.starts_transition());
    }

    #[test]
    fn last_frame() {
        let sched = Schedule::reference().unwrap();
        let f = sched.resolve(779);
        assert_eq!(f.transition_index, 25);
        assert_abs_diff_eq!(f.progress, 29.0 / 30.0, epsilon = 1e-15);
    }

    #[test]
    fn transition_boundaries() {
        let sched = Schedule::reference().unwrap();
        let f = sched.resolve(59);
        assert_eq!(f.transition_index, 1);
        let f = sched.resolve(60);
        assert_eq!(f.transition_index, 2);
        assert_eq!(f.progress, 0.0);
        assert!(f.starts_transition());
    }

    #[test]
    fn frames_past_the_end_clamp() {
        let sched = Schedule::reference().unwrap();
        for &frame in [780, 781, 800, 10_000].iter() {
            assert_eq!(sched.resolve(frame).transition_index, 25);
        }
        let sched = one_transition(7, FrameAllocation::Distribute);
        let f = sched.resolve(50);
        assert_eq!(f.transition_index, 0);
        assert_abs_diff_eq!(f.progress, 6.0 / 7.0, epsilon = 1e-15);
    }

    #[test]
    fn truncation_remainder_restarts_last_transition() {
        let trs = reference_transitions().unwrap()[..3].to_vec();
        let sched = Schedule::new(trs, 11, Easing::Linear, FrameAllocation::Truncate)
            .unwrap();
        assert_eq!(sched.frames_per_transition(), 3);
        // frames 9 and 10 are leftovers of 11 / 3
        let f = sched.resolve(9);
        assert_eq!(f.transition_index, 2);
        assert_eq!(f.progress, 0.0);
        let f = sched.resolve(10);
        assert_eq!(f.transition_index, 2);
        assert_abs_diff_eq!(f.progress, 1.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn distribution_covers_every_frame_once() {
        let trs = reference_transitions().unwrap()[..4].to_vec();
        let sched = Schedule::new(trs, 14, Easing::Linear, FrameAllocation::Distribute)
            .unwrap();
        let counts: Vec<usize> = (0..4).map(|k| sched.frames_in(k)).collect();
        assert_eq!(counts, vec![4, 4, 3, 3]);
        let mut seen = vec![0_usize; 4];
        let mut prev: Option<FrameInfo> = None;
        for f in sched.frames() {
            seen[f.transition_index] += 1;
            if let Some(p) = prev {
                if p.transition_index == f.transition_index {
                    assert!(f.progress > p.progress);
                } else {
                    assert_eq!(f.transition_index, p.transition_index + 1);
                    assert_eq!(f.progress, 0.0);
                }
            }
            prev = Some(f);
        }
        assert_eq!(seen, counts);
    }

    #[test]
    fn easing_functions() {
        assert_eq!(Easing::Linear.apply(0.3), 0.3);
        assert_abs_diff_eq!(Easing::EaseInOutSine.apply(0.0), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(Easing::EaseInOutSine.apply(0.5), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(Easing::EaseInOutSine.apply(1.0), 1.0, epsilon = 1e-15);
        let tr = Transition::from_tuples((1, 0, 0), (2, 0, 0)).unwrap();
        let sched = Schedule::new(
            vec![tr], 4, Easing::EaseInOutSine, FrameAllocation::Truncate).unwrap();
        let f = sched.resolve(1);
        assert_abs_diff_eq!(f.weight, (1.0 - (PI / 4.0).cos()) / 2.0, epsilon = 1e-15);
    }

    #[test]
    fn construction_errors() {
        assert!(matches!(
            Schedule::new(vec![], 10, Easing::Linear, FrameAllocation::Truncate),
            Err(ScheduleError::Empty),
        ));
        let trs = reference_transitions().unwrap();
        assert!(matches!(
            Schedule::new(trs, 25, Easing::Linear, FrameAllocation::Truncate),
            Err(ScheduleError::TooFewFrames(25, 26)),
        ));
        assert!(matches!(
            Transition::from_tuples((1, 0, 0), (1, 1, 0)),
            Err(ScheduleError::State(_)),
        ));
        let _ = one_transition(1, FrameAllocation::Truncate);
    }
}
