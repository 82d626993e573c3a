pub extern crate nalgebra as na;

pub mod catalog;
pub mod config;
pub mod layer;
pub mod propagation;
pub mod sim_info;
pub mod snapshot;
pub mod source;
pub mod tracker;
pub mod units;

/// A participant in the frame loop.
///
/// The frame driver calls `init` once before the first frame and `step`
/// for every redraw stage of every frame afterwards.
pub trait FrameComponent<'a> {
    /// The type for the environment structure that is scoped to this component.
    type Environment;

    /// What a single step produced, if anything.
    type Report;

    fn init(&mut self, _env: &'a Self::Environment) {}

    fn step(&mut self, env: &'a Self::Environment) -> Self::Report;
}
