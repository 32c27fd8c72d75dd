//! Rolling-wheel kinematics: circles that roll without slipping and the
//! cycloid-family curves traced by the markers they carry.
//!
//! Main components:
//! - [`wheel`] — the wheel aggregate, its marker arena and accessors.
//! - [`roll`] — roll paths, pivots and the per-frame [`roll::RollSession`].
//! - [`marker`] — marker records, placement specs and shortest-arc morphs.
//! - [`trace`] — path-trace handles sampling marker positions.
//! - [`easing`] — rate functions mapping progress to applied motion.
//! - [`config`] — tunables loaded from TOML.
//! - [`error`] — usage and configuration errors.
//! - [`types`] — shared ids and colors.

pub mod config;
pub mod easing;
pub mod error;
pub mod marker;
pub mod roll;
pub mod trace;
pub mod types;
pub mod wheel;

pub use error::WheelError;
pub use roll::{Pivot, RollOptions, RollPath, RollSession};
pub use wheel::Wheel;
