//! Rolling without slipping.
//!
//! A roll is started with [`Wheel::roll`], which snapshots the wheel's
//! current center and marker angles and returns a [`RollSession`]. The
//! driver then calls [`RollSession::advance`] once per frame with a
//! progress value in `[0, 1]`:
//!
//! 1. The progress is eased into `alpha` with the session's [`Easing`].
//! 2. The center and rotation for `alpha` are computed from the snapshot
//!    (no incremental integration, so frames never drift).
//! 3. The pose is written to the wheel and every marker angle becomes
//!    `rotation + base_angle`.
//!
//! Two regimes exist, picked by [`RollPath`]:
//!
//! - **Straight**: the center moves by `alpha * direction` and the wheel
//!   turns by `alpha * travel / radius`, where `travel = |direction|`,
//!   negated when the direction has no positive component.
//! - **Around a pivot**: the center orbits the pivot at its current
//!   distance (`orbit`) by `alpha * sweep` radians and the wheel turns by
//!   `alpha * orbit * sweep / radius`, negated when the wheel sits inside
//!   the pivot circle.
//!
//! `reverse` flips the sign of the rotation in both regimes.

use crate::{easing::Easing, error::WheelError, wheel::Wheel};
use glam::Vec2;
use tracing::{debug, trace, warn};

/// Orbit radii below this are treated as a pivot sitting on the center.
const MIN_ORBIT: f32 = 1e-6;

/// Circle (or bare point, `radius == 0`) a wheel can roll around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pivot {
    pub center: Vec2,
    pub radius: f32,
}

impl Pivot {
    pub fn point(center: Vec2) -> Self {
        Self {
            center,
            radius: 0.0,
        }
    }

    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl From<&Wheel> for Pivot {
    fn from(wheel: &Wheel) -> Self {
        Self::circle(wheel.center(), wheel.radius())
    }
}

/// Where a roll goes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RollPath {
    /// Roll along a straight line by this displacement.
    Straight(Vec2),
    /// Orbit `pivot` by `sweep` radians (counter-clockwise when positive).
    Around { pivot: Pivot, sweep: f32 },
}

#[derive(Clone, Copy, Debug)]
pub struct RollOptions {
    pub reverse: bool,
    pub easing: Easing,
    /// Seconds the driver should spend on the roll. Only used by
    /// [`RollSession::progress_at`].
    pub duration: f32,
}

impl Default for RollOptions {
    fn default() -> Self {
        Self {
            reverse: false,
            easing: Easing::Linear,
            duration: 2.0,
        }
    }
}

impl RollOptions {
    pub fn from_config(cfg: &crate::config::Config) -> Self {
        Self {
            duration: cfg.roll_duration,
            ..Self::default()
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Regime {
    Straight {
        direction: Vec2,
    },
    Orbit {
        pivot: Vec2,
        orbit: f32,
        start_angle: f32,
        sweep: f32,
        inside: bool,
    },
}

/// Pose written by one [`RollSession::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollFrame {
    pub progress: f32,
    /// Eased progress actually applied.
    pub alpha: f32,
    pub center: Vec2,
    pub rotation: f32,
    /// Point of the rim touching the rolling track.
    pub contact: Vec2,
    pub finished: bool,
}

/// One roll in progress; created by [`Wheel::roll`].
///
/// The session holds everything snapshotted at roll start, so advancing
/// it is a pure function of the progress value. Starting another roll on
/// the same wheel supersedes this one.
#[derive(Clone, Debug)]
pub struct RollSession {
    wheel: u64,
    epoch: u64,
    origin: Vec2,
    radius: f32,
    regime: Regime,
    travel: f32,
    options: RollOptions,
    last_progress: Option<f32>,
    finished: bool,
}

impl Wheel {
    /// Starts rolling along `path`.
    ///
    /// The current center becomes the roll origin, rotation restarts at
    /// zero and every marker's current angle is taken as its base angle.
    /// A roll already in progress is cancelled.
    ///
    /// ### Parameters
    /// - `path` - Straight displacement, or a pivot and angular sweep.
    /// - `options` - Direction flip, easing and nominal duration.
    ///
    /// ### Returns
    /// A [`RollSession`] to advance frame by frame.
    ///
    /// ### Errors
    /// - [`WheelError::DegeneratePivot`] if the pivot center coincides
    ///   with the wheel center.
    /// - [`WheelError::InvalidRadius`] if the pivot radius is negative.
    ///
    /// On error the wheel and any roll already in progress are untouched.
    pub fn roll(&mut self, path: RollPath, options: RollOptions) -> Result<RollSession, WheelError> {
        let origin = self.center();

        let (regime, mut travel) = match path {
            RollPath::Straight(direction) => {
                let mut travel = direction.length();
                // Pointing toward decreasing coordinates turns the other way.
                if !(direction.x > 0.0 || direction.y > 0.0) {
                    travel = -travel;
                }
                (Regime::Straight { direction }, travel)
            }
            RollPath::Around { pivot, sweep } => {
                if !(pivot.radius.is_finite() && pivot.radius >= 0.0) {
                    warn!(radius = pivot.radius, "rejected pivot radius");
                    return Err(WheelError::InvalidRadius(pivot.radius));
                }
                let arm = origin - pivot.center;
                let orbit = arm.length();
                if orbit < MIN_ORBIT {
                    warn!(x = pivot.center.x, y = pivot.center.y, "pivot on wheel center");
                    return Err(WheelError::DegeneratePivot {
                        x: pivot.center.x,
                        y: pivot.center.y,
                    });
                }

                // A bare point never encloses the wheel, so it is always external.
                let inside = orbit < pivot.radius;
                let travel = if inside { -orbit * sweep } else { orbit * sweep };
                let regime = Regime::Orbit {
                    pivot: pivot.center,
                    orbit,
                    start_angle: arm.y.atan2(arm.x),
                    sweep,
                    inside,
                };
                (regime, travel)
            }
        };
        if options.reverse {
            travel = -travel;
        }

        let epoch = self.begin_roll();
        debug!(epoch, ?path, travel, reverse = options.reverse, "roll started");

        Ok(RollSession {
            wheel: self.id(),
            epoch,
            origin,
            radius: self.radius(),
            regime,
            travel,
            options,
            last_progress: None,
            finished: false,
        })
    }
}

impl RollSession {
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Signed arc length rolled at `alpha == 1`.
    #[inline]
    pub fn travel(&self) -> f32 {
        self.travel
    }

    /// Wheel rotation at `alpha == 1`.
    #[inline]
    pub fn total_rotation(&self) -> f32 {
        self.travel / self.radius
    }

    #[inline]
    pub fn options(&self) -> &RollOptions {
        &self.options
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Center of the pivot for circular rolls.
    pub fn pivot_center(&self) -> Option<Vec2> {
        match self.regime {
            Regime::Straight { .. } => None,
            Regime::Orbit { pivot, .. } => Some(pivot),
        }
    }

    /// Progress matching `elapsed` seconds of a roll lasting
    /// [`RollOptions::duration`], clamped to `[0, 1]`.
    pub fn progress_at(&self, elapsed: f32) -> f32 {
        if self.options.duration <= 0.0 {
            return 1.0;
        }
        (elapsed / self.options.duration).clamp(0.0, 1.0)
    }

    /// Center and rotation at eased fraction `alpha`, without touching any
    /// wheel.
    pub fn pose_at(&self, alpha: f32) -> (Vec2, f32) {
        let rotation = alpha * self.travel / self.radius;
        let center = match self.regime {
            Regime::Straight { direction } => self.origin + alpha * direction,
            Regime::Orbit {
                pivot,
                orbit,
                start_angle,
                sweep,
                ..
            } => pivot + Vec2::from_angle(start_angle + alpha * sweep) * orbit,
        };
        (center, rotation)
    }

    /// Rim point that touches the track when the wheel is centered at
    /// `center`.
    ///
    /// For straight rolls this is the side of the wheel on which a track
    /// line makes the motion slip-free; for circular rolls it lies on the
    /// line through the pivot, facing it from outside or away from it
    /// from inside.
    pub fn contact_at(&self, center: Vec2) -> Vec2 {
        match self.regime {
            Regime::Straight { direction } => {
                let side = direction.normalize_or_zero().perp() * self.travel.signum();
                center + side * self.radius
            }
            Regime::Orbit { pivot, inside, .. } => {
                let radial = (center - pivot).normalize_or_zero();
                if inside {
                    center + radial * self.radius
                } else {
                    center - radial * self.radius
                }
            }
        }
    }

    /// Moves `wheel` to the pose for `progress`.
    ///
    /// Progress values must lie in `[0, 1]` and must not decrease within
    /// one session. Passing `1.0` finishes the roll and returns the wheel
    /// to idle. Stopping early leaves the wheel at the last pose.
    ///
    /// ### Errors
    /// - [`WheelError::ForeignRoll`] if `wheel` is not the wheel the
    ///   session was started on (a clone of it counts as another wheel).
    /// - [`WheelError::StaleRoll`] if the session finished already, or
    ///   another roll has started (or the roll was cancelled) since.
    /// - [`WheelError::InvalidProgress`] for out-of-range, NaN or
    ///   decreasing progress values.
    pub fn advance(&mut self, wheel: &mut Wheel, progress: f32) -> Result<RollFrame, WheelError> {
        if wheel.id() != self.wheel {
            warn!(epoch = self.epoch, "roll session used on another wheel");
            return Err(WheelError::ForeignRoll);
        }
        if self.finished || !wheel.is_active_roll(self.wheel, self.epoch) {
            return Err(WheelError::StaleRoll);
        }
        let last = self.last_progress.unwrap_or(0.0);
        if !(0.0..=1.0).contains(&progress) || progress < last {
            return Err(WheelError::InvalidProgress { progress, last });
        }

        let alpha = self.options.easing.apply(progress);
        let (center, rotation) = self.pose_at(alpha);
        wheel.apply_pose(center, rotation);
        self.last_progress = Some(progress);

        trace!(epoch = self.epoch, progress, alpha, rotation, "roll step");

        if progress >= 1.0 {
            self.finished = true;
            wheel.finish_roll(self.epoch);
            debug!(epoch = self.epoch, rotation, "roll finished");
        }

        Ok(RollFrame {
            progress,
            alpha,
            center,
            rotation,
            contact: self.contact_at(center),
            finished: self.finished,
        })
    }
}
