use std::f32::consts::PI;

/// Maps the raw progress of a roll to the fraction of motion applied.
///
/// Inputs are in `[0, 1]`. Outputs conventionally are too, but a custom
/// function is free to overshoot or to be non-monotonic.
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Cubic smoothstep, zero velocity at both ends.
    Smooth,
    InOutSine,
    /// Goes out with [`Easing::Smooth`] and comes back, ending at `0`.
    ThereAndBack,
    Custom(fn(f32) -> f32),
}

impl Easing {
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Smooth => smooth(t),
            Easing::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ThereAndBack => {
                if t < 0.5 {
                    smooth(2.0 * t)
                } else {
                    smooth(2.0 - 2.0 * t)
                }
            }
            Easing::Custom(f) => f(t),
        }
    }
}

fn smooth(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
