use crate::{
    types::{Color, MarkerId},
    wheel::Wheel,
};
use glam::Vec2;

/// Records the path one marker draws while its wheel moves.
///
/// A trace does not borrow the wheel; it remembers the marker id and is
/// handed the wheel on every [`PathTrace::sample`]. It stays valid for as
/// long as the caller keeps it, and simply yields `None` once its marker
/// has been removed.
#[derive(Clone, Debug)]
pub struct PathTrace {
    marker: MarkerId,
    color: Color,
    min_step: f32,
    points: Vec<Vec2>,
}

impl PathTrace {
    pub fn new(marker: MarkerId, color: Color) -> Self {
        Self {
            marker,
            color,
            min_step: 0.0,
            points: Vec::with_capacity(64),
        }
    }

    /// Only record a new point once the marker moved further than `step`
    /// from the last recorded one.
    pub fn with_min_step(mut self, step: f32) -> Self {
        self.min_step = step.max(0.0);
        self
    }

    #[inline]
    pub fn marker_id(&self) -> MarkerId {
        self.marker
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Samples the marker's current position and records it.
    ///
    /// Sampling twice without the wheel moving returns the same point and
    /// records it only once.
    ///
    /// ### Returns
    /// The marker's absolute position, or `None` if the marker is gone.
    pub fn sample(&mut self, wheel: &Wheel) -> Option<Vec2> {
        let marker = wheel.marker_by_id(self.marker)?;
        let p = wheel.position_of(marker);

        let far_enough = self
            .points
            .last()
            .is_none_or(|last| last.distance(p) > self.min_step);
        if far_enough {
            self.points.push(p);
        }
        Some(p)
    }

    /// Forgets all recorded points; the next sample starts a new path.
    pub fn restart(&mut self) {
        self.points.clear();
    }

    /// Length of the recorded polyline.
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}
