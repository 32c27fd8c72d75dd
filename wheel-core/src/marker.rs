use crate::types::{Color, MarkerId};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// How the segment from the wheel center to a marker is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Connector {
    /// No connector line.
    Hidden,
    /// Line colored with the average of the wheel and marker colors.
    #[default]
    Blended,
    Colored(Color),
}

/// Placement request for a marker, in polar coordinates around the
/// wheel center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerSpec {
    pub distance: f32,
    pub angle: f32,
    pub color: Color,
    pub connector: Connector,
    /// When set, `distance` is measured in wheel radii rather than
    /// world units.
    pub in_radii: bool,
}

impl MarkerSpec {
    pub fn new(distance: f32, angle: f32) -> Self {
        Self {
            distance,
            angle,
            color: Color::RED,
            connector: Connector::Blended,
            in_radii: false,
        }
    }

    /// A marker `fraction` wheel radii away from the center; `1.0` sits
    /// on the rim.
    pub fn relative(fraction: f32, angle: f32) -> Self {
        Self {
            in_radii: true,
            ..Self::new(fraction, angle)
        }
    }

    pub fn random_in_disk(max_distance: f32, color: Color, rng: &mut impl Rng) -> Self {
        let distance = rng.random_range(0.0..=max_distance.max(0.0));
        let angle = rng.random_range(0.0..TAU);
        Self::new(distance, angle).with_color(color)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = connector;
        self
    }

    pub fn without_connector(self) -> Self {
        self.with_connector(Connector::Hidden)
    }
}

/// A point carried by a wheel at a fixed distance from its center.
///
/// Only the polar offset is stored. The absolute position depends on the
/// wheel center and is derived through
/// [`Wheel::position_of`](crate::wheel::Wheel::position_of).
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub distance: f32,
    /// Absolute angle in radians.
    pub angle: f32,
    /// Angle relative to the wheel rotation of the current roll, so that
    /// `angle == rotation + base_angle` holds on every step.
    pub(crate) base_angle: f32,
    pub color: Color,
    pub connector: Connector,
}

impl Marker {
    /// Offset from the wheel center.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.distance
    }

    #[inline]
    pub fn has_connector(&self) -> bool {
        !matches!(self.connector, Connector::Hidden)
    }

    pub fn connector_color(&self, wheel_color: Color) -> Option<Color> {
        match self.connector {
            Connector::Hidden => None,
            Connector::Blended => Some(wheel_color.average(self.color)),
            Connector::Colored(c) => Some(c),
        }
    }
}

/// Result of morphing one marker into a new placement.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerMorph {
    /// The marker as it was before the morph.
    pub from: Marker,
    /// The marker as it is stored now.
    pub to: Marker,
    /// Signed sweep an interpolator should follow, see [`shortest_arc`].
    pub arc_angle: f32,
}

impl MarkerMorph {
    /// Position at fraction `t` along the circular arc from the old to the
    /// new marker position, both taken relative to `center`.
    ///
    /// The arc bends by `arc_angle` in total. When both placements share
    /// the same distance the arc is centered on the wheel center itself.
    pub fn position_at(&self, center: Vec2, t: f32) -> Vec2 {
        let start = center + self.from.offset();
        let end = center + self.to.offset();
        let chord = end - start;

        if self.arc_angle.abs() < 1e-6 {
            return start + chord * t;
        }

        let arc_center = start + chord * 0.5 + chord.perp() * 0.5 / (self.arc_angle * 0.5).tan();
        arc_center + Vec2::from_angle(self.arc_angle * t).rotate(start - arc_center)
    }
}

/// Signed angle of minimal magnitude taking `from` to `to`.
///
/// Negative results mean a clockwise sweep. The magnitude never exceeds
/// `π`; for exactly opposite angles the positive sweep is chosen.
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    let a = (from - to).rem_euclid(TAU);
    let b = (to - from).rem_euclid(TAU);
    if a < b { -a } else { b }
}
