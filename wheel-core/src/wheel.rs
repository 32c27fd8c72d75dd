//! The rolling wheel aggregate and its marker arena.
//!
//! A [`Wheel`] owns a circle of fixed radius, a center point and an
//! ordered list of [`Marker`]s. Marker indices used throughout this module
//! are positions in that list (insertion order), not ids.
//!
//! Rolling itself lives in [`crate::roll`]; this module only exposes the
//! hooks a [`crate::roll::RollSession`] uses to write each frame's pose.

use crate::{
    config::Config,
    error::WheelError,
    marker::{Marker, MarkerMorph, MarkerSpec, shortest_arc},
    trace::PathTrace,
    types::{Color, MarkerId},
};
use glam::Vec2;
use std::{
    f32::consts::TAU,
    sync::atomic::{AtomicU64, Ordering},
};
use tracing::{debug, warn};

static WHEEL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of a [`Wheel`], so a roll session only ever
/// drives the wheel it was started on.
fn next_wheel_id() -> u64 {
    WHEEL_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Whether a roll is currently driving the wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RollState {
    #[default]
    Idle,
    /// A roll started with the given epoch is in progress.
    Rolling { epoch: u64 },
}

/// Line segment from the wheel center to a marker, ready for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectorSegment {
    pub marker: MarkerId,
    pub start: Vec2,
    pub end: Vec2,
    pub color: Color,
}

/// A circle that rolls without slipping and carries markers.
///
/// ### Invariants
/// - `radius` is positive and finite.
/// - For every marker, `angle == rotation + base_angle`.
/// - `rotation` is reset to `0` whenever a roll starts.
/// - Every wheel, clones included, has its own identity; a clone starts
///   idle even if the original was mid-roll.
#[derive(Debug)]
pub struct Wheel {
    id: u64,
    radius: f32,
    center: Vec2,
    rotation: f32,
    orientation: f32,
    color: Color,
    markers: Vec<Marker>,
    next_id: MarkerId,
    roll: RollState,
    epoch: u64,
}

impl Wheel {
    /// Creates a wheel with no markers.
    ///
    /// ### Parameters
    /// - `radius` - Wheel radius; must be positive and finite.
    /// - `center` - Initial center point.
    ///
    /// ### Returns
    /// The new wheel, or [`WheelError::InvalidRadius`].
    pub fn new(radius: f32, center: Vec2) -> Result<Self, WheelError> {
        if !(radius.is_finite() && radius > 0.0) {
            warn!(radius, "rejected wheel radius");
            return Err(WheelError::InvalidRadius(radius));
        }
        Ok(Self {
            id: next_wheel_id(),
            radius,
            center,
            rotation: 0.0,
            orientation: 0.0,
            color: Color::BLUE,
            markers: Vec::new(),
            next_id: 0,
            roll: RollState::Idle,
            epoch: 0,
        })
    }

    /// Creates a wheel using the radius and color from `cfg`.
    pub fn from_config(cfg: &Config, center: Vec2) -> Result<Self, WheelError> {
        Ok(Self::new(cfg.radius, center)?.with_color(cfg.wheel_color))
    }

    /// Creates a wheel and places `specs` on it in order.
    pub fn with_markers(
        radius: f32,
        center: Vec2,
        specs: impl IntoIterator<Item = MarkerSpec>,
    ) -> Result<Self, WheelError> {
        let mut wheel = Self::new(radius, center)?;
        wheel.place_markers(specs);
        Ok(wheel)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the initial orientation of the rim (only affects drawing).
    pub fn with_orientation(mut self, angle: f32) -> Self {
        self.orientation = angle;
        self
    }

    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Rotation accumulated since the current (or last) roll started.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Absolute orientation of the rim: the initial orientation plus the
    /// rotation of every roll so far.
    #[inline]
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[inline]
    pub fn marker(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn marker_by_id(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    #[inline]
    pub fn roll_state(&self) -> RollState {
        self.roll
    }

    #[inline]
    pub fn is_rolling(&self) -> bool {
        matches!(self.roll, RollState::Rolling { .. })
    }

    /// Absolute position of `marker` given the current center.
    #[inline]
    pub fn position_of(&self, marker: &Marker) -> Vec2 {
        self.center + marker.offset()
    }

    pub fn marker_position(&self, index: usize) -> Option<Vec2> {
        self.markers.get(index).map(|m| self.position_of(m))
    }

    /// Absolute marker positions in arena order.
    pub fn marker_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.markers.iter().map(|m| self.position_of(m))
    }

    /// Connector segments for all markers that have one.
    pub fn connectors(&self) -> impl Iterator<Item = ConnectorSegment> + '_ {
        self.markers.iter().filter_map(|m| {
            m.connector_color(self.color).map(|color| ConnectorSegment {
                marker: m.id,
                start: self.center,
                end: self.position_of(m),
                color,
            })
        })
    }

    /// Converts a relative spec (distance in radii) into world units.
    pub fn resolve_spec(&self, spec: MarkerSpec) -> MarkerSpec {
        if spec.in_radii {
            MarkerSpec {
                distance: spec.distance * self.radius,
                in_radii: false,
                ..spec
            }
        } else {
            spec
        }
    }

    fn build_marker(&self, id: MarkerId, spec: MarkerSpec) -> Marker {
        let spec = self.resolve_spec(spec);
        Marker {
            id,
            distance: spec.distance,
            angle: spec.angle,
            base_angle: spec.angle - self.rotation,
            color: spec.color,
            connector: spec.connector,
        }
    }

    /// Places one marker at a polar offset from the current center.
    ///
    /// Any distance and angle are accepted; a distance of `0` puts the
    /// marker on the center. Markers placed mid-roll ride along with the
    /// rotation from that point on.
    ///
    /// ### Returns
    /// A copy of the stored marker.
    pub fn place_marker(&mut self, spec: MarkerSpec) -> Marker {
        let marker = self.build_marker(self.next_id, spec);
        self.next_id += 1;
        self.markers.push(marker.clone());
        debug!(id = marker.id, distance = marker.distance, angle = marker.angle, "placed marker");
        marker
    }

    /// Places several markers; the returned copies are in the same order
    /// as they were appended to the arena.
    pub fn place_markers(&mut self, specs: impl IntoIterator<Item = MarkerSpec>) -> Vec<Marker> {
        specs.into_iter().map(|s| self.place_marker(s)).collect()
    }

    /// Resolves an optional index selection against the arena.
    ///
    /// `None` selects every marker in arena order. Explicit selections are
    /// checked for range and duplicates before anything is mutated.
    fn select(&self, indices: Option<&[usize]>) -> Result<Vec<usize>, WheelError> {
        let len = self.markers.len();
        let Some(indices) = indices else {
            return Ok((0..len).collect());
        };

        let mut seen = vec![false; len];
        for &index in indices {
            if index >= len {
                return Err(WheelError::IndexOutOfRange { index, len });
            }
            if seen[index] {
                return Err(WheelError::DuplicateIndex(index));
            }
            seen[index] = true;
        }
        Ok(indices.to_vec())
    }

    /// Moves the selected markers to new polar placements.
    ///
    /// Marker `indices[i]` (or the `i`-th marker when `indices` is `None`)
    /// takes the distance, angle, color and connector of `targets[i]`. Its
    /// id is kept, so existing path traces keep following it.
    ///
    /// ### Parameters
    /// - `targets` - One placement per selected marker.
    /// - `indices` - Arena positions to morph, or `None` for all markers.
    ///
    /// ### Returns
    /// One [`MarkerMorph`] per selected marker, carrying the signed
    /// shortest arc between the old and the new angle.
    ///
    /// ### Errors
    /// - [`WheelError::NoMarkers`] if `indices` is `None` and the wheel is empty.
    /// - [`WheelError::LengthMismatch`] if `targets` and the selection differ in length.
    /// - [`WheelError::IndexOutOfRange`] / [`WheelError::DuplicateIndex`] for bad selections.
    pub fn morph_markers(
        &mut self,
        targets: &[MarkerSpec],
        indices: Option<&[usize]>,
    ) -> Result<Vec<MarkerMorph>, WheelError> {
        if indices.is_none() && self.markers.is_empty() {
            warn!("morph requested on a wheel without markers");
            return Err(WheelError::NoMarkers);
        }
        let selected = self.select(indices)?;
        if selected.len() != targets.len() {
            return Err(WheelError::LengthMismatch {
                expected: selected.len(),
                got: targets.len(),
            });
        }

        let mut morphs = Vec::with_capacity(selected.len());
        for (&index, &target) in selected.iter().zip(targets) {
            let from = self.markers[index].clone();
            let to = self.build_marker(from.id, target);
            let arc_angle = shortest_arc(from.angle, to.angle);

            self.markers[index] = to.clone();
            morphs.push(MarkerMorph { from, to, arc_angle });
        }

        debug!(count = morphs.len(), "morphed markers");
        Ok(morphs)
    }

    /// Removes the selected markers (all when `indices` is `None`).
    ///
    /// The removed markers are returned in selection order with their last
    /// distance and angle, so a caller can shrink them into
    /// [`Wheel::center`].
    pub fn remove_markers(&mut self, indices: Option<&[usize]>) -> Result<Vec<Marker>, WheelError> {
        let selected = self.select(indices)?;
        if selected.is_empty() {
            return Ok(Vec::new());
        }

        let removed: Vec<Marker> = selected.iter().map(|&i| self.markers[i].clone()).collect();
        let mut keep = vec![true; self.markers.len()];
        for &i in &selected {
            keep[i] = false;
        }
        let mut flags = keep.into_iter();
        self.markers.retain(|_| flags.next().unwrap_or(true));

        debug!(count = removed.len(), left = self.markers.len(), "removed markers");
        Ok(removed)
    }

    /// Creates one [`PathTrace`] per selected marker.
    ///
    /// Traces start empty; call [`PathTrace::sample`] after every frame.
    pub fn trace_paths(&self, indices: Option<&[usize]>) -> Result<Vec<PathTrace>, WheelError> {
        let selected = self.select(indices)?;
        Ok(selected
            .into_iter()
            .map(|i| {
                let m = &self.markers[i];
                PathTrace::new(m.id, m.color)
            })
            .collect())
    }

    /// Places the center at `point + radius * offset_dir`.
    ///
    /// With a unit `offset_dir` this puts the rim on `point`, e.g.
    /// `Vec2::Y` rests the wheel on top of it.
    pub fn move_to(&mut self, point: Vec2, offset_dir: Vec2) {
        self.center = point + self.radius * offset_dir;
    }

    pub fn shift(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Drops the active roll, if any, keeping the current pose.
    ///
    /// ### Returns
    /// `true` if a roll was active.
    pub fn cancel_roll(&mut self) -> bool {
        let was_rolling = self.is_rolling();
        if was_rolling {
            debug!(epoch = self.epoch, "roll cancelled");
        }
        self.roll = RollState::Idle;
        was_rolling
    }

    /// Starts a new roll and returns its epoch.
    ///
    /// Any previous roll is superseded. Rotation restarts at zero and each
    /// marker's current angle, reduced to `[0, TAU)`, becomes its base angle.
    pub(crate) fn begin_roll(&mut self) -> u64 {
        if let RollState::Rolling { epoch } = self.roll {
            debug!(epoch, "roll superseded by a new roll");
        }
        self.epoch += 1;
        self.roll = RollState::Rolling { epoch: self.epoch };
        self.rotation = 0.0;
        for m in &mut self.markers {
            m.angle = m.angle.rem_euclid(TAU);
            m.base_angle = m.angle;
        }
        self.epoch
    }

    pub(crate) fn is_active_roll(&self, wheel: u64, epoch: u64) -> bool {
        self.id == wheel && self.roll == RollState::Rolling { epoch }
    }

    /// Writes the pose of one roll step: center, rotation and every
    /// marker angle derived from it.
    pub(crate) fn apply_pose(&mut self, center: Vec2, rotation: f32) {
        self.orientation += rotation - self.rotation;
        self.rotation = rotation;
        self.center = center;
        for m in &mut self.markers {
            m.angle = rotation + m.base_angle;
        }
    }

    pub(crate) fn finish_roll(&mut self, epoch: u64) {
        if self.roll == (RollState::Rolling { epoch }) {
            self.roll = RollState::Idle;
        }
    }
}

impl Clone for Wheel {
    fn clone(&self) -> Self {
        Self {
            id: next_wheel_id(),
            radius: self.radius,
            center: self.center,
            rotation: self.rotation,
            orientation: self.orientation,
            color: self.color,
            markers: self.markers.clone(),
            next_id: self.next_id,
            roll: RollState::Idle,
            epoch: self.epoch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::Connector;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn wheel_with(specs: &[MarkerSpec]) -> Wheel {
        Wheel::with_markers(1.0, Vec2::ZERO, specs.iter().copied()).unwrap()
    }

    #[test]
    fn new_rejects_bad_radius() {
        assert_eq!(
            Wheel::new(0.0, Vec2::ZERO).unwrap_err(),
            WheelError::InvalidRadius(0.0)
        );
        assert!(Wheel::new(-2.0, Vec2::ZERO).is_err());
        assert!(Wheel::new(f32::NAN, Vec2::ZERO).is_err());
        assert!(Wheel::new(f32::INFINITY, Vec2::ZERO).is_err());
    }

    #[test]
    fn from_config_uses_radius_and_color() {
        let cfg = Config {
            radius: 2.0,
            wheel_color: Color::GREEN,
            ..Config::default()
        };
        let wheel = Wheel::from_config(&cfg, Vec2::new(1.0, 1.0)).unwrap();
        assert_eq!(wheel.radius(), 2.0);
        assert_eq!(wheel.color(), Color::GREEN);
        assert_eq!(wheel.center(), Vec2::new(1.0, 1.0));
        assert!(!wheel.is_rolling());
    }

    #[test]
    fn place_marker_derives_position_from_center() {
        let mut wheel = Wheel::new(1.0, Vec2::new(5.0, -1.0)).unwrap();
        let m = wheel.place_marker(MarkerSpec::new(2.0, FRAC_PI_2));

        assert_eq!(m.id, 0);
        assert_eq!(wheel.markers().len(), 1);

        let p = wheel.marker_position(0).unwrap();
        assert!((p - Vec2::new(5.0, 1.0)).length() < 1e-6);

        // Position follows the center; nothing absolute is cached.
        wheel.shift(Vec2::new(1.0, 0.0));
        let p = wheel.marker_position(0).unwrap();
        assert!((p - Vec2::new(6.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn place_marker_at_zero_distance_sits_on_center() {
        let mut wheel = Wheel::new(1.0, Vec2::new(2.0, 3.0)).unwrap();
        wheel.place_marker(MarkerSpec::new(0.0, 1.234));
        assert_eq!(wheel.marker_position(0).unwrap(), wheel.center());
    }

    #[test]
    fn place_markers_preserves_order_and_assigns_fresh_ids() {
        let mut wheel = Wheel::new(1.0, Vec2::ZERO).unwrap();
        let placed = wheel.place_markers([
            MarkerSpec::new(1.0, 0.0),
            MarkerSpec::new(0.5, PI),
            MarkerSpec::new(2.0, FRAC_PI_2),
        ]);

        assert_eq!(placed.len(), 3);
        assert_eq!(placed.as_slice(), wheel.markers());
        let ids: Vec<MarkerId> = placed.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);

        // Ids are not reused after removal.
        wheel.remove_markers(Some(&[2])).unwrap();
        let m = wheel.place_marker(MarkerSpec::new(1.0, 0.0));
        assert_eq!(m.id, 3);
    }

    #[test]
    fn relative_spec_is_scaled_by_radius() {
        let mut wheel = Wheel::new(2.5, Vec2::ZERO).unwrap();
        let m = wheel.place_marker(MarkerSpec::relative(1.0, 0.0));
        assert_eq!(m.distance, 2.5);
        assert!((wheel.marker_position(0).unwrap() - Vec2::new(2.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn morph_overwrites_marker_and_reports_shortest_arc() {
        let mut wheel = wheel_with(&[MarkerSpec::new(2.0, 0.0), MarkerSpec::new(1.0, PI)]);

        let target = MarkerSpec::new(1.5, 3.0 * PI / 2.0).with_color(Color::GREEN);
        let morphs = wheel.morph_markers(&[target], Some(&[0])).unwrap();

        assert_eq!(morphs.len(), 1);
        assert!((morphs[0].arc_angle + FRAC_PI_2).abs() < 1e-6);
        assert_eq!(morphs[0].from.distance, 2.0);
        assert_eq!(morphs[0].to.id, morphs[0].from.id);

        let m = &wheel.markers()[0];
        assert_eq!(m.distance, 1.5);
        assert_eq!(m.angle, 3.0 * PI / 2.0);
        assert_eq!(m.color, Color::GREEN);

        // The unselected marker is untouched.
        assert_eq!(wheel.markers()[1].distance, 1.0);
    }

    #[test]
    fn morph_all_pairs_targets_in_arena_order() {
        let mut wheel = wheel_with(&[MarkerSpec::new(1.0, 0.0), MarkerSpec::new(1.0, 1.0)]);
        let morphs = wheel
            .morph_markers(&[MarkerSpec::new(3.0, 0.5), MarkerSpec::new(4.0, 1.5)], None)
            .unwrap();

        assert_eq!(morphs.len(), 2);
        assert_eq!(wheel.markers()[0].distance, 3.0);
        assert_eq!(wheel.markers()[1].distance, 4.0);
        assert!((morphs[0].arc_angle - 0.5).abs() < 1e-6);
        assert!((morphs[1].arc_angle - 0.5).abs() < 1e-6);
    }

    #[test]
    fn morph_length_mismatch_is_rejected_without_changes() {
        let mut wheel = wheel_with(&[MarkerSpec::new(1.0, 0.0), MarkerSpec::new(1.0, 1.0)]);
        let before = wheel.markers().to_vec();

        let err = wheel
            .morph_markers(&[MarkerSpec::new(5.0, 2.0)], None)
            .unwrap_err();
        assert_eq!(err, WheelError::LengthMismatch { expected: 2, got: 1 });
        assert_eq!(wheel.markers(), before.as_slice());
    }

    #[test]
    fn morph_with_bad_indices_is_rejected_without_changes() {
        let mut wheel = wheel_with(&[MarkerSpec::new(1.0, 0.0), MarkerSpec::new(1.0, 1.0)]);
        let before = wheel.markers().to_vec();
        let targets = [MarkerSpec::new(5.0, 2.0), MarkerSpec::new(6.0, 2.0)];

        assert_eq!(
            wheel.morph_markers(&targets, Some(&[0, 7])).unwrap_err(),
            WheelError::IndexOutOfRange { index: 7, len: 2 }
        );
        assert_eq!(
            wheel.morph_markers(&targets, Some(&[1, 1])).unwrap_err(),
            WheelError::DuplicateIndex(1)
        );
        assert_eq!(wheel.markers(), before.as_slice());
    }

    #[test]
    fn morph_with_empty_selection_is_a_no_op() {
        let mut wheel = wheel_with(&[MarkerSpec::new(1.0, 0.0)]);
        let morphs = wheel.morph_markers(&[], Some(&[])).unwrap();
        assert!(morphs.is_empty());
    }

    #[test]
    fn morph_after_removing_everything_reports_no_markers() {
        let mut wheel = wheel_with(&[MarkerSpec::new(1.0, 0.0), MarkerSpec::new(1.0, 1.0)]);
        let removed = wheel.remove_markers(None).unwrap();
        assert_eq!(removed.len(), 2);

        let err = wheel.morph_markers(&[], None).unwrap_err();
        assert_eq!(err, WheelError::NoMarkers);
    }

    #[test]
    fn remove_selected_markers_returns_them_in_selection_order() {
        let mut wheel = wheel_with(&[
            MarkerSpec::new(1.0, 0.0),
            MarkerSpec::new(2.0, 0.0),
            MarkerSpec::new(3.0, 0.0),
        ]);

        let removed = wheel.remove_markers(Some(&[2, 0])).unwrap();
        let distances: Vec<f32> = removed.iter().map(|m| m.distance).collect();
        assert_eq!(distances, vec![3.0, 1.0]);

        assert_eq!(wheel.markers().len(), 1);
        assert_eq!(wheel.markers()[0].distance, 2.0);
    }

    #[test]
    fn remove_on_empty_wheel_returns_nothing() {
        let mut wheel = Wheel::new(1.0, Vec2::ZERO).unwrap();
        assert!(wheel.remove_markers(None).unwrap().is_empty());
        assert!(wheel.remove_markers(Some(&[])).unwrap().is_empty());
    }

    #[test]
    fn remove_out_of_range_keeps_arena_intact() {
        let mut wheel = wheel_with(&[MarkerSpec::new(1.0, 0.0)]);
        assert!(wheel.remove_markers(Some(&[0, 1])).is_err());
        assert_eq!(wheel.markers().len(), 1);
    }

    #[test]
    fn connectors_skip_hidden_markers() {
        let wheel = wheel_with(&[
            MarkerSpec::new(1.0, 0.0),
            MarkerSpec::new(1.0, PI).without_connector(),
            MarkerSpec::new(2.0, 0.0).with_connector(Connector::Colored(Color::WHITE)),
        ]);

        let segs: Vec<ConnectorSegment> = wheel.connectors().collect();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].start, wheel.center());
        assert_eq!(segs[0].color, Color::BLUE.average(Color::RED));
        assert_eq!(segs[1].marker, 2);
        assert_eq!(segs[1].color, Color::WHITE);
        assert!((segs[1].end - Vec2::new(2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn move_to_offsets_center_by_radius() {
        let mut wheel = Wheel::new(2.0, Vec2::new(9.0, 9.0)).unwrap();
        wheel.move_to(Vec2::new(1.0, 0.0), Vec2::Y);
        assert_eq!(wheel.center(), Vec2::new(1.0, 2.0));

        wheel.move_to(Vec2::new(-3.0, 4.0), Vec2::ZERO);
        assert_eq!(wheel.center(), Vec2::new(-3.0, 4.0));
    }

    #[test]
    fn trace_paths_follow_selected_markers() {
        let wheel = wheel_with(&[
            MarkerSpec::new(1.0, 0.0),
            MarkerSpec::new(2.0, 0.0).with_color(Color::GREEN),
        ]);

        let traces = wheel.trace_paths(Some(&[1])).unwrap();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].marker_id(), 1);
        assert_eq!(traces[0].color(), Color::GREEN);

        assert_eq!(wheel.trace_paths(None).unwrap().len(), 2);
        assert!(wheel.trace_paths(Some(&[5])).is_err());
    }

    #[test]
    fn clone_is_idle_with_same_pose() {
        let mut wheel = wheel_with(&[MarkerSpec::new(1.0, 0.5)]);
        wheel.shift(Vec2::new(2.0, 0.0));
        wheel.begin_roll();

        let copy = wheel.clone();
        assert_ne!(copy.id(), wheel.id());
        assert_eq!(copy.center(), wheel.center());
        assert_eq!(copy.markers(), wheel.markers());
        assert_eq!(copy.roll_state(), RollState::Idle);
        assert!(wheel.is_rolling());
    }

    #[test]
    fn roll_start_reduces_marker_angles() {
        let mut wheel = wheel_with(&[
            MarkerSpec::new(1.0, 5.0 * PI / 2.0),
            MarkerSpec::new(1.0, -FRAC_PI_2),
        ]);
        let before: Vec<Vec2> = wheel.marker_positions().collect();

        wheel.begin_roll();

        let m = wheel.markers();
        assert!((m[0].angle - FRAC_PI_2).abs() < 1e-5);
        assert!((m[1].angle - 3.0 * FRAC_PI_2).abs() < 1e-5);
        assert!(m.iter().all(|m| m.angle == m.base_angle));
        for (p, q) in before.iter().zip(wheel.marker_positions()) {
            assert!((*p - q).length() < 1e-5);
        }
    }

    #[test]
    fn cancel_roll_on_idle_wheel_reports_false() {
        let mut wheel = Wheel::new(1.0, Vec2::ZERO).unwrap();
        assert!(!wheel.cancel_roll());
        assert_eq!(wheel.roll_state(), RollState::Idle);
    }
}
