//! Click hit testing and edge wrap-around

use glam::Vec2;

use super::state::{OrbField, OrbId, OrbPhase};
use crate::settings::HitPolicy;
use crate::wrap_coord;

/// An orb taken by a click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbHit {
    pub id: OrbId,
    /// Click position (where the "+1" appears)
    pub at: Vec2,
}

/// Does a click at `point` land on an orb at `center` with `radius`?
#[inline]
pub fn point_hits_orb(point: Vec2, center: Vec2, radius: f32, padding: f32) -> bool {
    point.distance(center) < radius + padding
}

/// Wrap a position across all four edges of `bounds` using `margin`
#[inline]
pub fn wrap_position(pos: Vec2, bounds: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_coord(pos.x, bounds.x, margin),
        wrap_coord(pos.y, bounds.y, margin),
    )
}

/// Resolve a click against the field.
///
/// Idle orbs under the pointer switch to `Collecting` and are returned in pool
/// order. Collecting orbs are ignored. An empty result is a miss.
pub fn click(field: &mut OrbField, point: Vec2, policy: HitPolicy) -> Vec<OrbHit> {
    let padding = field.tuning.hit_padding;
    let mut hits = Vec::new();

    for orb in field.orbs.iter_mut() {
        if orb.is_collecting() || !point_hits_orb(point, orb.pos, orb.radius, padding) {
            continue;
        }
        orb.phase = OrbPhase::Collecting;
        hits.push(OrbHit { id: orb.id, at: point });

        if policy == HitPolicy::First {
            break;
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::OrbTuning;

    fn field_with(positions: &[(f32, f32)]) -> OrbField {
        let tuning = OrbTuning {
            count: positions.len(),
            ..OrbTuning::default()
        };
        let mut field = OrbField::new(3, 200.0, 200.0, tuning);
        for (orb, &(x, y)) in field.orbs.iter_mut().zip(positions) {
            orb.pos = Vec2::new(x, y);
            orb.radius = 10.0;
            orb.base_radius = 10.0;
        }
        field
    }

    #[test]
    fn test_point_hits_orb_padding() {
        let c = Vec2::new(50.0, 50.0);
        assert!(point_hits_orb(Vec2::new(69.0, 50.0), c, 10.0, 10.0));
        assert!(!point_hits_orb(Vec2::new(70.0, 50.0), c, 10.0, 10.0));
    }

    #[test]
    fn test_miss_is_noop() {
        let mut field = field_with(&[(20.0, 20.0)]);
        let hits = click(&mut field, Vec2::new(150.0, 150.0), HitPolicy::All);
        assert!(hits.is_empty());
        assert_eq!(field.orbs[0].phase, OrbPhase::Idle);
    }

    #[test]
    fn test_overlapping_orbs_all_credited() {
        let mut field = field_with(&[(100.0, 100.0), (105.0, 100.0), (180.0, 20.0)]);
        let hits = click(&mut field, Vec2::new(102.0, 100.0), HitPolicy::All);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, field.orbs[0].id);
        assert_eq!(hits[1].id, field.orbs[1].id);
        assert!(field.orbs[0].is_collecting());
        assert!(field.orbs[1].is_collecting());
        assert!(!field.orbs[2].is_collecting());
    }

    #[test]
    fn test_first_policy_takes_one() {
        let mut field = field_with(&[(100.0, 100.0), (105.0, 100.0)]);
        let hits = click(&mut field, Vec2::new(102.0, 100.0), HitPolicy::First);
        assert_eq!(hits.len(), 1);
        assert!(field.orbs[0].is_collecting());
        assert!(!field.orbs[1].is_collecting());
    }

    #[test]
    fn test_collecting_orb_ignores_clicks() {
        let mut field = field_with(&[(100.0, 100.0)]);
        assert_eq!(click(&mut field, Vec2::new(100.0, 100.0), HitPolicy::All).len(), 1);
        assert!(click(&mut field, Vec2::new(100.0, 100.0), HitPolicy::All).is_empty());
    }

    #[test]
    fn test_wrap_position_all_edges() {
        let b = Vec2::new(200.0, 200.0);
        assert_eq!(wrap_position(Vec2::new(-12.0, 100.0), b, 10.0).x, 208.0);
        assert_eq!(wrap_position(Vec2::new(100.0, 212.0), b, 10.0).y, -8.0);
    }
}
