//! Collision detection and response against walls and between actors
//!
//! Wall response is deliberately simple: every keep-out zone containing the
//! actor undoes one step of the move that put it there. Zones are tested
//! against the position before any correction, so overlapping zones each
//! contribute a correction.

use glam::Vec3;

use super::actor::{Actor, Stride};
use super::walls::KeepOutZone;
use crate::ground;

/// Push an actor back out of the walls after a step.
///
/// `zones` is normally `Walls::keep_out_zones`, which derives all eight boxes
/// from the four outer wall centres. `stride` is the step the actor just took.
/// Returns how many zones fired.
pub fn resolve_wall_contacts(actor: &mut Actor, stride: Stride, zones: &[KeepOutZone]) -> usize {
    let landed = actor.pos;
    let hits = zones.iter().filter(|zone| zone.contains(landed)).count();
    for _ in 0..hits {
        actor.step(stride.reverse());
    }
    hits
}

/// Overlap test between two square footprints of the same half extent
#[inline]
pub fn footprints_overlap(a: Vec3, b: Vec3, half_extent: f32) -> bool {
    let d = (ground(a) - ground(b)).abs();
    let reach = half_extent * 2.0;
    d.x < reach && d.y < reach
}

/// Outcome of the per-frame contact checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactReport {
    /// The two enemies touched; the first wins
    pub enemies_touching: bool,
    /// At least one enemy touched the hero
    pub hero_caught: bool,
}

/// Test enemy-vs-enemy and enemy-vs-hero overlap.
///
/// Defeat is not considered here: a defeated enemy still has a footprint.
pub fn check_contacts(enemies: [Vec3; 2], hero: Vec3, half_extent: f32) -> ContactReport {
    ContactReport {
        enemies_touching: footprints_overlap(enemies[0], enemies[1], half_extent),
        hero_caught: enemies
            .iter()
            .any(|&enemy| footprints_overlap(enemy, hero, half_extent)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::walls::Walls;
    use crate::tuning::{Spawn, Tuning};
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn actor(x: f32, z: f32, heading: f32) -> Actor {
        let tuning = Tuning::default();
        let spawn = Spawn {
            position: Vec3::new(x, 0.0, z),
            heading,
        };
        Actor::new(spawn, tuning.hero_speed, &tuning)
    }

    #[test]
    fn test_forward_into_outer_wall_is_undone() {
        let zones = Walls::new().keep_out_zones();
        let mut hero = actor(34.45, 0.0, 0.0);
        hero.move_forward();
        assert!(zones[0].contains(hero.pos));

        let hits = resolve_wall_contacts(&mut hero, Stride::Forward, &zones);
        assert_eq!(hits, 1);
        assert!(!zones[0].contains(hero.pos));
        assert!(hero.pos.x < 34.5);
    }

    #[test]
    fn test_backward_into_inner_wall_is_undone() {
        let zones = Walls::new().keep_out_zones();
        // Facing +z, backing up toward the inner west wall at z = -18
        let mut hero = actor(0.0, -16.45, FRAC_PI_2 + PI);
        hero.move_backward();
        assert!(zones[7].contains(hero.pos));

        let hits = resolve_wall_contacts(&mut hero, Stride::Backward, &zones);
        assert_eq!(hits, 1);
        assert!(!zones[7].contains(hero.pos));
    }

    #[test]
    fn test_clear_position_is_untouched() {
        let zones = Walls::new().keep_out_zones();
        let mut hero = actor(-9.0, -27.0, 0.3);
        let before = hero.pos;
        assert_eq!(resolve_wall_contacts(&mut hero, Stride::Forward, &zones), 0);
        assert_eq!(hero.pos, before);
    }

    #[test]
    fn test_overlapping_zones_each_correct() {
        let zones = [
            KeepOutZone::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0)),
            KeepOutZone::new(Vec2::new(0.5, 0.0), Vec2::new(2.0, 2.0)),
        ];
        let mut a = actor(0.0, 0.0, 0.0);
        let hits = resolve_wall_contacts(&mut a, Stride::Forward, &zones);
        assert_eq!(hits, 2);
        assert!((a.pos.x + 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_contact_footprints() {
        assert!(footprints_overlap(Vec3::ZERO, Vec3::new(1.99, 5.0, -1.99), 1.0));
        assert!(!footprints_overlap(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), 1.0));
        assert!(!footprints_overlap(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0), 1.0));
    }

    #[test]
    fn test_check_contacts() {
        let report = check_contacts([Vec3::ZERO, Vec3::ZERO], Vec3::new(20.0, 0.0, 0.0), 1.0);
        assert!(report.enemies_touching);
        assert!(!report.hero_caught);

        let report = check_contacts(
            [Vec3::new(-30.0, 0.0, 0.0), Vec3::new(19.0, 0.0, 1.0)],
            Vec3::new(20.0, 0.0, 0.0),
            1.0,
        );
        assert!(!report.enemies_touching);
        assert!(report.hero_caught);
    }

    proptest! {
        #[test]
        fn prop_single_step_entry_is_reverted(
            index in 0usize..8,
            along in -0.9f32..0.9,
            neg in any::<bool>(),
            gap in 0.001f32..0.09,
        ) {
            let zones = Walls::new().keep_out_zones();
            let zone = zones[index];
            let sign = if neg { -1.0 } else { 1.0 };

            // Approach across the thin axis from just outside the zone
            let thin_on_x = zone.half_extents.x < zone.half_extents.y;
            let (start, heading) = if thin_on_x {
                let x = zone.center.x + sign * (zone.half_extents.x + gap);
                let z = zone.center.y + along * zone.half_extents.y;
                (Vec2::new(x, z), if neg { 0.0 } else { PI })
            } else {
                let x = zone.center.x + along * zone.half_extents.x;
                let z = zone.center.y + sign * (zone.half_extents.y + gap);
                (Vec2::new(x, z), if neg { -FRAC_PI_2 } else { FRAC_PI_2 })
            };

            let mut a = actor(start.x, start.y, heading);
            prop_assert!(!zone.contains(a.pos));
            a.move_forward();
            prop_assert!(zone.contains(a.pos));

            resolve_wall_contacts(&mut a, Stride::Forward, &zones);
            prop_assert!(!zone.contains(a.pos));
        }
    }
}
