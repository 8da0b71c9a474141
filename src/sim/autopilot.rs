//! Demo driver that plays the hero
//!
//! Produces the same held-key input a player would: steer toward the nearest
//! unvisited tile, detouring along the maze diagonals (where the wall rings
//! leave their corners open) when a wall is in the way.

use glam::{Vec2, Vec3};

use super::actor::Footing;
use super::state::GameState;
use super::tick::FrameInput;
use super::walls::KeepOutZone;
use crate::consts::{INNER_RING_FACTOR, OUTER_RING_OFFSET};
use crate::{ground, heading_toward, normalize_angle};

/// Extra distance kept from walls when planning a straight run
const WALL_CLEARANCE: f32 = 1.0;
/// Spacing of the samples taken along a planned run
const SAMPLE_SPACING: f32 = 0.5;
/// A waypoint closer than this counts as reached and is not picked again
const WAYPOINT_REACHED: f32 = 2.0;
/// Only walk while roughly facing the aim point
const WALK_CONE: f32 = std::f32::consts::FRAC_PI_4;
/// Penalty for a waypoint whose onward run is still blocked
const BLOCKED_ONWARD_COST: f32 = 100.0;

/// Points on the four diagonals: outside the outer ring, in both ring
/// openings, and midway between the rings
fn corner_waypoints() -> Vec<Vec2> {
    let outer = OUTER_RING_OFFSET;
    let inner = OUTER_RING_OFFSET * INNER_RING_FACTOR;
    let offsets = [outer * 1.25, outer, (outer + inner) * 0.5, inner];
    let signs = [Vec2::new(1.0, 1.0), Vec2::new(-1.0, 1.0), Vec2::new(1.0, -1.0), Vec2::new(-1.0, -1.0)];

    offsets
        .iter()
        .flat_map(|&d| signs.iter().map(move |&s| s * d))
        .collect()
}

fn near_zone(p: Vec2, zone: &KeepOutZone) -> bool {
    let d = (p - zone.center).abs();
    let reach = zone.half_extents + Vec2::splat(WALL_CLEARANCE);
    d.x < reach.x && d.y < reach.y
}

/// Whether a straight run from `from` to `to` keeps clear of every zone
pub fn run_is_clear(from: Vec2, to: Vec2, zones: &[KeepOutZone]) -> bool {
    let samples = ((to - from).length() / SAMPLE_SPACING).ceil().max(1.0) as usize;
    (0..=samples).all(|s| {
        let p = from.lerp(to, s as f32 / samples as f32);
        !zones.iter().any(|zone| near_zone(p, zone))
    })
}

/// Steers the hero through the maze
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Tile index currently targeted
    target: Option<usize>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile index the last input steered toward
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// Decide this frame's held keys
    pub fn next_input(&mut self, state: &GameState) -> FrameInput {
        let hero = &state.hero.body;
        if hero.footing() != Footing::Active {
            return FrameInput::default();
        }

        let target = state.tiles.nearest_unvisited(hero.pos);
        if target != self.target {
            if let Some(index) = target {
                log::debug!("Autopilot heading for tile {}", index);
            }
            self.target = target;
        }
        let Some(index) = target else {
            return FrameInput::default();
        };

        let goal = ground(state.tiles.tiles()[index].center);
        let aim = self.aim_point(ground(hero.pos), goal, &state.walls.keep_out_zones());
        let Some(desired) = heading_toward(hero.pos, Vec3::new(aim.x, 0.0, aim.y)) else {
            return FrameInput::default();
        };

        let diff = normalize_angle(desired - hero.heading);
        let turning = diff.abs() > hero.turn_rate * 0.5;
        FrameInput {
            forward: diff.abs() < WALK_CONE,
            turn_left: turning && diff > 0.0,
            turn_right: turning && diff < 0.0,
            ..Default::default()
        }
    }

    /// Walk straight at the goal when possible, otherwise via the best waypoint
    fn aim_point(&self, from: Vec2, goal: Vec2, zones: &[KeepOutZone]) -> Vec2 {
        if run_is_clear(from, goal, zones) {
            return goal;
        }

        let cost = |via: Vec2| {
            let onward = if run_is_clear(via, goal, zones) {
                0.0
            } else {
                BLOCKED_ONWARD_COST
            };
            from.distance(via) + via.distance(goal) + onward
        };
        let by_cost = |a: &Vec2, b: &Vec2| {
            cost(*a)
                .partial_cmp(&cost(*b))
                .unwrap_or(std::cmp::Ordering::Equal)
        };

        let candidates: Vec<Vec2> = corner_waypoints()
            .into_iter()
            .filter(|&via| from.distance(via) > WAYPOINT_REACHED)
            .collect();

        candidates
            .iter()
            .copied()
            .filter(|&via| run_is_clear(from, via, zones))
            .min_by(by_cost)
            .or_else(|| {
                candidates.iter().copied().min_by(|a, b| {
                    from.distance(*a)
                        .partial_cmp(&from.distance(*b))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
            })
            .unwrap_or(goal)
    }
}
