//! Maze walls: two nested square rings of four segments each
//!
//! Only the outer ring centres are stored; the inner ring sits at half those
//! coordinates with shorter segments. Walls never change after construction.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ground;

/// Axis-aligned rectangle around a wall segment that actors may not enter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeepOutZone {
    /// Centre on the ground plane (x, z)
    pub center: Vec2,
    /// Half extents along (x, z)
    pub half_extents: Vec2,
}

impl KeepOutZone {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Strict containment: a point on the edge is outside
    #[inline]
    pub fn contains(&self, pos: Vec3) -> bool {
        let d = (ground(pos) - self.center).abs();
        d.x < self.half_extents.x && d.y < self.half_extents.y
    }
}

/// The maze wall rings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Walls {
    north: Vec3,
    east: Vec3,
    south: Vec3,
    west: Vec3,
}

impl Default for Walls {
    fn default() -> Self {
        Self::new()
    }
}

impl Walls {
    pub fn new() -> Self {
        Self {
            north: Vec3::new(OUTER_RING_OFFSET, 0.0, 0.0),
            east: Vec3::new(0.0, 0.0, OUTER_RING_OFFSET),
            south: Vec3::new(-OUTER_RING_OFFSET, 0.0, 0.0),
            west: Vec3::new(0.0, 0.0, -OUTER_RING_OFFSET),
        }
    }

    pub fn north(&self) -> Vec3 {
        self.north
    }

    pub fn east(&self) -> Vec3 {
        self.east
    }

    pub fn south(&self) -> Vec3 {
        self.south
    }

    pub fn west(&self) -> Vec3 {
        self.west
    }

    /// The four outer wall centres in north, east, south, west order
    pub fn outer_centers(&self) -> [Vec3; 4] {
        [self.north, self.east, self.south, self.west]
    }

    /// All eight keep-out zones: the outer ring first, then the inner ring
    pub fn keep_out_zones(&self) -> [KeepOutZone; 8] {
        let outer_ns = Vec2::new(OUTER_WALL_HALF_THIN, OUTER_WALL_HALF_LONG);
        let outer_ew = Vec2::new(OUTER_WALL_HALF_LONG, OUTER_WALL_HALF_THIN);
        let inner_ns = Vec2::new(INNER_WALL_HALF_THIN, INNER_WALL_HALF_LONG);
        let inner_ew = Vec2::new(INNER_WALL_HALF_LONG, INNER_WALL_HALF_THIN);
        let inner = |c: Vec3| ground(c) * INNER_RING_FACTOR;

        [
            KeepOutZone::new(ground(self.north), outer_ns),
            KeepOutZone::new(ground(self.east), outer_ew),
            KeepOutZone::new(ground(self.south), outer_ns),
            KeepOutZone::new(ground(self.west), outer_ew),
            KeepOutZone::new(inner(self.north), inner_ns),
            KeepOutZone::new(inner(self.east), inner_ew),
            KeepOutZone::new(inner(self.south), inner_ns),
            KeepOutZone::new(inner(self.west), inner_ew),
        ]
    }

    /// Whether a ground position lies inside any keep-out zone
    pub fn blocks(&self, pos: Vec3) -> bool {
        self.keep_out_zones().iter().any(|zone| zone.contains(pos))
    }
}
