//! Hero Maze - a chase game on a ringed maze
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, wall collision, tiles, win/lose)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::{Vec2, Vec3};

/// Fixed maze geometry
pub mod consts {
    /// Distance of the outer wall ring centres from the origin
    pub const OUTER_RING_OFFSET: f32 = 36.0;
    /// Outer wall half extents (thin axis, long axis)
    pub const OUTER_WALL_HALF_THIN: f32 = 1.5;
    pub const OUTER_WALL_HALF_LONG: f32 = 31.5;
    /// Inner ring centres sit at this fraction of the outer ones
    pub const INNER_RING_FACTOR: f32 = 0.5;
    /// Inner wall half extents (thin axis, long axis)
    pub const INNER_WALL_HALF_THIN: f32 = 1.5;
    pub const INNER_WALL_HALF_LONG: f32 = 13.5;

    /// Grid indices run over [-GRID_HALF_SPAN, GRID_HALF_SPAN]; only odd/odd cells get a tile
    pub const GRID_HALF_SPAN: i32 = 5;
    /// World distance between adjacent grid indices
    pub const TILE_SPACING: f32 = 9.0;
    /// Half of a tile's square footprint
    pub const TILE_HALF_EXTENT: f32 = TILE_SPACING / 2.0;
    /// Tiles produced by the grid above (6 x 6)
    pub const TILE_COUNT: usize = 36;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit step on the ground plane for a heading.
///
/// Heading 0 faces +x; positive headings turn toward -z.
#[inline]
pub fn heading_vector(heading: f32) -> Vec3 {
    Vec3::new(heading.cos(), 0.0, -heading.sin())
}

/// Heading that faces from `from` toward `to` on the ground plane.
///
/// Returns `None` when the two points coincide on x/z.
#[inline]
pub fn heading_toward(from: Vec3, to: Vec3) -> Option<f32> {
    let dir = (ground(to) - ground(from)).normalize_or_zero();
    if dir == Vec2::ZERO {
        return None;
    }
    Some((-dir.y).atan2(dir.x))
}

/// Project a world position onto the gameplay (x, z) plane
#[inline]
pub fn ground(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_toward_axes() {
        let h = heading_toward(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)).unwrap();
        assert!(h.abs() < 1e-6);

        let h = heading_toward(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)).unwrap();
        assert!((h + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_heading_toward_ignores_height() {
        let h = heading_toward(Vec3::new(0.0, 3.0, 0.0), Vec3::new(-4.0, -1.0, 0.0)).unwrap();
        assert!((h.abs() - PI).abs() < 1e-6);
        assert!(heading_toward(Vec3::new(2.0, 0.0, 2.0), Vec3::new(2.0, 5.0, 2.0)).is_none());
    }

    #[test]
    fn test_heading_vector_round_trip() {
        for heading in [0.0, 0.4, FRAC_PI_2, 2.5, -1.2] {
            let step = heading_vector(heading);
            let back = heading_toward(Vec3::ZERO, step).unwrap();
            assert!((normalize_angle(back - heading)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_normalize_angle() {
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(-0.5) + 0.5).abs() < 1e-6);
    }
}
