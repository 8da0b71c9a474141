//! Floor tiles the hero must visit
//!
//! Tiles sit on a 9-unit grid filtered to odd/odd indices. Visiting a tile
//! recolours it permanently.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::ground;

/// Tile colour before the hero steps on it
pub const UNVISITED_COLOR: Vec3 = Vec3::new(0.4, 0.4, 0.4);
/// Tile colour once visited
pub const VISITED_COLOR: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Visit state of a tile, rendered as its colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileShade {
    #[default]
    Unvisited,
    Visited,
}

impl TileShade {
    pub fn color(self) -> Vec3 {
        match self {
            TileShade::Unvisited => UNVISITED_COLOR,
            TileShade::Visited => VISITED_COLOR,
        }
    }
}

/// A single floor tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// Centre on the floor (y = 0)
    pub center: Vec3,
    pub shade: TileShade,
}

impl Tile {
    pub fn new(center: Vec3) -> Self {
        Self {
            center,
            shade: TileShade::Unvisited,
        }
    }

    /// Strict test against the tile's square footprint
    #[inline]
    pub fn covers(&self, pos: Vec3) -> bool {
        let d = (ground(pos) - ground(self.center)).abs();
        d.x < TILE_HALF_EXTENT && d.y < TILE_HALF_EXTENT
    }

    pub fn is_visited(&self) -> bool {
        self.shade == TileShade::Visited
    }

    pub fn color(&self) -> Vec3 {
        self.shade.color()
    }
}

/// All floor tiles, generated once per session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    tiles: Vec<Tile>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::generate()
    }
}

impl TileGrid {
    /// Lay out tiles on every odd/odd grid index
    pub fn generate() -> Self {
        let span = -GRID_HALF_SPAN..=GRID_HALF_SPAN;
        let tiles: Vec<Tile> = span
            .clone()
            .flat_map(|i| span.clone().map(move |j| (i, j)))
            .filter(|(i, j)| i % 2 != 0 && j % 2 != 0)
            .map(|(i, j)| Tile::new(Vec3::new(i as f32 * TILE_SPACING, 0.0, j as f32 * TILE_SPACING)))
            .collect();

        log::debug!("Generated {} floor tiles", tiles.len());
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Recolour every tile under `pos`; returns indices that changed this call
    pub fn visit(&mut self, pos: Vec3) -> Vec<usize> {
        let mut newly = Vec::new();
        for (index, tile) in self.tiles.iter_mut().enumerate() {
            if tile.covers(pos) && !tile.is_visited() {
                tile.shade = TileShade::Visited;
                newly.push(index);
            }
        }
        newly
    }

    /// Count tiles currently shown as visited
    pub fn visited_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_visited()).count()
    }

    /// Index of the nearest unvisited tile to `pos`
    pub fn nearest_unvisited(&self, pos: Vec3) -> Option<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_visited())
            .min_by(|(_, a), (_, b)| {
                let da = ground(a.center).distance_squared(ground(pos));
                let db = ground(b.center).distance_squared(ground(pos));
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(index, _)| index)
    }
}
