//! Game state and frame-level rules
//!
//! Everything the update step reads or writes lives in `GameState`, so the
//! whole game can be driven and inspected without a graphics context.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::actor::{Enemy, Hero};
use super::collision::{ContactReport, check_contacts};
use super::tiles::TileGrid;
use super::walls::Walls;
use crate::tuning::Tuning;

/// Identifies an actor in events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorId {
    Hero,
    /// Index into `GameState::enemies`
    Enemy(usize),
}

/// Why the session asked to close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    /// Quit key held
    Quit,
    /// Hero fell below the kill depth
    HeroFell,
    /// Hero shrank below the minimum scale
    HeroShrunk,
}

/// Things that happened during a tick, for hosts that want more than flags
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TileVisited { index: usize },
    /// All tiles visited this frame
    Won,
    /// An enemy touched the hero; `scale` is the hero's scale afterwards
    HeroCaught { scale: f32 },
    EnemyCrowned { index: usize },
    EnemyDefeated { index: usize },
    StartedFalling { actor: ActorId },
    CloseRequested { reason: CloseReason },
}

/// Arcball camera parameters the simulation controls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Point the camera orbits and faces
    pub look_at: Vec3,
    /// Distance from the look-at point
    pub radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub zoom_step: f32,
    /// Look-at offset above the hero
    pub look_height: f32,
}

impl Camera {
    pub fn new(hero_pos: Vec3, tuning: &Tuning) -> Self {
        let mut camera = Self {
            look_at: Vec3::ZERO,
            radius: tuning
                .camera_radius
                .clamp(tuning.camera_min_radius, tuning.camera_max_radius),
            min_radius: tuning.camera_min_radius,
            max_radius: tuning.camera_max_radius,
            zoom_step: tuning.camera_zoom_step,
            look_height: tuning.camera_look_height,
        };
        camera.follow(hero_pos);
        camera
    }

    pub fn zoom_in(&mut self) {
        self.radius = (self.radius - self.zoom_step).max(self.min_radius);
    }

    pub fn zoom_out(&mut self) {
        self.radius = (self.radius + self.zoom_step).min(self.max_radius);
    }

    /// Aim at a point just above the hero
    pub fn follow(&mut self, hero_pos: Vec3) {
        self.look_at = hero_pos + Vec3::new(0.0, self.look_height, 0.0);
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub hero: Hero,
    /// Enemy 1 wins any enemy-vs-enemy contact
    pub enemies: [Enemy; 2],
    pub walls: Walls,
    pub tiles: TileGrid,
    pub camera: Camera,
    /// Visited tiles counted by the last win evaluation, 0 unless all were visited
    pub visited_tally: usize,
    /// The hero has completed the maze at least once
    pub won: bool,
    /// Frames in which an enemy touched the hero
    pub times_caught: u32,
    /// Frames simulated
    pub frame: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    close_requested: Option<CloseReason>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Build the scene: hero, both enemies, walls and tiles
    pub fn new(tuning: Tuning) -> Self {
        let hero = Hero::new(&tuning);
        let enemies = [
            Enemy::new(tuning.enemy_spawns[0], &tuning),
            Enemy::new(tuning.enemy_spawns[1], &tuning),
        ];
        let camera = Camera::new(hero.body.pos, &tuning);

        Self {
            hero,
            enemies,
            walls: Walls::new(),
            tiles: TileGrid::generate(),
            camera,
            visited_tally: 0,
            won: false,
            times_caught: 0,
            frame: 0,
            events: Vec::new(),
            close_requested: None,
            tuning,
        }
    }

    /// Signal polled by the host loop
    pub fn close_requested(&self) -> bool {
        self.close_requested.is_some()
    }

    /// The first reason a close was requested
    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_requested
    }

    /// Request close; later requests keep the first reason
    pub fn request_close(&mut self, reason: CloseReason) {
        if self.close_requested.is_none() {
            log::info!("Close requested on frame {}: {:?}", self.frame, reason);
            self.close_requested = Some(reason);
            self.events.push(GameEvent::CloseRequested { reason });
        }
    }

    /// Recolour tiles under the hero
    pub fn visit_tiles(&mut self) {
        for index in self.tiles.visit(self.hero.body.pos) {
            log::debug!("Tile {} visited on frame {}", index, self.frame);
            self.events.push(GameEvent::TileVisited { index });
        }
    }

    /// Recount visited tiles and apply the win transition when all are visited.
    ///
    /// The tally is rebuilt from tile colours every call, so once every tile is
    /// visited the transition fires again on each later evaluation. Growth is
    /// applied on the first winning frame only; later frames just hold the
    /// winner size and keep the enemies defeated.
    pub fn evaluate_win(&mut self) -> bool {
        self.visited_tally = self.tiles.visited_count();
        if self.visited_tally != self.tiles.len() {
            self.visited_tally = 0;
            return false;
        }

        let growth = if self.won {
            1.0
        } else {
            log::info!("All {} tiles visited on frame {}", self.tiles.len(), self.frame);
            self.tuning.winner_growth
        };
        self.won = true;
        self.hero
            .crown(growth, self.tuning.winner_size, self.tuning.winner_height);
        for index in 0..self.enemies.len() {
            self.defeat_enemy(index);
        }
        self.events.push(GameEvent::Won);
        true
    }

    /// Shrink the hero after a catch, closing once it is too small
    pub fn apply_loss(&mut self) {
        let scale = self.hero.shrink(self.tuning.lose_factor);
        self.times_caught += 1;
        self.events.push(GameEvent::HeroCaught { scale });
        if scale < self.tuning.min_hero_scale {
            self.request_close(CloseReason::HeroShrunk);
        }
    }

    /// Mark an enemy defeated
    pub fn defeat_enemy(&mut self, index: usize) {
        if self.enemies[index].defeat() {
            log::info!("Enemy {} defeated on frame {}", index + 1, self.frame);
            self.events.push(GameEvent::EnemyDefeated { index });
        }
    }

    /// Run enemy-vs-enemy then enemy-vs-hero contact checks
    pub fn resolve_contacts(&mut self) -> ContactReport {
        let report = check_contacts(
            [self.enemies[0].body.pos, self.enemies[1].body.pos],
            self.hero.body.pos,
            self.tuning.contact_half_extent,
        );

        if report.enemies_touching {
            if self.enemies[0].crown(self.tuning.champion_size, self.tuning.champion_height) {
                log::debug!("Enemy 1 crowned on frame {}", self.frame);
                self.events.push(GameEvent::EnemyCrowned { index: 0 });
            }
            self.defeat_enemy(1);
        }
        if report.hero_caught {
            self.apply_loss();
        }
        report
    }

    /// Mark actors that left the play area as falling
    pub fn check_fall(&mut self, actor: ActorId) {
        let bound = self.tuning.play_bound;
        let started = match actor {
            ActorId::Hero => self.hero.body.check_play_bounds(bound),
            ActorId::Enemy(index) => self.enemies[index].body.check_play_bounds(bound),
        };
        if started {
            log::debug!("{:?} started falling on frame {}", actor, self.frame);
            self.events.push(GameEvent::StartedFalling { actor });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::Vitality;

    #[test]
    fn test_new_scene() {
        let state = GameState::default();
        assert_eq!(state.tiles.len(), crate::consts::TILE_COUNT);
        assert_eq!(state.hero.body.pos, Vec3::new(-36.0, 2.2, -45.0));
        assert_eq!(state.enemies[0].body.pos, Vec3::new(45.0, 0.0, -45.0));
        assert_eq!(state.enemies[1].body.pos, Vec3::new(-45.0, 0.0, 45.0));
        assert!(!state.close_requested());
        assert!((state.camera.look_at - Vec3::new(-36.0, 4.2, -45.0)).length() < 1e-5);
    }

    #[test]
    fn test_win_after_visiting_every_tile() {
        let mut state = GameState::default();
        let centers: Vec<Vec3> = state.tiles.tiles().iter().map(|t| t.center).collect();

        let (last, rest) = centers.split_last().unwrap();
        for &center in rest {
            state.hero.body.set_position(center);
            state.visit_tiles();
            assert!(!state.evaluate_win());
            assert_eq!(state.visited_tally, 0);
        }
        assert!(!state.won);
        assert!(!state.enemies[0].is_defeated());

        state.hero.body.set_position(*last);
        state.visit_tiles();
        assert!(state.evaluate_win());
        assert_eq!(state.visited_tally, 36);
        assert_eq!(state.hero.body.scale, Vec3::splat(15.0));
        assert!(state.enemies.iter().all(|e| e.is_defeated()));

        // Tiles never un-visit, so the transition keeps firing
        state.events.clear();
        assert!(state.evaluate_win());
        assert_eq!(state.visited_tally, 36);
        assert!(state.events.contains(&GameEvent::Won));
    }

    #[test]
    fn test_win_snaps_shrunken_hero() {
        let mut state = GameState::default();
        state.hero.shrink(0.5);
        let centers: Vec<Vec3> = state.tiles.tiles().iter().map(|t| t.center).collect();
        for center in centers {
            state.hero.body.set_position(center);
            state.visit_tiles();
        }
        assert!(state.evaluate_win());
        assert_eq!(state.hero.body.scale, Vec3::splat(15.0));
        assert_eq!(state.hero.body.pos.y, 3.3);
    }

    #[test]
    fn test_win_grows_hero_above_winner_size() {
        let tuning = Tuning {
            body_scale: 20.0,
            ..Default::default()
        };
        let mut state = GameState::new(tuning);
        let centers: Vec<Vec3> = state.tiles.tiles().iter().map(|t| t.center).collect();
        for center in centers {
            state.hero.body.set_position(center);
            state.visit_tiles();
        }
        assert!(state.evaluate_win());
        assert!((state.hero.body.scale.x - 20.2).abs() < 1e-4);

        // Later winning frames do not keep compounding the growth
        assert!(state.evaluate_win());
        assert!((state.hero.body.scale.x - 20.2).abs() < 1e-4);
    }

    #[test]
    fn test_visit_twice_is_stable() {
        let mut state = GameState::default();
        state.hero.body.set_position(Vec3::new(27.0, 0.0, 27.0));
        state.visit_tiles();
        let first = state.tiles.visited_count();
        state.visit_tiles();
        assert_eq!(state.tiles.visited_count(), first);
        assert_eq!(first, 1);
    }

    #[test]
    fn test_enemy_one_always_wins() {
        let mut state = GameState::default();
        let spot = Vec3::new(9.0, 0.0, 9.0);
        state.enemies[0].body.set_position(spot);
        state.enemies[1].body.set_position(spot);

        let report = state.resolve_contacts();
        assert!(report.enemies_touching);
        assert_eq!(state.enemies[0].vitality(), Vitality::Champion);
        assert!(!state.enemies[0].is_defeated());
        assert!(state.enemies[1].is_defeated());
        assert_eq!(state.enemies[0].body.scale, Vec3::splat(20.0));
    }

    #[test]
    fn test_defeated_enemy_still_catches_hero() {
        let mut state = GameState::default();
        state.defeat_enemy(0);
        state.enemies[0].body.set_position(state.hero.body.pos);

        state.resolve_contacts();
        assert_eq!(state.times_caught, 1);
        assert!((state.hero.body.scale.x - 9.9).abs() < 1e-4);
    }

    #[test]
    fn test_repeated_catches_close_session() {
        let mut state = GameState::default();
        let mut frames = 0;
        while !state.close_requested() {
            state.apply_loss();
            frames += 1;
            assert!(frames < 1000);
        }
        assert!(state.hero.body.scale.x < 1.0);
        assert_eq!(state.close_reason(), Some(CloseReason::HeroShrunk));
        // 10 * 0.99^n < 1 first holds at n = 230
        assert_eq!(frames, 230);
    }

    #[test]
    fn test_first_close_reason_wins() {
        let mut state = GameState::default();
        state.request_close(CloseReason::HeroFell);
        state.request_close(CloseReason::Quit);
        assert_eq!(state.close_reason(), Some(CloseReason::HeroFell));
    }

    #[test]
    fn test_camera_zoom_is_clamped() {
        let mut state = GameState::default();
        for _ in 0..100 {
            state.camera.zoom_in();
        }
        assert_eq!(state.camera.radius, 5.0);
        for _ in 0..100 {
            state.camera.zoom_out();
        }
        assert_eq!(state.camera.radius, 15.0);
    }
}
