//! Data-driven game balance
//!
//! Every value has a default reproducing the classic game, so a tuning file
//! only needs the fields it changes.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::walls::Walls;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    /// The file could not be read
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// The contents are not valid tuning JSON
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Where and how an actor enters the maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub position: Vec3,
    /// Radians, 0 faces +x
    pub heading: f32,
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    /// Hero distance per step
    pub hero_speed: f32,
    /// Enemy distance per step
    pub enemy_speed: f32,
    /// Heading change per turn input (radians)
    pub turn_rate: f32,
    /// Steps landing on or beyond this |x| or |z| are rejected
    pub world_bound: f32,

    // === Falling ===
    /// Leaving |x| or |z| <= play_bound starts a fall
    pub play_bound: f32,
    /// Height lost per frame while falling
    pub fall_rate: f32,
    /// A falling hero below this height ends the session
    pub kill_depth: f32,

    // === Actors ===
    pub hero_spawn: Spawn,
    pub enemy_spawns: [Spawn; 2],
    /// Uniform body scale for both hero and enemies at spawn
    pub body_scale: f32,
    /// Idle hover amplitude
    pub hover_amplitude: f32,
    /// Half extent of each actor's contact footprint
    pub contact_half_extent: f32,

    // === Win / lose ===
    /// Multiplicative growth applied to the hero on the first winning frame
    pub winner_growth: f32,
    /// A winning hero smaller than this snaps up to it
    pub winner_size: f32,
    /// Hero height after winning
    pub winner_height: f32,
    /// Multiplicative shrink applied each frame an enemy touches the hero
    pub lose_factor: f32,
    /// Session ends when the hero scale drops below this
    pub min_hero_scale: f32,
    /// Enemy scale after winning an enemy-vs-enemy contact
    pub champion_size: f32,
    /// Enemy height after winning an enemy-vs-enemy contact
    pub champion_height: f32,

    // === Camera ===
    pub camera_radius: f32,
    pub camera_min_radius: f32,
    pub camera_max_radius: f32,
    /// Radius change per zoom input
    pub camera_zoom_step: f32,
    /// Look-at point sits this far above the hero
    pub camera_look_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        use std::f32::consts::{FRAC_PI_2, PI};

        Self {
            hero_speed: 0.1,
            enemy_speed: 0.05,
            turn_rate: PI / 64.0,
            world_bound: 214.0,

            play_bound: 55.0,
            fall_rate: 0.3,
            kill_depth: -50.0,

            hero_spawn: Spawn {
                position: Vec3::new(-36.0, 2.2, -45.0),
                heading: 0.0,
            },
            enemy_spawns: [
                Spawn {
                    position: Vec3::new(45.0, 0.0, -45.0),
                    heading: PI,
                },
                Spawn {
                    position: Vec3::new(-45.0, 0.0, 45.0),
                    heading: FRAC_PI_2,
                },
            ],
            body_scale: 10.0,
            hover_amplitude: 0.1,
            contact_half_extent: 1.0,

            winner_growth: 1.01,
            winner_size: 15.0,
            winner_height: 3.3,
            lose_factor: 0.99,
            min_hero_scale: 1.0,
            champion_size: 20.0,
            champion_height: 1.0,

            camera_radius: 10.0,
            camera_min_radius: 5.0,
            camera_max_radius: 15.0,
            camera_zoom_step: 0.2,
            camera_look_height: 2.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("hero_speed", self.hero_speed)?;
        positive("enemy_speed", self.enemy_speed)?;
        positive("turn_rate", self.turn_rate)?;
        positive("fall_rate", self.fall_rate)?;
        positive("play_bound", self.play_bound)?;
        positive("body_scale", self.body_scale)?;
        positive("contact_half_extent", self.contact_half_extent)?;
        positive("min_hero_scale", self.min_hero_scale)?;
        positive("winner_growth", self.winner_growth)?;
        positive("winner_size", self.winner_size)?;
        positive("champion_size", self.champion_size)?;
        positive("camera_zoom_step", self.camera_zoom_step)?;
        finite("hover_amplitude", self.hover_amplitude)?;
        finite("winner_height", self.winner_height)?;
        finite("champion_height", self.champion_height)?;
        finite("camera_look_height", self.camera_look_height)?;

        if !(self.world_bound > self.play_bound) {
            return Err(invalid("world_bound", "must exceed play_bound"));
        }
        if !(self.lose_factor > 0.0 && self.lose_factor < 1.0) {
            return Err(invalid("lose_factor", "must lie strictly between 0 and 1"));
        }
        if !(self.min_hero_scale < self.body_scale) {
            return Err(invalid("min_hero_scale", "must be below body_scale"));
        }
        if !self.kill_depth.is_finite() {
            return Err(invalid("kill_depth", "must be finite"));
        }
        if !(self.camera_min_radius <= self.camera_max_radius) {
            return Err(invalid("camera_min_radius", "must not exceed camera_max_radius"));
        }

        self.check_spawn("hero_spawn", &self.hero_spawn)?;
        for spawn in &self.enemy_spawns {
            self.check_spawn("enemy_spawns", spawn)?;
        }
        Ok(())
    }

    /// A spawn must start on the floor and clear of every wall
    fn check_spawn(&self, field: &'static str, spawn: &Spawn) -> Result<(), TuningError> {
        let pos = spawn.position;
        if !pos.is_finite() || !spawn.heading.is_finite() {
            return Err(invalid(field, "must be finite"));
        }
        if pos.x.abs() > self.play_bound || pos.z.abs() > self.play_bound {
            return Err(invalid(field, "must lie inside play_bound"));
        }
        if Walls::new().blocks(pos) {
            return Err(invalid(field, "must not start inside a wall"));
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive and finite"))
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}
