//! Actors: the hero and the enemies chasing it
//!
//! Both share the same body (`Actor`): a position whose y is cosmetic hover
//! height, a heading, a uniform scale and a footing lifecycle.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::heading_vector;
use crate::tuning::{Spawn, Tuning};

/// Hero body colour
pub const HERO_COLOR: Vec3 = Vec3::new(0.0, 0.5451, 0.5451);
/// Enemy head colour
pub const ENEMY_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);
/// Enemy head colour after winning an enemy-vs-enemy contact
pub const CHAMPION_COLOR: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Direction of a single step along the heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stride {
    Forward,
    Backward,
}

impl Stride {
    /// The step that undoes this one
    pub fn reverse(self) -> Self {
        match self {
            Stride::Forward => Stride::Backward,
            Stride::Backward => Stride::Forward,
        }
    }
}

/// Where an actor stands relative to the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Footing {
    /// On the floor
    #[default]
    Active,
    /// Left the play area and sinking every frame
    Falling,
    /// The hero sank below the kill depth; still drifting
    Removed,
}

/// Shared body of every mobile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec3,
    /// Radians, 0 faces +x, positive turns toward -z
    pub heading: f32,
    /// Uniform body scale
    pub scale: Vec3,
    /// Distance covered by one step
    pub speed: f32,
    /// Heading change per turn
    pub turn_rate: f32,
    /// Steps may never land on or beyond this |x| or |z|
    pub world_bound: f32,
    /// Idle hover amplitude
    pub hover_amplitude: f32,
    /// Idle hover phase (degrees)
    hover_phase: f32,
    footing: Footing,
}

impl Actor {
    pub fn new(spawn: Spawn, speed: f32, tuning: &Tuning) -> Self {
        Self {
            pos: spawn.position,
            heading: spawn.heading,
            scale: Vec3::splat(tuning.body_scale),
            speed,
            turn_rate: tuning.turn_rate,
            world_bound: tuning.world_bound,
            hover_amplitude: tuning.hover_amplitude,
            hover_phase: 0.0,
            footing: Footing::Active,
        }
    }

    pub fn footing(&self) -> Footing {
        self.footing
    }

    /// True from the first falling frame onward, including once removed
    pub fn is_falling(&self) -> bool {
        self.footing != Footing::Active
    }

    /// Take one step along the heading.
    ///
    /// A step that would land on or beyond the world bound is dropped whole.
    pub fn step(&mut self, stride: Stride) {
        let delta = heading_vector(self.heading) * self.speed;
        let next = match stride {
            Stride::Forward => self.pos + delta,
            Stride::Backward => self.pos - delta,
        };
        let bound = self.world_bound;
        if next.x.abs() < bound && next.z.abs() < bound {
            self.pos = next;
        }
    }

    pub fn move_forward(&mut self) {
        self.step(Stride::Forward);
    }

    pub fn move_backward(&mut self) {
        self.step(Stride::Backward);
    }

    pub fn turn_left(&mut self) {
        self.heading += self.turn_rate;
    }

    pub fn turn_right(&mut self) {
        self.heading -= self.turn_rate;
    }

    pub fn set_position(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.heading = heading;
    }

    /// Advance the hover animation by one frame
    pub fn idle_bob(&mut self) {
        let hover = self.hover_amplitude * self.hover_phase.to_radians().sin();
        self.pos.y += hover * 0.1;
        self.hover_phase += 1.0;
    }

    /// Start falling if the ground position left the play square.
    ///
    /// Returns true only on the frame the fall begins.
    pub fn check_play_bounds(&mut self, play_bound: f32) -> bool {
        let outside = self.pos.x.abs() > play_bound || self.pos.z.abs() > play_bound;
        if outside && self.footing == Footing::Active {
            self.footing = Footing::Falling;
            return true;
        }
        false
    }

    /// Drop by `rate` if falling. There is no floor.
    pub fn sink(&mut self, rate: f32) {
        if self.is_falling() {
            self.pos.y -= rate;
        }
    }

    /// Mark a falling actor below `kill_depth` as removed.
    ///
    /// Returns true only on the frame of removal.
    pub fn check_kill_depth(&mut self, kill_depth: f32) -> bool {
        if self.footing == Footing::Falling && self.pos.y < kill_depth {
            self.footing = Footing::Removed;
            return true;
        }
        false
    }
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub body: Actor,
    pub color: Vec3,
}

impl Hero {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            body: Actor::new(tuning.hero_spawn, tuning.hero_speed, tuning),
            color: HERO_COLOR,
        }
    }

    /// Grow by `growth` after a win, then settle at the winner size and
    /// height if still smaller than `size`
    pub fn crown(&mut self, growth: f32, size: f32, height: f32) {
        self.body.scale *= growth;
        if self.body.scale.x < size {
            self.body.scale = Vec3::splat(size);
            self.body.pos.y = height;
        }
    }

    /// Shrink after being caught; returns the new x scale
    pub fn shrink(&mut self, factor: f32) -> f32 {
        self.body.scale *= factor;
        self.body.scale.x
    }
}

/// Enemy combat lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Vitality {
    #[default]
    Alive,
    /// Won a collision with the other enemy
    Champion,
    /// Hidden and frozen for the rest of the session
    Defeated,
}

/// A pursuing actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Actor,
    pub color: Vec3,
    vitality: Vitality,
}

impl Enemy {
    pub fn new(spawn: Spawn, tuning: &Tuning) -> Self {
        Self {
            body: Actor::new(spawn, tuning.enemy_speed, tuning),
            color: ENEMY_COLOR,
            vitality: Vitality::Alive,
        }
    }

    pub fn vitality(&self) -> Vitality {
        self.vitality
    }

    /// Defeated enemies are neither drawn nor moved
    pub fn is_defeated(&self) -> bool {
        self.vitality == Vitality::Defeated
    }

    /// Face the target and step toward it.
    ///
    /// When the target sits exactly on the enemy the heading is kept.
    pub fn chase(&mut self, target: Vec3) {
        if let Some(heading) = crate::heading_toward(self.body.pos, target) {
            self.body.set_heading(heading);
        }
        self.body.move_forward();
    }

    /// Grow and recolour after winning an enemy-vs-enemy contact.
    ///
    /// Returns true on the transition into `Champion`.
    pub fn crown(&mut self, size: f32, height: f32) -> bool {
        self.color = CHAMPION_COLOR;
        self.body.scale = Vec3::splat(size);
        self.body.pos.y = height;
        if self.vitality == Vitality::Alive {
            self.vitality = Vitality::Champion;
            return true;
        }
        false
    }

    /// Returns true on the transition into `Defeated`
    pub fn defeat(&mut self) -> bool {
        if self.vitality == Vitality::Defeated {
            return false;
        }
        self.vitality = Vitality::Defeated;
        true
    }
}
