//! Per-frame update
//!
//! One call to [`tick`] is one frame of the classic loop: falling drift, hero
//! input, tiles and win check, enemy pursuit, contacts, then the camera.

use serde::{Deserialize, Serialize};

use super::actor::Stride;
use super::collision::resolve_wall_contacts;
use super::state::{ActorId, CloseReason, GameState};

/// Keys held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub quit: bool,
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &FrameInput) {
    state.events.clear();
    if state.close_requested() {
        return;
    }

    let tuning = state.tuning.clone();

    // Actors off the edge keep sinking; defeated enemies are frozen
    state.hero.body.sink(tuning.fall_rate);
    for enemy in state.enemies.iter_mut().filter(|e| !e.is_defeated()) {
        enemy.body.sink(tuning.fall_rate);
    }

    if input.quit {
        state.request_close(CloseReason::Quit);
    }

    let zones = state.walls.keep_out_zones();
    for (held, stride) in [(input.forward, Stride::Forward), (input.backward, Stride::Backward)] {
        if held {
            state.hero.body.step(stride);
            resolve_wall_contacts(&mut state.hero.body, stride, &zones);
            state.check_fall(ActorId::Hero);
        }
    }

    if input.turn_right {
        state.hero.body.turn_right();
    }
    if input.turn_left {
        state.hero.body.turn_left();
    }

    if input.zoom_in {
        state.camera.zoom_in();
    }
    if input.zoom_out {
        state.camera.zoom_out();
    }

    state.hero.body.idle_bob();
    state.visit_tiles();
    state.evaluate_win();

    for enemy in state.enemies.iter_mut().filter(|e| !e.is_defeated()) {
        enemy.body.idle_bob();
    }

    if state.hero.body.check_kill_depth(tuning.kill_depth) {
        state.request_close(CloseReason::HeroFell);
    }

    let target = state.hero.body.pos;
    for enemy in state.enemies.iter_mut().filter(|e| !e.is_defeated()) {
        enemy.chase(target);
        resolve_wall_contacts(&mut enemy.body, Stride::Forward, &zones);
    }

    state.resolve_contacts();

    for index in 0..state.enemies.len() {
        state.check_fall(ActorId::Enemy(index));
    }

    state.camera.follow(state.hero.body.pos);
    state.frame += 1;
}
