//! Player physics and action handling
//!
//! Each step: dash cooldown ticks down, requested actions are applied, then
//! vertical motion is integrated (unless dashing) and clamped to the ground.

use glam::Vec2;

use super::particles::{Burst, spawn_burst};
use super::state::{GameState, Player, RunSettings};
use super::tick::TickInput;
use crate::audio::{CuePlayer, SoundCue};
use crate::consts::*;

/// Height lost while sliding
pub const SLIDE_DELTA: f32 = PLAYER_HEIGHT - SLIDE_HEIGHT;

/// Start a jump if standing on the ground. Returns true on take-off.
pub fn apply_jump(player: &mut Player, settings: &RunSettings) -> bool {
    if !player.grounded {
        return false;
    }
    player.vel_y = settings.jump_impulse;
    player.grounded = false;
    true
}

/// Enter or leave the slide pose, keeping the feet where they are
pub fn apply_slide(player: &mut Player, slide_held: bool) {
    if slide_held && !player.sliding {
        player.size.y = SLIDE_HEIGHT;
        player.pos.y += SLIDE_DELTA;
        player.sliding = true;
    } else if !slide_held && player.sliding {
        player.size.y = PLAYER_HEIGHT;
        player.pos.y -= SLIDE_DELTA;
        player.sliding = false;
    }
}

/// Start a dash if the cooldown has run out. Returns true when a dash starts.
pub fn apply_dash(player: &mut Player) -> bool {
    if player.dash_cooldown > 0 {
        return false;
    }
    player.dashing = true;
    player.dash_remaining = DASH_DURATION_STEPS;
    player.dash_cooldown = DASH_COOLDOWN_STEPS;
    // Level flight for the whole dash
    player.vel_y = 0.0;
    true
}

/// Gravity and position integration, or dash countdown while dashing
pub fn integrate_vertical(player: &mut Player, settings: &RunSettings) {
    if player.dashing {
        player.dash_remaining = player.dash_remaining.saturating_sub(1);
        if player.dash_remaining == 0 {
            player.dashing = false;
        }
        return;
    }
    player.vel_y += settings.gravity;
    player.pos.y += player.vel_y;
}

/// Keep the player on top of the ground line
pub fn clamp_to_ground(player: &mut Player) {
    let ground = player.ground_line();
    if player.pos.y >= ground {
        player.pos.y = ground;
        player.vel_y = 0.0;
        player.grounded = true;
    }
}

/// Advance the player by one step
pub fn integrate(state: &mut GameState, input: &TickInput, audio: &mut dyn CuePlayer) {
    let player = &mut state.player;
    player.dash_cooldown = player.dash_cooldown.saturating_sub(1);

    let jumped = input.jump && apply_jump(player, &state.settings);
    apply_slide(player, input.slide);
    let dashed = input.dash && apply_dash(player);

    integrate_vertical(player, &state.settings);
    clamp_to_ground(player);

    let feet = Vec2::new(player.center().x, player.pos.y + player.size.y);
    let center = player.center();

    if jumped {
        audio.play(SoundCue::Jump);
        spawn_burst(state, feet, Burst::jump());
    }
    if dashed {
        log::debug!("Dash at step {}", state.steps);
        audio.play(SoundCue::Dash);
        spawn_burst(state, center, Burst::dash());
    }
}
