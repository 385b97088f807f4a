//! Round state machine
//!
//! One call per host frame. Within a tick, input-derived events are handled
//! before time-derived ones, so a player shot always beats an opponent shot
//! scheduled for the same tick.

use glam::Vec2;

use super::collision::{HitKind, ShotPath, resolve_shot};
use super::combatant::Actor;
use super::policy::AimChoice;
use super::state::{DuelPhase, DuelState, GameEvent, RoundOutcome};
use super::weapon::FireOutcome;
use crate::audio::SoundEffect;
use crate::consts::{GUN_PUMP_LEAD_MS, SHELL_DROP_DELAY_MS};
use crate::persistence::RoundRecord;
use rand::Rng;

/// Commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a round (or a new match from the menu / game over screen)
    pub start_round: bool,
    /// Player pulls the trigger
    pub fire: bool,
    /// Where the player is aiming (world coordinates)
    pub aim: Option<Vec2>,
    /// Leave the result screen
    pub continue_round: bool,
    /// Abandon the round and return to the menu
    pub abort: bool,
}

/// Advance the duel to `now_ms`
pub fn tick(state: &mut DuelState, input: &TickInput, now_ms: u64) {
    if input.abort {
        abort(state);
        return;
    }

    // Input-derived events
    if input.start_round {
        handle_start(state, now_ms);
    }
    if input.fire {
        handle_player_fire(state, input.aim, now_ms);
    }
    if input.continue_round {
        handle_continue(state);
    }

    // Time-derived events
    poll_cues(state, now_ms);
    poll_draw_signal(state, now_ms);
    poll_opponent_shot(state, now_ms);
}

fn abort(state: &mut DuelState) {
    if state.phase == DuelPhase::Menu {
        return;
    }
    log::info!("Round {} abandoned, back to menu", state.matchup.round_number);
    state.timer.reset();
    state.schedule.clear();
    state.phase = DuelPhase::Menu;
}

fn handle_start(state: &mut DuelState, now_ms: u64) {
    match state.phase {
        DuelPhase::Menu | DuelPhase::GameOver => {
            state.reset_match();
            log::info!("New match: {} rounds", state.matchup.max_rounds);
        }
        DuelPhase::Waiting if state.can_start_round() => begin_round(state, now_ms),
        phase => log::debug!("Start command ignored in {:?}", phase),
    }
}

fn begin_round(state: &mut DuelState, now_ms: u64) {
    state.match_started_at.get_or_insert(now_ms);
    state.advance_round();
    state.timer.reset();
    state.player_reaction_ms = None;

    let delay = state
        .rng
        .random_range(state.settings.draw_delay_min_ms..=state.settings.draw_delay_max_ms);
    let draw_at = now_ms + delay;
    let reaction_ms = state.opponent.policy().map_or(0, |p| p.reaction_ms());

    state.schedule.clear();
    state.schedule.countdown_started_at = Some(now_ms);
    state.schedule.draw_at = Some(draw_at);
    state.schedule.opponent_shot_at = Some(draw_at + reaction_ms);
    state.schedule.gun_pump_at = (delay > GUN_PUMP_LEAD_MS).then(|| draw_at - GUN_PUMP_LEAD_MS);
    state.phase = DuelPhase::Countdown;

    log::info!(
        "Round {}/{} started: draw in {} ms, opponent difficulty {} reacts in {:.2}s",
        state.matchup.round_number,
        state.matchup.max_rounds,
        delay,
        state.opponent.policy().map_or(0, |p| p.difficulty),
        reaction_ms as f64 / 1000.0
    );
    state.push_event(GameEvent::Cue(SoundEffect::RoundStarted));
    state.push_event(GameEvent::Cue(SoundEffect::Reload));
}

fn handle_player_fire(state: &mut DuelState, aim: Option<Vec2>, now_ms: u64) {
    if state.phase != DuelPhase::Shooting || state.timer.is_stopped() {
        log::debug!("Fire command ignored in {:?}", state.phase);
        return;
    }
    if !state.player.controller.fires_now(true, None, now_ms) {
        return;
    }

    let bonus = state.player.accuracy_bonus();
    let outcome = state.player.weapon.fire(now_ms, bonus, &mut state.rng);
    if outcome == FireOutcome::NoEffect {
        log::debug!("Player trigger pull had no effect");
        return;
    }

    state.timer.stop(now_ms);
    let reaction_ms = state.timer.elapsed_ms();
    state.player_reaction_ms = Some(reaction_ms);
    state.reaction_history.push(reaction_ms);
    state.schedule.shell_drop_at = Some(now_ms + SHELL_DROP_DELAY_MS);

    let hit = if outcome == FireOutcome::OnTarget {
        let target = aim.unwrap_or_else(|| state.opponent.body.center());
        let path = ShotPath::extended(state.player.muzzle(), target);
        resolve_shot(&path, &state.opponent.head, &state.opponent.body)
    } else {
        HitKind::Miss
    };
    land_shot(state, Actor::Player, hit, reaction_ms, now_ms);
}

fn handle_continue(state: &mut DuelState) {
    if state.phase != DuelPhase::Result {
        log::debug!("Continue command ignored in {:?}", state.phase);
        return;
    }
    match state.check_termination() {
        Some(result) => state.finish_match(result),
        None => {
            state.player.weapon.reload();
            state.opponent.weapon.reload();
            state.phase = DuelPhase::Waiting;
        }
    }
}

fn poll_cues(state: &mut DuelState, now_ms: u64) {
    if let Some(at) = state.schedule.gun_pump_at {
        if state.phase == DuelPhase::Countdown && now_ms >= at {
            state.schedule.gun_pump_at = None;
            state.push_event(GameEvent::Cue(SoundEffect::GunPump));
        }
    }
    if let Some(at) = state.schedule.shell_drop_at {
        if now_ms >= at {
            state.schedule.shell_drop_at = None;
            state.push_event(GameEvent::Cue(SoundEffect::ShellDrop));
        }
    }
}

fn poll_draw_signal(state: &mut DuelState, now_ms: u64) {
    if state.phase != DuelPhase::Countdown {
        return;
    }
    let Some(draw_at) = state.schedule.draw_at else {
        return;
    };
    if now_ms >= draw_at {
        state.schedule.draw_at = None;
        state.schedule.gun_pump_at = None;
        state.timer.start(now_ms);
        state.phase = DuelPhase::Shooting;
        log::debug!("DRAW! (round {})", state.matchup.round_number);
        state.push_event(GameEvent::Cue(SoundEffect::DrawSignal));
    }
}

fn poll_opponent_shot(state: &mut DuelState, now_ms: u64) {
    if state.phase != DuelPhase::Shooting || state.timer.is_stopped() {
        return;
    }
    if !state
        .opponent
        .controller
        .fires_now(false, state.schedule.opponent_shot_at, now_ms)
    {
        return;
    }
    let Some(policy) = state.opponent.policy().copied() else {
        return;
    };

    let outcome = state
        .opponent
        .weapon
        .fire(now_ms, policy.accuracy_bonus, &mut state.rng);
    if outcome == FireOutcome::NoEffect {
        log::debug!("Opponent trigger pull had no effect");
        if state.opponent.weapon.remaining_ammo() == 0 {
            state.schedule.opponent_shot_at = None;
        }
        return;
    }

    state.timer.stop(now_ms);
    let reaction_ms = state.timer.elapsed_ms();

    let hit = if outcome == FireOutcome::OnTarget {
        match policy.choose_target(&mut state.rng) {
            AimChoice::Miss => HitKind::Miss,
            choice => {
                let muzzle = state.opponent.muzzle();
                let aim = policy.aim_point(
                    choice,
                    muzzle,
                    &state.player.head,
                    &state.player.body,
                    &mut state.rng,
                );
                let path = ShotPath::to_point(muzzle, aim);
                resolve_shot(&path, &state.player.head, &state.player.body)
            }
        }
    } else {
        HitKind::Miss
    };
    land_shot(state, Actor::Opponent, hit, reaction_ms, now_ms);
}

/// Apply a resolved shot and move to `Result`
pub(crate) fn land_shot(
    state: &mut DuelState,
    shooter: Actor,
    hit: HitKind,
    reaction_ms: u64,
    now_ms: u64,
) {
    let damage = state.combatant(shooter).weapon.damage_for(hit);
    let damage_applied = state.combatant_mut(shooter.foe()).take_damage(damage);
    if shooter == Actor::Player {
        state.matchup.score += damage as u64;
    }

    let outcome = RoundOutcome {
        round: state.matchup.round_number,
        actor: shooter,
        result: hit,
        damage_applied,
        reaction_ms,
        timestamp_ms: now_ms,
    };
    state.outcomes.push(outcome);
    state.schedule.draw_at = None;
    state.schedule.opponent_shot_at = None;
    state.phase = DuelPhase::Result;

    log::info!(
        "Round {}: {} {} after {} ms ({} damage)",
        outcome.round,
        shooter.as_str(),
        hit.as_str(),
        reaction_ms,
        damage_applied
    );

    let elapsed_ms = now_ms.saturating_sub(state.match_started_at.unwrap_or(now_ms));
    let record = RoundRecord {
        round_number: outcome.round,
        reaction_time_ms: reaction_ms,
        actor: shooter,
        result_kind: hit,
        opponent_difficulty: state.opponent.policy().map_or(0, |p| p.difficulty),
        cumulative_score: state.matchup.score,
        match_elapsed_seconds: crate::round_to(crate::ms_to_secs(elapsed_ms), 2),
    };

    state.push_event(GameEvent::Cue(SoundEffect::ShotFired));
    if hit.is_hit() {
        state.push_event(GameEvent::Cue(SoundEffect::HitConfirmed));
    }
    state.push_event(GameEvent::RoundResolved(record));
}
