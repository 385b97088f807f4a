//! HUD text
//!
//! Turns a `DuelSnapshot` into the lines a display shows. Layout and fonts are
//! the host's business; this only decides what is said.

use crate::sim::{Actor, DuelPhase, DuelSnapshot, HitKind, MatchResult, RoundOutcome};

/// "Player Hit", "Opponent Miss", ...
pub fn outcome_label(outcome: &RoundOutcome) -> String {
    let who = match outcome.actor {
        Actor::Player => "Player",
        Actor::Opponent => "Opponent",
    };
    let what = match outcome.result {
        HitKind::Head | HitKind::Body => "Hit",
        HitKind::Miss => "Miss",
    };
    format!("{who} {what}")
}

/// Seconds with up to three decimals, e.g. `0.245s`
pub fn format_reaction(ms: u64) -> String {
    format!("{}s", crate::round_to(crate::ms_to_secs(ms), 3))
}

/// Always-visible header
pub fn header_lines(snap: &DuelSnapshot) -> Vec<String> {
    vec![
        format!("Round: {}/{}", snap.round_number, snap.max_rounds),
        format!("Score: {}", snap.score),
        format!(
            "Health: {}/{}  Ammo: {}/{}",
            snap.player.health, snap.player.max_health, snap.player.ammo, snap.player.capacity
        ),
        format!(
            "Opponent Health: {}/{}  Ammo: {}/{}",
            snap.opponent.health, snap.opponent.max_health, snap.opponent.ammo, snap.opponent.capacity
        ),
    ]
}

/// Centre-screen prompt for the current phase
pub fn prompt_lines(snap: &DuelSnapshot) -> Vec<String> {
    match snap.phase {
        DuelPhase::Menu => vec!["Press SPACE to start a new match".to_string()],
        DuelPhase::Waiting => vec!["Press SPACE to start round".to_string()],
        DuelPhase::Countdown => {
            let n = snap.countdown_remaining_secs.unwrap_or(0);
            vec![format!("Get Ready... {n}")]
        }
        DuelPhase::Shooting => vec!["DRAW! SHOOT NOW!".to_string()],
        DuelPhase::Result => result_lines(snap),
        DuelPhase::GameOver => game_over_lines(snap),
    }
}

fn result_lines(snap: &DuelSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(outcome) = &snap.latest_outcome {
        lines.push(format!(
            "Round {} Result: {}",
            snap.round_number,
            outcome_label(outcome)
        ));
    }
    lines.push("Press SPACE to continue".to_string());
    if let Some(ms) = snap.player_reaction_ms {
        lines.push(format!("Your reaction time: {}", format_reaction(ms)));
    }
    if let Some(secs) = snap.opponent.reaction_secs {
        lines.push(format!("Opponent's reaction time: {secs}s"));
    }
    lines
}

fn game_over_lines(snap: &DuelSnapshot) -> Vec<String> {
    let headline = match snap.match_result {
        Some(MatchResult::OpponentWin) => "YOU LOST!",
        Some(MatchResult::PlayerWin) => "YOU WON!",
        _ => "GAME OVER",
    };
    let mut lines = vec![
        headline.to_string(),
        format!("Final Score: {}", snap.score),
        format!("Rounds Played: {}/{}", snap.round_number, snap.max_rounds),
    ];
    if let (Some(best), Some(avg)) = (snap.best_reaction_ms, snap.average_reaction_ms) {
        lines.push(format!(
            "Best reaction: {}  Average: {}",
            format_reaction(best),
            format_reaction(avg)
        ));
    }
    lines.push("Press R to restart or ESC for menu".to_string());
    lines
}
