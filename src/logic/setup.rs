//! Match setup: building both squads, re-configuration, and rematch reset.

use crate::logic::formation::place_unplaced_players;
use crate::models::{
    MatchMode, MatchSession, Player, PlayerId, Position, RosterEntry, Status, Team, TeamConfig,
    AWAY_ID_OFFSET,
};

/// Create a session with both squads populated and starters placed on the pitch.
pub fn initialize_match(mode: MatchMode, home: TeamConfig, away: TeamConfig) -> MatchSession {
    let mut session = MatchSession::new(mode, home.side.clone(), away.side.clone());
    session.players = build_players(mode, &home, &away);
    place_unplaced_players(&mut session);
    log::info!(
        "Configured match {} ({}): {} vs {}",
        session.id,
        mode.label(),
        session.home.name,
        session.away.name
    );
    session
}

/// Replace the whole match setup: new squads, clock and score back to zero. The session id is kept.
pub fn configure_match(session: &mut MatchSession, mode: MatchMode, home: TeamConfig, away: TeamConfig) {
    let id = session.id;
    *session = initialize_match(mode, home, away);
    session.id = id;
}

/// Same squads, fresh match: time, history, positions, clock cleared; starters recomputed per team.
pub fn reset_for_rematch(session: &mut MatchSession) {
    let starters = session.mode.starters_count();
    let mut home_seen = 0;
    let mut away_seen = 0;
    for p in &mut session.players {
        let seen = match p.team {
            Team::Home => &mut home_seen,
            Team::Away => &mut away_seen,
        };
        p.status = if *seen < starters { Status::Field } else { Status::Bench };
        *seen += 1;
        p.elapsed_seconds = 0;
        p.history.clear();
        p.position = Position::UNPLACED;
    }
    session.clock.reset();
    place_unplaced_players(session);
}

fn build_players(mode: MatchMode, home: &TeamConfig, away: &TeamConfig) -> Vec<Player> {
    let mut players = build_team(mode, Team::Home, home);
    players.extend(build_team(mode, Team::Away, away));
    players
}

fn build_team(mode: MatchMode, team: Team, config: &TeamConfig) -> Vec<Player> {
    let base: PlayerId = match team {
        Team::Home => 0,
        Team::Away => AWAY_ID_OFFSET,
    };
    let entries: Vec<RosterEntry> = match config.roster.as_deref() {
        Some(roster) if !roster.is_empty() => roster.to_vec(),
        _ => default_roster(mode.squad_size()),
    };
    let starters = mode.starters_count();
    // Keep home ids below the away range.
    entries
        .into_iter()
        .take((AWAY_ID_OFFSET - 1) as usize)
        .enumerate()
        .map(|(i, entry)| {
            let status = if i < starters { Status::Field } else { Status::Bench };
            Player::new(base + i as PlayerId + 1, team, entry.number, entry.name, status)
        })
        .collect()
}

/// Players numbered 1..=size with placeholder names.
fn default_roster(size: usize) -> Vec<RosterEntry> {
    (1..=size as u32)
        .map(|n| RosterEntry {
            number: n,
            name: format!("Player {}", n),
        })
        .collect()
}
