//! Default pitch placement for players that have not been placed yet.
//!
//! Coordinates are percentages of the pitch. Home defends the bottom goal
//! (y = 100), away the top goal (y = 0); the away table is the home table
//! mirrored across the halfway line.

use crate::models::{MatchMode, MatchSession, Position, Team};

/// Where a slot falls when the formation has no entry for it.
pub const FALLBACK_SLOT: Position = Position { x: 50.0, y: 50.0 };

/// 7-a-side, home side: GK, 2 DEF, 3 MID, 1 FWD.
const SHORT_HOME: [(f64, f64); 7] = [
    (50.0, 94.0),
    (30.0, 82.0),
    (70.0, 82.0),
    (20.0, 68.0),
    (50.0, 68.0),
    (80.0, 68.0),
    (50.0, 57.0),
];

/// 11-a-side, home side: GK, 4 DEF, 3 MID, 3 FWD.
const LONG_HOME: [(f64, f64); 11] = [
    (50.0, 95.0),
    (15.0, 85.0),
    (38.0, 87.0),
    (62.0, 87.0),
    (85.0, 85.0),
    (30.0, 73.0),
    (50.0, 76.0),
    (70.0, 73.0),
    (20.0, 61.0),
    (80.0, 61.0),
    (50.0, 57.0),
];

/// Default coordinate for the `slot`-th on-field player of `team`.
pub fn assign(team: Team, mode: MatchMode, slot: usize) -> Position {
    let table: &[(f64, f64)] = match mode {
        MatchMode::Short => &SHORT_HOME,
        MatchMode::Long => &LONG_HOME,
    };
    match table.get(slot) {
        Some(&(x, y)) => match team {
            Team::Home => Position::new(x, y),
            Team::Away => Position::new(x, 100.0 - y),
        },
        None => FALLBACK_SLOT,
    }
}

/// Give every on-field player still at the `(0,0)` sentinel its formation slot.
/// The slot is the player's ordinal among on-field teammates, in roster order.
pub fn place_unplaced_players(session: &mut MatchSession) {
    let mode = session.mode;
    for team in [Team::Home, Team::Away] {
        let on_field = session
            .players
            .iter_mut()
            .filter(|p| p.team == team && p.is_on_field());
        for (slot, p) in on_field.enumerate() {
            if p.position.is_unplaced() {
                p.position = assign(team, mode, slot);
            }
        }
    }
}
