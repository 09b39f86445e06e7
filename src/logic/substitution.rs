//! Substitutions: validating and applying drops from the gesture layer.
//!
//! The browser does the hit-testing. It reports which zone the chip landed in
//! and which chip (if any) is under the drop point; everything else is decided here.

use crate::logic::formation::place_unplaced_players;
use crate::models::{MatchError, MatchSession, PlayerId, Position, Status, Team};
use serde::{Deserialize, Serialize};

/// Area the dragged chip was released over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropZone {
    /// Empty pitch at this coordinate.
    Field(Position),
    /// A team's bench section.
    Bench(Team),
}

/// A completed drag gesture, already resolved by the gesture layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropEvent {
    pub player_id: PlayerId,
    pub zone: DropZone,
    /// Chip under the drop point, if any.
    #[serde(default)]
    pub target: Option<PlayerId>,
}

/// What a successful drop did.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropOutcome {
    Swapped,
    MovedToField,
    MovedToBench,
}

/// Apply a drop.
///
/// 1. Landing on a teammate swaps the two players, whatever the zone; landing on an opponent is rejected.
/// 2. Empty pitch moves the player onto the field at the drop point.
/// 3. Empty bench moves the player to the bench, but only onto their own team's section.
pub fn apply_drop(session: &mut MatchSession, drop: &DropEvent) -> Result<DropOutcome, MatchError> {
    let target = drop.target.filter(|&t| t != drop.player_id);
    let outcome = match (target, drop.zone) {
        (Some(target), _) => {
            swap_players(session, drop.player_id, target)?;
            DropOutcome::Swapped
        }
        (None, DropZone::Field(at)) => {
            move_to_field(session, drop.player_id, at)?;
            DropOutcome::MovedToField
        }
        (None, DropZone::Bench(bench)) => {
            move_to_bench(session, drop.player_id, bench)?;
            DropOutcome::MovedToBench
        }
    };
    place_unplaced_players(session);
    Ok(outcome)
}

/// Put a player on the pitch at `at`. Logs "entered" only when coming off the bench;
/// moving a player who is already on the field just repositions them.
pub fn move_to_field(session: &mut MatchSession, player_id: PlayerId, at: Position) -> Result<(), MatchError> {
    let now = session.clock.elapsed_seconds;
    let player = session
        .get_player_mut(player_id)
        .ok_or(MatchError::PlayerNotFound(player_id))?;
    let was_on_bench = !player.is_on_field();
    player.status = Status::Field;
    player.position = at.clamped();
    if was_on_bench {
        player.log_entered(now);
    }
    Ok(())
}

/// Send a player to `bench`, which must be their own team's bench. Logs "left" only when
/// coming off the field.
pub fn move_to_bench(session: &mut MatchSession, player_id: PlayerId, bench: Team) -> Result<(), MatchError> {
    let now = session.clock.elapsed_seconds;
    let player = session
        .get_player_mut(player_id)
        .ok_or(MatchError::PlayerNotFound(player_id))?;
    if player.team != bench {
        log::debug!("Rejected drop of player {} on the {} bench", player_id, bench.label());
        return Err(MatchError::WrongBench {
            player: player_id,
            bench,
        });
    }
    let was_on_field = player.is_on_field();
    player.status = Status::Bench;
    player.position = Position::UNPLACED;
    if was_on_field {
        player.log_left(now);
    }
    Ok(())
}

/// Exchange status and position of two teammates.
///
/// History is only written while the clock runs, and only for a player whose status actually
/// changed: a swap between two field players (or two bench players) is a repositioning.
pub fn swap_players(session: &mut MatchSession, dragged: PlayerId, target: PlayerId) -> Result<(), MatchError> {
    let a = player_index(session, dragged)?;
    let b = player_index(session, target)?;
    if session.players[a].team != session.players[b].team {
        log::debug!("Rejected cross-team swap of players {} and {}", dragged, target);
        return Err(MatchError::CrossTeam { dragged, target });
    }

    let (status_a, position_a) = (session.players[a].status, session.players[a].position);
    let (status_b, position_b) = (session.players[b].status, session.players[b].position);
    session.players[a].status = status_b;
    session.players[a].position = position_b;
    session.players[b].status = status_a;
    session.players[b].position = position_a;

    if session.clock.running && status_a != status_b {
        let now = session.clock.elapsed_seconds;
        for idx in [a, b] {
            let p = &mut session.players[idx];
            match p.status {
                Status::Field => p.log_entered(now),
                Status::Bench => p.log_left(now),
            }
        }
    }
    Ok(())
}

fn player_index(session: &MatchSession, id: PlayerId) -> Result<usize, MatchError> {
    session
        .players
        .iter()
        .position(|p| p.id == id)
        .ok_or(MatchError::PlayerNotFound(id))
}
