//! Data structures for the sideline clock: players, match clock, rosters, match session.

mod clock;
mod player;
mod roster;
mod session;

pub use clock::{format_clock, MatchClock};
pub use player::{Direction, HistoryEvent, Player, PlayerId, Position, Status, Team, AWAY_ID_OFFSET};
pub use roster::{RosterEntry, RosterTemplate, TeamColors, TeamConfig, TeamSide};
pub use session::{ErrorKind, MatchError, MatchId, MatchMode, MatchSession, Score};
