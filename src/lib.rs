//! Sideline substitution clock: library with the match model and business logic.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    apply_drop, assign, build_report, configure_match, initialize_match, move_to_bench,
    move_to_field, place_unplaced_players, player_shifts, reset_for_rematch, swap_players, tick,
    write_csv, DropEvent, DropOutcome, DropZone, MatchReport, Shift, TickSchedule,
};
pub use models::{
    format_clock, Direction, ErrorKind, HistoryEvent, MatchClock, MatchError, MatchId, MatchMode,
    MatchSession, Player, PlayerId, Position, RosterEntry, RosterTemplate, Score, Status, Team,
    TeamColors, TeamConfig, TeamSide, AWAY_ID_OFFSET,
};
pub use store::{JsonFileBackend, MemoryBackend, RosterStore, SaveOutcome, TemplateBackend, TEMPLATE_CAPACITY};
