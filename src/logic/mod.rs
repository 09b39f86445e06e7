//! Match business logic: setup, clock ticks, formation placement, substitutions, reports.

mod clock;
mod formation;
mod report;
mod setup;
mod substitution;

pub use clock::{tick, TickSchedule};
pub use formation::{assign, place_unplaced_players};
pub use report::{build_report, player_shifts, write_csv, MatchReport, Shift};
pub use setup::{configure_match, initialize_match, reset_for_rematch};
pub use substitution::{apply_drop, move_to_bench, move_to_field, swap_players, DropEvent, DropOutcome, DropZone};
