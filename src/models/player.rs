//! Player, Team, and the per-player movement history.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player within a match. Home and away draw from disjoint ranges.
pub type PlayerId = u32;

/// First id handed out to away players (home players count up from 1).
pub const AWAY_ID_OFFSET: PlayerId = 1000;

/// Which side a player belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    Home,
    Away,
}

impl Team {
    pub fn label(self) -> &'static str {
        match self {
            Team::Home => "home",
            Team::Away => "away",
        }
    }
}

/// Where a player currently is.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Field,
    #[default]
    Bench,
}

/// Percentage coordinates on the pitch (0-100 on both axes).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// `(0,0)`: not yet placed; the formation assigner fills it in.
    pub const UNPLACED: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes into the pitch.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 100.0),
            y: self.y.clamp(0.0, 100.0),
        }
    }

    pub fn is_unplaced(&self) -> bool {
        *self == Self::UNPLACED
    }
}

/// Direction of a logged movement.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Entered,
    Left,
}

/// One logged movement, stamped with the match clock in seconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub at: u32,
    pub direction: Direction,
}

impl HistoryEvent {
    pub fn entered(at: u32) -> Self {
        Self {
            at,
            direction: Direction::Entered,
        }
    }

    pub fn left(at: u32) -> Self {
        Self {
            at,
            direction: Direction::Left,
        }
    }
}

/// A player in the current match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub number: u32,
    pub name: String,
    pub team: Team,
    pub status: Status,
    /// Seconds spent on the field (only advanced by clock ticks).
    pub elapsed_seconds: u32,
    pub position: Position,
    pub history: Vec<HistoryEvent>,
}

impl Player {
    /// Create a player with no time and no history.
    pub fn new(id: PlayerId, team: Team, number: u32, name: impl Into<String>, status: Status) -> Self {
        Self {
            id,
            number,
            name: name.into(),
            team,
            status,
            elapsed_seconds: 0,
            position: Position::UNPLACED,
            history: Vec::new(),
        }
    }

    pub fn is_on_field(&self) -> bool {
        self.status == Status::Field
    }

    pub fn last_event(&self) -> Option<&HistoryEvent> {
        self.history.last()
    }

    /// True when the last logged event is an "entered" not yet closed by a "left".
    pub fn has_open_entry(&self) -> bool {
        matches!(self.last_event(), Some(e) if e.direction == Direction::Entered)
    }

    /// Log an "entered" unless one is already open.
    pub fn log_entered(&mut self, at: u32) {
        if !self.has_open_entry() {
            self.history.push(HistoryEvent::entered(at));
        }
    }

    /// Log a "left" if an "entered" is open, or if nothing was logged yet (an unlogged starter).
    pub fn log_left(&mut self, at: u32) {
        if self.history.is_empty() || self.has_open_entry() {
            self.history.push(HistoryEvent::left(at));
        }
    }
}
