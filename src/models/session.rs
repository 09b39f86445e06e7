//! MatchSession: players, clock, sides, and score for one match.

use crate::models::clock::MatchClock;
use crate::models::player::{Player, PlayerId, Team};
use crate::models::roster::TeamSide;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors returned by match operations. An `Err` always means nothing was changed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// No player with this id in the match.
    PlayerNotFound(PlayerId),
    /// Dropped onto a player of the other team.
    CrossTeam { dragged: PlayerId, target: PlayerId },
    /// Dropped onto the other team's bench section.
    WrongBench { player: PlayerId, bench: Team },
    /// Name is empty after trimming.
    EmptyName,
    /// Dorsal input is not a non-negative integer.
    InvalidNumber(String),
    /// No saved roster template with this name.
    TemplateNotFound(String),
    /// The template store is full and the name is new.
    CapacityExceeded { capacity: usize },
    /// The template store could not be written.
    Storage(String),
}

/// Coarse classification used by the web layer to pick a response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Invalid input; silently discarded and the unchanged state re-shown.
    ValidationNoOp,
    CapacityExceeded,
    NotFound,
    Storage,
}

impl MatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchError::CrossTeam { .. }
            | MatchError::WrongBench { .. }
            | MatchError::EmptyName
            | MatchError::InvalidNumber(_) => ErrorKind::ValidationNoOp,
            MatchError::PlayerNotFound(_) | MatchError::TemplateNotFound(_) => ErrorKind::NotFound,
            MatchError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            MatchError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            MatchError::CrossTeam { .. } => write!(f, "Players of different teams cannot be swapped"),
            MatchError::WrongBench { bench, .. } => {
                write!(f, "Player does not belong to the {} bench", bench.label())
            }
            MatchError::EmptyName => write!(f, "Name cannot be empty"),
            MatchError::InvalidNumber(input) => write!(f, "'{}' is not a valid number", input),
            MatchError::TemplateNotFound(name) => write!(f, "No saved roster named '{}'", name),
            MatchError::CapacityExceeded { capacity } => {
                write!(f, "Roster store is full ({} templates); overwrite an existing one", capacity)
            }
            MatchError::Storage(msg) => write!(f, "Could not save rosters: {}", msg),
        }
    }
}

impl std::error::Error for MatchError {}

/// Unique identifier for a match session.
pub type MatchId = Uuid;

/// Match format: squad and starter counts per team.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// 7-a-side: 14 players, 7 starters.
    #[default]
    #[serde(alias = "f7")]
    Short,
    /// 11-a-side: 18 players, 11 starters.
    #[serde(alias = "f11")]
    Long,
}

impl MatchMode {
    pub fn squad_size(self) -> usize {
        match self {
            MatchMode::Short => 14,
            MatchMode::Long => 18,
        }
    }

    pub fn starters_count(self) -> usize {
        match self {
            MatchMode::Short => 7,
            MatchMode::Long => 11,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchMode::Short => "7-a-side",
            MatchMode::Long => "11-a-side",
        }
    }
}

/// Goals per side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// Full match state: both squads, the clock, and display data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchSession {
    pub id: MatchId,
    pub mode: MatchMode,
    pub home: TeamSide,
    pub away: TeamSide,
    /// Both teams, home first, each in roster order.
    pub players: Vec<Player>,
    pub clock: MatchClock,
    pub score: Score,
}

impl MatchSession {
    /// Create an empty session (no players yet; see `initialize_match`).
    pub fn new(mode: MatchMode, home: TeamSide, away: TeamSide) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            home,
            away,
            players: Vec::new(),
            clock: MatchClock::new(),
            score: Score::default(),
        }
    }

    pub fn side(&self, team: Team) -> &TeamSide {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    fn player_mut_or_err(&mut self, id: PlayerId) -> Result<&mut Player, MatchError> {
        self.get_player_mut(id).ok_or(MatchError::PlayerNotFound(id))
    }

    /// Players of one team, in roster order.
    pub fn team_players(&self, team: Team) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team == team)
    }

    /// Rename a player. Empty (after trim) names are rejected.
    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> Result<(), MatchError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(MatchError::EmptyName);
        }
        self.player_mut_or_err(id)?.name = trimmed.to_string();
        Ok(())
    }

    /// Change a player's dorsal. Input must parse as a non-negative integer; duplicates are allowed.
    pub fn renumber_player(&mut self, id: PlayerId, number: &str) -> Result<(), MatchError> {
        let parsed: u32 = number
            .trim()
            .parse()
            .map_err(|_| MatchError::InvalidNumber(number.to_string()))?;
        self.player_mut_or_err(id)?.number = parsed;
        Ok(())
    }

    pub fn set_score(&mut self, home: u32, away: u32) {
        self.score = Score { home, away };
    }
}
