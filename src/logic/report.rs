//! Shift report: time-in/time-out pairs per player, laid out as a table for export.

use crate::models::{format_clock, Direction, MatchSession, Player, Team};
use chrono::NaiveDate;
use std::io;

/// One continuous spell on the field, in match-clock seconds. `end` is `None` while still on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Shift {
    pub start: u32,
    pub end: Option<u32>,
}

/// Rebuild a player's shifts from their history.
///
/// A "left" with no open "entered" started at 00:00 (a starter). A player with no history who
/// has played, or is on the field now, has one open shift from 00:00.
pub fn player_shifts(player: &Player) -> Vec<Shift> {
    if player.history.is_empty() {
        if player.elapsed_seconds > 0 || player.is_on_field() {
            return vec![Shift { start: 0, end: None }];
        }
        return Vec::new();
    }

    let mut shifts = Vec::new();
    let mut open: Option<u32> = None;
    for event in &player.history {
        match event.direction {
            Direction::Entered => open = Some(event.at),
            Direction::Left => shifts.push(Shift {
                start: open.take().unwrap_or(0),
                end: Some(event.at),
            }),
        }
    }
    if let Some(start) = open {
        shifts.push(Shift { start, end: None });
    }
    shifts
}

/// Row-oriented export: metadata lines, then a header and one row per player.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MatchReport {
    pub metadata: Vec<(String, String)>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MatchReport {
    /// Every line of the export in order; a blank line separates metadata from the table.
    pub fn lines(&self) -> Vec<Vec<String>> {
        let mut out: Vec<Vec<String>> = self
            .metadata
            .iter()
            .map(|(k, v)| vec![k.clone(), v.clone()])
            .collect();
        out.push(Vec::new());
        out.push(self.header.clone());
        out.extend(self.rows.iter().cloned());
        out
    }
}

/// Build the shift report for the whole match, dated `date`.
///
/// Rows are home before away, then by ascending number. Every row gets as many in/out column
/// pairs as the player with the most shifts; shorter rows are padded with empty cells.
pub fn build_report(session: &MatchSession, date: NaiveDate) -> MatchReport {
    let mut players: Vec<&Player> = session.players.iter().collect();
    players.sort_by_key(|p| (p.team, p.number));

    let shifts: Vec<Vec<Shift>> = players.iter().map(|p| player_shifts(p)).collect();
    let pairs = shifts.iter().map(Vec::len).max().unwrap_or(0);

    let mut header: Vec<String> = ["Team", "Number", "Name", "Time"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for i in 1..=pairs {
        header.push(format!("In {}", i));
        header.push(format!("Out {}", i));
    }

    let rows = players
        .iter()
        .zip(&shifts)
        .map(|(p, spells)| {
            let mut row = vec![
                session.side(p.team).name.clone(),
                p.number.to_string(),
                p.name.clone(),
                format_clock(p.elapsed_seconds),
            ];
            for shift in spells {
                row.push(format_clock(shift.start));
                row.push(shift.end.map(format_clock).unwrap_or_default());
            }
            row.resize(header.len(), String::new());
            row
        })
        .collect();

    let metadata = vec![
        ("Date".to_string(), date.format("%Y-%m-%d").to_string()),
        ("Mode".to_string(), session.mode.label().to_string()),
        (
            "Match".to_string(),
            format!("{} vs {}", session.side(Team::Home).name, session.side(Team::Away).name),
        ),
        (
            "Score".to_string(),
            format!("{} - {}", session.score.home, session.score.away),
        ),
        ("Elapsed".to_string(), format_clock(session.clock.elapsed_seconds)),
    ];

    MatchReport {
        metadata,
        header,
        rows,
    }
}

/// Serialize the report as CSV.
///
/// The separator is written as a bare line break: the csv writer would emit an empty record
/// as `""`.
pub fn write_csv<W: io::Write>(report: &MatchReport, mut writer: W) -> Result<(), csv::Error> {
    for line in report.lines() {
        if line.is_empty() {
            writer.write_all(b"\n")?;
        } else {
            let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(&mut writer);
            wtr.write_record(&line)?;
            wtr.flush()?;
        }
    }
    writer.flush()?;
    Ok(())
}
