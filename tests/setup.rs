//! Integration tests for match setup, player edits, and rematch reset.

use cronos_sideline::{
    configure_match, initialize_match, move_to_bench, reset_for_rematch, tick, MatchError,
    MatchMode, MatchSession, Position, RosterEntry, RosterTemplate, Status, Team, TeamColors,
    TeamConfig,
};
use std::collections::HashSet;

fn default_teams() -> (TeamConfig, TeamConfig) {
    (
        TeamConfig::named("Home", TeamColors::home_default()),
        TeamConfig::named("Away", TeamColors::away_default()),
    )
}

fn short_match() -> MatchSession {
    let (home, away) = default_teams();
    initialize_match(MatchMode::Short, home, away)
}

#[test]
fn short_mode_without_template_numbers_one_to_fourteen() {
    let m = short_match();
    let home: Vec<_> = m.team_players(Team::Home).collect();
    assert_eq!(home.len(), 14);
    for (i, p) in home.iter().enumerate() {
        assert_eq!(p.number, i as u32 + 1);
        assert_eq!(p.elapsed_seconds, 0);
        assert!(p.history.is_empty());
        let expected = if p.number <= 7 { Status::Field } else { Status::Bench };
        assert_eq!(p.status, expected, "player {}", p.number);
    }
    assert_eq!(m.team_players(Team::Away).count(), 14);
}

#[test]
fn long_mode_has_eleven_starters_per_team() {
    let (home, away) = default_teams();
    let m = initialize_match(MatchMode::Long, home, away);
    for team in [Team::Home, Team::Away] {
        assert_eq!(m.team_players(team).count(), 18);
        assert_eq!(m.team_players(team).filter(|p| p.is_on_field()).count(), 11);
    }
}

#[test]
fn ids_are_unique_across_teams() {
    let m = short_match();
    let ids: HashSet<_> = m.players.iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), m.players.len());
    let max_home = m.team_players(Team::Home).map(|p| p.id).max().unwrap();
    let min_away = m.team_players(Team::Away).map(|p| p.id).min().unwrap();
    assert!(max_home < min_away);
}

#[test]
fn starters_are_placed_and_subs_are_not() {
    let m = short_match();
    for p in &m.players {
        if p.is_on_field() {
            assert!(!p.position.is_unplaced(), "starter {} not placed", p.id);
        } else {
            assert!(p.position.is_unplaced());
        }
    }
    // Home keeper near the bottom goal, away keeper near the top one.
    let home_gk = m.team_players(Team::Home).next().unwrap();
    let away_gk = m.team_players(Team::Away).next().unwrap();
    assert!(home_gk.position.y > 90.0);
    assert!(away_gk.position.y < 10.0);
}

#[test]
fn template_replaces_default_numbering() {
    let template = RosterTemplate {
        name: "Lions".to_string(),
        colors: TeamColors::home_default(),
        players: (0..9)
            .map(|i| RosterEntry {
                number: 20 + i,
                name: format!("Lion {}", i),
            })
            .collect(),
    };
    let (_, away) = default_teams();
    let m = initialize_match(MatchMode::Short, TeamConfig::from_template(&template), away);

    assert_eq!(m.home.name, "Lions");
    let home: Vec<_> = m.team_players(Team::Home).collect();
    assert_eq!(home.len(), 9);
    assert_eq!(home[0].number, 20);
    assert_eq!(home[0].name, "Lion 0");
    assert_eq!(home.iter().filter(|p| p.is_on_field()).count(), 7);
    assert_eq!(home[8].status, Status::Bench);
}

#[test]
fn empty_template_falls_back_to_defaults() {
    let mut home = TeamConfig::named("Home", TeamColors::home_default());
    home.roster = Some(Vec::new());
    let (_, away) = default_teams();
    let m = initialize_match(MatchMode::Short, home, away);
    assert_eq!(m.team_players(Team::Home).count(), 14);
}

#[test]
fn rename_trims_and_rejects_blank() {
    let mut m = short_match();
    m.rename_player(3, "  Ana  ").unwrap();
    assert_eq!(m.get_player(3).unwrap().name, "Ana");

    assert_eq!(m.rename_player(3, "   "), Err(MatchError::EmptyName));
    assert_eq!(m.get_player(3).unwrap().name, "Ana");
    assert!(matches!(m.rename_player(999, "Bob"), Err(MatchError::PlayerNotFound(999))));
}

#[test]
fn renumber_accepts_duplicates_and_rejects_non_numeric() {
    let mut m = short_match();
    m.renumber_player(3, "5").unwrap();
    assert_eq!(m.get_player(3).unwrap().number, 5);
    assert_eq!(m.get_player(5).unwrap().number, 5);

    assert!(matches!(m.renumber_player(3, "ten"), Err(MatchError::InvalidNumber(_))));
    assert!(matches!(m.renumber_player(3, ""), Err(MatchError::InvalidNumber(_))));
    assert_eq!(m.get_player(3).unwrap().number, 5);
}

#[test]
fn rematch_reset_keeps_identity_and_restores_starters() {
    let mut m = short_match();
    m.rename_player(9, "Sub Nine").unwrap();
    m.clock.start();
    for _ in 0..30 {
        tick(&mut m);
    }
    move_to_bench(&mut m, 2, Team::Home).unwrap();

    reset_for_rematch(&mut m);

    assert_eq!(m.clock.elapsed_seconds, 0);
    assert!(!m.clock.running);
    assert!(m.players.iter().all(|p| p.elapsed_seconds == 0 && p.history.is_empty()));
    let p2 = m.get_player(2).unwrap();
    assert_eq!(p2.status, Status::Field);
    assert!(!p2.position.is_unplaced());
    assert_eq!(m.get_player(9).unwrap().name, "Sub Nine");
    assert_eq!(m.team_players(Team::Away).filter(|p| p.is_on_field()).count(), 7);
}

#[test]
fn configure_replaces_players_but_keeps_id() {
    let mut m = short_match();
    let id = m.id;
    m.set_score(2, 1);
    let (home, away) = default_teams();
    configure_match(&mut m, MatchMode::Long, home, away);
    assert_eq!(m.id, id);
    assert_eq!(m.mode, MatchMode::Long);
    assert_eq!(m.players.len(), 36);
    assert_eq!(m.score.home, 0);
    assert_ne!(m.get_player(1).unwrap().position, Position::UNPLACED);
}
