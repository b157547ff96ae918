//! Plain-text views of teams, rankings and history.

use chrono::NaiveDate;
use pickup_core::allocation::AllocationWarning;
use pickup_core::models::{PlayerProfile, Position, Team};
use pickup_core::roster::{PlayerComparison, PriorityEntry, PriorityList};
use std::fmt::Write;

/// Average of a team for display; empty teams have none. Ties round away
/// from zero, so 3.25 shows as 3.3.
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(value) => format!("{:.1} ★", round_tenths(value)),
        None => "–".to_string(),
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

const TEAM_COLORS: [Rgb; 3] = [Rgb(0x4C, 0xAF, 0x50), Rgb(0x21, 0x96, 0xF3), Rgb(0xF4, 0x43, 0x36)];

/// Team colours repeat after the third team.
pub fn team_color(index: usize) -> Rgb {
    TEAM_COLORS[index % TEAM_COLORS.len()]
}

pub fn position_color(position: Position) -> Rgb {
    match position {
        Position::Offensive => Rgb(0xFF, 0xD7, 0x00),
        Position::Defensive => Rgb(0xB4, 0xA0, 0xFF),
        Position::Goalkeeper => Rgb(0xFF, 0x9B, 0x85),
        Position::Both => Rgb(0x85, 0xFF, 0x9B),
    }
}

/// Wrap `text` in a 24-bit ANSI foreground colour.
fn paint(text: &str, color: Rgb, enabled: bool) -> String {
    if enabled {
        format!("\x1b[38;2;{};{};{}m{}\x1b[0m", color.0, color.1, color.2, text)
    } else {
        text.to_string()
    }
}

pub fn position_icon(position: Position) -> &'static str {
    match position {
        Position::Offensive => "⚔️",
        Position::Defensive => "🛡️",
        Position::Goalkeeper => "🧤",
        Position::Both => "⚽",
    }
}

/// The view handed to players: one block per team.
pub fn render_share(teams: &[Team], hide_details: bool) -> String {
    let mut out = String::new();
    for (index, team) in teams.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        if hide_details {
            let _ = writeln!(out, "{}", Team::label(index));
        } else {
            let _ = writeln!(out, "{}  {}", Team::label(index), format_average(team.average_rating()));
        }
        for player in team.players() {
            if hide_details {
                let _ = writeln!(out, "  {}", player.name);
            } else {
                let _ = writeln!(
                    out,
                    "  {}  {:.1} ★  {}",
                    player.name,
                    player.rating.value(),
                    position_icon(player.position)
                );
            }
        }
    }
    out
}

/// Organiser view: team sizes and positions spelled out, optionally in the
/// team and position colours.
pub fn render_review(teams: &[Team], color: bool) -> String {
    let mut out = String::new();
    for (index, team) in teams.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} ({} players, avg {})",
            paint(&Team::label(index), team_color(index), color),
            team.len(),
            format_average(team.average_rating())
        );
        for player in team.players() {
            let _ = writeln!(
                out,
                "  {:<20} {:>4.1}  {}",
                player.name,
                player.rating.value(),
                paint(player.position.as_str(), position_color(player.position), color)
            );
        }
    }
    out
}

pub fn render_warning(warning: &AllocationWarning) -> String {
    match warning {
        AllocationWarning::EmptyRoster => "No players to allocate; all teams are empty".to_string(),
        AllocationWarning::EmptyTeams { indices } => {
            let labels: Vec<String> = indices.iter().map(|i| Team::label(*i)).collect();
            format!("Not enough players: {} got nobody", labels.join(", "))
        }
    }
}

pub fn render_priority(list: &PriorityList, day_label: &str) -> String {
    let mut out = String::new();
    let mut rank = 0;
    let mut section = |out: &mut String, title: &str, entries: &[PriorityEntry]| {
        if entries.is_empty() {
            return;
        }
        let _ = writeln!(out, "{}:", title);
        for entry in entries {
            rank += 1;
            let _ = writeln!(
                out,
                "{:>3}. {:<20} {} games: {:<3} total: {}",
                rank, entry.name, day_label, entry.day_games, entry.total_games
            );
        }
    };
    section(&mut out, "Playing", &list.confirmed);
    section(&mut out, "Playing (sign-up order)", &list.by_sign_up);
    section(&mut out, "On hold", &list.on_hold);
    out
}

pub fn render_comparison(first: &str, second: &str, comparison: &PlayerComparison) -> String {
    fn dates(list: &[NaiveDate]) -> String {
        if list.is_empty() {
            return "none".to_string();
        }
        list.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(", ")
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}: {} games", first, comparison.first_dates.len());
    let _ = writeln!(out, "{}: {} games", second, comparison.second_dates.len());
    let _ = writeln!(out, "Together: {}", dates(&comparison.together()));
    let _ = writeln!(out, "Only {}: {}", first, dates(&comparison.only_first()));
    let _ = writeln!(out, "Only {}: {}", second, dates(&comparison.only_second()));
    out
}

pub fn render_players(players: &[(&str, &PlayerProfile)]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:>6} {:<10} {:>4} {:>4} {:>4} {:>5}",
        "Name", "Rating", "Position", "Tue", "Thu", "Sat", "Total"
    );
    for (name, profile) in players {
        let _ = writeln!(
            out,
            "{:<20} {:>6.1} {:<10} {:>4} {:>4} {:>4} {:>5}",
            name,
            profile.rating.value(),
            profile.position,
            profile.tuesday_games,
            profile.thursday_games,
            profile.saturday_games,
            profile.total_games
        );
    }
    out
}
