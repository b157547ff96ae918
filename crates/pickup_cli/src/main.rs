//! Pickup CLI
//!
//! Team allocation, rebalancing and attendance book-keeping for a weekly
//! pickup football group.

mod render;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pickup_core::allocation::{
    allocate, allocation_warnings, move_player, shuffle_allocate, sort_all_teams_by_rating,
    suggested_team_count, validate_unique, AllocationOptions,
};
use pickup_core::api::{allocate_teams_json, move_player_json, sort_teams_json};
use pickup_core::config::LeagueConfig;
use pickup_core::models::{GameDay, PlayerValidator, Position, Rating, SessionRecord, Team};
use pickup_core::roster::{compare_players, priority_list, teammate_overlap, AttendanceDay};
use pickup_core::store::{LeagueStore, RosterSource};
use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pickup")]
#[command(about = "Balanced teams and attendance for pickup football", long_about = None)]
struct Cli {
    /// League data file (overrides PICKUP_DATA_PATH and the config file)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Who is playing: names on the command line and/or a list file.
#[derive(Args)]
struct RosterArgs {
    /// Player names
    names: Vec<String>,

    /// File with one name per line (commas also separate names)
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct AllocationArgs {
    #[command(flatten)]
    roster: RosterArgs,

    /// Number of teams (default: one per five players, at most the configured count)
    #[arg(long)]
    teams: Option<usize>,

    /// Deal in sign-up order instead of by rating
    #[arg(long)]
    no_sort: bool,

    /// Ignore positions when dealing
    #[arg(long)]
    no_group: bool,

    /// Ignore stored ratings and positions
    #[arg(long)]
    ad_hoc: bool,

    /// Save the resulting teams to this file
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split players into balanced teams
    Allocate {
        #[command(flatten)]
        args: AllocationArgs,
    },

    /// Allocate again with a random tie order
    Shuffle {
        #[command(flatten)]
        args: AllocationArgs,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Move a player between teams of a saved allocation
    Move {
        /// Saved teams file
        #[arg(long)]
        teams_file: PathBuf,

        /// Player to move
        player: String,

        /// Team number the player is in (1-based)
        from: usize,

        /// Team number to move to (1-based)
        to: usize,
    },

    /// Sort every team of a saved allocation by rating
    Sort {
        /// Saved teams file
        #[arg(long)]
        teams_file: PathBuf,
    },

    /// Record a played game, or replace its teams
    Record {
        /// Game date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        #[command(flatten)]
        roster: RosterArgs,

        /// Saved teams of the game
        #[arg(long)]
        teams_file: Option<PathBuf>,
    },

    /// Set the winning team of a recorded game
    Winner {
        /// Game date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Team number or label ("2" or "Team 2")
        team: String,
    },

    /// Set a player's rating and position
    Rate {
        name: String,

        /// 1.0 to 5.0 in half steps
        rating: f64,

        /// Position name or menu code (1=Defensive, 2=Offensive, 3=Both, 4=Goalkeeper)
        #[arg(value_parser = parse_position)]
        position: Position,
    },

    /// Recount attendance from the game list
    Sync,

    /// Rank sign-ups by attendance
    Priority {
        #[command(flatten)]
        roster: RosterArgs,

        /// Tuesday, Thursday, Saturday (T/H/S) or All (A). Default: today
        #[arg(long)]
        day: Option<AttendanceDay>,
    },

    /// Compare the attendance of two players
    Compare {
        first: String,
        second: String,

        /// Only count games on this day
        #[arg(long)]
        day: Option<GameDay>,
    },

    /// List players by attendance
    Players,

    /// Print teams for sharing with the group
    Share {
        /// Saved teams file
        #[arg(long)]
        teams_file: PathBuf,

        /// Names only, no ratings or positions
        #[arg(long)]
        hide_details: bool,
    },

    /// Run a JSON API request (reads stdin unless --input is given)
    Api {
        #[arg(value_enum)]
        endpoint: Endpoint,

        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Endpoint {
    Allocate,
    Move,
    Sort,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = LeagueConfig::from_env().map_err(anyhow::Error::msg)?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    debug!("Using league data at {}", config.data_path.display());
    let store = LeagueStore::open(&config.data_path);

    match cli.command {
        Commands::Allocate { args } => run_allocation(&store, &config, &args, None)?,

        Commands::Shuffle { args, seed } => {
            let seed = seed.unwrap_or_else(rand::random);
            run_allocation(&store, &config, &args, Some(seed))?;
            println!("Seed: {}", seed);
        }

        Commands::Move { teams_file, player, from, to } => {
            let teams = read_teams(&teams_file)?;
            let moved = move_player(&teams, &player, team_index(from)?, team_index(to)?)?;
            write_teams(&teams_file, &moved)?;
            print!("{}", render::render_review(&moved, color_output()));
        }

        Commands::Sort { teams_file } => {
            let sorted = sort_all_teams_by_rating(&read_teams(&teams_file)?);
            write_teams(&teams_file, &sorted)?;
            print!("{}", render::render_review(&sorted, color_output()));
        }

        Commands::Record { date, roster, teams_file } => {
            let date = date.unwrap_or_else(today);
            match teams_file {
                Some(path) => {
                    let teams = read_teams(&path)?;
                    let exists = store.load()?.game_on(date).is_some();
                    if exists {
                        store.update_game_teams(date, teams)?;
                        println!("Updated teams for {}", date);
                    } else {
                        store.add_game(SessionRecord::with_teams(date, teams))?;
                        println!("Recorded game on {}", date);
                    }
                }
                None => {
                    let names = read_roster(&roster)?;
                    if names.is_empty() {
                        bail!("No players given for the game on {}", date);
                    }
                    let count = names.len();
                    store.add_game(SessionRecord::new(date, names))?;
                    println!("Recorded {} game on {} with {} players", GameDay::of_date(date), date, count);
                }
            }
        }

        Commands::Winner { date, team } => {
            let date = date.unwrap_or_else(today);
            let label = match team.trim().parse::<usize>() {
                Ok(number) => Team::label(team_index(number)?),
                Err(_) => team.trim().to_string(),
            };
            store.set_game_winner(date, &label)?;
            println!("{} won on {}", label, date);
        }

        Commands::Rate { name, rating, position } => {
            let rating = Rating::new(rating)?;
            store.update_player(&name, rating, position)?;
            println!("{}: {} {}", name, rating, position);
        }

        Commands::Sync => {
            let book = store.sync_player_stats()?;
            println!("Synchronised {} players over {} games", book.players.len(), book.games.len());
        }

        Commands::Priority { roster, day } => {
            let names = read_roster(&roster)?;
            let day = day.unwrap_or_else(|| AttendanceDay::Day(GameDay::of_date(today())));
            let book = store.load()?;
            let list = priority_list(&book, &names, day, config.priority);
            let label = match day {
                AttendanceDay::Day(d) => d.as_str(),
                AttendanceDay::All => "All",
            };
            print!("{}", render::render_priority(&list, label));
        }

        Commands::Compare { first, second, day } => {
            let book = store.load()?;
            let comparison = compare_players(&book, &first, &second, day);
            print!("{}", render::render_comparison(&first, &second, &comparison));
        }

        Commands::Players => {
            let book = store.load()?;
            print!("{}", render::render_players(&book.players_by_attendance()));
        }

        Commands::Share { teams_file, hide_details } => {
            let teams = read_teams(&teams_file)?;
            print!("{}", render::render_share(&teams, hide_details));
        }

        Commands::Api { endpoint, input } => {
            let request = match input {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read request from {}", path.display()))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
                    buffer
                }
            };
            let response = match endpoint {
                Endpoint::Allocate => allocate_teams_json(&request),
                Endpoint::Move => move_player_json(&request),
                Endpoint::Sort => sort_teams_json(&request),
            };
            println!("{}", response);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_allocation(
    store: &LeagueStore,
    config: &LeagueConfig,
    args: &AllocationArgs,
    seed: Option<u64>,
) -> Result<()> {
    let names = read_roster(&args.roster)?;
    let book = store.load()?;
    let source = if args.ad_hoc { RosterSource::AdHoc } else { RosterSource::Profiles };
    let players = book.resolve_players(&names, source)?;

    let team_count = args
        .teams
        .unwrap_or_else(|| suggested_team_count(players.len(), config.default_team_count));
    let options = AllocationOptions { sort_by_rating: !args.no_sort, group_by_position: !args.no_group };

    let teams = match seed {
        Some(seed) => shuffle_allocate(&players, team_count, options, seed)?,
        None => allocate(&players, team_count, options)?,
    };

    print!("{}", render::render_review(&teams, color_output()));
    for warning in allocation_warnings(&teams) {
        eprintln!("warning: {}", render::render_warning(&warning));
    }
    let overlap: usize = teammate_overlap(&teams, &book).iter().sum();
    println!("Familiar pairings: {}", overlap);

    if let Some(out) = &args.out {
        write_teams(out, &teams)?;
        info!("Saved {} teams to {}", teams.len(), out.display());
    }
    Ok(())
}

fn read_roster(roster: &RosterArgs) -> Result<Vec<String>> {
    let mut text = roster.names.join("\n");
    if let Some(path) = &roster.file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read player list from {}", path.display()))?;
        text.push('\n');
        text.push_str(&content);
    }
    Ok(PlayerValidator::parse_name_list(&text)?)
}

fn read_teams(path: &Path) -> Result<Vec<Team>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read teams from {}", path.display()))?;
    let teams: Vec<Team> = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse teams in {}", path.display()))?;
    validate_unique(&teams).with_context(|| format!("Invalid teams in {}", path.display()))?;
    Ok(teams)
}

fn write_teams(path: &Path, teams: &[Team]) -> Result<()> {
    let data = serde_json::to_string_pretty(teams)?;
    fs::write(path, data).with_context(|| format!("Failed to write teams to {}", path.display()))
}

/// Convert a 1-based team number from the command line.
fn team_index(number: usize) -> Result<usize> {
    match number.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("Team numbers start at 1"),
    }
}

fn parse_position(value: &str) -> std::result::Result<Position, String> {
    if let Ok(code) = value.trim().parse::<u8>() {
        return Position::from_menu_code(code).ok_or_else(|| format!("Unknown position code {}", code));
    }
    value.parse::<Position>().map_err(|e| e.to_string())
}

fn color_output() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
