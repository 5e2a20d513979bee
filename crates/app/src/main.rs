use std::fmt;
use std::io::{BufRead, Write as _};
use std::time::Instant;

use play_core::model::{
    AchievementKind, Answer, ChallengeBody, GameKind, Level, ParentalSettings, Player, PlayerId,
};
use services::sessions::{GameSession, SessionConfig};
use services::{AppServices, Clock, PlaytimeAllowance};
use storage::repository::Storage;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidGame { raw: String },
    InvalidLevel { raw: String },
    InvalidSeed { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidGame { raw } => write!(f, "invalid --game value: {raw}"),
            ArgsError::InvalidLevel { raw } => write!(f, "invalid --level value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play [--db <sqlite_url>] [--email <email>]");
    eprintln!("                           [--game <slug>] [--level <1-7>] [--seed <n>]");
    eprintln!("  cargo run -p app -- seed [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- leaderboard  [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- achievements [--db <sqlite_url>] [--email <email>]");
    eprintln!();
    eprintln!("Games:");
    for game in GameKind::ALL {
        eprintln!("  {:<20} {}", game.slug(), game.description());
    }
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:play.sqlite3  --email demo@example.com");
    eprintln!("  --game math-adventure     --level 1");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PLAY_DB_URL");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Seed,
    Leaderboard,
    Achievements,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "seed" => Some(Self::Seed),
            "leaderboard" => Some(Self::Leaderboard),
            "achievements" => Some(Self::Achievements),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    email: String,
    game: GameKind,
    level: Level,
    seed: Option<u64>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("PLAY_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://play.sqlite3".into(), normalize_sqlite_url);
        let mut email = "demo@example.com".to_owned();
        let mut game = GameKind::MathAdventure;
        let mut level = Level::new(1).expect("1 is a valid level");
        let mut seed = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--email" => {
                    email = require_value(args, "--email")?;
                }
                "--game" => {
                    let value = require_value(args, "--game")?;
                    game = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidGame { raw: value })?;
                }
                "--level" => {
                    let value = require_value(args, "--level")?;
                    level = value
                        .parse::<u32>()
                        .ok()
                        .and_then(|v| Level::new(v).ok())
                        .ok_or(ArgsError::InvalidLevel { raw: value })?;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    seed = Some(
                        value
                            .parse::<u64>()
                            .map_err(|_| ArgsError::InvalidSeed { raw: value })?,
                    );
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            email,
            game,
            level,
            seed,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let app = AppServices::new_sqlite(&args.db_url, Clock::default_clock()).await?;

    match cmd {
        Command::Play => play(&app, &args).await,
        Command::Seed => seed(app.storage()).await,
        Command::Leaderboard => leaderboard(&app).await,
        Command::Achievements => achievements(&app, &args).await,
    }
}

async fn play(app: &AppServices, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let player = app.auth().login(&args.email, "demo").await?;
    println!(
        "Welcome back, {} {}! Total score: {}",
        player.avatar(),
        player.name(),
        player.total_score()
    );

    match app.parental().allowance(player.id()).await? {
        PlaytimeAllowance::Allowed { remaining_mins } => {
            println!("Play time left today: {remaining_mins} minutes");
        }
        PlaytimeAllowance::Exhausted => {
            println!("Today's playtime is used up. Come back tomorrow!");
            return Ok(());
        }
    }

    let config = args.seed.map_or_else(SessionConfig::default, SessionConfig::seeded);
    let mut session = app.sessions().start_session(args.game, args.level, config)?;
    println!(
        "{} — level {} ({} challenges, {} seconds)",
        args.game.title(),
        args.level,
        session.progress().total,
        session.progress().remaining_secs,
    );

    let started = Instant::now();
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(challenge) = session.current_challenge().cloned() {
        println!();
        println!("[{}/{}] {}", session.progress().answered + 1, session.progress().total, challenge.prompt());
        match challenge.body() {
            ChallengeBody::MultipleChoice { options, .. } => {
                for (i, option) in options.iter().enumerate() {
                    println!("  {}) {option}", i + 1);
                }
                print!("answer 1-{}> ", options.len());
            }
            ChallengeBody::FreeText { hint, .. } => {
                println!("  hint: {hint}");
                print!("word> ");
            }
            ChallengeBody::MemoryPair { symbol } => {
                print!("press enter when you found both {symbol}> ");
            }
            ChallengeBody::Freeform { time_limit_secs } => {
                println!("  you have {time_limit_secs} seconds for this one");
                print!("strokes drawn> ");
            }
        }
        std::io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            println!();
            session.teardown();
            break;
        };

        // The countdown is second-granular: catch it up to the wall clock
        // before scoring, so thinking time counts against the budget.
        let target = u32::try_from(started.elapsed().as_secs()).unwrap_or(u32::MAX);
        while !session.is_over() && session.elapsed_secs() < target {
            session.tick();
        }
        if session.is_over() {
            println!("Time's up!");
            break;
        }

        let answer = parse_answer(challenge.body(), line.trim());
        let index = session.progress().answered;
        match session.submit_answer(index, &answer) {
            Ok(outcome) if outcome.verdict.accepted => {
                println!("Correct! +{} points", outcome.verdict.points);
                if let Some(fact) = challenge.fact() {
                    println!("  {fact}");
                }
            }
            Ok(_) => println!("Not quite!"),
            Err(err) => {
                eprintln!("{err}");
                break;
            }
        }
    }

    if !session.is_over() {
        session.teardown();
    }
    report(app, &player, &mut session).await
}

fn parse_answer(body: &ChallengeBody, line: &str) -> Answer {
    match body {
        ChallengeBody::MultipleChoice { options, .. } => {
            let chosen = line
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=options.len()).contains(n))
                .map_or(usize::MAX, |n| n - 1);
            Answer::Choice(chosen)
        }
        ChallengeBody::FreeText { .. } => Answer::Text(line.to_owned()),
        ChallengeBody::MemoryPair { symbol } => Answer::PairFound {
            symbol: symbol.clone(),
            moves: 2,
        },
        ChallengeBody::Freeform { .. } => Answer::Drawing {
            strokes: line.parse().unwrap_or(1),
        },
    }
}

async fn report(
    app: &AppServices,
    player: &Player,
    session: &mut GameSession,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(result) = app.sessions().record_result(player.id(), session).await? else {
        return Ok(());
    };

    println!();
    println!(
        "{} level {}: {} points, {} {}",
        result.game().title(),
        result.level(),
        result.score(),
        "⭐".repeat(usize::from(result.stars())),
        if result.completed() { "(completed)" } else { "(out of time)" },
    );

    let minutes_played = result.time_spent_secs().div_ceil(60);
    let allowance = app
        .parental()
        .record_play_time(player.id(), minutes_played)
        .await?;
    match allowance {
        PlaytimeAllowance::Allowed { remaining_mins } => {
            println!("Play time left today: {remaining_mins} minutes");
        }
        PlaytimeAllowance::Exhausted => {
            println!("Daily play time is used up. See you tomorrow!");
        }
    }
    Ok(())
}

/// Seed a handful of demo rivals so the leaderboard has company.
async fn seed(storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
    let demo: [(&str, &str, &str, u64, u32, u32); 5] = [
        ("Emma the Explorer", "emma@rivals.example", "🧭", 15420, 12, 15),
        ("Max the Magnificent", "max@rivals.example", "🎩", 14850, 11, 12),
        ("Luna the Learner", "luna@rivals.example", "🌙", 13920, 10, 18),
        ("Alex the Achiever", "alex@rivals.example", "🏅", 12750, 9, 8),
        ("Sam the Scholar", "sam@rivals.example", "📚", 11680, 8, 22),
    ];

    let clock = Clock::default_clock();
    for (name, email, avatar, score, level, streak) in demo {
        if storage.players.find_by_email(email).await?.is_some() {
            continue;
        }
        let player = Player::from_persisted(
            PlayerId::random(),
            name,
            email,
            avatar,
            score,
            level,
            streak,
            clock.now(),
            ParentalSettings::default(),
        )?;
        storage.players.upsert_player(&player).await?;
        println!("seeded {name}");
    }
    Ok(())
}

async fn leaderboard(app: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let standings = app.leaderboard().standings(20).await?;
    if standings.is_empty() {
        println!("No players yet. Try `seed` or `play` first.");
        return Ok(());
    }
    println!("{:<4} {:<24} {:>8} {:>6} {:>7} {:>10}", "#", "player", "score", "level", "streak", "completed");
    for entry in standings {
        println!(
            "{:<4} {:<24} {:>8} {:>6} {:>7} {:>10}",
            entry.rank,
            format!("{} {}", entry.avatar, entry.name),
            entry.score,
            entry.level,
            entry.streak,
            entry.completed_levels,
        );
    }
    Ok(())
}

async fn achievements(app: &AppServices, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let Some(player) = app.storage().players.find_by_email(&args.email).await? else {
        println!("no player registered for {}", args.email);
        return Ok(());
    };

    let statuses = app.storage().achievements.load_statuses(player.id()).await?;
    println!("Achievements for {} {}:", player.avatar(), player.name());
    for kind in AchievementKind::ALL {
        let status = statuses.iter().find(|s| s.kind == kind);
        let (progress, unlocked) = status.map_or((0, false), |s| (s.progress, s.unlocked));
        let mark = if unlocked { "🏆" } else { "  " };
        println!(
            "{mark} {:<16} {}/{}  {}",
            kind.title(),
            progress.min(kind.requirement()),
            kind.requirement(),
            kind.description(),
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
