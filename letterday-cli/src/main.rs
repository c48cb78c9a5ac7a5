mod config;
mod logging;
mod watch;

use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use jiff::civil::{Date, DateTime};
use jiff::Zoned;
use letterday::event::ordinal;
use letterday::{Division, LunchOption, Meeting, Period};

use crate::config::{Preferences, Settings, DEFAULT_CONFIG_FILE};
use crate::watch::ReminderGuard;

/// Most meetings `next -n` will list.
const MAX_MEETINGS: usize = 200;

#[derive(Parser)]
#[command(
    name = "letterday",
    about = "Which class meets when under a letter-day rotation",
    version
)]
struct Cli {
    /// Preferences file (JSON) with period, division, lunch and epoch
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// School division: upper or middle
    #[arg(long, global = true)]
    division: Option<Division>,

    /// Lunch option: first, second, grade6, grade7 or grade8
    #[arg(long, global = true)]
    lunch: Option<LunchOption>,

    /// First A day of the rotation (YYYY-MM-DD)
    #[arg(long, global = true)]
    epoch: Option<Date>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Letter day and block list for a date (default today)
    Day {
        date: Option<Date>,
    },

    /// Upcoming meetings of a period
    Next {
        period: Option<Period>,

        /// Search after this date instead of today
        #[arg(long)]
        from: Option<Date>,

        /// Number of meetings to show
        #[arg(short, long, default_value = "1")]
        n: usize,
    },

    /// Homework appointment for the meeting after the one on a date
    Event {
        period: Option<Period>,

        /// Date the homework is assigned (default today)
        #[arg(long)]
        on: Option<Date>,
    },

    /// Blocks whose end-of-class reminder fires at a given minute
    Reminders {
        /// Local date and time, e.g. 2025-08-15T09:25
        #[arg(long)]
        at: DateTime,

        /// Only report this period
        #[arg(long)]
        period: Option<Period>,

        /// Minutes before the end of a block
        #[arg(long)]
        minutes: Option<i64>,
    },

    /// Poll the clock and print each reminder as it comes due
    Watch {
        /// Seconds between polls
        #[arg(long, default_value = "20")]
        interval: u64,

        /// Only report this period
        #[arg(long)]
        period: Option<Period>,

        /// Minutes before the end of a block
        #[arg(long)]
        minutes: Option<i64>,
    },

    /// Manage the preferences file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a preferences file from the given flags
    Init {
        /// Default period for next, event and watch
        #[arg(long)]
        period: Option<Period>,

        /// Minutes before the end of a block to remind
        #[arg(long)]
        minutes: Option<i64>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the resolved preferences
    Show,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

fn today() -> Date {
    Zoned::now().date()
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => fail(format!("failed to serialize: {e}")),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // `config init` creates the file, so there is nothing to read yet.
    let initializing = matches!(
        cli.command,
        Command::Config {
            action: ConfigAction::Init { .. }
        }
    );
    let file = if initializing {
        Preferences::default()
    } else {
        match Preferences::load_optional(cli.config.as_deref()) {
            Ok(p) => p,
            Err(e) => fail(e),
        }
    };
    let flags = Preferences {
        division: cli.division,
        lunch: cli.lunch,
        epoch: cli.epoch,
        period: command_period(&cli.command),
        reminder_minutes: command_minutes(&cli.command),
    };
    let prefs = file.merge(flags);

    let settings = match prefs.resolve() {
        Ok(s) => s,
        Err(e) => fail(e),
    };
    tracing::debug!(
        division = settings.calendar.division.as_str(),
        lunch = settings.lunch.as_str(),
        epoch = %settings.calendar.epoch,
        "resolved settings"
    );

    match cli.command {
        Command::Day { date } => run_day(&settings, date.unwrap_or_else(today), cli.json),
        Command::Next { from, n, .. } => {
            let period = require_period(&settings);
            run_next(&settings, period, from.unwrap_or_else(today), n, cli.json);
        }
        Command::Event { on, .. } => {
            let period = require_period(&settings);
            run_event(&settings, period, on.unwrap_or_else(today), cli.json);
        }
        Command::Reminders { at, .. } => run_reminders(&settings, at, cli.json),
        Command::Watch { interval, .. } => run_watch(&settings, interval.max(1)),
        Command::Config { action } => {
            run_config(&action, &prefs, &settings, cli.config.as_deref(), cli.json)
        }
    }
}

fn command_period(command: &Command) -> Option<Period> {
    match command {
        Command::Next { period, .. }
        | Command::Event { period, .. }
        | Command::Reminders { period, .. }
        | Command::Watch { period, .. } => *period,
        Command::Config {
            action: ConfigAction::Init { period, .. },
        } => *period,
        _ => None,
    }
}

fn command_minutes(command: &Command) -> Option<i64> {
    match command {
        Command::Reminders { minutes, .. } | Command::Watch { minutes, .. } => *minutes,
        Command::Config {
            action: ConfigAction::Init { minutes, .. },
        } => *minutes,
        _ => None,
    }
}

fn require_period(settings: &Settings) -> Period {
    match settings.period {
        Some(p) => p,
        None => {
            eprintln!("error: no period given and none saved in the preferences file");
            process::exit(2);
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct DayReport<'a> {
    date: Date,
    label: letterday::RotationLabel,
    school_day: bool,
    division: Division,
    lunch: LunchOption,
    meetings: &'a [Meeting],
}

fn run_day(settings: &Settings, date: Date, json: bool) {
    let calendar = &settings.calendar;
    let label = calendar.letter_day(date);
    let meetings = calendar.day_schedule(date, settings.lunch);

    if json {
        print_json(&DayReport {
            date,
            label,
            school_day: !meetings.is_empty(),
            division: calendar.division,
            lunch: settings.lunch,
            meetings: &meetings,
        });
        return;
    }

    if meetings.is_empty() {
        println!("{date} no classes (weekend)");
        return;
    }
    println!(
        "{date} {label} day ({} school, {} lunch)",
        calendar.division, settings.lunch
    );
    for m in &meetings {
        println!("  {} block  period {}  {}", ordinal(m.block_number()), m.period, m.slot);
    }
}

fn run_next(settings: &Settings, period: Period, from: Date, n: usize, json: bool) {
    let mut n = n;
    if n > MAX_MEETINGS {
        eprintln!("warning: capped at {MAX_MEETINGS} meetings");
        n = MAX_MEETINGS;
    }

    let results = match settings
        .calendar
        .meetings(period, from, settings.lunch)
        .take(n)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(r) => r,
        Err(e) => fail(e),
    };

    if json {
        print_json(&results);
    } else {
        for m in &results {
            println!("{m}");
        }
    }
}

fn run_event(settings: &Settings, period: Period, on: Date, json: bool) {
    let calendar = &settings.calendar;
    let Some(current) = calendar.meeting_on(period, on, settings.lunch) else {
        fail(format!(
            "period {period} does not meet on {on} ({} day)",
            calendar.letter_day(on)
        ));
    };
    let event = match calendar.homework_event(&current, settings.lunch) {
        Ok(e) => e,
        Err(e) => fail(e),
    };

    if json {
        print_json(&event);
        return;
    }
    println!("subject: {}", event.subject);
    println!("start:   {}", event.start);
    println!("end:     {}", event.end);
    println!("alarm:   {}", event.alarm_at());
    if !event.body.is_empty() {
        println!("body:    {}", event.body);
    }
}

fn run_reminders(settings: &Settings, at: DateTime, json: bool) {
    let due: Vec<Meeting> = settings
        .calendar
        .reminders_due(at, settings.lunch, settings.reminder_minutes)
        .into_iter()
        .filter(|m| settings.period.map_or(true, |p| p == m.period))
        .collect();

    if json {
        print_json(&due);
        return;
    }
    if due.is_empty() {
        eprintln!("no reminders due");
        return;
    }
    for m in &due {
        print_reminder(m, settings.reminder_minutes);
    }
}

fn print_reminder(m: &Meeting, minutes: i64) {
    println!(
        "{} period {} ends in {minutes} min ({} block, {} day, ends {})",
        m.reminder_at(minutes).time().strftime("%H:%M"),
        m.period,
        ordinal(m.block_number()),
        m.label,
        m.slot.end().strftime("%H:%M"),
    );
}

fn run_watch(settings: &Settings, interval: u64) {
    tracing::info!(interval, "watching for reminders");
    let mut guard = ReminderGuard::new();
    loop {
        let now = Zoned::now().datetime();
        for m in guard.poll(settings, now) {
            print_reminder(&m, settings.reminder_minutes);
        }
        thread::sleep(Duration::from_secs(interval));
    }
}

fn run_config(
    action: &ConfigAction,
    prefs: &Preferences,
    settings: &Settings,
    path: Option<&Path>,
    json: bool,
) {
    match action {
        ConfigAction::Init { force, .. } => {
            let path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
            if let Err(e) = prefs.save(&path, *force) {
                fail(e);
            }
            println!("wrote {}", path.display());
        }
        ConfigAction::Show => {
            if json {
                print_json(&Preferences {
                    period: settings.period,
                    division: Some(settings.calendar.division),
                    lunch: Some(settings.lunch),
                    epoch: Some(settings.calendar.epoch),
                    reminder_minutes: Some(settings.reminder_minutes),
                });
                return;
            }
            println!("division:         {}", settings.calendar.division);
            println!("lunch:            {}", settings.lunch);
            match settings.period {
                Some(p) => println!("period:           {p}"),
                None => println!("period:           (none)"),
            }
            println!("epoch:            {}", settings.calendar.epoch);
            println!("reminder minutes: {}", settings.reminder_minutes);
        }
    }
}
