use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uvlens_core::*;

#[derive(Parser)]
#[command(name = "uvlens")]
#[command(about = "Personal UV exposure risk and sun protection advice", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default one
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save your skin and behaviour profile
    Setup {
        /// Skin type 0-4 (0 = always burns, 4 = never burns)
        #[arg(long)]
        skin_type: Option<usize>,

        /// Sunscreen 0-3 (none, SPF 15-29, SPF 30-49, SPF 50+)
        #[arg(long)]
        sunscreen: Option<usize>,

        /// Time outdoors 0-4 (<30m, 30-60m, 1-2h, 2-3h, >3h)
        #[arg(long)]
        time_outdoors: Option<usize>,

        /// Environment 0-4 (shady, mixed, sunny, water/sand, snow)
        #[arg(long)]
        environment: Option<usize>,
    },

    /// Show the saved profile
    Profile,

    /// Assess current UV risk (default)
    Check {
        /// Current UV index; skips the weather lookup
        #[arg(long, allow_negative_numbers = true)]
        uv: Option<f64>,

        /// Hourly UV forecast, comma separated (e.g. 7.5,8.2)
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        forecast: Vec<f64>,

        /// Latitude for the weather lookup
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude for the weather lookup
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,

        /// Wait and remind when sunscreen is due again
        #[arg(long)]
        remind: bool,
    },

    /// Remind me to reapply sunscreen after a delay
    Remind {
        /// Minutes until the reminder
        #[arg(long)]
        minutes: u32,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    uvlens_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_retryable() {
                eprintln!("(retry may succeed)");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Setup {
            skin_type,
            sunscreen,
            time_outdoors,
            environment,
        }) => cmd_setup(&data_dir, skin_type, sunscreen, time_outdoors, environment),
        Some(Commands::Profile) => cmd_profile(&data_dir),
        Some(Commands::Check {
            uv,
            forecast,
            lat,
            lon,
            json,
            remind,
        }) => cmd_check(
            &data_dir,
            &config,
            CheckOptions {
                uv,
                forecast,
                lat,
                lon,
                json,
                remind,
            },
        ),
        Some(Commands::Remind { minutes }) => cmd_remind(&config, minutes),
        None => {
            // Default to "check" command
            cmd_check(&data_dir, &config, CheckOptions::default())
        }
    }
}

fn cmd_setup(
    data_dir: &Path,
    skin_type: Option<usize>,
    sunscreen: Option<usize>,
    time_outdoors: Option<usize>,
    environment: Option<usize>,
) -> Result<()> {
    let store = JsonProfileStore::in_data_dir(data_dir);

    // Single fields can only be edited on an existing profile
    let existing = match store.load() {
        Ok(existing) => existing,
        Err(e) => {
            tracing::warn!("Replacing unreadable profile: {}", e);
            None
        }
    };

    let profile = match existing {
        Some(base) => Profile {
            skin_type: skin_type.unwrap_or(base.skin_type),
            sunscreen_usage: sunscreen.unwrap_or(base.sunscreen_usage),
            time_outdoors: time_outdoors.unwrap_or(base.time_outdoors),
            environment: environment.or(base.environment),
        },
        None => match (skin_type, sunscreen, time_outdoors) {
            (Some(skin_type), Some(sunscreen_usage), Some(time_outdoors)) => Profile {
                skin_type,
                sunscreen_usage,
                time_outdoors,
                environment,
            },
            _ => {
                eprintln!("Profile validation errors:");
                for (flag, value) in [
                    ("--skin-type", skin_type),
                    ("--sunscreen", sunscreen),
                    ("--time-outdoors", time_outdoors),
                ] {
                    if value.is_none() {
                        eprintln!("  - Missing {} (required for a new profile)", flag);
                    }
                }
                return Err(Error::Other("Invalid profile".into()));
            }
        },
    };

    let errors = profile.validate();
    if !errors.is_empty() {
        eprintln!("Profile validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Other("Invalid profile".into()));
    }

    store.save(&profile)?;
    tracing::info!("Profile saved to {:?}", store.path());

    println!("✓ Profile saved!");
    display_profile(&profile);
    Ok(())
}

fn cmd_profile(data_dir: &Path) -> Result<()> {
    let store = JsonProfileStore::in_data_dir(data_dir);
    match store.load()? {
        Some(profile) => display_profile(&profile),
        None => println!("No profile yet. Run `uvlens setup` to create one."),
    }
    Ok(())
}

#[derive(Default)]
struct CheckOptions {
    uv: Option<f64>,
    forecast: Vec<f64>,
    lat: Option<f64>,
    lon: Option<f64>,
    json: bool,
    remind: bool,
}

fn cmd_check(data_dir: &Path, config: &Config, opts: CheckOptions) -> Result<()> {
    let store = JsonProfileStore::in_data_dir(data_dir);
    let profile = store.load()?.ok_or_else(|| {
        Error::Other("No profile found. Run `uvlens setup` first.".into())
    })?;

    // An explicit reading means no network access at all
    let (current_uv, snapshot) = match opts.uv {
        Some(uv) => (uv, None),
        None => {
            let location = FixedLocation::resolve(opts.lat, opts.lon, &config.location).locate()?;
            let provider = OpenWeatherProvider::new(&config.weather)?;
            let snapshot = provider.current(&location)?;
            (snapshot.uv_index, Some(snapshot))
        }
    };

    let assessment = assess(&profile, current_uv, &opts.forecast, &config.assessment);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        display_report(current_uv, snapshot.as_ref(), &assessment);
    }

    if opts.remind {
        match assessment.protection.reapply_time {
            Some(minutes) => {
                let scheduler = TerminalReminder::from_config(&config.reminders);
                wait_for_reminder(&scheduler, minutes)?;
            }
            None => println!("No reapplication reminder needed at this risk level."),
        }
    }

    Ok(())
}

fn cmd_remind(config: &Config, minutes: u32) -> Result<()> {
    let scheduler = TerminalReminder::from_config(&config.reminders);
    wait_for_reminder(&scheduler, minutes)
}

fn wait_for_reminder(scheduler: &dyn ReminderScheduler, minutes: u32) -> Result<()> {
    let reminder = scheduler.schedule(minutes)?;
    println!(
        "⏰ Reminder set for {} ({} min). Leave this running.",
        reminder.due_at().format("%H:%M"),
        reminder.minutes()
    );
    reminder.wait()
}

fn display_profile(profile: &Profile) {
    let skin = tables::skin_type(profile.skin_type);
    let spf = tables::spf_value(profile.sunscreen_usage);
    let minutes = tables::planned_minutes(profile.time_outdoors);
    let environment = tables::environment(profile.environment_index());

    println!();
    match skin {
        Some(s) => println!("  Skin type:      {} ({})", s.ordinal, s.description),
        None => println!("  Skin type:      unknown ({})", profile.skin_type),
    }
    match spf {
        Some(v) if v > tables::NO_SUNSCREEN_SPF => println!("  Sunscreen:      SPF {}", v),
        Some(_) => println!("  Sunscreen:      none"),
        None => println!("  Sunscreen:      unknown ({})", profile.sunscreen_usage),
    }
    match minutes {
        Some(m) => println!("  Time outdoors:  ~{} min", m),
        None => println!("  Time outdoors:  unknown ({})", profile.time_outdoors),
    }
    match environment {
        Some(e) => println!("  Environment:    {} (x{})", e.kind, e.reflection_factor),
        None => println!("  Environment:    unknown ({})", profile.environment_index()),
    }
    println!();
}

fn display_report(current_uv: f64, snapshot: Option<&WeatherSnapshot>, assessment: &Assessment) {
    let protection = &assessment.protection;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} RISK", protection.level.to_string().to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!();

    if let Some(s) = snapshot {
        let place = match (&s.place, &s.country) {
            (Some(p), Some(c)) => format!("{}, {}", p, c),
            (Some(p), None) => p.clone(),
            _ => "Current location".to_string(),
        };
        println!("  {} · {:.0}°C · {}", place, s.temperature_c, s.description);
    }
    println!("  UV index:        {:.1} ({})", current_uv, uv_index_band(current_uv));
    println!("  Score:           {}/100", protection.score);
    println!("  Time to burn:    {}", format_minutes(protection.safe_exposure_time));
    println!("  Vitamin D time:  {}", format_minutes(assessment.vitamin_d_time));
    if let Some(minutes) = protection.reapply_time {
        println!("  🧴 Reapply sunscreen every {}h", f64::from(minutes) / 60.0);
    }
    let t = &assessment.thresholds;
    println!(
        "  Your alerts:     safe < {} · caution < {} · danger ≥ {}",
        t.safe, t.caution, t.danger
    );

    println!();
    println!("  Recommendations");
    for rec in &protection.recommendations {
        println!("  → {}", rec);
    }
    println!();
}
