mod config;
mod error;
mod logging;
mod render;
mod session;

use clap::{Parser, Subcommand};
use config::Settings;
use render::ColorMode;
use error::CliError;
use rr_core::RoadRemote;
use rr_core::dashboards::Role;
use rr_core::seed::apply_seed;
use rr_core::types::VolunteerId;
use rr_db::DbStore;
use rr_events::bus::EventBus;
use session::Session;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rr", about = "Roadside assistance dashboards for garages and volunteers")]
struct Cli {
    /// Seed file (.toml, .yaml or .yml). Defaults to $ROADREMOTE_SEED, then the demo data.
    #[arg(long, global = true)]
    seed: Option<PathBuf>,
    /// Volunteer profile shown on the volunteer dashboard.
    #[arg(long, global = true)]
    volunteer: Option<String>,
    /// Style output with ANSI colors when stdout supports them.
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the garage dashboard.
    Garage,
    /// Print the volunteer dashboard and stats.
    Volunteer,
    /// Print open requests from the driver's side.
    Driver { name: Option<String> },
    /// Run dashboard commands from a script or stdin against one store.
    Session {
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::resolve(cli.seed, cli.volunteer)?;
    let (core, active_volunteer) = open(&settings)?;
    core.subscribe(|record| {
        tracing::debug!(seq = record.seq, kind = record.kind(), source = ?record.source, "event committed");
    });

    let stdout = io::stdout();
    let mut session = Session::new(&core, active_volunteer, stdout.lock()).with_color(cli.color);
    match cli.command {
        Command::Garage => session.show(Role::Garage, None)?,
        Command::Volunteer => session.show(Role::Volunteer, None)?,
        Command::Driver { name } => session.show(Role::Driver, name)?,
        Command::Session { script } => {
            let summary = match script {
                Some(path) => {
                    let file = File::open(&path).map_err(|err| {
                        CliError::command(format!("cannot open script {}: {err}", path.display()))
                    })?;
                    session.run(BufReader::new(file))?
                }
                None => {
                    eprintln!("type `help` for commands, `quit` to leave");
                    session.run(io::stdin().lock())?
                }
            };
            tracing::info!(
                commands = summary.commands,
                failures = summary.failures,
                "session finished"
            );
        }
    }
    Ok(())
}

fn open(settings: &Settings) -> Result<(RoadRemote<DbStore>, Option<VolunteerId>), CliError> {
    let seed = settings.load_seed()?;
    let store = DbStore::in_memory().map_err(|err| CliError::Store {
        message: err.to_string(),
    })?;
    let core = RoadRemote::new(store, EventBus::new(settings.bus_capacity));
    apply_seed(&core, &seed)?;
    let active = settings.volunteer.clone().or(seed.active_volunteer);
    Ok((core, active))
}
