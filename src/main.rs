use building_check::{cli, config, error, interactive, logging};
use building_check_common::{checkpoint, Error as CommonError, Session};
use chrono::{DateTime, Local};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?.with_overrides(cli.dir.clone(), cli.floors.clone());

    if let Commands::Config { show, set_floors, set_dir } = &cli.command {
        let mut stored = Config::load()?;
        if let Some(path) = set_floors {
            stored.floors_file = path.clone();
            stored.save()?;
            println!("✔ Floor plan set: {}", stored.floors_file.display());
        }
        if let Some(path) = set_dir {
            stored.work_dir = path.clone();
            stored.save()?;
            println!("✔ Working directory set: {}", stored.work_dir.display());
        }
        if *show {
            println!("Settings:");
            println!("  Config file: {}", Config::config_path()?.display());
            println!("  Working directory: {}", stored.work_dir.display());
            println!("  Floor plan: {}", stored.floors_file.display());
            println!("  Log file: {}", stored.log_file.display());
            println!("  Log level: {}", stored.log_level);
        }
        return Ok(());
    }

    logging::init_logging(&config.log_path(), &config.log_level, cli.verbose)?;
    let mut session = Session::open(&config.work_dir, &config.floors_path());
    if session.plan().is_empty() {
        println!("⚠ No floors loaded from {}", config.floors_path().display());
    }

    match cli.command {
        Commands::New => {
            let log_path = session.start_new(Local::now().date_naive());
            println!("✔ New check started: {}", log_path.display());
            interactive::run_walkthrough(&mut session)?;
        }

        Commands::Resume => match session.resume() {
            Ok(log_path) => {
                println!("✔ Resumed: {}", log_path.display());
                interactive::run_walkthrough(&mut session)?;
            }
            Err(e @ CommonError::NoSessionFound(_)) => {
                log::warn!("{}", e);
                println!("No previous check found. Ensure check files exist in the working directory.");
            }
            Err(e) => return Err(e.into()),
        },

        Commands::Record { room, item, index, status } => {
            session.resume()?;
            session.record_status(&room, &item, index, status.as_str())?;
            println!("✔ {} / {} {}: {}", room, item, index + 1, status);
        }

        Commands::Notes { room, item, index, text } => {
            session.resume()?;
            session.record_notes(&room, &item, index, &text)?;
            println!("✔ Notes saved for {} / {} {}", room, item, index + 1);
        }

        Commands::Summary { room } => {
            session.resume()?;
            let summary = session.summarize(&room)?;
            if let Some(progress) = session.state().progress(&room) {
                println!("Room {}: {}", summary.room, progress);
            }
            for entry in &summary.entries {
                if entry.notes.is_empty() {
                    println!("  {}", entry);
                } else {
                    println!("  {}  - {}", entry, entry.notes);
                }
            }
        }

        Commands::Floors => {
            if let Err(e) = session.resume() {
                log::warn!("{}", e);
                println!("(no saved check, showing an empty checklist)");
            }
            let floors: Vec<String> = session.floors().map(str::to_string).collect();
            for floor in floors {
                println!("Floor {}", floor);
                for status in session.select_floor(&floor)? {
                    println!("  Room {}: {}", status.room, status.progress);
                }
            }
        }

        Commands::Sessions => {
            let sessions = checkpoint::list_sessions(&config.work_dir);
            if sessions.is_empty() {
                println!("No check files in {}", config.work_dir.display());
            }
            for entry in sessions {
                let modified: DateTime<Local> = entry.modified.into();
                println!(
                    "  {}  (modified {})",
                    entry.path.display(),
                    modified.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}
