use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use mod_cellar::config::{Settings, SETTINGS_FILE};
use mod_cellar::utils::process::ProcessChecker;
use mod_cellar::{finder, Error, ModManager};
use std::process::ExitCode;
use sysinfo::System;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "modcellar", version, about = "A mod manager for Stardew Valley (SMAPI).")]
struct Cli {
    /// Settings file to read and write
    #[arg(long, default_value = SETTINGS_FILE)]
    config: Utf8PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show local mods and whether each is active in the game
    List,
    /// Copy a .zip mod archive into the local library
    Ingest {
        archive: Utf8PathBuf,
        /// Replace an existing library entry of the same name
        #[arg(long)]
        overwrite: bool,
    },
    /// Copy a local mod into the game's Mods directory
    Enable { name: String },
    /// Remove a mod's copy from the game's Mods directory
    Disable { name: String },
    /// Remove a mod from the local library (disables it first)
    Delete { name: String },
    /// Adopt mods already present in the game's Mods directory
    Import,
    /// Locate SMAPI and write the settings file
    Setup,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.config);

    match run(&cli, &mut settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if let Error::ActiveDirectoryUnavailable(_) = &e {
                eprintln!("run `modcellar setup` to locate the game first");
            }
            if let Error::DisableIncomplete(paths) = &e {
                for path in paths {
                    eprintln!("  still present: {path}");
                }
                if game_is_running(&settings) {
                    eprintln!("the game appears to be running; close it and retry");
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, settings: &mut Settings) -> mod_cellar::Result<()> {
    if let Command::Setup = cli.command {
        return setup(cli, settings);
    }

    let manager = ModManager::new(
        settings.local_mods_path.clone(),
        settings.game_mods_path.clone().unwrap_or_default(),
    );

    match &cli.command {
        Command::List => {
            for status in manager.status()? {
                let state = if status.enabled { "enabled " } else { "disabled" };
                match &status.display_name {
                    Some(display) if *display != status.name => {
                        println!("{state}  {}  ({display})", status.name)
                    }
                    _ => println!("{state}  {}", status.name),
                }
            }
        }
        Command::Ingest { archive, overwrite } => {
            let name = manager.ingest(archive, *overwrite)?;
            println!("ingested '{name}'");
        }
        Command::Enable { name } => {
            manager.enable(name)?;
            println!("enabled '{name}'");
        }
        Command::Disable { name } => {
            manager.disable(name)?;
            println!("disabled '{name}'");
        }
        Command::Delete { name } => {
            manager.delete(name)?;
            println!("deleted '{name}'");
        }
        Command::Import => {
            let report = manager.import_existing()?;
            println!(
                "imported {}, skipped {} already in the library",
                report.imported.len(),
                report.skipped.len()
            );
            for (name, error) in &report.errors {
                eprintln!("  failed to import '{name}': {error}");
            }
            settings.existing_mods_imported = true;
            settings.save(&cli.config)?;
        }
        Command::Setup => unreachable!("handled above"),
    }

    Ok(())
}

fn setup(cli: &Cli, settings: &mut Settings) -> mod_cellar::Result<()> {
    let Some(smapi) = finder::find_smapi() else {
        eprintln!("could not find {} in any known Steam location", finder::RUNTIME_EXE);
        eprintln!("install SMAPI first, or edit {} by hand", cli.config);
        return Ok(());
    };

    let Some(mods_dir) = finder::mods_dir_for(&smapi) else {
        eprintln!("found SMAPI at {smapi} but could not prepare its Mods directory");
        return Ok(());
    };

    settings.set_paths(&smapi, &mods_dir)?;
    settings.save(&cli.config)?;
    println!("SMAPI:        {smapi}");
    println!("game mods:    {mods_dir}");
    println!("local library: {}", settings.local_mods_path);
    Ok(())
}

fn game_is_running(settings: &Settings) -> bool {
    let Some(smapi) = &settings.smapi_path else {
        return false;
    };
    let mut sys = System::new();
    ProcessChecker::is_running(&mut sys, &finder::runtime_process_candidates(smapi))
}
