//! sw2almond CLI
//!
//! Entry point for the `sw2almond` command-line tool.

use chrono::Local;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process;
use tracing::level_filters::LevelFilter;

use sw2almond::paths::{find_almond_dictionary, find_superwhisper_dir, home_dir};
use sw2almond::{
    execute, render_human, ApplyResult, Classifier, Execution, MigrationError, MigrationReport,
    MigrationRequest, Mode, PgrepProbe, Settings, SourceLoader, WriteMode, WriteOutcome,
};

const EXAMPLES: &str = "\
Examples:
  sw2almond                        Preview migration (dry run)
  sw2almond --scan-backups         Include vocabulary from all backups
  sw2almond --apply                Write changes to Almond dictionary
  sw2almond --export merged.json   Export to file instead of Almond
  sw2almond --include-macros       Also migrate text expansion macros";

#[derive(Parser)]
#[command(name = "sw2almond")]
#[command(about = "Migrate SuperWhisper vocabulary to Almond", version, after_help = EXAMPLES)]
struct Cli {
    /// Actually write changes (default is dry-run)
    #[arg(long)]
    apply: bool,

    /// Scan SuperWhisper backup files for additional vocabulary
    #[arg(long)]
    scan_backups: bool,

    /// Include text expansion macros (personal info, URLs, etc.)
    #[arg(long)]
    include_macros: bool,

    /// Path to SuperWhisper data directory
    #[arg(long, value_name = "PATH")]
    sw_path: Option<PathBuf>,

    /// Path to Almond dictionary.json
    #[arg(long, value_name = "PATH")]
    almond_path: Option<PathBuf>,

    /// Export merged dictionary to file instead of writing to Almond
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Output results as JSON (for scripting)
    #[arg(long)]
    json: bool,

    /// Apply even if Almond is running (not recommended)
    #[arg(long)]
    force: bool,

    /// Path to config file (default: ~/.config/sw2almond/config.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Only flags the user actually set, so lower layers keep their values.
    fn overrides(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        if let Some(ref path) = self.sw_path {
            map.insert("superwhisper_path".into(), path.to_string_lossy().into());
        }
        if let Some(ref path) = self.almond_path {
            map.insert("almond_path".into(), path.to_string_lossy().into());
        }
        if self.include_macros {
            map.insert("include_macros".into(), true.into());
        }
        if self.scan_backups {
            map.insert("scan_backups".into(), true.into());
        }
        serde_json::Value::Object(map)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        report_error(&e);
        process::exit(1);
    }
}

fn report_error(e: &MigrationError) {
    match e {
        MigrationError::SourceDirNotFound => {
            eprintln!("Error: Could not find SuperWhisper data directory.");
            eprintln!("  Try: --sw-path ~/Documents/superwhisper");
        }
        MigrationError::ConflictingWriter { process } => {
            eprintln!();
            eprintln!("  WARNING: {} is currently running!", process);
            eprintln!("  Almond may overwrite dictionary.json with its in-memory state,");
            eprintln!("  which would discard the migrated entries.");
            eprintln!();
            eprintln!("  Please quit Almond first, then re-run this command.");
            eprintln!("  (Use --force to apply anyway, at your own risk.)");
            eprintln!();
        }
        other => eprintln!("Error: {}", other),
    }
}

fn run(cli: &Cli) -> Result<(), MigrationError> {
    let home = home_dir();
    let settings = Settings::resolve(cli.config.as_deref(), home.as_deref(), cli.overrides())?;

    let sw_dir = settings
        .superwhisper_path
        .clone()
        .or_else(|| home.as_deref().and_then(find_superwhisper_dir))
        .ok_or(MigrationError::SourceDirNotFound)?;

    let almond_path = match (&settings.almond_path, &home) {
        (Some(path), _) => path.clone(),
        (None, Some(home)) => find_almond_dictionary(home),
        (None, None) => {
            return Err(MigrationError::Config(sw2almond::ConfigError::Invalid(
                "HOME is not set; pass --almond-path".to_string(),
            )))
        }
    };

    if !cli.json {
        println!("  SuperWhisper data: {}", sw_dir.display());
        println!("  Almond dictionary: {}", almond_path.display());
    }

    let loader = SourceLoader::new(&sw_dir).with_backups(settings.scan_backups);
    let classifier = Classifier::new(&settings.classifier_config());
    let probe = PgrepProbe::new(settings.app_process_pattern.as_str());
    let request = MigrationRequest {
        loader: &loader,
        target: &almond_path,
        classifier: &classifier,
        include_macros: settings.include_macros,
        mode: WriteMode::from_flags(cli.apply, cli.force, cli.export.clone()),
    };

    let (plan, write) = match execute(&request, &probe, Local::now())? {
        Execution::NothingToMigrate { .. } => {
            status(cli.json, "\n  No vocabulary or replacements found in SuperWhisper.");
            return Ok(());
        }
        Execution::Completed { plan, write } => (plan, write),
    };

    if cli.json {
        let json = MigrationReport::from_plan(&plan)
            .to_json()
            .map_err(MigrationError::Report)?;
        println!("{}", json);
    } else {
        let mode = if cli.apply { Mode::Applied } else { Mode::DryRun };
        println!("{}", render_human(&plan, mode));
    }

    match write {
        WriteOutcome::DryRun => {}
        WriteOutcome::Exported(destination) => {
            status(cli.json, &format!("  Exported to: {}", destination.display()));
        }
        WriteOutcome::Applied(ApplyResult::Unchanged) => {
            status(
                cli.json,
                "  Nothing to change, Almond dictionary is already up to date.",
            );
        }
        WriteOutcome::Applied(ApplyResult::Written { path, backup }) => {
            if let Some(backup) = backup {
                status(cli.json, &format!("  Backup created: {}", backup.display()));
            }
            status(cli.json, &format!("  Dictionary written to: {}", path.display()));
            status(cli.json, "");
            status(cli.json, "  Restart Almond to pick up the new vocabulary.");
        }
    }

    Ok(())
}

/// Progress lines go to stderr in JSON mode so stdout stays parseable.
fn status(json: bool, message: &str) {
    if json {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}
