use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use fscap::collectors::du::{self, DuOptions, DuUnits};
use fscap::config::{self, Config, Overrides};
use fscap::util::{log_file, report};
use fscap::{pipeline, SystemProbe};
use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fscap", about = "Check filesystem block and inode usage against thresholds", version)]
struct Cli {
    /// Mount points to check (replaces [check].targets from the config file)
    targets: Vec<String>,

    /// Config file (default: ~/.config/fscap/fscap.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disk usage percentage at or above which a check warns
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    disk_threshold: Option<u8>,

    /// Inode usage percentage at or above which a check warns
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    inode_threshold: Option<u8>,

    /// df column holding the disk usage percentage
    #[arg(long)]
    disk_label: Option<String>,

    /// df column holding the inode usage percentage
    #[arg(long)]
    inode_label: Option<String>,

    /// Status log file, truncated on each run ("-" = stdout)
    #[arg(short, long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Exit 0=OK, 1=WARNING, 2=ERROR after writing the log or JSON (nagios/cron compatible)
    #[arg(long)]
    check: bool,

    /// Print results as JSON instead of the status log
    #[arg(long)]
    json: bool,

    /// Print the per-directory size table for DIR and exit (repeatable)
    #[arg(long, value_name = "DIR")]
    du: Vec<PathBuf>,

    /// Units for --du
    #[arg(long, value_enum)]
    du_units: Option<DuUnits>,

    /// Limit --du to this many directory levels
    #[arg(long, value_name = "N")]
    du_depth: Option<u32>,

    /// Print config file path and effective values, then exit
    #[arg(long)]
    show_config: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,

    /// More diagnostics on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors on stderr
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "fscap", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);

    let mut cfg = Config::load(cli.config.as_deref())?;
    cfg.apply(&overrides(&cli));
    cfg.validate()?;

    if cli.show_config {
        return run_print_config(&cfg, cli.config);
    }
    if !cli.du.is_empty() {
        return run_du(&cfg, &cli.du);
    }
    if cfg.check.targets.is_empty() {
        bail!("no filesystems to check: pass mount points or set [check].targets in the config file");
    }
    let code = if cli.json { run_json(&cfg)? } else { run_log(&cfg)? };
    if cli.check {
        std::process::exit(code);
    }
    Ok(())
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        targets:         cli.targets.clone(),
        disk_threshold:  cli.disk_threshold,
        inode_threshold: cli.inode_threshold,
        disk_label:      cli.disk_label.clone(),
        inode_label:     cli.inode_label.clone(),
        log_path:        cli.log.clone(),
        du_units:        cli.du_units,
        du_depth:        cli.du_depth,
    }
}

fn run_log(cfg: &Config) -> Result<i32> {
    let results = pipeline::collect_configured(&SystemProbe, cfg);
    let lines = report::render(&results, &cfg.thresholds, &cfg.labels);
    let dest = log_file::Destination::from_path(cfg.output.log_path.as_deref());
    log_file::write_log(&dest, &lines)?;
    if let log_file::Destination::File(path) = &dest {
        info!("wrote {} line(s) to {}", lines.len(), path.display());
    }
    Ok(report::exit_code(&lines))
}

fn run_json(cfg: &Config) -> Result<i32> {
    let results = pipeline::collect_configured(&SystemProbe, cfg);
    let v = report::to_json(&results, &cfg.thresholds, &cfg.labels);
    println!("{}", serde_json::to_string_pretty(&v)?);
    Ok(report::exit_code(&report::render(&results, &cfg.thresholds, &cfg.labels)))
}

fn run_du(cfg: &Config, dirs: &[PathBuf]) -> Result<()> {
    let opts = DuOptions { units: cfg.du.units, max_depth: cfg.du.max_depth };
    let results = du::read_all(&SystemProbe, &cfg.commands.du, dirs, opts);
    for row in du::render_rows(&results) {
        println!("{}", row);
    }
    Ok(())
}

fn run_print_config(cfg: &Config, explicit: Option<PathBuf>) -> Result<()> {
    let path = explicit
        .or_else(config::Config::config_path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("# Config: {}", path);
    println!();
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}

/// Default is WARN; `-v` DEBUG, `-vv` TRACE, `-q` ERROR. RUST_LOG still applies.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
