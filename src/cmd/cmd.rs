use std::{
    fs,
    path::{Path, PathBuf},
    process::exit,
};

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{
    config::{CONFIG_FILE, Config, DEFAULT_CONFIG_TOML, load_config_file},
    parser::parse_with_config,
    types::{TypeContext, TypeId},
};

#[derive(Parser)]
#[command(author, version, about = "Parse compact type specifications", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Parse specifications and print the resulting types
    Parse { specs: Vec<String> },
    /// Parse specifications and print their canonical encoding
    Spec { specs: Vec<String> },
    /// Write a default config file
    Init,
}

pub fn run() {
    init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return;
    };

    if let Err(err) = run_command(command, &cli.config) {
        println!("{}", err);
        exit(1);
    }
}

fn init_logger() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(command: Command, config_path: &Path) -> Result<(), String> {
    match command {
        Command::Init => typespec_init(config_path),
        Command::Parse { specs } => {
            let config = load_config_file(config_path)?;
            for_each_spec(&specs, &config, |ctx, ty| Ok(ctx.to_string(ty)))
        }
        Command::Spec { specs } => {
            let config = load_config_file(config_path)?;
            for_each_spec(&specs, &config, |ctx, ty| {
                ctx.to_spec(ty).map_err(|err| err.to_string())
            })
        }
    }
}

/// Parse every spec into its own context and print the result of `show`.
/// Stops at the first failing spec.
fn for_each_spec<S>(specs: &[String], config: &Config, show: S) -> Result<(), String>
where
    S: Fn(&TypeContext, TypeId) -> Result<String, String>,
{
    for spec in specs {
        let mut ctx = TypeContext::new();
        let ty = parse_with_config(&mut ctx, spec, config).map_err(|err| err.to_string())?;
        println!("{}", show(&ctx, ty)?);
    }
    Ok(())
}

fn typespec_init(path: &Path) -> Result<(), String> {
    if fs::exists(path).unwrap_or(false) {
        println!("File {} already exists", path.display());
        return Ok(());
    }

    fs::write(path, DEFAULT_CONFIG_TOML)
        .map_err(|err| format!("error: failed to write file {}: {}", path.display(), err))?;
    println!("Created {}", path.display());
    Ok(())
}
