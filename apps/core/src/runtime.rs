use std::io::{BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::config::{self, Config, ConfigError};
use crate::contract::{CoreResponse, EventResponse};
use crate::controller::{initialize, Effect};
use crate::kv_store::{open_from_config, SqliteBackend};
use crate::logging;
use crate::model::SwitcherContext;
use crate::preferences::{MemoryBackend, PreferenceBackend, PreferenceStore};
use crate::transport::{handle_json, TransportResponse};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read payload {}: {source}", path.display())]
    Payload {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub payload_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub memory_store: bool,
    pub no_trigger: bool,
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--payload" => {
                let value = iter.next().ok_or("--payload requires a path")?;
                options.payload_path = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = iter.next().ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--memory-store" => options.memory_store = true,
            "--no-trigger" => options.no_trigger = true,
            other => {
                if let Some(value) = other.strip_prefix("--payload=") {
                    options.payload_path = Some(PathBuf::from(value));
                } else if let Some(value) = other.strip_prefix("--config=") {
                    options.config_path = Some(PathBuf::from(value));
                } else {
                    return Err(format!("unknown argument: {other}"));
                }
            }
        }
    }
    Ok(options)
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with_io(options, stdin.lock(), stdout.lock())
}

/// Stdout carries only JSON responses; diagnostics go to the log file.
pub fn run_with_io<R, W>(options: RuntimeOptions, input: R, output: W) -> Result<(), RuntimeError>
where
    R: BufRead,
    W: Write,
{
    let cfg = config::load(options.config_path.as_deref())?;
    match logging::init(&cfg.log_dir, logging::level_from_env()) {
        Ok(path) => log::info!("logging to {}", path.display()),
        Err(error) => eprintln!("[siteswitch-core] file logging disabled: {error}"),
    }

    let raw = match &options.payload_path {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|source| {
            RuntimeError::Payload {
                path: path.clone(),
                source,
            }
        })?),
        None => None,
    };

    let Some(context) = SwitcherContext::bootstrap(raw.as_deref()) else {
        log::info!("no multisite payload; switcher not initialized");
        return Ok(());
    };
    log::info!(
        "startup sites={} user_id={} shortcut={} store={} sites_route={}",
        context.sites.len(),
        context.user_id,
        cfg.shortcut,
        if options.memory_store { "memory" } else { "sqlite" },
        cfg.sites_route(),
    );

    let prefs = PreferenceStore::new(
        open_backend(&cfg, options.memory_store),
        &cfg.storage_prefix,
        cfg.recent_capacity,
    );
    serve(context, prefs, &cfg, !options.no_trigger, input, output)
}

/// Mounts a switcher and answers one JSON request per input line until EOF.
/// The first output line carries the mount effects.
pub fn serve<B, R, W>(
    context: SwitcherContext,
    prefs: PreferenceStore<B>,
    cfg: &Config,
    trigger_present: bool,
    input: R,
    mut output: W,
) -> Result<(), RuntimeError>
where
    B: PreferenceBackend,
    R: BufRead,
    W: Write,
{
    let Some((mut switcher, mounted)) = initialize(Some(context), prefs, cfg, trigger_present)
    else {
        return Ok(());
    };
    write_effects(&mut output, mounted)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(output, "{}", handle_json(&mut switcher, &line))?;
        output.flush()?;
    }

    let released = switcher.unmount();
    log::info!("input closed; released {} listeners", released.len());
    write_effects(&mut output, released)?;
    Ok(())
}

fn write_effects<W: Write>(output: &mut W, effects: Vec<Effect>) -> Result<(), RuntimeError> {
    let response = TransportResponse::Ok {
        response: CoreResponse::Event(EventResponse {
            effects,
            view: None,
        }),
    };
    let encoded = serde_json::to_string(&response)
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))?;
    writeln!(output, "{encoded}")?;
    output.flush()?;
    Ok(())
}

/// Preferences are best-effort; an unopenable store degrades to memory.
fn open_backend(cfg: &Config, memory_store: bool) -> Box<dyn PreferenceBackend> {
    if memory_store {
        return Box::new(MemoryBackend::default());
    }
    match open_from_config(cfg) {
        Ok(db) => Box::new(SqliteBackend::new(db)),
        Err(error) => {
            log::warn!(
                "preferences store {} unavailable, using memory: {error}",
                cfg.preferences_path.display()
            );
            Box::new(MemoryBackend::default())
        }
    }
}
