#![deny(warnings)]

//! Headless host: loads the save, settles offline time and dispatches
//! commands against the progression engine.

mod config;

use anyhow::{bail, Context, Result};
use chrono::{Local, TimeZone, Utc};
use config::CliConfig;
use persistence::{default_save_dir, load_or_default, to_portable_string, AutoSaver, FileStore};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xiuzhen_core::{validate_state, GameState};
use xiuzhen_engine::{Command, Engine};

const USAGE: &str = "usage: xiuzhen-cli [--config FILE] [--save-dir DIR] \
<status [--json]|tick|export|import STRING|apply JSON|run SECS|reset>";

/// Journal lines shown after a command.
const RECENT_LOGS: usize = 5;

#[derive(Debug)]
enum Action {
    Status { json: bool },
    Tick,
    Export,
    Import(String),
    Apply(String),
    Run(u64),
    Reset,
}

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    save_dir: Option<PathBuf>,
    action: Action,
}

fn parse_args() -> Result<Args> {
    let mut config = None;
    let mut save_dir = None;
    let mut positional = Vec::new();
    let mut json = false;
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => config = it.next().map(PathBuf::from),
            "--save-dir" => save_dir = it.next().map(PathBuf::from),
            "--json" => json = true,
            "-h" | "--help" => bail!(USAGE),
            _ => positional.push(arg),
        }
    }
    let mut positional = positional.into_iter();
    let action = match (positional.next().as_deref(), positional.next()) {
        (None | Some("status"), _) => Action::Status { json },
        (Some("tick"), _) => Action::Tick,
        (Some("export"), _) => Action::Export,
        (Some("import"), Some(text)) => Action::Import(text),
        (Some("apply"), Some(json)) => Action::Apply(json),
        (Some("run"), Some(secs)) => Action::Run(
            secs.parse()
                .with_context(|| format!("run expects seconds, got {secs:?}"))?,
        ),
        (Some("reset"), _) => Action::Reset,
        _ => bail!(USAGE),
    };
    Ok(Args {
        config,
        save_dir,
        action,
    })
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn clock(at_ms: i64) -> String {
    Local
        .timestamp_millis_opt(at_ms)
        .single()
        .map_or_else(|| at_ms.to_string(), |t| t.format("%m-%d %H:%M:%S").to_string())
}

fn print_status(state: &GameState) {
    let realm = state.current_realm().map_or("?", |r| r.name.as_str());
    let next = state
        .next_realm()
        .map_or_else(|| "已至巅峰".to_string(), |r| format!("{} @ {}", r.name, r.need_xiuwei));
    let root = state.current_root().map_or("?", |r| r.name.as_str());
    println!("{} | {} | 灵根 {}", state.player_name, realm, root);
    println!(
        "修为 {} (next: {}) | 灵石 {} | 声望 {} | 修行 {} 年",
        state.xiuwei, next, state.lingshi, state.shengwang, state.years_cultivated
    );
    println!(
        "效率 x{:.3} | 每息 +{} | 洞府 {} 级 | 灵宠 {}",
        state.derived.efficiency,
        state.derived.gain_per_tick,
        state.cave.level,
        state.active_pet.as_deref().unwrap_or("-")
    );
    print_recent(state);
}

fn print_recent(state: &GameState) {
    let skip = state.logs.len().saturating_sub(RECENT_LOGS);
    for line in &state.logs[skip..] {
        println!("  [{}] {}", clock(line.at_ms), line.text);
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let cfg = CliConfig::load(args.config.as_deref())?;
    let save_dir = args
        .save_dir
        .or_else(|| cfg.save_dir.clone())
        .unwrap_or_else(|| PathBuf::from(default_save_dir()));
    info!(save_dir = %save_dir.display(), action = ?args.action, "starting CLI");

    let mut engine = Engine::from_config(cfg.engine.clone())?;
    let store = FileStore::new(&save_dir);
    let now = now_ms();
    let mut state = engine.startup(load_or_default(&store, now), now);
    if let Err(e) = validate_state(&state, engine.config().log_capacity) {
        warn!(error = %e, "loaded save violates an invariant");
    }
    let mut saver = AutoSaver::new(store, cfg.autosave_debounce_ms);

    match args.action {
        Action::Status { json: true } => {
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Action::Status { json: false } => print_status(&state),
        Action::Export => println!("{}", to_portable_string(&state)?),
        Action::Tick => {
            state = engine.apply(state, Command::Tick, now_ms());
            print_recent(&state);
        }
        Action::Import(text) => {
            state = engine.apply(state, Command::ImportSave { save_text: text }, now_ms());
            print_recent(&state);
        }
        Action::Apply(json) => {
            let command = Command::from_json(&json).context("parsing command")?;
            state = engine.apply(state, command, now_ms());
            print_recent(&state);
        }
        Action::Reset => {
            state = engine.apply(state, Command::Reset, now_ms());
            print_status(&state);
        }
        Action::Run(secs) => {
            info!(secs, "running live driver");
            let mut shown = state.log_seq;
            for _ in 0..secs {
                std::thread::sleep(Duration::from_secs(1));
                let now = now_ms();
                state = engine.apply(state, Command::Tick, now);
                if state.log_seq != shown {
                    shown = state.log_seq;
                    if let Some(line) = state.logs.last() {
                        println!("  [{}] {}", clock(line.at_ms), line.text);
                    }
                }
                saver.request(&state, now);
                saver.poll(now);
            }
        }
    }

    // Status and export still persist the offline settlement.
    saver.request(&state, now_ms());
    saver.flush();
    Ok(())
}
