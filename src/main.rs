use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use shortcut_engine::config::{self, EngineConfig};
use shortcut_engine::engine::{self, ShortcutEngine};
use shortcut_engine::error::ResultExt;
use shortcut_engine::hook::ShortcutHook;
use shortcut_engine::logging;
use shortcut_engine::shortcuts::{parse_shortcut_config_str, ShortcutRegistry};
use shortcut_engine::stdin_commands::{self, StdinHost};
use shortcut_engine::timer::ThreadScheduler;

#[derive(Parser, Debug)]
#[command(name = "shortcut-engine")]
#[command(about = "Match keyboard chords and sequences read as JSONL from stdin")]
struct Cli {
    /// Engine settings file (defaults to ~/.shortcut-engine/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debounce window between sequence keys, overrides the settings file
    #[arg(long)]
    sequence_timeout_ms: Option<u64>,

    /// Shortcut configuration to load before reading stdin
    #[arg(long)]
    shortcuts: Option<PathBuf>,
}

fn load_initial_shortcuts(path: &Path, registry: &ShortcutRegistry) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading shortcuts from {}", path.display()))?;
    let specs = parse_shortcut_config_str(&contents)
        .with_context(|| format!("parsing shortcuts from {}", path.display()))?;
    info!(count = specs.len(), path = %path.display(), "Loaded initial shortcuts");
    registry.replace(specs);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let engine_config = config::load_config(&config_path).merged_with(EngineConfig {
        sequence_timeout_ms: cli.sequence_timeout_ms,
        ..Default::default()
    });
    info!(config = ?engine_config, "Engine configuration resolved");

    let registry = ShortcutRegistry::new();
    if let Some(path) = &cli.shortcuts {
        load_initial_shortcuts(path, &registry)?;
    }

    let (notify_tx, notify_rx) = engine::notification_channel(&engine_config);
    let engine = ShortcutEngine::new(registry, Arc::new(ThreadScheduler), &engine_config)
        .with_notifier(notify_tx);

    let mut hook = ShortcutHook::new(StdinHost::new(), engine);
    hook.start()?;

    let commands = stdin_commands::start_stdin_listener();
    let stdout = std::io::stdout();

    while let Ok(command) = commands.recv_blocking() {
        let Some(outcome) = hook.host_mut().dispatch(command) else {
            continue;
        };

        let mut out = stdout.lock();
        let line = serde_json::to_string(&outcome)?;
        if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
            warn!(error = %e, "Failed to write outcome, exiting");
            break;
        }

        while let Ok(triggered) = notify_rx.try_recv() {
            info!(
                event_type = "notification_delivered",
                action_id = %triggered.action_id,
                "Shortcut notification"
            );
        }
    }

    hook.stop();
    notify_rx.close();
    info!(event_type = "app_lifecycle", action = "stopped", "Input closed");
    std::io::stdout().flush().warn_on_err();
    Ok(())
}
