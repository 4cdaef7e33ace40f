mod actions;
mod app;
mod cli;

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use atrium_config::AtriumConfig;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- Atrium crashed ---");
        eprintln!("Please report this issue at: https://github.com/dylan/atrium/issues");
        eprintln!("----------------------\n");

        default_hook(info);
    }));
}

fn resolve_config_path(override_path: Option<&str>) -> PathBuf {
    match override_path {
        Some(p) => PathBuf::from(p),
        None => atrium_config::toml_loader::default_config_path()
            .unwrap_or_else(|_| PathBuf::from("atrium.toml")),
    }
}

/// Load the startup config. Runs before logging is up, so failures are
/// reported back as a note for the caller to log.
fn load_boot_config(override_path: Option<&str>, path: &Path) -> (AtriumConfig, Option<String>) {
    let result = if override_path.is_some() {
        atrium_config::toml_loader::load_validated(path)
    } else {
        atrium_config::load_config()
    };
    match result {
        Ok(config) => (config, None),
        Err(e) => (
            AtriumConfig::default(),
            Some(format!("Config load failed, using defaults: {e}")),
        ),
    }
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Config comes first: its logging level seeds the filter when the CLI
    // does not override it.
    let config_path = resolve_config_path(args.config.as_deref());
    let (mut config, load_note) = load_boot_config(args.config.as_deref(), &config_path);

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    let directive = format!("atrium={level}");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "atrium=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Atrium v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(note) = load_note {
        tracing::warn!("{note}");
    }
    tracing::info!("Config loaded ({})", config_path.display());

    if let Some(title) = args.title {
        config.window.title = title;
    }
    tracing::debug!(
        "Effective config: {}",
        atrium_config::config_to_json(&config)
    );

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut app = app::AtriumApp::new(config, config_path, args.devtools);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
