use clap::Parser;

/// Atrium — a host-driven webview scaffold shell.
#[derive(Parser, Debug)]
#[command(name = "atrium", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Window title override.
    #[arg(long)]
    pub title: Option<String>,

    /// Open the webview devtools at startup.
    #[arg(long)]
    pub devtools: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
