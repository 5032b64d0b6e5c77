//! Bootfolio TUI Entry Point
//!
//! Boots the terminal portfolio.
//!
//! Usage:
//!   bootfolio [OPTIONS]
//!
//! Options:
//!   --config <PATH>      Config file (default: ~/.config/bootfolio/config.toml)
//!   --profile <PATH>     Portfolio profile TOML (default: built-in)
//!   --skip-boot          Start directly in the shell
//!   --grace-ms <MS>      Delay before the content screen opens
//!   --prompt <TEXT>      Shell prompt
//!   --dev                Show the developer overlay
//!   --log-file <PATH>    Write logs to a file instead of stderr

use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bootfolio_core::config::{default_config_path, load_config_from_path};
use bootfolio_core::{ConfigOverrides, ConsoleConfig, Profile};
use bootfolio_tui::App;

/// A bootable terminal portfolio
#[derive(Parser, Debug)]
#[command(name = "bootfolio", version, about)]
struct Args {
    /// Config file path
    #[arg(long, env = "BOOTFOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Portfolio profile TOML
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Start directly in the shell
    #[arg(long)]
    skip_boot: bool,

    /// Delay before the content screen opens (milliseconds)
    #[arg(long)]
    grace_ms: Option<u64>,

    /// Shell prompt
    #[arg(long)]
    prompt: Option<String>,

    /// Show the developer overlay
    #[arg(long)]
    dev: bool,

    /// Write logs here instead of stderr
    #[arg(long, env = "BOOTFOLIO_LOG")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if self.skip_boot {
            overrides = overrides.with_skip_boot(true);
        }
        if let Some(path) = &self.profile {
            overrides = overrides.with_profile_path(path.clone());
        }
        if let Some(ms) = self.grace_ms {
            overrides = overrides.with_grace_delay_ms(ms);
        }
        if let Some(prompt) = &self.prompt {
            overrides = overrides.with_prompt(prompt.clone());
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Set up logging. The terminal belongs to the TUI, so stderr output is
    // only readable with RUST_LOG set and stderr redirected.
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());
    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .init(),
    }

    let config = load(&args)?;
    let profile = Profile::load_or_builtin(config.profile_path.as_deref())
        .context("cannot load portfolio profile")?;

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("❌ Error: bootfolio requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        eprintln!();
        eprintln!("Solutions:");
        eprintln!("  • Run interactively: bootfolio");
        eprintln!("  • Or with script: script -c 'bootfolio' /dev/null");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &config, profile, args.dev).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

/// Defaults, then file, then environment, then flags
fn load(args: &Args) -> anyhow::Result<ConsoleConfig> {
    let path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(path).context("cannot load configuration")?;

    let overrides = args.overrides();
    overrides.apply(&mut config);
    config.validate().context("invalid command-line options")?;

    tracing::debug!(source = ?config.source(), skip_boot = config.skip_boot, "Configuration ready");
    Ok(config)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &ConsoleConfig,
    profile: Profile,
    dev_mode: bool,
) -> anyhow::Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(config, profile, (size.width, size.height)).with_dev_mode(dev_mode);
    app.run(terminal).await?;

    // Show goodbye message after TUI closes
    if let Some(goodbye) = app.goodbye() {
        println!("\n\x1b[32mbootfolio:\x1b[0m {goodbye}\n");
    }

    Ok(())
}
