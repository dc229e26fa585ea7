use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zp::{
    commands::{
        check::{self, CheckCommand},
        config::{self, ConfigAction},
        watch::{self, WatchCommand},
    },
    logger, GlobalOpts,
};

#[derive(Parser)]
#[command(name = "zp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Zombie Plague downloads manager",
    long_about = "zp validates the Zombie Plague downloads manifest against a game directory and precaches every asset it lists."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the downloads manifest once
    Check(CheckCommand),
    /// Validate the downloads manifest and reload it whenever it changes
    Watch(WatchCommand),
    /// Configure zp settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("ZP_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    init_tracing();
    if let Err(e) = logger::init_with_verbosity(
        cli.global.verbosity_level(),
        cli.global.no_stdout,
        cli.global.log_dir.as_deref(),
    ) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    match cli.command {
        Commands::Check(cmd) => {
            if let Err(e) = check::handle_check(cmd, &cli.global) {
                fail("Downloads check failed", &e);
            }
        }
        Commands::Watch(cmd) => {
            if let Err(e) = watch::handle_watch(cmd, &cli.global) {
                fail("Downloads watch stopped", &e);
            }
        }
        Commands::Config { action } => {
            config::handle_config(action, &cli.global);
        }
    }
}

/// Fatal errors stop the host: report and exit non-zero
fn fail(context: &str, err: &zp::errors::CliError) -> ! {
    logger::error(&format!("{}: {}", context, err));
    logger::show_log_path();
    std::process::exit(1);
}
