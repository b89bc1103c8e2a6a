use clap::Parser;
use fibproc::cli::{Cli, Commands};
use fibproc::types::config::Config;
use fibproc::FibprocResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> FibprocResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config_found = cli.config.exists();
    let config = if config_found {
        Config::load(&cli.config)?
    } else {
        Config::default_config()
    };

    // CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("fibproc={}", log_level)
            .parse()
            .unwrap_or_else(|_| "fibproc=info".parse().expect("fallback directive is valid")),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    if config_found {
        tracing::debug!("Configuration loaded from: {}", cli.config.display());
    } else {
        tracing::debug!(
            "No configuration at {}, using defaults",
            cli.config.display()
        );
    }

    match cli.command {
        Commands::Init { path } => {
            fibproc::cli::commands::init(path)?;
        }
        Commands::Fib { n, recursive } => {
            fibproc::cli::commands::fib(n, recursive)?;
        }
        Commands::Process {
            values,
            repeat,
            json,
        } => {
            fibproc::cli::commands::process(values, repeat, json, &config)?;
        }
        Commands::Config => {
            fibproc::cli::commands::config_cmd(&cli.config, &config)?;
        }
        Commands::Version => {
            fibproc::cli::commands::version();
        }
    }

    Ok(())
}
