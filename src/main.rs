// src/main.rs

use anyhow::Result;
use clap::Parser;
use nice_clone::cli::{CloneArgs, Cli, Commands, ServeArgs};
use nice_clone::config::ConfigBuilder;
use nice_clone::errors::{AppError, GitError};
use nice_clone::git::Git2Client;
use nice_clone::logging;
#[cfg(feature = "progress")]
use nice_clone::progress::IndicatifProgress;
use nice_clone::progress::ProgressReporter;
use nice_clone::response::ResponseEnvelope;
use nice_clone::service::{CloneOptions, CloneRequest, CloneService};
use nice_clone::signal::setup_signal_handler;
use nice_clone::web;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format);

    log::info!("Starting nice-clone v{}...", env!("CARGO_PKG_VERSION"));

    // Panic messages may carry local paths; keep them out of the terminal.
    std::panic::set_hook(Box::new(|info| {
        let msg = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("Box<Any>");
        tracing::error!(panic = msg, "Panic");
        eprintln!(
            "Application Error: {}",
            msg.replace(env!("CARGO_MANIFEST_DIR"), "<redacted>")
        );
    }));

    match cli.command {
        Commands::Serve(args) => serve(&args),
        Commands::Clone(args) => clone(&args),
    }
}

fn serve(args: &ServeArgs) -> Result<()> {
    let config = ConfigBuilder::from_serve_args(args).build()?;
    log::debug!("Configuration built successfully: {:?}", config);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(web::start_server(config))
}

fn clone(args: &CloneArgs) -> Result<()> {
    let config = ConfigBuilder::from_clone_args(args).build()?;
    log::debug!("Configuration built successfully: {:?}", config);

    let token = setup_signal_handler()?;

    // Show a progress bar only if stderr is a TTY.
    let progress: Option<Arc<dyn ProgressReporter>> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Some(Arc::new(IndicatifProgress::new()))
            } else {
                None
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            None
        }
    };

    let service = CloneService::new(&config, Arc::new(Git2Client::new()));
    let mut request = CloneRequest::new(args.url.clone());
    request.dir_name = args.dir_name.clone();
    let options = CloneOptions {
        progress,
        token,
    };

    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(service.clone_repo(request, options));
    if let Err(e) = &result {
        log::error!("Clone failed: {}", e);
    }
    let interrupted = matches!(
        &result,
        Err(AppError::CloneFailed {
            source: GitError::Cancelled,
            ..
        })
    );

    let envelope = ResponseEnvelope::from_result(result);
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if interrupted {
        eprintln!("\nOperation cancelled.");
        std::process::exit(130);
    }
    if !envelope.ok {
        std::process::exit(1);
    }
    Ok(())
}
