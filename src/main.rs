//! sindbad-env CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use sindbad_env::cli::{Cli, CommandContext, CommandDispatcher, Commands};
use sindbad_env::shell::is_ci;
use sindbad_env::ui::{create_ui, ConfirmPolicy, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("sindbad_env=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sindbad_env=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("sindbad-env starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Determine project root
    let project_root = cli
        .project
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    // Prompts only come from the setup flow
    let (is_interactive, policy) = match &cli.command {
        Some(Commands::Setup(args)) if args.yes => (!is_ci(), ConfirmPolicy::AssumeYes),
        Some(Commands::Setup(args)) if args.non_interactive => (false, ConfirmPolicy::AssumeNo),
        _ => (!is_ci(), ConfirmPolicy::Ask),
    };

    let mut ui = create_ui(is_interactive, output_mode, policy);

    let context = CommandContext::new(project_root, cli.config.clone(), cli.julia.clone());
    let dispatcher = CommandDispatcher::new(context);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
