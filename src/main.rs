mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_example, run_examples, run_render, run_upload};
use prelovium_lib::Role;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "prelovium=debug,prelovium_lib=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // stdout carries the command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> ExitCode {
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Example {
            example,
            format,
            output,
        } => run_example(args.config, args.server, example, format, output).await,
        Commands::Upload {
            primary,
            secondary,
            label,
            format,
            output,
        } => {
            let files = [
                (Role::Primary, primary),
                (Role::Secondary, secondary),
                (Role::Label, label),
            ]
            .into_iter()
            .filter_map(|(role, path)| path.map(|p| (role, p)))
            .collect();
            run_upload(args.config, args.server, files, format, output).await
        }
        Commands::Render {
            metadata,
            markdown,
            format,
            output,
        } => run_render(args.config, metadata, markdown, format, output).await,
        Commands::Examples { format } => run_examples(args.config, args.server, format).await,
    }
}
