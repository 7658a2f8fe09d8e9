use std::path::PathBuf;
use std::process::ExitCode;

use prelovium_lib::output::PRELOVIUM_OUTPUT_VERSION;
use prelovium_lib::{ExamplesOutput, PreloviumError, PreloviumOutput};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::{load_config, resolve_server_url, server_from_env};

/// Run the examples command.
pub async fn run_examples(
    config_path: Option<PathBuf>,
    server: Option<String>,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, None),
    };
    let server = resolve_server_url(server.as_deref(), server_from_env(), &config);

    let body = PreloviumOutput::Examples(ExamplesOutput {
        version: PRELOVIUM_OUTPUT_VERSION.to_string(),
        server,
        examples: config.examples,
    });

    if let Err(err) = write_output(&body, format, None, None) {
        return render_error(PreloviumError::Unknown(err.to_string()), format, None);
    }
    ExitCode::SUCCESS
}
