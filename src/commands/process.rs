use std::path::PathBuf;
use std::process::ExitCode;

use prelovium_lib::output::PRELOVIUM_OUTPUT_VERSION;
use prelovium_lib::upload::UploadForm;
use prelovium_lib::{
    ActionKind, ActionOutcome, Config, Controller, HttpProcessClient, MemoryPage,
    PreloviumError, PreloviumOutput, ProcessOutput, Role,
};

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_action, render_error, write_output};
use crate::settings::{load_config, log_effective_config, resolve_server_url, server_from_env};

const DOCUMENT_TITLE: &str = "Prelovium";

struct Session {
    server: String,
    page: MemoryPage,
    controller: Controller<HttpProcessClient, MemoryPage>,
}

fn open_session(
    config_path: Option<&std::path::Path>,
    server: Option<&str>,
) -> Result<(Config, Session), PreloviumError> {
    let config = load_config(config_path)?;
    let server = resolve_server_url(server, server_from_env(), &config);
    log_effective_config(&server, &config, config_path);

    let client = HttpProcessClient::with_timeout(&server, config.server.timeout)?;
    let page = MemoryPage::new();
    let controller = Controller::new(client, page.clone())
        .with_messages(config.alert_messages())
        .with_render_options(config.render_options());

    Ok((
        config,
        Session {
            server,
            page,
            controller,
        },
    ))
}

/// Run the example command.
pub async fn run_example(
    config_path: Option<PathBuf>,
    server: Option<String>,
    example: String,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let (config, mut session) = match open_session(config_path.as_deref(), server.as_deref()) {
        Ok(opened) => opened,
        Err(err) => return render_error(err, format, output),
    };

    if !config.is_known_example(&example) {
        tracing::warn!(
            example = %example,
            "example is not in the configured list; sending it anyway"
        );
    }

    let outcome = session.controller.select_example(&example).await;
    report(ActionKind::Example, vec![example], outcome, &session, format, output)
}

/// Run the upload command.
pub async fn run_upload(
    config_path: Option<PathBuf>,
    server: Option<String>,
    files: Vec<(Role, PathBuf)>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    if files.is_empty() {
        return render_error(
            PreloviumError::config(
                "No files selected; pass at least one of --primary, --secondary, --label",
            ),
            format,
            output,
        );
    }

    let (_config, mut session) = match open_session(config_path.as_deref(), server.as_deref()) {
        Ok(opened) => opened,
        Err(err) => return render_error(err, format, output),
    };

    let form = match UploadForm::from_role_paths(&files).await {
        Ok(form) => form,
        Err(err) => return render_error(err.into(), format, output),
    };

    for (role, path) in &files {
        session.controller.preview_file(*role, Some(path)).await;
    }

    let outcome = session.controller.submit_upload(&form).await;
    let input = files
        .iter()
        .map(|(_, path)| path.display().to_string())
        .collect();
    report(ActionKind::Upload, input, outcome, &session, format, output)
}

fn report(
    action: ActionKind,
    input: Vec<String>,
    outcome: ActionOutcome,
    session: &Session,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let state = session.page.snapshot();
    let success = outcome.is_rendered();
    let (response, error) = match outcome {
        ActionOutcome::Rendered(response) => (Some(response), None),
        ActionOutcome::Failed(err) => (None, Some(err.to_payload())),
    };

    let body = PreloviumOutput::Process(ProcessOutput {
        version: PRELOVIUM_OUTPUT_VERSION.to_string(),
        action,
        input,
        server: session.server.clone(),
        success,
        response,
        alerts: state.alerts,
        error,
        online_ad_html: success.then_some(state.online_ad_html),
    });

    let document = session.page.to_html_document(DOCUMENT_TITLE);
    if let Err(err) = write_output(&body, format, output.clone(), Some(&document)) {
        return render_error(PreloviumError::Unknown(err.to_string()), format, output);
    }
    exit_code_for_action(success)
}
