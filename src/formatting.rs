use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use prelovium_lib::output::PRELOVIUM_OUTPUT_VERSION;
use prelovium_lib::{ErrorOutput, PreloviumError, PreloviumOutput, Role};

use crate::cli::OutputFormat;

/// Write output in the requested format. `html` is what the html format writes.
pub fn write_output(
    body: &PreloviumOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
    html: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    match (format, html) {
        (OutputFormat::Html, Some(document)) => write_raw(document, output.as_deref())?,
        (OutputFormat::Json, _) | (OutputFormat::Html, None) => {
            write_json_output(body, output.as_deref())?
        }
        (OutputFormat::Pretty, _) => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(
    err: PreloviumError,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    tracing::error!(error = %err, "command failed");
    let error_payload = err.to_payload();
    let payload = PreloviumOutput::Error(ErrorOutput {
        version: PRELOVIUM_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json | OutputFormat::Html => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // Exit code 2 is fatal; 1 means the action ran and failed.
    ExitCode::from(2)
}

fn write_raw(content: &str, output: Option<&Path>) -> io::Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write JSON output to file or stdout.
fn write_json_output(
    body: &PreloviumOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    write_raw(&content, output)?;
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &PreloviumOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content = serde_json::to_string_pretty(body)
        .unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    write_raw(&content, output)
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &PreloviumOutput, colorize: bool) -> String {
    match body {
        PreloviumOutput::Process(out) => {
            let mut buf = String::new();
            let (status, code) = if out.success {
                ("OK", "32")
            } else {
                ("FAILED", "31")
            };
            writeln!(
                buf,
                "{} {:?} {} (server {})",
                color(status, code, colorize),
                out.action,
                out.input.join(", "),
                out.server
            )
            .ok();

            if let Some(response) = &out.response {
                writeln!(buf, "Images:").ok();
                for role in Role::ALL {
                    writeln!(buf, "- {:10} {}", role.as_str(), response.image(role)).ok();
                }
                if let Some(meta) = &response.metadata {
                    let price = meta.price.as_ref().map(|p| p.to_string()).unwrap_or_default();
                    writeln!(buf, "Listing:").ok();
                    writeln!(buf, "- {:10} {}", "title", meta.title).ok();
                    writeln!(buf, "- {:10} {}", "price", price).ok();
                    writeln!(buf, "- {:10} {}", "size", meta.size).ok();
                    writeln!(buf, "- {:10} {}", "brand", meta.brand).ok();
                }
            }
            for alert in &out.alerts {
                writeln!(buf, "{} {}", color("[ALERT]", "33", colorize), alert).ok();
            }
            if let Some(err) = &out.error {
                writeln!(buf, "Cause: {}", err.message).ok();
                if let Some(remediation) = &err.remediation {
                    writeln!(buf, "Hint: {}", remediation).ok();
                }
            }
            buf
        }
        PreloviumOutput::Render(out) => {
            let mut buf = String::new();
            let header = color("[RENDER]", "36", colorize);
            writeln!(buf, "{} {}", header, out.source).ok();
            match &out.markdown {
                Some(markdown) => writeln!(buf, "{}", markdown).ok(),
                None => writeln!(buf, "{}", out.html).ok(),
            };
            buf
        }
        PreloviumOutput::Examples(out) => {
            let mut buf = String::new();
            let header = color("[EXAMPLES]", "34", colorize);
            writeln!(buf, "{} {}", header, out.server).ok();
            for example in &out.examples {
                writeln!(buf, "- {}", example).ok();
            }
            buf
        }
        PreloviumOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Exit code for an example/upload action.
pub fn exit_code_for_action(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
