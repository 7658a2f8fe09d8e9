use std::path::{Path, PathBuf};
use std::process::ExitCode;

use prelovium_lib::output::PRELOVIUM_OUTPUT_VERSION;
use prelovium_lib::{
    metadata_to_markdown, render_online_ad, Metadata, PreloviumError, PreloviumOutput,
    RenderOutput,
};
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::load_config;

/// Run the render command.
pub async fn run_render(
    config_path: Option<PathBuf>,
    metadata_path: PathBuf,
    markdown: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, output),
    };

    let metadata = match read_metadata(&metadata_path).await {
        Ok(metadata) => metadata,
        Err(err) => return render_error(err, format, output),
    };

    let options = config.render_options();
    let html = render_online_ad(metadata.as_ref(), &options);
    let markdown = if markdown {
        metadata
            .as_ref()
            .map(|m| metadata_to_markdown(m, &options))
            .or_else(|| Some(String::new()))
    } else {
        None
    };

    let document = markdown.clone().unwrap_or_else(|| html.clone());
    let body = PreloviumOutput::Render(RenderOutput {
        version: PRELOVIUM_OUTPUT_VERSION.to_string(),
        source: metadata_path.display().to_string(),
        html,
        markdown,
    });

    if let Err(err) = write_output(&body, format, output.clone(), Some(&document)) {
        return render_error(PreloviumError::Unknown(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}

/// Accepts a bare metadata object or a whole `/process` response.
async fn read_metadata(path: &Path) -> Result<Option<Metadata>, PreloviumError> {
    if !path.is_file() {
        return Err(PreloviumError::config(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let content = tokio::fs::read_to_string(path).await?;
    let value: Value = serde_json::from_str(&content)?;
    let metadata = match value {
        Value::Null => None,
        Value::Object(mut map) if map.contains_key("metadata") => {
            match map.remove("metadata").unwrap_or(Value::Null) {
                Value::Null => None,
                inner => Some(serde_json::from_value(inner)?),
            }
        }
        other => Some(serde_json::from_value(other)?),
    };
    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let file = NamedTempFile::new().expect("temp file");
        std::fs::write(file.path(), content).expect("write json");
        file
    }

    #[tokio::test]
    async fn reads_bare_metadata() {
        let file = write_json(r#"{"title":"Boots","price":30}"#);
        let meta = read_metadata(file.path()).await.unwrap().unwrap();
        assert_eq!(meta.title, "Boots");
    }

    #[tokio::test]
    async fn reads_metadata_from_process_response() {
        let file = write_json(r#"{"primary":"/a.png","metadata":{"title":"Suit"}}"#);
        let meta = read_metadata(file.path()).await.unwrap().unwrap();
        assert_eq!(meta.title, "Suit");

        let file = write_json(r#"{"primary":"/a.png","metadata":null}"#);
        assert!(read_metadata(file.path()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_json_is_a_serialization_error() {
        let file = write_json("{not json");
        let err = read_metadata(file.path()).await.unwrap_err();
        assert!(matches!(err, PreloviumError::Serialization(_)));
    }
}
