use prelovium_lib::error::ErrorCategory;
use prelovium_lib::PreloviumError;

#[test]
fn config_error_display_includes_message() {
    let err = PreloviumError::Config("missing server".to_string());

    assert_eq!(format!("{}", err), "Configuration error: missing server");
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: PreloviumError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn status_helper_includes_status_and_body() {
    let err = PreloviumError::status(reqwest::StatusCode::BAD_REQUEST, "No selected file");

    assert_eq!(
        format!("{}", err),
        "Process request failed (status: 400 Bad Request): No selected file"
    );
    assert_eq!(err.to_payload().category, ErrorCategory::Server);
}

#[test]
fn unknown_error_uses_message() {
    let err = PreloviumError::Unknown("stdout closed".to_string());

    assert_eq!(format!("{}", err), "Unexpected error: stdout closed");
}
