//! Turns the three user actions into backend calls and page updates.
//!
//! Every action swallows its own failure: the error is logged, the user gets
//! one generic alert, and the loading indicator is hidden on every path.

use std::path::Path;

use crate::client::ProcessApi;
use crate::error::{PreloviumError, Result};
use crate::page::{Page, Panel};
use crate::preview::file_to_data_url;
use crate::render::{render_online_ad, RenderOptions};
use crate::types::{ProcessResponse, Role};
use crate::upload::UploadForm;

pub const EXAMPLE_FAILED_MESSAGE: &str = "Failed to load example images. Please try again.";
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to process images. Please try again.";

/// User-facing alert texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessages {
    pub example_failed: String,
    pub upload_failed: String,
}

impl Default for AlertMessages {
    fn default() -> Self {
        Self {
            example_failed: EXAMPLE_FAILED_MESSAGE.to_string(),
            upload_failed: UPLOAD_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Result of an example or upload action, after the page has been updated.
#[derive(Debug)]
pub enum ActionOutcome {
    /// Results were rendered.
    Rendered(ProcessResponse),
    /// The user was alerted; the error is kept for callers that report it.
    Failed(PreloviumError),
}

impl ActionOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, ActionOutcome::Rendered(_))
    }

    pub fn response(&self) -> Option<&ProcessResponse> {
        match self {
            ActionOutcome::Rendered(response) => Some(response),
            ActionOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&PreloviumError> {
        match self {
            ActionOutcome::Rendered(_) => None,
            ActionOutcome::Failed(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Example,
    Upload,
}

pub struct Controller<A, P> {
    api: A,
    page: P,
    messages: AlertMessages,
    render: RenderOptions,
}

impl<A: ProcessApi, P: Page> Controller<A, P> {
    pub fn new(api: A, page: P) -> Self {
        Self {
            api,
            page,
            messages: AlertMessages::default(),
            render: RenderOptions::default(),
        }
    }

    pub fn with_messages(mut self, messages: AlertMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Shows the example's original photos, then processes the example.
    pub async fn select_example(&mut self, example: &str) -> ActionOutcome {
        tracing::info!(example, "processing example");
        self.page.show(Panel::Loading);

        for role in Role::ALL {
            let src = self.api.example_image_src(example, role);
            self.page.set_preview_src(role, &src);
            self.page.show(Panel::Preview(role));
        }

        let result = self.api.process_example(example).await;
        self.finish(Action::Example, result)
    }

    /// Uploads the selected photos for processing.
    pub async fn submit_upload(&mut self, form: &UploadForm) -> ActionOutcome {
        tracing::info!(files = form.files().len(), "processing upload");
        self.page.show(Panel::Loading);

        let result = self.api.process_upload(form).await;
        self.finish(Action::Upload, result)
    }

    /// Local preview of a selected file. Returns whether the preview was updated.
    pub async fn preview_file(&mut self, role: Role, file: Option<&Path>) -> bool {
        let Some(path) = file else {
            return false;
        };

        match file_to_data_url(path).await {
            Ok(data_url) => {
                tracing::debug!(%role, path = %path.display(), "showing local preview");
                self.page.set_preview_src(role, &data_url);
                self.page.show(Panel::Preview(role));
                true
            }
            Err(err) => {
                tracing::warn!(%role, path = %path.display(), error = %err, "preview skipped");
                false
            }
        }
    }

    fn finish(&mut self, action: Action, result: Result<ProcessResponse>) -> ActionOutcome {
        let outcome = match result {
            Ok(response) => {
                self.display(&response);
                ActionOutcome::Rendered(response)
            }
            Err(err) => {
                tracing::error!(?action, error = %err, "processing failed");
                let message = match action {
                    Action::Example => &self.messages.example_failed,
                    Action::Upload => &self.messages.upload_failed,
                };
                self.page.alert(message);
                ActionOutcome::Failed(err)
            }
        };
        self.page.hide(Panel::Loading);
        outcome
    }

    fn display(&mut self, response: &ProcessResponse) {
        for role in Role::ALL {
            self.page.set_result_src(role, response.image(role));
        }
        let html = render_online_ad(response.metadata.as_ref(), &self.render);
        self.page.set_online_ad_html(html);
        self.page.show(Panel::Results);
    }
}
