//! Prelovium client library
//!
//! Submits the three photos of a second-hand item (or a named example) to a
//! Prelovium backend and renders the generated listing as an "online ad".
//!
//! # Module Overview
//!
//! - [`controller`] - the example, upload and preview actions
//! - [`client`] - `POST /process` over HTTP
//! - [`page`] - the page contract the controller drives, plus an in-memory page
//! - [`render`] - metadata to HTML fragment / markdown
//! - [`html`] - escaping HTML builder
//! - [`preview`] / [`upload`] - local files as data URLs and multipart parts
//! - [`config`] - configuration file support
//! - [`types`] - roles, metadata and the process response
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use prelovium_lib::{Controller, HttpProcessClient, MemoryPage};
//!
//! # async fn example() -> prelovium_lib::Result<()> {
//! let client = HttpProcessClient::new("http://localhost:8080")?;
//! let page = MemoryPage::new();
//! let mut controller = Controller::new(client, page.clone());
//!
//! let outcome = controller.select_example("jacket").await;
//! if outcome.is_rendered() {
//!     println!("{}", page.snapshot().online_ad_html);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod html;
pub mod output;
pub mod page;
pub mod preview;
pub mod render;
pub mod types;
pub mod upload;

pub use client::{example_image_path, HttpProcessClient, ProcessApi, DEFAULT_SERVER_URL};
pub use config::Config;
pub use controller::{ActionOutcome, AlertMessages, Controller};
pub use error::{PreloviumError, Result};
pub use output::{
    ActionKind, ErrorOutput, ExamplesOutput, PreloviumOutput, ProcessOutput, RenderOutput,
    PRELOVIUM_OUTPUT_VERSION,
};
pub use page::{MemoryPage, Page, PageEvent, PageSnapshot, Panel};
pub use preview::file_to_data_url;
pub use render::{metadata_to_markdown, render_online_ad, RenderOptions};
pub use types::{Metadata, Price, ProcessResponse, Role};
pub use upload::{UploadFile, UploadForm};
