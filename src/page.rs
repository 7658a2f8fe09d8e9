//! The view side of the upload UI.
//!
//! [`Page`] is the contract the controller drives: panels are shown and
//! hidden, image slots are addressed by [`Role`] rather than by position.
//! [`MemoryPage`] keeps the whole state in memory and records every
//! mutation, which is what the CLI renders and what the tests inspect.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::html::Markup;
use crate::types::Role;

/// Containers whose visibility the controller toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase", tag = "panel", content = "role")]
pub enum Panel {
    Loading,
    Results,
    OnlineAd,
    Preview(Role),
}

pub trait Page: Send {
    fn show(&mut self, panel: Panel);
    fn hide(&mut self, panel: Panel);
    fn set_preview_src(&mut self, role: Role, src: &str);
    fn set_result_src(&mut self, role: Role, src: &str);
    /// Replaces the online-ad panel content with already-escaped markup.
    fn set_online_ad_html(&mut self, html: String);
    /// Blocking user-facing notice.
    fn alert(&mut self, message: &str);
}

/// One recorded page mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum PageEvent {
    Show { panel: Panel },
    Hide { panel: Panel },
    PreviewSrc { role: Role, src: String },
    ResultSrc { role: Role, src: String },
    OnlineAd { html: String },
    Alert { message: String },
}

/// Current state of a [`MemoryPage`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub loading_visible: bool,
    pub results_visible: bool,
    pub online_ad_visible: bool,
    pub previews_visible: BTreeMap<Role, bool>,
    pub preview_src: BTreeMap<Role, String>,
    pub result_src: BTreeMap<Role, String>,
    pub online_ad_html: String,
    pub alerts: Vec<String>,
}

impl PageSnapshot {
    fn with_defaults() -> Self {
        let mut snapshot = Self {
            online_ad_visible: true,
            ..Self::default()
        };
        for role in Role::ALL {
            snapshot.previews_visible.insert(role, false);
        }
        snapshot
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Loading => self.loading_visible,
            Panel::Results => self.results_visible,
            Panel::OnlineAd => self.online_ad_visible,
            Panel::Preview(role) => self.previews_visible.get(&role).copied().unwrap_or(false),
        }
    }

    fn set_visible(&mut self, panel: Panel, visible: bool) {
        match panel {
            Panel::Loading => self.loading_visible = visible,
            Panel::Results => self.results_visible = visible,
            Panel::OnlineAd => self.online_ad_visible = visible,
            Panel::Preview(role) => {
                self.previews_visible.insert(role, visible);
            }
        }
    }

    pub fn preview_src(&self, role: Role) -> Option<&str> {
        self.preview_src.get(&role).map(String::as_str)
    }

    pub fn result_src(&self, role: Role) -> Option<&str> {
        self.result_src.get(&role).map(String::as_str)
    }
}

#[derive(Debug)]
struct PageInner {
    state: PageSnapshot,
    events: Vec<PageEvent>,
}

/// In-memory page; clones share the same state.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    inner: Arc<Mutex<PageInner>>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// A freshly loaded page: everything hidden except the (empty) online-ad panel,
    /// which only becomes visible together with the results panel.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(PageInner {
                state: PageSnapshot::with_defaults(),
                events: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PageInner> {
        // State is plain data; a panic elsewhere cannot leave it half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, event: PageEvent, apply: impl FnOnce(&mut PageSnapshot)) {
        let mut inner = self.lock();
        apply(&mut inner.state);
        inner.events.push(event);
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.lock().state.clone()
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.lock().events.clone()
    }

    pub fn event_count(&self) -> usize {
        self.lock().events.len()
    }

    /// Complete HTML document for the current state.
    pub fn to_html_document(&self, title: &str) -> String {
        let state = self.snapshot();
        let hidden = |visible: bool| if visible { "" } else { "hidden" };

        let mut html = Markup::new();
        html.raw("<!DOCTYPE html>\n");
        html.open("html", &[("lang", "en".into())]).newline();
        html.open("head", &[]).newline();
        html.open("meta", &[("charset", "utf-8".into())]).newline();
        html.element("title", &[], title).newline();
        html.element("style", &[], ".hidden{display:none}").newline();
        html.close("head").newline();
        html.open("body", &[]).newline();

        html.open("div", &[("id", "previews".into())]).newline();
        for role in Role::ALL {
            let visible = state.is_visible(Panel::Preview(role));
            html.open(
                "div",
                &[
                    ("class", preview_class(visible).as_str().into()),
                    ("data-role", role.as_str().into()),
                ],
            );
            html.open(
                "img",
                &[
                    ("src", state.preview_src(role).unwrap_or_default().into()),
                    ("alt", role.as_str().into()),
                ],
            );
            html.close("div").newline();
        }
        html.close("div").newline();

        html.element(
            "div",
            &[("id", "loading".into()), ("class", hidden(state.loading_visible).into())],
            "Processing...",
        )
        .newline();

        html.open(
            "div",
            &[("id", "results".into()), ("class", hidden(state.results_visible).into())],
        )
        .newline();
        for role in Role::ALL {
            html.open(
                "div",
                &[("class", "result-image".into()), ("data-role", role.as_str().into())],
            );
            html.open(
                "img",
                &[
                    ("src", state.result_src(role).unwrap_or_default().into()),
                    ("alt", role.as_str().into()),
                ],
            );
            html.close("div").newline();
        }
        html.open(
            "div",
            &[("id", "onlineAd".into()), ("class", hidden(state.online_ad_visible).into())],
        );
        html.newline();
        // Produced by the renderer, which escapes every field.
        html.append(&Markup::from_trusted(state.online_ad_html));
        html.newline().close("div").newline();
        html.close("div").newline();

        for alert in &state.alerts {
            html.element("div", &[("class", "alert".into()), ("role", "alert".into())], alert)
                .newline();
        }

        html.close("body").newline();
        html.close("html").newline();
        html.into_string()
    }
}

fn preview_class(visible: bool) -> String {
    if visible {
        "preview-container".to_string()
    } else {
        "preview-container hidden".to_string()
    }
}

impl Page for MemoryPage {
    fn show(&mut self, panel: Panel) {
        self.record(PageEvent::Show { panel }, |s| s.set_visible(panel, true));
    }

    fn hide(&mut self, panel: Panel) {
        self.record(PageEvent::Hide { panel }, |s| s.set_visible(panel, false));
    }

    fn set_preview_src(&mut self, role: Role, src: &str) {
        self.record(
            PageEvent::PreviewSrc {
                role,
                src: src.to_string(),
            },
            |s| {
                s.preview_src.insert(role, src.to_string());
            },
        );
    }

    fn set_result_src(&mut self, role: Role, src: &str) {
        self.record(
            PageEvent::ResultSrc {
                role,
                src: src.to_string(),
            },
            |s| {
                s.result_src.insert(role, src.to_string());
            },
        );
    }

    fn set_online_ad_html(&mut self, html: String) {
        self.record(PageEvent::OnlineAd { html: html.clone() }, |s| {
            s.online_ad_html = html;
        });
    }

    fn alert(&mut self, message: &str) {
        self.record(
            PageEvent::Alert {
                message: message.to_string(),
            },
            |s| s.alerts.push(message.to_string()),
        );
    }
}
