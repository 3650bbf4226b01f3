//! HTML rendering.
//!
//! # Responsibilities
//! - Render a resource template as a bare fragment (partial updates)
//! - Compose a fragment into the base layout for top-level navigation
//! - Hold the site-wide chrome: site name, navigation, favicon
//!
//! # Design Decisions
//! - Templates are compiled into the binary with askama
//! - The registry is built once at startup and shared through `AppState`
//! - Paths under `/dashboard_pages` always render fragments

pub mod fields;
pub mod templates;
pub mod urls;

use askama::Template;

use crate::domain::SessionContext;

pub use fields::{FieldKind, FormField};
pub use templates::BasePage;
pub use urls::{ResourceUrls, UrlBuilder};

/// Route prefix for fragment-only (partial update) requests.
pub const DASHBOARD_PAGES_PREFIX: &str = "/dashboard_pages";

const FAVICON: &str = include_str!("../../assets/favicon.svg");

/// Whether a view is wrapped in the base layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Page,
    Fragment,
}

impl RenderMode {
    pub fn for_path(path: &str) -> Self {
        if path.starts_with(DASHBOARD_PAGES_PREFIX) {
            RenderMode::Fragment
        } else {
            RenderMode::Page
        }
    }
}

/// Per-request page metadata for the base layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageData {
    pub is_logged_in: bool,
    pub is_service_admin: bool,
    pub title: String,
}

impl PageData {
    pub fn new(title: impl Into<String>, session: Option<&SessionContext>) -> Self {
        Self {
            is_logged_in: session.is_some(),
            is_service_admin: session.is_some_and(SessionContext::is_service_admin),
            title: title.into(),
        }
    }
}

/// Navigation bar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
    pub fragment_href: String,
}

impl NavLink {
    pub fn new(label: &'static str, href: &str) -> Self {
        Self {
            label,
            href: href.to_string(),
            fragment_href: format!("{DASHBOARD_PAGES_PREFIX}{href}"),
        }
    }
}

/// Site chrome shared by every full-page render.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    site_name: String,
    navigation: Vec<NavLink>,
}

impl TemplateRegistry {
    pub fn new(site_name: impl Into<String>, navigation: Vec<NavLink>) -> Self {
        Self {
            site_name: site_name.into(),
            navigation,
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn navigation(&self) -> &[NavLink] {
        &self.navigation
    }

    pub fn favicon(&self) -> &'static str {
        FAVICON
    }

    pub fn render_fragment<T: Template>(&self, content: &T) -> Result<String, askama::Error> {
        content.render()
    }

    pub fn render_page<T: Template>(&self, page: &PageData, content: &T) -> Result<String, askama::Error> {
        let content = content.render()?;
        BasePage {
            site_name: &self.site_name,
            page,
            navigation: &self.navigation,
            content: &content,
        }
        .render()
    }

    pub fn render<T: Template>(
        &self,
        mode: RenderMode,
        page: &PageData,
        content: &T,
    ) -> Result<String, askama::Error> {
        match mode {
            RenderMode::Page => self.render_page(page, content),
            RenderMode::Fragment => self.render_fragment(content),
        }
    }
}
