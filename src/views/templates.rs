//! Askama template contexts.

use askama::Template;

use super::{FormField, NavLink, PageData};

/// Layout wrapping a rendered fragment.
#[derive(Template)]
#[template(path = "base.html")]
pub struct BasePage<'a> {
    pub site_name: &'a str,
    pub page: &'a PageData,
    pub navigation: &'a [NavLink],
    pub content: &'a str,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeView {
    pub site_name: String,
    pub username: Option<String>,
    pub navigation: Vec<NavLink>,
}

/// One table row with its navigation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub individual_url: String,
    pub push_url: String,
    pub cells: Vec<String>,
}

#[derive(Template)]
#[template(path = "table.html")]
pub struct TableView {
    pub title: String,
    pub list_url: String,
    pub new_url: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<TableRow>,
    pub page: u32,
    pub total_count: u64,
}

#[derive(Template)]
#[template(path = "editor.html")]
pub struct EditorView {
    pub title: String,
    pub update_url: String,
    pub archive_url: String,
    pub list_url: String,
    pub fields: Vec<FormField>,
    /// Child collections reachable from this entity.
    pub links: Vec<NavLink>,
}

#[derive(Template)]
#[template(path = "creator.html")]
pub struct CreatorView {
    pub title: String,
    pub create_url: String,
    pub fields: Vec<FormField>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginView {
    pub submit_url: String,
    pub registration_url: &'static str,
}

impl LoginView {
    pub fn new(submit_url: impl Into<String>) -> Self {
        Self {
            submit_url: submit_url.into(),
            registration_url: "/components/registration_prompt",
        }
    }
}

#[derive(Template)]
#[template(path = "registration.html")]
pub struct RegistrationView {
    pub submit_url: &'static str,
    pub login_url: &'static str,
}

impl Default for RegistrationView {
    fn default() -> Self {
        Self {
            submit_url: "/register",
            login_url: "/components/login_prompt",
        }
    }
}

#[derive(Template)]
#[template(path = "totp_setup.html")]
pub struct TotpSetupView {
    pub user_id: u64,
    pub qr_code: String,
    pub verify_url: &'static str,
}
