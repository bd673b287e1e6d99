use thiserror::Error;

use crate::model::{join_url, Site};

pub const NEW_POST_PAGE: &str = "post-new.php";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("empty url")]
    EmptyUrl,
    #[error("url is not absolute: {0}")]
    NotAbsolute(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteAction {
    Dashboard,
    Visit,
    NewPost,
}

impl SiteAction {
    /// Unknown or missing keys fall back to the dashboard.
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some("visit") => Self::Visit,
            Some("new-post") => Self::NewPost,
            _ => Self::Dashboard,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Visit => "visit",
            Self::NewPost => "new-post",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Visit => "Visit Site",
            Self::NewPost => "New Post",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    CurrentDocument(String),
    NewContext(String),
}

pub fn validate_url(url: &str) -> Result<&str, LaunchError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::EmptyUrl);
    }
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(LaunchError::NotAbsolute(trimmed.to_string()));
    }
    Ok(trimmed)
}

pub fn resolve_target(site: &Site, action: SiteAction) -> Result<NavigationTarget, LaunchError> {
    match action {
        SiteAction::Dashboard => {
            let url = validate_url(&site.admin_url)?;
            Ok(NavigationTarget::CurrentDocument(url.to_string()))
        }
        SiteAction::Visit => {
            let url = validate_url(&site.site_url)?;
            Ok(NavigationTarget::NewContext(url.to_string()))
        }
        SiteAction::NewPost => {
            let base = validate_url(&site.admin_url)?;
            Ok(NavigationTarget::CurrentDocument(join_url(base, NEW_POST_PAGE)))
        }
    }
}
