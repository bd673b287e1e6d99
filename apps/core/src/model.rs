use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub type SiteId = u64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub blog_id: SiteId,
    pub name: String,
    pub site_url: String,
    pub admin_url: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub is_current: bool,
}

impl Site {
    pub fn new(blog_id: SiteId, name: &str, site_url: &str, admin_url: &str) -> Self {
        Self {
            blog_id,
            name: name.to_string(),
            site_url: site_url.to_string(),
            admin_url: admin_url.to_string(),
            path: "/".to_string(),
            is_current: false,
        }
    }

    pub fn with_current(mut self, is_current: bool) -> Self {
        self.is_current = is_current;
        self
    }

    pub fn with_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// `needle` must already be normalized with [`normalize_for_search`].
    pub fn matches(&self, needle: &str) -> bool {
        normalize_for_search(&self.name).contains(needle)
            || normalize_for_search(&self.site_url).contains(needle)
    }

    pub fn display_url(&self) -> String {
        display_url(&self.site_url)
    }
}

/// Shape of the data the host page seeds before the switcher starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HostPayload {
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub current_site: SiteId,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub is_multisite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_network_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_admin_url: Option<String>,
}

impl HostPayload {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Explicit construction input for the controller, built once from the host payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitcherContext {
    pub sites: Vec<Site>,
    pub current_site_id: SiteId,
    pub user_id: u64,
    pub is_network_admin: bool,
    pub network_admin_url: String,
}

impl SwitcherContext {
    /// Returns `None` when the payload is absent or the install is not multi-tenant.
    pub fn from_payload(payload: Option<HostPayload>) -> Option<Self> {
        let payload = payload?;
        if !payload.is_multisite {
            log::info!("payload is not flagged multisite; switcher not initialized");
            return None;
        }

        let mut seen = HashSet::new();
        let mut sites = Vec::with_capacity(payload.sites.len());
        for site in payload.sites {
            if !seen.insert(site.blog_id) {
                log::warn!("dropping duplicate catalog entry blog_id={}", site.blog_id);
                continue;
            }
            sites.push(site);
        }

        let current_flags = sites.iter().filter(|site| site.is_current).count();
        if current_flags > 1 {
            log::warn!("catalog has {current_flags} sites flagged current; using currentSite id");
        }

        Some(Self {
            sites,
            current_site_id: payload.current_site,
            user_id: payload.user_id,
            is_network_admin: payload.is_network_admin.unwrap_or(false),
            network_admin_url: payload.network_admin_url.unwrap_or_default(),
        })
    }

    /// Parses a raw payload; malformed JSON is treated the same as an absent payload.
    pub fn bootstrap(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        match HostPayload::from_json(raw) {
            Ok(payload) => Self::from_payload(Some(payload)),
            Err(error) => {
                log::warn!("ignoring unreadable host payload: {error}");
                None
            }
        }
    }

    pub fn site(&self, id: SiteId) -> Option<&Site> {
        self.sites.iter().find(|site| site.blog_id == id)
    }

    pub fn has_session(&self) -> bool {
        self.user_id > 0
    }
}

pub fn normalize_for_search(input: &str) -> String {
    input.trim().to_lowercase()
}

pub fn display_url(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme
        .strip_suffix('/')
        .unwrap_or(without_scheme)
        .to_string()
}

/// Appends `page` to a base URL, inserting the separator when the base lacks one.
pub fn join_url(base: &str, page: &str) -> String {
    if page.is_empty() || base.ends_with('/') {
        format!("{base}{page}")
    } else {
        format!("{base}/{page}")
    }
}

#[cfg(test)]
mod tests {
    use super::{display_url, join_url, HostPayload, Site, SwitcherContext};

    #[test]
    fn display_url_strips_scheme_and_trailing_slash() {
        assert_eq!(
            display_url("https://example.test/alachua/"),
            "example.test/alachua"
        );
        assert_eq!(display_url("http://example.test"), "example.test");
        assert_eq!(display_url("example.test/"), "example.test");
    }

    #[test]
    fn join_url_inserts_missing_separator() {
        assert_eq!(join_url("https://a.test/wp-admin/", "post-new.php"), "https://a.test/wp-admin/post-new.php");
        assert_eq!(join_url("https://a.test/wp-admin", "post-new.php"), "https://a.test/wp-admin/post-new.php");
        assert_eq!(join_url("https://a.test/wp-admin", ""), "https://a.test/wp-admin");
    }

    #[test]
    fn payload_parses_camel_case_fields() {
        let raw = r#"{
            "sites": [{"blogId": 1, "name": "Main", "siteUrl": "https://a.test/", "adminUrl": "https://a.test/wp-admin/", "path": "/", "isCurrent": true}],
            "currentSite": 1,
            "userId": 7,
            "isMultisite": true,
            "isNetworkAdmin": true,
            "networkAdminUrl": "https://a.test/wp-admin/network/"
        }"#;

        let payload = HostPayload::from_json(raw).unwrap();
        assert_eq!(payload.sites.len(), 1);
        assert!(payload.sites[0].is_current);
        assert_eq!(payload.user_id, 7);
        assert_eq!(payload.is_network_admin, Some(true));
    }

    #[test]
    fn context_requires_multisite_flag() {
        let payload = HostPayload {
            sites: vec![Site::new(1, "Main", "https://a.test/", "https://a.test/wp-admin/")],
            current_site: 1,
            user_id: 1,
            is_multisite: false,
            is_network_admin: None,
            network_admin_url: None,
        };
        assert!(SwitcherContext::from_payload(Some(payload)).is_none());
        assert!(SwitcherContext::from_payload(None).is_none());
        assert!(SwitcherContext::bootstrap(Some("{not-json")).is_none());
    }

    #[test]
    fn context_drops_duplicate_blog_ids() {
        let payload = HostPayload {
            sites: vec![
                Site::new(1, "Main", "https://a.test/", "https://a.test/wp-admin/"),
                Site::new(1, "Shadow", "https://b.test/", "https://b.test/wp-admin/"),
            ],
            current_site: 1,
            user_id: 1,
            is_multisite: true,
            is_network_admin: None,
            network_admin_url: None,
        };
        let context = SwitcherContext::from_payload(Some(payload)).unwrap();
        assert_eq!(context.sites.len(), 1);
        assert_eq!(context.sites[0].name, "Main");
    }
}
