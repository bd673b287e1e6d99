use serde::{Deserialize, Serialize};

use crate::model::join_url;
use crate::overlay_state::Mode;

pub const NETWORK_ADMIN_LINKS: [(&str, &str, &str); 6] = [
    ("dashboard", "Dashboard", ""),
    ("sites", "Sites", "sites.php"),
    ("users", "Users", "users.php"),
    ("themes", "Themes", "themes.php"),
    ("plugins", "Plugins", "plugins.php"),
    ("settings", "Settings", "settings.php"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAdminLink {
    pub key: String,
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAdminPanel {
    pub title: String,
    pub links: Vec<NetworkAdminLink>,
}

/// Only network administrators with a known admin URL get the panel, and
/// never while a search is active.
pub fn network_admin_panel(
    is_network_admin: bool,
    network_admin_url: &str,
    mode: Mode,
) -> Option<NetworkAdminPanel> {
    if !is_network_admin || network_admin_url.trim().is_empty() || mode == Mode::Searching {
        return None;
    }

    let base = network_admin_url.trim();
    let links = NETWORK_ADMIN_LINKS
        .iter()
        .map(|(key, label, page)| NetworkAdminLink {
            key: key.to_string(),
            label: label.to_string(),
            url: join_url(base, page),
        })
        .collect();

    Some(NetworkAdminPanel {
        title: "Network Admin".to_string(),
        links,
    })
}
