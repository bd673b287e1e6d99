use serde::{Deserialize, Serialize};

use crate::action_menu::{MenuPlacement, OpenMenu, MENU_ACTIONS};
use crate::model::SiteId;
use crate::network_admin::{network_admin_panel, NetworkAdminPanel};
use crate::overlay_state::Mode;
use crate::projector::{SectionKind, ViewModel};

pub const EMPTY_RESULTS_MESSAGE: &str = "No sites found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderEntry {
    pub index: usize,
    pub blog_id: SiteId,
    pub name: String,
    pub display_url: String,
    pub is_active: bool,
    pub is_current: bool,
    pub menu_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_id_badge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSection {
    pub kind: SectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub entries: Vec<RenderEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderMenu {
    pub site_id: SiteId,
    pub placement: MenuPlacement,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyHint {
    pub keys: String,
    pub label: String,
}

/// Everything the host needs to draw the open overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderModel {
    pub title: String,
    pub total_sites: usize,
    pub dark_mode: bool,
    pub theme_toggle_label: String,
    pub query: String,
    pub mode: Mode,
    pub active_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_admin: Option<NetworkAdminPanel>,
    pub sections: Vec<RenderSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<RenderMenu>,
    pub shortcut_label: String,
    pub hints: Vec<KeyHint>,
}

pub struct RenderState<'a> {
    pub total_sites: usize,
    pub current_site_id: SiteId,
    pub dark_mode: bool,
    pub query: &'a str,
    pub active_index: usize,
    pub open_menu: Option<OpenMenu>,
    pub is_network_admin: bool,
    pub network_admin_url: &'a str,
    pub shortcut_label: &'a str,
}

pub fn build(view: &ViewModel<'_>, state: &RenderState<'_>) -> RenderModel {
    let mode = Mode::for_query(state.query);
    let mut next_index = 0_usize;

    let sections = view
        .sections()
        .into_iter()
        .map(|section| {
            let entries = section
                .sites
                .iter()
                .map(|site| {
                    let index = next_index;
                    next_index += 1;
                    RenderEntry {
                        index,
                        blog_id: site.blog_id,
                        name: site.name.clone(),
                        display_url: site.display_url(),
                        is_active: index == state.active_index,
                        is_current: site.is_current || site.blog_id == state.current_site_id,
                        menu_open: state
                            .open_menu
                            .is_some_and(|menu| menu.site_id == site.blog_id),
                        blog_id_badge: state
                            .is_network_admin
                            .then(|| format!("ID: {}", site.blog_id)),
                    }
                })
                .collect();
            RenderSection {
                kind: section.kind,
                heading: section.kind.heading().map(str::to_string),
                entries,
            }
        })
        .collect();

    let menu = state.open_menu.map(|menu| RenderMenu {
        site_id: menu.site_id,
        placement: menu.placement,
        items: MENU_ACTIONS
            .iter()
            .map(|action| MenuItem {
                key: action.key().to_string(),
                label: action.label().to_string(),
            })
            .collect(),
    });

    RenderModel {
        title: "My Sites".to_string(),
        total_sites: state.total_sites,
        dark_mode: state.dark_mode,
        theme_toggle_label: if state.dark_mode {
            "Switch to light mode".to_string()
        } else {
            "Switch to dark mode".to_string()
        },
        query: state.query.to_string(),
        mode,
        active_index: state.active_index,
        network_admin: network_admin_panel(state.is_network_admin, state.network_admin_url, mode),
        sections,
        empty_message: view
            .is_empty_result()
            .then(|| EMPTY_RESULTS_MESSAGE.to_string()),
        menu,
        shortcut_label: state.shortcut_label.to_string(),
        hints: key_hints(),
    }
}

fn key_hints() -> Vec<KeyHint> {
    [
        ("\u{2191}\u{2193}", "Navigate"),
        ("\u{21B5}", "Open"),
        ("esc", "Close"),
    ]
    .iter()
    .map(|(keys, label)| KeyHint {
        keys: keys.to_string(),
        label: label.to_string(),
    })
    .collect()
}
