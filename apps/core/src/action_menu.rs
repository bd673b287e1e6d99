use serde::{Deserialize, Serialize};

use crate::action_executor::SiteAction;
use crate::model::SiteId;

pub const MENU_ACTIONS: [SiteAction; 1] = [SiteAction::NewPost];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuPlacement {
    Below,
    Above,
}

impl MenuPlacement {
    /// Decided once, when the menu opens, from the space left under its anchor.
    pub fn for_space_below(space_below_px: f64, threshold_px: u32) -> Self {
        if space_below_px < f64::from(threshold_px) {
            Self::Above
        } else {
            Self::Below
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMenu {
    pub site_id: SiteId,
    pub placement: MenuPlacement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChange {
    Opened(OpenMenu),
    Closed(SiteId),
    Unchanged,
}

/// Secondary action menu; at most one entry's menu is open at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionMenuState {
    open: Option<OpenMenu>,
}

impl ActionMenuState {
    pub fn open_menu(&self) -> Option<OpenMenu> {
        self.open
    }

    pub fn is_open_for(&self, site_id: SiteId) -> bool {
        self.open.is_some_and(|menu| menu.site_id == site_id)
    }

    pub fn toggle(&mut self, site_id: SiteId, space_below_px: f64, threshold_px: u32) -> MenuChange {
        if self.is_open_for(site_id) {
            self.open = None;
            return MenuChange::Closed(site_id);
        }

        let menu = OpenMenu {
            site_id,
            placement: MenuPlacement::for_space_below(space_below_px, threshold_px),
        };
        self.open = Some(menu);
        MenuChange::Opened(menu)
    }

    pub fn close(&mut self) -> MenuChange {
        match self.open.take() {
            Some(menu) => MenuChange::Closed(menu.site_id),
            None => MenuChange::Unchanged,
        }
    }

    /// Pointer leaving an entry only closes that entry's menu.
    pub fn close_for(&mut self, site_id: SiteId) -> MenuChange {
        if self.is_open_for(site_id) {
            return self.close();
        }
        MenuChange::Unchanged
    }
}
