use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Host listeners the controller owns. Each one is set up and torn down by a
/// state transition, never independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subscription {
    /// Document-level keydown for the activation shortcut. Lives while mounted.
    GlobalShortcut,
    /// Click interception on the host's native trigger. Lives while mounted.
    TriggerIntercept,
    /// Pointer-down outside the modal surface. Lives while open.
    OutsideClick,
    /// Page scroll lock. Lives while open.
    PageScrollLock,
    /// Pointer-down outside the open action menu.
    MenuOutsideClick,
    /// Cancel key scoped to the open action menu.
    MenuEscape,
}

pub const OPEN_SUBSCRIPTIONS: [Subscription; 2] =
    [Subscription::OutsideClick, Subscription::PageScrollLock];

pub const MENU_SUBSCRIPTIONS: [Subscription; 2] =
    [Subscription::MenuOutsideClick, Subscription::MenuEscape];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionSet {
    active: BTreeSet<Subscription>,
}

impl SubscriptionSet {
    /// Returns false when the subscription was already active.
    pub fn subscribe(&mut self, subscription: Subscription) -> bool {
        self.active.insert(subscription)
    }

    /// Returns false when the subscription was not active.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.active.remove(&subscription)
    }

    pub fn unsubscribe_all(&mut self) -> Vec<Subscription> {
        std::mem::take(&mut self.active).into_iter().collect()
    }

    pub fn is_active(&self, subscription: Subscription) -> bool {
        self.active.contains(&subscription)
    }

    pub fn active(&self) -> impl Iterator<Item = Subscription> + '_ {
        self.active.iter().copied()
    }
}
