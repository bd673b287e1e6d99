use serde::{Deserialize, Serialize};

use crate::action_executor::{resolve_target, NavigationTarget, SiteAction};
use crate::action_menu::{ActionMenuState, MenuChange};
use crate::config::Config;
use crate::hotkey::{parse_hotkey, Hotkey, KeyEvent};
use crate::model::{Site, SiteId, SwitcherContext};
use crate::navigation::{NavKey, NavigationIndex, NavigationOutcome, ScrollBlock};
use crate::overlay_state::{Mode, OverlayState, ToggleAction};
use crate::preferences::{PreferenceBackend, PreferenceStore};
use crate::projector::{project, ViewModel};
use crate::recent::RecentList;
use crate::subscriptions::{Subscription, SubscriptionSet, MENU_SUBSCRIPTIONS, OPEN_SUBSCRIPTIONS};
use crate::view::{self, RenderModel, RenderState};

/// Input from the host page, already reduced to what the switcher cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    KeyDown(KeyEvent),
    TriggerActivated,
    QueryChanged {
        value: String,
    },
    ClearQuery,
    PointerEnter {
        index: usize,
    },
    ActivateEntry {
        index: usize,
        #[serde(default)]
        action: Option<String>,
    },
    OutsideClick,
    ToggleDarkMode,
    ToggleEntryMenu {
        index: usize,
        space_below: f64,
    },
    ChooseMenuAction {
        index: usize,
        action: String,
    },
    PointerDownOutsideMenu,
    PointerLeaveEntry {
        index: usize,
    },
}

/// Side effects the host must apply, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Subscribe { subscription: Subscription },
    Unsubscribe { subscription: Subscription },
    PreventDefault,
    LockPageScroll,
    ReleasePageScroll,
    FocusSearchInput,
    FocusTrigger,
    FocusMenuControl { site_id: SiteId },
    ScrollIntoView { index: usize, block: ScrollBlock },
    Navigate { url: String },
    OpenInNewContext { url: String },
}

pub struct SiteSwitcher<B> {
    context: SwitcherContext,
    prefs: PreferenceStore<B>,
    shortcut: Hotkey,
    shortcut_label: String,
    menu_flip_threshold_px: u32,
    trigger_present: bool,
    mounted: bool,
    overlay: OverlayState,
    query: String,
    nav: NavigationIndex,
    menus: ActionMenuState,
    recent: RecentList,
    dark_mode: bool,
    subscriptions: SubscriptionSet,
}

impl<B: PreferenceBackend> SiteSwitcher<B> {
    pub fn new(
        context: SwitcherContext,
        prefs: PreferenceStore<B>,
        cfg: &Config,
        trigger_present: bool,
    ) -> Self {
        let shortcut = match parse_hotkey(&cfg.shortcut) {
            Ok(hotkey) => hotkey,
            Err(error) => {
                log::warn!("shortcut '{}' rejected ({error}); using default", cfg.shortcut);
                Hotkey::default_shortcut()
            }
        };
        let shortcut_label = shortcut.label(cfg.mac_shortcut_labels);
        let recent = prefs.recent(context.user_id);
        let dark_mode = prefs.dark_mode();

        let mut switcher = Self {
            context,
            prefs,
            shortcut,
            shortcut_label,
            menu_flip_threshold_px: cfg.menu_flip_threshold_px,
            trigger_present,
            mounted: false,
            overlay: OverlayState::default(),
            query: String::new(),
            nav: NavigationIndex::default(),
            menus: ActionMenuState::default(),
            recent,
            dark_mode,
            subscriptions: SubscriptionSet::default(),
        };
        switcher.reset_cursor();
        switcher
    }

    /// Attaches the always-on triggers. Calling twice attaches nothing new.
    pub fn mount(&mut self) -> Vec<Effect> {
        let mut fx = Vec::new();
        self.mounted = true;
        self.subscribe(Subscription::GlobalShortcut, &mut fx);
        if self.trigger_present {
            self.subscribe(Subscription::TriggerIntercept, &mut fx);
        } else {
            log::info!("native trigger not found; shortcut is the only activation path");
        }
        log::debug!(
            "switcher mounted sites={} user_id={}",
            self.context.sites.len(),
            self.context.user_id
        );
        fx
    }

    pub fn unmount(&mut self) -> Vec<Effect> {
        let mut fx = Vec::new();
        if self.overlay.dismiss() {
            fx.push(Effect::ReleasePageScroll);
        }
        self.query.clear();
        self.menus.close();
        for subscription in self.subscriptions.unsubscribe_all() {
            fx.push(Effect::Unsubscribe { subscription });
        }
        self.mounted = false;
        fx
    }

    pub fn handle(&mut self, event: UiEvent) -> Vec<Effect> {
        let mut fx = Vec::new();
        if !self.mounted {
            log::debug!("event ignored before mount: {event:?}");
            return fx;
        }

        match event {
            UiEvent::KeyDown(key) => self.on_key_down(&key, &mut fx),
            UiEvent::TriggerActivated => {
                fx.push(Effect::PreventDefault);
                self.toggle(&mut fx);
            }
            UiEvent::QueryChanged { value } => {
                if self.overlay.is_open() {
                    self.set_query(value, &mut fx);
                }
            }
            UiEvent::ClearQuery => {
                if self.overlay.is_open() {
                    self.set_query(String::new(), &mut fx);
                    fx.push(Effect::FocusSearchInput);
                }
            }
            UiEvent::PointerEnter { index } => {
                if self.overlay.is_open() && self.nav.set_active(index) {
                    push_scroll(index, &mut fx);
                }
            }
            UiEvent::ActivateEntry { index, action } => {
                if self.overlay.is_open() {
                    self.select_index(index, SiteAction::from_key(action.as_deref()), &mut fx);
                }
            }
            UiEvent::OutsideClick => self.close(&mut fx),
            UiEvent::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                self.prefs.set_dark_mode(self.dark_mode);
            }
            UiEvent::ToggleEntryMenu { index, space_below } => {
                self.toggle_menu(index, space_below, &mut fx);
            }
            UiEvent::ChooseMenuAction { index, action } => {
                if self.overlay.is_open() {
                    self.close_menu(false, &mut fx);
                    self.select_index(index, SiteAction::from_key(Some(&action)), &mut fx);
                }
            }
            UiEvent::PointerDownOutsideMenu => self.close_menu(false, &mut fx),
            UiEvent::PointerLeaveEntry { index } => {
                if let Some(site_id) = self.site_id_at(index) {
                    if let MenuChange::Closed(_) = self.menus.close_for(site_id) {
                        self.release_menu_subscriptions(&mut fx);
                    }
                }
            }
        }

        fx
    }

    pub fn view(&self) -> ViewModel<'_> {
        project(
            &self.context.sites,
            self.recent.ids(),
            self.context.current_site_id,
            &self.query,
        )
    }

    /// `None` while closed: nothing is drawn.
    pub fn render(&self) -> Option<RenderModel> {
        if !self.overlay.is_open() {
            return None;
        }
        let view = self.view();
        let state = RenderState {
            total_sites: self.context.sites.len(),
            current_site_id: self.context.current_site_id,
            dark_mode: self.dark_mode,
            query: &self.query,
            active_index: self.nav.active(),
            open_menu: self.menus.open_menu(),
            is_network_admin: self.context.is_network_admin,
            network_admin_url: &self.context.network_admin_url,
            shortcut_label: &self.shortcut_label,
        };
        Some(view::build(&view, &state))
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mode(&self) -> Mode {
        Mode::for_query(&self.query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_index(&self) -> usize {
        self.nav.active()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn recent_ids(&self) -> &[SiteId] {
        self.recent.ids()
    }

    pub fn open_menu_site(&self) -> Option<SiteId> {
        self.menus.open_menu().map(|menu| menu.site_id)
    }

    pub fn subscriptions(&self) -> &SubscriptionSet {
        &self.subscriptions
    }

    pub fn context(&self) -> &SwitcherContext {
        &self.context
    }

    pub fn sites(&self) -> &[Site] {
        &self.context.sites
    }

    pub fn shortcut_label(&self) -> &str {
        &self.shortcut_label
    }

    pub fn preferences(&self) -> &PreferenceStore<B> {
        &self.prefs
    }

    fn on_key_down(&mut self, key: &KeyEvent, fx: &mut Vec<Effect>) {
        if self.shortcut.matches(key) {
            fx.push(Effect::PreventDefault);
            self.toggle(fx);
            return;
        }

        if !self.overlay.is_open() {
            return;
        }
        let Some(nav_key) = NavKey::from_key(&key.key) else {
            return;
        };

        // The menu's own cancel handler runs first and stops propagation.
        if nav_key == NavKey::Escape && self.menus.open_menu().is_some() {
            fx.push(Effect::PreventDefault);
            self.close_menu(true, fx);
            return;
        }

        let before = self.nav.active();
        match self.nav.handle_key(nav_key) {
            NavigationOutcome::Moved(index) => {
                fx.push(Effect::PreventDefault);
                if index != before {
                    push_scroll(index, fx);
                }
            }
            NavigationOutcome::Select(index) => {
                fx.push(Effect::PreventDefault);
                self.select_index(index, SiteAction::Dashboard, fx);
            }
            NavigationOutcome::Cancel => {
                fx.push(Effect::PreventDefault);
                self.close(fx);
            }
            NavigationOutcome::Ignored => {}
        }
    }

    fn toggle(&mut self, fx: &mut Vec<Effect>) {
        match self.overlay.on_trigger() {
            ToggleAction::Open => self.enter_open(fx),
            ToggleAction::Close => self.exit_open(fx),
        }
    }

    fn close(&mut self, fx: &mut Vec<Effect>) {
        if self.overlay.dismiss() {
            self.exit_open(fx);
        }
    }

    fn enter_open(&mut self, fx: &mut Vec<Effect>) {
        self.query.clear();
        self.menus.close();
        self.reset_cursor();
        for subscription in OPEN_SUBSCRIPTIONS {
            self.subscribe(subscription, fx);
        }
        fx.push(Effect::LockPageScroll);
        fx.push(Effect::FocusSearchInput);
        log::debug!("switcher opened");
    }

    fn exit_open(&mut self, fx: &mut Vec<Effect>) {
        self.query.clear();
        self.close_menu(false, fx);
        for subscription in OPEN_SUBSCRIPTIONS {
            self.unsubscribe(subscription, fx);
        }
        fx.push(Effect::ReleasePageScroll);
        if self.trigger_present {
            fx.push(Effect::FocusTrigger);
        }
        self.reset_cursor();
        log::debug!("switcher closed");
    }

    fn set_query(&mut self, value: String, fx: &mut Vec<Effect>) {
        self.query = value;
        self.close_menu(false, fx);
        if self.reset_cursor() && !self.nav.is_empty() {
            push_scroll(0, fx);
        }
    }

    /// The flat list changed identity; the cursor always restarts at the top.
    fn reset_cursor(&mut self) -> bool {
        let len = self.view().navigation_len();
        self.nav.reset(len)
    }

    fn site_id_at(&self, index: usize) -> Option<SiteId> {
        self.view().site_at(index).map(|site| site.blog_id)
    }

    fn select_index(&mut self, index: usize, action: SiteAction, fx: &mut Vec<Effect>) {
        let Some(site) = self.view().site_at(index).cloned() else {
            log::debug!("activation ignored; no entry at index {index}");
            return;
        };

        // Recorded for every action kind, before any navigation.
        self.recent = self.prefs.add_recent(self.context.user_id, site.blog_id);

        match resolve_target(&site, action) {
            Ok(NavigationTarget::CurrentDocument(url)) => fx.push(Effect::Navigate { url }),
            Ok(NavigationTarget::NewContext(url)) => fx.push(Effect::OpenInNewContext { url }),
            Err(error) => {
                log::warn!(
                    "cannot {} site blog_id={}: {error}",
                    action.key(),
                    site.blog_id
                );
                self.reset_cursor();
                return;
            }
        }
        self.close(fx);
    }

    fn toggle_menu(&mut self, index: usize, space_below: f64, fx: &mut Vec<Effect>) {
        if !self.overlay.is_open() {
            return;
        }
        let Some(site_id) = self.site_id_at(index) else {
            return;
        };
        match self
            .menus
            .toggle(site_id, space_below, self.menu_flip_threshold_px)
        {
            MenuChange::Opened(_) => {
                for subscription in MENU_SUBSCRIPTIONS {
                    self.subscribe(subscription, fx);
                }
            }
            MenuChange::Closed(_) => self.release_menu_subscriptions(fx),
            MenuChange::Unchanged => {}
        }
    }

    fn close_menu(&mut self, refocus: bool, fx: &mut Vec<Effect>) {
        if let MenuChange::Closed(site_id) = self.menus.close() {
            self.release_menu_subscriptions(fx);
            if refocus {
                fx.push(Effect::FocusMenuControl { site_id });
            }
        }
    }

    fn release_menu_subscriptions(&mut self, fx: &mut Vec<Effect>) {
        for subscription in MENU_SUBSCRIPTIONS {
            self.unsubscribe(subscription, fx);
        }
    }

    fn subscribe(&mut self, subscription: Subscription, fx: &mut Vec<Effect>) {
        if self.subscriptions.subscribe(subscription) {
            fx.push(Effect::Subscribe { subscription });
        }
    }

    fn unsubscribe(&mut self, subscription: Subscription, fx: &mut Vec<Effect>) {
        if self.subscriptions.unsubscribe(subscription) {
            fx.push(Effect::Unsubscribe { subscription });
        }
    }
}

fn push_scroll(index: usize, fx: &mut Vec<Effect>) {
    fx.push(Effect::ScrollIntoView {
        index,
        block: ScrollBlock::Nearest,
    });
}

/// Builds a mounted switcher from an optional host payload; `None` means the
/// feature stays dormant (no listeners, nothing rendered).
pub fn initialize<B: PreferenceBackend>(
    context: Option<SwitcherContext>,
    prefs: PreferenceStore<B>,
    cfg: &Config,
    trigger_present: bool,
) -> Option<(SiteSwitcher<B>, Vec<Effect>)> {
    let context = context?;
    let mut switcher = SiteSwitcher::new(context, prefs, cfg, trigger_present);
    let fx = switcher.mount();
    Some((switcher, fx))
}
