pub mod action_executor;
pub mod action_menu;
pub mod config;
pub mod contract;
pub mod controller;
pub mod hotkey;
pub mod kv_store;
pub mod logging;
pub mod model;
pub mod navigation;
pub mod network_admin;
pub mod overlay_state;
pub mod preferences;
pub mod projector;
pub mod recent;
pub mod runtime;
pub mod search;
pub mod settings;
pub mod subscriptions;
pub mod transport;
pub mod view;
