use serde::{Deserialize, Serialize};

use crate::controller::{Effect, UiEvent};
use crate::model::Site;
use crate::view::RenderModel;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreRequest {
    Event(UiEvent),
    Render,
    ListSites,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventResponse {
    pub effects: Vec<Effect>,
    /// Present while the overlay is open after the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<RenderModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderResponse {
    pub view: Option<RenderModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SitesResponse {
    pub sites: Vec<Site>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreResponse {
    Event(EventResponse),
    Render(RenderResponse),
    Sites(SitesResponse),
}
