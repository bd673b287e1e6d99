use serde::{Deserialize, Serialize};

use crate::contract::{CoreRequest, CoreResponse, EventResponse, RenderResponse, SitesResponse};
use crate::controller::SiteSwitcher;
use crate::preferences::PreferenceBackend;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidRequest,
    Unauthorized,
    NotMounted,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request<B: PreferenceBackend>(
    switcher: &mut SiteSwitcher<B>,
    request: CoreRequest,
) -> TransportResponse {
    if !switcher.is_mounted() {
        return error(ErrorCode::NotMounted, "switcher is not mounted");
    }

    let response = match request {
        CoreRequest::Event(event) => {
            let effects = switcher.handle(event);
            CoreResponse::Event(EventResponse {
                effects,
                view: switcher.render(),
            })
        }
        CoreRequest::Render => CoreResponse::Render(RenderResponse {
            view: switcher.render(),
        }),
        // Mirrors the sites route: only a logged-in user may list sites.
        CoreRequest::ListSites => {
            if !switcher.context().has_session() {
                return error(ErrorCode::Unauthorized, "a logged-in user is required");
            }
            CoreResponse::Sites(SitesResponse {
                sites: switcher.sites().to_vec(),
            })
        }
    };

    TransportResponse::Ok { response }
}

pub fn handle_json<B: PreferenceBackend>(switcher: &mut SiteSwitcher<B>, payload: &str) -> String {
    let response = match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(value) => match serde_json::from_value::<CoreRequest>(value) {
            Ok(request) => handle_request(switcher, request),
            Err(err) => error(ErrorCode::InvalidRequest, &err.to_string()),
        },
        Err(err) => error(ErrorCode::InvalidJson, &err.to_string()),
    };

    serde_json::to_string(&response).unwrap_or_else(|err| {
        log::error!("failed to encode transport response: {err}");
        r#"{"status":"err","error":{"code":"internal","message":"response encoding failed"}}"#
            .to_string()
    })
}

fn error(code: ErrorCode, message: &str) -> TransportResponse {
    TransportResponse::Err {
        error: ErrorResponse {
            code,
            message: message.to_string(),
        },
    }
}
