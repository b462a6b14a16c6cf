// Wialon repository implementation - the vendor's svc/params/sid form
// protocol over HTTP. Thin by design: no retry, pagination, or rate
// limiting; failures surface to the caller.
use crate::application::fleet_repository::{FleetRepository, Session};
use crate::domain::telemetry::RawMessage;
use crate::domain::vehicle::Vehicle;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Unit-listing flags: base info plus the property blocks the dashboard
/// reads (name, custom fields, counters).
const UNIT_LIST_FLAGS: u64 = 0x0000_0001 | 0x0000_0002 | 0x0000_0008 | 0x0000_0020 | 0x0000_0200;
/// Load every message class in the window, capped per interval call.
const MESSAGE_FLAGS_MASK: u64 = 65535;
const MESSAGE_LOAD_COUNT: u64 = 5000;

#[derive(Debug, Error)]
pub enum WialonError {
    #[error("wialon api error {code} calling {svc}")]
    Api { svc: String, code: i64 },
    #[error("unexpected {svc} response shape: {source}")]
    Decode {
        svc: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct WialonRepository {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    eid: String,
}

#[derive(Debug, Deserialize)]
struct SearchItemsResponse {
    #[serde(default)]
    items: Vec<UnitItem>,
}

#[derive(Debug, Deserialize)]
struct UnitItem {
    id: u64,
    #[serde(default)]
    nm: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    /// Absent or null when the unit has no data in the window.
    #[serde(default)]
    messages: Option<Vec<RawMessage>>,
}

impl WialonRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// One-shot token exchange; the caller owns the resulting session
    /// handle and passes it back into every subsequent call.
    pub async fn login(&self, token: &str) -> Result<Session, WialonError> {
        let response: LoginResponse = self
            .call("token/login", &serde_json::json!({ "token": token }), None)
            .await?;
        Ok(Session::new(response.eid))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        svc: &str,
        params: &serde_json::Value,
        session: Option<&Session>,
    ) -> Result<T, WialonError> {
        let mut form = vec![("svc", svc.to_string()), ("params", params.to_string())];
        if let Some(session) = session {
            form.push(("sid", session.id().to_string()));
        }

        let body: serde_json::Value = self
            .client
            .post(format!("{}/wialon/ajax.html", self.base_url))
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // The vendor reports failures in-band as an error code
        if let Some(code) = body.get("error").and_then(|e| e.as_i64()) {
            return Err(WialonError::Api {
                svc: svc.to_string(),
                code,
            });
        }

        serde_json::from_value(body).map_err(|source| WialonError::Decode {
            svc: svc.to_string(),
            source,
        })
    }
}

#[async_trait]
impl FleetRepository for WialonRepository {
    async fn list_vehicles(&self, session: &Session) -> anyhow::Result<Vec<Vehicle>> {
        let params = serde_json::json!({
            "spec": {
                "itemsType": "avl_unit",
                "propName": "sys_name",
                "propValueMask": "*",
                "sortType": "sys_name"
            },
            "force": 1,
            "flags": UNIT_LIST_FLAGS,
            "from": 0,
            "to": 0
        });

        let response: SearchItemsResponse = self
            .call("core/search_items", &params, Some(session))
            .await
            .context("unit directory lookup failed")?;

        Ok(response
            .items
            .into_iter()
            .map(|item| Vehicle::new(item.id, item.nm))
            .collect())
    }

    async fn load_messages(
        &self,
        session: &Session,
        unit_id: u64,
        from: i64,
        to: i64,
    ) -> anyhow::Result<Vec<RawMessage>> {
        let params = serde_json::json!({
            "itemId": unit_id,
            "timeFrom": from,
            "timeTo": to,
            "flags": 0,
            "flagsMask": MESSAGE_FLAGS_MASK,
            "loadCount": MESSAGE_LOAD_COUNT
        });

        let response: MessagesResponse = self
            .call("messages/load_interval", &params, Some(session))
            .await
            .with_context(|| format!("message load failed for unit {unit_id}"))?;

        Ok(response.messages.unwrap_or_default())
    }
}
