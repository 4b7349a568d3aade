//! Live adapter for the `BugTracker` port using the Bugzilla REST API.

use std::sync::Mutex;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PortError;
use crate::ports::{
    Bug, BugId, BugQuery, BugTracker, BugUpdate, CredentialPrompt, Flag, TrackerFuture,
};

const API_KEY_HEADER: &str = "X-BUGZILLA-API-KEY";
const TOKEN_HEADER: &str = "X-BUGZILLA-TOKEN";
const SEARCH_FIELDS: &str = "id,assigned_to,status";

/// Bugzilla client authenticated by API key or by an interactive login token.
pub struct LiveBugzilla {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    token: Mutex<Option<String>>,
    prompt: Box<dyn CredentialPrompt>,
}

impl LiveBugzilla {
    /// Creates a client for the instance at `base_url`.
    ///
    /// With an `api_key` the session is considered established up front;
    /// without one, [`BugTracker::authenticate`] falls back to `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        prompt: Box<dyn CredentialPrompt>,
    ) -> Result<Self, String> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            token: Mutex::new(None),
            prompt,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/rest/{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, PortError> {
        if let Some(key) = &self.api_key {
            return Ok(request.header(API_KEY_HEADER, key));
        }
        let token = self.token.lock().map_err(|_| "session token lock poisoned")?.clone();
        Ok(match token {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, PortError> {
        // Request URLs may carry login credentials; keep them out of messages.
        let response = self.authorize(request)?.send().await.map_err(|e| -> PortError {
            format!("{context}: request failed: {}", e.without_url()).into()
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| -> PortError {
            format!("{context}: failed to read response: {}", e.without_url()).into()
        })?;
        decode(status, &body, context)
    }

    async fn verify_api_key(&self) -> Result<(), PortError> {
        let who: WhoAmI = self.send(self.client.get(self.endpoint("whoami")), "whoami").await?;
        tracing::info!(user = %who.name, "authenticated with API key");
        Ok(())
    }

    async fn interactive_login(&self) -> Result<(), PortError> {
        let creds = self.prompt.credentials()?;
        let request = self
            .client
            .get(self.endpoint("login"))
            .query(&[("login", creds.login.as_str()), ("password", creds.password.as_str())]);
        let login: LoginResponse = self.send(request, "login").await?;
        *self.token.lock().map_err(|_| "session token lock poisoned")? = Some(login.token);
        tracing::info!(user = %creds.login, id = login.id, "logged in");
        Ok(())
    }

    async fn search_bugs(&self, query: &BugQuery) -> Result<Vec<Bug>, PortError> {
        let blocks = query.blocks.to_string();
        let request = self.client.get(self.endpoint("bug")).query(&[
            ("product", query.product.as_str()),
            ("bug_status", query.status.as_str()),
            ("version", query.version.as_str()),
            ("blocks", blocks.as_str()),
            ("include_fields", SEARCH_FIELDS),
        ]);
        let found: SearchResponse = self.send(request, "search").await?;
        Ok(found
            .bugs
            .into_iter()
            .map(|raw| Bug {
                weburl: show_bug_url(&self.base_url, raw.id),
                id: raw.id,
                assigned_to: raw.assigned_to,
                status: raw.status,
            })
            .collect())
    }

    async fn update_bugs(&self, ids: &[BugId], update: &BugUpdate) -> Result<(), PortError> {
        let Some(first) = ids.first() else {
            return Err("update called without any bug ids".into());
        };
        let body = UpdateRequest {
            ids,
            comment: CommentBody { body: &update.comment },
            flags: &update.flags,
        };
        let request = self.client.put(self.endpoint(&format!("bug/{first}"))).json(&body);
        let context = format!("update bug {first}");
        let _: serde_json::Value = self.send(request, &context).await?;
        Ok(())
    }
}

/// Builds the browser URL of a bug.
#[must_use]
pub fn show_bug_url(base_url: &str, id: BugId) -> String {
    format!("{}/show_bug.cgi?id={id}", base_url.trim_end_matches('/'))
}

/// Error envelope Bugzilla returns on failures.
#[derive(Deserialize)]
struct BugzillaError {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

#[derive(Deserialize)]
struct WhoAmI {
    name: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    id: u64,
    token: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    bugs: Vec<RawBug>,
}

#[derive(Deserialize)]
struct RawBug {
    id: BugId,
    assigned_to: String,
    status: String,
}

#[derive(Serialize)]
struct UpdateRequest<'a> {
    ids: &'a [BugId],
    comment: CommentBody<'a>,
    flags: &'a [Flag],
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

/// Turns a Bugzilla response into `T`, surfacing server-side errors.
fn decode<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    context: &str,
) -> Result<T, PortError> {
    if let Ok(envelope) = serde_json::from_str::<BugzillaError>(body) {
        if envelope.error || !status.is_success() {
            let message = envelope.message.unwrap_or_else(|| body.to_string());
            let code = envelope.code.map_or_else(String::new, |code| format!(" code {code}"));
            return Err(format!(
                "{context}: Bugzilla error ({}{code}): {message}",
                status.as_u16()
            )
            .into());
        }
    } else if !status.is_success() {
        return Err(format!("{context}: HTTP {}: {body}", status.as_u16()).into());
    }
    serde_json::from_str(body)
        .map_err(|e| format!("{context}: failed to parse Bugzilla response: {e}").into())
}

impl BugTracker for LiveBugzilla {
    fn authenticate(&self) -> TrackerFuture<'_, ()> {
        Box::pin(async move {
            if self.api_key.is_some() {
                self.verify_api_key().await
            } else {
                self.interactive_login().await
            }
        })
    }

    fn search<'a>(&'a self, query: &'a BugQuery) -> TrackerFuture<'a, Vec<Bug>> {
        Box::pin(self.search_bugs(query))
    }

    fn update<'a>(&'a self, ids: &'a [BugId], update: &'a BugUpdate) -> TrackerFuture<'a, ()> {
        Box::pin(self.update_bugs(ids, update))
    }
}
