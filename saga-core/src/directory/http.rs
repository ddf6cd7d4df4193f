// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP directory client
//!
//! Talks to a WeCom-style enterprise API:
//! - `GET  gettoken`     access token for the corp/secret pair
//! - `GET  user/list`    department members, recursively
//! - `GET  user/get`     a single member
//! - `GET  agent/get`    the application's visible range
//! - `POST message/send` text message to members
//!
//! Every response carries `errcode`/`errmsg`; a non-zero code is an error.
//! The access token is cached until shortly before it expires and refreshed
//! once when the API reports it expired or invalid.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{DirectoryClient, DirectoryError, DirectoryResult};
use crate::config::DirectoryConfig;
use crate::contact::DirectoryUser;
use crate::context::SyncContext;

/// Error codes meaning the access token must be fetched again.
const TOKEN_REJECTED_CODES: [i64; 3] = [40001, 40014, 42001];

/// Error code returned by `user/get` for an unknown user ID.
const USER_NOT_FOUND_CODE: i64 = 60111;

/// Refresh the token this long before the server-side expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + TOKEN_EXPIRY_MARGIN < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    7200
}

#[derive(Deserialize)]
struct UserListResponse {
    #[serde(default)]
    userlist: Vec<DirectoryUser>,
}

#[derive(Deserialize, Default)]
struct AllowUsers {
    #[serde(default)]
    user: Vec<AllowUser>,
}

#[derive(Deserialize)]
struct AllowUser {
    userid: String,
}

#[derive(Deserialize)]
struct AgentResponse {
    #[serde(default)]
    allow_userinfos: AllowUsers,
}

#[derive(Deserialize)]
struct SendResponse {
    #[serde(default)]
    invaliduser: String,
}

/// Blocking HTTP client for the directory API.
pub struct HttpDirectoryClient {
    client: Client,
    config: DirectoryConfig,
    token: Mutex<Option<AccessToken>>,
}

impl HttpDirectoryClient {
    /// Create a new directory client from config
    pub fn new(config: &DirectoryConfig) -> DirectoryResult<Self> {
        config
            .validate()
            .map_err(|e| DirectoryError::Config(e.to_string()))?;

        let mut builder = Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("saga/{}", env!("CARGO_PKG_VERSION")));

        if let Some(proxy_url) = &config.proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            config: config.clone(),
            token: Mutex::new(None),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.config.api_base_url.trim_end_matches('/')
    }

    fn request_timeout(&self, ctx: &SyncContext) -> Duration {
        match ctx.remaining() {
            Some(remaining) => remaining.min(self.config.timeout()),
            None => self.config.timeout(),
        }
    }

    fn send(
        &self,
        ctx: &SyncContext,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> DirectoryResult<Value> {
        ctx.check()?;

        let url = format!("{}/{}", self.base_url(), path);
        let mut request = self
            .client
            .request(method, &url)
            .timeout(self.request_timeout(ctx));

        if let Some(token) = token {
            request = request.query(&[("access_token", token)]);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            return Err(DirectoryError::HttpError(response.status().as_u16()));
        }

        let value: Value = response.json()?;
        check_status(&value)?;
        Ok(value)
    }

    fn access_token(&self, ctx: &SyncContext) -> DirectoryResult<String> {
        let mut cached = self
            .token
            .lock()
            .map_err(|_| DirectoryError::Unavailable("token lock poisoned".into()))?;

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.value.clone());
        }

        let value = self.send(
            ctx,
            Method::GET,
            "gettoken",
            None,
            &[
                ("corpid", self.config.corp_id.clone()),
                ("corpsecret", self.config.corp_secret.clone()),
            ],
            None,
        )?;
        let response: TokenResponse = serde_json::from_value(value)?;
        debug!(expires_in = response.expires_in, "fetched directory access token");

        let token = AccessToken {
            value: response.access_token,
            expires_at: Instant::now() + Duration::from_secs(response.expires_in),
        };
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    fn invalidate_token(&self) {
        if let Ok(mut cached) = self.token.lock() {
            *cached = None;
        }
    }

    /// Sends an authenticated request, refreshing the token once if rejected.
    fn call(
        &self,
        ctx: &SyncContext,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> DirectoryResult<Value> {
        let token = self.access_token(ctx)?;
        match self.send(ctx, method.clone(), path, Some(&token), query, body) {
            Err(DirectoryError::Api { code, .. }) if TOKEN_REJECTED_CODES.contains(&code) => {
                debug!(code, "access token rejected, refreshing");
                self.invalidate_token();
                let token = self.access_token(ctx)?;
                self.send(ctx, method, path, Some(&token), query, body)
            }
            other => other,
        }
    }
}

impl DirectoryClient for HttpDirectoryClient {
    fn list_users(&self, ctx: &SyncContext) -> DirectoryResult<Vec<DirectoryUser>> {
        let value = self.call(
            ctx,
            Method::GET,
            "user/list",
            &[
                ("department_id", self.config.department_id.to_string()),
                ("fetch_child", "1".to_string()),
            ],
            None,
        )?;
        let response: UserListResponse = serde_json::from_value(value)?;
        Ok(response.userlist)
    }

    fn get_user(&self, ctx: &SyncContext, user_id: &str) -> DirectoryResult<Option<DirectoryUser>> {
        match self.call(
            ctx,
            Method::GET,
            "user/get",
            &[("userid", user_id.to_string())],
            None,
        ) {
            Ok(value) => Ok(Some(serde_json::from_value(value)?)),
            Err(DirectoryError::Api { code, .. }) if code == USER_NOT_FOUND_CODE => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Only users granted visibility directly are returned; visibility
    /// granted through departments or tags is not expanded.
    fn visible_user_ids(&self, ctx: &SyncContext) -> DirectoryResult<HashSet<String>> {
        let value = self.call(
            ctx,
            Method::GET,
            "agent/get",
            &[("agentid", self.config.agent_id.to_string())],
            None,
        )?;
        let response: AgentResponse = serde_json::from_value(value)?;
        Ok(response
            .allow_userinfos
            .user
            .into_iter()
            .map(|u| u.userid)
            .collect())
    }

    fn send_text(
        &self,
        ctx: &SyncContext,
        user_ids: &[String],
        content: &str,
    ) -> DirectoryResult<Vec<String>> {
        let body = text_message_body(self.config.agent_id, user_ids, content);
        let value = self.call(ctx, Method::POST, "message/send", &[], Some(&body))?;
        let response: SendResponse = serde_json::from_value(value)?;
        Ok(split_user_ids(&response.invaliduser))
    }
}

/// Maps a non-zero `errcode` to an API error.
fn check_status(value: &Value) -> DirectoryResult<()> {
    let code = value.get("errcode").and_then(Value::as_i64).unwrap_or(0);
    if code == 0 {
        return Ok(());
    }
    let message = value
        .get("errmsg")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Err(DirectoryError::Api { code, message })
}

fn text_message_body(agent_id: i64, user_ids: &[String], content: &str) -> Value {
    json!({
        "touser": user_ids.join("|"),
        "msgtype": "text",
        "agentid": agent_id,
        "text": { "content": content },
        "safe": 0,
    })
}

fn split_user_ids(joined: &str) -> Vec<String> {
    joined
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
