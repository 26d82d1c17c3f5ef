//! Firebase Realtime Database store (REST API, wasm only)
//!
//! Rows live under `/leaderboard/<push id>`. Reads ask the server for the
//! highest scores with `orderBy="score"&limitToLast=n`; pruning lists every
//! row and deletes the ones ranked below the cut.

use std::collections::HashMap;

use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::{Leaderboard, LeaderboardEntry, LeaderboardStore, StoreError};

/// Row as stored remotely; extra fields (e.g. a display date) are ignored
#[derive(Debug, Deserialize)]
struct RemoteRow {
    #[serde(default)]
    name: String,
    score: u64,
    #[serde(default)]
    timestamp: f64,
}

impl From<RemoteRow> for LeaderboardEntry {
    fn from(row: RemoteRow) -> Self {
        LeaderboardEntry::new(&row.name, row.score, row.timestamp)
    }
}

pub struct FirebaseStore {
    /// e.g. `https://my-game-default-rtdb.firebaseio.com`
    database_url: String,
}

fn js_err(e: JsValue) -> StoreError {
    StoreError::Transport(format!("{:?}", e))
}

impl FirebaseStore {
    pub fn new(database_url: &str) -> Self {
        Self {
            database_url: database_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/leaderboard.json", self.database_url)
    }

    async fn request(&self, method: &str, url: &str, body: Option<&str>) -> Result<String, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        if !response.ok() {
            return Err(StoreError::Status(response.status()));
        }

        let text = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        text.as_string()
            .ok_or_else(|| StoreError::Transport("response body is not text".into()))
    }

    /// Rows in submission order. `null` (empty collection) decodes to none.
    async fn rows(&self, url: &str) -> Result<Vec<(String, LeaderboardEntry)>, StoreError> {
        let body = self.request("GET", url, None).await?;
        let rows: Option<HashMap<String, RemoteRow>> = serde_json::from_str(&body)?;
        let mut rows: Vec<(String, LeaderboardEntry)> = rows
            .unwrap_or_default()
            .into_iter()
            .map(|(key, row)| (key, row.into()))
            .collect();
        rows.sort_by(|a, b| a.1.timestamp.total_cmp(&b.1.timestamp));
        Ok(rows)
    }
}

impl LeaderboardStore for FirebaseStore {
    async fn fetch_top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let url = format!(
            "{}?orderBy=%22score%22&limitToLast={}",
            self.collection_url(),
            limit
        );
        let entries = self.rows(&url).await?.into_iter().map(|(_, e)| e).collect();
        let mut sorted = Leaderboard::from_entries(entries).entries;
        sorted.truncate(limit);
        Ok(sorted)
    }

    async fn insert(&self, entry: LeaderboardEntry) -> Result<(), StoreError> {
        let body = serde_json::to_string(&entry)?;
        self.request("POST", &self.collection_url(), Some(&body)).await?;
        Ok(())
    }

    async fn retain_top(&self, keep: usize) -> Result<(), StoreError> {
        let mut rows = self.rows(&self.collection_url()).await?;
        if rows.len() <= keep {
            return Ok(());
        }
        // Equal scores keep submission order
        rows.sort_by(|a, b| b.1.score.cmp(&a.1.score));
        for (key, entry) in rows.into_iter().skip(keep) {
            log::debug!("Deleting leaderboard row {} ({})", key, entry.score);
            let url = format!("{}/leaderboard/{}.json", self.database_url, key);
            self.request("DELETE", &url, None).await?;
        }
        Ok(())
    }
}
