//! Image collaborator: "fetch this locator, tell me when it's ready".
//!
//! Requests are fire-and-forget. A successful fetch posts
//! [`SwipeEvent::ImageReady`] into the app's event channel; a failed one only
//! logs, leaving the card in its loading stand-in until the user moves on.

use std::sync::{mpsc::Sender, Arc, Mutex};
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::runtime::SwipeEvent;

/// Identifies one candidate of one deck; stale notifications from a previous
/// deck or position never match the current key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageKey {
    pub token: i64,
    pub id: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub key: ImageKey,
    pub locator: String,
}

pub trait ImageLoader: Send {
    fn request(&self, req: ImageRequest);
}

/// Never reports anything; every card stays in its stand-in state
#[derive(Debug, Default, Clone, Copy)]
pub struct NullImageLoader;

impl ImageLoader for NullImageLoader {
    fn request(&self, _req: ImageRequest) {}
}

/// Remembers every request it receives. Used by tests to observe which
/// images the controller asked for.
#[derive(Debug, Default, Clone)]
pub struct RecordingImageLoader {
    requests: Arc<Mutex<Vec<ImageRequest>>>,
}

impl RecordingImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl ImageLoader for RecordingImageLoader {
    fn request(&self, req: ImageRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(req);
        }
    }
}

/// Fetches each locator over HTTP on its own thread
pub struct HttpImageLoader {
    client: Client,
    tx: Sender<SwipeEvent>,
}

impl HttpImageLoader {
    pub fn new(tx: Sender<SwipeEvent>, timeout: Duration) -> crate::error::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("kitty-match/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, tx })
    }
}

impl ImageLoader for HttpImageLoader {
    fn request(&self, req: ImageRequest) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || match fetch(&client, &req.locator) {
            Ok(bytes) => {
                tracing::debug!(id = req.key.id, bytes, "image ready");
                // Receiver gone means the app is shutting down.
                let _ = tx.send(SwipeEvent::ImageReady(req.key));
            }
            Err(reason) => {
                tracing::warn!(id = req.key.id, locator = %req.locator, %reason, "image failed to load");
            }
        });
    }
}

fn fetch(client: &Client, locator: &str) -> Result<usize, String> {
    let resp = client.get(locator).send().map_err(|e| e.to_string())?;
    let status = resp.status();
    if !status.is_success() {
        return Err(format!("status {status}"));
    }
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    if !is_image_content_type(content_type.as_deref()) {
        return Err(format!(
            "unexpected content type {}",
            content_type.unwrap_or_default()
        ));
    }
    let body = resp.bytes().map_err(|e| e.to_string())?;
    Ok(body.len())
}

/// A missing header is given the benefit of the doubt.
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    match content_type {
        None => true,
        Some(ct) => ct.trim().to_ascii_lowercase().starts_with("image/"),
    }
}
