//! In-memory page fetcher for scraper tests.
//!
//! Serves canned HTML keyed by URL and records every request, so tests
//! can drive `scrape_all` without touching the network.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use spinlab::platforms::PageFetcher;

#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, Result<String, String>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(html.to_string()));
        self
    }

    /// Fail requests to `url` with `message`.
    pub fn with_failure(mut self, url: &str, message: &str) -> Self {
        self.pages.insert(url.to_string(), Err(message.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("404 Not Found: {url}")),
        }
    }
}
