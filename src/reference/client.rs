use anyhow::{Context, Result};
use rayon::prelude::*;
use reqwest::blocking::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use super::sources::ReferenceSource;
use crate::ui::Ui;

/// Raw documents keyed by source key. A source that failed maps to `Null`.
pub type SourceData = HashMap<&'static str, Value>;

/// Fetches one JSON document. Implementations must be shareable across the
/// worker pool.
pub trait Fetcher: Sync {
    fn fetch_json(&self, url: &str) -> Result<Value>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pm2uigf/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?
            .error_for_status()
            .with_context(|| format!("Bad status from {}", url))?;

        let text = response.text().context("Failed to read response")?;
        let value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON from {}", url))?;

        Ok(value)
    }
}

/// Fetch every source once on a bounded pool. Never fails: a source that
/// cannot be fetched is logged and stored as `Null`.
pub fn fetch_all(
    fetcher: &impl Fetcher,
    sources: &[&'static ReferenceSource],
    workers: usize,
    ui: &mut impl Ui,
) -> SourceData {
    let total = sources.len() as u64;
    ui.set_progress(0, total, "reference sources");

    let fetch_one = |source: &&'static ReferenceSource| {
        let value = match fetcher.fetch_json(source.url) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(source = source.key, "reference source unavailable: {:#}", e);
                Value::Null
            }
        };
        (source.key, value)
    };

    let data: SourceData = match rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
    {
        Ok(pool) => pool.install(|| sources.par_iter().map(fetch_one).collect()),
        Err(e) => {
            tracing::warn!("worker pool unavailable, fetching sequentially: {}", e);
            sources.iter().map(fetch_one).collect()
        }
    };

    let available = data.values().filter(|v| !v.is_null()).count();
    ui.set_progress(total, total, "reference sources");
    ui.clear_progress();
    ui.log(format!("{}/{} reference sources available", available, total));

    data
}
