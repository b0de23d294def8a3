//! Asynchronous client for the **World Bank Indicators API (v2)**.
//!
//! Two endpoints are consumed: the country catalog (filtered down to real
//! countries) and `country/{codes}/indicator/{code}` for observations.
//! Pagination is handled automatically and transient failures are retried
//! with a short backoff.
//!
//! The fetch seam the engine depends on is the [`SeriesSource`] trait, so the
//! dispatcher and aggregator can be exercised against an in-memory source.
//!
//! ### Notes
//! - The API sometimes serializes `per_page` as a **string**; both
//!   string/number are accepted.
//! - Every endpoint answers with a `[meta, [entries]]` envelope. A malformed
//!   envelope (not an array, empty, or an error payload in position 0) is a
//!   hard [`WbxError::RemoteFormat`]; a well-formed envelope with no entry
//!   array is a legitimately empty result.

use crate::error::WbxError;
use crate::models::{Country, CountryRecord, Entry, Meta, Observation, YearRange};
use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of indicator observations.
///
/// Returns at most one observation per (country, year) as reported by the
/// source; years a country did not report are simply missing from the
/// result, not present with a null value.
#[async_trait]
pub trait SeriesSource {
    async fn fetch_series(
        &self,
        country_codes: &[String],
        indicator_code: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<Observation>, WbxError>;
}

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc_join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(|s| percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string())
        .collect::<Vec<_>>()
        .join(";")
}

/// Safety cap to avoid pathological pagination jobs.
const MAX_PAGES: u32 = 1000;

/// Retry delays for transient failures (5xx / transport errors).
const BACKOFF_MS: [u64; 2] = [100, 300];

/// Split the `[meta, [entries]]` envelope every v2 endpoint returns.
///
/// Public so payload-handling can be tested without a network; the client
/// funnels every response through here.
pub fn parse_envelope(v: Value) -> Result<(Meta, Option<Value>), WbxError> {
    let Value::Array(mut arr) = v else {
        return Err(WbxError::RemoteFormat(
            "top-level response is not an array".into(),
        ));
    };
    if arr.is_empty() {
        return Err(WbxError::RemoteFormat("empty top-level response".into()));
    }
    // An error payload replaces the meta section.
    if arr[0].get("message").is_some() {
        return Err(WbxError::RemoteFormat(format!(
            "api error payload: {}",
            arr[0]
        )));
    }
    let body = if arr.len() > 1 {
        Some(arr.swap_remove(1))
    } else {
        None
    };
    let meta: Meta = serde_json::from_value(arr.swap_remove(0))
        .map_err(|e| WbxError::RemoteFormat(format!("bad meta section: {e}")))?;
    Ok((meta, body))
}

fn entries_from_body<T: serde::de::DeserializeOwned>(body: Option<Value>) -> Result<Vec<T>, WbxError> {
    match body {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(b) => serde_json::from_value(b)
            .map_err(|e| WbxError::RemoteFormat(format!("bad entry section: {e}"))),
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("wbx_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "https://api.worldbank.org/v2".into(),
            http,
        }
    }
}

impl Client {
    /// Default client pointed at a different base URL (useful for proxies and
    /// local test servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// GET one URL as JSON, retrying 5xx and transport errors with backoff.
    async fn get_json(&self, url: &str) -> Result<Value, WbxError> {
        let mut attempt = 0usize;
        loop {
            let retriable = attempt < BACKOFF_MS.len();
            match self.http.get(url).send().await {
                Ok(r) if retriable && r.status().is_server_error() => {
                    warn!(%url, status = %r.status(), "server error, retrying");
                }
                Ok(r) => match r.error_for_status() {
                    Ok(ok) => return Ok(ok.json().await?),
                    Err(e) => return Err(e.into()),
                },
                Err(e) if retriable => {
                    warn!(%url, error = %e, "transport error, retrying");
                }
                Err(e) => return Err(e.into()),
            }
            tokio::time::sleep(Duration::from_millis(BACKOFF_MS[attempt])).await;
            attempt += 1;
        }
    }

    /// Fetch the country catalog, excluding regional aggregates.
    ///
    /// Aggregates are recognized by their blank capital-city field, so the
    /// returned list only ever contains real countries.
    pub async fn fetch_countries(&self) -> Result<Vec<Country>, WbxError> {
        let mut out: Vec<Country> = Vec::new();
        let mut page = 1u32;
        loop {
            if page > MAX_PAGES {
                return Err(WbxError::RemoteFormat(format!(
                    "page limit exceeded ({MAX_PAGES})"
                )));
            }
            let url = format!(
                "{}/country?format=json&per_page=1000&page={}",
                self.base_url, page
            );
            debug!(%url, "fetching country catalog page");
            let (meta, body) = parse_envelope(self.get_json(&url).await?)?;
            let records: Vec<CountryRecord> = entries_from_body(body)?;
            out.extend(
                records
                    .into_iter()
                    .filter(|r| !r.is_aggregate())
                    .map(Country::from),
            );
            if page >= meta.pages {
                break;
            }
            page += 1;
        }
        debug!(countries = out.len(), "fetched country catalog");
        Ok(out)
    }
}

#[async_trait]
impl SeriesSource for Client {
    async fn fetch_series(
        &self,
        country_codes: &[String],
        indicator_code: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<Observation>, WbxError> {
        if country_codes.is_empty() {
            return Err(WbxError::NoCountrySelected);
        }
        let country_spec = enc_join(country_codes.iter().map(|s| s.as_str()));
        let indicator_spec = enc_join([indicator_code]);
        let range = YearRange {
            start: start_year,
            end: end_year,
        };
        let base = format!(
            "{}/country/{}/indicator/{}?date={}&format=json&per_page=1000",
            self.base_url,
            country_spec,
            indicator_spec,
            range.to_query_param()
        );

        let mut out: Vec<Observation> = Vec::new();
        let mut page = 1u32;
        loop {
            if page > MAX_PAGES {
                return Err(WbxError::RemoteFormat(format!(
                    "page limit exceeded ({MAX_PAGES})"
                )));
            }
            let url = format!("{base}&page={page}");
            debug!(%url, "fetching indicator page");
            let (meta, body) = parse_envelope(self.get_json(&url).await?)?;
            let entries: Vec<Entry> = entries_from_body(body)?;
            out.extend(entries.into_iter().map(Observation::from));
            if page >= meta.pages {
                break;
            }
            page += 1;
        }
        debug!(
            indicator = indicator_code,
            rows = out.len(),
            "fetched series"
        );
        Ok(out)
    }
}
