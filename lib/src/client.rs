//! Blocking client for the KEGG REST API.
use crate::parse::{parse_response, Diagnostic, Parsed};
use crate::record::{KeggRecord, FAILED_FRAGMENT};
use log::{debug, warn};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://rest.kegg.jp/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid KEGG url: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("request returned status code {0}")]
    Status(u16),
    #[error("response was empty")]
    EmptyBody,
}

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct KeggClient {
    /// Root of the REST API. Operations are joined onto it (`get/<id>`, `conv/...`).
    #[builder(setter(into), default = "DEFAULT_BASE_URL.to_string()")]
    pub base_url: String,
    /// Timeout for a single request.
    #[builder(default = "DEFAULT_TIMEOUT")]
    pub timeout: Duration,
    /// Pause before every request, to stay within KEGG's request rate.
    #[builder(default = "Duration::from_millis(350)")]
    pub delay: Duration,
    /// Shared by every request so connections are kept alive across a batch.
    #[builder(setter(skip), default = "self.http_client()?")]
    http: reqwest::blocking::Client,
}

impl KeggClientBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref base_url) = self.base_url {
            if let Err(e) = Url::parse(base_url) {
                return Err(format!("Invalid base URL '{}': {}", base_url, e));
            }
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err("Timeout must be greater than zero.".to_string());
        }
        Ok(())
    }

    fn http_client(&self) -> Result<reqwest::blocking::Client, String> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| format!("Could not create the HTTP client: {}", e))
    }
}

/// The outcome of fetching and parsing one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Record(KeggRecord),
    /// The request failed or the body was empty; the row is filled with placeholders.
    Failed,
}

impl Fetched {
    pub fn to_fragment(&self) -> String {
        match self {
            Fetched::Record(record) => record.to_fragment(),
            Fetched::Failed => FAILED_FRAGMENT.to_string(),
        }
    }
}

impl KeggClient {
    pub fn builder() -> KeggClientBuilder {
        KeggClientBuilder::default()
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        // without a trailing slash, join would replace the last path segment
        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Url::parse(&base)?.join(path)?)
    }

    fn request(&self, path: &str) -> Result<String, ClientError> {
        let url = self.url(path)?;
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        debug!("GET {}", url);

        let response = self.http.get(url.as_str()).send()?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        let body = response.text()?;
        if body.trim_matches('\n').is_empty() {
            return Err(ClientError::EmptyBody);
        }
        Ok(body)
    }

    /// Fetch the flat-text record for one KEGG identifier.
    pub fn get(&self, id: &str) -> Result<String, ClientError> {
        self.request(&format!("get/{}", id))
    }

    /// Convert identifiers between KEGG and an outside database, e.g.
    /// `conv("eco", "ncbi-geneid")`. Lines that are not two tab-separated columns
    /// are skipped.
    pub fn conv(
        &self,
        target: &str,
        source: &str,
    ) -> Result<Vec<(String, String)>, ClientError> {
        let body = self.request(&format!("conv/{}/{}", target, source))?;
        Ok(body
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match line.split_once('\t') {
                Some((from, to)) => Some((from.trim().to_string(), to.trim().to_string())),
                None => {
                    warn!("skipping malformed conv line: {:?}", line);
                    None
                }
            })
            .collect())
    }

    /// Fetch and parse the record for `query_id`. Failures never escape: they are
    /// turned into a diagnostic and [`Fetched::Failed`].
    pub fn fetch_record(&self, source_id: &str, query_id: &str) -> (Fetched, Vec<Diagnostic>) {
        match self.get(query_id) {
            Ok(body) => {
                let Parsed {
                    record,
                    diagnostics,
                } = parse_response(&body, source_id, query_id);
                (Fetched::Record(record), diagnostics)
            }
            Err(e) => {
                let diagnostic = Diagnostic::new(source_id, query_id, e.to_string());
                warn!("{}", diagnostic);
                (Fetched::Failed, vec![diagnostic])
            }
        }
    }
}
