use std::path::PathBuf;
use std::time::Instant;

use async_trait::async_trait;
use futures::{stream, StreamExt};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::constants::{DEFAULT_PAGE_SIZE, MAX_PAGES};
use crate::domain::{ChainRef, RawToken, TokenExtensions};
use crate::services::errors::FetcherError;
use crate::services::registry::{ProviderEntry, ProviderRegistry};

/// Black-box adapter producing the raw records of one provider.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawToken>, FetcherError>;
}

/// Token entry of a standard token list document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListToken {
    chain_id: ChainRef,
    address: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    decimals: Option<u64>,
    #[serde(default, rename = "logoURI")]
    logo_uri: Option<String>,
    #[serde(default)]
    metadata: Option<TokenExtensions>,
}

#[derive(Debug, Deserialize)]
struct ListDocument {
    #[serde(default)]
    tokens: Vec<Value>,
}

impl From<ListToken> for RawToken {
    fn from(token: ListToken) -> Self {
        RawToken {
            chain: token.chain_id,
            address: token.address,
            name: token.name,
            symbol: token.symbol,
            decimals: token.decimals.and_then(|d| u8::try_from(d).ok()),
            logos: token.logo_uri.into_iter().filter(|uri| !uri.is_empty()).collect(),
            metadata: token.metadata,
        }
    }
}

/// Parses a standard token list. Entries that do not look like tokens are skipped.
fn parse_token_list(origin: &str, content: &str) -> Result<Vec<RawToken>, FetcherError> {
    let document: ListDocument = serde_json::from_str(content)
        .map_err(|err| FetcherError::MalformedList(origin.to_string(), err.to_string()))?;

    Ok(document
        .tokens
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ListToken>(entry).ok())
        .map(RawToken::from)
        .collect())
}

/// A standard token list served over HTTP.
pub struct RemoteTokenList {
    client: Client,
    url: String,
}

impl RemoteTokenList {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TokenSource for RemoteTokenList {
    async fn fetch(&self) -> Result<Vec<RawToken>, FetcherError> {
        let content = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| FetcherError::UnableToLoadList(self.url.clone(), err.to_string()))?
            .text()
            .await
            .map_err(|err| FetcherError::UnableToLoadList(self.url.clone(), err.to_string()))?;

        parse_token_list(&self.url, &content)
    }
}

/// A standard token list stored on disk.
pub struct LocalTokenList {
    path: PathBuf,
}

impl LocalTokenList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TokenSource for LocalTokenList {
    async fn fetch(&self) -> Result<Vec<RawToken>, FetcherError> {
        let origin = self.path.display().to_string();
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| FetcherError::UnableToReadFile(origin.clone(), err.to_string()))?;

        parse_token_list(&origin, &content)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortalsToken {
    address: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    decimals: Option<u64>,
    #[serde(default)]
    network: String,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    liquidity: Option<f64>,
    #[serde(default)]
    platform: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PortalsPage {
    #[serde(default)]
    more: bool,
    #[serde(default)]
    tokens: Vec<Value>,
}

impl PortalsPage {
    /// Page entries that parse as tokens; anything else is skipped.
    fn into_raw_tokens(self) -> impl Iterator<Item = RawToken> {
        self.tokens
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<PortalsToken>(entry).ok())
            .map(RawToken::from)
    }
}

impl From<PortalsToken> for RawToken {
    fn from(token: PortalsToken) -> Self {
        let metadata = TokenExtensions {
            liquidity: token.liquidity,
            platform: token.platform,
            ..TokenExtensions::default()
        };

        RawToken {
            chain: ChainRef::Name(token.network),
            address: token.address,
            name: token.name,
            symbol: token.symbol,
            decimals: token.decimals.and_then(|d| u8::try_from(d).ok()),
            logos: token.images,
            metadata: Some(metadata),
        }
    }
}

/// Paginated token API that identifies chains by network name.
pub struct PortalsApi {
    client: Client,
    base_url: String,
    page_size: usize,
}

impl PortalsApi {
    pub fn new(client: Client, base_url: impl Into<String>, page_size: Option<usize>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    async fn fetch_page(&self, page: usize) -> Result<PortalsPage, FetcherError> {
        let load_err = |err: reqwest::Error| FetcherError::UnableToLoadList(self.base_url.clone(), err.to_string());

        self.client
            .get(&self.base_url)
            .query(&[("limit", self.page_size), ("page", page)])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(load_err)?
            .json::<PortalsPage>()
            .await
            .map_err(load_err)
    }
}

#[async_trait]
impl TokenSource for PortalsApi {
    async fn fetch(&self) -> Result<Vec<RawToken>, FetcherError> {
        let mut tokens = Vec::new();

        for page in 0..MAX_PAGES {
            let response = self.fetch_page(page).await?;
            let more = response.more;
            tokens.extend(response.into_raw_tokens());

            if !more {
                return Ok(tokens);
            }
        }

        tracing::warn!(url = %self.base_url, pages = MAX_PAGES, "page limit reached, list truncated");
        Ok(tokens)
    }
}

/// Fetches every registered provider with bounded concurrency. A failing
/// provider does not affect the others; results come back in registry order.
pub async fn fetch_all(
    registry: &ProviderRegistry,
    concurrency: usize,
) -> Vec<(&ProviderEntry, Result<Vec<RawToken>, FetcherError>)> {
    let t0 = Instant::now();

    let mut results: Vec<(&ProviderEntry, Result<Vec<RawToken>, FetcherError>)> =
        stream::iter(registry.iter())
            .map(|entry| async move {
                let response = entry.source.fetch().await;
                (entry, response)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

    results.sort_by(|(a, _), (b, _)| a.info.name.cmp(&b.info.name));

    for (entry, result) in &results {
        match result {
            Ok(tokens) => tracing::info!(
                provider = %entry.info.name,
                method = ?entry.info.method,
                records = tokens.len(),
                "provider fetched"
            ),
            Err(err) => tracing::warn!(
                provider = %entry.info.name,
                method = ?entry.info.method,
                error = %err,
                "provider failed, contributing no tokens"
            ),
        }
    }

    tracing::info!(time = t0.elapsed().as_millis(), providers = results.len(), "finished fetching providers");

    results
}
