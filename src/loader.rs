//! schema acquisition
//!
//! a schema is read from a local sdl file or downloaded as sdl text from an
//! http endpoint. the http path goes through an injectable send function so
//! it can be tested without a server.

use crate::error::{Error, Result};
use crate::schema::Schema;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::future::Future;
use std::path::PathBuf;
use url::Url;

/// where to read the schema from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// local sdl file
    File(PathBuf),
    /// http endpoint serving sdl text
    Url {
        url: String,
        /// extra request headers, e.g. authorization
        headers: Vec<(String, String)>,
    },
}

impl SchemaSource {
    pub fn url(url: impl Into<String>) -> Self {
        SchemaSource::Url {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// add a request header; ignored for file sources
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let SchemaSource::Url { headers, .. } = &mut self {
            headers.push((name.into(), value.into()));
        }
        self
    }
}

/// load and parse a schema
pub async fn load_schema(source: &SchemaSource) -> Result<Schema> {
    let sdl = load_schema_text(source).await?;
    Schema::parse(&sdl)
}

/// load the raw sdl text of a schema
pub async fn load_schema_text(source: &SchemaSource) -> Result<String> {
    match source {
        SchemaSource::File(path) => {
            tracing::info!("reading schema from {}", path.display());
            Ok(tokio::fs::read_to_string(path).await?)
        }
        SchemaSource::Url { url, headers } => {
            tracing::info!("fetching schema from {url}");
            let http = reqwest::Client::new();
            fetch_schema_with(url, headers, |url, headers| async move {
                let response = http.get(url).headers(headers).send().await?;
                let status = response.status();
                let text = response.text().await?;
                Ok((status, text))
            })
            .await
        }
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| Error::Config(format!("invalid header name {name:?}: {err}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|err| Error::Config(format!("invalid value for header {name}: {err}")))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

pub(crate) async fn fetch_schema_with<F, Fut>(
    url: &str,
    headers: &[(String, String)],
    send: F,
) -> Result<String>
where
    F: FnOnce(Url, HeaderMap) -> Fut,
    Fut: Future<Output = Result<(StatusCode, String)>>,
{
    let url = Url::parse(url)?;
    let headers = header_map(headers)?;
    let (status, text) = send(url, headers).await?;
    if !status.is_success() {
        tracing::error!("schema request failed with status {status}");
        return Err(Error::SchemaHttp {
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(text)
}
