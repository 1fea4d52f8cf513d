//! Fetches the static gallery metadata.

use gloo_net::http::Request;
use thiserror::Error;

use crate::model::ImageMetadata;

pub const METADATA_URL: &str = "./images.json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("metadata request returned HTTP {0}")]
    Status(u16),
    #[error("metadata is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

pub async fn fetch_metadata(url: &str) -> Result<Vec<ImageMetadata>, LoadError> {
    let resp = Request::get(url).send().await?;
    if !resp.ok() {
        return Err(LoadError::Status(resp.status()));
    }
    let body = resp.text().await?;
    parse_metadata(&body)
}

pub fn parse_metadata(body: &str) -> Result<Vec<ImageMetadata>, LoadError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reports_decode_errors() {
        let err = parse_metadata("{\"id\": 1}").unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
        assert!(err.to_string().starts_with("metadata is not valid JSON"));
    }

    #[test]
    fn parse_accepts_empty_list() {
        assert!(parse_metadata("[]").unwrap().is_empty());
    }

    #[test]
    fn status_error_message() {
        assert_eq!(LoadError::Status(404).to_string(), "metadata request returned HTTP 404");
    }
}
