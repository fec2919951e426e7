use super::CreatureRecord;
use bevy::{prelude::*, tasks::BoxedFuture};
use std::sync::Arc;
use thiserror::Error;

/// Why a catch attempt came back empty. Players only ever see one message,
/// the variants are kept for the logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("request never completed: {0}")]
    Transport(String),
    #[error("catalog answered with HTTP {0}")]
    Status(u16),
    #[error("catalog body did not decode: {0}")]
    Decode(String),
}

/// Anything that can turn a creature id into a [`CreatureRecord`].
pub trait CreatureSource: Send + Sync + 'static {
    fn fetch(&self, id: u32) -> BoxedFuture<'static, Result<CreatureRecord, FetchError>>;
}

/// The catalog the sequencer fetches from.
#[derive(Resource, Clone, Deref)]
pub struct Catalog(pub Arc<dyn CreatureSource>);

impl Catalog {
    pub fn new(source: impl CreatureSource) -> Self {
        Self(Arc::new(source))
    }
}

/// The public PokeAPI, one GET per id and no retries.
#[derive(Debug, Clone)]
pub struct PokeApi {
    endpoint: String,
}

impl PokeApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn url(&self, id: u32) -> String {
        format!("{}/{id}", self.endpoint.trim_end_matches('/'))
    }
}

impl CreatureSource for PokeApi {
    fn fetch(&self, id: u32) -> BoxedFuture<'static, Result<CreatureRecord, FetchError>> {
        let request = ehttp::Request::get(self.url(id));
        Box::pin(async move {
            let response = ehttp::fetch_async(request)
                .await
                .map_err(FetchError::Transport)?;
            if !response.ok {
                return Err(FetchError::Status(response.status));
            }
            CreatureRecord::from_json(&response.bytes)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_appends_id_once() {
        let api = PokeApi::new("https://pokeapi.co/api/v2/pokemon/");
        assert_eq!(api.url(25), "https://pokeapi.co/api/v2/pokemon/25");
        let api = PokeApi::new("http://localhost:8080/pokemon");
        assert_eq!(api.url(1010), "http://localhost:8080/pokemon/1010");
    }

    #[test]
    fn errors_name_their_cause() {
        assert_eq!(
            FetchError::Status(404).to_string(),
            "catalog answered with HTTP 404"
        );
        assert!(
            FetchError::Transport("dns".into())
                .to_string()
                .contains("dns")
        );
    }
}
