//! HTTP client abstraction for the Twitch integration.
//!
//! Platform code talks to `HttpClient` instead of reqwest directly, so tests
//! can script responses and inspect the requests that were made without any
//! network access. Non-2xx statuses are returned as data, not errors; callers
//! decide what a bad status means for them.
//!
//! # Example Usage:
//! ``
//! use std::sync::Arc;
//! use crate::http::{HttpClient, DefaultHttpClient};
//!
//! let http: Arc<dyn HttpClient> = Arc::new(DefaultHttpClient::new());
//! let resp = http.get(url, query, headers).await?;
//! ``

use async_trait::async_trait;
use reqwest;
use std::collections::HashMap;
use crate::Error;

/// Status code and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A generic trait for making HTTP requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST an `application/x-www-form-urlencoded` body.
    async fn post_form(
        &self,
        url: String,
        form: Vec<(String, String)>,
    ) -> Result<HttpResponse, Error>;

    async fn get(
        &self,
        url: String,
        query: Vec<(String, String)>,
        headers: HashMap<String, String>,
    ) -> Result<HttpResponse, Error>;
}

#[derive(Clone, Default)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn post_form(
        &self,
        url: String,
        form: Vec<(String, String)>,
    ) -> Result<HttpResponse, Error> {
        let response = self.client
            .post(&url)
            .form(&form)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }

    async fn get(
        &self,
        url: String,
        query: Vec<(String, String)>,
        headers: HashMap<String, String>,
    ) -> Result<HttpResponse, Error> {
        let mut request = self.client.get(&url).query(&query);
        for (key, value) in headers {
            request = request.header(&key, value);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
