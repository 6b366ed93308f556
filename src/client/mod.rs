pub mod pagination;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, LOCATION};
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use reqwest::Response;
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{domain::course::CanvasFile, dto::response::FileUploadSlot},
};

use self::pagination::next_page_url;

/// Authenticated transport for the Canvas REST API.
#[derive(Clone)]
pub struct CanvasClient {
    http: reqwest::Client,
    uploads: reqwest::Client,
    api_base: String,
    per_page: u32,
}

impl CanvasClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token.expose_secret()))
            .map_err(|_| {
                AppError::ConfigError("token contains characters not allowed in a header".into())
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        // The upload target is a pre-signed URL; its confirmation redirect is followed by hand
        // with the authenticated client.
        let uploads = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            uploads,
            api_base: api_base(&config.base_url),
            per_page: config.per_page,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.get_with_query(path, &[]).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        log::debug!("GET {}", path);
        let response = self.http.get(self.endpoint(path)).query(query).send().await?;
        decode(response).await
    }

    /// Fetches every page of a list endpoint by following `rel="next"` links.
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<Vec<T>> {
        let per_page = self.per_page.to_string();
        let mut params = query.to_vec();
        params.push(("per_page", per_page.as_str()));

        log::debug!("GET {} (paginated)", path);
        let mut response = self
            .http
            .get(self.endpoint(path))
            .query(&params)
            .send()
            .await?;

        let mut items = Vec::new();
        loop {
            let next = next_page_url(response.headers());
            let page: Vec<T> = decode(response).await?;
            items.extend(page);

            match next {
                Some(url) => {
                    log::debug!("Following next page {}", url);
                    response = self.http.get(url).send().await?;
                }
                None => break,
            }
        }

        Ok(items)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("POST {}", path);
        let response = self.http.post(self.endpoint(path)).json(body).send().await?;
        decode(response).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.delete_with_query(path, &[]).await
    }

    pub async fn delete_with_query(&self, path: &str, query: &[(&str, &str)]) -> AppResult<()> {
        log::debug!("DELETE {}", path);
        let response = self
            .http
            .delete(self.endpoint(path))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::from_status(status.as_u16(), error_message(&body)));
        }
        Ok(())
    }

    /// Second and third upload step: posts the file to the pre-signed slot and confirms it.
    pub async fn upload_to_slot(
        &self,
        slot: &FileUploadSlot,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> AppResult<CanvasFile> {
        let mut form = Form::new();
        for (key, value) in slot.form_fields() {
            form = form.text(key, value);
        }
        form = form.part("file", Part::bytes(bytes).file_name(file_name.to_string()));

        let response = self
            .uploads
            .post(&slot.upload_url)
            .multipart(form)
            .send()
            .await?;

        if response.status().is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| {
                    AppError::UploadError("upload redirect without a location".to_string())
                })?
                .to_string();

            log::debug!("Confirming upload of {} at {}", file_name, location);
            let confirmed = self.http.get(location).send().await?;
            return decode(confirmed).await;
        }

        decode(response).await
    }
}

fn api_base(base_url: &str) -> String {
    format!("{}/api/v1", base_url.trim_end_matches('/'))
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AppError::from_status(status.as_u16(), error_message(&body)));
    }

    Ok(serde_json::from_str(&body)?)
}

/// Extracts the human readable part of an LMS error body.
pub fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();

    let from_json = parsed.as_ref().and_then(|value| {
        value
            .get("errors")
            .and_then(|errors| errors.as_array())
            .and_then(|errors| errors.first())
            .and_then(|first| first.get("message"))
            .or_else(|| value.get("message"))
            .and_then(|message| message.as_str())
            .map(str::to_string)
    });

    from_json.unwrap_or_else(|| body.chars().take(200).collect())
}
