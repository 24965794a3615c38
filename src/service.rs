//! Request and response types for serving conversions, plus a template
//! fetcher behind the `fetch` feature.
//!
//! A caller posts `{"template_url": "..."}` and receives either
//! `{"html": "..."}` or `{"error": "..."}`. Download failures and parse
//! failures are told apart by their message prefix.
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};

/// A request to convert the template stored at `template_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub template_url: String,
}

/// Outcome of a conversion, serialized as `{"html"}` or `{"error"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConvertResponse {
    Html { html: String },
    Error { error: String },
}

impl ConvertResponse {
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl From<Result<String>> for ConvertResponse {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(html) => Self::Html { html },
            Err(err @ (Error::Fetch { .. } | Error::Timeout { .. })) => Self::Error {
                error: err.to_string(),
            },
            Err(err) => Self::Error {
                error: format!("failed to parse template: {err}"),
            },
        }
    }
}

#[cfg(feature = "fetch")]
pub use fetch::{FetchOptions, TemplateFetcher};

#[cfg(feature = "fetch")]
mod fetch {
    use super::{ConvertRequest, ConvertResponse};
    use crate::common::{Error, Result};
    use crate::html::HtmlOptions;
    use std::time::Duration;

    /// Limits applied to template downloads.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FetchOptions {
        /// Deadline for the whole download, body included
        pub timeout: Duration,
        pub connect_timeout: Duration,
        /// Largest accepted template body
        pub max_template_bytes: usize,
    }

    impl Default for FetchOptions {
        fn default() -> Self {
            Self {
                timeout: Duration::from_secs(30),
                connect_timeout: Duration::from_secs(10),
                max_template_bytes: 20 * 1024 * 1024,
            }
        }
    }

    impl FetchOptions {
        #[inline]
        pub fn new() -> Self {
            Self::default()
        }

        #[inline]
        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.timeout = timeout;
            self
        }

        #[inline]
        pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
            self.connect_timeout = timeout;
            self
        }

        #[inline]
        pub fn with_max_template_bytes(mut self, max: usize) -> Self {
            self.max_template_bytes = max;
            self
        }
    }

    /// Downloads templates and converts them to HTML.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use tamarind::service::{ConvertRequest, TemplateFetcher};
    ///
    /// # async fn run() -> Result<(), tamarind::Error> {
    /// let fetcher = TemplateFetcher::new()?;
    /// let request = ConvertRequest {
    ///     template_url: "https://storage.example.com/templates/nda.docx".into(),
    /// };
    /// let response = fetcher.convert(&request).await;
    /// println!("{}", serde_json::to_string(&response).unwrap());
    /// # Ok(())
    /// # }
    /// ```
    #[derive(Debug, Clone)]
    pub struct TemplateFetcher {
        client: reqwest::Client,
        options: FetchOptions,
        html_options: HtmlOptions,
    }

    impl TemplateFetcher {
        pub fn new() -> Result<Self> {
            Self::with_options(FetchOptions::default(), HtmlOptions::default())
        }

        pub fn with_options(options: FetchOptions, html_options: HtmlOptions) -> Result<Self> {
            let client = reqwest::Client::builder()
                .connect_timeout(options.connect_timeout)
                .build()
                .map_err(|e| Error::Other(format!("failed to build HTTP client: {e}")))?;
            Ok(Self {
                client,
                options,
                html_options,
            })
        }

        #[inline]
        pub fn options(&self) -> &FetchOptions {
            &self.options
        }

        /// Download the template bytes at `url`.
        ///
        /// Only `http` and `https` URLs are accepted. Non-success statuses
        /// and bodies over the size limit are errors.
        pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            let fail = |reason: String| Error::Fetch {
                url: url.to_string(),
                reason,
            };

            let parsed = reqwest::Url::parse(url).map_err(|e| fail(format!("invalid URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(fail(format!("unsupported URL scheme {:?}", parsed.scheme())));
            }

            log::debug!("fetching template from {url}");
            let download = async {
                let mut response = self
                    .client
                    .get(parsed)
                    .send()
                    .await
                    .map_err(|e| fail(e.to_string()))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(fail(format!("HTTP status {status}")));
                }

                let limit = self.options.max_template_bytes;
                if let Some(length) = response.content_length()
                    && length > limit as u64
                {
                    return Err(fail(format!("template is {length} bytes, limit is {limit}")));
                }

                let mut body = Vec::new();
                while let Some(chunk) = response.chunk().await.map_err(|e| fail(e.to_string()))? {
                    if body.len() + chunk.len() > limit {
                        return Err(fail(format!("template exceeds {limit} bytes")));
                    }
                    body.extend_from_slice(&chunk);
                }
                Ok(body)
            };

            let body = tokio::time::timeout(self.options.timeout, download)
                .await
                .map_err(|_| Error::Timeout {
                    url: url.to_string(),
                    seconds: self.options.timeout.as_secs(),
                })??;
            log::debug!("fetched {} bytes from {url}", body.len());
            Ok(body)
        }

        /// Fetch and convert a template to HTML.
        pub async fn convert_url(&self, url: &str) -> Result<String> {
            let bytes = self.fetch(url).await?;
            let options = self.html_options.clone();
            tokio::task::spawn_blocking(move || crate::docx_to_html_with_options(&bytes, &options))
                .await
                .map_err(|e| Error::Other(format!("conversion task failed: {e}")))?
        }

        /// Answer a conversion request. Errors are logged and returned in
        /// the response body.
        pub async fn convert(&self, request: &ConvertRequest) -> ConvertResponse {
            let result = self.convert_url(&request.template_url).await;
            if let Err(err) = &result {
                log::warn!(
                    "conversion of {} failed ({:?}): {err}",
                    request.template_url,
                    err.kind()
                );
            }
            result.into()
        }
    }
}
