//! Transport for the batch endpoint.
//!
//! [`HttpBackend`] is the seam tests use to replace the network. The reqwest
//! implementation retries transient failures per the configured policy.

use std::future::Future;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::RetryPolicy;
use crate::error::{FeedHttpError, FeedHttpResult};
use crate::models::FeedConfig;

#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> FeedHttpResult<T>;
}

/// reqwest client plus the retry policy and credentials it applies.
pub struct ReqwestBackend {
    client: reqwest::Client,
    retry: RetryPolicy,
    bearer_token: Option<String>,
}

impl ReqwestBackend {
    pub fn new(config: &FeedConfig) -> FeedHttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            retry: config.retry,
            bearer_token: config.bearer_token.clone(),
        })
    }

    fn request(&self, url: &Url) -> reqwest::RequestBuilder {
        let request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// One GET, with a non-2xx status turned into an error.
    async fn attempt(&self, url: &Url) -> FeedHttpResult<reqwest::Response> {
        let response = self.request(url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(FeedHttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            })
        }
    }

}

/// Run `attempt` until it succeeds, fails permanently, or `policy` runs out
/// of retries. Sleeps the policy's backoff between attempts.
pub(crate) async fn retry_transient<T, F, Fut>(
    policy: RetryPolicy,
    mut attempt: F,
) -> FeedHttpResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = FeedHttpResult<T>>,
{
    let mut retry = 0u8;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && retry < policy.retries => {
                retry += 1;
                let delay = policy.delay_before(retry);
                warn!(target: "feedq.http", error = %e, retry, ?delay, "Batch request failed, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> FeedHttpResult<T> {
        let response = retry_transient(self.retry, || self.attempt(url)).await?;
        let body = response.bytes().await?;
        debug!(target: "feedq.http", bytes = body.len(), "Batch body received");
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// What the fake answers for one request.
    #[derive(Clone)]
    pub enum Canned {
        Json(serde_json::Value),
        Status(u16),
        Malformed,
    }

    /// Replays canned answers in order and records requested URLs. Runs out
    /// with a 404.
    #[derive(Clone, Default)]
    pub struct FakeBackend {
        script: Arc<Mutex<VecDeque<Canned>>>,
        seen: Arc<Mutex<Vec<Url>>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, answer: Canned) -> Self {
            self.script.lock().unwrap().push_back(answer);
            self
        }

        pub fn requests(&self) -> Vec<Url> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> FeedHttpResult<T> {
            self.seen.lock().unwrap().push(url.clone());
            let answer = self.script.lock().unwrap().pop_front();

            let status = match answer {
                Some(Canned::Json(json)) => return Ok(serde_json::from_value(json)?),
                Some(Canned::Malformed) => return Ok(serde_json::from_str("{not json")?),
                Some(Canned::Status(status)) => status,
                None => 404,
            };
            Err(FeedHttpError::Status {
                status,
                url: url.to_string(),
            })
        }
    }
}
