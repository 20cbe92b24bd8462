pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{
    HashtagScraperInput, PostItem, PostScraperInput, ProfileItem, ProfileScraperInput, RunData,
};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for the Instagram post scraper (posts + hashtag search).
const INSTAGRAM_POST_SCRAPER: &str = "shu8hvrXbJbY3Eb9W";

/// Actor ID for the Instagram profile scraper.
const INSTAGRAM_PROFILE_SCRAPER: &str = "dSCLg0C3YEZ83HzYX";

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    /// Minimum spacing between outgoing requests. Upstream throttles hard,
    /// so every call goes through `throttle()` first.
    request_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self::with_request_delay(token, Duration::from_millis(2000))
    }

    pub fn with_request_delay(token: String, request_delay: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            request_delay,
            last_request: Mutex::new(None),
        }
    }

    /// Sleep out the remainder of the inter-request window, if any.
    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.request_delay {
                tokio::time::sleep(self.request_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Start an actor run. Returns immediately with run metadata.
    async fn start_run<I: Serialize>(&self, actor_id: &str, input: &I) -> Result<RunData> {
        self.throttle().await;

        let url = format!("{}/acts/{}/runs", BASE_URL, actor_id);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 429 {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::RateLimited(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse<RunData> = resp.json().await?;
        Ok(api_resp.data)
    }

    /// Poll until a run completes. Uses `waitForFinish=60` for efficient long-polling.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        loop {
            let url = format!("{}/actor-runs/{}?waitForFinish=60", BASE_URL, run_id);
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.token)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(ApifyError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let api_resp: ApiResponse<RunData> = resp.json().await?;
            match api_resp.data.status.as_str() {
                "SUCCEEDED" => return Ok(api_resp.data),
                "FAILED" | "ABORTED" | "TIMED-OUT" => {
                    return Err(ApifyError::RunFailed(api_resp.data.status));
                }
                _ => {
                    tracing::debug!(run_id, status = %api_resp.data.status, "Run still in progress");
                    continue;
                }
            }
        }
    }

    /// Fetch dataset items from a completed run.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items?format=json", BASE_URL, dataset_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let items: Vec<T> = resp.json().await?;
        Ok(items)
    }

    /// Run an actor end-to-end: start, poll, fetch dataset.
    async fn run_actor<I: Serialize, T: DeserializeOwned>(
        &self,
        actor_id: &str,
        input: &I,
    ) -> Result<Vec<T>> {
        let run = self.start_run(actor_id, input).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let completed = self.wait_for_run(&run.id).await?;
        tracing::info!(
            run_id = %completed.id,
            dataset_id = %completed.default_dataset_id,
            "Run completed, fetching results"
        );

        self.get_dataset_items(&completed.default_dataset_id).await
    }

    /// Scrape a single Instagram profile record.
    pub async fn scrape_profile(&self, username: &str) -> Result<ProfileItem> {
        tracing::info!(username, "Starting Instagram profile scrape");

        let input = ProfileScraperInput {
            usernames: vec![username.to_string()],
            results_type: "profiles",
            results_limit: 1,
        };

        let mut items: Vec<ProfileItem> = self.run_actor(INSTAGRAM_PROFILE_SCRAPER, &input).await?;
        if items.is_empty() {
            return Err(ApifyError::NotFound(username.to_string()));
        }
        Ok(items.remove(0))
    }

    /// Scrape recent posts from an Instagram profile.
    pub async fn scrape_posts(&self, username: &str, limit: u32) -> Result<Vec<PostItem>> {
        tracing::info!(username, limit, "Starting Instagram post scrape");

        let input = PostScraperInput {
            usernames: vec![username.to_string()],
            results_type: "posts",
            results_limit: limit,
            add_parent_data: false,
        };

        let posts: Vec<PostItem> = self.run_actor(INSTAGRAM_POST_SCRAPER, &input).await?;
        tracing::info!(count = posts.len(), "Fetched Instagram posts");
        Ok(posts)
    }

    /// Search recent posts under a hashtag. Owner fields are populated so
    /// callers can collect the distinct accounts posting under the tag.
    pub async fn search_hashtag_posts(&self, hashtag: &str, limit: u32) -> Result<Vec<PostItem>> {
        let tag = hashtag.trim_start_matches('#');
        tracing::info!(hashtag = tag, limit, "Starting Instagram hashtag search");

        let input = HashtagScraperInput {
            hashtags: vec![tag.to_string()],
            results_type: "posts",
            results_limit: limit,
            add_parent_data: true,
        };

        let posts: Vec<PostItem> = self.run_actor(INSTAGRAM_POST_SCRAPER, &input).await?;
        tracing::info!(count = posts.len(), "Fetched hashtag posts");
        Ok(posts)
    }
}
