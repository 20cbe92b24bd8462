//! Production [`ProfileSource`]: Apify scraping actors plus the record
//! normalizer. Client errors are mapped into the shared taxonomy at this
//! seam; `ApifyError` never crosses into handlers.

use async_trait::async_trait;

use apify_client::{ApifyClient, ApifyError, PostItem, ProfileItem};
use hopsight_analytics::{normalize, ProfileSource};
use hopsight_common::error::Result;
use hopsight_common::{HopsightError, ProfileBundle};

pub struct ApifySource {
    client: ApifyClient,
}

impl ApifySource {
    pub fn new(client: ApifyClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileSource for ApifySource {
    async fn fetch(&self, username: &str, max_posts: u32) -> Result<ProfileBundle> {
        let raw_profile = self
            .client
            .scrape_profile(username)
            .await
            .map_err(map_apify_error)?;
        let raw_posts = self
            .client
            .scrape_posts(username, max_posts)
            .await
            .map_err(map_apify_error)?;

        tracing::debug!(
            %username,
            posts = raw_posts.len(),
            "Fetched raw profile data"
        );

        into_bundle(raw_profile, raw_posts)
    }

    async fn discover(&self, hashtag: &str, max_posts: u32) -> Result<Vec<String>> {
        let posts = self
            .client
            .search_hashtag_posts(hashtag, max_posts)
            .await
            .map_err(map_apify_error)?;

        let mut seen = std::collections::HashSet::new();
        let usernames: Vec<String> = posts
            .into_iter()
            .filter_map(|p| p.owner_username)
            .filter(|u| !u.is_empty())
            .filter(|u| seen.insert(u.clone()))
            .collect();

        tracing::debug!(hashtag, accounts = usernames.len(), "Discovered accounts");
        Ok(usernames)
    }
}

fn map_apify_error(err: ApifyError) -> HopsightError {
    match err {
        ApifyError::NotFound(username) => HopsightError::NotFound(username),
        ApifyError::RateLimited(message) => HopsightError::RateLimited(message),
        other => HopsightError::Upstream(other.to_string()),
    }
}

/// Normalize a raw scrape into a bundle. Zero retrievable posts is
/// `NotFound`: nothing downstream can analyze an empty batch.
fn into_bundle(raw_profile: ProfileItem, raw_posts: Vec<PostItem>) -> Result<ProfileBundle> {
    let (profile, posts) = normalize::normalize(raw_profile, raw_posts);
    if posts.is_empty() {
        return Err(HopsightError::NotFound(profile.username));
    }
    Ok(ProfileBundle { profile, posts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_posts_reads_as_not_found() {
        let raw_profile = ProfileItem {
            username: "silent_account".to_string(),
            ..Default::default()
        };
        let err = into_bundle(raw_profile, vec![]).unwrap_err();
        assert!(matches!(err, HopsightError::NotFound(ref u) if u == "silent_account"));
    }

    #[test]
    fn non_empty_scrape_bundles_up() {
        let raw_profile = ProfileItem {
            username: "bar_central".to_string(),
            ..Default::default()
        };
        let raw_post = PostItem {
            likes_count: Some(10),
            ..Default::default()
        };
        let bundle = into_bundle(raw_profile, vec![raw_post]).unwrap();
        assert_eq!(bundle.profile.username, "bar_central");
        assert_eq!(bundle.posts.len(), 1);
    }
}
