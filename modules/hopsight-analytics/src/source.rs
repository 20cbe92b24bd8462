//! Acquisition seam. The analytics core never constructs or owns a network
//! client; callers inject an implementation (Apify-backed in production,
//! fixture-backed in tests).

use async_trait::async_trait;

use hopsight_common::error::Result;
use hopsight_common::ProfileBundle;

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch a profile snapshot and up to `max_posts` recent posts.
    ///
    /// Fails with `NotFound` for unknown accounts or accounts with zero
    /// retrievable posts, and `RateLimited` when upstream throttles. The
    /// core treats both as terminal for that username; retry policy
    /// belongs to the implementation.
    async fn fetch(&self, username: &str, max_posts: u32) -> Result<ProfileBundle>;

    /// Distinct usernames recently posting under a hashtag, first-seen
    /// order. Used to discover prospect candidates.
    async fn discover(&self, hashtag: &str, max_posts: u32) -> Result<Vec<String>>;
}
