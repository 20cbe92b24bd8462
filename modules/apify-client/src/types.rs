use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Actor inputs ---

/// Input for the Instagram profile actor (`resultsType: profiles`).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileScraperInput {
    pub usernames: Vec<String>,
    #[serde(rename = "resultsType")]
    pub results_type: &'static str,
    #[serde(rename = "resultsLimit")]
    pub results_limit: u32,
}

/// Input for the Instagram post scraper actor (`resultsType: posts`).
#[derive(Debug, Clone, Serialize)]
pub struct PostScraperInput {
    pub usernames: Vec<String>,
    #[serde(rename = "resultsType")]
    pub results_type: &'static str,
    #[serde(rename = "resultsLimit")]
    pub results_limit: u32,
    #[serde(rename = "addParentData")]
    pub add_parent_data: bool,
}

/// Input for hashtag search via the post scraper actor.
#[derive(Debug, Clone, Serialize)]
pub struct HashtagScraperInput {
    pub hashtags: Vec<String>,
    #[serde(rename = "resultsType")]
    pub results_type: &'static str,
    #[serde(rename = "resultsLimit")]
    pub results_limit: u32,
    #[serde(rename = "addParentData")]
    pub add_parent_data: bool,
}

// --- Dataset items ---

/// A profile record from the Apify profile actor dataset.
/// Every field except `username` is optional; upstream omits what it
/// could not scrape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileItem {
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub biography: Option<String>,
    #[serde(rename = "followersCount")]
    pub followers_count: Option<i64>,
    #[serde(rename = "followsCount")]
    pub follows_count: Option<i64>,
    #[serde(rename = "postsCount")]
    pub posts_count: Option<i64>,
    pub verified: Option<bool>,
    pub private: Option<bool>,
    #[serde(rename = "profilePicUrl")]
    pub profile_pic_url: Option<String>,
    #[serde(rename = "externalUrl")]
    pub external_url: Option<String>,
    #[serde(rename = "businessCategoryName")]
    pub business_category_name: Option<String>,
    #[serde(rename = "businessEmail")]
    pub business_email: Option<String>,
    #[serde(rename = "businessPhoneNumber")]
    pub business_phone_number: Option<String>,
    #[serde(rename = "businessAddress")]
    pub business_address: Option<String>,
}

/// A single post from the Apify post-scraper dataset. Also the item shape
/// returned by hashtag search (with owner fields populated).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostItem {
    pub id: Option<String>,
    #[serde(rename = "shortCode")]
    pub short_code: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub caption: Option<String>,
    #[serde(rename = "likesCount")]
    pub likes_count: Option<i64>,
    #[serde(rename = "commentsCount")]
    pub comments_count: Option<i64>,
    pub hashtags: Option<Vec<String>>,
    pub mentions: Option<Vec<String>>,
    /// "Image", "Video", or "Sidecar" (carousel). Not always present.
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    #[serde(rename = "isVideo")]
    pub is_video: Option<bool>,
    #[serde(rename = "displayUrl")]
    pub display_url: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "ownerUsername")]
    pub owner_username: Option<String>,
    #[serde(rename = "ownerFullName")]
    pub owner_full_name: Option<String>,
    #[serde(rename = "ownerIsVerified")]
    pub owner_is_verified: Option<bool>,
    #[serde(rename = "ownerProfilePicUrl")]
    pub owner_profile_pic_url: Option<String>,
}

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}
