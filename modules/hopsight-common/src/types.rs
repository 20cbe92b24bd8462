use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::HopsightError;

// --- Canonical records ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Photo,
    Video,
    Carousel,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Photo => write!(f, "photo"),
            MediaType::Video => write!(f, "video"),
            MediaType::Carousel => write!(f, "carousel"),
        }
    }
}

/// Immutable profile snapshot fetched at analysis time. Never persisted;
/// each tool invocation re-fetches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub full_name: String,
    pub biography: String,
    pub followers_count: u64,
    pub following_count: u64,
    pub posts_count: u64,
    pub is_verified: bool,
    pub is_private: bool,
    pub profile_pic_url: String,
    pub external_url: Option<String>,
    pub category: Option<String>,
    pub business_email: Option<String>,
    pub business_phone: Option<String>,
    pub business_address: Option<String>,
}

/// A normalized post. `engagement` is always recomputed from likes +
/// comments at normalization, never trusted from upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub shortcode: String,
    pub timestamp: DateTime<Utc>,
    pub caption: String,
    pub likes_count: u64,
    pub comments_count: u64,
    pub engagement: u64,
    /// Lowercased, first-seen order preserved.
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub media_type: MediaType,
    pub url: String,
}

/// A profile plus its recent posts, as returned by the acquisition seam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileBundle {
    pub profile: Profile,
    pub posts: Vec<Post>,
}

// --- Derived analytics (computed fresh per request, never stored) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagRank {
    pub hashtag: String,
    pub frequency: u32,
    pub avg_engagement: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub avg_engagement: f64,
    /// Percentage: average engagement per post over audience size.
    pub engagement_rate: f64,
    /// Posts per 7-day period over the batch's actual timespan.
    pub posting_frequency: f64,
    /// Top 3 hour-of-day buckets as "HH:00" labels, best first.
    pub best_posting_times: Vec<String>,
    /// Weekday with the highest mean engagement.
    pub best_day: String,
    /// Hashtags with >= 2 occurrences, ranked by mean engagement, top 10.
    pub top_hashtags: Vec<HashtagRank>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagStat {
    pub hashtag: String,
    pub occurrences: u32,
    pub avg_engagement: f64,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub trend: Trend,
}

/// Rule-based usage verdict for a single hashtag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagRecommendation {
    pub hashtag: String,
    pub popularity: u32,
    pub difficulty: u32,
    pub relevance: u32,
    pub should_use: bool,
    pub reasons: Vec<String>,
}

/// Aggregate recommendation buckets over an analyzed batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HashtagRecommendations {
    pub top_performing: Vec<String>,
    pub emerging: Vec<String>,
    pub avoid: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagReport {
    pub stats: BTreeMap<String, HashtagStat>,
    pub verdicts: Vec<HashtagRecommendation>,
    pub recommendations: HashtagRecommendations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveComparison {
    /// subject followers minus baseline followers.
    pub followers_gap: i64,
    /// Ratio of subject avg engagement over baseline avg engagement
    /// (a zero baseline average substitutes 1). Self-comparison yields 1.0.
    pub engagement_comparison: f64,
    /// Subject posts per week.
    pub post_frequency: f64,
    /// [0, 1], rounded to 2 decimals.
    pub content_similarity: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwotInsights {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitiveReport {
    pub username: String,
    pub comparison: CompetitiveComparison,
    pub insights: SwotInsights,
    /// Composite 0-100.
    pub overall_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Alta,
    Media,
    Baja,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Alta => write!(f, "alta"),
            Priority::Media => write!(f, "media"),
            Priority::Baja => write!(f, "baja"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectScore {
    pub industry_match: f64,
    pub audience_match: f64,
    pub location_match: f64,
    pub content_style: f64,
    /// Weighted composite, rounded, 0-100.
    pub score: u32,
    pub priority: Priority,
}

/// Weights for the four prospect sub-scores. Must be non-negative and sum
/// to ~1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub industry: f64,
    pub audience: f64,
    pub location: f64,
    pub content: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            industry: 0.4,
            audience: 0.3,
            location: 0.2,
            content: 0.1,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), HopsightError> {
        let parts = [self.industry, self.audience, self.location, self.content];
        if parts.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(HopsightError::Validation(
                "scoring weights must be non-negative".to_string(),
            ));
        }
        let sum: f64 = parts.iter().sum();
        if (sum - 1.0).abs() > 0.01 {
            return Err(HopsightError::Validation(format!(
                "scoring weights must sum to 1.0, got {sum:.3}"
            )));
        }
        Ok(())
    }
}

// --- Tool response envelope ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub processing_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// The wire envelope every tool invocation returns. Internal error type
/// names never leak; only display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metadata: ToolMetadata,
}

impl ToolResult {
    pub fn ok(data: serde_json::Value, processing_time_ms: u64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            metadata: ToolMetadata {
                processing_time_ms,
                timestamp: Utc::now(),
            },
        }
    }

    pub fn err(message: impl Into<String>, processing_time_ms: u64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            metadata: ToolMetadata {
                processing_time_ms,
                timestamp: Utc::now(),
            },
        }
    }
}
