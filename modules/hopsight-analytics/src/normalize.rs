//! Record normalizer: raw Apify dataset items → canonical [`Profile`] and
//! [`Post`] records.
//!
//! Absent or malformed fields degrade to defaults (0 / "" / false); nothing
//! here ever fails. Engagement is recomputed from likes + comments, never
//! trusted from upstream.

use std::collections::HashSet;
use std::sync::OnceLock;

use apify_client::{PostItem, ProfileItem};
use chrono::{DateTime, Utc};
use regex::Regex;

use hopsight_common::{MediaType, Post, Profile};

fn hashtag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Unicode letters included so Spanish diacritics survive (#cervecería).
    RE.get_or_init(|| Regex::new(r"#[\p{L}\p{N}_]+").expect("hashtag regex"))
}

fn mention_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@[A-Za-z0-9_.]+").expect("mention regex"))
}

/// Extract hashtags from a caption: lowercased, `#` stripped, first-seen
/// order preserved, duplicates dropped.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    dedup_tags(
        hashtag_re()
            .find_iter(text)
            .map(|m| m.as_str().trim_start_matches('#').to_lowercase()),
    )
}

/// Extract mentions from a caption: leading `@` stripped, case preserved.
pub fn extract_mentions(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    mention_re()
        .find_iter(text)
        .map(|m| m.as_str().trim_start_matches('@').to_string())
        .filter(|m| seen.insert(m.clone()))
        .collect()
}

fn dedup_tags(tags: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

fn non_negative(n: Option<i64>) -> u64 {
    n.unwrap_or(0).max(0) as u64
}

pub fn normalize_profile(raw: ProfileItem) -> Profile {
    Profile {
        username: raw.username,
        full_name: raw.full_name.unwrap_or_default(),
        biography: raw.biography.unwrap_or_default(),
        followers_count: non_negative(raw.followers_count),
        following_count: non_negative(raw.follows_count),
        posts_count: non_negative(raw.posts_count),
        is_verified: raw.verified.unwrap_or(false),
        is_private: raw.private.unwrap_or(false),
        profile_pic_url: raw.profile_pic_url.unwrap_or_default(),
        external_url: raw.external_url,
        category: raw.business_category_name,
        business_email: raw.business_email,
        business_phone: raw.business_phone_number,
        business_address: raw.business_address,
    }
}

pub fn normalize_post(raw: PostItem) -> Post {
    let likes_count = non_negative(raw.likes_count);
    let comments_count = non_negative(raw.comments_count);
    let caption = raw.caption.unwrap_or_default();

    // Explicit type field wins; the isVideo bool is the fallback. Carousel
    // only when upstream marks multiple media.
    let media_type = match raw.post_type.as_deref() {
        Some("Sidecar") | Some("Carousel") => MediaType::Carousel,
        Some("Video") => MediaType::Video,
        Some("Image") => MediaType::Photo,
        _ if raw.is_video.unwrap_or(false) => MediaType::Video,
        _ => MediaType::Photo,
    };

    // Upstream tag lists are used when present; otherwise fall back to the
    // caption grammar. Either way hashtags end up lowercased and deduped.
    let hashtags = match raw.hashtags {
        Some(tags) if !tags.is_empty() => dedup_tags(
            tags.into_iter()
                .map(|t| t.trim_start_matches('#').to_lowercase()),
        ),
        _ => extract_hashtags(&caption),
    };
    let mentions = match raw.mentions {
        Some(ms) if !ms.is_empty() => {
            let mut seen = HashSet::new();
            ms.into_iter()
                .map(|m| m.trim_start_matches('@').to_string())
                .filter(|m| !m.is_empty())
                .filter(|m| seen.insert(m.clone()))
                .collect()
        }
        _ => extract_mentions(&caption),
    };

    Post {
        id: raw.id.unwrap_or_default(),
        shortcode: raw.short_code.unwrap_or_default(),
        timestamp: raw.timestamp.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        likes_count,
        comments_count,
        engagement: likes_count + comments_count,
        hashtags,
        mentions,
        media_type,
        url: raw.url.or(raw.display_url).unwrap_or_default(),
        caption,
    }
}

/// Normalize a full scrape batch.
pub fn normalize(raw_profile: ProfileItem, raw_posts: Vec<PostItem>) -> (Profile, Vec<Post>) {
    (
        normalize_profile(raw_profile),
        raw_posts.into_iter().map(normalize_post).collect(),
    )
}
