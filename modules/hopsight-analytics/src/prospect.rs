//! Prospect scorer: weighted compatibility of a candidate venue account
//! (bar, restaurant) as a business lead.
//!
//! Four sub-scores (industry, audience, location, content style), each 0-100,
//! combined with caller-supplied weights into a single score and a priority
//! tier. `now` is injected so the recent-activity window is testable.

use chrono::{DateTime, Duration, Utc};

use hopsight_common::error::Result;
use hopsight_common::{Post, Priority, Profile, ProspectScore, ScoringWeights};

use crate::keywords;

/// Cheap boolean gate applied before full scoring during bulk discovery.
/// Venue keyword in bio/name required; personal-account keyword
/// disqualifies; follower count must be plausible for a local venue.
pub fn is_relevant_for_prospection(profile: &Profile) -> bool {
    let bio = profile.biography.to_lowercase();
    let name = profile.full_name.to_lowercase();

    let has_venue_keyword = keywords::contains_any(&bio, keywords::PROSPECT_KEYWORDS)
        || keywords::contains_any(&name, keywords::PROSPECT_KEYWORDS);
    let is_personal = keywords::contains_any(&bio, keywords::PERSONAL_ACCOUNT_KEYWORDS)
        || keywords::contains_any(&name, keywords::PERSONAL_ACCOUNT_KEYWORDS);
    let reasonable_followers =
        profile.followers_count >= 100 && profile.followers_count <= 100_000;

    has_venue_keyword && !is_personal && reasonable_followers
}

/// Industry fit: keyword hits over bio + captions, plus a business-category
/// bonus. Beer terms weigh heaviest.
pub fn industry_match(profile: &Profile, posts: &[Post]) -> f64 {
    let bio = profile.biography.to_lowercase();
    let all_text: String = posts
        .iter()
        .map(|p| p.caption.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    let hit = |kw: &str| bio.contains(kw) || all_text.contains(kw);

    let mut score: f64 = 0.0;
    for kw in keywords::BEER_KEYWORDS {
        if hit(kw) {
            score += 15.0;
        }
    }
    for kw in keywords::FOOD_KEYWORDS {
        if hit(kw) {
            score += 10.0;
        }
    }
    for kw in keywords::EXPERIENCE_KEYWORDS {
        if hit(kw) {
            score += 5.0;
        }
    }

    if let Some(category) = &profile.category {
        let category = category.to_lowercase();
        if category.contains("restaurant") {
            score += 20.0;
        }
        if category.contains("bar") {
            score += 25.0;
        }
    }

    score.min(100.0)
}

/// Audience fit: follower range, engagement-rate tier, recent activity, and
/// beer-content presence.
pub fn audience_match(profile: &Profile, posts: &[Post], now: DateTime<Utc>) -> f64 {
    let mut score = 0.0;

    let followers = profile.followers_count;
    if (1_000..=50_000).contains(&followers) {
        score += 40.0;
    } else if (500..=100_000).contains(&followers) {
        score += 25.0;
    } else {
        score += 10.0;
    }

    if !posts.is_empty() {
        let avg = posts.iter().map(|p| p.engagement).sum::<u64>() as f64 / posts.len() as f64;
        let rate = if followers > 0 {
            avg / followers as f64 * 100.0
        } else {
            0.0
        };
        if rate >= 2.0 {
            score += 30.0;
        } else if rate >= 1.0 {
            score += 20.0;
        } else {
            score += 10.0;
        }
    }

    let month_ago = now - Duration::days(30);
    let recent = posts.iter().filter(|p| p.timestamp > month_ago).count();
    if recent >= 8 {
        score += 20.0;
    } else if recent >= 4 {
        score += 15.0;
    } else {
        score += 5.0;
    }

    let beer_posts = posts
        .iter()
        .filter(|p| {
            let caption = p.caption.to_lowercase();
            caption.contains("cerveza")
                || caption.contains("beer")
                || p.hashtags
                    .iter()
                    .any(|t| t.contains("cerveza") || t.contains("beer"))
        })
        .count();
    if beer_posts > 0 {
        score += (beer_posts as f64 * 2.0).min(10.0);
    }

    score.min(100.0)
}

/// Location fit: bio keywords and the structured business address. No
/// location signal at all scores a neutral 30.
pub fn location_match(profile: &Profile) -> f64 {
    let bio = profile.biography.to_lowercase();

    let mut score: f64 = 0.0;
    for kw in keywords::LOCATION_KEYWORDS {
        if bio.contains(kw) {
            score += 25.0;
        }
    }

    if let Some(address) = &profile.business_address {
        if address.to_lowercase().contains("santiago") {
            score += 50.0;
        }
    }

    if score == 0.0 {
        score = 30.0;
    }

    score.min(100.0)
}

/// Content-style fit: media diversity, hashtag density, caption length, and
/// experiential content.
pub fn content_style_match(posts: &[Post]) -> f64 {
    let n = posts.len().max(1) as f64;
    let mut score = 0.0;

    let mut media_types: Vec<_> = posts.iter().map(|p| p.media_type).collect();
    media_types.sort_by_key(|mt| *mt as u8);
    media_types.dedup();
    score += media_types.len() as f64 * 15.0;

    let avg_hashtags = posts.iter().map(|p| p.hashtags.len()).sum::<usize>() as f64 / n;
    if avg_hashtags >= 5.0 {
        score += 25.0;
    } else if avg_hashtags >= 3.0 {
        score += 15.0;
    } else {
        score += 5.0;
    }

    let avg_caption_len = posts
        .iter()
        .map(|p| p.caption.chars().count())
        .sum::<usize>() as f64
        / n;
    if avg_caption_len >= 100.0 {
        score += 20.0;
    } else if avg_caption_len >= 50.0 {
        score += 15.0;
    } else {
        score += 10.0;
    }

    let experience_posts = posts
        .iter()
        .filter(|p| {
            let caption = p.caption.to_lowercase();
            keywords::contains_any(&caption, keywords::EXPERIENCE_CAPTION_KEYWORDS)
        })
        .count();
    if experience_posts > 0 {
        score += (experience_posts as f64 * 3.0).min(20.0);
    }

    score.min(100.0)
}

/// Priority tier from the final rounded score.
pub fn priority_for(score: u32) -> Priority {
    if score >= 75 {
        Priority::Alta
    } else if score >= 50 {
        Priority::Media
    } else {
        Priority::Baja
    }
}

/// Full weighted prospect score. Validates the weights before scoring.
pub fn score_prospect(
    profile: &Profile,
    posts: &[Post],
    weights: ScoringWeights,
    now: DateTime<Utc>,
) -> Result<ProspectScore> {
    weights.validate()?;

    let industry = industry_match(profile, posts);
    let audience = audience_match(profile, posts, now);
    let location = location_match(profile);
    let content = content_style_match(posts);

    let weighted = industry * weights.industry
        + audience * weights.audience
        + location * weights.location
        + content * weights.content;
    let score = weighted.clamp(0.0, 100.0).round() as u32;

    Ok(ProspectScore {
        industry_match: industry,
        audience_match: audience,
        location_match: location,
        content_style: content,
        score,
        priority: priority_for(score),
    })
}
