//! Hashtag performance engine: per-hashtag engagement statistics, trend
//! direction, and rule-based usage verdicts.

use std::collections::{BTreeMap, HashMap};

use hopsight_common::{
    HashtagRecommendation, HashtagRecommendations, HashtagReport, HashtagStat, Post, Trend,
};

use crate::keywords;
use crate::metrics::MIN_HASHTAG_OCCURRENCES;

/// Group posts by hashtag membership and compute per-tag statistics.
/// Tags appearing fewer than twice are statistical noise and dropped.
pub fn analyze_hashtags(posts: &[Post]) -> BTreeMap<String, HashtagStat> {
    let mut groups: HashMap<&str, Vec<&Post>> = HashMap::new();
    for post in posts {
        for tag in &post.hashtags {
            groups.entry(tag).or_default().push(post);
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() as u32 >= MIN_HASHTAG_OCCURRENCES)
        .map(|(tag, members)| {
            let n = members.len() as f64;
            let total_likes: u64 = members.iter().map(|p| p.likes_count).sum();
            let total_comments: u64 = members.iter().map(|p| p.comments_count).sum();
            let stat = HashtagStat {
                hashtag: tag.to_string(),
                occurrences: members.len() as u32,
                avg_engagement: (total_likes + total_comments) as f64 / n,
                avg_likes: total_likes as f64 / n,
                avg_comments: total_comments as f64 / n,
                trend: trend(&members),
            };
            (tag.to_string(), stat)
        })
        .collect()
}

/// Trend direction for one hashtag's posts: mean engagement of the second
/// (recent) chronological half against the first. Fewer than 4 posts is
/// insufficient signal and always reads stable; on odd counts the second
/// half gets the extra post.
pub fn trend(posts: &[&Post]) -> Trend {
    if posts.len() < 4 {
        return Trend::Stable;
    }

    let mut sorted: Vec<&Post> = posts.to_vec();
    sorted.sort_by_key(|p| p.timestamp);
    let mid = sorted.len() / 2;

    let half_avg = |half: &[&Post]| {
        half.iter().map(|p| p.engagement).sum::<u64>() as f64 / half.len() as f64
    };
    let first_avg = half_avg(&sorted[..mid]);
    let second_avg = half_avg(&sorted[mid..]);

    // Zero-engagement first half: any growth reads as up, never a division.
    if first_avg == 0.0 {
        return if second_avg > 0.0 {
            Trend::Up
        } else {
            Trend::Stable
        };
    }

    let change = (second_avg - first_avg) / first_avg;
    if change > 0.10 {
        Trend::Up
    } else if change < -0.10 {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Batch-local popularity tier (0-100): an account-scoped scrape never sees
/// global tag volume, so how heavily the account itself leans on a tag
/// stands in.
pub fn popularity_proxy(occurrences: u32) -> u32 {
    if occurrences >= 20 {
        80
    } else if occurrences >= 10 {
        60
    } else if occurrences >= 5 {
        40
    } else {
        20
    }
}

/// Ranking difficulty (0-100): popular tags are crowded, and high ambient
/// engagement raises the bar further.
pub fn difficulty_score(popularity: u32, avg_engagement: f64) -> u32 {
    let popularity_factor = popularity as f64 * 0.7;
    let engagement_factor = (avg_engagement / 1000.0 * 30.0).min(30.0);
    ((popularity_factor + engagement_factor).round() as u32).min(100)
}

/// Brand relevance (0-100) from keyword affinity of the bare tag.
pub fn relevance_score(hashtag: &str) -> u32 {
    let tag = hashtag.trim_start_matches('#').to_lowercase();

    if keywords::BRAND_HASHTAGS.iter().any(|b| *b == tag) {
        return 100;
    }

    let mut relevance = 0u32;
    if keywords::contains_any(&tag, keywords::RELEVANCE_BEER) {
        relevance += 80;
    }
    if keywords::contains_any(&tag, keywords::RELEVANCE_MUSIC) {
        relevance += 60;
    }
    if keywords::contains_any(&tag, keywords::RELEVANCE_LOCATION) {
        relevance += 40;
    }
    relevance.min(100)
}

/// Rule-based usage verdict. Rules run in a fixed order and later negative
/// rules override earlier positive ones; the final boolean reflects the last
/// matching rule.
pub fn evaluate_usage(
    hashtag: &str,
    popularity: u32,
    difficulty: u32,
    relevance: u32,
) -> HashtagRecommendation {
    let mut should_use = false;
    let mut reasons = Vec::new();

    if relevance >= 60 && difficulty <= 70 {
        should_use = true;
        reasons.push(format!("High brand relevance ({relevance}%)"));
    }
    if (40..=80).contains(&popularity) {
        should_use = true;
        reasons.push("Popularity in the balanced-reach band".to_string());
    }
    if difficulty <= 50 && relevance >= 40 {
        should_use = true;
        reasons.push("Low competition with acceptable relevance".to_string());
    }
    if difficulty > 80 {
        should_use = false;
        reasons.push("Too competitive to rank".to_string());
    }
    if relevance < 30 {
        should_use = false;
        reasons.push("Low relevance for the brand".to_string());
    }

    HashtagRecommendation {
        hashtag: hashtag.to_string(),
        popularity,
        difficulty,
        relevance,
        should_use,
        reasons,
    }
}

/// Full hashtag report over a post batch: stats, per-tag verdicts, and
/// recommendation buckets.
pub fn build_report(posts: &[Post]) -> HashtagReport {
    let stats = analyze_hashtags(posts);

    let mut verdicts: Vec<HashtagRecommendation> = stats
        .values()
        .map(|stat| {
            let popularity = popularity_proxy(stat.occurrences);
            let difficulty = difficulty_score(popularity, stat.avg_engagement);
            let relevance = relevance_score(&stat.hashtag);
            evaluate_usage(&stat.hashtag, popularity, difficulty, relevance)
        })
        .collect();
    verdicts.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| a.hashtag.cmp(&b.hashtag))
    });

    let top_performing: Vec<String> = verdicts
        .iter()
        .filter(|v| v.should_use && v.relevance >= 70)
        .take(5)
        .map(|v| v.hashtag.clone())
        .collect();

    let mut emerging: Vec<(u32, String)> = verdicts
        .iter()
        .filter(|v| v.difficulty <= 60)
        .filter(|v| stats.get(&v.hashtag).is_some_and(|s| s.trend == Trend::Up))
        .map(|v| (v.popularity, v.hashtag.clone()))
        .collect();
    emerging.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    let emerging: Vec<String> = emerging.into_iter().take(3).map(|(_, tag)| tag).collect();

    let avoid: Vec<String> = verdicts
        .iter()
        .filter(|v| !v.should_use)
        .take(3)
        .map(|v| v.hashtag.clone())
        .collect();

    HashtagReport {
        stats,
        verdicts,
        recommendations: HashtagRecommendations {
            top_performing,
            emerging,
            avoid,
        },
    }
}
