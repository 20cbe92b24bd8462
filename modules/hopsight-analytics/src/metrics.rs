//! Metrics calculator: aggregate statistics over a normalized post batch.
//!
//! All outputs are deterministic for a given input batch: sorts use explicit
//! comparators with documented tie-breaks (earlier hour, earlier weekday,
//! lexicographic hashtag).

use std::collections::HashMap;

use chrono::{Datelike, Timelike, Weekday};

use hopsight_common::error::Result;
use hopsight_common::{AnalyticsSnapshot, HashtagRank, HopsightError, Post};

/// Hashtags must appear at least this often to be reported.
pub const MIN_HASHTAG_OCCURRENCES: u32 = 2;

/// Compute the analytics snapshot for a post batch.
///
/// Fails with `InsufficientData` on an empty batch; zero followers yields an
/// engagement rate of exactly 0, never NaN or infinity.
pub fn compute(posts: &[Post], followers_count: u64) -> Result<AnalyticsSnapshot> {
    if posts.is_empty() {
        return Err(HopsightError::InsufficientData {
            found: 0,
            required: 1,
        });
    }

    let n = posts.len() as f64;
    let total_likes: u64 = posts.iter().map(|p| p.likes_count).sum();
    let total_comments: u64 = posts.iter().map(|p| p.comments_count).sum();
    let avg_likes = total_likes as f64 / n;
    let avg_comments = total_comments as f64 / n;
    let avg_engagement = (total_likes + total_comments) as f64 / n;

    // Canonical formula: average per-post engagement over audience size,
    // as a percentage. See DESIGN.md for the divergent-source resolution.
    let engagement_rate = if followers_count > 0 {
        avg_engagement / followers_count as f64 * 100.0
    } else {
        0.0
    };

    Ok(AnalyticsSnapshot {
        avg_likes,
        avg_comments,
        avg_engagement,
        engagement_rate,
        posting_frequency: posting_frequency(posts),
        best_posting_times: best_posting_times(posts),
        best_day: day_name(best_day(posts)).to_string(),
        top_hashtags: top_hashtags(posts),
    })
}

/// Posts per week over the batch's actual timespan (chronological, not
/// calendar weeks). A span under one day counts as one day.
pub fn posting_frequency(posts: &[Post]) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }
    let newest = posts.iter().map(|p| p.timestamp).max().expect("non-empty");
    let oldest = posts.iter().map(|p| p.timestamp).min().expect("non-empty");
    let days = (newest - oldest).num_days().max(1) as f64;
    posts.len() as f64 / days * 7.0
}

/// Top 3 hour-of-day buckets by mean engagement, formatted "HH:00".
/// Ties break toward the earlier hour.
pub fn best_posting_times(posts: &[Post]) -> Vec<String> {
    let mut buckets: [(u64, u32); 24] = [(0, 0); 24];
    for post in posts {
        let hour = post.timestamp.hour() as usize;
        buckets[hour].0 += post.engagement;
        buckets[hour].1 += 1;
    }

    let mut slots: Vec<(usize, f64)> = buckets
        .iter()
        .enumerate()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(hour, (total, count))| (hour, *total as f64 / *count as f64))
        .collect();
    // Descending by mean engagement; the enumerate order already puts the
    // earlier hour first among ties, and the sort is stable.
    slots.sort_by(|a, b| b.1.partial_cmp(&a.1).expect("finite averages"));

    slots
        .into_iter()
        .take(3)
        .map(|(hour, _)| format!("{hour:02}:00"))
        .collect()
}

/// Weekday with the highest mean engagement. Ties break toward the earlier
/// weekday counting from Monday.
pub fn best_day(posts: &[Post]) -> Weekday {
    let mut buckets: [(u64, u32); 7] = [(0, 0); 7];
    for post in posts {
        let day = post.timestamp.weekday().num_days_from_monday() as usize;
        buckets[day].0 += post.engagement;
        buckets[day].1 += 1;
    }

    let best = buckets
        .iter()
        .enumerate()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(day, (total, count))| (day, *total as f64 / *count as f64))
        .fold(None::<(usize, f64)>, |acc, (day, avg)| match acc {
            Some((_, best_avg)) if best_avg >= avg => acc,
            _ => Some((day, avg)),
        });

    match best {
        Some((0, _)) => Weekday::Mon,
        Some((1, _)) => Weekday::Tue,
        Some((2, _)) => Weekday::Wed,
        Some((3, _)) => Weekday::Thu,
        Some((4, _)) => Weekday::Fri,
        Some((5, _)) => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// Full English weekday label for snapshot output.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Hashtags with >= 2 occurrences ranked by mean engagement, top 10.
/// Ties break lexicographically.
pub fn top_hashtags(posts: &[Post]) -> Vec<HashtagRank> {
    let mut stats: HashMap<&str, (u32, u64)> = HashMap::new();
    for post in posts {
        for tag in &post.hashtags {
            let entry = stats.entry(tag).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += post.engagement;
        }
    }

    let mut ranked: Vec<HashtagRank> = stats
        .into_iter()
        .filter(|(_, (count, _))| *count >= MIN_HASHTAG_OCCURRENCES)
        .map(|(tag, (count, total))| HashtagRank {
            hashtag: tag.to_string(),
            frequency: count,
            avg_engagement: total as f64 / count as f64,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.avg_engagement
            .partial_cmp(&a.avg_engagement)
            .expect("finite averages")
            .then_with(|| a.hashtag.cmp(&b.hashtag))
    });
    ranked.truncate(10);
    ranked
}
