//! Metrics calculator tests: hand-built post batches → compute() → assert.
//! No I/O, no network.

use chrono::{TimeZone, Utc};
use hopsight_analytics::metrics;
use hopsight_common::{HopsightError, MediaType, Post};

fn post_at(day: u32, hour: u32, likes: u64, comments: u64, hashtags: &[&str]) -> Post {
    Post {
        id: format!("p{day}-{hour}-{likes}"),
        shortcode: String::new(),
        timestamp: Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap(),
        caption: String::new(),
        likes_count: likes,
        comments_count: comments,
        engagement: likes + comments,
        hashtags: hashtags.iter().map(|s| s.to_string()).collect(),
        mentions: vec![],
        media_type: MediaType::Photo,
        url: String::new(),
    }
}

#[test]
fn empty_batch_fails_with_insufficient_data() {
    let err = metrics::compute(&[], 1000).unwrap_err();
    assert!(matches!(
        err,
        HopsightError::InsufficientData { found: 0, .. }
    ));
}

#[test]
fn averages_are_arithmetic_means() {
    let posts = vec![
        post_at(1, 10, 10, 2, &[]),
        post_at(2, 10, 20, 4, &[]),
        post_at(3, 10, 30, 6, &[]),
    ];
    let snapshot = metrics::compute(&posts, 1000).unwrap();
    assert_eq!(snapshot.avg_likes, 20.0);
    assert_eq!(snapshot.avg_comments, 4.0);
    assert_eq!(snapshot.avg_engagement, 24.0);
}

#[test]
fn zero_followers_yields_exactly_zero_rate() {
    let posts = vec![post_at(1, 10, 100, 10, &[]), post_at(2, 10, 100, 10, &[])];
    let snapshot = metrics::compute(&posts, 0).unwrap();
    assert_eq!(snapshot.engagement_rate, 0.0);
    assert!(snapshot.engagement_rate.is_finite());
}

#[test]
fn engagement_rate_divides_by_audience_not_post_count() {
    // 10 posts gathering 50 engagement each against 1000 followers must read
    // 5%, independent of how many posts are in the sample.
    let posts: Vec<Post> = (1..=10).map(|d| post_at(d, 12, 45, 5, &[])).collect();
    let snapshot = metrics::compute(&posts, 1000).unwrap();
    assert!((snapshot.engagement_rate - 5.0).abs() < 1e-9);
}

#[test]
fn posting_frequency_uses_actual_timespan() {
    // 3 posts over 14 days -> 1.5 posts per week.
    let posts = vec![
        post_at(1, 0, 1, 0, &[]),
        post_at(8, 0, 1, 0, &[]),
        post_at(15, 0, 1, 0, &[]),
    ];
    let snapshot = metrics::compute(&posts, 100).unwrap();
    assert!((snapshot.posting_frequency - 1.5).abs() < 1e-9);
}

#[test]
fn single_day_span_counts_as_one_day() {
    let posts = vec![post_at(1, 9, 1, 0, &[]), post_at(1, 11, 1, 0, &[])];
    // 2 posts / 1 day * 7 = 14 posts per week.
    assert!((metrics::posting_frequency(&posts) - 14.0).abs() < 1e-9);
}

#[test]
fn best_hours_tie_breaks_to_earlier_hour() {
    let posts = vec![
        post_at(1, 18, 50, 0, &[]),
        post_at(2, 9, 50, 0, &[]),
        post_at(3, 20, 10, 0, &[]),
    ];
    let slots = metrics::best_posting_times(&posts);
    assert_eq!(slots, vec!["09:00", "18:00", "20:00"]);
}

#[test]
fn top_hashtags_enforce_occurrence_floor_and_rank_by_engagement() {
    // #craftbeer: 3 posts with likes [10,20,30], comments [1,2,3] -> avg 22.
    let mut posts = vec![
        post_at(1, 10, 10, 1, &["craftbeer"]),
        post_at(2, 10, 20, 2, &["craftbeer"]),
        post_at(3, 10, 30, 3, &["craftbeer", "oncetag"]),
        post_at(4, 10, 500, 50, &["lowuse"]),
    ];
    for d in 5..=10 {
        posts.push(post_at(d, 10, 1, 0, &[]));
    }

    let ranked = metrics::top_hashtags(&posts);
    assert_eq!(ranked.len(), 1, "single-occurrence tags must not appear");
    assert_eq!(ranked[0].hashtag, "craftbeer");
    assert_eq!(ranked[0].frequency, 3);
    assert!((ranked[0].avg_engagement - 22.0).abs() < 1e-9);
}

#[test]
fn output_is_deterministic() {
    let posts = vec![
        post_at(1, 9, 12, 3, &["cerveza", "santiago"]),
        post_at(2, 14, 40, 1, &["cerveza"]),
        post_at(3, 9, 7, 7, &["terraza", "santiago"]),
        post_at(4, 21, 90, 9, &["cerveza"]),
        post_at(5, 9, 5, 0, &["santiago"]),
    ];
    let a = serde_json::to_string(&metrics::compute(&posts, 4200).unwrap()).unwrap();
    let b = serde_json::to_string(&metrics::compute(&posts, 4200).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn best_day_picks_highest_mean_engagement() {
    // 2026-01-01 is a Thursday; 2026-01-05 a Monday.
    let posts = vec![
        post_at(1, 10, 10, 0, &[]),
        post_at(5, 10, 100, 0, &[]),
        post_at(12, 10, 80, 0, &[]),
    ];
    let snapshot = metrics::compute(&posts, 100).unwrap();
    assert_eq!(snapshot.best_day, "Monday");
}
