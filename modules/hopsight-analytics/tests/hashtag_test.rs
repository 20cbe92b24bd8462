//! Hashtag engine tests: grouping floor, trend windows, report buckets.

use chrono::{TimeZone, Utc};
use hopsight_analytics::hashtags;
use hopsight_common::{MediaType, Post, Trend};

fn tagged_post(day: u32, engagement: u64, hashtags: &[&str]) -> Post {
    Post {
        id: format!("p{day}"),
        shortcode: String::new(),
        timestamp: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
        caption: String::new(),
        likes_count: engagement,
        comments_count: 0,
        engagement,
        hashtags: hashtags.iter().map(|s| s.to_string()).collect(),
        mentions: vec![],
        media_type: MediaType::Photo,
        url: String::new(),
    }
}

#[test]
fn single_occurrence_tags_are_dropped() {
    let posts = vec![
        tagged_post(1, 10, &["craftbeer", "solo"]),
        tagged_post(2, 20, &["craftbeer"]),
    ];
    let stats = hashtags::analyze_hashtags(&posts);
    assert!(stats.contains_key("craftbeer"));
    assert!(!stats.contains_key("solo"));
}

#[test]
fn per_tag_averages_computed_over_member_posts() {
    let posts = vec![
        tagged_post(1, 11, &["craftbeer"]),
        tagged_post(2, 22, &["craftbeer"]),
        tagged_post(3, 33, &["craftbeer"]),
        tagged_post(4, 999, &["otherbeer", "x"]),
        tagged_post(5, 999, &["otherbeer", "x"]),
    ];
    let stats = hashtags::analyze_hashtags(&posts);
    let stat = &stats["craftbeer"];
    assert_eq!(stat.occurrences, 3);
    assert!((stat.avg_engagement - 22.0).abs() < 1e-9);
}

#[test]
fn rising_engagement_reads_up() {
    // [10, 10, 50, 50]: first half avg 10, second 50, change 4.0 -> up.
    let posts = vec![
        tagged_post(1, 10, &["craftbeer"]),
        tagged_post(2, 10, &["craftbeer"]),
        tagged_post(3, 50, &["craftbeer"]),
        tagged_post(4, 50, &["craftbeer"]),
    ];
    let stats = hashtags::analyze_hashtags(&posts);
    assert_eq!(stats["craftbeer"].trend, Trend::Up);
}

#[test]
fn falling_engagement_reads_down() {
    let posts = vec![
        tagged_post(1, 50, &["craftbeer"]),
        tagged_post(2, 50, &["craftbeer"]),
        tagged_post(3, 10, &["craftbeer"]),
        tagged_post(4, 10, &["craftbeer"]),
    ];
    let stats = hashtags::analyze_hashtags(&posts);
    assert_eq!(stats["craftbeer"].trend, Trend::Down);
}

#[test]
fn fewer_than_four_posts_is_always_stable() {
    let posts = vec![
        tagged_post(1, 1, &["craftbeer"]),
        tagged_post(2, 100, &["craftbeer"]),
        tagged_post(3, 1000, &["craftbeer"]),
    ];
    let stats = hashtags::analyze_hashtags(&posts);
    assert_eq!(stats["craftbeer"].trend, Trend::Stable);
}

#[test]
fn odd_count_gives_second_half_the_extra_post() {
    // [30, 30, 30, 20, 20]: halves are [30,30] and [30,20,20];
    // change = (23.33 - 30) / 30 = -0.22 -> down.
    let posts = vec![
        tagged_post(1, 30, &["craftbeer"]),
        tagged_post(2, 30, &["craftbeer"]),
        tagged_post(3, 30, &["craftbeer"]),
        tagged_post(4, 20, &["craftbeer"]),
        tagged_post(5, 20, &["craftbeer"]),
    ];
    let stats = hashtags::analyze_hashtags(&posts);
    assert_eq!(stats["craftbeer"].trend, Trend::Down);
}

#[test]
fn trend_sorts_chronologically_before_splitting() {
    // Same engagements as the rising case but delivered newest-first.
    let posts = vec![
        tagged_post(4, 50, &["craftbeer"]),
        tagged_post(3, 50, &["craftbeer"]),
        tagged_post(2, 10, &["craftbeer"]),
        tagged_post(1, 10, &["craftbeer"]),
    ];
    let stats = hashtags::analyze_hashtags(&posts);
    assert_eq!(stats["craftbeer"].trend, Trend::Up);
}

#[test]
fn report_buckets_relevant_tags() {
    let posts = vec![
        tagged_post(1, 40, &["cervezaartesanal", "yoga"]),
        tagged_post(2, 50, &["cervezaartesanal", "yoga"]),
        tagged_post(3, 60, &["cervezaartesanal"]),
    ];
    let report = hashtags::build_report(&posts);

    assert!(report
        .recommendations
        .top_performing
        .contains(&"cervezaartesanal".to_string()));
    // Zero-relevance tag is vetoed by the final rule and lands in avoid.
    assert!(report.recommendations.avoid.contains(&"yoga".to_string()));

    let verdict = report
        .verdicts
        .iter()
        .find(|v| v.hashtag == "yoga")
        .unwrap();
    assert!(!verdict.should_use);
    assert_eq!(verdict.relevance, 0);
}

#[test]
fn report_is_deterministic() {
    let posts = vec![
        tagged_post(1, 40, &["cerveza", "rock", "terraza"]),
        tagged_post(2, 50, &["cerveza", "rock"]),
        tagged_post(3, 60, &["cerveza", "terraza"]),
        tagged_post(4, 80, &["cerveza"]),
    ];
    let a = serde_json::to_string(&hashtags::build_report(&posts)).unwrap();
    let b = serde_json::to_string(&hashtags::build_report(&posts)).unwrap();
    assert_eq!(a, b);
}
