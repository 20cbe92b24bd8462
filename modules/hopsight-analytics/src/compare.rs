//! Comparative scorer: pairwise comparison of a subject account against a
//! baseline (the brand itself, or self for the baseline row).

use std::collections::HashSet;

use hopsight_common::{
    CompetitiveComparison, CompetitiveReport, MediaType, Post, ProfileBundle, SwotInsights,
};

use crate::metrics::posting_frequency;

/// Mean engagement over a batch; 0 for an empty batch.
pub fn avg_engagement(posts: &[Post]) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }
    posts.iter().map(|p| p.engagement).sum::<u64>() as f64 / posts.len() as f64
}

/// Pairwise comparison. Self-comparison yields `followers_gap == 0` and
/// `engagement_comparison == 1.0`.
pub fn compare(subject: &ProfileBundle, baseline: &ProfileBundle) -> CompetitiveComparison {
    let subject_avg = avg_engagement(&subject.posts);
    // The denominator substitutes 1 only when the baseline is truly silent;
    // a live fractional average divides as-is so self-comparison reads
    // exactly 1.0.
    let baseline_avg = avg_engagement(&baseline.posts);
    let baseline_avg = if baseline_avg == 0.0 { 1.0 } else { baseline_avg };

    CompetitiveComparison {
        followers_gap: subject.profile.followers_count as i64
            - baseline.profile.followers_count as i64,
        engagement_comparison: subject_avg / baseline_avg,
        post_frequency: posting_frequency(&subject.posts),
        content_similarity: content_similarity(&subject.posts, &baseline.posts),
    }
}

/// Media-type share vector [photo, video, carousel] for a batch.
fn media_shares(posts: &[Post]) -> [f64; 3] {
    let n = posts.len().max(1) as f64;
    let count = |mt: MediaType| posts.iter().filter(|p| p.media_type == mt).count() as f64 / n;
    [
        count(MediaType::Photo),
        count(MediaType::Video),
        count(MediaType::Carousel),
    ]
}

/// Content similarity in [0, 1], rounded to 2 decimals: hashtag-set overlap
/// (|intersection| / max set size) weighted 0.6, plus media-mix closeness
/// (1 - mean absolute share difference) weighted 0.4.
pub fn content_similarity(subject: &[Post], baseline: &[Post]) -> f64 {
    if subject.is_empty() || baseline.is_empty() {
        return 0.0;
    }

    let tags_a: HashSet<&str> = subject
        .iter()
        .flat_map(|p| p.hashtags.iter().map(String::as_str))
        .collect();
    let tags_b: HashSet<&str> = baseline
        .iter()
        .flat_map(|p| p.hashtags.iter().map(String::as_str))
        .collect();
    let max_size = tags_a.len().max(tags_b.len());
    let hashtag_similarity = if max_size == 0 {
        0.0
    } else {
        tags_a.intersection(&tags_b).count() as f64 / max_size as f64
    };

    let shares_a = media_shares(subject);
    let shares_b = media_shares(baseline);
    let share_diff: f64 = shares_a
        .iter()
        .zip(shares_b.iter())
        .map(|(a, b)| (a - b).abs())
        .sum();
    let mix_similarity = 1.0 - share_diff / 2.0;

    ((hashtag_similarity * 0.6 + mix_similarity * 0.4) * 100.0).round() / 100.0
}

/// Threshold-driven SWOT labels. Every label is tied to a numeric cutoff;
/// there is no free-floating commentary.
pub fn swot(subject: &ProfileBundle, comparison: &CompetitiveComparison) -> SwotInsights {
    let posts = &subject.posts;
    let n = posts.len().max(1) as f64;
    let engagement = avg_engagement(posts);
    let posts_per_week = comparison.post_frequency;
    let photo_count = posts
        .iter()
        .filter(|p| p.media_type == MediaType::Photo)
        .count() as f64;
    let video_count = posts
        .iter()
        .filter(|p| p.media_type == MediaType::Video)
        .count() as f64;
    let avg_hashtags = posts.iter().map(|p| p.hashtags.len()).sum::<usize>() as f64 / n;

    let mut insights = SwotInsights::default();

    if engagement > 100.0 {
        insights
            .strengths
            .push("High audience engagement".to_string());
    }
    if (3.0..=7.0).contains(&posts_per_week) {
        insights
            .strengths
            .push("Consistent posting cadence".to_string());
    }
    if subject.profile.followers_count > 10_000 {
        insights.strengths.push("Solid follower base".to_string());
    }
    if video_count > photo_count * 0.3 {
        insights
            .strengths
            .push("Good use of video content".to_string());
    }

    if engagement < 30.0 {
        insights
            .weaknesses
            .push("Low engagement relative to potential".to_string());
    }
    if posts_per_week < 2.0 {
        insights
            .weaknesses
            .push("Inconsistent posting cadence".to_string());
    }
    if avg_hashtags < 5.0 {
        insights
            .weaknesses
            .push("Underuse of hashtags for reach".to_string());
    }

    if comparison.content_similarity < 0.3 {
        insights
            .opportunities
            .push("Clear content differentiation from baseline".to_string());
    }
    if video_count < n * 0.4 {
        insights
            .opportunities
            .push("Room to grow video content for organic reach".to_string());
    }

    if comparison.engagement_comparison < 0.7 {
        insights
            .threats
            .push("Baseline outperforms on engagement".to_string());
    }
    if comparison.followers_gap < -5_000 {
        insights
            .threats
            .push("Significant follower gap versus baseline".to_string());
    }

    insights
}

/// Composite 0-100 score: weighted engagement/frequency/content factors,
/// +5 per strength, -3 per weakness, clamped.
pub fn overall_score(comparison: &CompetitiveComparison, insights: &SwotInsights) -> u32 {
    let engagement_score = (comparison.engagement_comparison * 100.0).min(100.0);
    // 5 posts/week saturates the frequency factor.
    let frequency_score = (comparison.post_frequency * 20.0).min(100.0);
    let content_score = comparison.content_similarity * 100.0;

    let base = engagement_score * 0.4 + frequency_score * 0.3 + content_score * 0.3;
    let adjusted =
        base + insights.strengths.len() as f64 * 5.0 - insights.weaknesses.len() as f64 * 3.0;

    adjusted.clamp(0.0, 100.0).round() as u32
}

/// Full comparative report for one subject against the baseline.
pub fn report(subject: &ProfileBundle, baseline: &ProfileBundle) -> CompetitiveReport {
    let comparison = compare(subject, baseline);
    let insights = swot(subject, &comparison);
    let overall_score = overall_score(&comparison, &insights);

    CompetitiveReport {
        username: subject.profile.username.clone(),
        comparison,
        insights,
        overall_score,
    }
}
