//! Tool dispatch tests against a fixture-backed profile source.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::State;
use axum::Json;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use hopsight_analytics::ProfileSource;
use hopsight_common::error::Result;
use hopsight_common::{
    Config, HopsightError, MediaType, Post, Profile, ProfileBundle, ToolResult,
};
use hopsight_server::tools::{call_tool, ToolCallRequest};
use hopsight_server::AppState;

struct StubSource {
    bundles: HashMap<String, ProfileBundle>,
    tag_owners: HashMap<String, Vec<String>>,
}

#[async_trait]
impl ProfileSource for StubSource {
    async fn fetch(&self, username: &str, _max_posts: u32) -> Result<ProfileBundle> {
        self.bundles
            .get(username)
            .cloned()
            .ok_or_else(|| HopsightError::NotFound(username.to_string()))
    }

    async fn discover(&self, hashtag: &str, _max_posts: u32) -> Result<Vec<String>> {
        Ok(self.tag_owners.get(hashtag).cloned().unwrap_or_default())
    }
}

fn test_config() -> Config {
    Config {
        apify_token: "test-token".to_string(),
        request_delay_ms: 0,
        brand_handle: "zigurat_cca".to_string(),
        competitor_handles: vec!["kunstmann_chile".to_string()],
        max_posts_per_analysis: 50,
        min_posts_for_analysis: 5,
        web_host: "127.0.0.1".to_string(),
        web_port: 0,
    }
}

fn post(days_ago: i64, engagement: u64, hashtags: &[&str]) -> Post {
    Post {
        id: format!("p{days_ago}-{engagement}"),
        shortcode: String::new(),
        timestamp: Utc::now() - Duration::days(days_ago),
        caption: "Nueva cerveza en el taproom".to_string(),
        likes_count: engagement,
        comments_count: 0,
        engagement,
        hashtags: hashtags.iter().map(|s| s.to_string()).collect(),
        mentions: vec![],
        media_type: MediaType::Photo,
        url: String::new(),
    }
}

fn bundle(username: &str, followers: u64, posts: Vec<Post>) -> ProfileBundle {
    ProfileBundle {
        profile: Profile {
            username: username.to_string(),
            followers_count: followers,
            ..Default::default()
        },
        posts,
    }
}

fn state_with(bundles: Vec<(&str, ProfileBundle)>) -> Arc<AppState> {
    state_with_tags(bundles, vec![])
}

fn state_with_tags(
    bundles: Vec<(&str, ProfileBundle)>,
    tag_owners: Vec<(&str, Vec<&str>)>,
) -> Arc<AppState> {
    Arc::new(AppState {
        source: Arc::new(StubSource {
            bundles: bundles
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            tag_owners: tag_owners
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into_iter().map(String::from).collect()))
                .collect(),
        }),
        config: test_config(),
    })
}

async fn call(state: Arc<AppState>, name: &str, arguments: Value) -> ToolResult {
    let Json(result) = call_tool(
        State(state),
        Json(ToolCallRequest {
            name: name.to_string(),
            arguments,
        }),
    )
    .await;
    result
}

#[tokio::test]
async fn analyze_profile_returns_metrics_and_hashtags() {
    let posts: Vec<Post> = (1..=6).map(|d| post(d, 100, &["cerveza"])).collect();
    let state = state_with(vec![("zigurat_cca", bundle("zigurat_cca", 1_000, posts))]);

    let result = call(state, "analyze_instagram_profile", json!({"username": "zigurat_cca"})).await;

    assert!(result.success, "{:?}", result.error);
    let data = result.data.unwrap();
    assert_eq!(data["profile"]["username"], "zigurat_cca");
    assert_eq!(data["posts_analyzed"], 6);
    assert_eq!(data["analytics"]["avg_engagement"].as_f64(), Some(100.0));
    // 100 avg engagement / 1000 followers = 10%.
    assert_eq!(data["analytics"]["engagement_rate"].as_f64(), Some(10.0));
    assert!(data["hashtags"]["cerveza"].is_object());
}

#[tokio::test]
async fn analyze_profile_rejects_thin_batches() {
    let posts: Vec<Post> = (1..=3).map(|d| post(d, 100, &[])).collect();
    let state = state_with(vec![("thin", bundle("thin", 1_000, posts))]);

    let result = call(state, "analyze_instagram_profile", json!({"username": "thin"})).await;

    assert!(!result.success);
    let error = result.error.unwrap();
    assert!(error.contains("Insufficient posts"), "{error}");
    assert!(error.contains("found 3"), "{error}");
}

#[tokio::test]
async fn unknown_tool_is_rejected() {
    let state = state_with(vec![]);
    let result = call(state, "drop_database", json!({})).await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("unknown tool"));
}

#[tokio::test]
async fn malformed_arguments_are_rejected() {
    let state = state_with(vec![]);
    let result = call(state, "analyze_instagram_profile", json!({})).await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("invalid arguments"));
}

#[tokio::test]
async fn compare_records_partial_failures_and_picks_leader() {
    let brand_posts: Vec<Post> = (1..=5).map(|d| post(d, 100, &["cerveza"])).collect();
    let rival_posts: Vec<Post> = (1..=5).map(|d| post(d, 200, &["cerveza"])).collect();
    let state = state_with(vec![
        ("zigurat_cca", bundle("zigurat_cca", 8_000, brand_posts)),
        ("kunstmann_chile", bundle("kunstmann_chile", 20_000, rival_posts)),
    ]);

    let result = call(
        state,
        "compare_profiles",
        json!({"usernames": ["kunstmann_chile", "ghost_account"]}),
    )
    .await;

    assert!(result.success, "{:?}", result.error);
    let data = result.data.unwrap();
    assert_eq!(data["baseline"]["username"], "zigurat_cca");
    assert_eq!(data["comparisons"].as_array().unwrap().len(), 1);
    assert_eq!(data["comparisons"][0]["username"], "kunstmann_chile");
    assert_eq!(
        data["comparisons"][0]["comparison"]["followers_gap"],
        12_000
    );
    assert_eq!(data["leader"], "kunstmann_chile");

    let failures = data["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["username"], "ghost_account");
    assert!(failures[0]["error"]
        .as_str()
        .unwrap()
        .contains("ghost_account"));
}

#[tokio::test]
async fn compare_fails_hard_when_baseline_is_missing() {
    let state = state_with(vec![]);
    let result = call(state, "compare_profiles", json!({"usernames": ["anyone"]})).await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("zigurat_cca"));
}

#[tokio::test]
async fn hashtag_analysis_honors_the_timeframe() {
    let mut posts: Vec<Post> = (1..=3).map(|d| post(d, 50, &["cerveza", "rock"])).collect();
    posts.push(post(90, 500, &["verano"]));
    posts.push(post(91, 500, &["verano"]));
    let state = state_with(vec![("zigurat_cca", bundle("zigurat_cca", 8_000, posts))]);

    let result = call(state, "analyze_hashtags", json!({"timeframe_days": 30})).await;

    assert!(result.success, "{:?}", result.error);
    let data = result.data.unwrap();
    assert_eq!(data["username"], "zigurat_cca");
    assert_eq!(data["posts_analyzed"], 3);
    // The stale posts' tag never reaches the report.
    assert!(data["report"]["stats"].get("verano").is_none());
    assert!(data["report"]["stats"]["cerveza"].is_object());
}

#[tokio::test]
async fn hashtag_analysis_with_no_recent_posts_is_an_error() {
    let posts = vec![post(90, 500, &["verano"]), post(91, 500, &["verano"])];
    let state = state_with(vec![("zigurat_cca", bundle("zigurat_cca", 8_000, posts))]);

    let result = call(state, "analyze_hashtags", json!({})).await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("Insufficient posts"));
}

#[tokio::test]
async fn prospects_are_scored_sorted_and_summarized() {
    let venue = ProfileBundle {
        profile: Profile {
            username: "bar_uno".to_string(),
            full_name: "Bar Uno".to_string(),
            biography: "Bar de cerveza artesanal en Santiago".to_string(),
            followers_count: 5_000,
            category: Some("Bar".to_string()),
            ..Default::default()
        },
        posts: (1..=6).map(|d| post(d, 150, &["cerveza"])).collect(),
    };
    let state = state_with(vec![("bar_uno", venue)]);

    let result = call(
        state,
        "prospect_clients",
        json!({"targets": ["bar_uno", "ghost_account"]}),
    )
    .await;

    assert!(result.success, "{:?}", result.error);
    let data = result.data.unwrap();

    let prospects = data["prospects"].as_array().unwrap();
    assert_eq!(prospects.len(), 1);
    assert_eq!(prospects[0]["username"], "bar_uno");
    assert_eq!(prospects[0]["relevant"], true);
    assert!(prospects[0]["score"]["score"].as_u64().unwrap() <= 100);

    assert_eq!(data["failures"].as_array().unwrap().len(), 1);

    let summary = &data["summary"];
    let tier_total = summary["high_priority"].as_u64().unwrap()
        + summary["medium_priority"].as_u64().unwrap()
        + summary["low_priority"].as_u64().unwrap();
    assert_eq!(tier_total, 1);
    assert_eq!(summary["recommended"][0], "bar_uno");
    assert!(summary["average_score"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn prospect_weights_must_sum_to_one() {
    let state = state_with(vec![]);
    let result = call(
        state,
        "prospect_clients",
        json!({
            "targets": ["bar_uno"],
            "weights": {"industry": 1.0, "audience": 1.0, "location": 1.0, "content": 1.0}
        }),
    )
    .await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("weights"));
}

#[tokio::test]
async fn empty_prospect_target_list_is_rejected() {
    let state = state_with(vec![]);
    let result = call(state, "prospect_clients", json!({"targets": []})).await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains("targets"));
}

#[tokio::test]
async fn discovered_prospects_pass_through_the_venue_gate() {
    let venue = ProfileBundle {
        profile: Profile {
            username: "bar_dos".to_string(),
            full_name: "Bar Dos".to_string(),
            biography: "Bar y cocina en Providencia".to_string(),
            followers_count: 3_000,
            ..Default::default()
        },
        posts: (1..=5).map(|d| post(d, 80, &["cerveza"])).collect(),
    };
    let personal = ProfileBundle {
        profile: Profile {
            username: "juana_blog".to_string(),
            biography: "Blog personal de viajes".to_string(),
            followers_count: 3_000,
            ..Default::default()
        },
        posts: (1..=5).map(|d| post(d, 80, &[])).collect(),
    };
    let state = state_with_tags(
        vec![("bar_dos", venue), ("juana_blog", personal)],
        vec![("cervezaartesanal", vec!["bar_dos", "juana_blog"])],
    );

    let result = call(
        state,
        "prospect_clients",
        json!({"discover_hashtags": ["cervezaartesanal"]}),
    )
    .await;

    assert!(result.success, "{:?}", result.error);
    let data = result.data.unwrap();
    // The personal-blog account is silently dropped at the gate.
    let prospects = data["prospects"].as_array().unwrap();
    assert_eq!(prospects.len(), 1);
    assert_eq!(prospects[0]["username"], "bar_dos");
    assert!(data["failures"].as_array().unwrap().is_empty());
}
