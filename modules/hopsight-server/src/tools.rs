//! Tool surface: `GET /tools` lists the callable tools with their JSON input
//! schemas, `POST /tools/call` dispatches `{name, arguments}` to a handler.
//!
//! Every call returns the [`ToolResult`] envelope. Internal error enum names
//! never reach the wire, only display strings.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use hopsight_analytics::{compare, hashtags, metrics, prospect};
use hopsight_common::error::Result;
use hopsight_common::{
    CompetitiveReport, HopsightError, Post, Priority, ProspectScore, ScoringWeights, ToolResult,
};

use crate::AppState;

/// Posts fetched per account when scanning hashtags over a timeframe. Wider
/// than the per-analysis cap so a 30-day window on an active account is not
/// cut short.
const HASHTAG_FETCH_LIMIT: u32 = 100;

const DEFAULT_TIMEFRAME_DAYS: i64 = 30;

/// Posts pulled per hashtag when discovering prospect candidates.
const DISCOVERY_POSTS_PER_TAG: u32 = 50;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/call", post(call_tool))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

// --- tool arguments ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AnalyzeProfileArgs {
    /// Instagram handle, without the leading `@`.
    pub username: String,
    /// Cap on recent posts to analyze. Defaults to the configured maximum.
    pub posts_limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CompareProfilesArgs {
    /// Accounts to compare against the brand baseline. Empty means the
    /// configured competitor list.
    #[serde(default)]
    pub usernames: Vec<String>,
    pub posts_limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AnalyzeHashtagsArgs {
    /// Account to analyze. Defaults to the brand handle.
    pub username: Option<String>,
    /// Only posts newer than this many days are considered. Default 30.
    pub timeframe_days: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProspectClientsArgs {
    /// Candidate venue accounts to score. Always scored, gate or no gate.
    #[serde(default)]
    pub targets: Vec<String>,
    /// Hashtags to mine for additional candidates. Discovered accounts must
    /// pass the venue gate before they are scored.
    #[serde(default)]
    pub discover_hashtags: Vec<String>,
    /// Sub-score weights; must be non-negative and sum to ~1.0.
    pub weights: Option<WeightsArg>,
}

#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
pub struct WeightsArg {
    pub industry: f64,
    pub audience: f64,
    pub location: f64,
    pub content: f64,
}

impl From<WeightsArg> for ScoringWeights {
    fn from(w: WeightsArg) -> Self {
        Self {
            industry: w.industry,
            audience: w.audience,
            location: w.location,
            content: w.content,
        }
    }
}

// --- listing ---

#[derive(Debug, Serialize)]
struct ToolDescriptor {
    name: &'static str,
    description: &'static str,
    input_schema: Value,
}

fn descriptor<T: JsonSchema>(name: &'static str, description: &'static str) -> ToolDescriptor {
    ToolDescriptor {
        name,
        description,
        input_schema: serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null),
    }
}

pub async fn list_tools() -> Json<Value> {
    let tools = vec![
        descriptor::<AnalyzeProfileArgs>(
            "analyze_instagram_profile",
            "Full engagement analysis of one account: averages, rate, \
             posting cadence, best times, top hashtags.",
        ),
        descriptor::<CompareProfilesArgs>(
            "compare_profiles",
            "Compare accounts against the brand baseline: gaps, ratios, \
             content similarity, SWOT, composite score.",
        ),
        descriptor::<AnalyzeHashtagsArgs>(
            "analyze_hashtags",
            "Per-hashtag performance and trend over an account's recent \
             posts, with usage recommendations.",
        ),
        descriptor::<ProspectClientsArgs>(
            "prospect_clients",
            "Score candidate venue accounts as business leads, optionally \
             discovering candidates from hashtags: weighted industry/audience/\
             location/content fit and priority tier.",
        ),
    ];
    Json(json!({ "tools": tools }))
}

// --- dispatch ---

#[derive(Debug, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ToolCallRequest>,
) -> Json<ToolResult> {
    let started = Instant::now();
    tracing::info!(tool = %req.name, "Tool call");

    let outcome = dispatch(&state, &req.name, req.arguments).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let result = match outcome {
        Ok(data) => ToolResult::ok(data, elapsed_ms),
        Err(err) => {
            tracing::warn!(tool = %req.name, error = %err, "Tool call failed");
            ToolResult::err(err.to_string(), elapsed_ms)
        }
    };
    Json(result)
}

async fn dispatch(state: &AppState, name: &str, arguments: Value) -> Result<Value> {
    match name {
        "analyze_instagram_profile" => analyze_profile(state, parse_args(arguments)?).await,
        "compare_profiles" => compare_profiles(state, parse_args(arguments)?).await,
        "analyze_hashtags" => analyze_hashtags(state, parse_args(arguments)?).await,
        "prospect_clients" => prospect_clients(state, parse_args(arguments)?).await,
        other => Err(HopsightError::Validation(format!("unknown tool: {other}"))),
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| HopsightError::Validation(format!("invalid arguments: {e}")))
}

fn effective_limit(state: &AppState, requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(state.config.max_posts_per_analysis)
        .min(state.config.max_posts_per_analysis)
}

// --- handlers ---

async fn analyze_profile(state: &AppState, args: AnalyzeProfileArgs) -> Result<Value> {
    let limit = effective_limit(state, args.posts_limit);
    let bundle = state.source.fetch(&args.username, limit).await?;

    if bundle.posts.len() < state.config.min_posts_for_analysis {
        return Err(HopsightError::InsufficientData {
            found: bundle.posts.len(),
            required: state.config.min_posts_for_analysis,
        });
    }

    let analytics = metrics::compute(&bundle.posts, bundle.profile.followers_count)?;
    let hashtag_stats = hashtags::analyze_hashtags(&bundle.posts);

    Ok(json!({
        "profile": bundle.profile,
        "posts_analyzed": bundle.posts.len(),
        "analytics": analytics,
        "hashtags": hashtag_stats,
    }))
}

async fn compare_profiles(state: &AppState, args: CompareProfilesArgs) -> Result<Value> {
    let limit = effective_limit(state, args.posts_limit);
    let usernames = if args.usernames.is_empty() {
        state.config.competitor_handles.clone()
    } else {
        args.usernames
    };

    // Without the baseline there is nothing to compare against; its failure
    // is terminal. Individual subjects fail soft.
    let baseline = state
        .source
        .fetch(&state.config.brand_handle, limit)
        .await?;

    let mut comparisons: Vec<CompetitiveReport> = Vec::new();
    let mut failures = Vec::new();
    for username in &usernames {
        match state.source.fetch(username, limit).await {
            Ok(bundle) => comparisons.push(compare::report(&bundle, &baseline)),
            Err(err) => {
                tracing::warn!(%username, error = %err, "Skipping account in comparison");
                failures.push(json!({ "username": username, "error": err.to_string() }));
            }
        }
    }

    // First-listed account wins ties.
    let leader = comparisons
        .iter()
        .fold(None::<&CompetitiveReport>, |best, report| match best {
            Some(b) if b.overall_score >= report.overall_score => Some(b),
            _ => Some(report),
        })
        .map(|report| report.username.clone());

    Ok(json!({
        "baseline": {
            "username": baseline.profile.username,
            "followers_count": baseline.profile.followers_count,
            "avg_engagement": compare::avg_engagement(&baseline.posts),
        },
        "comparisons": comparisons,
        "leader": leader,
        "failures": failures,
    }))
}

async fn analyze_hashtags(state: &AppState, args: AnalyzeHashtagsArgs) -> Result<Value> {
    let username = args
        .username
        .unwrap_or_else(|| state.config.brand_handle.clone());
    let timeframe_days = args.timeframe_days.unwrap_or(DEFAULT_TIMEFRAME_DAYS);
    if timeframe_days <= 0 {
        return Err(HopsightError::Validation(
            "timeframe_days must be positive".to_string(),
        ));
    }

    let bundle = state.source.fetch(&username, HASHTAG_FETCH_LIMIT).await?;
    let cutoff = Utc::now() - Duration::days(timeframe_days);
    let recent: Vec<Post> = bundle
        .posts
        .into_iter()
        .filter(|p| p.timestamp > cutoff)
        .collect();

    if recent.is_empty() {
        return Err(HopsightError::InsufficientData {
            found: 0,
            required: 1,
        });
    }

    let report = hashtags::build_report(&recent);
    Ok(json!({
        "username": username,
        "timeframe_days": timeframe_days,
        "posts_analyzed": recent.len(),
        "report": report,
    }))
}

#[derive(Debug, Serialize)]
struct ProspectEntry {
    username: String,
    /// Passed the cheap venue-account gate.
    relevant: bool,
    score: ProspectScore,
}

async fn prospect_clients(state: &AppState, args: ProspectClientsArgs) -> Result<Value> {
    if args.targets.is_empty() && args.discover_hashtags.is_empty() {
        return Err(HopsightError::Validation(
            "either targets or discover_hashtags must be given".to_string(),
        ));
    }
    let weights = args
        .weights
        .map(ScoringWeights::from)
        .unwrap_or_default();
    weights.validate()?;
    let now = Utc::now();

    // Explicit targets first; discovered accounts follow, deduped against
    // them. Only discovered accounts go through the venue gate.
    let mut candidates: Vec<(String, bool)> =
        args.targets.iter().map(|t| (t.clone(), false)).collect();
    let mut failures = Vec::new();
    for hashtag in &args.discover_hashtags {
        match state.source.discover(hashtag, DISCOVERY_POSTS_PER_TAG).await {
            Ok(usernames) => {
                for username in usernames {
                    if candidates.iter().all(|(c, _)| *c != username) {
                        candidates.push((username, true));
                    }
                }
            }
            Err(err) => {
                tracing::warn!(%hashtag, error = %err, "Hashtag discovery failed");
                failures.push(json!({ "hashtag": hashtag, "error": err.to_string() }));
            }
        }
    }

    let mut prospects: Vec<ProspectEntry> = Vec::new();
    for (target, discovered) in &candidates {
        let bundle = match state
            .source
            .fetch(target, state.config.max_posts_per_analysis)
            .await
        {
            Ok(bundle) => bundle,
            Err(err) => {
                tracing::warn!(username = %target, error = %err, "Skipping prospect");
                failures.push(json!({ "username": target, "error": err.to_string() }));
                continue;
            }
        };

        let relevant = prospect::is_relevant_for_prospection(&bundle.profile);
        if *discovered && !relevant {
            tracing::debug!(username = %target, "Discovered account failed the venue gate");
            continue;
        }
        let score = prospect::score_prospect(&bundle.profile, &bundle.posts, weights, now)?;
        prospects.push(ProspectEntry {
            username: bundle.profile.username,
            relevant,
            score,
        });
    }

    prospects.sort_by(|a, b| {
        b.score
            .score
            .cmp(&a.score.score)
            .then_with(|| a.username.cmp(&b.username))
    });

    let count_by = |priority: Priority| {
        prospects
            .iter()
            .filter(|p| p.score.priority == priority)
            .count()
    };
    let average_score = if prospects.is_empty() {
        0.0
    } else {
        let avg = prospects.iter().map(|p| p.score.score as f64).sum::<f64>()
            / prospects.len() as f64;
        (avg * 100.0).round() / 100.0
    };
    let recommended: Vec<&str> = prospects
        .iter()
        .take(5)
        .map(|p| p.username.as_str())
        .collect();

    Ok(json!({
        "prospects": prospects,
        "failures": failures,
        "summary": {
            "high_priority": count_by(Priority::Alta),
            "medium_priority": count_by(Priority::Media),
            "low_priority": count_by(Priority::Baja),
            "average_score": average_score,
            "recommended": recommended,
        },
    }))
}
