use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tokio::sync::{broadcast, Mutex};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::{ApiAnalysisRequest, ApiAnalysisResponse, ApiRankRequest, ApiRankResponse};
use trend_hunter::analyze;
use trend_hunter::collector::{ProgressEvent, SignalCollector};
use trend_hunter::config::ScoringConfig;
use trend_hunter::history::{HistoryEntry, SearchHistory};
use trend_hunter::ranking::rank_keywords;

/// Upper bound on open progress channels.
const MAX_PROGRESS_CHANNELS: usize = 1024;
/// How long a channel outlives a finished analysis.
const ANALYSIS_CHANNEL_TTL: Duration = Duration::from_secs(10);
/// How long a stream-only channel lives when no analysis claims it.
const STREAM_CHANNEL_TTL: Duration = Duration::from_secs(120);

type ProgressChannels = Arc<Mutex<HashMap<String, broadcast::Sender<StreamEvent>>>>;

#[derive(Clone)]
struct AppState {
    collector: SignalCollector,
    config: Arc<ScoringConfig>,
    history: Arc<SearchHistory>,
    channels: ProgressChannels,
}

#[derive(Clone, Serialize)]
struct StreamEvent {
    event: String,
    message: String,
    failed: bool,
    timestamp_ms: u128,
}

#[derive(serde::Deserialize)]
struct StreamQuery {
    request_id: String,
}

#[derive(Serialize)]
struct HistoryResponse {
    limit: usize,
    entries: Vec<HistoryEntry>,
}

#[derive(Serialize)]
struct ClearedResponse {
    removed: usize,
}

static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

pub async fn serve(args: crate::ServeArgs, config: ScoringConfig) -> Result<(), String> {
    let collector = SignalCollector::from_env(&config.providers);
    if !collector.has_providers() {
        info!("no provider keys configured, analyses will use demo data");
    }
    let state = AppState {
        collector,
        history: Arc::new(SearchHistory::new(config.history.limit)),
        config: Arc::new(config),
        channels: Arc::new(Mutex::new(HashMap::new())),
    };

    let web_root = args.web_root;
    let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
    let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/analyze/stream", get(stream_handler))
        .route("/api/rank", post(rank_handler))
        .route("/api/history", get(history_handler).delete(clear_history_handler))
        .nest_service("/", static_service)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!(%addr, "trend hunter listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalysisRequest>,
) -> Result<Json<ApiAnalysisResponse>, (StatusCode, String)> {
    let request_id = request
        .request_id
        .clone()
        .unwrap_or_else(generate_request_id);
    let request = request
        .into_request(&state.config.analysis)
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    // Progress is best effort: with the channel map full the analysis runs
    // on a sender nobody listens to.
    let sender = get_or_create_channel(&state.channels, &request_id)
        .await
        .unwrap_or_else(|| broadcast::channel(1).0);

    let today = chrono::Utc::now().date_naive();
    let (input, mut warnings, demo) = match request.input {
        Some(input) => {
            send_event(&sender, "input", "Using supplied signals", false);
            (input, Vec::new(), false)
        }
        None => {
            let collection = state
                .collector
                .collect_or_demo(
                    &request.keyword,
                    &request.analysis,
                    today,
                    request.demo,
                    |event: ProgressEvent| forward_progress(&sender, event),
                )
                .await;
            (collection.input, collection.warnings, collection.demo)
        }
    };

    send_event(&sender, "scoring", "Computing scores", false);
    let report = analyze(&input, &state.config);

    let regions = if request.compare_regions {
        send_event(&sender, "regions", "Comparing regions", false);
        let comparison = state
            .collector
            .compare_regions(
                &request.keyword,
                request.analysis.timeframe,
                today,
                &state.config.growth,
                request.demo,
            )
            .await;
        warnings.extend(comparison.warnings);
        Some(comparison.regions)
    } else {
        None
    };

    let history = state.history.add(&report.keyword).await;
    info!(
        keyword = %report.keyword,
        opportunity = report.opportunity.level.label(),
        social = report.social.social_score,
        "analysis complete"
    );

    send_event(&sender, "done", "Analysis complete", false);
    schedule_cleanup(state.channels.clone(), request_id.clone(), ANALYSIS_CHANNEL_TTL);

    let mut response = ApiAnalysisResponse::from_report(report, warnings, history, request_id, demo);
    response.regions = regions;
    Ok(Json(response))
}

async fn rank_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiRankRequest>,
) -> Result<Json<ApiRankResponse>, (StatusCode, String)> {
    let request = request
        .into_request(&state.config.analysis)
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    let today = chrono::Utc::now().date_naive();

    let ranking = rank_keywords(
        &state.collector,
        &request.keywords,
        &request.analysis,
        today,
        request.demo,
        &state.config,
    )
    .await;

    Ok(Json(ApiRankResponse {
        demo: ranking.demo,
        ranking: ranking.entries,
        warnings: ranking.warnings,
    }))
}

async fn stream_handler(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>>, StatusCode>
{
    let sender = get_or_create_channel(&state.channels, &query.request_id)
        .await
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;
    schedule_cleanup(state.channels.clone(), query.request_id.clone(), STREAM_CHANNEL_TTL);
    let receiver = sender.subscribe();
    let stream = BroadcastStream::new(receiver).filter_map(|event| match event {
        Ok(event) => {
            let data = serde_json::to_string(&event).unwrap_or_default();
            Some(Ok(Event::default().data(data)))
        }
        Err(_) => None,
    });

    send_event(&sender, "connected", "Streaming analysis progress", false);
    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(8))))
}

async fn history_handler(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        limit: state.history.limit(),
        entries: state.history.list().await,
    })
}

async fn clear_history_handler(State(state): State<AppState>) -> Json<ClearedResponse> {
    let removed = state.history.clear().await;
    Json(ClearedResponse { removed })
}

/// `None` when the map is full and `request_id` has no channel yet.
async fn get_or_create_channel(
    channels: &ProgressChannels,
    request_id: &str,
) -> Option<broadcast::Sender<StreamEvent>> {
    let mut guard = channels.lock().await;
    if let Some(sender) = guard.get(request_id) {
        return Some(sender.clone());
    }
    if guard.len() >= MAX_PROGRESS_CHANNELS {
        warn!(open = guard.len(), "progress channel limit reached");
        return None;
    }
    let (sender, _) = broadcast::channel(32);
    guard.insert(request_id.to_string(), sender.clone());
    Some(sender)
}

fn forward_progress(sender: &broadcast::Sender<StreamEvent>, event: ProgressEvent) {
    let name = serde_json::to_value(event.stage)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_else(|| "progress".to_string());
    send_event(sender, &name, &event.message, event.failed);
}

fn send_event(sender: &broadcast::Sender<StreamEvent>, event: &str, message: &str, failed: bool) {
    let _ = sender.send(StreamEvent {
        event: event.to_string(),
        message: message.to_string(),
        failed,
        timestamp_ms: now_ms(),
    });
}

fn schedule_cleanup(channels: ProgressChannels, request_id: String, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let mut guard = channels.lock().await;
        guard.remove(&request_id);
    });
}

fn generate_request_id() -> String {
    let counter = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{}", now_ms(), counter)
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0)
}
