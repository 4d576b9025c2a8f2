use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    AnalysisEntry, AlternativePackage, AnalyzeTripRequest, DiagnosticScore, ErrorResponse,
    HealthResponse, HistoryQuery, HistoryResponse, MatchAnalysisResponse, NoMatchResponse,
    PackageCandidate, PackageDocument, ScoreCatalogRequest, SelectedPackage, WeightsResponse,
};
use crate::services::{CacheError, CacheKey, CacheManager, CrmClient, CrmError, HistoryStore};
use crate::core::{normalize, MatchOutcome, PackageMatcher, MIN_VIABLE_SCORE};
use std::sync::Arc;

/// Default and maximum page sizes for the history endpoint
const DEFAULT_HISTORY_LIMIT: u16 = 20;
const MAX_HISTORY_LIMIT: u16 = 100;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub crm: Arc<CrmClient>,
    pub cache: Arc<CacheManager>,
    pub history: Arc<HistoryStore>,
    pub matcher: PackageMatcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/analyze", web::post().to(analyze_trip))
        .route("/matches/score", web::post().to(score_catalog))
        .route("/matches/history", web::get().to(get_history))
        .route("/matches/weights", web::get().to(get_weights));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // Check PostgreSQL health
    let pg_healthy = state.history.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Analyze a trip against the active package catalog
///
/// POST /api/v1/matches/analyze
///
/// Request body:
/// ```json
/// {
///   "tripName": "string",
///   "aiRecommendations": ["string"],
///   "refreshCatalog": false
/// }
/// ```
async fn analyze_trip(
    state: web::Data<AppState>,
    req: web::Json<AnalyzeTripRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for analyze request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let trip_name = &req.trip_name;
    tracing::info!("Analyzing trip: {}", trip_name);

    // Fetch the trip document from the CRM
    let trip_doc = match state.crm.get_trip(trip_name).await {
        Ok(doc) => doc,
        Err(CrmError::NotFound(_)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Trip not found".to_string(),
                message: format!("Trip {} does not exist in the CRM", trip_name),
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch trip {}: {}", trip_name, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch trip".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // Load the catalog, through the cache unless a refresh was asked for
    let documents = match load_catalog(&state, req.refresh_catalog).await {
        Ok(docs) => docs,
        Err(e) => {
            tracing::error!("Failed to fetch package catalog: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch package catalog".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let trip = normalize::trip_requirement(&trip_doc);
    let candidates: Vec<PackageCandidate> =
        documents.iter().map(normalize::package_candidate).collect();

    tracing::debug!(
        "Scoring {} packages for {} (group_size={}, destinations={:?})",
        candidates.len(),
        trip_name,
        trip.group_size,
        trip.destinations
    );

    let outcome = state
        .matcher
        .match_trip(&trip, candidates, &req.ai_recommendations);

    // Record the run for the trip's history (best-effort)
    record_outcome(&state, trip_name, &outcome).await;

    outcome_response(outcome, &documents)
}

/// Score an inline catalog without touching the CRM
///
/// POST /api/v1/matches/score
///
/// Takes the trip and package documents in the request body. Used for
/// what-if scoring from the CRM's package editor; nothing is cached or
/// recorded.
async fn score_catalog(
    state: web::Data<AppState>,
    req: web::Json<ScoreCatalogRequest>,
) -> impl Responder {
    let req = req.into_inner();

    let trip = normalize::trip_requirement(&req.trip);
    let candidates: Vec<PackageCandidate> =
        req.packages.iter().map(normalize::package_candidate).collect();

    tracing::debug!(
        "Scoring {} inline packages for trip {}",
        candidates.len(),
        req.trip.name
    );

    let outcome = state
        .matcher
        .match_trip(&trip, candidates, &req.ai_recommendations);

    outcome_response(outcome, &req.packages)
}

/// Get the analysis history for a trip
///
/// GET /api/v1/matches/history?tripName={tripName}&limit={limit}
///
/// Returns the most recent analysis runs, newest first.
async fn get_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Cap limit to keep history queries bounded
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .min(MAX_HISTORY_LIMIT);

    match state.history.recent_for_trip(&query.trip_name, limit as i64).await {
        Ok(records) => {
            let analyses: Vec<AnalysisEntry> = records
                .into_iter()
                .map(|record| AnalysisEntry {
                    id: record.id,
                    package_name: record.package_name,
                    total_score: record.total_score,
                    destination_mismatch: record.destination_mismatch,
                    breakdown: record.breakdown,
                    created_at: record.created_at,
                })
                .collect();

            HttpResponse::Ok().json(HistoryResponse {
                trip_name: query.trip_name.clone(),
                count: analyses.len(),
                analyses,
            })
        }
        Err(e) => {
            tracing::error!("Failed to fetch history for {}: {}", query.trip_name, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch analysis history".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Get the scoring weights in effect
///
/// GET /api/v1/matches/weights
async fn get_weights(state: web::Data<AppState>) -> impl Responder {
    let weights = state.matcher.weights().clone();
    let max_score = weights.total();

    HttpResponse::Ok().json(WeightsResponse {
        weights,
        max_score,
        min_viable_score: MIN_VIABLE_SCORE,
    })
}

/// Load the active package catalog, trying the cache first
async fn load_catalog(
    state: &AppState,
    refresh: bool,
) -> Result<Vec<PackageDocument>, CrmError> {
    let cache_key = CacheKey::catalog();

    if refresh {
        if let Err(e) = state.cache.delete(&cache_key).await {
            tracing::warn!("Failed to invalidate catalog cache: {}", e);
        }
    } else {
        match state.cache.get::<Vec<PackageDocument>>(&cache_key).await {
            Ok(packages) => {
                tracing::debug!("Catalog served from cache ({} packages)", packages.len());
                return Ok(packages);
            }
            Err(CacheError::CacheMiss(_)) => {}
            Err(e) => tracing::warn!("Catalog cache read failed: {}", e),
        }
    }

    let packages = state.crm.list_active_packages().await?;

    // Cache failures must not fail the analysis
    if let Err(e) = state.cache.set(&cache_key, &packages).await {
        tracing::warn!("Failed to cache catalog: {}", e);
    }

    Ok(packages)
}

/// Persist the run in the trip's history; failures are logged, never
/// surfaced to the caller
async fn record_outcome(state: &AppState, trip_name: &str, outcome: &MatchOutcome) {
    let result = match outcome {
        MatchOutcome::Matched(report) => {
            state
                .history
                .record_analysis(
                    trip_name,
                    Some(&report.package.name),
                    Some(report.total_score),
                    report.destination_mismatch,
                    Some(&report.breakdown),
                )
                .await
        }
        MatchOutcome::NoViableMatch {
            destination_mismatch,
            ..
        } => {
            state
                .history
                .record_analysis(trip_name, None, None, *destination_mismatch, None)
                .await
        }
        MatchOutcome::NoPackages { .. } => {
            state
                .history
                .record_analysis(trip_name, None, None, false, None)
                .await
        }
    };

    if let Err(e) = result {
        tracing::warn!("Failed to record analysis for {}: {}", trip_name, e);
    }
}

/// Map a match outcome onto the wire shapes the CRM frontend expects
fn outcome_response(outcome: MatchOutcome, documents: &[PackageDocument]) -> HttpResponse {
    match outcome {
        MatchOutcome::Matched(report) => {
            let document = documents.iter().find(|doc| doc.name == report.package.name);
            let selected_package = SelectedPackage::build(&report.package, document);

            let alternative_packages: Vec<AlternativePackage> = report
                .alternatives
                .into_iter()
                .map(|alt| AlternativePackage {
                    name: alt.name,
                    package_name: alt.package_name,
                    score: alt.total_score,
                    main_gaps: alt.gaps,
                })
                .collect();

            tracing::info!(
                "Selected {} with score {:.1} ({} alternatives)",
                selected_package.package_name,
                report.total_score,
                alternative_packages.len()
            );

            HttpResponse::Ok().json(MatchAnalysisResponse {
                success: true,
                selected_package,
                match_score: report.total_score,
                match_score_breakdown: report.breakdown,
                destination_mismatch_warning: report.destination_mismatch,
                alternative_packages,
                recommendations: report.recommendations,
            })
        }
        MatchOutcome::NoViableMatch {
            message,
            destination_mismatch,
            diagnostics,
        } => HttpResponse::Ok().json(NoMatchResponse {
            success: false,
            message,
            destination_mismatch_warning: destination_mismatch,
            all_scores: diagnostics.iter().map(DiagnosticScore::from).collect(),
        }),
        MatchOutcome::NoPackages { message } => HttpResponse::Ok().json(NoMatchResponse {
            success: false,
            message,
            destination_mismatch_warning: false,
            all_scores: vec![],
        }),
    }
}
