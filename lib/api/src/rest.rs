use crate::state::AppState;
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use peptalk_context::{Considerations, ContextMatch, SUGGESTION_LIMIT};
use peptalk_core::{CompoundOption, Error, Stack, StackItemRef, TaxonomyKey};
use peptalk_stack::{find_redundancies, goal_title, submission_text, CandidateQuery, RankedCandidate};
use peptalk_storage::submissions::BUILDER_SLUG;
use peptalk_storage::{EntityType, StackInput, SubmissionInput, SubmissionStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

#[derive(Deserialize)]
struct MatchRequest {
    query: String,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct ConsiderationsRequest {
    query: String,
    peptide: String,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct TextQuery {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
struct SuggestionsRequest {
    #[serde(default)]
    items: Vec<String>,
    goal_id: Option<String>,
    search: Option<String>,
    category: Option<String>,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct ItemsRequest {
    #[serde(default)]
    items: Vec<String>,
}

#[derive(Deserialize)]
struct SubmitStackRequest {
    #[serde(default)]
    name: String,
    goal_id: Option<String>,
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    username: String,
}

#[derive(Deserialize)]
struct StatusQuery {
    status: Option<String>,
}

#[derive(Deserialize)]
struct StatusUpdate {
    status: String,
    reason: Option<String>,
}

#[derive(Serialize)]
struct MatchResult<'a> {
    id: &'a str,
    label: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal: Option<peptalk_context::Signal>,
    score: f64,
    matched_terms: &'a [String],
}

impl<'a> From<&'a ContextMatch<'a>> for MatchResult<'a> {
    fn from(m: &'a ContextMatch<'a>) -> Self {
        Self {
            id: &m.pack.id,
            label: &m.pack.label,
            signal: m.pack.signal,
            score: m.score,
            matched_terms: &m.matched_terms,
        }
    }
}

#[derive(Serialize)]
struct CandidateResult<'a> {
    slug: &'a str,
    name: &'a str,
    kind: peptalk_core::CompoundKind,
    taxonomy_keys: &'a [TaxonomyKey],
    risk_tier: peptalk_core::RiskTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    evidence: Option<&'static str>,
    score: i32,
}

impl<'a> From<&RankedCandidate<'a>> for CandidateResult<'a> {
    fn from(r: &RankedCandidate<'a>) -> Self {
        let c = r.compound;
        Self {
            slug: &c.slug,
            name: &c.name,
            kind: c.kind,
            taxonomy_keys: &c.taxonomy_keys,
            risk_tier: c.risk_tier,
            evidence: c.evidence_grade.map(|g| g.short_label()),
            score: r.score,
        }
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<AppState>, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(Self::configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Route table, shared by the server and tests
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/context/match", web::post().to(match_context))
            .route("/context/suggest", web::get().to(suggest_context))
            .route("/context/considerations", web::post().to(considerations))
            .route("/search/resolve", web::get().to(resolve_search))
            .route("/compounds", web::get().to(list_compounds))
            .route("/goals", web::get().to(list_goals))
            .route("/stack/suggestions", web::post().to(stack_suggestions))
            .route("/stack/redundancies", web::post().to(stack_redundancies))
            .route("/stack/submit", web::post().to(submit_stack))
            .route("/stacks/save", web::post().to(save_stack))
            .route("/stacks", web::get().to(list_stacks))
            .route("/stacks/{id}", web::get().to(get_stack))
            .route("/stacks/{id}", web::delete().to(delete_stack))
            .route("/ugc/submit", web::post().to(submit_ugc))
            .route("/ugc", web::get().to(list_ugc))
            .route("/ugc/{id}/status", web::post().to(set_ugc_status));
    }
}

type State = web::Data<Arc<AppState>>;

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({
        "ok": false,
        "error": e.to_string()
    });
    match e {
        Error::CompoundNotFound(_) | Error::StackNotFound(_) => HttpResponse::NotFound().json(body),
        Error::Storage(_) | Error::Io(_) | Error::Serialization(_) => {
            error!("Request failed: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn bad_request(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "ok": false,
        "error": msg.into()
    }))
}

/// Stack items from slugs; slugs the catalog lacks are skipped
fn stack_from_slugs(state: &AppState, name: &str, goal_id: Option<String>, slugs: &[String]) -> Stack {
    let refs: Vec<StackItemRef> = slugs
        .iter()
        .filter_map(|s| state.content.compounds.get(s.trim()))
        .map(StackItemRef::from)
        .collect();
    Stack::hydrate(name, goal_id, &refs, &state.content.compounds)
}

async fn match_context(state: State, req: web::Json<MatchRequest>) -> ActixResult<HttpResponse> {
    let limit = req.limit.unwrap_or(state.matcher.config().default_limit);
    let matches = state.matcher.match_query(&req.query, limit);
    let result: Vec<MatchResult<'_>> = matches.iter().map(MatchResult::from).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": result
    })))
}

async fn suggest_context(state: State, query: web::Query<TextQuery>) -> ActixResult<HttpResponse> {
    let labels = state.matcher.suggest_labels(&query.q, SUGGESTION_LIMIT);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": labels
    })))
}

async fn considerations(state: State, req: web::Json<ConsiderationsRequest>) -> ActixResult<HttpResponse> {
    if req.peptide.trim().is_empty() {
        return Ok(bad_request("peptide is required"));
    }
    let limit = req.limit.unwrap_or(state.matcher.config().default_limit);
    let matches = state.matcher.match_query(&req.query, limit);
    let rendered = Considerations::render_all(&matches, req.peptide.trim(), &req.query);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": rendered
    })))
}

async fn resolve_search(state: State, query: web::Query<TextQuery>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": state.index.resolve(&query.q)
    })))
}

async fn list_compounds(state: State) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": state.content.compounds.compounds()
    })))
}

async fn list_goals(state: State) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": state.content.goals
    })))
}

async fn stack_suggestions(state: State, req: web::Json<SuggestionsRequest>) -> ActixResult<HttpResponse> {
    let category = match req.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(raw) => match raw.parse::<TaxonomyKey>() {
            Ok(key) => Some(key),
            Err(e) => return Ok(error_response(&e)),
        },
        None => None,
    };

    let goal_id = req.goal_id.clone().filter(|g| !g.trim().is_empty());
    let stack = stack_from_slugs(&state, "", goal_id, &req.items);
    let query = CandidateQuery {
        search: req.search.clone(),
        category,
    };
    let limit = req.limit.unwrap_or(state.suggestion_limit);
    let report = state
        .scorer
        .suggest(state.content.compounds.compounds(), &stack, &query, limit);

    let candidates: Vec<CandidateResult<'_>> = report.candidates.iter().map(CandidateResult::from).collect();
    let suggestions: Vec<CandidateResult<'_>> = report.suggestions.iter().map(CandidateResult::from).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": {
            "coverage": stack.coverage(),
            "candidates": candidates,
            "suggestions": suggestions
        }
    })))
}

async fn stack_redundancies(state: State, req: web::Json<ItemsRequest>) -> ActixResult<HttpResponse> {
    let stack = stack_from_slugs(&state, "", None, &req.items);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": find_redundancies(&stack.items)
    })))
}

async fn submit_stack(state: State, req: web::Json<SubmitStackRequest>) -> ActixResult<HttpResponse> {
    let req = req.into_inner();
    let stack = stack_from_slugs(&state, req.name.trim(), req.goal_id, &req.items);
    if stack.is_empty() {
        return Ok(bad_request("stack has no known compounds"));
    }

    let text = submission_text(&stack, goal_title(&stack, &state.content.goals));
    let input = SubmissionInput {
        entity_type: EntityType::Stack,
        slug: BUILDER_SLUG.to_string(),
        username: req.username,
        text,
        ack_no_dosing: true,
    };

    match state.storage.submissions().submit(input) {
        Ok(submission) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "ok": true,
            "submission": submission
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn save_stack(state: State, req: web::Json<StackInput>) -> ActixResult<HttpResponse> {
    match state.storage.stacks().upsert(req.into_inner()) {
        Ok(stack) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "ok": true,
            "stack": stack
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn list_stacks(state: State) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "ok": true,
        "stacks": state.storage.stacks().list()
    })))
}

async fn get_stack(state: State, path: web::Path<String>) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let Some(saved) = state.storage.stacks().get(&id) else {
        return Ok(error_response(&Error::StackNotFound(id)));
    };

    let hydrated = Stack::hydrate(
        saved.name.clone(),
        saved.goal_id.clone(),
        &saved.items,
        &state.content.compounds,
    );
    let compounds: &[CompoundOption] = &hydrated.items;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "ok": true,
        "stack": saved,
        "compounds": compounds
    })))
}

async fn delete_stack(state: State, path: web::Path<String>) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    match state.storage.stacks().delete(&id) {
        Ok(true) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "ok": true
        }))),
        Ok(false) => Ok(error_response(&Error::StackNotFound(id))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn submit_ugc(state: State, req: web::Json<SubmissionInput>) -> ActixResult<HttpResponse> {
    match state.storage.submissions().submit(req.into_inner()) {
        Ok(submission) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "ok": true,
            "submission": submission
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn list_ugc(state: State, query: web::Query<StatusQuery>) -> ActixResult<HttpResponse> {
    let status = match query.status.as_deref() {
        Some(raw) => match raw.parse::<SubmissionStatus>() {
            Ok(s) => s,
            Err(e) => return Ok(error_response(&e)),
        },
        None => SubmissionStatus::Pending,
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "ok": true,
        "result": state.storage.submissions().list(status)
    })))
}

async fn set_ugc_status(
    state: State,
    path: web::Path<String>,
    req: web::Json<StatusUpdate>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let req = req.into_inner();
    let status = match req.status.parse::<SubmissionStatus>() {
        Ok(s) => s,
        Err(e) => return Ok(error_response(&e)),
    };

    match state.storage.submissions().set_status(&id, status, req.reason) {
        Ok(submission) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "ok": true,
            "submission": submission
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}
