//! Servidor web Axum para consultar as estatísticas de corpus do lexstat-core

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use lexstat_core::{
    demo::demo_texts, AnnotationService, Bigram, Corpus, CorpusError, RuleBasedAnnotator,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Quantos bigramas de tags e colocações entram no perfil
const TOP_PAIRS: usize = 10;

/// Estado compartilhado da aplicação
struct AppState {
    annotator: Arc<dyn AnnotationService>,
}

impl AppState {
    fn corpus(&self, text: &str) -> Corpus {
        Corpus::with_service(text, Arc::clone(&self.annotator))
    }
}

#[derive(Deserialize)]
struct ProfileRequest {
    text: String,
    #[serde(default)]
    step: Option<usize>,
}

#[derive(Deserialize)]
struct CategoryRequest {
    text: String,
    category: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct MarkovRequest {
    text: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    min_length: Option<usize>,
    #[serde(default)]
    max_length: Option<usize>,
}

#[derive(Deserialize)]
struct DatesRequest {
    text: String,
    format: [String; 3],
    #[serde(default)]
    content: Option<String>,
}

#[derive(Serialize)]
struct ProfileResponse {
    total_tokens: usize,
    total_sentences: usize,
    vocabulary_size: usize,
    hapax_count: usize,
    incremental_vocabulary: BTreeMap<usize, usize>,
    incremental_hapax: BTreeMap<usize, usize>,
    mean_tokens_per_sentence: f64,
    mean_token_length: f64,
    tags: Vec<(String, usize)>,
    tag_bigrams: Vec<(Bigram, f64)>,
    collocations: Vec<(Bigram, f64)>,
    months: Vec<(String, usize)>,
    weekdays: Vec<(String, usize)>,
    dates: Vec<(String, usize)>,
    shortest_sentence: String,
    longest_sentence: String,
}

#[derive(Serialize)]
struct RankedItem {
    text: String,
    count: usize,
}

#[derive(Serialize)]
struct ScoredSentence {
    sentence: String,
    probability: f64,
}

#[derive(Serialize)]
struct DatesResponse {
    dates: Vec<String>,
    rejected: Vec<String>,
}

/// Erro de uma requisição, sempre devolvido como `400 {"error": ...}`.
enum ApiError {
    EmptyText,
    Corpus(CorpusError),
    Task(String),
}

impl From<CorpusError> for ApiError {
    fn from(err: CorpusError) -> Self {
        ApiError::Corpus(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::EmptyText => (StatusCode::BAD_REQUEST, "texto vazio".to_string()),
            ApiError::Corpus(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Task(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr = std::env::var("LEXSTAT_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Servidor lexstat iniciado em http://{}", addr);
    axum::serve(listener, build_router()).await?;
    Ok(())
}

fn build_router() -> Router {
    let state = Arc::new(AppState {
        annotator: Arc::new(RuleBasedAnnotator::default()),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .route("/profile", post(profile_handler))
        .route("/entities", post(entities_handler))
        .route("/grammar", post(grammar_handler))
        .route("/markov", post(markov_handler))
        .route("/dates", post(dates_handler))
        .layer(cors)
        .with_state(state)
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(domain, text)| {
            serde_json::json!({
                "domain": domain,
                "text": text
            })
        })
        .collect();
    Json(texts)
}

/// As estatísticas são síncronas: rodam fora do runtime assíncrono.
async fn run_blocking<T, F>(text: &str, job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> lexstat_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    if text.trim().is_empty() {
        return Err(ApiError::EmptyText);
    }
    let result = tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ApiError::Task(e.to_string()))?;
    Ok(result?)
}

async fn profile_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    info!("Perfil: {} chars, passo {:?}", req.text.len(), req.step);
    let corpus = state.corpus(&req.text);
    let step = req.step;

    let profile = run_blocking(&req.text, move || {
        let (shortest_sentence, longest_sentence) = corpus.min_max_sentence(None)?;
        let mut tag_bigrams = corpus.conditional_bigram_probability()?;
        tag_bigrams.truncate(TOP_PAIRS);
        let mut collocations = corpus.collocations()?;
        collocations.truncate(TOP_PAIRS);

        Ok(ProfileResponse {
            total_tokens: corpus.n_tokens()?,
            total_sentences: corpus.n_sentences()?,
            vocabulary_size: corpus.vocabulary_size(None)?,
            hapax_count: corpus.hapax_count(None)?,
            incremental_vocabulary: corpus.incremental_vocabulary(step)?,
            incremental_hapax: corpus.incremental_hapax(step)?,
            mean_tokens_per_sentence: corpus.mean_tokens_per_sentence()?,
            mean_token_length: corpus.mean_token_length()?,
            tags: corpus.most_frequent_tags(None)?,
            tag_bigrams,
            collocations,
            months: corpus.extract_months(None)?,
            weekdays: corpus.extract_weekdays(None)?,
            dates: corpus
                .extract_all_dates(None)?
                .into_iter()
                .map(|(date, count)| (date.to_string(), count))
                .collect(),
            shortest_sentence,
            longest_sentence,
        })
    })
    .await?;
    Ok(Json(profile))
}

async fn entities_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<Vec<RankedItem>>, ApiError> {
    info!("Entidades {}: {} chars", req.category, req.text.len());
    let corpus = state.corpus(&req.text);
    let ranked = run_blocking(&req.text, move || {
        corpus.find_entities_by_category(&req.category, req.content.as_deref())
    })
    .await?;
    Ok(Json(to_ranked_items(ranked)))
}

async fn grammar_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CategoryRequest>,
) -> Result<Json<Vec<RankedItem>>, ApiError> {
    info!("Categoria gramatical {}: {} chars", req.category, req.text.len());
    let corpus = state.corpus(&req.text);
    let ranked = run_blocking(&req.text, move || {
        corpus.find_tokens_by_grammar_category(&req.category, req.content.as_deref())
    })
    .await?;
    Ok(Json(to_ranked_items(ranked)))
}

async fn markov_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MarkovRequest>,
) -> Result<Json<Vec<ScoredSentence>>, ApiError> {
    info!("Markov: {} chars", req.text.len());
    let corpus = state.corpus(&req.text);
    let scored = run_blocking(&req.text, move || {
        corpus.markov_order0_probability(req.content.as_deref(), req.min_length, req.max_length)
    })
    .await?;
    Ok(Json(
        scored
            .into_iter()
            .map(|(sentence, probability)| ScoredSentence { sentence, probability })
            .collect(),
    ))
}

async fn dates_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DatesRequest>,
) -> Result<Json<DatesResponse>, ApiError> {
    info!("Datas {:?}: {} chars", req.format, req.text.len());
    let corpus = state.corpus(&req.text);
    let results = run_blocking(&req.text, move || {
        let [f0, f1, f2] = &req.format;
        corpus.extract_dates(f0, f1, f2, req.content.as_deref())
    })
    .await?;

    let mut response = DatesResponse {
        dates: Vec::new(),
        rejected: Vec::new(),
    };
    for result in results {
        match result {
            Ok(date) => response.dates.push(date.to_string()),
            Err(err) => response.rejected.push(err.to_string()),
        }
    }
    Ok(Json(response))
}

fn to_ranked_items(ranked: Vec<(String, usize)>) -> Vec<RankedItem> {
    ranked
        .into_iter()
        .map(|(text, count)| RankedItem { text, count })
        .collect()
}
