//! HTTP surface: the JSON API under `/api/analyze` and the HTML form at `/`.

use crate::config::Settings;
use crate::models::{ErrorResponse, HealthStatus};
use crate::pipeline::AnalysisPipeline;
use crate::render::{ViewState, render_page};
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, ResponseError, web};
use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// Shared, read-only state handed to every request
pub struct AppState {
    pub pipeline: AnalysisPipeline,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("Analysis failed")]
    AnalysisFailed(String),
}

impl ApiError {
    fn message(&self) -> String {
        match self {
            ApiError::MissingUrl => "Please provide a website URL to analyze".to_string(),
            ApiError::InvalidBody(detail) | ApiError::AnalysisFailed(detail) => detail.clone(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::AnalysisFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ErrorResponse::new(self.to_string(), self.message()))
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: Option<String>,
}

/// Registers every route. Callers add an `AppState` as `web::Data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::InvalidBody(err.to_string()).into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _req| {
        ApiError::InvalidBody(err.to_string()).into()
    }))
    .service(
        web::scope("/api/analyze")
            .route("", web::post().to(analyze))
            .route("/health", web::get().to(health)),
    )
    .route("/", web::get().to(index))
    .route("/", web::post().to(analyze_form));
}

async fn analyze(
    state: web::Data<AppState>,
    body: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let url = body
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::MissingUrl)?;

    let result = state.pipeline.run(url).await.map_err(|e| {
        let message = format!("{e:#}");
        tracing::error!(url = %url, error = %message, "Analysis error");
        ApiError::AnalysisFailed(message)
    })?;

    Ok(HttpResponse::Ok().json(result))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus::healthy())
}

async fn index() -> HttpResponse {
    html_response(StatusCode::OK, render_page(&ViewState::Idle, None))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub url: String,
}

async fn analyze_form(state: web::Data<AppState>, form: web::Form<AnalyzeForm>) -> HttpResponse {
    let url = form.url.trim();

    if let Err(message) = validate_form_url(url) {
        return html_response(
            StatusCode::BAD_REQUEST,
            render_page(&ViewState::Error(message), Some(url)),
        );
    }

    match state.pipeline.run(url).await {
        Ok(result) => html_response(
            StatusCode::OK,
            render_page(&ViewState::Results(&result), Some(url)),
        ),
        Err(e) => {
            let message = format!("{e:#}");
            tracing::error!(url = %url, error = %message, "Analysis error");
            html_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                render_page(&ViewState::Error(&message), Some(url)),
            )
        }
    }
}

/// Mirrors the browser-side check on the form input.
pub fn validate_form_url(url: &str) -> Result<(), &'static str> {
    if url.is_empty() {
        return Err("Please enter a website URL");
    }
    if Url::parse(url).is_err() {
        return Err("Please enter a valid URL (e.g., https://example.com)");
    }
    Ok(())
}

fn html_response(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

/// Binds and runs the web server until it is stopped
pub async fn start_server(settings: &Settings) -> Result<()> {
    let pipeline = AnalysisPipeline::from_settings(settings)?;
    let ai_enabled = pipeline.is_ai_enabled();
    let state = web::Data::new(AppState { pipeline });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((settings.host.as_str(), settings.port))
    .with_context(|| {
        format!(
            "Failed to bind server to {}:{}",
            settings.host, settings.port
        )
    })?;

    tracing::info!(
        host = %settings.host,
        port = settings.port,
        ai_enabled,
        "SEO checker listening on http://{}:{}/",
        settings.host,
        settings.port
    );

    server.run().await.context("Server error")?;

    Ok(())
}
