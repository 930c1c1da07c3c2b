use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
    Form, Router,
};
use maud::{html, Markup, DOCTYPE};
use packed_form::{Config, FormController, FormValues, RenderConfig, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::load_definition;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    /// Pristine controller; every request works on its own clone
    controller: Arc<FormController>,
    render: Arc<RenderConfig>,
    title: Arc<str>,
}

pub async fn run(definition: &Path, config: Config, port: Option<u16>) -> Result<()> {
    let controller = FormController::new(Arc::new(load_definition(definition)?))?;
    let title = definition
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("form");

    let app = router(controller, config.render, title);

    let addr = format!("{}:{}", config.server.host, port.unwrap_or(config.server.port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Serving {} at http://{}", definition.display(), addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

pub fn router(controller: FormController, render: RenderConfig, title: &str) -> Router {
    let state = AppState {
        controller: Arc::new(controller),
        render: Arc::new(render),
        title: Arc::from(title),
    };

    Router::new()
        .route("/", get(show_form).post(submit_form))
        .with_state(state)
}

async fn show_form(State(state): State<AppState>) -> Html<String> {
    let form = state.controller.render(&state.render);
    Html(page(&state.title, form).into_string())
}

async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> (StatusCode, Html<String>) {
    let values: FormValues = fields
        .into_iter()
        .map(|(name, value)| (name, Value::String(value)))
        .collect();

    let mut session = FormController::clone(&state.controller);
    session.load_values(&values);

    match session.submit(|valid| submitted(&valid)) {
        Ok(body) => (StatusCode::OK, Html(page(&state.title, body).into_string())),
        Err(errors) => {
            debug!(invalid = errors.len(), "rejected submission");
            let form = session.render(&state.render);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(page(&state.title, form).into_string()),
            )
        }
    }
}

/// Submit callback: echo the validated, coerced values
fn submitted(values: &FormValues) -> Markup {
    let json = serde_json::to_string_pretty(values).unwrap_or_default();
    html! {
        h2 { "Form submitted" }
        dl {
            @for (name, value) in values {
                dt { (name) }
                dd { (value.to_string()) }
            }
        }
        pre { code { (json) } }
        a href="/" { "Back" }
    }
}

fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                main { (body) }
            }
        }
    }
}
