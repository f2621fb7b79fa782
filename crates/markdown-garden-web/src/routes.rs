//! Request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use markdown_garden_engine::{
    Document, GraphData, filter_and_collapse, navigation_path, parse_wiki_links,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{WebError, WebResult};
use crate::pages;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub href: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// Reads a document off the async runtime.
async fn find_document(state: &Arc<AppState>, name: String) -> WebResult<Option<Document>> {
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || state.garden.find(&name))
        .await
        .map_err(|e| WebError::Internal(format!("document lookup task failed: {e}")))?
        .map_err(WebError::from)
}

fn document_page(state: &AppState, document: &Document) -> String {
    let links = parse_wiki_links(&document.content);
    let article = pages::document_article(document, &links, |slug| {
        state.garden.file(slug).is_some()
    });
    let title = pages::document_title(document);
    pages::layout(Some(&title), &article, state.has_search())
}

/// `GET /`: the home page, or a "Not Found" article when there is none.
pub async fn home(State(state): State<Arc<AppState>>) -> WebResult<Html<String>> {
    let page = match find_document(&state, state.home.clone()).await? {
        Some(document) => document_page(&state, &document),
        None => pages::layout(None, &pages::missing_home_article(), state.has_search()),
    };
    Ok(Html(page))
}

/// `GET /{name}`
pub async fn document(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> WebResult<Html<String>> {
    let document = find_document(&state, name)
        .await?
        .ok_or(WebError::NotFound)?;
    Ok(Html(document_page(&state, &document)))
}

/// `GET /x/all`
pub async fn all_pages(State(state): State<Arc<AppState>>) -> Html<String> {
    let article = pages::all_pages_article(
        state
            .page_names
            .iter()
            .map(|name| (name.as_str(), state.garden.file(name))),
    );
    Html(pages::layout(
        Some("All Markdown Files"),
        &article,
        state.has_search(),
    ))
}

/// `GET /x/search?q=`
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let results = filter_and_collapse(&state.node_names, &params.q, &state.search)
        .into_iter()
        .map(|id| SearchHit {
            href: navigation_path(&id, &state.home),
            id,
        })
        .collect();

    Json(SearchResponse {
        query: params.q,
        results,
    })
}

/// `GET /garden.json`
pub async fn graph(State(state): State<Arc<AppState>>) -> Json<GraphData> {
    Json(state.graph.clone())
}

pub async fn not_found() -> WebError {
    WebError::NotFound
}
