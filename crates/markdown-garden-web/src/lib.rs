//! Web front end for a markdown garden.
//!
//! Serves each markdown file of a notes directory as an HTML page, with
//! wiki links rewritten to site links, a listing of every page and a search
//! endpoint over the garden graph.
//!
//! - `GET /` - home page (`readme` unless configured otherwise)
//! - `GET /{name}` - a document
//! - `GET /x/all` - every page
//! - `GET /x/search?q=` - JSON search results
//! - `GET /garden.json` - the graph document

pub mod error;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{WebError, WebResult};
pub use routes::{SearchHit, SearchResponse};
pub use server::{router, serve, shutdown_signal};
pub use state::AppState;
