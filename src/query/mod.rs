//! The query engine: tokenise/validate, evaluate, rank and render.

mod eval;
mod render;
mod tokenize;

pub use eval::{evaluate, parse, Expr, Hit};
pub use render::{rank_and_render, RankedDoc};
pub use tokenize::{tokenize_and_validate, Token};

use crate::index::Index;
use crate::Result;
use std::path::Path;

/// Outcome of answering a single query line.
pub enum QueryOutcome {
    /// The query failed tokenisation/validation.
    Invalid,
    /// The query was valid; this is the rendered listing (possibly empty).
    Rendered(String),
}

/// Runs one query end to end: tokenise, parse, evaluate, rank and render.
pub fn answer(raw: &str, index: &Index, page_dir: &Path) -> Result<QueryOutcome> {
    let tokens = match tokenize_and_validate(raw) {
        Some(tokens) => tokens,
        None => return Ok(QueryOutcome::Invalid),
    };

    let expr = parse(&tokens);
    let hits = evaluate(&expr, index);
    let rendered = rank_and_render(hits, page_dir)?;
    Ok(QueryOutcome::Rendered(rendered))
}
