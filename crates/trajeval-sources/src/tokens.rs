//! Boolean verdict token parsing.
//!
//! Annotators and upstream tooling encode per-step verdicts as strings like
//! `"[true, false, true]"` or `"t f t"`. Unknown tokens degrade to `false`
//! with a warning; parsing never fails.

use tracing::warn;

/// Parse a delimited verdict string into booleans.
///
/// Accepts an optional surrounding `[...]`, comma and/or whitespace
/// delimiters, optional quotes around each token, and the case-insensitive
/// tokens `true`/`false`/`t`/`f`. An empty body yields an empty sequence.
pub fn parse_verdict_tokens(raw: &str) -> Vec<bool> {
    let body = raw.trim();
    let body = body
        .strip_prefix('[')
        .and_then(|b| b.strip_suffix(']'))
        .unwrap_or(body);

    body.split(|c: char| c == ',' || c.is_whitespace())
        .map(|token| token.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|token| !token.is_empty())
        .map(parse_token)
        .collect()
}

fn parse_token(token: &str) -> bool {
    match token.to_ascii_lowercase().as_str() {
        "true" | "t" => true,
        "false" | "f" => false,
        _ => {
            warn!(token = %token, "unrecognized correctness token; treating as false");
            false
        }
    }
}
