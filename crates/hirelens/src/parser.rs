//! Ranking Response Parser — recovers canonical ranking records from the raw
//! text a generative collaborator returns.
//!
//! The upstream output format is not contractually guaranteed, so parsing is
//! an ordered list of attempts, first success wins:
//!
//! 1. strip markdown code fences (```json / ```),
//! 2. strict JSON array of ranking objects,
//! 3. prose fallback split on literal "Candidate:" / "Pros:" / "Cons:"
//!    markers (legacy path for variants prompted without a JSON schema).
//!
//! `parse` never fails: when nothing is recoverable it returns an empty
//! sequence plus a diagnostic carrying the offending text. In the strict
//! JSON path a syntax error fails the whole document (JSON has no useful
//! partial-record recovery) and control falls through to the prose attempt;
//! in the prose path a malformed chunk is skipped, never fatal to the batch.

use tracing::warn;

use crate::models::{renumber, RankingRecord};

const CANDIDATE_MARKER: &str = "Candidate:";
const PROS_MARKER: &str = "Pros:";
const CONS_MARKER: &str = "Cons:";

/// Result of a parse run. `records` carry contiguous 1..N ranks re-derived
/// from order; `diagnostics` report skipped chunks or total parse failure,
/// for the caller to surface.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<RankingRecord>,
    pub diagnostics: Vec<String>,
}

/// Parses raw collaborator output into canonical ranking records.
pub fn parse(raw: &str) -> ParseOutcome {
    let text = strip_json_fences(raw);

    if let Some(mut records) = parse_json_array(text) {
        renumber(&mut records);
        let diagnostics = if records.is_empty() {
            vec!["response was a valid but empty ranking array".to_string()]
        } else {
            Vec::new()
        };
        return ParseOutcome {
            records,
            diagnostics,
        };
    }

    let (records, mut diagnostics) = parse_prose(text);
    if !records.is_empty() {
        return ParseOutcome {
            records,
            diagnostics,
        };
    }

    warn!(raw_response = raw, "unparsable ranking response");
    diagnostics.push(format!("unparsable response: {raw}"));
    ParseOutcome {
        records: Vec::new(),
        diagnostics,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Strict attempt: the whole text must be a JSON array of ranking objects.
/// Field tolerance (ranking/rank alias, string-or-array pros/cons) lives in
/// `RankingRecord`'s serde impl.
fn parse_json_array(text: &str) -> Option<Vec<RankingRecord>> {
    serde_json::from_str(text).ok()
}

/// Legacy prose attempt: split candidates on the "Candidate:" marker,
/// discard the preamble, then split each chunk on "Pros:" and "Cons:".
/// Chunks missing either marker are skipped with a diagnostic. Rank is the
/// 1-based position among the chunks that did split.
fn parse_prose(text: &str) -> (Vec<RankingRecord>, Vec<String>) {
    let mut records = Vec::new();
    let mut diagnostics = Vec::new();

    let mut chunks = text.split(CANDIDATE_MARKER);
    chunks.next(); // text before the first marker is preamble

    for (i, chunk) in chunks.enumerate() {
        let Some((overview, rest)) = chunk.split_once(PROS_MARKER) else {
            let diag = format!("skipped candidate chunk {}: no \"Pros:\" marker", i + 1);
            warn!("{diag}");
            diagnostics.push(diag);
            continue;
        };
        let Some((pros, cons)) = rest.split_once(CONS_MARKER) else {
            let diag = format!("skipped candidate chunk {}: no \"Cons:\" marker", i + 1);
            warn!("{diag}");
            diagnostics.push(diag);
            continue;
        };

        // Raw strings, not further structured; wrapped per the canonical
        // pros/cons shape.
        records.push(RankingRecord::new(
            0,
            overview.trim(),
            vec![pros.trim().to_string()],
            vec![cons.trim().to_string()],
        ));
    }

    renumber(&mut records);
    (records, diagnostics)
}
