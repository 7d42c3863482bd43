//! Canonical data model: resume documents, job postings, and ranking records.
//!
//! `RankingRecord` is the interchange unit shared by persistence and the
//! presentation layer. On the wire its rank is the string-valued `ranking`
//! key and its pros/cons are sequences of strings; deserialization is
//! deliberately tolerant (integer or string ranks, single string or array
//! pros/cons) because upstream generative output honors no strict schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One uploaded resume after extraction. `text` is single-line normalized
/// (newlines collapsed to spaces) and is relied upon by prompt construction
/// and table display. Never persisted; lives only for one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeDocument {
    pub name: String,
    pub text: String,
}

impl ResumeDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A job posting with its current ranking history. The core reads
/// `description` and replaces `rankings` wholesale on each re-run; everything
/// else belongs to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub rankings: Vec<RankingRecord>,
    /// When the current `rankings` sequence was produced. `None` until the
    /// first ranking run completes for this job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranked_at: Option<DateTime<Utc>>,
}

impl JobPosting {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            company: company.into(),
            description: description.into(),
            rankings: Vec::new(),
            ranked_at: None,
        }
    }
}

/// Canonical ranking output unit.
///
/// Invariant: within any returned sequence, `rank` values are contiguous
/// starting at 1 and match each record's position. Ranks reported by an
/// upstream model are never trusted; [`renumber`] re-derives them from order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRecord {
    #[serde(
        rename = "ranking",
        alias = "rank",
        default,
        with = "serde_rank"
    )]
    pub rank: u32,
    pub overview: String,
    #[serde(default, deserialize_with = "serde_string_or_seq::deserialize")]
    pub pros: Vec<String>,
    #[serde(default, deserialize_with = "serde_string_or_seq::deserialize")]
    pub cons: Vec<String>,
}

impl RankingRecord {
    pub fn new(
        rank: u32,
        overview: impl Into<String>,
        pros: Vec<String>,
        cons: Vec<String>,
    ) -> Self {
        Self {
            rank,
            overview: overview.into(),
            pros,
            cons,
        }
    }
}

/// Rewrites ranks to `1..=N` by sequence position. Called on every parsed or
/// assembled batch so duplicated or missing upstream ranks cannot leak out.
pub fn renumber(records: &mut [RankingRecord]) {
    for (i, record) in records.iter_mut().enumerate() {
        record.rank = (i + 1) as u32;
    }
}

/// Serializes `rank` as a string (the persisted interchange format) and
/// accepts a string or an integer on the way in. Unparseable rank text maps
/// to 0 rather than an error, since ranks are re-derived from order anyway.
mod serde_rank {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(rank: &u32, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(rank)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RankRepr {
            Num(u32),
            Text(String),
        }

        Ok(match RankRepr::deserialize(de)? {
            RankRepr::Num(n) => n,
            RankRepr::Text(s) => s.trim().parse().unwrap_or(0),
        })
    }
}

/// Accepts `"a"` or `["a", "b"]`; a single string becomes a one-element vec.
mod serde_string_or_seq {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrSeq {
            One(String),
            Many(Vec<String>),
        }

        Ok(match StringOrSeq::deserialize(de)? {
            StringOrSeq::One(s) => vec![s],
            StringOrSeq::Many(v) => v,
        })
    }
}
