//! Precedence rules that turn a decomposed line into displayable counts.

use serde::Serialize;

use super::parse::TrackedLine;

/// Sentinel count meaning the tracked remote ref no longer exists.
pub const GONE_REMOTE: &str = "gone";

/// Ahead/behind summary for one local branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AheadBehindData {
    /// Local branch short name.
    pub branch: String,
    /// Remote ref used for display; the push ref when usable, else upstream.
    pub remote_ref: String,
    /// Commits ahead: digits, [`GONE_REMOTE`], or empty (unknown or not
    /// applicable).
    pub ahead_count: String,
    /// Commits behind: digits or empty. Never invented as "0".
    pub behind_count: String,
}

impl AheadBehindData {
    /// Compact human-readable summary, e.g. `ahead 2, behind 1`.
    pub fn summary(&self) -> String {
        if self.ahead_count == GONE_REMOTE || self.behind_count == GONE_REMOTE {
            return GONE_REMOTE.to_string();
        }

        let mut parts = Vec::new();
        if !self.ahead_count.is_empty() && self.ahead_count != "0" {
            parts.push(format!("ahead {}", self.ahead_count));
        }
        if !self.behind_count.is_empty() && self.behind_count != "0" {
            parts.push(format!("behind {}", self.behind_count));
        }
        if parts.is_empty() {
            "up to date".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Apply the push-preferred precedence policy to one decomposed line.
///
/// Returns `None` when no branch name or remote ref can be attributed; such
/// lines carry nothing worth displaying.
pub(crate) fn resolve(line: &TrackedLine<'_>) -> Option<AheadBehindData> {
    // A push ref can exist purely from a configured push refspec while the
    // branch tracks nothing ("gone" on the push side); the upstream value is
    // authoritative then.
    let remote_ref = if !line.push_remote.is_empty() && !line.gone_push {
        line.push_remote
    } else {
        line.upstream_remote
    };
    if remote_ref.is_empty() || line.branch.is_empty() {
        return None;
    }

    let ahead_count = if let Some(ahead) = line.ahead_push {
        ahead.to_string()
    } else if line.behind_push.is_some() {
        // The push side reported only "behind"; ahead is not applicable.
        String::new()
    } else if let Some(ahead) = line.ahead_upstream {
        ahead.to_string()
    } else if line.gone_push || line.gone_upstream {
        GONE_REMOTE.to_string()
    } else if has_unknown_text(line) {
        // Probably untranslated tool output; do not assume "in sync" when
        // the summary could not be read.
        String::new()
    } else {
        // A remote exists and tracking reported nothing: equal histories.
        "0".to_string()
    };

    let behind_count = if let Some(behind) = line.behind_push {
        behind.to_string()
    } else if line.ahead_push.is_none() {
        line.behind_upstream.unwrap_or("").to_string()
    } else {
        String::new()
    };

    Some(AheadBehindData {
        branch: line.branch.to_string(),
        remote_ref: remote_ref.to_string(),
        ahead_count,
        behind_count,
    })
}

fn has_unknown_text(line: &TrackedLine<'_>) -> bool {
    [line.unknown_push, line.unknown_upstream]
        .into_iter()
        .flatten()
        .any(|text| !text.trim().is_empty())
}
