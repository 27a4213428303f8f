//! Status-line grammar for `for-each-ref` tracking output.

use std::sync::LazyLock;

use regex::Regex;

/// One tracking-status line, decomposed into its named fields.
///
/// Within each side at most one of {gone, ahead/behind pair, unknown text} is
/// populated: the underlying `%(...:track,nobracket)` field is the literal
/// `gone`, an `ahead N` / `behind M` / `ahead N, behind M` summary, free text
/// a localized git produced in another language, or empty (in sync).
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct TrackedLine<'a> {
    pub gone_push: bool,
    pub ahead_push: Option<&'a str>,
    pub behind_push: Option<&'a str>,
    pub unknown_push: Option<&'a str>,
    pub gone_upstream: bool,
    pub ahead_upstream: Option<&'a str>,
    pub behind_upstream: Option<&'a str>,
    pub unknown_upstream: Option<&'a str>,
    /// Remote ref the branch pushes to; empty when none is configured.
    pub push_remote: &'a str,
    /// Remote ref the branch pulls from; empty when none is configured.
    pub upstream_remote: &'a str,
    /// Branch short name; the rest of the line.
    pub branch: &'a str,
}

// One alternation per side: `gone`, then the ahead/behind summary (either
// part optional), then lazy free text for anything else. Alternatives are
// tried left to right, so well-formed summaries never land in the unknown
// capture. `::` is a safe delimiter: colons are invalid in ref names.
static TRACK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^((?<gone_p>gone)|((ahead (?<ahead_p>\d+))?(, )?(behind (?<behind_p>\d+))?)|(?<unk_p>.*?))::((?<gone_u>gone)|((ahead (?<ahead_u>\d+))?(, )?(behind (?<behind_u>\d+))?)|(?<unk_u>.*?))::(?<remote_p>.*?)::(?<remote_u>.*?)::(?<branch>.*)$",
    )
    .unwrap()
});

/// Decompose every branch line in the raw `for-each-ref` output.
///
/// Lines that do not fit the five-field layout at all yield no item.
pub(crate) fn tracked_lines(output: &str) -> impl Iterator<Item = TrackedLine<'_>> {
    TRACK_LINE.captures_iter(output).map(|caps| {
        let text = |name: &str| caps.name(name).map(|m| m.as_str());
        TrackedLine {
            gone_push: caps.name("gone_p").is_some(),
            ahead_push: text("ahead_p"),
            behind_push: text("behind_p"),
            unknown_push: text("unk_p"),
            gone_upstream: caps.name("gone_u").is_some(),
            ahead_upstream: text("ahead_u"),
            behind_upstream: text("behind_u"),
            unknown_upstream: text("unk_u"),
            push_remote: text("remote_p").unwrap_or(""),
            upstream_remote: text("remote_u").unwrap_or(""),
            branch: text("branch").unwrap_or(""),
        }
    })
}
