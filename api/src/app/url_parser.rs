//! Repository URL parser
//!
//! Extracts owner and repository name from user-supplied GitHub URLs like
//! `https://github.com/octo/cat`, `github.com/octo/cat/tree/main` or
//! `git@github.com:octo/cat.git`.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::entities::RepoIdentifier;

fn repo_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(?:^|[/@.])github\.com[/:]([^/\s?#]+)/([^/\s?#]+)")
            .expect("repository URL pattern is valid")
    })
}

/// Parse a repository URL into its owner and name.
///
/// Only the first two path segments after the host are used, so trailing
/// slashes and deeper paths (`/tree/main`, `/issues/4`) resolve to the same
/// repository. A `.git` suffix is stripped. Returns `None` for input without
/// an owner/repo path; that is malformed input, not a missing repository.
pub fn parse_repo_url(url: &str) -> Option<RepoIdentifier> {
    let captures = repo_url_pattern().captures(url.trim())?;

    let owner = captures.get(1)?.as_str();
    let raw_name = captures.get(2)?.as_str();
    let name = raw_name.strip_suffix(".git").unwrap_or(raw_name);

    if owner.is_empty() || name.is_empty() {
        return None;
    }

    Some(RepoIdentifier::new(owner, name))
}
