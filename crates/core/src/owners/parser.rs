//! CODEOWNERS parser.
//!
//! Lines are split on `\n` and tokens on a single space. The first token of a
//! line is the path pattern; the rest are owners. Tabs are not separators, and
//! runs of spaces yield empty tokens that are kept like any other owner.

use std::collections::HashSet;

use super::KnownOwners;

/// Whether a line is a comment: its first space-delimited token starts with `#`.
///
/// A line starting with a space has an empty first token and is not a comment.
pub fn is_comment(line: &str) -> bool {
    line.split(' ')
        .next()
        .is_some_and(|first| first.starts_with('#'))
}

fn owner_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .filter(|line| !line.is_empty() && !is_comment(line))
}

/// Parse an owner file.
///
/// Without `known`, every owner token (all tokens after the path pattern) is
/// collected in first-seen order with duplicates removed, joined by `\n`.
/// The result is `Some("")` when the file declares no owners.
///
/// With `known`, the first token on any line (path pattern included) that is
/// in the set is returned and scanning stops. `None` if nothing matched.
pub fn parse_owners(content: &[u8], known: Option<&KnownOwners>) -> Option<String> {
    let text = String::from_utf8_lossy(content);

    match known {
        Some(known) => first_known_owner(&text, known).map(str::to_string),
        None => Some(collect_owners(&text).join("\n")),
    }
}

fn collect_owners(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut owners = Vec::new();

    for line in owner_lines(text) {
        for token in line.split(' ').skip(1) {
            if seen.insert(token) {
                owners.push(token);
            }
        }
    }

    owners
}

fn first_known_owner<'a>(text: &'a str, known: &KnownOwners) -> Option<&'a str> {
    owner_lines(text).find_map(|line| line.split(' ').find(|token| known.contains(token)))
}
