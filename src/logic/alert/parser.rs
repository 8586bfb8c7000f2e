//! Tagged-Line Parser
//!
//! The composer fixes an exact output grammar: one line per field,
//! `TAG: content`. This parser keeps that grammar in one declarative
//! table. Unknown lines are ignored; a missing tag leaves its field empty.

use super::types::{AlertBundle, Language};

// ============================================================================
// TAG TABLE
// ============================================================================

/// Field a tag assigns to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Alert(Language),
    TweetPublic,
    TweetAuthority,
}

/// The closed tag set, in the order the model is asked to emit them
pub const TAG_TABLE: [(&str, Field); 5] = [
    ("ALERT_EN", Field::Alert(Language::En)),
    ("ALERT_HI", Field::Alert(Language::Hi)),
    ("ALERT_MR", Field::Alert(Language::Mr)),
    ("TWEET_PUBLIC", Field::TweetPublic),
    ("TWEET_AUTHORITY", Field::TweetAuthority),
];

// ============================================================================
// PARSER
// ============================================================================

/// Parse a tagged-line response into a bundle.
///
/// Scans each line once against the tag table. Later occurrences of the
/// same tag overwrite earlier ones.
pub fn parse_tagged(text: &str) -> AlertBundle {
    let mut bundle = AlertBundle::empty();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        for (tag, field) in TAG_TABLE {
            if let Some(rest) = match_tag(line, tag) {
                assign(&mut bundle, field, rest.trim().to_string());
                break;
            }
        }
    }

    bundle
}

/// Content after `TAG:` when the line starts with the tag, else None
fn match_tag<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(tag)?;
    let rest = rest.trim_start();
    rest.strip_prefix(':')
}

fn assign(bundle: &mut AlertBundle, field: Field, value: String) {
    match field {
        Field::Alert(language) => bundle.set_alert(language, value),
        Field::TweetPublic => bundle.tweet_public = value,
        Field::TweetAuthority => bundle.tweet_authority = value,
    }
}

// ============================================================================
// TESTS
// ============================================================================
