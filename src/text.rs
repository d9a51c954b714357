//! Free-text helpers shared by the spiders: venue extraction from
//! description prose and the title slugs used in record ids.

use std::sync::OnceLock;

use regex::Regex;

use crate::items::Location;

/// Matches "<preamble> at <venue>, <street>, <city>, <state> <zip>
/// beginning ...". The greedy prefix makes the last viable connective win,
/// so a trailing "beginning at 6pm" never captures.
const VENUE_PATTERN: &str = r".+\s(?:at|the)\s?(.+)\sbeginning";

/// Status words sources bolt onto titles ("- CANCELLED", "- Rescheduled
/// from August 20"). Any of them marks the meeting cancelled, and they are
/// stripped from the title before slugging.
pub(crate) const STATUS_MARKERS: &[&str] = &["cancel", "rescind", "reschedul", "postpon"];

fn venue_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VENUE_PATTERN).unwrap())
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let words = STATUS_MARKERS.join("|");
        Regex::new(&format!(r"(?i)[\s:-]{{0,3}}(?:{})\w*[\s:-]{{0,3}}", words)).unwrap()
    })
}

/// Split an event sentence into venue name and street address.
///
/// The name is everything up to the first comma after the connective, the
/// address is the remaining comma-joined segments. No match leaves both
/// fields empty; this never fails.
pub fn split_location(text: &str) -> Location {
    let Some(captures) = venue_regex().captures(text) else {
        return Location::default();
    };
    let mut segments = captures[1].split(", ");
    let name = segments.next().unwrap_or_default().to_string();
    let address = segments.collect::<Vec<_>>().join(", ");
    Location { name, address }
}

/// Strip status suffixes from a meeting title so a retitled entry keeps
/// its id.
pub fn clean_title(title: &str) -> String {
    marker_regex().replace_all(title, " ").trim().to_string()
}

/// Lowercased, identifier-safe rendering: alphanumeric runs joined by
/// underscores, everything else dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut boundary = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if boundary && !slug.is_empty() {
                slug.push('_');
            }
            slug.push(c.to_ascii_lowercase());
            boundary = false;
        } else {
            boundary = true;
        }
    }
    slug
}
