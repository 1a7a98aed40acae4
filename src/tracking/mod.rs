//! Tracking number extraction from raw decoded text.
//!
//! Matching escalates through four passes and stops at the first hit:
//!
//! 1. the raw text against every carrier pattern, in priority order;
//! 2. the same patterns against the text with all whitespace removed;
//! 3. a USPS `4 4 4 4 4 4 2` group run anywhere in the text;
//! 4. any maximal run of 20 to 22 digits anywhere, classified as USPS.
//!
//! Pass 4 is deliberately broad and will label other long numeric payloads
//! as USPS.

mod patterns;

use patterns::{pattern_for, COMPILED_TABLE, DIGIT_RUN, USPS_GROUPS};
use std::fmt;

/// Shipping carrier whose number format matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Carrier {
    Ups,
    FedEx,
    Usps,
    Dhl,
    Amazon,
    OnTrac,
}

impl Carrier {
    /// All carriers in matching priority order.
    pub const ALL: [Carrier; 6] = [
        Carrier::Ups,
        Carrier::FedEx,
        Carrier::Usps,
        Carrier::Dhl,
        Carrier::Amazon,
        Carrier::OnTrac,
    ];

    /// Display name of the carrier.
    pub fn name(self) -> &'static str {
        match self {
            Carrier::Ups => "UPS",
            Carrier::FedEx => "FedEx",
            Carrier::Usps => "USPS",
            Carrier::Dhl => "DHL",
            Carrier::Amazon => "Amazon",
            Carrier::OnTrac => "OnTrac",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A carrier-tagged tracking number.
///
/// `number` has no whitespace and fully matches the carrier's pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrackingMatch {
    pub carrier: Carrier,
    pub number: String,
}

/// Which extraction pass produced a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchPass {
    Raw,
    Compact,
    UspsGroups,
    LongDigits,
}

/// Returns true when `text` fully matches `carrier`'s number format.
pub fn matches_carrier(carrier: Carrier, text: &str) -> bool {
    pattern_for(carrier).is_match(text)
}

/// Maps raw decoded text to a tracking number, or `None`.
pub fn extract_tracking(text: &str) -> Option<TrackingMatch> {
    extract_with_pass(text).map(|(tracking, _)| tracking)
}

/// Like [`extract_tracking`], also reporting the pass that matched.
pub fn extract_with_pass(text: &str) -> Option<(TrackingMatch, MatchPass)> {
    if let Some(tracking) = match_table(text) {
        return Some((tracking, MatchPass::Raw));
    }

    let compact = strip_whitespace(text);
    if compact.len() != text.len() {
        if let Some(tracking) = match_table(&compact) {
            return Some((tracking, MatchPass::Compact));
        }
    }

    if let Some(groups) = USPS_GROUPS.captures(text).and_then(|caps| caps.get(1)) {
        let tracking = TrackingMatch {
            carrier: Carrier::Usps,
            number: strip_whitespace(groups.as_str()),
        };
        return Some((tracking, MatchPass::UspsGroups));
    }

    DIGIT_RUN
        .find_iter(text)
        .find(|run| (20..=22).contains(&run.as_str().len()))
        .map(|run| {
            let tracking = TrackingMatch {
                carrier: Carrier::Usps,
                number: run.as_str().to_string(),
            };
            (tracking, MatchPass::LongDigits)
        })
}

fn match_table(text: &str) -> Option<TrackingMatch> {
    COMPILED_TABLE
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(carrier, _)| TrackingMatch {
            carrier: *carrier,
            number: strip_whitespace(text),
        })
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
