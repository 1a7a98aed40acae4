//! Carrier number formats.
//!
//! The table order is the matching priority. Digit classes are spelled
//! `[0-9]` because `\d` would also accept non-ASCII digits.

use regex::Regex;
use std::sync::LazyLock;

use super::Carrier;

/// `(carrier, full-match pattern)` pairs in priority order.
pub(crate) const CARRIER_TABLE: [(Carrier, &str); 6] = [
    (Carrier::Ups, r"^(?i:1Z[0-9A-Z]{16})$"),
    (Carrier::FedEx, r"^(?:[0-9]{12}|[0-9]{15})$"),
    (
        Carrier::Usps,
        r"^(?:[0-9]{20,22}|[0-9]{4}(?: ?[0-9]{4}){4,5} ?[0-9]{2})$",
    ),
    (Carrier::Dhl, r"^[0-9]{10}$"),
    (Carrier::Amazon, r"^(?i:TBA[0-9]{12}|AMZN[0-9A-Z]{8,})$"),
    (Carrier::OnTrac, r"^C[0-9]{14}$"),
];

pub(crate) static COMPILED_TABLE: LazyLock<Vec<(Carrier, Regex)>> = LazyLock::new(|| {
    CARRIER_TABLE
        .iter()
        .map(|&(carrier, pattern)| {
            (
                carrier,
                Regex::new(pattern).expect("carrier patterns are valid"),
            )
        })
        .collect()
});

/// Five or six groups of 4 digits then 2 more, separated by runs of spaces and
/// not touching other digits. Five groups is the printed 22-digit layout.
pub(crate) static USPS_GROUPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])([0-9]{4}(?: +[0-9]{4}){4,5} +[0-9]{2})(?:[^0-9]|$)")
        .expect("USPS group pattern is valid")
});

pub(crate) static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit run pattern is valid"));

/// Returns the compiled full-match pattern for `carrier`.
pub(crate) fn pattern_for(carrier: Carrier) -> &'static Regex {
    COMPILED_TABLE
        .iter()
        .find(|(c, _)| *c == carrier)
        .map(|(_, re)| re)
        .expect("every carrier has a table entry")
}
