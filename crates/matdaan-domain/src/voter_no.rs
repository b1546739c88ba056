//! Public voter-number format.
//!
//! A voter number is assigned only when a registration is approved:
//! `VOTER_<YYYYMMDD>_<4 digits>`, e.g. `VOTER_20260127_3847`. The date is
//! the issue date; the suffix is random and re-rolled on collision.

use chrono::NaiveDate;

/// Prefix shared by every voter number.
pub const VOTER_NO_PREFIX: &str = "VOTER_";

/// Suffix length in digits.
pub const VOTER_NO_SUFFIX_LEN: usize = 4;

/// Render a voter number from an issue date and a 4-digit suffix.
pub fn format_voter_no(issued_on: NaiveDate, suffix: u16) -> String {
    format!(
        "{VOTER_NO_PREFIX}{}_{:04}",
        issued_on.format("%Y%m%d"),
        suffix % 10_000
    )
}

/// Whether a string carries the voter-number prefix. Used to tell a voter
/// number apart from an email when identifying a voter.
pub fn is_voter_no(s: &str) -> bool {
    s.starts_with(VOTER_NO_PREFIX)
}

/// Full shape check: `VOTER_` + 8 date digits + `_` + 4 digits.
pub fn validate_voter_no(s: &str) -> bool {
    let Some(rest) = s.strip_prefix(VOTER_NO_PREFIX) else {
        return false;
    };
    let mut parts = rest.splitn(2, '_');
    let (Some(date), Some(suffix)) = (parts.next(), parts.next()) else {
        return false;
    };
    date.len() == 8
        && date.chars().all(|c| c.is_ascii_digit())
        && suffix.len() == VOTER_NO_SUFFIX_LEN
        && suffix.chars().all(|c| c.is_ascii_digit())
}
