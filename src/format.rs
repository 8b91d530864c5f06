//! Named string-format predicates
//!
//! Formats are shape checks on string values, referenced by name from a
//! schema (`"format": "email"`). The set is fixed at compile time but
//! adding a variant is a local change: extend [`Format`], its name table,
//! and its predicate.

use std::net::Ipv4Addr;
use std::sync::OnceLock;

use regex::Regex;

/// A named string-shape predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `local@domain.tld`, no whitespace
    Email,
    /// Hyphenated hex UUID, e.g. `550e8400-e29b-41d4-a716-446655440000`
    Uuid,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// Absolute URI with an explicit scheme
    Uri,
    /// DNS hostname labels
    Hostname,
    /// Dotted-quad IPv4 address
    Ipv4,
    /// ASCII letters and digits only, non-empty
    Alphanumeric,
}

impl Format {
    /// All known formats, used for error listings.
    pub const ALL: [Format; 7] = [
        Format::Email,
        Format::Uuid,
        Format::Date,
        Format::Uri,
        Format::Hostname,
        Format::Ipv4,
        Format::Alphanumeric,
    ];

    /// Look up a format by its schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "email" => Some(Format::Email),
            "uuid" => Some(Format::Uuid),
            "date" => Some(Format::Date),
            "uri" => Some(Format::Uri),
            "hostname" => Some(Format::Hostname),
            "ipv4" => Some(Format::Ipv4),
            "alphanumeric" => Some(Format::Alphanumeric),
            _ => None,
        }
    }

    /// The schema name of this format.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Email => "email",
            Format::Uuid => "uuid",
            Format::Date => "date",
            Format::Uri => "uri",
            Format::Hostname => "hostname",
            Format::Ipv4 => "ipv4",
            Format::Alphanumeric => "alphanumeric",
        }
    }

    /// Check a string value against this format.
    pub fn check(&self, value: &str) -> bool {
        match self {
            Format::Email => email_re().is_match(value),
            Format::Uuid => uuid_re().is_match(value),
            Format::Date => check_date(value),
            Format::Uri => uri_re().is_match(value),
            Format::Hostname => hostname_re().is_match(value) && value.len() <= 253,
            Format::Ipv4 => value.parse::<Ipv4Addr>().is_ok(),
            Format::Alphanumeric => {
                !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
            }
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn uuid_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .unwrap()
    })
}

fn uri_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s]+$").unwrap())
}

fn hostname_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
            .unwrap()
    })
}

/// `YYYY-MM-DD` with real month/day ranges; leap years are not modeled.
fn check_date(value: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());

    let Some(caps) = re.captures(value) else {
        return false;
    };
    let month: u32 = caps[2].parse().unwrap_or(0);
    let day: u32 = caps[3].parse().unwrap_or(0);

    (1..=12).contains(&month) && (1..=31).contains(&day)
}
