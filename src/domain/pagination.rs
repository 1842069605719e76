//! Page/limit normalization and the paged result envelope
//!
//! Raw paging values arrive loosely typed (query strings, JSON numbers,
//! booleans) and are coerced with the same rules a JavaScript `Number()` call
//! applies before being normalized to positive integers.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// A raw paging value as received from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawParam {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl RawParam {
    /// Numeric coercion; unparsable input yields NaN
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Flag(true) => 1.0,
            Self::Flag(false) => 0.0,
            Self::Text(s) => parse_numeric_text(s),
        }
    }
}

impl From<f64> for RawParam {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RawParam {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for RawParam {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for RawParam {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for RawParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let s = text.trim();

    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };

    if let Some(radix) = radix {
        return parse_radix_digits(&s[2..], radix);
    }

    // f64::from_str also accepts "inf" and "nan" spellings
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }

    let mut value = 0.0_f64;

    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }

    value
}

/// Raw paging input; either value may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationRequest {
    #[serde(default)]
    pub page: Option<RawParam>,
    #[serde(default)]
    pub limit: Option<RawParam>,
}

impl PaginationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: impl Into<RawParam>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_limit(mut self, limit: impl Into<RawParam>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// Normalizes to a page and limit that are both at least 1
    pub fn normalize(&self) -> Pagination {
        Pagination {
            page: normalize_value(self.page.as_ref(), DEFAULT_PAGE),
            limit: normalize_value(self.limit.as_ref(), DEFAULT_LIMIT),
        }
    }
}

fn normalize_value(raw: Option<&RawParam>, default: u64) -> u64 {
    let Some(raw) = raw else {
        return default;
    };

    let value = raw.to_number();

    if !value.is_finite() || value <= 0.0 {
        return default;
    }

    // Values in (0, 1) floor to zero; zero is never a usable page or limit
    let floored = value.floor();

    if floored < 1.0 {
        return default;
    }

    floored as u64
}

/// Normalized paging window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of records before this page
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn take(&self) -> u64 {
        self.limit
    }

    /// Last page for `total` records; zero when there are none
    pub fn last_page(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }

    pub fn meta(&self, total: u64) -> PageMeta {
        PageMeta {
            total,
            page: self.page,
            last_page: self.last_page(total),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub last_page: u64,
}

/// One page of records plus the paging summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}
