//! Training-table features.
//!
//! These columns do not line up with the online vector in
//! [`crate::features`]: counts here span the whole URL instead of the host,
//! subdomains come from the public suffix list instead of a naive label count,
//! and the keyword list is different. A model trained on this table and served
//! with online vectors sees shifted semantics on several dimensions.
//!
//! The `host` column is the authority cut at its first `:` (userinfo kept),
//! unlike the online host. Digits and letters are Unicode-aware here; the
//! online digit count is ASCII only.

use super::clean::URL_COLUMN;
use super::Table;
use crate::config::BatchConfig;
use crate::features::url_parts::host_of;
use crate::features::ParsedUrl;
use crate::Result;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tldextract::{TldExtractor, TldOption};

/// Whole-host IPv4 dotted quad.
const HOST_IP_PATTERN: &str = r"^(?:\d{1,3}\.){3}\d{1,3}$";

static HOST_IP_REGEX: OnceLock<Regex> = OnceLock::new();

fn host_ip_regex() -> &'static Regex {
    HOST_IP_REGEX.get_or_init(|| Regex::new(HOST_IP_PATTERN).expect("host IP pattern"))
}

/// Columns appended to the input table, in output order.
pub const DERIVED_COLUMNS: [&str; 20] = [
    "url_length",
    "host",
    "path",
    "hostname_length",
    "path_length",
    "num_dots",
    "num_slashes",
    "num_hyphens",
    "num_digits",
    "num_letters",
    "num_special",
    "digit_ratio",
    "has_ip",
    "ip_length",
    "subdomain",
    "domain",
    "suffix",
    "num_subdomains",
    "suspicious_word_count",
    "has_suspicious_word",
];

/// Public-suffix-aware host split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainParts {
    pub subdomain: String,
    pub domain: String,
    pub suffix: String,
}

impl DomainParts {
    /// `0` without a subdomain, else dots + 1 (`a.b` → 2).
    pub fn subdomain_count(&self) -> usize {
        if self.subdomain.is_empty() {
            0
        } else {
            self.subdomain.matches('.').count() + 1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchFeatures {
    pub url_length: usize,
    pub host: String,
    pub path: String,
    pub hostname_length: usize,
    pub path_length: usize,
    pub num_dots: usize,
    pub num_slashes: usize,
    pub num_hyphens: usize,
    pub num_digits: usize,
    pub num_letters: usize,
    pub num_special: usize,
    pub digit_ratio: f64,
    pub has_ip: bool,
    pub ip_length: usize,
    pub parts: DomainParts,
    pub num_subdomains: usize,
    pub suspicious_word_count: usize,
}

impl BatchFeatures {
    fn into_cells(self) -> Vec<String> {
        vec![
            self.url_length.to_string(),
            self.host,
            self.path,
            self.hostname_length.to_string(),
            self.path_length.to_string(),
            self.num_dots.to_string(),
            self.num_slashes.to_string(),
            self.num_hyphens.to_string(),
            self.num_digits.to_string(),
            self.num_letters.to_string(),
            self.num_special.to_string(),
            self.digit_ratio.to_string(),
            u8::from(self.has_ip).to_string(),
            self.ip_length.to_string(),
            self.parts.subdomain,
            self.parts.domain,
            self.parts.suffix,
            self.num_subdomains.to_string(),
            self.suspicious_word_count.to_string(),
            u8::from(self.suspicious_word_count > 0).to_string(),
        ]
    }
}

pub struct BatchFeatureBuilder {
    tld: TldExtractor,
    host_ip: &'static Regex,
    keywords: Vec<String>,
}

impl BatchFeatureBuilder {
    pub fn new(config: &BatchConfig) -> Self {
        Self {
            tld: TldOption::default().build(),
            host_ip: host_ip_regex(),
            keywords: config
                .suspicious_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    /// Public-suffix split of the URL's host. Works with or without a scheme;
    /// a URL with no usable host or a failed extraction gives empty parts.
    pub fn domain_parts(&self, url: &str) -> DomainParts {
        let host = suffix_host(url);
        if host.is_empty() {
            return DomainParts::default();
        }
        match self.tld.extract(&format!("http://{host}")) {
            Ok(r) => DomainParts {
                subdomain: r.subdomain.unwrap_or_default(),
                domain: r.domain.unwrap_or_default(),
                suffix: r.suffix.unwrap_or_default(),
            },
            Err(e) => {
                tracing::debug!(url, error = ?e, "domain extraction failed");
                DomainParts::default()
            }
        }
    }

    pub fn is_ip(&self, host: &str) -> bool {
        !host.is_empty() && self.host_ip.is_match(host)
    }

    /// Distinct keywords present in the lower-cased URL.
    pub fn suspicious_word_count(&self, url: &str) -> usize {
        let lower = url.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .count()
    }

    pub fn features(&self, url: &str) -> BatchFeatures {
        let parsed = ParsedUrl::parse(url);
        let host = netloc_head(&parsed.authority).to_string();
        let path = parsed.path;

        let url_length = url.chars().count();
        let num_digits = url.chars().filter(|c| c.is_numeric()).count();
        // letter-numbers (`Ⅻ`) are digits only, so the three counts partition the URL
        let num_letters = url
            .chars()
            .filter(|c| c.is_alphabetic() && !c.is_numeric())
            .count();
        let has_ip = self.is_ip(&host);
        let parts = self.domain_parts(url);

        BatchFeatures {
            url_length,
            hostname_length: host.chars().count(),
            path_length: path.chars().count(),
            num_dots: url.matches('.').count(),
            num_slashes: url.matches('/').count(),
            num_hyphens: url.matches('-').count(),
            num_digits,
            num_letters,
            num_special: url_length - num_digits - num_letters,
            digit_ratio: if url_length == 0 {
                0.0
            } else {
                num_digits as f64 / url_length as f64
            },
            has_ip,
            ip_length: if has_ip { host.chars().count() } else { 0 },
            num_subdomains: parts.subdomain_count(),
            parts,
            suspicious_word_count: self.suspicious_word_count(url),
            host,
            path,
        }
    }

    /// Append [`DERIVED_COLUMNS`] to every row. Fails only if `url` is absent.
    pub fn enrich(&self, table: &Table) -> Result<Table> {
        let url_col = table.require(URL_COLUMN)?;
        let mut headers = table.headers.clone();
        headers.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));

        let mut out = Table::new(headers);
        out.rows.reserve(table.len());
        for row in &table.rows {
            let mut row = row.clone();
            let cells = self.features(&row[url_col]).into_cells();
            row.extend(cells);
            out.rows.push(row);
        }
        Ok(out)
    }
}

impl Default for BatchFeatureBuilder {
    fn default() -> Self {
        Self::new(&BatchConfig::default())
    }
}

/// Authority cut at its first `:`, userinfo included.
fn netloc_head(authority: &str) -> &str {
    authority.split(':').next().unwrap_or_default()
}

/// Host handed to the public-suffix split. Scheme-less rows (`example.com/a`)
/// have no authority, so their host is the text before the first `/`, `?` or `#`.
fn suffix_host(url: &str) -> String {
    let parsed = ParsedUrl::parse(url);
    if !parsed.authority.is_empty() {
        return host_of(&parsed.authority).to_string();
    }
    let url = url.trim();
    let end = url.find(['/', '?', '#']).unwrap_or(url.len());
    // `scheme://` followed by an empty or malformed authority
    if url[end..].starts_with("//") {
        return String::new();
    }
    host_of(&url[..end]).to_string()
}
