//! Lenient URL splitting: scheme / authority / path / params / query / fragment.
//!
//! Follows the classic `scheme://netloc/path;params?query#fragment` split
//! rather than WHATWG parsing, because the trained model saw features computed
//! that way: a URL without `//` has an empty authority and everything lands in
//! the path. A malformed bracketed authority is the only parse failure, and it
//! degrades to an all-empty [`ParsedUrl`].

use std::net::Ipv6Addr;

/// Schemes whose last path segment may carry `;params`.
const PARAM_SCHEMES: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    /// `[userinfo@]host[:port]`, exactly as written.
    pub authority: String,
    pub path: String,
    pub params: String,
    pub query: String,
    pub fragment: String,
}

impl ParsedUrl {
    /// Split `url`. Never fails.
    pub fn parse(url: &str) -> Self {
        Self::try_parse(url).unwrap_or_default()
    }

    /// Authority without userinfo and port. See [`host_of`].
    pub fn host(&self) -> &str {
        host_of(&self.authority)
    }

    fn try_parse(url: &str) -> Option<Self> {
        let cleaned: String = url
            .trim_start_matches(|c: char| c <= ' ')
            .chars()
            .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
            .collect();
        let mut rest = cleaned.as_str();

        let mut scheme = String::new();
        if let Some(i) = rest.find(':') {
            let candidate = &rest[..i];
            let mut chars = candidate.chars();
            let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
            if valid {
                scheme = candidate.to_ascii_lowercase();
                rest = &rest[i + 1..];
            }
        }

        let mut authority = "";
        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            authority = &after[..end];
            rest = &after[end..];
            if !authority_is_well_formed(authority) {
                return None;
            }
        }

        let (rest, fragment) = rest.split_once('#').unwrap_or((rest, ""));
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));

        let (path, params) = if PARAM_SCHEMES.contains(&scheme.as_str()) {
            split_params(rest)
        } else {
            (rest, "")
        };

        Some(Self {
            scheme,
            authority: authority.to_string(),
            path: path.to_string(),
            params: params.to_string(),
            query: query.to_string(),
            fragment: fragment.to_string(),
        })
    }
}

/// `[userinfo@]host[:port]` → `host`.
///
/// Userinfo ends at the last `@`. A bracketed literal keeps its brackets, and
/// only an all-digit (possibly empty) `:port` suffix is removed, so
/// `[2001:db8::1]:8080` gives `[2001:db8::1]`.
pub fn host_of(authority: &str) -> &str {
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    if host_port.starts_with('[') {
        return match host_port.find(']') {
            Some(close) => &host_port[..=close],
            None => host_port,
        };
    }
    match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => host_port,
    }
}

/// Split `;params` off the last path segment.
fn split_params(path: &str) -> (&str, &str) {
    let semi = match path.rfind('/') {
        Some(slash) => path[slash..].find(';').map(|i| slash + i),
        None => path.find(';'),
    };
    match semi {
        Some(i) => (&path[..i], &path[i + 1..]),
        None => (path, ""),
    }
}

fn authority_is_well_formed(authority: &str) -> bool {
    let open = authority.contains('[');
    let close = authority.contains(']');
    if open != close {
        return false;
    }
    if !open {
        return true;
    }
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let Some((before, bracketed)) = host_port.split_once('[') else {
        return true;
    };
    if !before.is_empty() {
        return false;
    }
    let (host, port) = bracketed.split_once(']').unwrap_or((bracketed, ""));
    if !port.is_empty() && !port.starts_with(':') {
        return false;
    }
    is_bracketed_literal(host)
}

/// IPv6 literal or IPvFuture (`v<hex>.<anything>`).
fn is_bracketed_literal(host: &str) -> bool {
    if let Some(future) = host.strip_prefix(['v', 'V']) {
        return match future.split_once('.') {
            Some((ver, addr)) => {
                !ver.is_empty() && ver.chars().all(|c| c.is_ascii_hexdigit()) && !addr.is_empty()
            }
            None => false,
        };
    }
    let addr = host.split('%').next().unwrap_or_default();
    addr.parse::<Ipv6Addr>().is_ok()
}
