//! URL helpers.

use url::Url;

/// Join `host` and `port` into a full URL.
///
/// A port of 0 (or any non-positive value) means "no port" and returns
/// `host` unchanged, as does a port that does not fit in `u16`. Any port
/// already present in `host` is replaced. The rest of `host` is kept
/// verbatim, including a port that is the scheme's default.
pub fn build_full_url(host: &str, port: i64) -> String {
    if host.is_empty() || port <= 0 {
        return host.to_string();
    }
    let Ok(port) = u16::try_from(port) else {
        tracing::warn!(host, port, "Port out of range, leaving URL without a port");
        return host.to_string();
    };

    // Url only validates; its serialization normalizes host, path and
    // default ports, so the port is spliced into the original text.
    match Url::parse(host) {
        Ok(url) if url.has_host() => match host.find("://") {
            Some(scheme_end) => {
                let authority_start = scheme_end + 3;
                let authority_end = host[authority_start..]
                    .find(['/', '?', '#'])
                    .map_or(host.len(), |offset| authority_start + offset);
                let authority = strip_port(&host[authority_start..authority_end]);
                format!(
                    "{}{}:{}{}",
                    &host[..authority_start],
                    authority,
                    port,
                    &host[authority_end..]
                )
            }
            None => host.to_string(),
        },
        _ => format!("{}:{}", host.trim_end_matches('/'), port),
    }
}

/// `authority` without a trailing `:port`. IPv6 literals keep their colons.
fn strip_port(authority: &str) -> &str {
    let host_start = authority.rfind(']').unwrap_or(0);
    match authority[host_start..].rfind(':') {
        Some(offset) if authority[host_start + offset + 1..].bytes().all(|b| b.is_ascii_digit()) => {
            &authority[..host_start + offset]
        }
        _ => authority,
    }
}
