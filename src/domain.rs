/// Registrable domain of a query: the last two dot-separated labels.
///
/// No public-suffix list is consulted, so multi-label suffixes such as
/// `co.uk` group under the suffix itself. Known simplification.
pub fn registrable_domain(query: &str) -> String {
    let parts: Vec<&str> = query.split('.').collect();
    if parts.len() <= 2 {
        query.to_string()
    } else {
        parts[parts.len() - 2..].join(".")
    }
}

/// Left-hand labels of a query after removing its registrable domain.
///
/// `mail.example.com` with domain `example.com` yields `mail`; a query
/// equal to its domain yields the empty string.
pub fn subdomain_of<'a>(query: &'a str, domain: &str) -> &'a str {
    if query == domain {
        return "";
    }
    match query.strip_suffix(domain) {
        Some(rest) => rest.strip_suffix('.').unwrap_or(rest),
        None => query,
    }
}
