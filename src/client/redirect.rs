use url::Url;

/// Target of a redirect from `current` to `location`.
///
/// A location starting with a single `/` is appended to `current` cut at its
/// last `/`, so `http://example.com/old/path` with `/new/path` yields
/// `http://example.com/old/new/path`. Absolute URLs are used as they are and
/// any other relative form is resolved against `current`.
pub(crate) fn resolve_location(current: &str, location: &str) -> String {
    if location.starts_with('/') && !location.starts_with("//") {
        return format!("{}{}", directory_of(current), location);
    }

    if Url::parse(location).is_ok() {
        return location.to_string();
    }

    match Url::parse(current).and_then(|base| base.join(location)) {
        Ok(url) => url.to_string(),
        Err(e) => {
            log::debug!("cannot resolve '{}' against '{}': {}", location, current, e);
            location.to_string()
        }
    }
}

/// `url` without its query and fragment, cut before the last `/` of the path.
fn directory_of(url: &str) -> &str {
    let url = url.split(|c| c == '?' || c == '#').next().unwrap_or(url);
    let authority = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url.rfind('/') {
        Some(idx) if idx >= authority => &url[..idx],
        _ => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_relative_keeps_parent_directory() {
        assert_eq!(
            resolve_location("http://example.com/old/path", "/new/path"),
            "http://example.com/old/new/path"
        );
        assert_eq!(resolve_location("http://example.com/page", "/next"), "http://example.com/next");
        assert_eq!(resolve_location("http://example.com/", "/next"), "http://example.com/next");
    }

    #[test]
    fn root_relative_without_path() {
        assert_eq!(resolve_location("http://example.com", "/next"), "http://example.com/next");
        assert_eq!(
            resolve_location("http://example.com/a/b?from=/x/y", "/c"),
            "http://example.com/a/c"
        );
    }

    #[test]
    fn absolute_location_is_used_verbatim() {
        assert_eq!(
            resolve_location("http://example.com/a", "https://other.org/b?c=1"),
            "https://other.org/b?c=1"
        );
    }

    #[test]
    fn other_relative_forms_are_joined() {
        assert_eq!(
            resolve_location("http://example.com/a/b", "c"),
            "http://example.com/a/c"
        );
        assert_eq!(
            resolve_location("https://example.com/a", "//cdn.example.com/x"),
            "https://cdn.example.com/x"
        );
    }
}
