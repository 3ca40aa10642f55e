//! Detection of a leading `scheme://` prefix.

/// Examine `path` as a potential URL and return the offset immediately following its
/// `scheme://` prefix, or None if the path doesn't look like a URL.
///
/// A scheme is a non-empty run of bytes terminated by `:` that contains no `/`.  The scan stops
/// at the first `/`, so the cost is bounded by the length of the scheme.
pub fn skip_scheme(path: &str) -> Option<usize> {
    let bytes = path.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() && bytes[idx] != b':' {
        if bytes[idx] == b'/' {
            return None;
        }
        idx += 1;
    }
    if idx > 0 && bytes[idx..].starts_with(b"://") {
        Some(idx + 3)
    } else {
        None
    }
}

/// Split `path` into its `scheme://` prefix and the path-like tail that follows it.
pub fn split_scheme(path: &str) -> Option<(&str, &str)> {
    skip_scheme(path).map(|idx| path.split_at(idx))
}

/// True iff `path` looks like a URL, i.e. it begins with `scheme://`.
///
/// There is no real URI parser here:  the only requirement is a scheme with no `:` or `/`
/// followed by `://`.
pub fn is_url(path: &str) -> bool {
    skip_scheme(path).is_some()
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
