//! Byte-level segment scanning shared by every other module.

use crate::scheme::skip_scheme;

/// The separator used by canonical paths.
pub const SEPARATOR: u8 = b'/';

/// Return the length of the prefix of `path` that encompasses everything before its final
/// segment.
///
/// The separator preceding the final segment is not part of the returned prefix, except when
/// that separator is the leading root of an absolute path:  the root is never dropped.
///
/// ```
/// use canonpath::segment::previous_segment;
///
/// assert_eq!(4, previous_segment("/a/b/c"));
/// assert_eq!(1, previous_segment("/a"));
/// assert_eq!(1, previous_segment("/"));
/// assert_eq!(0, previous_segment("a"));
/// ```
pub fn previous_segment(path: &str) -> usize {
    let bytes = path.as_bytes();
    match bytes.iter().rposition(|c| *c == SEPARATOR) {
        Some(0) => 1,
        Some(idx) => idx,
        None => 0,
    }
}

/// Return the offset at which the final segment of `path` begins.  For the root path this is
/// zero, so that the root is its own final segment.
pub fn final_segment_start(path: &str) -> usize {
    if path.len() == 1 && path.as_bytes()[0] == SEPARATOR {
        return 0;
    }
    path.as_bytes()
        .iter()
        .rposition(|c| *c == SEPARATOR)
        .map(|idx| idx + 1)
        .unwrap_or(0)
}

/// Return the offset of the separator that ends the segment starting at `start`, or the length
/// of `path` when the segment runs to the end of the string.
pub fn next_segment(path: &str, start: usize) -> usize {
    let bytes = path.as_bytes();
    bytes[start..]
        .iter()
        .position(|c| *c == SEPARATOR)
        .map(|idx| start + idx)
        .unwrap_or(bytes.len())
}

/// Iterate the segments of `path`, including empty segments between adjacent separators.
///
/// Each item is the `(start, end)` offset of the segment.  A leading separator yields an empty
/// first segment, just as a trailing separator yields an empty last segment.
pub fn segments(path: &str) -> Segments<'_> {
    Segments {
        path,
        offset: 0,
        done: path.is_empty(),
    }
}

/// An iterator over the segment boundaries of a path.  See [segments].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    path: &'a str,
    offset: usize,
    done: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let start = self.offset;
        let end = next_segment(self.path, start);
        if end < self.path.len() {
            self.offset = end + 1;
        } else {
            self.done = true;
        }
        Some((start, end))
    }
}

/// True iff `path` has the cheap-to-check shape of a canonical path:  it is not the platform
/// spelling of the empty path and it has no trailing separator unless it is the root or a bare
/// `scheme://`.
pub(crate) fn looks_canonical(path: &str) -> bool {
    path != "."
        && (path.len() <= 1 || !path.ends_with('/') || skip_scheme(path) == Some(path.len()))
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_segment_cases() {
        assert_eq!(0, previous_segment(""));
        assert_eq!(0, previous_segment("foo"));
        assert_eq!(1, previous_segment("/"));
        assert_eq!(1, previous_segment("/foo"));
        assert_eq!(4, previous_segment("/foo/bar"));
        assert_eq!(3, previous_segment("foo/bar"));
        assert_eq!(11, previous_segment("http://host/a"));
    }

    #[test]
    fn final_segment_start_cases() {
        assert_eq!(0, final_segment_start(""));
        assert_eq!(0, final_segment_start("/"));
        assert_eq!(1, final_segment_start("/foo"));
        assert_eq!(4, final_segment_start("foo/bar"));
        assert_eq!(0, final_segment_start("foo"));
    }

    #[test]
    fn segments_keeps_empty_segments() {
        let path = "/a//b/";
        let segs: Vec<_> = segments(path).map(|(s, e)| &path[s..e]).collect();
        assert_eq!(vec!["", "a", "", "b", ""], segs);
        let segs: Vec<_> = segments("a").collect();
        assert_eq!(vec![(0, 1)], segs);
        assert_eq!(0, segments("").count());
    }

    #[test]
    fn looks_canonical_cases() {
        assert!(looks_canonical(""));
        assert!(looks_canonical("/"));
        assert!(looks_canonical("a"));
        assert!(looks_canonical("/a/b"));
        assert!(!looks_canonical("."));
        assert!(!looks_canonical("a/"));
        assert!(looks_canonical("http://"));
        assert!(looks_canonical("http://host"));
        assert!(!looks_canonical("http:/"));
        assert!(!looks_canonical("http://host/"));
    }
}
