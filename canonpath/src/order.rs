//! Ordering and ancestry of canonical paths.

use std::cmp::Ordering;

use crate::scheme::{is_url, skip_scheme};
use crate::segment::{looks_canonical, SEPARATOR};

///////////////////////////////////////////// compare //////////////////////////////////////////////

/// Compare two canonical paths.
///
/// This is a byte-wise comparison with one override:  at the first differing position a
/// separator sorts before every other byte, and a path that ends where the other continues with
/// a separator sorts first.  The result is a total order in which each directory immediately
/// precedes all of its descendants.
///
/// ```
/// use std::cmp::Ordering;
/// use canonpath::compare;
///
/// assert_eq!(Ordering::Less, compare("foo", "foo/bar"));
/// assert_eq!(Ordering::Less, compare("foo/bar", "foo-bar"));
/// ```
pub fn compare(path1: &str, path2: &str) -> Ordering {
    debug_assert!(looks_canonical(path1), "non-canonical path: {path1:?}");
    debug_assert!(looks_canonical(path2), "non-canonical path: {path2:?}");
    let lhs = path1.as_bytes();
    let rhs = path2.as_bytes();
    let common = lhs
        .iter()
        .zip(rhs.iter())
        .take_while(|(l, r)| l == r)
        .count();
    match (lhs.get(common), rhs.get(common)) {
        (None, None) => Ordering::Equal,
        (Some(&SEPARATOR), None) => Ordering::Greater,
        (None, Some(&SEPARATOR)) => Ordering::Less,
        (Some(&SEPARATOR), Some(_)) => Ordering::Less,
        (Some(_), Some(&SEPARATOR)) => Ordering::Greater,
        (l, r) => l.cmp(&r),
    }
}

///////////////////////////////////////////// ancestry /////////////////////////////////////////////

/// Return the length of the longest common ancestor of two paths that are not URLs.
fn ancestor_length(path1: &str, path2: &str) -> usize {
    let lhs = path1.as_bytes();
    let rhs = path2.as_bytes();
    if lhs.is_empty() || rhs.is_empty() {
        return 0;
    }
    let mut last_separator = 0;
    let mut idx = 0;
    while lhs[idx] == rhs[idx] {
        if lhs[idx] == SEPARATOR {
            last_separator = idx;
        }
        idx += 1;
        if idx == lhs.len() || idx == rhs.len() {
            break;
        }
    }
    let both_absolute = lhs[0] == SEPARATOR && rhs[0] == SEPARATOR;
    // The lone root is an ancestor of every absolute path.
    if both_absolute && idx == 1 && (lhs.len() == 1 || rhs.len() == 1) {
        return 1;
    }
    if (idx == lhs.len() && rhs.get(idx) == Some(&SEPARATOR))
        || (idx == rhs.len() && lhs.get(idx) == Some(&SEPARATOR))
        || (idx == lhs.len() && idx == rhs.len())
    {
        return idx;
    }
    // Paths that share nothing but the root separator have no common ancestor.
    if both_absolute && last_separator == 0 {
        return 0;
    }
    last_separator
}

/// Return the longest common ancestor of `path1` and `path2`, or the empty path if they share
/// none.
///
/// Two URLs share an ancestor only if their schemes match, and then only if they share more
/// than the scheme itself.  A URL and a non-URL never share an ancestor.
pub fn longest_ancestor<'a>(path1: &'a str, path2: &str) -> &'a str {
    match (is_url(path1), is_url(path2)) {
        (true, true) => {
            let (Some(tail1), Some(tail2)) = (skip_scheme(path1), skip_scheme(path2)) else {
                return "";
            };
            if path1[..tail1] != path2[..tail2] {
                return "";
            }
            let (rest1, rest2) = (&path1[tail1..], &path2[tail2..]);
            let len = ancestor_length(rest1, rest2);
            if len == 0 || (len == 1 && rest1.starts_with('/')) {
                ""
            } else {
                &path1[..tail1 + len]
            }
        }
        (false, false) => &path1[..ancestor_length(path1, path2)],
        _ => "",
    }
}

/// If `path2` is a child of `path1`, return the portion of `path2` relative to `path1`.
///
/// The empty path is the parent of every relative path.  No path is its own child.
pub fn is_child<'a>(path1: &str, path2: &'a str) -> Option<&'a str> {
    if path1.is_empty() {
        if path2.is_empty() || path2.starts_with('/') {
            return None;
        }
        return Some(path2);
    }
    let rest = path2.strip_prefix(path1)?;
    if let Some(child) = rest.strip_prefix('/') {
        if !child.is_empty() {
            return Some(child);
        }
    } else if !rest.is_empty() && path1 == "/" {
        return Some(rest);
    }
    None
}

/// True iff `path1` is `path2` or one of its ancestors.
///
/// The empty path is an ancestor of every relative path.
pub fn is_ancestor(path1: &str, path2: &str) -> bool {
    if path1.is_empty() {
        return !path2.starts_with('/');
    }
    match path2.strip_prefix(path1) {
        Some(rest) => path1.ends_with('/') || rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
