//! Joining, splitting, and decomposing canonical paths.
//!
//! Every function here expects canonical input and produces canonical output.  None of them
//! canonicalize on the caller's behalf.

use biometrics::Counter;

use crate::canonical::canonicalize;
use crate::escape::uri_encode;
use crate::scheme::is_url;
use crate::segment::{final_segment_start, looks_canonical, previous_segment, segments};

//////////////////////////////////////////// biometrics ////////////////////////////////////////////

static JOIN: Counter = Counter::new("canonpath.join");
static JOIN_ABSOLUTE: Counter = Counter::new("canonpath.join.absolute");
static JOIN_MANY: Counter = Counter::new("canonpath.join_many");
static JOIN_MANY_RESET: Counter = Counter::new("canonpath.join_many.reset");

pub(crate) fn register_biometrics(collector: &biometrics::Collector) {
    collector.register_counter(&JOIN);
    collector.register_counter(&JOIN_ABSOLUTE);
    collector.register_counter(&JOIN_MANY);
    collector.register_counter(&JOIN_MANY_RESET);
}

/////////////////////////////////////////////// join ///////////////////////////////////////////////

/// True iff `path` is the canonical empty path.
pub fn is_empty(path: &str) -> bool {
    path.is_empty()
}

/// Join `component` onto `base`.
///
/// An absolute component or a URL replaces the base outright, the same way `cd /abs` discards
/// the current directory.  The empty path is the identity on either side.
pub fn join(base: &str, component: &str) -> String {
    debug_assert!(looks_canonical(base), "non-canonical base: {base:?}");
    debug_assert!(
        looks_canonical(component),
        "non-canonical component: {component:?}"
    );
    JOIN.click();
    if replaces_base(component) {
        JOIN_ABSOLUTE.click();
        return component.to_string();
    }
    if base.is_empty() {
        return component.to_string();
    }
    if component.is_empty() {
        return base.to_string();
    }
    let base = if base == "/" { "" } else { base };
    let mut path = String::with_capacity(base.len() + 1 + component.len());
    path.push_str(base);
    path.push('/');
    path.push_str(component);
    path
}

/// Join every one of `components` onto `base`, in order.
///
/// The result is identical to folding [join] over the components, but it is built with a
/// single allocation:  the first pass sizes the output, the second materializes it.
pub fn join_many<S: AsRef<str>>(base: &str, components: &[S]) -> String {
    debug_assert!(looks_canonical(base), "non-canonical base: {base:?}");
    JOIN_MANY.click();
    // First pass:  find the last absolute component and size everything that follows it.
    let mut start = None;
    let mut total = base.len();
    let mut is_root = base == "/";
    for (idx, component) in components.iter().enumerate() {
        let component = component.as_ref();
        debug_assert!(
            looks_canonical(component),
            "non-canonical component: {component:?}"
        );
        if component.is_empty() {
            continue;
        }
        if replaces_base(component) {
            start = Some(idx);
            total = component.len();
            is_root = component.len() == 1;
        } else if total == 0 || is_root {
            total += component.len();
            is_root = false;
        } else {
            total += 1 + component.len();
        }
    }
    // Second pass:  copy.
    let mut path = String::with_capacity(total);
    let rest = match start {
        Some(idx) => {
            JOIN_MANY_RESET.click();
            path.push_str(components[idx].as_ref());
            &components[idx + 1..]
        }
        None => {
            path.push_str(base);
            components
        }
    };
    let mut is_root = path == "/";
    for component in rest.iter().map(|c| c.as_ref()) {
        if component.is_empty() {
            continue;
        }
        if !path.is_empty() && !is_root {
            path.push('/');
        }
        path.push_str(component);
        is_root = false;
    }
    debug_assert_eq!(total, path.len());
    path
}

fn replaces_base(component: &str) -> bool {
    component.starts_with('/') || is_url(component)
}

/// Canonicalize `url` and join the URI-encoded `component` onto it.
pub fn url_add_component(url: &str, component: &str) -> String {
    let url = canonicalize(url);
    join(&url, &uri_encode(component))
}

//////////////////////////////////////////// components ////////////////////////////////////////////

/// Count the components of `path`.  Separators, whether leading, trailing, or repeated, never
/// contribute to the count.
pub fn component_count(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

/// Return the directory portion of `path`:  everything before the final segment.
///
/// The dirname of a single relative segment is the empty path; the dirname of the root, or of
/// a single absolute segment, is the root.
pub fn dirname(path: &str) -> &str {
    debug_assert!(looks_canonical(path), "non-canonical path: {path:?}");
    &path[..previous_segment(path)]
}

/// Return the final segment of `path`.  The basename of the root is the root.
pub fn basename(path: &str) -> &str {
    debug_assert!(looks_canonical(path), "non-canonical path: {path:?}");
    &path[final_segment_start(path)..]
}

/// Split `path` into its dirname and basename.
pub fn split(path: &str) -> (&str, &str) {
    (dirname(path), basename(path))
}

/// Break `path` into its components.
///
/// An absolute path yields `/` as its first component.  Unlike canonicalization, decomposition
/// preserves empty segments; both empty segments and `.` segments are returned as the empty
/// string so that degenerate inputs survive a round trip through [compose].
pub fn decompose(path: &str) -> Vec<&str> {
    let mut components = Vec::new();
    if path.is_empty() {
        return components;
    }
    let rest = if let Some(rest) = path.strip_prefix('/') {
        components.push(&path[..1]);
        if rest.is_empty() {
            return components;
        }
        rest
    } else {
        path
    };
    for (start, end) in segments(rest) {
        let segment = &rest[start..end];
        components.push(if segment == "." { "" } else { segment });
    }
    components
}

/// Build a path out of `components`.  This is the left inverse of [decompose] for canonical,
/// non-URL paths.
pub fn compose<S: AsRef<str>>(components: &[S]) -> String {
    let total = components.len() + components.iter().map(|c| c.as_ref().len()).sum::<usize>();
    let mut path = String::with_capacity(total);
    for (idx, component) in components.iter().enumerate() {
        if idx > 1 || (idx == 1 && components[0].as_ref() != "/") {
            path.push('/');
        }
        path.push_str(component.as_ref());
    }
    path
}

/// True iff `name` is a single path component:  non-empty, free of separators, and not `..`.
pub fn is_single_path_component(name: &str) -> bool {
    !name.is_empty() && name != ".." && !name.contains('/')
}

/// True iff `..` appears as a whole segment anywhere in `path`.
pub fn is_backpath_present(path: &str) -> bool {
    path == ".."
        || path.starts_with("../")
        || path.contains("/../")
        || path.ends_with("/..")
}

/// Split `path` into a root and an extension at the last `.` of its final segment.
///
/// The root keeps the dot, so `root + ext` reproduces the path.  A dot that begins the final
/// segment (as in `.bashrc`) is not an extension separator; without a suitable dot the whole
/// path is the root and the extension is empty.
pub fn splitext(path: &str) -> (&str, &str) {
    if let Some(dot) = path.rfind('.') {
        let qualifies = match path.rfind('/') {
            Some(slash) => dot > slash + 1,
            None => dot > 0,
        };
        if qualifies {
            return path.split_at(dot + 1);
        }
    }
    (path, "")
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCase<'a> {
        path: &'a str,
        dirname: &'a str,
        basename: &'a str,
        count: usize,
        components: &'a [&'a str],
    }

    static TEST_CASES: &[TestCase] = &[
        TestCase {
            path: "",
            dirname: "",
            basename: "",
            count: 0,
            components: &[],
        },
        TestCase {
            path: "/",
            dirname: "/",
            basename: "/",
            count: 0,
            components: &["/"],
        },
        TestCase {
            path: "foo",
            dirname: "",
            basename: "foo",
            count: 1,
            components: &["foo"],
        },
        TestCase {
            path: "/foo",
            dirname: "/",
            basename: "foo",
            count: 1,
            components: &["/", "foo"],
        },
        TestCase {
            path: "foo/bar",
            dirname: "foo",
            basename: "bar",
            count: 2,
            components: &["foo", "bar"],
        },
        TestCase {
            path: "/a/b/c",
            dirname: "/a/b",
            basename: "c",
            count: 3,
            components: &["/", "a", "b", "c"],
        },
        TestCase {
            path: "../foo",
            dirname: "..",
            basename: "foo",
            count: 2,
            components: &["..", "foo"],
        },
        TestCase {
            path: "http://host/repos/trunk",
            dirname: "http://host/repos",
            basename: "trunk",
            count: 4,
            components: &["http:", "", "host", "repos", "trunk"],
        },
    ];

    #[test]
    fn dirname_basename_split() {
        for tc in TEST_CASES.iter() {
            assert_eq!(tc.dirname, dirname(tc.path), "path: {:?}", tc.path);
            assert_eq!(tc.basename, basename(tc.path), "path: {:?}", tc.path);
            assert_eq!((tc.dirname, tc.basename), split(tc.path), "path: {:?}", tc.path);
        }
    }

    #[test]
    fn counts() {
        for tc in TEST_CASES.iter() {
            assert_eq!(tc.count, component_count(tc.path), "path: {:?}", tc.path);
        }
        assert_eq!(2, component_count("/a//b/"));
        assert_eq!(0, component_count("///"));
    }

    #[test]
    fn decompose_compose() {
        for tc in TEST_CASES.iter() {
            let components = decompose(tc.path);
            assert_eq!(tc.components, &components[..], "path: {:?}", tc.path);
            assert_eq!(tc.path, compose(&components), "path: {:?}", tc.path);
        }
    }

    #[test]
    fn decompose_degenerate() {
        assert_eq!(vec!["/", "", "a"], decompose("//a"));
        assert_eq!(vec!["a", ""], decompose("a/"));
        assert_eq!(vec!["a", "", "b"], decompose("a/./b"));
        assert_eq!(vec![""], decompose("."));
        assert_eq!("//a", compose(&decompose("//a")));
        assert_eq!("a/", compose(&decompose("a/")));
    }

    #[test]
    fn compose_owned_components() {
        let components = vec!["/".to_string(), "x".to_string(), "y".to_string()];
        assert_eq!("/x/y", compose(&components));
        assert_eq!("", compose::<&str>(&[]));
    }

    #[test]
    fn join_pairs() {
        assert_eq!("abc/def", join("abc", "def"));
        assert_eq!("abc/def/ghi", join("abc", "def/ghi"));
        assert_eq!("/abc", join("/", "abc"));
        assert_eq!("/def", join("abc", "/def"));
        assert_eq!("/", join("abc", "/"));
        assert_eq!("/", join("/", ""));
        assert_eq!("/", join("", "/"));
        assert_eq!("abc", join("", "abc"));
        assert_eq!("abc", join("abc", ""));
        assert_eq!("", join("", ""));
        assert_eq!("http://host/a", join("http://host", "a"));
        assert_eq!("http://other", join("/a", "http://other"));
    }

    #[test]
    fn join_many_matches_join() {
        let cases: &[(&str, &[&str], &str)] = &[
            ("abc", &[], "abc"),
            ("/", &[], "/"),
            ("", &[], ""),
            ("abc", &["def", "ghi"], "abc/def/ghi"),
            ("/", &["a", "b"], "/a/b"),
            ("", &["a", "b"], "a/b"),
            ("", &["", "a", "", "b", ""], "a/b"),
            ("abc", &["/def", "ghi"], "/def/ghi"),
            ("abc", &["def", "/"], "/"),
            ("abc", &["def", "/", "ghi"], "/ghi"),
            ("abc", &["/x", "y", "/z"], "/z"),
            ("/", &["", ""], "/"),
            ("", &["/", "a"], "/a"),
            ("/a", &["b", "http://host", "c"], "http://host/c"),
        ];
        for (base, components, expected) in cases.iter() {
            assert_eq!(
                *expected,
                join_many(base, &components[..]),
                "{base:?} {components:?}"
            );
            let folded = components
                .iter()
                .fold(base.to_string(), |acc, c| join(&acc, c));
            assert_eq!(*expected, folded, "{base:?} {components:?}");
        }
    }

    #[test]
    fn single_path_component() {
        assert!(is_single_path_component("foo"));
        assert!(is_single_path_component("."));
        assert!(is_single_path_component("..."));
        assert!(!is_single_path_component(""));
        assert!(!is_single_path_component(".."));
        assert!(!is_single_path_component("foo/bar"));
        assert!(!is_single_path_component("/"));
    }

    #[test]
    fn backpath() {
        assert!(is_backpath_present(".."));
        assert!(is_backpath_present("../foo"));
        assert!(is_backpath_present("foo/../bar"));
        assert!(is_backpath_present("foo/.."));
        assert!(!is_backpath_present(""));
        assert!(!is_backpath_present("..foo"));
        assert!(!is_backpath_present("foo.."));
        assert!(!is_backpath_present("foo/..bar/baz"));
        assert!(!is_backpath_present("/foo/bar.."));
    }

    #[test]
    fn extensions() {
        assert_eq!(("foo.", "txt"), splitext("foo.txt"));
        assert_eq!(("/a/b/foo.tar.", "gz"), splitext("/a/b/foo.tar.gz"));
        assert_eq!(("foo.", ""), splitext("foo."));
        assert_eq!((".bashrc", ""), splitext(".bashrc"));
        assert_eq!(("a/.bashrc", ""), splitext("a/.bashrc"));
        assert_eq!(("a.b/c", ""), splitext("a.b/c"));
        assert_eq!(("", ""), splitext(""));
    }

    #[test]
    fn url_components() {
        assert_eq!("http://host/a%20b", url_add_component("http://host/", "a b"));
        assert_eq!("http://host/x/y", url_add_component("http://host/x", "y"));
    }
}
