use std::borrow::Cow;
use std::cmp::Ordering;

use crate::algebra;
use crate::canonical::{canonicalize, is_root, local_style};
use crate::escape::{is_uri_safe, uri_encode};
use crate::order;
use crate::scheme::is_url;

/////////////////////////////////////////////// Path ///////////////////////////////////////////////

/// Path is a canonical path or URL that borrows its string when it can.
///
/// Every constructor canonicalizes, so two Paths are equal exactly when they name the same
/// location.  Paths order the way [order::compare] orders them:  directories first, then their
/// descendants.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Path<'a> {
    path: Cow<'a, str>,
}

impl<'a> Path<'a> {
    /// Create a new path from `s`.  The string is borrowed when it is already canonical and
    /// copied into canonical form otherwise.
    pub fn new(s: &'a str) -> Self {
        let canon = canonicalize(s);
        if canon == s {
            Self::from_canonical(s)
        } else {
            Self::from_canonical(canon)
        }
    }

    fn from_canonical(path: impl Into<Cow<'a, str>>) -> Self {
        let path = path.into();
        debug_assert_eq!(canonicalize(&path), path, "non-canonical path");
        Self { path }
    }

    /// Convert the path into an owned path.
    pub fn into_owned(self) -> Path<'static> {
        Path {
            path: Cow::Owned(self.path.into_owned()),
        }
    }

    /// Convert the path to a str.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// True iff this is the empty path.
    pub fn is_empty(&self) -> bool {
        algebra::is_empty(&self.path)
    }

    /// True iff the path is a URL.
    pub fn is_url(&self) -> bool {
        is_url(&self.path)
    }

    /// True iff the path is a URL or begins at the root.
    pub fn is_absolute(&self) -> bool {
        self.path.starts_with('/') || self.is_url()
    }

    /// True iff the path is a root on this platform.
    pub fn is_root(&self) -> bool {
        is_root(&self.path)
    }

    /// Join `component` onto this path.  An absolute component replaces this path.
    pub fn join<'b>(&self, component: impl Into<Path<'b>>) -> Path<'static> {
        let component = component.into();
        Path::from(algebra::join(&self.path, &component.path))
    }

    /// Join every one of `components` onto this path, in order.
    pub fn join_many(&self, components: &[Path<'_>]) -> Path<'static> {
        Path::from(algebra::join_many(&self.path, components))
    }

    /// The directory portion of the path.  The dirname of a bare `scheme://host` is `scheme:`.
    pub fn dirname(&self) -> Path<'_> {
        Path::new(algebra::dirname(&self.path))
    }

    /// The final segment of the path.
    pub fn basename(&self) -> Path<'_> {
        Path::new(algebra::basename(&self.path))
    }

    /// Split the path into dirname and basename.
    pub fn split(&self) -> (Path<'_>, Path<'_>) {
        (self.dirname(), self.basename())
    }

    /// The components of the path.  An absolute path begins with the root.
    pub fn components(&self) -> impl Iterator<Item = Path<'_>> {
        algebra::decompose(&self.path)
            .into_iter()
            .map(Path::new)
    }

    /// The number of non-root components in the path.
    pub fn component_count(&self) -> usize {
        algebra::component_count(&self.path)
    }

    /// If `other` is a child of this path, the portion of `other` relative to this path.
    pub fn is_child<'b>(&self, other: &'b Path<'_>) -> Option<Path<'b>> {
        order::is_child(&self.path, other.as_str()).map(Path::new)
    }

    /// True iff this path is `other` or one of its ancestors.
    pub fn is_ancestor(&self, other: &Path<'_>) -> bool {
        order::is_ancestor(&self.path, &other.path)
    }

    /// The longest path that is an ancestor of both this path and `other`.
    pub fn longest_ancestor(&self, other: &Path<'_>) -> Path<'_> {
        Path::new(order::longest_ancestor(&self.path, &other.path))
    }

    /// Split the path into root and extension.  See [algebra::splitext].
    pub fn splitext(&self) -> (&str, &str) {
        algebra::splitext(&self.path)
    }

    /// True iff `..` appears as a component of the path.
    pub fn is_backpath_present(&self) -> bool {
        algebra::is_backpath_present(&self.path)
    }

    /// True iff the path needs no percent-encoding.
    pub fn is_uri_safe(&self) -> bool {
        is_uri_safe(&self.path)
    }

    /// The percent-encoded form of the path.
    pub fn uri_encode(&self) -> Cow<'_, str> {
        uri_encode(&self.path)
    }

    /// Render the path for display on this platform.
    pub fn local_style(&self) -> String {
        local_style(&self.path)
    }
}

impl<'a> Ord for Path<'a> {
    fn cmp(&self, other: &Self) -> Ordering {
        order::compare(&self.path, &other.path)
    }
}

impl<'a> PartialOrd for Path<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> AsRef<str> for Path<'a> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<'a> AsRef<std::path::Path> for Path<'a> {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(self.as_str())
    }
}

impl<'a> std::fmt::Debug for Path<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self.path)
    }
}

impl<'a> std::fmt::Display for Path<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{}", self.path)
    }
}

impl<'a> From<String> for Path<'a> {
    fn from(s: String) -> Self {
        let canon = canonicalize(&s);
        if canon == s {
            Self::from_canonical(s)
        } else {
            Self::from_canonical(canon)
        }
    }
}

impl<'a> From<&'a str> for Path<'a> {
    fn from(s: &'a str) -> Self {
        Self::new(s)
    }
}

impl<'a> From<Path<'a>> for String {
    fn from(path: Path<'a>) -> Self {
        path.path.into_owned()
    }
}

impl<'a> TryFrom<&'a std::path::Path> for Path<'a> {
    type Error = crate::Error;

    fn try_from(p: &'a std::path::Path) -> Result<Self, Self::Error> {
        Ok(Path::new(crate::system::from_os_str(p.as_os_str())?))
    }
}

impl<'a> TryFrom<std::path::PathBuf> for Path<'a> {
    type Error = crate::Error;

    fn try_from(p: std::path::PathBuf) -> Result<Self, Self::Error> {
        Self::try_from(p.into_os_string())
    }
}

impl<'a> TryFrom<std::ffi::OsString> for Path<'a> {
    type Error = crate::Error;

    fn try_from(p: std::ffi::OsString) -> Result<Self, Self::Error> {
        Ok(Path::from(crate::system::from_os_str(&p)?.to_string()))
    }
}

impl<'a> From<Path<'a>> for std::path::PathBuf {
    fn from(path: Path<'a>) -> Self {
        std::path::PathBuf::from(path.local_style())
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_borrows_canonical_input() {
        assert!(matches!(Path::new("/a/b").path, Cow::Borrowed(_)));
        assert!(matches!(Path::new("/a//b/").path, Cow::Owned(_)));
        assert_eq!("/a/b", Path::new("/a//b/").as_str());
        assert_eq!("", Path::new(".").as_str());
        assert_eq!(Path::new("a/./b"), Path::from(String::from("a/b/")));
    }

    #[test]
    fn predicates() {
        assert!(Path::new("").is_empty());
        assert!(Path::new("./").is_empty());
        assert!(Path::new("/").is_root());
        assert!(Path::new("/").is_absolute());
        assert!(Path::new("svn://host/repo").is_absolute());
        assert!(Path::new("svn://host/repo").is_url());
        assert!(!Path::new("a/b").is_absolute());
        assert!(Path::new("a/../b").is_backpath_present());
        assert!(!Path::new("a/..b").is_backpath_present());
    }

    #[test]
    fn join() {
        let base = Path::new("/trunk");
        assert_eq!(Path::new("/trunk/a/b"), base.join("a/b/"));
        assert_eq!(Path::new("/tags"), base.join("/tags"));
        assert_eq!(Path::new("/trunk"), base.join(""));
        assert_eq!(
            Path::new("/trunk/a/b/c"),
            base.join_many(&[Path::new("a"), Path::new(""), Path::new("b/c")])
        );
        assert_eq!(
            Path::new("/x/y"),
            base.join_many(&[Path::new("a"), Path::new("/x"), Path::new("y")])
        );
    }

    #[test]
    fn split_and_components() {
        let path = Path::new("/a/b/c.txt");
        let (dirname, basename) = path.split();
        assert_eq!("/a/b", dirname.as_str());
        assert_eq!("c.txt", basename.as_str());
        assert_eq!(("/a/b/c.", "txt"), path.splitext());
        assert_eq!(3, path.component_count());
        let components: Vec<_> = path.components().map(|c| c.to_string()).collect();
        assert_eq!(vec!["/", "a", "b", "c.txt"], components);
    }

    #[test]
    fn url_without_path() {
        let url = Path::new("http://host");
        assert_eq!(Path::new("http:"), url.dirname());
        assert_eq!("host", url.basename().as_str());
        let (dirname, basename) = url.split();
        assert_eq!("http:", dirname.as_str());
        assert_eq!("host", basename.as_str());
        assert_eq!(Path::new("http://host/trunk"), url.join("trunk"));
        let components: Vec<_> = url.components().map(|c| c.to_string()).collect();
        assert_eq!(vec!["http:", "", "host"], components);
    }

    #[test]
    fn ancestry() {
        let parent = Path::new("/a/b");
        let child = Path::new("/a/b/c/d");
        let cousin = Path::new("/a/x");
        assert_eq!(Some(Path::new("c/d")), parent.is_child(&child));
        assert_eq!(None, child.is_child(&parent));
        assert!(parent.is_ancestor(&child));
        assert!(parent.is_ancestor(&parent));
        assert_eq!(Path::new("/a"), child.longest_ancestor(&cousin));
    }

    #[test]
    fn ordering() {
        let mut paths = vec![
            Path::new("a-b"),
            Path::new("a/b"),
            Path::new("a"),
            Path::new("a/b/c"),
        ];
        paths.sort();
        let paths: Vec<_> = paths.iter().map(Path::as_str).collect();
        assert_eq!(vec!["a", "a/b", "a/b/c", "a-b"], paths);
    }

    #[test]
    fn escaping() {
        let path = Path::new("/a b/c");
        assert!(!path.is_uri_safe());
        assert_eq!("/a%20b/c", path.uri_encode());
        assert!(Path::new("http://host/ab/c%20d").is_uri_safe());
        assert!(!Path::new("http://host/a b").is_uri_safe());
    }

    #[test]
    fn std_conversions() {
        let path = Path::try_from(std::path::Path::new("/tmp//x/")).unwrap();
        assert_eq!("/tmp/x", path.as_str());
        let path = Path::try_from(std::path::PathBuf::from("rel/./y")).unwrap();
        assert_eq!("rel/y", path.as_str());
        let std: std::path::PathBuf = Path::new("").into();
        assert_eq!(std::path::PathBuf::from("."), std);
    }
}
