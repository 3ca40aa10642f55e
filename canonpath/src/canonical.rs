//! Canonicalization and conversion between the canonical and platform-local styles.

use biometrics::Counter;

use crate::scheme::{is_url, skip_scheme};
use crate::segment::{segments, SEPARATOR};

//////////////////////////////////////////// biometrics ////////////////////////////////////////////

static CANONICALIZE: Counter = Counter::new("canonpath.canonicalize");
static CANONICALIZE_URL: Counter = Counter::new("canonpath.canonicalize.url");
static CANONICALIZE_REWRITE: Counter = Counter::new("canonpath.canonicalize.rewrite");
static CANONICALIZE_SHARE_COLLAPSE: Counter = Counter::new("canonpath.canonicalize.share_collapse");

pub(crate) fn register_biometrics(collector: &biometrics::Collector) {
    collector.register_counter(&CANONICALIZE);
    collector.register_counter(&CANONICALIZE_URL);
    collector.register_counter(&CANONICALIZE_REWRITE);
    collector.register_counter(&CANONICALIZE_SHARE_COLLAPSE);
}

/////////////////////////////////////////////// Style //////////////////////////////////////////////

/// Style captures the platform variations of path handling.
///
/// Canonical paths always use `/` internally.  The style determines which separator the
/// platform uses locally and whether a leading `//` names a network share that must be
/// preserved.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Style {
    /// The separator the platform uses for local paths.
    pub separator: char,
    /// True if `//host/share` is a root that canonicalization must preserve.  This also enables
    /// drive-letter roots (`C:` and `C:/`).
    pub share_roots: bool,
}

impl Style {
    /// The style of POSIX systems.
    pub const POSIX: Style = Style {
        separator: '/',
        share_roots: false,
    };

    /// The style of Windows systems.
    pub const WINDOWS: Style = Style {
        separator: '\\',
        share_roots: true,
    };

    /// The style of the platform this was compiled for.
    pub const fn native() -> Style {
        if cfg!(windows) {
            Style::WINDOWS
        } else {
            Style::POSIX
        }
    }

    /// Return the canonical form of `path`.
    ///
    /// This is a total function.  Empty and `.` segments are dropped, as is any trailing
    /// separator; `..` segments are kept verbatim.  URLs keep their `scheme://` prefix and have
    /// only the remainder canonicalized, with `scheme:///` collapsing to `scheme://`.
    pub fn canonicalize(&self, path: &str) -> String {
        CANONICALIZE.click();
        if path.is_empty() {
            return String::new();
        }
        let bytes = path.as_bytes();
        let mut canon = String::with_capacity(path.len());
        let (url, mut src) = match skip_scheme(path) {
            Some(tail) => {
                CANONICALIZE_URL.click();
                canon.push_str(&path[..tail]);
                (true, tail)
            }
            None => (false, 0),
        };
        let prefix = canon.len();
        if bytes.get(src) == Some(&SEPARATOR) {
            canon.push('/');
            src += 1;
            // A share root keeps its second separator.  A URL's path never has one.
            if self.share_roots && !url && bytes.get(src) == Some(&SEPARATOR) {
                canon.push('/');
                src += 1;
            }
        }
        let tail = &path[src..];
        let mut canon_segments = 0usize;
        for (start, end) in segments(tail) {
            let segment = &tail[start..end];
            if segment.is_empty() || segment == "." {
                continue;
            }
            canon.push_str(segment);
            if end < tail.len() {
                canon.push('/');
            }
            canon_segments += 1;
        }
        if canon.ends_with('/') && (canon_segments > 0 || (url && &canon[prefix..] == "/")) {
            canon.pop();
        }
        // A share needs both a host and a share name.
        if self.share_roots && canon_segments < 2 && canon.starts_with("//") {
            CANONICALIZE_SHARE_COLLAPSE.click();
            canon.remove(0);
        }
        if canon != path {
            CANONICALIZE_REWRITE.click();
        }
        canon
    }

    /// True iff `path` is already in canonical form.
    pub fn is_canonical(&self, path: &str) -> bool {
        self.canonicalize(path) == path
    }

    /// True iff `path` names a root directory.
    ///
    /// `/` is always a root.  Styles with share roots also treat `X:`, `X:/`, `//host`, and
    /// `//host/share` as roots.
    pub fn is_root(&self, path: &str) -> bool {
        if path == "/" {
            return true;
        }
        if !self.share_roots {
            return false;
        }
        let bytes = path.as_bytes();
        if (bytes.len() == 2 || bytes.len() == 3)
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == b':'
            && (bytes.len() == 2 || bytes[2] == SEPARATOR)
        {
            return true;
        }
        if bytes.len() >= 2 && bytes.starts_with(b"//") && !path.ends_with('/') {
            return bytes[2..].iter().filter(|c| **c == SEPARATOR).count() <= 1;
        }
        false
    }

    /// Convert a path in the platform-local style to canonical form.
    pub fn internal_style(&self, path: &str) -> String {
        if self.separator == '/' {
            self.canonicalize(path)
        } else {
            self.canonicalize(&path.replace(self.separator, "/"))
        }
    }

    /// Convert a path into the platform-local style for display to users.
    ///
    /// The empty path renders as `.`, and URLs are left in canonical form.
    pub fn local_style(&self, path: &str) -> String {
        let canon = self.canonicalize(path);
        if canon.is_empty() {
            ".".to_string()
        } else if is_url(&canon) || self.separator == '/' {
            canon
        } else {
            canon.replace('/', self.separator.encode_utf8(&mut [0u8; 4]))
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::native()
    }
}

/// Return the canonical form of `path` using the native style.
pub fn canonicalize(path: &str) -> String {
    Style::native().canonicalize(path)
}

/// True iff `path` is canonical under the native style.
pub fn is_canonical(path: &str) -> bool {
    Style::native().is_canonical(path)
}

/// True iff `path` is a root under the native style.
pub fn is_root(path: &str) -> bool {
    Style::native().is_root(path)
}

/// Convert a native local-style path to canonical form.
pub fn internal_style(path: &str) -> String {
    Style::native().internal_style(path)
}

/// Convert a canonical path to the native local style.
pub fn local_style(path: &str) -> String {
    Style::native().local_style(path)
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
