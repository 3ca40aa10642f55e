use crate::path::Path;
use crate::segment::{looks_canonical, previous_segment};

////////////////////////////////////////////// PathBuf /////////////////////////////////////////////

/// PathBuf is a growable canonical path that gets edited in place one component at a time.
///
/// It never shares storage with a [Path]; converting between the two copies or moves the
/// underlying string.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct PathBuf {
    path: String,
}

impl PathBuf {
    /// Create a new, empty path buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// View the buffer as a str.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Borrow the buffer as a [Path].
    pub fn as_path(&self) -> Path<'_> {
        Path::new(&self.path)
    }

    /// Convert the buffer into an owned [Path].
    pub fn into_path(self) -> Path<'static> {
        Path::from(self.path)
    }

    /// True iff the buffer holds the empty path.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Append `component` to the path, inserting a separator unless the buffer is empty or is
    /// the root.  Appending the empty path leaves the buffer unchanged.
    pub fn add_component(&mut self, component: &str) {
        debug_assert!(looks_canonical(&self.path), "non-canonical path: {self:?}");
        debug_assert!(
            looks_canonical(component),
            "non-canonical component: {component:?}"
        );
        if component.is_empty() {
            return;
        }
        if !self.path.is_empty() && self.path != "/" {
            self.path.push('/');
        }
        self.path.push_str(component);
    }

    /// Remove the final component of the path.  The root is never removed, and removing from
    /// the empty path leaves it empty.
    pub fn remove_component(&mut self) {
        debug_assert!(looks_canonical(&self.path), "non-canonical path: {self:?}");
        let len = previous_segment(&self.path);
        self.path.truncate(len);
        // Removing the authority of a URL leaves `scheme:/` behind.
        if !looks_canonical(&self.path) {
            self.path.pop();
        }
    }

    /// Remove the final `n` components of the path.
    pub fn remove_components(&mut self, n: usize) {
        for _ in 0..n {
            self.remove_component();
        }
    }
}

impl<'a> From<Path<'a>> for PathBuf {
    fn from(path: Path<'a>) -> Self {
        Self {
            path: path.into(),
        }
    }
}

impl From<PathBuf> for String {
    fn from(buf: PathBuf) -> Self {
        buf.path
    }
}

impl AsRef<str> for PathBuf {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for PathBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{}", self.path)
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
