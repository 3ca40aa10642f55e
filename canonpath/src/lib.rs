#![doc = include_str!("../README.md")]

pub mod algebra;
pub mod buf;
pub mod canonical;
pub mod escape;
pub mod order;
pub mod path;
pub mod scheme;
pub mod segment;
pub mod system;

pub use algebra::{
    basename, compose, decompose, dirname, is_backpath_present, is_empty,
    is_single_path_component, join, join_many, split, splitext, url_add_component,
};
pub use buf::PathBuf;
pub use canonical::{canonicalize, internal_style, is_canonical, is_root, local_style, Style};
pub use escape::{
    check_valid, escape_control_chars, is_uri_safe, uri_autoescape, uri_decode, uri_encode,
    uri_from_iri,
};
pub use order::{compare, is_ancestor, is_child, longest_ancestor};
pub use path::Path;
pub use scheme::is_url;
pub use system::{get_absolute, split_if_file, FileType, FileTypeProbe, Resolver, System};

///////////////////////////////////////////// biometrics ///////////////////////////////////////////

/// Register every canonpath counter with `collector`.
pub fn register_biometrics(collector: &biometrics::Collector) {
    canonical::register_biometrics(collector);
    algebra::register_biometrics(collector);
    escape::register_biometrics(collector);
    system::register_biometrics(collector);
}

/////////////////////////////////////////////// Error //////////////////////////////////////////////

/// The Error type.
#[derive(Debug)]
pub enum Error {
    /// The path could not be made absolute.
    CannotResolve {
        /// The path that could not be resolved, rendered for display.
        path: String,
    },
    /// The path exists but is neither a regular file nor a directory.
    NotFileOrDirectory {
        /// The offending path, rendered for display.
        path: String,
    },
    /// The path contains a control character.
    InvalidControlCharacter {
        /// The first control character found.
        byte: u8,
        /// The path with control characters escaped.
        path: String,
    },
    /// An error from the standard library.
    IoError(std::io::Error),
    /// An error relating to utf8.
    Utf8Error(std::str::Utf8Error),
    /// An error relating to utf8.
    FromUtf8Error(std::string::FromUtf8Error),
}

impl Error {
    /// Construct a new "CannotResolve" variant.
    pub fn cannot_resolve(path: &str) -> Self {
        Self::CannotResolve {
            path: escape_control_chars(path).into_owned(),
        }
    }

    /// Construct a new "NotFileOrDirectory" variant.
    pub fn not_file_or_directory(path: &str) -> Self {
        Self::NotFileOrDirectory {
            path: escape_control_chars(path).into_owned(),
        }
    }

    /// Construct a new "InvalidControlCharacter" variant.
    pub fn invalid_control_character(byte: u8, path: &str) -> Self {
        Self::InvalidControlCharacter {
            byte,
            path: escape_control_chars(path).into_owned(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::Utf8Error(err)
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::FromUtf8Error(err)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::CannotResolve { path } => {
                write!(f, "Couldn't determine absolute path of '{path}'")
            }
            Error::NotFileOrDirectory { path } => {
                write!(f, "'{path}' is neither a file nor a directory")
            }
            Error::InvalidControlCharacter { byte, path } => {
                write!(
                    f,
                    "Invalid control character '0x{byte:02x}' in path '{path}'"
                )
            }
            Error::IoError(err) => write!(f, "I/O error: {err}"),
            Error::Utf8Error(err) => write!(f, "UTF-8 error: {err}"),
            Error::FromUtf8Error(err) => write!(f, "UTF-8 error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
