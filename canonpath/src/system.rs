//! The services canonpath needs from the operating system, expressed as traits so that callers
//! can substitute their own.

use std::ffi::{OsStr, OsString};

use biometrics::Counter;

use crate::algebra::split;
use crate::canonical::{canonicalize, local_style};
use crate::scheme::is_url;
use crate::Error;

//////////////////////////////////////////// biometrics ////////////////////////////////////////////

static GET_ABSOLUTE: Counter = Counter::new("canonpath.get_absolute");
static GET_ABSOLUTE_FAILED: Counter = Counter::new("canonpath.get_absolute.failed");
static SPLIT_IF_FILE: Counter = Counter::new("canonpath.split_if_file");
static SPLIT_IF_FILE_NEITHER: Counter = Counter::new("canonpath.split_if_file.neither");

pub(crate) fn register_biometrics(collector: &biometrics::Collector) {
    collector.register_counter(&GET_ABSOLUTE);
    collector.register_counter(&GET_ABSOLUTE_FAILED);
    collector.register_counter(&SPLIT_IF_FILE);
    collector.register_counter(&SPLIT_IF_FILE_NEITHER);
}

///////////////////////////////////////////// encoding /////////////////////////////////////////////

/// Convert a string provided by the operating system to UTF-8.
pub fn from_os_str(s: &OsStr) -> Result<&str, Error> {
    Ok(<&str>::try_from(s)?)
}

/// Convert a UTF-8 path to the operating system's encoding.
pub fn to_os_string(path: &str) -> OsString {
    OsString::from(path)
}

///////////////////////////////////////////// Resolver /////////////////////////////////////////////

/// A Resolver turns relative paths into absolute ones.
pub trait Resolver {
    /// Return an absolute path for `relative`.  The result need not be canonical.
    fn absolute(&self, relative: &str) -> Result<String, Error>;
}

///////////////////////////////////////////// FileType /////////////////////////////////////////////

/// The type of the object a path names.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FileType {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Something that exists but is neither file nor directory.
    Other,
    /// Nothing exists at the path.
    Missing,
}

/// A FileTypeProbe reports what kind of object a path names.
pub trait FileTypeProbe {
    /// Return the type of `path`.  Nonexistence is [FileType::Missing], not an error.
    fn file_type(&self, path: &str) -> Result<FileType, Error>;
}

////////////////////////////////////////////// System //////////////////////////////////////////////

/// System answers [Resolver] and [FileTypeProbe] queries using the process's working directory
/// and the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct System;

impl Resolver for System {
    fn absolute(&self, relative: &str) -> Result<String, Error> {
        let local = std::path::Path::new(relative);
        if local.is_absolute() {
            return Ok(relative.to_string());
        }
        let cwd = std::env::current_dir()?;
        let absolute = cwd.join(local);
        Ok(from_os_str(absolute.as_os_str())?.to_string())
    }
}

impl FileTypeProbe for System {
    fn file_type(&self, path: &str) -> Result<FileType, Error> {
        let path = if path.is_empty() { "." } else { path };
        match std::fs::metadata(path) {
            Ok(md) if md.is_file() => Ok(FileType::File),
            Ok(md) if md.is_dir() => Ok(FileType::Directory),
            Ok(_) => Ok(FileType::Other),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(FileType::Missing),
            Err(err) => Err(err.into()),
        }
    }
}

//////////////////////////////////////////// operations ////////////////////////////////////////////

/// Return the canonical absolute form of `relative`.  URLs are already absolute and are
/// returned unchanged.
pub fn get_absolute<R: Resolver + ?Sized>(resolver: &R, relative: &str) -> Result<String, Error> {
    GET_ABSOLUTE.click();
    if is_url(relative) {
        return Ok(relative.to_string());
    }
    match resolver.absolute(relative) {
        Ok(absolute) => Ok(canonicalize(&absolute)),
        Err(_) => {
            GET_ABSOLUTE_FAILED.click();
            Err(Error::cannot_resolve(&local_style(relative)))
        }
    }
}

/// Split `path` into directory and file, consulting the filesystem.
///
/// A directory splits into itself and the empty path.  A regular file, or a path that doesn't
/// exist, splits the same way as [split].  Anything else is an error.
pub fn split_if_file<'a, P: FileTypeProbe + ?Sized>(
    probe: &P,
    path: &'a str,
) -> Result<(&'a str, &'a str), Error> {
    SPLIT_IF_FILE.click();
    match probe.file_type(path)? {
        FileType::File | FileType::Missing => Ok(split(path)),
        FileType::Directory => Ok((path, "")),
        FileType::Other => {
            SPLIT_IF_FILE_NEITHER.click();
            Err(Error::not_file_or_directory(&local_style(path)))
        }
    }
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
