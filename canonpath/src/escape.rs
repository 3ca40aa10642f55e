//! Percent-encoding for URLs and control-character escaping for display.
//!
//! Each escaping routine is driven by a 256-entry table that says which bytes pass through
//! untouched.  Every table treats all bytes at or above 0x80 alike, so a multi-byte character
//! is either copied whole or escaped byte by byte.

use std::borrow::Cow;
use std::fmt::Write;

use biometrics::Counter;

use crate::canonical::local_style;
use crate::scheme::skip_scheme;
use crate::Error;

//////////////////////////////////////////// biometrics ////////////////////////////////////////////

static ESCAPE: Counter = Counter::new("canonpath.escape");
static ESCAPE_COPY: Counter = Counter::new("canonpath.escape.copy");
static DECODE: Counter = Counter::new("canonpath.decode");
static INVALID_CONTROL_CHARACTER: Counter = Counter::new("canonpath.invalid_control_character");

pub(crate) fn register_biometrics(collector: &biometrics::Collector) {
    collector.register_counter(&ESCAPE);
    collector.register_counter(&ESCAPE_COPY);
    collector.register_counter(&DECODE);
    collector.register_counter(&INVALID_CONTROL_CHARACTER);
}

////////////////////////////////////////////// tables //////////////////////////////////////////////

/// A table of the bytes that pass through an escaping routine unchanged.
pub type Table = [bool; 256];

macro_rules! table {
    ($passes:ident) => {{
        let mut table = [false; 256];
        let mut idx = 0;
        while idx < 256 {
            table[idx] = $passes(idx as u8);
            idx += 1;
        }
        table
    }};
}

// pchar = unreserved | ":" | "@" | "&" | "=" | "+" | "$" | ","
// unreserved = alphanum | "-" | "_" | "." | "!" | "~" | "*" | "'" | "(" | ")"
//
// "/" also passes so that whole paths can be encoded at once.
const fn uri_safe(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            b'!' | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b'-'
                | b'.'
                | b'/'
                | b':'
                | b'='
                | b'@'
                | b'_'
                | b'~'
        )
}

const fn iri_safe(c: u8) -> bool {
    c.is_ascii()
}

const fn autoescape_safe(c: u8) -> bool {
    !c.is_ascii_control()
        && !matches!(
            c,
            b' ' | b'"' | b'<' | b'>' | b'\\' | b'^' | b'`' | b'{' | b'|' | b'}'
        )
}

/// The bytes that may appear unescaped in the path of a URI.
pub static URI_SAFE: Table = table!(uri_safe);
/// The bytes that an IRI may carry into a URI unescaped:  everything but non-ASCII.
pub static IRI_SAFE: Table = table!(iri_safe);
/// The bytes that are safe to leave raw in an otherwise-valid URI.  Existing `%XX` escapes and
/// reserved delimiters are left alone.
pub static AUTOESCAPE_SAFE: Table = table!(autoescape_safe);

///////////////////////////////////////////// escaping /////////////////////////////////////////////

/// Escape every byte of `path` that doesn't pass `table` as `%XX` with uppercase hex digits.
///
/// When nothing needs escaping the input is returned borrowed.
pub fn uri_escape<'a>(path: &'a str, table: &Table) -> Cow<'a, str> {
    ESCAPE.click();
    let mut escaped = String::new();
    let mut copied = 0;
    for (idx, c) in path.char_indices() {
        let mut utf8 = [0u8; 4];
        let bytes = c.encode_utf8(&mut utf8).as_bytes();
        if bytes.iter().all(|b| table[*b as usize]) {
            continue;
        }
        escaped.push_str(&path[copied..idx]);
        for b in bytes {
            // Writing to a String cannot fail.
            let _ = write!(escaped, "%{:02X}", b);
        }
        copied = idx + c.len_utf8();
    }
    if copied == 0 {
        return Cow::Borrowed(path);
    }
    ESCAPE_COPY.click();
    escaped.push_str(&path[copied..]);
    Cow::Owned(escaped)
}

/// Percent-encode every byte of `path` that may not appear in the path of a URI.
pub fn uri_encode(path: &str) -> Cow<'_, str> {
    uri_escape(path, &URI_SAFE)
}

/// Convert an IRI to a URI by percent-encoding its non-ASCII bytes.
pub fn uri_from_iri(iri: &str) -> Cow<'_, str> {
    uri_escape(iri, &IRI_SAFE)
}

/// Percent-encode the bytes that are unsafe to leave raw in an otherwise-valid URI.
pub fn uri_autoescape(uri: &str) -> Cow<'_, str> {
    uri_escape(uri, &AUTOESCAPE_SAFE)
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn hex_pair(bytes: &[u8], idx: usize) -> Option<u8> {
    let hi = hex_value(*bytes.get(idx)?)?;
    let lo = hex_value(*bytes.get(idx + 1)?)?;
    Some((hi << 4) | lo)
}

/// Decode the `%XX` escapes in `path`.
///
/// A `%` that isn't followed by two hex digits is copied literally.  Once a `?` has been seen,
/// every later `+` decodes to a space, per the query-string convention.  The result may be
/// arbitrary bytes.
pub fn uri_decode(path: &str) -> Vec<u8> {
    DECODE.click();
    let bytes = path.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut query = false;
    let mut idx = 0;
    while idx < bytes.len() {
        let mut c = bytes[idx];
        if c == b'?' {
            query = true;
        } else if c == b'+' && query {
            c = b' ';
        } else if c == b'%' {
            if let Some(x) = hex_pair(bytes, idx + 1) {
                c = x;
                idx += 2;
            }
        }
        decoded.push(c);
        idx += 1;
    }
    decoded
}

/// Decode `path` like [uri_decode] and require the result to be UTF-8.
pub fn uri_decode_utf8(path: &str) -> Result<String, Error> {
    Ok(String::from_utf8(uri_decode(path))?)
}

/// True iff everything after the first `/` following the scheme of `path` is URI-safe or a
/// well-formed `%XX` escape.  Paths that aren't URLs are never URI-safe.
pub fn is_uri_safe(path: &str) -> bool {
    let Some(tail) = skip_scheme(path) else {
        return false;
    };
    let Some(slash) = path[tail..].find('/') else {
        return true;
    };
    let bytes = &path.as_bytes()[tail + slash..];
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            if hex_pair(bytes, idx + 1).is_none() {
                return false;
            }
            idx += 3;
        } else if URI_SAFE[bytes[idx] as usize] {
            idx += 1;
        } else {
            return false;
        }
    }
    true
}

///////////////////////////////////////// control characters ///////////////////////////////////////

/// Escape the control characters of `path` as a backslash followed by three octal digits.
pub fn escape_control_chars(path: &str) -> Cow<'_, str> {
    if !path.bytes().any(|b| b.is_ascii_control()) {
        return Cow::Borrowed(path);
    }
    let mut escaped = String::with_capacity(path.len() + 8);
    for c in path.chars() {
        if c.is_ascii_control() {
            let _ = write!(escaped, "\\{:03o}", c as u32);
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

/// Check that `path` contains no control characters.  The error renders `path` in local style
/// with its control characters escaped.
pub fn check_valid(path: &str) -> Result<(), Error> {
    if let Some(byte) = path.bytes().find(|b| b.is_ascii_control()) {
        INVALID_CONTROL_CHARACTER.click();
        return Err(Error::invalid_control_character(byte, &local_style(path)));
    }
    Ok(())
}

/////////////////////////////////////////////// tests //////////////////////////////////////////////
