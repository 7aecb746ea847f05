//! Newtype wrappers for WOPI resource identifiers.
//!
//! WOPI identifiers are opaque strings drawn from the request URL. Using
//! distinct types prevents accidentally passing a `FolderId` where a
//! `FileId` is expected, and pins the case-normalization rules in one
//! place: file ids are lower-cased at construction, folder ids preserve
//! their case and compare case-insensitively.

use std::fmt;

/// Identifier of a file exposed over WOPI.
///
/// Doubles as the storage key and the lock-table key. Always lower-case;
/// `parse` normalizes whatever the URL carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(String);

impl FileId {
    /// Create a file id from a raw (already percent-decoded) URL segment.
    pub fn parse(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the extension part of the id including the leading dot,
    /// or an empty string when the id has none.
    pub fn extension(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[idx..],
            None => "",
        }
    }

    /// Return the id without its final extension.
    pub fn stem(&self) -> &str {
        match self.0.rfind('.') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a folder exposed over WOPI.
///
/// Unlike [`FileId`], the original casing is preserved; comparisons against
/// the storage root are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderId(String);

impl FolderId {
    /// Create a folder id from a raw (already percent-decoded) URL segment.
    pub fn parse(raw: &str) -> Self {
        Self(raw.to_string())
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a directory name.
    pub fn matches(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FolderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
