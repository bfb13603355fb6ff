//! Filesystem type-list predicate.
//!
//! A type list is comma separated. When it starts with `no` every token must
//! carry that prefix and names types to exclude; otherwise it names the only
//! types to include. Matching compares whole tokens, never substrings.
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::MountEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter<'a> {
    All,
    Include(Vec<&'a str>),
    Exclude(Vec<&'a str>),
}

impl<'a> TypeFilter<'a> {
    /// Parse a type list. `None` matches everything.
    ///
    /// # Errors
    ///
    /// Returns a fatal `ErrorKind::TypeList` error when an exclusion list
    /// contains a token without the `no` prefix.
    pub fn parse(list: Option<&'a str>) -> Result<Self> {
        let Some(list) = list else {
            return Ok(Self::All);
        };
        let tokens = list.split(',').filter(|t| !t.is_empty());
        if !list.starts_with("no") {
            return Ok(Self::Include(tokens.collect()));
        }
        let mut excluded = Vec::new();
        for t in tokens {
            match t.strip_prefix("no") {
                Some(name) => excluded.push(name),
                None => {
                    return Err(Error::new(
                        ErrorKind::TypeList,
                        format!("'{list}': every type must start with 'no' once one does"),
                    ))
                }
            }
        }
        Ok(Self::Exclude(excluded))
    }

    #[must_use]
    pub fn matches(&self, fs_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::Include(names) => names.iter().any(|n| *n == fs_type),
            Self::Exclude(names) => !names.iter().any(|n| *n == fs_type),
        }
    }
}

/// Check whether `entry`'s type passes `typelist`.
///
/// # Errors
///
/// See [`TypeFilter::parse`].
pub fn is_type(entry: &MountEntry, typelist: Option<&str>) -> Result<bool> {
    Ok(TypeFilter::parse(typelist)?.matches(&entry.fs_type))
}
