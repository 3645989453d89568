/*
    Parsing of derivation paths passed in as strings, e.g.
    "m/44'/0'/0'/182", into sequences of ChildOptions.
*/

use crate::hdwallet::{ChildOptions, HDWError, HARDENED_OFFSET};
use std::fmt;
use std::str::FromStr;

/// An ordered route from a root key to a descendant key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    pub children: Vec<ChildOptions>,
}

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The depth a key derived along this path will have,
    /// relative to the root.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl FromStr for Path {
    type Err = HDWError;

    /// Grammar: an optional leading "m" or "M" root marker, then
    /// '/'-separated decimal indices, each optionally suffixed
    /// with ', h or H to mark it hardened. Indices must fit in
    /// 31 bits.
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let mut segments: Vec<&str> = path.trim().split('/').collect();
        if let Some(first) = segments.first() {
            if *first == "m" || *first == "M" {
                segments.remove(0);
            }
        }

        let mut children: Vec<ChildOptions> = Vec::with_capacity(segments.len());
        for segment in segments {
            let (digits, hardened) = match segment.strip_suffix(&['\'', 'h', 'H'][..]) {
                Some(digits) => (digits, true),
                None => (segment, false),
            };

            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(HDWError::InvalidPathSyntax(segment.to_string()));
            }
            let index: u64 = digits
                .parse()
                .map_err(|_| HDWError::InvalidPathSyntax(segment.to_string()))?;
            if index >= HARDENED_OFFSET as u64 {
                return Err(HDWError::IndexOutOfRange(index));
            }

            children.push(match hardened {
                true => ChildOptions::Hardened(index as u32),
                false => ChildOptions::Normal(index as u32),
            });
        }

        Ok(Self { children })
    }
}

impl fmt::Display for Path {
    /// Canonical form: "m" root marker and ' hardened markers.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m")?;
        for child in &self.children {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}
