//! Token-level helpers shared by the record decoders

use crate::error::{Error, Result};

/// Terminator of every variable-length id list
pub const SENTINEL: i64 = -1;

/// Position of the record being decoded, carried into every fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'s> {
    pub section: &'s str,
    pub index: usize,
}

impl<'s> Record<'s> {
    pub fn new(section: &'s str, index: usize) -> Self {
        Self { section, index }
    }

    pub fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::malformed(self.section, self.index, reason)
    }

    pub fn out_of_range(&self, table: &'static str, index: i64, len: usize) -> Error {
        Error::OutOfRangeIndex {
            section: self.section.to_string(),
            record: self.index,
            table,
            index,
            len,
        }
    }

    /// Parse one integer token
    pub fn int(&self, token: &str) -> Result<i64> {
        token
            .parse::<i64>()
            .map_err(|_| self.malformed(format!("expected an integer, found '{}'", token)))
    }

    /// Parse a line holding exactly one integer
    pub fn single_int(&self, line: &str) -> Result<i64> {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(token), None) => self.int(token),
            (None, _) => Err(self.malformed("expected an integer, found an empty line")),
            (Some(_), Some(_)) => Err(self.malformed(format!(
                "expected a single integer, found '{}'",
                line.trim()
            ))),
        }
    }

    /// Parse a `-1` terminated id list, returning the ids before the sentinel
    pub fn id_list(&self, line: &str) -> Result<Vec<i64>> {
        let mut ids = Vec::new();
        let mut tokens = line.split_whitespace();

        loop {
            let Some(token) = tokens.next() else {
                return Err(self.malformed("id list is missing its -1 terminator"));
            };
            let id = self.int(token)?;
            if id == SENTINEL {
                break;
            }
            ids.push(id);
        }

        if let Some(extra) = tokens.next() {
            return Err(self.malformed(format!(
                "unexpected token '{}' after the -1 terminator",
                extra
            )));
        }
        Ok(ids)
    }
}

/// Dense, zero-based table of state feature names
#[derive(Debug, Clone, Copy)]
pub struct FeatureTable<'a> {
    names: &'a [&'a str],
}

impl<'a> FeatureTable<'a> {
    pub fn new(names: &'a [&'a str]) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve one feature id to its name
    pub fn name(&self, id: i64, at: &Record<'_>) -> Result<&'a str> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.names.get(i).copied())
            .ok_or_else(|| at.out_of_range("state features", id, self.names.len()))
    }

    /// Resolve a list of feature ids, preserving order
    pub fn names(&self, ids: &[i64], at: &Record<'_>) -> Result<Vec<String>> {
        ids.iter()
            .map(|&id| self.name(id, at).map(str::to_string))
            .collect()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().map(|n| n.to_string()).collect()
    }
}
