//! CSV input tables: header row plus string records, with helpers for the
//! columns the interpolation workflow depends on.
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::error::{Error, Result};

pub const SITE_FIELD: &str = "SITE";
pub const DEPTH_FIELD: &str = "DEPTH_CM";
pub const EASTING_FIELD: &str = "EASTING";
pub const NORTHING_FIELD: &str = "NORTHING";

pub const REQUIRED_FIELDS: [&str; 4] = [SITE_FIELD, DEPTH_FIELD, EASTING_FIELD, NORTHING_FIELD];

/// Data row whose `SITE` and `DEPTH_CM` stand for the whole file.
pub const REPRESENTATIVE_ROW: usize = 1;

#[derive(Debug, Clone)]
pub struct InputTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl InputTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut records = Vec::new();
        for record in reader.records() {
            records.push(record?.iter().map(str::to_string).collect());
        }
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            records,
        })
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Fail with every missing name listed.
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| self.column_index(n).is_none())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingColumns {
                path: self.path.clone(),
                columns: missing.join(", "),
            })
        }
    }

    /// Iterate one column's raw values.
    pub fn column<'a>(&'a self, name: &str) -> Result<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.column_index(name).ok_or_else(|| Error::MissingColumns {
            path: self.path.clone(),
            columns: name.to_string(),
        })?;
        Ok(self
            .records
            .iter()
            .map(move |r| r.get(idx).map(String::as_str).unwrap_or("")))
    }

    /// Value of `name` at the representative row, taken as valid for every row.
    pub fn representative(&self, name: &str) -> Result<&str> {
        if self.records.len() <= REPRESENTATIVE_ROW {
            return Err(Error::TableTooShort {
                path: self.path.clone(),
                rows: self.records.len(),
            });
        }
        self.column(name)?
            .nth(REPRESENTATIVE_ROW)
            .ok_or_else(|| Error::TableTooShort {
                path: self.path.clone(),
                rows: self.records.len(),
            })
    }

    /// Column names from `start` to the end; empty when `start` is past the last column.
    pub fn columns_from(&self, start: usize) -> &[String] {
        self.headers.get(start..).unwrap_or(&[])
    }
}
