//! Column mapping for the battery-harness table
//!
//! This module maps header names to positions so rows can be read by column
//! name regardless of the order the harness printed them in.

use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// Column mapping for a named-header table
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column name to index mapping
    pub name_to_index: HashMap<String, usize>,

    /// Header columns not required by the schema
    pub extra_columns: Vec<String>,
}

impl ColumnMapping {
    /// Analyze the header row and verify every required column is present
    ///
    /// Fails with `MissingColumn` naming the first required column (in
    /// `required` order) that the header lacks.
    pub fn analyze(headers: &StringRecord, required: &[&str]) -> Result<Self> {
        let mut name_to_index = HashMap::new();
        let mut extra_columns = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            let column_name = header.trim().to_string();

            if !required.contains(&column_name.as_str()) && !column_name.is_empty() {
                extra_columns.push(column_name.clone());
            }

            // First occurrence wins for duplicated names
            name_to_index.entry(column_name).or_insert(index);
        }

        if let Some(missing) = required
            .iter()
            .find(|name| !name_to_index.contains_key(**name))
        {
            return Err(Error::missing_column(*missing));
        }

        Ok(ColumnMapping {
            name_to_index,
            extra_columns,
        })
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }
}
