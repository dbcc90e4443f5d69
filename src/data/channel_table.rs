// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array2, ArrayView1, Axis};
use std::collections::HashMap;
use std::io::Read;

use crate::error::{PidError, Result};

/// Equal-length channel time series keyed by channel label.
///
/// Stored as a (samples x channels) matrix. The table is immutable once built.
#[derive(Debug, Clone)]
pub struct ChannelTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
    data: Array2<f64>,
}

fn index_names(names: &[String]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(names.len());
    for (i, name) in names.iter().enumerate() {
        if index.insert(name.clone(), i).is_some() {
            return Err(PidError::config(format!("duplicate channel '{name}'")));
        }
    }
    Ok(index)
}

impl ChannelTable {
    pub fn new(names: Vec<String>, data: Array2<f64>) -> Result<Self> {
        if names.len() != data.ncols() {
            return Err(PidError::config(format!(
                "{} channel names for {} columns",
                names.len(),
                data.ncols()
            )));
        }
        let index = index_names(&names)?;
        Ok(Self { names, index, data })
    }

    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        let n = columns.first().map_or(0, |(_, c)| c.len());
        if let Some((name, col)) = columns.iter().find(|(_, c)| c.len() != n) {
            return Err(PidError::config(format!(
                "channel '{name}' has {} samples, expected {n}",
                col.len()
            )));
        }
        let mut data = Array2::<f64>::zeros((n, columns.len()));
        for (j, (_, col)) in columns.iter().enumerate() {
            for (i, &v) in col.iter().enumerate() {
                data[(i, j)] = v;
            }
        }
        Self::new(columns.into_iter().map(|(name, _)| name).collect(), data)
    }

    /// Read a headed CSV (one column per channel, one row per sample).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let names: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        let mut values: Vec<f64> = Vec::new();
        let mut rows = 0usize;
        for record in rdr.records() {
            let record = record?;
            for field in record.iter() {
                let v = field.trim().parse::<f64>().map_err(|e| {
                    PidError::config(format!("row {}: cannot parse '{field}': {e}", rows + 1))
                })?;
                values.push(v);
            }
            rows += 1;
        }
        let data = Array2::from_shape_vec((rows, names.len()), values)
            .map_err(|e| PidError::config(format!("ragged channel table: {e}")))?;
        Self::new(names, data)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_channels(&self) -> usize {
        self.data.ncols()
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn position(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| PidError::config(format!("unknown channel '{name}'")))
    }

    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        Ok(self.data.column(self.position(name)?))
    }

    /// Keep only the named channels, in the given order.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let positions = names
            .iter()
            .map(|n| self.position(n.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let data = self.data.select(Axis(1), &positions);
        Self::new(names.iter().map(|n| n.as_ref().to_string()).collect(), data)
    }

    /// Same channel labels over a new sample matrix.
    pub fn with_data(&self, data: Array2<f64>) -> Result<Self> {
        Self::new(self.names.clone(), data)
    }
}
