//! Model input: a fixed window of engineered daily features.
//!
//! The remote model consumes the last 30 trading days, each described by six
//! columns in this order: close, volume, 7-day MA, 21-day MA, volatility and
//! RSI. The values are opaque to the ledger; only the shape is enforced.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Number of daily rows the model expects.
pub const WINDOW_ROWS: usize = 30;

/// Number of feature columns per row.
pub const FEATURE_COLUMNS: usize = 6;

/// A validated `30 x 6` feature matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeatureWindow", into = "RawFeatureWindow")]
pub struct FeatureWindow {
    values: Vec<[f64; FEATURE_COLUMNS]>,
}

/// Wire shape `{"values": [[f64; 6]; 30]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeatureWindow {
    pub values: Vec<Vec<f64>>,
}

fn shape_error(reason: impl Into<String>) -> DomainError {
    DomainError::FeatureShape {
        expected_rows: WINDOW_ROWS,
        expected_cols: FEATURE_COLUMNS,
        reason: reason.into(),
    }
}

impl FeatureWindow {
    /// Validate and wrap a feature matrix.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::FeatureShape`] if the row or column count is
    /// wrong or any value is not finite.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, DomainError> {
        if rows.len() != WINDOW_ROWS {
            return Err(shape_error(format!("got {} rows", rows.len())));
        }

        let mut values = Vec::with_capacity(WINDOW_ROWS);
        for (i, row) in rows.into_iter().enumerate() {
            let row: [f64; FEATURE_COLUMNS] = row
                .try_into()
                .map_err(|r: Vec<f64>| shape_error(format!("row {i} has {} columns", r.len())))?;
            if let Some(col) = row.iter().position(|v| !v.is_finite()) {
                return Err(shape_error(format!("row {i} column {col} is not finite")));
            }
            values.push(row);
        }

        Ok(Self { values })
    }

    /// Parse the `{"values": [...]}` document produced by the feature
    /// pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the shape is wrong.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn rows(&self) -> &[[f64; FEATURE_COLUMNS]] {
        &self.values
    }

    /// Close price of the most recent day in the window.
    #[must_use]
    pub fn last_close(&self) -> f64 {
        self.values.last().map_or(0.0, |row| row[0])
    }
}

impl TryFrom<RawFeatureWindow> for FeatureWindow {
    type Error = DomainError;

    fn try_from(raw: RawFeatureWindow) -> Result<Self, Self::Error> {
        Self::new(raw.values)
    }
}

impl From<FeatureWindow> for RawFeatureWindow {
    fn from(window: FeatureWindow) -> Self {
        Self {
            values: window.values.into_iter().map(|row| row.to_vec()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize, cols: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..cols).map(|c| (i * 10 + c) as f64).collect())
            .collect()
    }

    #[test]
    fn accepts_thirty_by_six() {
        let window = FeatureWindow::new(rows(30, 6)).unwrap();
        assert_eq!(window.rows().len(), 30);
        assert_eq!(window.last_close(), 290.0);
    }

    #[test]
    fn rejects_wrong_row_count() {
        assert!(matches!(
            FeatureWindow::new(rows(29, 6)),
            Err(DomainError::FeatureShape { .. })
        ));
        assert!(FeatureWindow::new(Vec::new()).is_err());
    }

    #[test]
    fn rejects_wrong_column_count() {
        let mut input = rows(30, 6);
        input[4].pop();
        let err = FeatureWindow::new(input).unwrap_err();
        assert!(err.to_string().contains("row 4 has 5 columns"));
    }

    #[test]
    fn rejects_non_finite_values() {
        let mut input = rows(30, 6);
        input[2][3] = f64::INFINITY;
        assert!(FeatureWindow::new(input).is_err());
    }

    #[test]
    fn serializes_as_values_document() {
        let window = FeatureWindow::new(rows(30, 6)).unwrap();
        let value = serde_json::to_value(&window).unwrap();
        assert_eq!(value["values"].as_array().unwrap().len(), 30);
        assert_eq!(value["values"][1][2], 12.0);
    }

    #[test]
    fn parses_from_json_document() {
        let doc = serde_json::json!({ "values": rows(30, 6) }).to_string();
        let window = FeatureWindow::from_json(&doc).unwrap();
        assert_eq!(window.rows()[0], [0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
