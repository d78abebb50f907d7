//! Descriptive statistics over single Arrow columns.

use std::collections::HashMap;

use anyhow::Result;
use arrow::{
    array::{Array, AsArray},
    compute::cast,
    datatypes::{DataType, Float64Type},
    util::display::{ArrayFormatter, FormatOptions},
};
use serde::Serialize;

/// Row labels of a numeric summary, in display order.
pub const NUMERIC_STATS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Row labels of a categorical summary, in display order.
pub const CATEGORICAL_STATS: [&str; 4] = ["count", "unique", "top", "freq"];

/// Count, moments and quartiles of a numeric column.
///
/// Every field except `count` is NaN when no values were counted; `std` is
/// also NaN for a single value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q25: f64,
    #[serde(rename = "50%")]
    pub median: f64,
    #[serde(rename = "75%")]
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    /// Summarize any numeric array. Nulls and NaNs are skipped.
    pub fn from_array(array: &dyn Array) -> Result<Self> {
        let floats = cast(array, &DataType::Float64)?;
        let values = floats
            .as_primitive::<Float64Type>()
            .iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        Ok(Self::from_values(values))
    }

    pub fn from_values(mut values: Vec<f64>) -> Self {
        values.sort_by(f64::total_cmp);
        let count = values.len();

        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                median: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = if count < 2 {
            f64::NAN
        } else {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (n - 1.0)).sqrt()
        };

        Self {
            count,
            mean,
            std,
            min: values[0],
            q25: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q75: quantile(&values, 0.75),
            max: values[count - 1],
        }
    }

    /// Values in the order of [`NUMERIC_STATS`].
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Linear interpolation between the closest ranks of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Count, cardinality and mode of a categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; ties go to the value seen first.
    pub top: Option<String>,
    pub freq: Option<usize>,
}

impl CategoricalSummary {
    /// Summarize any array by the display form of its non-null values.
    pub fn from_array(array: &dyn Array) -> Result<Self> {
        let options = FormatOptions::default();
        let formatter = ArrayFormatter::try_new(array, &options)?;

        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut frequencies: Vec<(String, usize)> = Vec::new();
        let mut count = 0;

        for idx in (0..array.len()).filter(|&i| array.is_valid(i)) {
            count += 1;
            let key = formatter.value(idx).to_string();
            match positions.get(&key) {
                Some(&pos) => frequencies[pos].1 += 1,
                None => {
                    positions.insert(key.clone(), frequencies.len());
                    frequencies.push((key, 1));
                }
            }
        }

        let mut mode: Option<&(String, usize)> = None;
        for entry in &frequencies {
            if mode.is_none_or(|best| entry.1 > best.1) {
                mode = Some(entry);
            }
        }

        Ok(Self {
            count,
            unique: frequencies.len(),
            top: mode.map(|(value, _)| value.clone()),
            freq: mode.map(|(_, freq)| *freq),
        })
    }

    /// Display cells in the order of [`CATEGORICAL_STATS`].
    pub fn cells(&self) -> [String; 4] {
        [
            self.count.to_string(),
            self.unique.to_string(),
            self.top.clone().unwrap_or_else(|| "NaN".to_string()),
            self.freq
                .map(|f| f.to_string())
                .unwrap_or_else(|| "NaN".to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{
        BooleanArray, DictionaryArray, Float64Array, Int32Array, Int64Array, StringArray,
    };
    use arrow::datatypes::Int32Type;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_numeric_summary_basic() {
        let array = Int64Array::from(vec![1, 2, 3, 4]);
        let summary = NumericSummary::from_array(&array).unwrap();

        assert_eq!(summary.count, 4);
        assert_close(summary.mean, 2.5);
        assert_close(summary.std, 1.2909944487358056);
        assert_close(summary.min, 1.0);
        assert_close(summary.q25, 1.75);
        assert_close(summary.median, 2.5);
        assert_close(summary.q75, 3.25);
        assert_close(summary.max, 4.0);
    }

    #[test]
    fn test_numeric_summary_skips_nulls_and_nan() {
        let array = Float64Array::from(vec![Some(91.5), None, Some(f64::NAN), Some(78.25)]);
        let summary = NumericSummary::from_array(&array).unwrap();

        assert_eq!(summary.count, 2);
        assert_close(summary.mean, 84.875);
        assert_close(summary.min, 78.25);
        assert_close(summary.max, 91.5);
    }

    #[test]
    fn test_numeric_summary_single_value_has_no_std() {
        let summary = NumericSummary::from_values(vec![7.0]);
        assert_eq!(summary.count, 1);
        assert!(summary.std.is_nan());
        assert_close(summary.median, 7.0);
    }

    #[test]
    fn test_numeric_summary_empty() {
        let array = Int32Array::from(Vec::<Option<i32>>::from([None, None]));
        let summary = NumericSummary::from_array(&array).unwrap();

        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_nan());
        assert!(summary.min.is_nan());
        assert!(summary.max.is_nan());
    }

    #[test]
    fn test_numeric_summary_json_uses_percent_labels() {
        let summary = NumericSummary::from_values(vec![1.0, 3.0]);
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["50%"], 2.0);
        assert!(json.get("median").is_none());
    }

    #[test]
    fn test_categorical_summary_mode() {
        let array = StringArray::from(vec![Some("b"), Some("a"), None, Some("a"), Some("c")]);
        let summary = CategoricalSummary::from_array(&array).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.unique, 3);
        assert_eq!(summary.top.as_deref(), Some("a"));
        assert_eq!(summary.freq, Some(2));
    }

    #[test]
    fn test_categorical_summary_tie_goes_to_first_seen() {
        let array = StringArray::from(vec!["x", "y", "y", "x"]);
        let summary = CategoricalSummary::from_array(&array).unwrap();

        assert_eq!(summary.top.as_deref(), Some("x"));
        assert_eq!(summary.freq, Some(2));
    }

    #[test]
    fn test_categorical_summary_bool_and_dictionary() {
        let bools = BooleanArray::from(vec![true, false, true]);
        let summary = CategoricalSummary::from_array(&bools).unwrap();
        assert_eq!(summary.top.as_deref(), Some("true"));
        assert_eq!(summary.unique, 2);

        let dict: DictionaryArray<Int32Type> = vec!["gold", "basic", "basic"].into_iter().collect();
        let summary = CategoricalSummary::from_array(&dict).unwrap();
        assert_eq!(summary.top.as_deref(), Some("basic"));
        assert_eq!(summary.freq, Some(2));
    }

    #[test]
    fn test_categorical_summary_all_null() {
        let array = StringArray::from(vec![None::<&str>, None]);
        let summary = CategoricalSummary::from_array(&array).unwrap();

        assert_eq!(summary.count, 0);
        assert_eq!(summary.unique, 0);
        assert_eq!(summary.top, None);
        assert_eq!(summary.cells()[2], "NaN");
    }
}
