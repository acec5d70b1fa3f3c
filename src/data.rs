//! Encoded image dataset.
//!
//! The corpus is a JSON document keyed by dataset name, then by category key,
//! each category holding an ordered list of numeric-encoded image vectors:
//!
//! ```json
//! { "cube": { "1": [[0.0, 1.0, ...], ...], "2": [...] } }
//! ```
//!
//! Samples are addressed by a 1-based index within a category; the normalized
//! target for sample `n` is `n / 10` (dice faces 1..6 map to 0.1..0.6).

use std::collections::BTreeMap;
use std::path::Path;

use crate::{Error, Result};

type Document = BTreeMap<String, BTreeMap<String, Vec<Vec<f32>>>>;

#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    categories: BTreeMap<String, Vec<Vec<f32>>>,
}

impl Dataset {
    /// Load the dataset named `name` from a JSON corpus file.
    ///
    /// A present-but-malformed document is fatal; nothing can proceed
    /// without the corpus.
    pub fn from_json_file<P: AsRef<Path>>(path: P, name: &str) -> Result<Self> {
        let p = path.as_ref();
        let text = std::fs::read_to_string(p)
            .map_err(|e| Error::InvalidData(format!("failed to read {}: {e}", p.display())))?;
        Self::from_json_str(&text, name)
    }

    /// Parse the dataset named `name` out of a JSON corpus document.
    pub fn from_json_str(text: &str, name: &str) -> Result<Self> {
        let mut document: Document = serde_json::from_str(text)
            .map_err(|e| Error::InvalidData(format!("malformed dataset document: {e}")))?;
        let categories = document.remove(name).ok_or_else(|| {
            Error::InvalidData(format!("dataset '{name}' not present in document"))
        })?;
        Ok(Self {
            name: name.to_owned(),
            categories,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered sample vectors for `category`.
    pub fn samples(&self, category: &str) -> Result<&[Vec<f32>]> {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                Error::OutOfRange(format!(
                    "category '{category}' not present in dataset '{}'",
                    self.name
                ))
            })
    }

    /// The sample with 1-based index `number` within `category`.
    pub fn sample(&self, category: &str, number: usize) -> Result<&[f32]> {
        let samples = self.samples(category)?;
        number
            .checked_sub(1)
            .and_then(|i| samples.get(i))
            .map(Vec::as_slice)
            .ok_or_else(|| {
                Error::OutOfRange(format!(
                    "sample number {number} out of range for category '{category}' ({} samples)",
                    samples.len()
                ))
            })
    }

    /// Normalized target for the sample with 1-based index `number`.
    #[inline]
    pub fn normalized_target(&self, number: usize) -> f32 {
        number as f32 / 10.0
    }

    /// Target value derived from a category key: the key parsed as a number
    /// divided by 10, or 0.0 when the key is absent or non-numeric.
    pub fn target_value_by_key(&self, key: &str) -> f32 {
        if !self.categories.contains_key(key) {
            return 0.0;
        }
        key.parse::<f32>().map(|v| v / 10.0).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_dataset() -> Dataset {
        Dataset::from_json_str(
            r#"{"cube": {
                "1": [[0.0, 1.0], [1.0, 0.0]],
                "2": [[0.5, 0.5]],
                "3": [], "4": [], "5": [], "6": []
            }}"#,
            "cube",
        )
        .unwrap()
    }

    #[test]
    fn sample_lookup_is_one_based() {
        let data = cube_dataset();
        assert_eq!(data.sample("1", 1).unwrap(), &[0.0, 1.0]);
        assert_eq!(data.sample("1", 2).unwrap(), &[1.0, 0.0]);
    }

    #[test]
    fn out_of_range_errors_name_index_and_category() {
        let data = cube_dataset();

        let err = data.sample("1", 3).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains('3') && msg.contains("'1'"), "{msg}");

        let err = data.sample("7", 1).unwrap_err();
        assert!(format!("{err}").contains("'7'"));
    }

    #[test]
    fn normalized_target_divides_the_ordinal_by_ten() {
        let data = cube_dataset();
        assert!((data.normalized_target(1) - 0.1).abs() < 1e-6);
        assert!((data.normalized_target(6) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn target_value_by_key_covers_present_absent_and_boundary_keys() {
        let data = cube_dataset();
        assert!((data.target_value_by_key("3") - 0.3).abs() < 1e-6);
        assert_eq!(data.target_value_by_key("10"), 0.0);
        assert!((data.target_value_by_key("6") - 0.6).abs() < 1e-6);
    }

    #[test]
    fn malformed_document_is_fatal() {
        assert!(Dataset::from_json_str("{not json", "cube").is_err());
    }

    #[test]
    fn missing_dataset_name_is_invalid_data() {
        let err = Dataset::from_json_str(r#"{"cube": {}}"#, "dominoes").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
