//! Row normalization shared by every source

use ahash::AHashMap;
use dv_core::{Category, Disposition, Record, YearRange};

use crate::config::NullConfig;

/// Parse an integer field, accepting a zero-fraction float such as `2004.0`
fn parse_whole<T: TryFrom<i64>>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    let whole = match trimmed.parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            let f = trimmed.parse::<f64>().ok()?;
            if !f.is_finite() || f.fract() != 0.0 {
                return None;
            }
            f as i64
        }
    };
    T::try_from(whole).ok()
}

/// Turns raw string fields into [`Record`]s. Disposition labels are interned
/// so records with the same label share one allocation.
pub struct RowNormalizer<'a> {
    nulls: &'a NullConfig,
    dispositions: AHashMap<String, Disposition>,
    skipped: usize,
}

impl<'a> RowNormalizer<'a> {
    pub fn new(nulls: &'a NullConfig) -> Self {
        Self {
            nulls,
            dispositions: AHashMap::new(),
            skipped: 0,
        }
    }

    /// Normalize one row. Returns `None` and counts the row as skipped when
    /// the year is missing, not an integer or outside [`YearRange::CALENDAR`].
    pub fn normalize(
        &mut self,
        year: Option<&str>,
        category: Option<&str>,
        disposition: Option<&str>,
        precinct: Option<&str>,
    ) -> Option<Record> {
        let year = self
            .nulls
            .value(year)
            .and_then(parse_whole::<i32>)
            .filter(|&year| YearRange::CALENDAR.contains(year));
        let Some(year) = year else {
            self.skipped += 1;
            return None;
        };

        let category = self
            .nulls
            .value(category)
            .map(Category::from_label)
            .unwrap_or(Category::Unknown);
        let disposition = self.intern(disposition);
        let precinct = self.nulls.value(precinct).and_then(parse_whole::<u32>);

        Some(Record::new(year, category, disposition, precinct))
    }

    fn intern(&mut self, raw: Option<&str>) -> Disposition {
        let label = Disposition::canonical_label(self.nulls.value(raw));
        if let Some(existing) = self.dispositions.get(label) {
            return existing.clone();
        }
        let disposition = Disposition::from_canonical(label);
        self.dispositions.insert(label.to_string(), disposition.clone());
        disposition
    }

    /// Rows rejected so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Distinct disposition labels seen so far
    pub fn distinct_dispositions(&self) -> usize {
        self.dispositions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_fields() {
        let nulls = NullConfig::default();
        let mut normalizer = RowNormalizer::new(&nulls);

        let record = normalizer
            .normalize(Some(" 2004 "), Some("force"), Some("Substantiated (Charges)"), Some("75"))
            .unwrap();
        assert_eq!(record.year, 2004);
        assert_eq!(record.category, Category::Force);
        assert_eq!(record.disposition.as_str(), "Substantiated");
        assert_eq!(record.precinct, Some(75));
    }

    #[test]
    fn test_nulls_become_unknown_or_absent() {
        let nulls = NullConfig::default();
        let mut normalizer = RowNormalizer::new(&nulls);

        let record = normalizer.normalize(Some("1999.0"), Some("N/A"), Some(""), Some("-")).unwrap();
        assert_eq!(record.year, 1999);
        assert_eq!(record.category, Category::Unknown);
        assert_eq!(record.disposition.as_str(), "Unknown");
        assert_eq!(record.precinct, None);
    }

    #[test]
    fn test_bad_years_are_skipped() {
        let nulls = NullConfig::default();
        let mut normalizer = RowNormalizer::new(&nulls);

        assert!(normalizer.normalize(Some("n/a"), Some("Force"), None, None).is_none());
        assert!(normalizer.normalize(Some("19x5"), Some("Force"), None, None).is_none());
        assert!(normalizer.normalize(Some("2001.5"), Some("Force"), None, None).is_none());
        assert!(normalizer.normalize(None, Some("Force"), None, None).is_none());
        assert!(normalizer.normalize(Some("-2147483648"), Some("Force"), None, None).is_none());
        assert!(normalizer.normalize(Some("999999999"), Some("Force"), None, None).is_none());
        assert!(normalizer.normalize(Some("0"), Some("Force"), None, None).is_none());
        assert_eq!(normalizer.skipped(), 7);
        assert!(normalizer.normalize(Some("9999"), Some("Force"), None, None).is_some());
    }

    #[test]
    fn test_dispositions_are_interned() {
        let nulls = NullConfig::default();
        let mut normalizer = RowNormalizer::new(&nulls);

        for raw in ["Exonerated", " Exonerated", "Substantiated (MOS Unidentified)", "Substantiated"] {
            normalizer.normalize(Some("2010"), None, Some(raw), None);
        }
        assert_eq!(normalizer.distinct_dispositions(), 2);
    }
}
