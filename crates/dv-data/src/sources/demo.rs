//! Deterministic synthetic dataset for trying the dashboard without a file

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use dv_core::{RecordStore, YearRange};

use super::normalize::RowNormalizer;
use crate::config::NullConfig;
use crate::LoadError;

const DEFAULT_SEED: u64 = 0x5eed_cc1b;

/// Raw category labels and their weights, written the way source files spell them
const CATEGORIES: [(&str, u32); 6] = [
    ("Abuse of Authority", 48),
    ("Force", 27),
    ("Discourtesy", 15),
    ("Offensive Language", 4),
    ("", 3),
    ("Untruthful Statement", 3),
];

const DISPOSITIONS: [(&str, u32); 10] = [
    ("Unsubstantiated", 30),
    ("Exonerated", 22),
    ("Substantiated (Charges)", 6),
    ("Substantiated (Command Discipline A)", 4),
    ("Substantiated (Command Lvl Instructions)", 3),
    ("Substantiated (Formalized Training)", 2),
    ("Unfounded", 9),
    ("Officer(s) unidentified", 8),
    ("Complaint withdrawn", 6),
    ("", 2),
];

/// Sampler over the weights of a label table
fn weighted(table: &[(&str, u32)]) -> Result<WeightedIndex<u32>, WeightedError> {
    WeightedIndex::new(table.iter().map(|(_, w)| *w))
}

/// Generator for the demo dataset
#[derive(Debug, Clone)]
pub struct DemoSource {
    seed: u64,
    years: YearRange,
    peak_per_year: u32,
}

impl Default for DemoSource {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            years: YearRange::new(1985, 2020),
            peak_per_year: 400,
        }
    }
}

impl DemoSource {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn years(&self) -> YearRange {
        self.years
    }

    /// Allegations generated for `year`: a slow rise towards the end of the
    /// range with some jitter
    fn volume(&self, year: i32, rng: &mut StdRng) -> u32 {
        let offset = year - self.years.lo();
        let t = offset as f64 / (self.years.span().max(2) - 1) as f64;
        let base = f64::from(self.peak_per_year) * (0.15 + 0.85 * t * t);
        let jitter: f64 = rng.gen_range(0.8..1.2);
        (base * jitter).round() as u32
    }

    /// Generate the dataset, normalized the same way a CSV file is
    pub fn load(&self) -> Result<RecordStore, LoadError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let categories = weighted(&CATEGORIES)?;
        let dispositions = weighted(&DISPOSITIONS)?;

        let nulls = NullConfig::default();
        let mut normalizer = RowNormalizer::new(&nulls);
        let mut records = Vec::new();

        for year in self.years.years() {
            let year_label = year.to_string();
            for _ in 0..self.volume(year, &mut rng) {
                let category = CATEGORIES[categories.sample(&mut rng)].0;
                let disposition = DISPOSITIONS[dispositions.sample(&mut rng)].0;
                let precinct = rng.gen_range(1..=123u32).to_string();
                records.extend(normalizer.normalize(
                    Some(&year_label),
                    Some(category),
                    Some(disposition),
                    Some(&precinct),
                ));
            }
        }

        let store = RecordStore::new("Demo dataset", records, normalizer.skipped()).ok_or(LoadError::Empty)?;
        info!("Generated {} demo records for {}", store.len(), store.extent());
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dv_core::Category;

    #[test]
    fn test_same_seed_same_dataset() {
        let a = DemoSource::with_seed(7).load().unwrap();
        let b = DemoSource::with_seed(7).load().unwrap();
        assert_eq!(a.records(), b.records());
    }

    #[test]
    fn test_covers_full_extent_and_every_category() {
        let store = DemoSource::default().load().unwrap();
        assert_eq!(store.extent(), YearRange::new(1985, 2020));
        assert_eq!(store.skipped_rows(), 0);

        for category in Category::ALL {
            assert!(store.records().iter().any(|r| r.category == category), "{} missing", category);
        }
        assert!(store.records().iter().all(|r| !r.disposition.as_str().starts_with("Substantiated (")));
        assert!(store.records().iter().any(|r| r.disposition.as_str() == "Unknown"));
    }

    #[test]
    fn test_unusable_weight_tables_are_generator_errors() {
        assert!(matches!(weighted(&[]), Err(WeightedError::NoItem)));
        assert!(matches!(weighted(&[("Force", 0), ("", 0)]), Err(WeightedError::AllWeightsZero)));

        let error = LoadError::from(WeightedError::NoItem);
        assert!(matches!(error, LoadError::Generator(_)));
        assert!(error.to_string().starts_with("Demo data generation failed"));
    }
}
