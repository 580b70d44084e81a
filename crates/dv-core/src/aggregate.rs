//! Derived-view functions
//!
//! Pure functions from (record store, filter state) to the aggregates each
//! view draws. They are total: an empty selection produces empty or zeroed
//! output, never an error.

use std::cmp::Reverse;
use ahash::AHashMap;

use crate::filter::{FilterContext, FilterState};
use crate::record::{Category, Record, YearRange};
use crate::store::RecordStore;

/// Default number of bars in the disposition ranking
pub const TOP_DISPOSITIONS: usize = 12;

/// Number of categories listed in the selection summary
pub const SUMMARY_CATEGORIES: usize = 4;

/// Records within the year range whose category is enabled, in store order
pub fn filtered_records<'a>(store: &'a RecordStore, state: &FilterState) -> Vec<&'a Record> {
    store.records().iter().filter(|r| state.matches(r)).collect()
}

/// Per-category counts for a single year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCounts {
    pub year: i32,
    pub counts: [usize; Category::COUNT],
}

impl YearCounts {
    fn zero(year: i32) -> Self {
        Self { year, counts: [0; Category::COUNT] }
    }

    pub fn count(&self, category: Category) -> usize {
        self.counts[category.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// One entry per year of the global `extent`, zero-filled.
///
/// The full extent is used even when the filter narrows the range so the
/// timeline keeps a stable x-domain.
pub fn aggregate_by_year_and_category(rows: &[&Record], extent: YearRange) -> Vec<YearCounts> {
    let mut series: Vec<YearCounts> = extent.years().map(YearCounts::zero).collect();

    for record in rows {
        if let Some(offset) = extent.offset_of(record.year) {
            series[offset].counts[record.category.index()] += 1;
        }
    }

    series
}

/// Disposition labels ranked by count, top [`TOP_DISPOSITIONS`]
pub fn aggregate_by_disposition(rows: &[&Record]) -> Vec<(String, usize)> {
    rank_dispositions(rows, TOP_DISPOSITIONS)
}

/// Disposition labels sorted by count descending, equal counts ordered by
/// label, truncated to `limit` entries
pub fn rank_dispositions(rows: &[&Record], limit: usize) -> Vec<(String, usize)> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for record in rows {
        *counts.entry(record.disposition.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(limit);

    ranked.into_iter().map(|(label, count)| (label.to_string(), count)).collect()
}

/// Count of one category and its share of the selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub count: usize,
    pub share: f64,
}

/// Busiest year of the selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakYear {
    pub year: i32,
    pub count: usize,
    pub share: f64,
}

/// Figures shown by the details panel
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSummary {
    pub total: usize,
    pub year_range: YearRange,
    /// Non-zero categories sorted by count descending (display order on ties)
    pub by_category: Vec<CategoryShare>,
    /// Earliest year with the highest count
    pub peak_year: Option<PeakYear>,
}

impl SelectionSummary {
    /// The leading categories the details panel lists
    pub fn top_categories(&self) -> &[CategoryShare] {
        &self.by_category[..self.by_category.len().min(SUMMARY_CATEGORIES)]
    }
}

pub fn summarize(rows: &[&Record], state: &FilterState) -> SelectionSummary {
    let total = rows.len();
    let share = |count: usize| if total == 0 { 0.0 } else { count as f64 / total as f64 };

    let mut category_counts = [0usize; Category::COUNT];
    let mut year_counts: AHashMap<i32, usize> = AHashMap::new();
    for record in rows {
        category_counts[record.category.index()] += 1;
        *year_counts.entry(record.year).or_insert(0) += 1;
    }

    let mut by_category: Vec<CategoryShare> = Category::ALL
        .iter()
        .filter(|c| category_counts[c.index()] > 0)
        .map(|&category| {
            let count = category_counts[category.index()];
            CategoryShare { category, count, share: share(count) }
        })
        .collect();
    by_category.sort_by_key(|s| Reverse(s.count));

    let peak_year = year_counts
        .into_iter()
        .max_by_key(|&(year, count)| (count, Reverse(year)))
        .map(|(year, count)| PeakYear { year, count, share: share(count) });

    SelectionSummary {
        total,
        year_range: state.year_range,
        by_category,
        peak_year,
    }
}

/// Everything the views need for one filter revision, computed in one pass
/// over the store
#[derive(Debug, Clone)]
pub struct SelectionSnapshot {
    pub context: FilterContext,
    pub series: Vec<YearCounts>,
    pub dispositions: Vec<(String, usize)>,
    pub summary: SelectionSummary,
}

impl SelectionSnapshot {
    /// `top_dispositions` can lower the bar limit but never raise it past
    /// [`TOP_DISPOSITIONS`]
    pub fn compute(store: &RecordStore, context: FilterContext, top_dispositions: usize) -> Self {
        let rows = filtered_records(store, &context.state);

        Self {
            context,
            series: aggregate_by_year_and_category(&rows, context.extent),
            dispositions: rank_dispositions(&rows, top_dispositions.min(TOP_DISPOSITIONS)),
            summary: summarize(&rows, &context.state),
        }
    }

    pub fn revision(&self) -> u64 {
        self.context.revision
    }

    /// Number of records in the selection
    pub fn total(&self) -> usize {
        self.summary.total
    }

    pub fn is_empty(&self) -> bool {
        self.summary.total == 0
    }

    /// Largest stacked total over all years
    pub fn max_year_total(&self) -> usize {
        self.series.iter().map(YearCounts::total).max().unwrap_or(0)
    }

    /// Counts for a given year, if it lies in the extent
    pub fn year(&self, year: i32) -> Option<&YearCounts> {
        self.context.extent.offset_of(year).and_then(|i| self.series.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CategorySet, Disposition};

    fn record(year: i32, category: Category, disposition: &str) -> Record {
        Record::new(year, category, Disposition::normalize(Some(disposition)), None)
    }

    fn sample_store() -> RecordStore {
        let mut records = Vec::new();
        for year in 1985..=2020 {
            let category = Category::ALL[(year as usize) % 4];
            records.push(record(year, category, "Exonerated"));
            if year % 3 == 0 {
                records.push(record(year, Category::Force, "Substantiated (Charges)"));
            }
            if year % 5 == 0 {
                records.push(record(year, Category::Unknown, ""));
            }
        }
        RecordStore::new("sample", records, 0).unwrap()
    }

    fn state(lo: i32, hi: i32, categories: &[Category]) -> FilterState {
        FilterState {
            year_range: YearRange::new(lo, hi),
            enabled_categories: categories.iter().copied().collect(),
        }
    }

    #[test]
    fn test_filtered_records_respects_range_and_categories() {
        let store = sample_store();
        let filter = state(1990, 2000, &[Category::Force, Category::Discourtesy]);

        let rows = filtered_records(&store, &filter);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| (1990..=2000).contains(&r.year)));
        assert!(rows.iter().all(|r| matches!(r.category, Category::Force | Category::Discourtesy)));

        // Order is preserved
        let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        let mut sorted = years.clone();
        sorted.sort();
        assert_eq!(years, sorted);
    }

    #[test]
    fn test_filtered_count_is_monotonic() {
        let store = sample_store();

        let narrow = filtered_records(&store, &state(2000, 2005, &[Category::Force])).len();
        let wider = filtered_records(&store, &state(1995, 2010, &[Category::Force])).len();
        let more_categories = filtered_records(
            &store,
            &state(1995, 2010, &[Category::Force, Category::Unknown]),
        )
        .len();
        let everything = filtered_records(&store, &FilterState::full(store.extent())).len();

        assert!(narrow <= wider);
        assert!(wider <= more_categories);
        assert!(more_categories <= everything);
        assert_eq!(everything, store.len());
    }

    #[test]
    fn test_empty_category_set_filters_everything() {
        let store = sample_store();
        let filter = FilterState {
            year_range: store.extent(),
            enabled_categories: CategorySet::empty(),
        };
        assert!(filtered_records(&store, &filter).is_empty());
    }

    #[test]
    fn test_year_series_covers_global_extent() {
        let store = sample_store();
        let filter = state(2000, 2002, &[Category::Force]);
        let rows = filtered_records(&store, &filter);

        let series = aggregate_by_year_and_category(&rows, store.extent());
        assert_eq!(series.len(), 36);
        assert_eq!(series.first().map(|y| y.year), Some(1985));
        assert_eq!(series.last().map(|y| y.year), Some(2020));

        // Outside the filtered range everything is zero
        assert!(series.iter().filter(|y| !(2000..=2002).contains(&y.year)).all(|y| y.total() == 0));
        // Only the enabled category is counted
        assert!(series.iter().all(|y| y.total() == y.count(Category::Force)));
        assert_eq!(series.iter().map(YearCounts::total).sum::<usize>(), rows.len());
    }

    #[test]
    fn test_disposition_ranking_example() {
        let mut records = Vec::new();
        records.extend((0..35).map(|_| record(2000, Category::Force, "Unsubstantiated")));
        records.extend((0..25).map(|_| record(2001, Category::Force, "Exonerated")));
        records.extend((0..40).map(|_| record(2002, Category::Force, "Substantiated (Formalized Training)")));
        let rows: Vec<&Record> = records.iter().collect();

        assert_eq!(
            aggregate_by_disposition(&rows),
            vec![
                ("Substantiated".to_string(), 40),
                ("Unsubstantiated".to_string(), 35),
                ("Exonerated".to_string(), 25),
            ]
        );
    }

    #[test]
    fn test_disposition_ranking_truncates_and_breaks_ties_by_label() {
        let labels = [
            "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf",
            "Hotel", "India", "Juliet", "Kilo", "Lima", "Mike", "November",
        ];
        let mut records = Vec::new();
        for label in labels.iter().rev() {
            records.push(record(2000, Category::Force, label));
        }
        records.push(record(2000, Category::Force, "Zulu"));
        records.push(record(2000, Category::Force, "Zulu"));
        let rows: Vec<&Record> = records.iter().collect();

        let ranked = aggregate_by_disposition(&rows);
        assert_eq!(ranked.len(), TOP_DISPOSITIONS);
        assert_eq!(ranked[0], ("Zulu".to_string(), 2));
        assert_eq!(ranked[1].0, "Alpha");
        assert_eq!(ranked[11].0, "Kilo");
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_summary_peak_year_prefers_earliest() {
        let records = vec![
            record(1999, Category::Force, "Exonerated"),
            record(2003, Category::Discourtesy, "Exonerated"),
            record(2003, Category::Force, "Exonerated"),
            record(2001, Category::Force, "Exonerated"),
            record(2001, Category::Force, "Exonerated"),
        ];
        let rows: Vec<&Record> = records.iter().collect();
        let filter = state(1999, 2003, &Category::ALL);

        let summary = summarize(&rows, &filter);
        assert_eq!(summary.total, 5);
        let peak = summary.peak_year.unwrap();
        assert_eq!((peak.year, peak.count), (2001, 2));
        assert!((peak.share - 0.4).abs() < 1e-9);

        assert_eq!(summary.by_category[0].category, Category::Force);
        assert_eq!(summary.by_category[0].count, 4);
        assert_eq!(summary.top_categories().len(), 2);
    }

    #[test]
    fn test_snapshot_for_empty_selection() {
        let store = sample_store();
        let engine = crate::filter::FilterEngine::new(store.extent());
        engine.set_categories(CategorySet::empty());

        let snapshot = SelectionSnapshot::compute(&store, engine.get_context(), TOP_DISPOSITIONS);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.series.len(), store.extent().span());
        assert!(snapshot.dispositions.is_empty());
        assert!(snapshot.summary.peak_year.is_none());
        assert_eq!(snapshot.max_year_total(), 0);
    }
}
