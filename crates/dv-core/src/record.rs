//! Record model: allegation categories, dispositions and year ranges

use std::fmt;
use std::sync::Arc;
use serde::{Serialize, Deserialize};

/// Allegation classification (FADO type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    AbuseOfAuthority,
    Force,
    Discourtesy,
    OffensiveLanguage,
    /// Catch-all for blank or unrecognised labels
    Unknown,
}

impl Category {
    /// Number of categories, including `Unknown`
    pub const COUNT: usize = 5;

    /// All categories in display (stacking) order
    pub const ALL: [Category; Category::COUNT] = [
        Category::AbuseOfAuthority,
        Category::Force,
        Category::Discourtesy,
        Category::OffensiveLanguage,
        Category::Unknown,
    ];

    /// Human readable label as it appears in the source data
    pub fn label(self) -> &'static str {
        match self {
            Category::AbuseOfAuthority => "Abuse of Authority",
            Category::Force => "Force",
            Category::Discourtesy => "Discourtesy",
            Category::OffensiveLanguage => "Offensive Language",
            Category::Unknown => "Unknown",
        }
    }

    /// Position in [`Category::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parse a raw label. Matching ignores case and surrounding whitespace;
    /// anything unrecognised maps to `Unknown`.
    pub fn from_label(raw: &str) -> Self {
        let trimmed = raw.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
            .unwrap_or(Category::Unknown)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A set of categories backed by a bitmask, so only enum members can be stored
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategorySet(u8);

impl CategorySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self((1 << Category::COUNT) - 1)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0 & (1 << category.index()) != 0
    }

    pub fn insert(&mut self, category: Category) {
        self.0 |= 1 << category.index();
    }

    pub fn remove(&mut self, category: Category) {
        self.0 &= !(1 << category.index());
    }

    /// Insert or remove depending on `enabled`
    pub fn set(&mut self, category: Category, enabled: bool) {
        if enabled {
            self.insert(category);
        } else {
            self.remove(category);
        }
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_all(&self) -> bool {
        *self == Self::all()
    }

    /// Iterate members in display order
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = CategorySet::empty();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl fmt::Debug for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Normalized disposition label. Cloning shares the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Disposition(Arc<str>);

impl Disposition {
    pub const SUBSTANTIATED: &'static str = "Substantiated";
    pub const UNKNOWN: &'static str = "Unknown";

    /// Canonicalize a raw label: trimmed, every `Substantiated*` variant
    /// collapsed to `Substantiated`, missing or blank values to `Unknown`.
    pub fn normalize(raw: Option<&str>) -> Self {
        Self::from_canonical(Self::canonical_label(raw))
    }

    /// The canonical label for a raw value, without allocating
    pub fn canonical_label(raw: Option<&str>) -> &str {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            Self::UNKNOWN
        } else if trimmed.starts_with(Self::SUBSTANTIATED) {
            Self::SUBSTANTIATED
        } else {
            trimmed
        }
    }

    /// Wrap a label that is already canonical
    pub fn from_canonical(label: impl Into<Arc<str>>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single normalized allegation
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: i32,
    pub category: Category,
    pub disposition: Disposition,
    pub precinct: Option<u32>,
}

impl Record {
    pub fn new(year: i32, category: Category, disposition: Disposition, precinct: Option<u32>) -> Self {
        Self { year, category, disposition, precinct }
    }
}

/// Inclusive year interval. `lo <= hi` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    lo: i32,
    hi: i32,
}

impl YearRange {
    /// Years a loaded record may carry
    pub const CALENDAR: YearRange = YearRange { lo: 1, hi: 9999 };

    /// Build a range, swapping the bounds if they are given out of order
    pub fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    pub fn lo(&self) -> i32 {
        self.lo
    }

    pub fn hi(&self) -> i32 {
        self.hi
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.lo && year <= self.hi
    }

    /// Number of years covered
    pub fn span(&self) -> usize {
        (i64::from(self.hi) - i64::from(self.lo) + 1) as usize
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.lo..=self.hi
    }

    /// Clamp both bounds into `extent`
    pub fn clamp_to(&self, extent: YearRange) -> Self {
        Self::new(
            self.lo.clamp(extent.lo, extent.hi),
            self.hi.clamp(extent.lo, extent.hi),
        )
    }

    /// Offset of `year` from the start of the range, if it is inside
    pub fn offset_of(&self, year: i32) -> Option<usize> {
        self.contains(year)
            .then(|| (i64::from(year) - i64::from(self.lo)) as usize)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.lo, self.hi)
    }
}
