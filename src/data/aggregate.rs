use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

use serde::Serialize;

use super::model::{CatalogRecord, ContentType};

/// Separator used inside the multi-valued columns.
pub const LIST_DELIMITER: &str = ", ";

/// Placeholder country/director value that never appears in a ranking.
pub const UNKNOWN: &str = "Unknown";

// ---------------------------------------------------------------------------
// FrequencyTable – counts with deterministic tie-break
// ---------------------------------------------------------------------------

/// Occurrence counter that remembers the order keys were first seen in.
///
/// [`FrequencyTable::ranked`] sorts by count descending with a stable sort,
/// so equal counts keep first-seen order and repeated runs over the same
/// input always produce the same ranking.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    slots: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        FrequencyTable {
            slots: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        match self.slots.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.slots.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn count(&self, key: &K) -> usize {
        self.slots.get(key).map(|&slot| self.entries[slot].1).unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(key, count)` pairs, most frequent first.
    pub fn ranked(self) -> Vec<(K, usize)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeCounts {
    pub movie: usize,
    pub tv_show: usize,
}

impl TypeCounts {
    pub fn total(&self) -> usize {
        self.movie + self.tv_show
    }
}

/// One stacked-series cell: a year, a type and how many titles fall in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTypeCount {
    pub year: i32,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationPoint {
    pub release_year: i32,
    pub duration_minutes: u32,
    pub title: String,
    pub director: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonCount {
    pub seasons: u32,
    pub count: usize,
}

/// Dense country × genre count table. `cells[i][j]` is the count for
/// `countries[i]` and `genres[j]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountryGenreMatrix {
    pub countries: Vec<String>,
    pub genres: Vec<String>,
    pub cells: Vec<Vec<usize>>,
}

impl CountryGenreMatrix {
    pub fn get(&self, country: &str, genre: &str) -> Option<usize> {
        let row = self.countries.iter().position(|c| c == country)?;
        let col = self.genres.iter().position(|g| g == genre)?;
        Some(self.cells[row][col])
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingGroup {
    pub rating: String,
    pub title_lengths: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Columns holding delimiter-separated lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiValuedField {
    Country,
    Director,
    Genre,
}

impl MultiValuedField {
    fn get(self, rec: &CatalogRecord) -> Option<&str> {
        match self {
            MultiValuedField::Country => rec.country.as_deref(),
            MultiValuedField::Director => rec.director.as_deref(),
            MultiValuedField::Genre => rec.listed_in.as_deref(),
        }
    }
}

/// Split a list cell into trimmed, non-empty items.
pub fn split_list<'a>(text: &'a str, delimiter: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    text.split(delimiter)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// First run of ASCII digits anywhere in `text`: "90 min" → 90, "3 Seasons" → 3.
pub fn extract_integer(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits = &text[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

/// Flatten a multi-valued field across records, count, drop excluded values
/// and keep the `top_n` most frequent.
pub fn count_multivalued(
    records: &[CatalogRecord],
    field: MultiValuedField,
    delimiter: &str,
    exclude: &[&str],
    top_n: usize,
) -> Vec<ValueCount> {
    let table: FrequencyTable<&str> = records
        .iter()
        .filter_map(|rec| field.get(rec))
        .flat_map(|text| split_list(text, delimiter))
        .collect();

    table
        .ranked()
        .into_iter()
        .filter(|(value, _)| !exclude.contains(value))
        .take(top_n)
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

pub fn count_by_type(records: &[CatalogRecord]) -> TypeCounts {
    records
        .iter()
        .fold(TypeCounts::default(), |mut acc, rec| {
            match rec.kind {
                ContentType::Movie => acc.movie += 1,
                ContentType::TvShow => acc.tv_show += 1,
            }
            acc
        })
}

fn count_year_type(pairs: impl Iterator<Item = (i32, ContentType)>) -> Vec<YearTypeCount> {
    let mut counts: BTreeMap<(i32, ContentType), usize> = BTreeMap::new();
    for key in pairs {
        *counts.entry(key).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((year, kind), count)| YearTypeCount { year, kind, count })
        .collect()
}

/// Titles per release year and type, ascending by year, Movie before TV Show.
pub fn count_by_year_and_type(records: &[CatalogRecord]) -> Vec<YearTypeCount> {
    count_year_type(records.iter().map(|rec| (rec.release_year, rec.kind)))
}

/// Most frequent ratings; records without a rating are ignored.
pub fn count_by_rating(records: &[CatalogRecord], top_n: usize) -> Vec<ValueCount> {
    let table: FrequencyTable<&str> = records
        .iter()
        .filter_map(|rec| rec.rating.as_deref())
        .collect();

    table
        .ranked()
        .into_iter()
        .take(top_n)
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

/// Movies with a readable minute count, in source order.
pub fn movie_duration_points(records: &[CatalogRecord]) -> Vec<DurationPoint> {
    records
        .iter()
        .filter(|rec| rec.kind == ContentType::Movie)
        .filter_map(|rec| {
            let minutes = extract_integer(rec.duration.as_deref()?)?;
            Some(DurationPoint {
                release_year: rec.release_year,
                duration_minutes: minutes,
                title: rec.title.clone(),
                director: rec.director.clone(),
            })
        })
        .collect()
}

/// TV shows per season count, ascending by season count.
pub fn season_distribution(records: &[CatalogRecord]) -> Vec<SeasonCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for seasons in records
        .iter()
        .filter(|rec| rec.kind == ContentType::TvShow)
        .filter_map(|rec| extract_integer(rec.duration.as_deref()?))
    {
        *counts.entry(seasons).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(seasons, count)| SeasonCount { seasons, count })
        .collect()
}

/// One row of the exploded country × genre join. `None` stands for a record
/// whose list cell was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryGenreRow<'a> {
    pub country: Option<&'a str>,
    pub genre: Option<&'a str>,
}

fn explode<'a>(cell: Option<&'a str>, delimiter: &'a str) -> Vec<Option<&'a str>> {
    let items: Vec<Option<&str>> = cell
        .map(|text| split_list(text, delimiter).map(Some).collect())
        .unwrap_or_default();
    if items.is_empty() {
        vec![None]
    } else {
        items
    }
}

/// Per-record cartesian product of countries and genres, built as two
/// explicit flattening passes.
pub fn explode_country_genre<'a>(
    records: &'a [CatalogRecord],
    delimiter: &'a str,
) -> Vec<CountryGenreRow<'a>> {
    let by_country: Vec<(&CatalogRecord, Option<&str>)> = records
        .iter()
        .flat_map(|rec| {
            explode(rec.country.as_deref(), delimiter)
                .into_iter()
                .map(move |country| (rec, country))
        })
        .collect();

    by_country
        .into_iter()
        .flat_map(|(rec, country)| {
            explode(rec.listed_in.as_deref(), delimiter)
                .into_iter()
                .map(move |genre| CountryGenreRow { country, genre })
        })
        .collect()
}

fn top_set(items: FrequencyTable<&str>, n: usize) -> BTreeSet<String> {
    items
        .ranked()
        .into_iter()
        .take(n)
        .map(|(v, _)| v.to_string())
        .collect()
}

/// Country × genre heatmap for one content type.
///
/// The top countries and top genres are ranked independently over the whole
/// exploded table; "Unknown" takes part in the country ranking but is dropped
/// from the matrix. Axes are sorted alphabetically and missing combinations
/// are zero.
pub fn country_genre_matrix(
    records: &[CatalogRecord],
    type_filter: ContentType,
    delimiter: &str,
    top_countries: usize,
    top_genres: usize,
) -> CountryGenreMatrix {
    let selected: Vec<CatalogRecord> = records
        .iter()
        .filter(|rec| rec.kind == type_filter)
        .cloned()
        .collect();
    let rows = explode_country_genre(&selected, delimiter);

    let countries = top_set(rows.iter().filter_map(|r| r.country).collect(), top_countries);
    let genres = top_set(rows.iter().filter_map(|r| r.genre).collect(), top_genres);

    let mut pairs: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for row in &rows {
        let (Some(country), Some(genre)) = (row.country, row.genre) else {
            continue;
        };
        if country == UNKNOWN || !countries.contains(country) || !genres.contains(genre) {
            continue;
        }
        *pairs.entry((country, genre)).or_default() += 1;
    }

    let row_axis: Vec<String> = pairs
        .keys()
        .map(|(c, _)| c.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let col_axis: Vec<String> = pairs
        .keys()
        .map(|(_, g)| g.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let cells = row_axis
        .iter()
        .map(|country| {
            col_axis
                .iter()
                .map(|genre| {
                    pairs
                        .get(&(country.as_str(), genre.as_str()))
                        .copied()
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect();

    CountryGenreMatrix {
        countries: row_axis,
        genres: col_axis,
        cells,
    }
}

/// Titles added per year and type. Records whose `date_added` did not parse
/// are left out entirely.
pub fn yearly_additions(records: &[CatalogRecord]) -> Vec<YearTypeCount> {
    count_year_type(
        records
            .iter()
            .filter_map(|rec| rec.year_added.map(|year| (year, rec.kind))),
    )
}

/// Title lengths grouped by rating, one group per allowed rating in the order
/// given (groups may be empty).
pub fn title_length_by_rating<S: AsRef<str>>(
    records: &[CatalogRecord],
    allowed_ratings: &[S],
) -> Vec<RatingGroup> {
    allowed_ratings
        .iter()
        .map(|rating| {
            let rating = rating.as_ref();
            RatingGroup {
                rating: rating.to_string(),
                title_lengths: records
                    .iter()
                    .filter(|rec| rec.rating.as_deref() == Some(rating))
                    .map(|rec| rec.title_length)
                    .collect(),
            }
        })
        .collect()
}
