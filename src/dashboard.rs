use serde::Serialize;

use crate::config::DashboardConfig;
use crate::data::aggregate::{
    self, CountryGenreMatrix, DurationPoint, MultiValuedField, RatingGroup, SeasonCount,
    TypeCounts, ValueCount, YearTypeCount,
};
use crate::data::model::{Catalog, ContentType};

// ---------------------------------------------------------------------------
// Selector state
// ---------------------------------------------------------------------------

/// The three independent type selectors of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selectors {
    /// Drives the country map.
    pub map_type: ContentType,
    /// Movie → duration scatter, TV Show → season bar.
    pub duration_type: ContentType,
    /// Drives the country × genre heatmap.
    pub heatmap_type: ContentType,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            map_type: ContentType::Movie,
            duration_type: ContentType::Movie,
            heatmap_type: ContentType::Movie,
        }
    }
}

/// Either chart shown by the duration selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum DurationView {
    MovieDurations(Vec<DurationPoint>),
    SeasonCounts(Vec<SeasonCount>),
}

impl DurationView {
    pub fn len(&self) -> usize {
        match self {
            DurationView::MovieDurations(points) => points.len(),
            DurationView::SeasonCounts(counts) => counts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Dashboard – every table the presentation layer plots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub selectors: Selectors,
    pub total_records: usize,
    pub country_distribution: Vec<ValueCount>,
    pub type_counts: TypeCounts,
    pub titles_per_year: Vec<YearTypeCount>,
    pub top_ratings: Vec<ValueCount>,
    pub duration: DurationView,
    pub top_directors: Vec<ValueCount>,
    pub country_genre: CountryGenreMatrix,
    pub yearly_additions: Vec<YearTypeCount>,
    pub title_length_by_rating: Vec<RatingGroup>,
}

impl Dashboard {
    /// Compute every table from scratch for the given selector state.
    pub fn build(catalog: &Catalog, selectors: &Selectors, config: &DashboardConfig) -> Self {
        let selectors = *selectors;
        let records = catalog.records();
        let delimiter = config.delimiter.as_str();
        let excluded = config.excluded();

        let map_subset = catalog.of_type(selectors.map_type);
        let country_distribution = aggregate::count_multivalued(
            map_subset.records(),
            MultiValuedField::Country,
            delimiter,
            &excluded,
            config.top_countries,
        );

        let duration = match selectors.duration_type {
            ContentType::Movie => {
                DurationView::MovieDurations(aggregate::movie_duration_points(records))
            }
            ContentType::TvShow => {
                DurationView::SeasonCounts(aggregate::season_distribution(records))
            }
        };

        let dashboard = Dashboard {
            selectors,
            total_records: catalog.len(),
            country_distribution,
            type_counts: aggregate::count_by_type(records),
            titles_per_year: aggregate::count_by_year_and_type(records),
            top_ratings: aggregate::count_by_rating(records, config.top_ratings),
            duration,
            top_directors: aggregate::count_multivalued(
                records,
                MultiValuedField::Director,
                delimiter,
                &excluded,
                config.top_directors,
            ),
            country_genre: aggregate::country_genre_matrix(
                records,
                selectors.heatmap_type,
                delimiter,
                config.heatmap_countries,
                config.heatmap_genres,
            ),
            yearly_additions: aggregate::yearly_additions(records),
            title_length_by_rating: aggregate::title_length_by_rating(
                records,
                config.allowed_ratings.as_slice(),
            ),
        };

        log::debug!(
            "Dashboard built: {} countries, {} year/type cells, {} duration rows, {}x{} heatmap",
            dashboard.country_distribution.len(),
            dashboard.titles_per_year.len(),
            dashboard.duration.len(),
            dashboard.country_genre.countries.len(),
            dashboard.country_genre.genres.len(),
        );
        dashboard
    }

    /// Recompute for a new selector state. No table is reused.
    pub fn reselect(
        &self,
        catalog: &Catalog,
        selectors: &Selectors,
        config: &DashboardConfig,
    ) -> Self {
        if *selectors != self.selectors {
            log::info!("Selectors changed: {:?} -> {:?}", self.selectors, selectors);
        }
        Self::build(catalog, selectors, config)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::build_catalog;
    use crate::data::model::RawRow;

    fn row(kind: &str, title: &str, country: &str, genres: &str, duration: &str) -> RawRow {
        RawRow {
            title: Some(title.into()),
            kind: Some(kind.into()),
            director: Some("Unknown".into()),
            country: Some(country.into()),
            date_added: Some("September 25, 2021".into()),
            release_year: Some("2020".into()),
            rating: Some("TV-MA".into()),
            duration: Some(duration.into()),
            listed_in: Some(genres.into()),
        }
    }

    fn catalog() -> Catalog {
        let rows = vec![
            row("Movie", "Dick Johnson Is Dead", "United States", "Documentaries", "90 min"),
            row("TV Show", "Blood & Water", "South Africa", "TV Dramas, TV Mysteries", "2 Seasons"),
            row("Movie", "Sankofa", "United States, Ghana", "Dramas", "125 min"),
            row("TV Show", "Kota Factory", "India", "TV Comedies", "2 Seasons"),
        ];
        build_catalog(rows.into_iter().enumerate().collect()).0
    }

    #[test]
    fn selectors_drive_the_filtered_tables() {
        let catalog = catalog();
        let cfg = DashboardConfig::default();

        let movies = Dashboard::build(&catalog, &Selectors::default(), &cfg);
        assert_eq!(movies.country_distribution[0].value, "United States");
        assert_eq!(movies.country_distribution[0].count, 2);
        assert!(matches!(movies.duration, DurationView::MovieDurations(ref p) if p.len() == 2));
        assert_eq!(movies.country_genre.countries, vec!["Ghana", "United States"]);
        assert!(movies.top_directors.is_empty());

        let shows = movies.reselect(
            &catalog,
            &Selectors {
                map_type: ContentType::TvShow,
                duration_type: ContentType::TvShow,
                heatmap_type: ContentType::TvShow,
            },
            &cfg,
        );
        assert_eq!(shows.country_distribution.len(), 2);
        assert_eq!(
            shows.duration,
            DurationView::SeasonCounts(vec![SeasonCount { seasons: 2, count: 2 }])
        );
        assert_eq!(shows.type_counts, movies.type_counts);
        assert_eq!(shows.type_counts.total(), catalog.len());
    }

    #[test]
    fn rebuilding_yields_identical_json() {
        let catalog = catalog();
        let cfg = DashboardConfig::default();
        let a = Dashboard::build(&catalog, &Selectors::default(), &cfg).to_json().unwrap();
        let b = Dashboard::build(&catalog, &Selectors::default(), &cfg).to_json().unwrap();
        assert_eq!(a, b);
        assert!(a.contains("\"kind\": \"movie_durations\""));
    }

    #[test]
    fn configured_delimiter_reaches_every_list_table() {
        let rows = vec![
            RawRow {
                director: Some("Jan Suter|Raúl Campos".into()),
                ..row("Movie", "a", "India|Spain", "Dramas|Comedies", "90 min")
            },
            RawRow {
                director: Some("Jan Suter".into()),
                ..row("Movie", "b", "Spain", "Dramas", "100 min")
            },
        ];
        let catalog = build_catalog(rows.into_iter().enumerate().collect()).0;
        let cfg = DashboardConfig {
            delimiter: "|".to_string(),
            ..DashboardConfig::default()
        };

        let dash = Dashboard::build(&catalog, &Selectors::default(), &cfg);
        assert_eq!(
            dash.country_distribution,
            vec![
                ValueCount { value: "Spain".into(), count: 2 },
                ValueCount { value: "India".into(), count: 1 },
            ]
        );
        assert_eq!(dash.top_directors[0], ValueCount { value: "Jan Suter".into(), count: 2 });
        assert_eq!(dash.country_genre.countries, vec!["India", "Spain"]);
        assert_eq!(dash.country_genre.get("Spain", "Dramas"), Some(2));
        assert_eq!(dash.country_genre.total(), 5);
    }

    #[test]
    fn empty_catalog_builds_empty_tables() {
        let dash = Dashboard::build(
            &Catalog::default(),
            &Selectors::default(),
            &DashboardConfig::default(),
        );
        assert_eq!(dash.total_records, 0);
        assert!(dash.duration.is_empty());
        assert_eq!(dash.country_genre, CountryGenreMatrix::default());
        assert_eq!(dash.title_length_by_rating.len(), 13);
    }
}
