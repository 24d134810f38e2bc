use std::io::Write;

use catalog_dash::data::aggregate::{self, MultiValuedField, SeasonCount, ValueCount};
use catalog_dash::data::loader;
use catalog_dash::{ContentType, Dashboard, DashboardConfig, DurationView, Selectors};

const CATALOG: &str = "\
type,title,director,country,date_added,release_year,rating,duration,listed_in
Movie,Dick Johnson Is Dead,Kirsten Johnson,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries
Movie,My Little Pony: A New Generation,\"Robert Cullen, José Luis Ucha\",,\"September 24, 2021\",2021,PG,,Children & Family Movies
TV Show,Blood & Water,,South Africa,\"September 24, 2021\",2021,TV-MA,3 Seasons,\"International TV Shows, TV Dramas\"
TV Show,Jailbirds New Orleans,,Unknown,not a date,2021,TV-MA,1 Season,\"Docuseries, Reality TV\"
Movie,Sankofa,Haile Gerima,\"United States, Ghana, Burkina Faso\",\"September 24, 2021\",1993,TV-MA,125 min,\"Dramas, Independent Movies\"
";

fn load_sample() -> catalog_dash::Catalog {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();
    loader::load(file.path()).unwrap()
}

#[test]
fn movie_and_show_durations_resolve_units_by_type() {
    let catalog = load_sample();
    let points = aggregate::movie_duration_points(catalog.records());
    let minutes: Vec<u32> = points.iter().map(|p| p.duration_minutes).collect();
    assert_eq!(minutes, vec![90, 125]);

    assert_eq!(
        aggregate::season_distribution(catalog.records()),
        vec![
            SeasonCount { seasons: 1, count: 1 },
            SeasonCount { seasons: 3, count: 1 },
        ]
    );
}

#[test]
fn unknown_country_only_affects_country_tables() {
    let catalog = load_sample();
    let shows = catalog.of_type(ContentType::TvShow);
    let countries = aggregate::count_multivalued(
        shows.records(),
        MultiValuedField::Country,
        aggregate::LIST_DELIMITER,
        &[aggregate::UNKNOWN],
        15,
    );
    assert_eq!(
        countries,
        vec![ValueCount { value: "South Africa".into(), count: 1 }]
    );
    assert_eq!(aggregate::count_by_type(catalog.records()).tv_show, 2);
}

#[test]
fn unparsed_dates_only_drop_out_of_yearly_additions() {
    let catalog = load_sample();
    let added: usize = aggregate::yearly_additions(catalog.records())
        .iter()
        .map(|c| c.count)
        .sum();
    assert_eq!(added, 4);
    assert_eq!(catalog.len(), 5);
}

#[test]
fn full_pipeline_is_reproducible() {
    let cfg = DashboardConfig::default();
    let selectors = Selectors {
        map_type: ContentType::Movie,
        duration_type: ContentType::TvShow,
        heatmap_type: ContentType::Movie,
    };

    let first = Dashboard::build(&load_sample(), &selectors, &cfg);
    let second = Dashboard::build(&load_sample(), &selectors, &cfg);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

    assert!(matches!(first.duration, DurationView::SeasonCounts(_)));
    assert_eq!(first.country_distribution[0].value, "United States");
    assert_eq!(first.country_genre.get("Ghana", "Dramas"), Some(1));
    assert_eq!(first.top_directors.len(), 4);
    assert_eq!(first.top_ratings[0], ValueCount { value: "TV-MA".into(), count: 3 });
}
