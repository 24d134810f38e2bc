use super::model::{Catalog, CatalogRecord, ContentType};

// ---------------------------------------------------------------------------
// Type filter: the only selector the dashboard exposes
// ---------------------------------------------------------------------------

/// Return indices of records whose `type` equals `kind`.
pub fn indices_of_type(records: &[CatalogRecord], kind: ContentType) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.kind == kind)
        .map(|(i, _)| i)
        .collect()
}

impl Catalog {
    /// Fresh copy holding only records of the given type. The source catalog
    /// is left untouched.
    pub fn of_type(&self, kind: ContentType) -> Catalog {
        let records = self.records();
        Catalog::from_records(
            indices_of_type(records, kind)
                .into_iter()
                .map(|i| records[i].clone())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRow;

    fn record(kind: &str, title: &str) -> CatalogRecord {
        CatalogRecord::from_raw(RawRow {
            title: Some(title.into()),
            kind: Some(kind.into()),
            release_year: Some("2020".into()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn splits_by_type_preserving_order() {
        let catalog = Catalog::from_records(vec![
            record("Movie", "a"),
            record("TV Show", "b"),
            record("Movie", "c"),
        ]);

        let movies = catalog.of_type(ContentType::Movie);
        let titles: Vec<&str> = movies.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);

        assert_eq!(catalog.of_type(ContentType::TvShow).len(), 1);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn empty_catalog_filters_to_empty() {
        let catalog = Catalog::default();
        assert!(catalog.of_type(ContentType::Movie).is_empty());
    }
}
