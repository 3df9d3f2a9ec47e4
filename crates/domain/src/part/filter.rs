//! Part lookup filter.

use common::PartId;
use serde::{Deserialize, Serialize};

use super::{Category, Part};

/// Inclusion lists for looking up parts.
///
/// Every populated list must match (AND); an empty list matches everything.
/// Within `tags` a part matches if it carries *any* of the listed tags, since a
/// part can belong to several tag groups at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartsFilter {
    pub ids: Vec<PartId>,
    pub names: Vec<String>,
    pub categories: Vec<Category>,
    pub manufacturer_countries: Vec<String>,
    pub tags: Vec<String>,
}

impl PartsFilter {
    /// Creates a filter that matches every part.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an identifier-only filter.
    pub fn by_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PartId>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Restricts to the given names.
    pub fn with_names<I, T>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts to the given categories.
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    /// Restricts to the given manufacturer countries.
    pub fn with_manufacturer_countries<I, T>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.manufacturer_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts to parts carrying any of the given tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if no list is populated.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
            && self.names.is_empty()
            && self.categories.is_empty()
            && self.manufacturer_countries.is_empty()
            && self.tags.is_empty()
    }

    /// Returns true if `part` passes every populated list.
    pub fn matches(&self, part: &Part) -> bool {
        included(&self.ids, &part.id)
            && included(&self.names, &part.name)
            && included(&self.categories, &part.category)
            && included(&self.manufacturer_countries, &part.manufacturer.country)
            && self.matches_tags(part)
    }

    fn matches_tags(&self, part: &Part) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|tag| part.tags.contains(tag))
    }
}

fn included<T: PartialEq>(list: &[T], value: &T) -> bool {
    list.is_empty() || list.contains(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Money;
    use crate::part::Manufacturer;

    fn engine() -> Part {
        Part::new("p1", "Raptor", Money::from_cents(10000), 3)
            .with_category(Category::Engine)
            .with_manufacturer(Manufacturer {
                name: "Spacecraft Inc".to_string(),
                country: "USA".to_string(),
                website: "https://example.com".to_string(),
            })
            .with_tags(["heavy", "reusable"])
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = PartsFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&engine()));
    }

    #[test]
    fn test_ids_filter() {
        assert!(PartsFilter::by_ids(["p1", "p9"]).matches(&engine()));
        assert!(!PartsFilter::by_ids(["p2"]).matches(&engine()));
    }

    #[test]
    fn test_populated_lists_are_anded() {
        let matching = PartsFilter::by_ids(["p1"])
            .with_names(["Raptor"])
            .with_categories([Category::Engine])
            .with_manufacturer_countries(["USA"]);
        assert!(matching.matches(&engine()));

        let wrong_country = matching.clone().with_manufacturer_countries(["Germany"]);
        assert!(!wrong_country.matches(&engine()));

        let wrong_category = matching.with_categories([Category::Wing]);
        assert!(!wrong_category.matches(&engine()));
    }

    #[test]
    fn test_tags_match_on_any_overlap() {
        let filter = PartsFilter::new().with_tags(["light", "reusable"]);
        assert!(filter.matches(&engine()));

        let filter = PartsFilter::new().with_tags(["light", "cheap"]);
        assert!(!filter.matches(&engine()));
    }

    #[test]
    fn test_part_without_tags_never_matches_tag_filter() {
        let untagged = Part::new("p2", "Tank", Money::from_cents(500), 1);
        assert!(!PartsFilter::new().with_tags(["heavy"]).matches(&untagged));
        assert!(PartsFilter::new().matches(&untagged));
    }

    #[test]
    fn test_tags_or_combines_with_other_fields_and() {
        let filter = PartsFilter::new()
            .with_categories([Category::Wing])
            .with_tags(["heavy"]);
        assert!(!filter.matches(&engine()));
    }

    #[test]
    fn test_missing_lists_deserialize_as_empty() {
        let filter: PartsFilter = serde_json::from_str(r#"{"ids":["p1"]}"#).unwrap();
        assert_eq!(filter, PartsFilter::by_ids(["p1"]));
    }
}
