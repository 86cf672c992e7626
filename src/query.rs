//! Query engine: search, category filter and sort over the catalog.
//!
//! [`filter_and_sort`] is a pure function of the catalog and a [`Query`].
//! Its output is always a subsequence of the catalog, either in store order
//! ([`SortMode::Relevance`]) or stably sorted by title
//! ([`SortMode::Alphabetical`]).

use crate::catalog::{Catalog, Category, Service};
use feruca::Collator;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum QueryParseError {
    #[error("Unknown category: {0} (expected any, manufacturing, delivery, installation or technical)")]
    Category(String),
    #[error("Unknown sort mode: {0} (expected relevance or alphabetical)")]
    Sort(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    Any,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryFilter::Any => "any",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    /// `any` followed by every category, in filter-control order.
    pub fn all() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::Any).chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }
}

impl FromStr for CategoryFilter {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "any" => Ok(CategoryFilter::Any),
            other => Category::parse(other)
                .map(CategoryFilter::Only)
                .ok_or_else(|| QueryParseError::Category(other.to_string())),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Catalog order.
    #[default]
    Relevance,
    /// By title, locale-style.
    Alphabetical,
}

impl SortMode {
    pub const ALL: [SortMode; 2] = [SortMode::Relevance, SortMode::Alphabetical];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::Alphabetical => "alphabetical",
        }
    }
}

impl FromStr for SortMode {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "relevance" => Ok(SortMode::Relevance),
            "alpha" | "alphabetical" => Ok(SortMode::Alphabetical),
            other => Err(QueryParseError::Sort(other.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three inputs of a listing query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub term: String,
    pub category: CategoryFilter,
    pub sort: SortMode,
}

impl Query {
    pub fn new(term: impl Into<String>, category: CategoryFilter, sort: SortMode) -> Self {
        Self {
            term: term.into(),
            category,
            sort,
        }
    }

    /// Whether a single record passes the category and term predicates.
    ///
    /// The term must occur within one field; a match never spans fields.
    pub fn matches(&self, service: &Service) -> bool {
        if !self.category.matches(service.category) {
            return false;
        }
        let term = self.term.to_lowercase();
        term.is_empty()
            || searchable_fields(service).any(|field| field.to_lowercase().contains(&term))
    }
}

fn searchable_fields(service: &Service) -> impl Iterator<Item = &str> {
    [
        service.title.as_str(),
        service.short.as_str(),
        service.description.as_str(),
    ]
    .into_iter()
}

/// Lowercased searchable fields, one per line, for the generated pages.
///
/// The browser matches the term against each line separately, the same way
/// [`Query::matches`] checks each field.
pub fn search_haystack(service: &Service) -> String {
    searchable_fields(service)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn filter_and_sort<'a>(catalog: &'a Catalog, query: &Query) -> Vec<&'a Service> {
    let mut out: Vec<&Service> = catalog
        .services()
        .iter()
        .filter(|s| query.matches(s))
        .collect();
    if query.sort == SortMode::Alphabetical {
        let mut collator = Collator::default();
        // sort_by is stable: equal titles keep catalog order
        out.sort_by(|a, b| collator.collate(a.title.as_str(), b.title.as_str()));
    }
    out
}

/// Locale title comparison using the Unicode Collation Algorithm (CLDR root).
///
/// Accents and case are ignored at the primary level, so `Éclair` sorts
/// with the e's; when two titles differ only by case, lowercase sorts first.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::stock_catalog;

    fn ids<'a>(services: &[&'a Service]) -> Vec<&'a str> {
        services.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_catalog_in_order() {
        let catalog = stock_catalog();
        let out = filter_and_sort(&catalog, &Query::default());
        assert_eq!(out.len(), catalog.services().len());
        assert_eq!(ids(&out)[0], "stock-bricks");
        assert_eq!(ids(&out)[7], "testing");
    }

    #[test]
    fn paver_term_matches_only_pavers() {
        let catalog = stock_catalog();
        let out = filter_and_sort(&catalog, &Query::new("paver", CategoryFilter::Any, SortMode::Relevance));
        assert_eq!(ids(&out), ["pavers"]);
    }

    #[test]
    fn delivery_category_matches_only_delivery() {
        let catalog = stock_catalog();
        let query = Query::new("", CategoryFilter::Only(Category::Delivery), SortMode::Relevance);
        assert_eq!(ids(&filter_and_sort(&catalog, &query)), ["delivery"]);
    }

    #[test]
    fn term_is_case_insensitive() {
        let catalog = stock_catalog();
        let lower = filter_and_sort(&catalog, &Query::new("sans", CategoryFilter::Any, SortMode::Relevance));
        let upper = filter_and_sort(&catalog, &Query::new("SANS", CategoryFilter::Any, SortMode::Relevance));
        assert_eq!(ids(&lower), ids(&upper));
        // "SANS" appears in the kerbs and testing descriptions
        assert_eq!(ids(&lower), ["kerbs", "testing"]);
    }

    #[test]
    fn term_searches_short_and_description() {
        let catalog = stock_catalog();
        let by_short = filter_and_sort(&catalog, &Query::new("patios", CategoryFilter::Any, SortMode::Relevance));
        assert_eq!(ids(&by_short), ["pavers"]);
        let by_desc = filter_and_sort(&catalog, &Query::new("haulage", CategoryFilter::Any, SortMode::Relevance));
        assert_eq!(ids(&by_desc), ["delivery"]);
    }

    #[test]
    fn specs_are_not_searched() {
        let catalog = stock_catalog();
        let out = filter_and_sort(&catalog, &Query::new("R221", CategoryFilter::Any, SortMode::Relevance));
        assert!(out.is_empty());
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let catalog = stock_catalog();
        let out = filter_and_sort(&catalog, &Query::new("zzz-nothing", CategoryFilter::Any, SortMode::Alphabetical));
        assert!(out.is_empty());
    }

    #[test]
    fn category_and_term_combine() {
        let catalog = stock_catalog();
        let query = Query::new("testing", CategoryFilter::Only(Category::Manufacturing), SortMode::Relevance);
        assert!(filter_and_sort(&catalog, &query).is_empty());
        let query = Query::new("testing", CategoryFilter::Only(Category::Technical), SortMode::Relevance);
        assert_eq!(ids(&filter_and_sort(&catalog, &query)), ["testing"]);
    }

    #[test]
    fn alphabetical_is_non_decreasing() {
        let catalog = stock_catalog();
        let out = filter_and_sort(&catalog, &Query::new("", CategoryFilter::Any, SortMode::Alphabetical));
        assert_eq!(out.len(), 8);
        for pair in out.windows(2) {
            assert_ne!(compare_titles(&pair[0].title, &pair[1].title), Ordering::Greater);
        }
        assert_eq!(out[0].id, "block-bricks");
        assert_eq!(out[7].id, "turnkey");
    }

    #[test]
    fn output_is_subset_and_predicate_exact() {
        let catalog = stock_catalog();
        let terms = ["", "brick", "concrete", "and", "x", "SANS", "delivery", "blocks\ndriveways"];
        for term in terms {
            for category in CategoryFilter::all() {
                for sort in SortMode::ALL {
                    let query = Query::new(term, category, sort);
                    let out = filter_and_sort(&catalog, &query);
                    for s in catalog.services() {
                        let included = out.iter().any(|o| o.id == s.id);
                        let needle = term.to_lowercase();
                        let in_category = match category {
                            CategoryFilter::Any => true,
                            CategoryFilter::Only(c) => s.category == c,
                        };
                        let expected = in_category
                            && (s.title.to_lowercase().contains(&needle)
                                || s.short.to_lowercase().contains(&needle)
                                || s.description.to_lowercase().contains(&needle));
                        assert_eq!(included, expected, "{term:?} {category} {sort} {}", s.id);
                    }
                    if sort == SortMode::Relevance {
                        let positions: Vec<usize> = out
                            .iter()
                            .map(|o| catalog.services().iter().position(|s| s.id == o.id).unwrap())
                            .collect();
                        assert!(positions.windows(2).all(|w| w[0] < w[1]));
                    }
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let catalog = stock_catalog();
        let query = Query::new("and", CategoryFilter::Any, SortMode::Alphabetical);
        assert_eq!(
            ids(&filter_and_sort(&catalog, &query)),
            ids(&filter_and_sort(&catalog, &query))
        );
    }

    #[test]
    fn compare_titles_ignores_case_first() {
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("Zebra", "apple"), Ordering::Greater);
        assert_eq!(compare_titles("brick", "Brick"), Ordering::Less);
        assert_eq!(compare_titles("Brick", "Brick"), Ordering::Equal);
    }

    #[test]
    fn parse_sort_modes() {
        assert_eq!("alpha".parse::<SortMode>(), Ok(SortMode::Alphabetical));
        assert_eq!("alphabetical".parse::<SortMode>(), Ok(SortMode::Alphabetical));
        assert_eq!("relevance".parse::<SortMode>(), Ok(SortMode::Relevance));
        assert_eq!("".parse::<SortMode>(), Ok(SortMode::Relevance));
        assert!(matches!("newest".parse::<SortMode>(), Err(QueryParseError::Sort(_))));
    }

    #[test]
    fn parse_category_filters() {
        assert_eq!("any".parse::<CategoryFilter>(), Ok(CategoryFilter::Any));
        assert_eq!("".parse::<CategoryFilter>(), Ok(CategoryFilter::Any));
        assert_eq!(
            "technical".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Technical))
        );
        assert!(matches!("roofing".parse::<CategoryFilter>(), Err(QueryParseError::Category(_))));
    }

    #[test]
    fn haystack_keeps_fields_apart() {
        let catalog = stock_catalog();
        let pavers = catalog.service("pavers").unwrap();
        let hay = search_haystack(pavers);
        assert!(hay.starts_with("pavers & interlocking blocks\n"));
        assert!(!hay.contains('P'));
    }

    #[test]
    fn term_spanning_two_fields_does_not_match() {
        let catalog = stock_catalog();
        // pavers title ends in "blocks", its short text starts with "driveways"
        let query = Query::new("blocks\ndriveways", CategoryFilter::Any, SortMode::Relevance);
        assert!(filter_and_sort(&catalog, &query).is_empty());
        let query = Query::new("blocks driveways", CategoryFilter::Any, SortMode::Relevance);
        assert!(filter_and_sort(&catalog, &query).is_empty());
    }

    #[test]
    fn trailing_space_is_part_of_the_term() {
        let catalog = stock_catalog();
        let query = Query::new("logistics", CategoryFilter::Any, SortMode::Relevance);
        assert_eq!(ids(&filter_and_sort(&catalog, &query)), ["delivery"]);
        let query = Query::new("logistics ", CategoryFilter::Any, SortMode::Relevance);
        assert!(filter_and_sort(&catalog, &query).is_empty());
    }

    fn titled(id: &str, title: &str) -> Service {
        let mut service = stock_catalog().service("pavers").unwrap().clone();
        service.id = id.to_string();
        service.title = title.to_string();
        service
    }

    #[test]
    fn accented_titles_sort_with_their_base_letter() {
        assert_eq!(compare_titles("Éclair", "Fence"), Ordering::Less);
        assert_eq!(compare_titles("Éclair", "Drain"), Ordering::Greater);
        assert_eq!(compare_titles("eclair", "éclair"), Ordering::Less);

        let catalog = Catalog::new(
            vec![
                titled("zinc", "Zinc Flashing"),
                titled("eclair", "Éclair Tiles"),
                titled("fence", "Fence Posts"),
                titled("aggregate", "Aggregate"),
            ],
            Vec::new(),
        )
        .unwrap();
        let out = filter_and_sort(&catalog, &Query::new("", CategoryFilter::Any, SortMode::Alphabetical));
        assert_eq!(ids(&out), ["aggregate", "eclair", "fence", "zinc"]);
    }
}
