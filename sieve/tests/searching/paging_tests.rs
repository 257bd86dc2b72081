use sieve::{Field, SearchDefinition, SearchError, Searcher};

use crate::support::{Sample, ids, init_logging, samples};

fn expected_rows(rows: &[Sample]) -> Vec<Sample> {
    rows.iter()
        .filter(|row| row.int_property.is_some())
        .filter(|row| row.byte_property.is_some_and(|b| b > 100))
        .cloned()
        .collect()
}

fn definition() -> SearchDefinition<Sample> {
    let mut definition = SearchDefinition::new();
    definition.pre_filter_mut().where_(Sample::INT_PROPERTY).is_not_null();
    definition.filter_mut().where_(Sample::BYTE_PROPERTY).greater_than(100);
    definition
}

#[test]
fn counts_match_filtered_set_without_paging() {
    init_logging();
    let rows = samples(237);
    let expected = expected_rows(&rows);

    let result = Searcher::new().search_slice(Some(&definition()), &rows).unwrap();

    assert_eq!(result.filtered_record_count, expected.len() as u64);
    assert_eq!(result.result_set.len(), expected.len());
    assert_eq!(ids(&result.result_set), ids(&expected));
}

#[test]
fn total_count_reflects_only_the_pre_filter() {
    init_logging();
    let rows = samples(237);
    let pre_filtered = rows.iter().filter(|row| row.int_property.is_some()).count() as u64;

    let result = Searcher::new().search_slice(Some(&definition()), &rows).unwrap();

    assert_eq!(result.total_record_count, pre_filtered);
    assert!(result.filtered_record_count < result.total_record_count);

    let mut unfiltered = definition();
    unfiltered.filter = None;
    let result = Searcher::new().search_slice(Some(&unfiltered), &rows).unwrap();
    assert_eq!(result.total_record_count, pre_filtered);
    assert_eq!(result.filtered_record_count, pre_filtered);
}

#[test]
fn consecutive_pages_partition_the_filtered_set() {
    init_logging();
    let rows = samples(237);
    let expected = expected_rows(&rows);
    let page_size = 50_i64;
    let pages = (expected.len() as i64 + page_size - 1) / page_size;
    assert!(pages > 1);

    let searcher = Searcher::new();
    let mut seen = Vec::new();
    for page in 0..pages {
        let mut paged = definition().with_page(page).with_page_size(page_size);
        paged.sort_mut().ascending(Sample::ID);
        let result = searcher.search_slice(Some(&paged), &rows).unwrap();
        assert_eq!(result.page, Some(page));
        assert_eq!(result.page_size, Some(page_size));
        assert_eq!(result.filtered_record_count, expected.len() as u64);
        assert!(result.result_set.len() as i64 <= page_size);
        seen.extend(ids(&result.result_set));
    }

    assert_eq!(seen, ids(&expected));
}

#[test]
fn page_past_the_end_is_empty_but_still_counted() {
    init_logging();
    let rows = samples(120);
    let paged = definition().with_page(40).with_page_size(50);

    let result = Searcher::new().search_slice(Some(&paged), &rows).unwrap();

    assert!(result.result_set.is_empty());
    assert_eq!(result.filtered_record_count, expected_rows(&rows).len() as u64);
    assert!(result.filtered_record_count > 0);
    assert!(!result.has_more());
}

#[test]
fn filter_entry_point_ignores_sort_and_paging() {
    init_logging();
    let rows = samples(150);
    let mut paged = definition().with_page(1).with_page_size(5);
    paged.sort_mut().descending(Sample::NAME);

    let mut filtered = ids(&Searcher::new().filter_slice(Some(&paged), &rows).unwrap());
    filtered.sort_unstable();

    assert_eq!(filtered, ids(&expected_rows(&rows)));
}

#[test]
fn page_or_size_alone_returns_everything_and_echoes_it() {
    init_logging();
    let rows = samples(60);
    let expected = expected_rows(&rows).len();

    let only_page = definition().with_page(3);
    let result = Searcher::new().search_slice(Some(&only_page), &rows).unwrap();
    assert_eq!(result.result_set.len(), expected);
    assert_eq!((result.page, result.page_size), (Some(3), None));

    let only_size = definition().with_page_size(2);
    let result = Searcher::new().search_slice(Some(&only_size), &rows).unwrap();
    assert_eq!(result.result_set.len(), expected);
    assert_eq!((result.page, result.page_size), (None, Some(2)));
}

#[test]
fn negative_paging_values_use_raw_skip_take_arithmetic() {
    init_logging();
    let rows = samples(60);
    let searcher = Searcher::new();

    // skip(-5) skips nothing, take(5) keeps five
    let paged = definition().with_page(-1).with_page_size(5);
    let result = searcher.search_slice(Some(&paged), &rows).unwrap();
    assert_eq!(result.result_set.len(), 5);
    assert_eq!(result.page, Some(-1));

    // skip(-5) then take(-5) keeps nothing
    let paged = definition().with_page(1).with_page_size(-5);
    let result = searcher.search_slice(Some(&paged), &rows).unwrap();
    assert!(result.result_set.is_empty());
    assert!(result.filtered_record_count > 0);

    // skip(10) then take(-5)
    let paged = definition().with_page(-2).with_page_size(-5);
    let result = searcher.search_slice(Some(&paged), &rows).unwrap();
    assert!(result.result_set.is_empty());
}

#[test]
fn missing_definition_returns_the_whole_source() {
    init_logging();
    let rows = samples(25);

    let result = Searcher::new().search_slice(None, &rows).unwrap();

    assert_eq!(result.total_record_count, 25);
    assert_eq!(result.filtered_record_count, 25);
    assert_eq!(ids(&result.result_set), ids(&rows));
    assert_eq!((result.page, result.page_size), (None, None));
    assert_eq!(Searcher::new().filter_slice::<Sample>(None, &rows).unwrap().len(), 25);
}

#[test]
fn empty_criteria_are_no_ops() {
    init_logging();
    let rows = samples(10);
    let definition = SearchDefinition::<Sample>::new()
        .with_filter(Default::default())
        .with_pre_filter(Default::default())
        .with_sort(Default::default());

    let result = Searcher::new().search_slice(Some(&definition), &rows).unwrap();

    assert_eq!(result.filtered_record_count, 10);
    assert_eq!(ids(&result.result_set), ids(&rows));
}

#[test]
fn sort_is_not_compiled_when_nothing_matches() {
    init_logging();
    let rows = samples(30);
    let mut definition = SearchDefinition::<Sample>::new().with_page(0).with_page_size(10);
    definition.filter_mut().where_(Sample::NAME).is_equal_to("nobody".to_string());
    definition.sort_mut().ascending(Field::<Sample, u32>::from_path(""));

    let result = Searcher::new().search_slice(Some(&definition), &rows).unwrap();
    assert_eq!(result.filtered_record_count, 0);
    assert!(result.result_set.is_empty());

    definition.filter = None;
    let err = Searcher::new().search_slice(Some(&definition), &rows).unwrap_err();
    assert!(matches!(err, SearchError::MissingIdentifier { .. }));
}
