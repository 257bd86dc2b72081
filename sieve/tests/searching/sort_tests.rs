use sieve::{Dialect, SearchDefinition, Searchable, Searcher, SortCriteria, SortDirection, compile_sort};

use crate::support::{Sample, ids, init_logging};

/// Byte [null, 221, 56, 56] and Int [null, 6485, 159753, 890].
fn tie_rows() -> Vec<Sample> {
    vec![
        Sample::with_pair(1, None, None),
        Sample::with_pair(2, Some(6485), Some(221)),
        Sample::with_pair(3, Some(159753), Some(56)),
        Sample::with_pair(4, Some(890), Some(56)),
    ]
}

fn sorted(sort: SortCriteria<Sample>) -> Vec<Sample> {
    let definition = SearchDefinition::new().with_sort(sort);
    Searcher::new().search_slice(Some(&definition), &tie_rows()).unwrap().result_set
}

#[test]
fn ties_on_the_first_key_are_ordered_by_the_second() {
    init_logging();
    let mut sort = SortCriteria::new();
    sort.ascending(Sample::BYTE_PROPERTY).ascending(Sample::INT_PROPERTY);
    assert_eq!(
        compile_sort(&Dialect::default(), &sort).unwrap().as_deref(),
        Some("byte_property ASC, int_property ASC")
    );

    let rows = sorted(sort);
    let ints: Vec<Option<i32>> = rows.iter().map(|row| row.int_property).collect();
    assert_eq!(ints, vec![Some(890), Some(159753), Some(6485), None]);
    // nulls sort last when ascending
    assert_eq!(rows.last().map(|row| row.byte_property), Some(None));
}

#[test]
fn nulls_sort_first_when_descending() {
    init_logging();
    let mut sort = SortCriteria::new();
    sort.descending(Sample::BYTE_PROPERTY).descending(Sample::INT_PROPERTY);

    assert_eq!(ids(&sorted(sort)), vec![1, 2, 3, 4]);
}

#[test]
fn equal_keys_keep_source_order() {
    init_logging();
    let mut sort = SortCriteria::new();
    sort.ascending(Sample::BYTE_PROPERTY);

    assert_eq!(ids(&sorted(sort)), vec![3, 4, 2, 1]);
}

#[test]
fn repeating_a_field_replaces_its_direction_in_place() {
    init_logging();
    let mut sort = SortCriteria::new();
    sort.ascending(Sample::BYTE_PROPERTY)
        .ascending(Sample::INT_PROPERTY)
        .descending(Sample::BYTE_PROPERTY);

    assert_eq!(sort.len(), 2);
    assert_eq!(sort.items()[0].direction, SortDirection::Descending);
    assert_eq!(
        compile_sort(&Dialect::default(), &sort).unwrap().as_deref(),
        Some("byte_property DESC, int_property ASC")
    );
    assert_eq!(ids(&sorted(sort)), vec![1, 2, 4, 3]);
}

#[test]
fn sort_applies_before_paging() {
    init_logging();
    let mut definition = SearchDefinition::new().with_page(1).with_page_size(2);
    definition.sort_mut().ascending(Sample::BYTE_PROPERTY).ascending(Sample::INT_PROPERTY);

    let result = Searcher::new().search_slice(Some(&definition), &tie_rows()).unwrap();

    assert_eq!(ids(&result.result_set), vec![2, 1]);
    assert_eq!(result.filtered_record_count, 4);
}

#[derive(Debug, Clone, Searchable)]
struct Reading {
    id: u32,
    score: Option<f64>,
}

/// Every third score is NaN, every seventh is missing.
fn readings() -> Vec<Reading> {
    (0..200)
        .map(|id| {
            let score = match id {
                id if id % 7 == 0 => None,
                id if id % 3 == 0 => Some(f64::NAN),
                id => Some(f64::from((id * 37) % 101) - 50.5),
            };
            Reading { id, score }
        })
        .collect()
}

fn sorted_readings(direction: SortDirection) -> Vec<Reading> {
    let mut definition = SearchDefinition::new();
    definition.sort_mut().by(Reading::SCORE, direction).ascending(Reading::ID);
    Searcher::new().search_slice(Some(&definition), &readings()).unwrap().result_set
}

/// 0 for numbers, 1 for NaN, 2 for missing.
fn band(reading: &Reading) -> u8 {
    match reading.score {
        Some(score) if score.is_nan() => 1,
        Some(_) => 0,
        None => 2,
    }
}

#[test]
fn nan_sorts_after_numbers_and_before_nulls_ascending() {
    init_logging();
    let rows = sorted_readings(SortDirection::Ascending);
    assert_eq!(rows.len(), 200);

    let bands: Vec<u8> = rows.iter().map(band).collect();
    assert!(bands.windows(2).all(|pair| pair[0] <= pair[1]), "{bands:?}");

    let numbers: Vec<f64> = rows.iter().filter_map(|row| row.score).filter(|score| !score.is_nan()).collect();
    assert!(numbers.windows(2).all(|pair| pair[0] <= pair[1]));

    // equal NaN keys fall through to the id key
    let nan_ids: Vec<u32> = rows.iter().filter(|row| band(row) == 1).map(|row| row.id).collect();
    assert!(nan_ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn descending_puts_nulls_then_nan_first() {
    init_logging();
    let rows = sorted_readings(SortDirection::Descending);

    let bands: Vec<u8> = rows.iter().map(band).collect();
    assert!(bands.windows(2).all(|pair| pair[0] >= pair[1]), "{bands:?}");

    let numbers: Vec<f64> = rows.iter().filter_map(|row| row.score).filter(|score| !score.is_nan()).collect();
    assert!(numbers.windows(2).all(|pair| pair[0] >= pair[1]));
}
