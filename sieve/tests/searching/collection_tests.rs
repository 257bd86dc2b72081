use sieve::{Dialect, FilterCriteria, SearchDefinition, Searcher, compile_filter};

use crate::support::{Child, Family, Toy, families, family_ids, init_logging};

fn run(filter: FilterCriteria<Family>) -> Vec<u32> {
    let definition = SearchDefinition::new().with_filter(filter);
    family_ids(&Searcher::new().search_slice(Some(&definition), &families()).unwrap().result_set)
}

#[test]
fn any_child_equal_to_value() {
    init_logging();
    let filter = FilterCriteria::build(|f| {
        f.where_(Family::CHILDREN).property(Child::AGE).is_equal_to(7);
    });

    let predicate = compile_filter(&Dialect::default(), &filter).unwrap().unwrap();
    assert_eq!(predicate.text(), "children.Any((age == @0))");
    assert_eq!(run(filter), vec![3]);
}

#[test]
fn any_child_within_range() {
    init_logging();
    let filter = FilterCriteria::build(|f| {
        f.where_(Family::CHILDREN).property(Child::AGE).between(9, 12);
    });

    let predicate = compile_filter(&Dialect::default(), &filter).unwrap().unwrap();
    assert_eq!(predicate.text(), "children.Any(((age >= @0) And (age <= @1)))");
    assert_eq!(run(filter), vec![1, 4]);
}

#[test]
fn families_without_children_never_match() {
    init_logging();
    let filter = FilterCriteria::build(|f| {
        f.where_(Family::CHILDREN).property(Child::AGE).not_between(100, 200);
    });

    assert_eq!(run(filter), vec![1, 3, 4]);
}

#[test]
fn collection_criteria_combine_with_siblings() {
    init_logging();
    let filter = FilterCriteria::build(|f| {
        f.where_(Family::CHILDREN)
            .property(Child::NAME)
            .starts_with("b")
            .and(Family::ID)
            .greater_than(1)
            .or(Family::CHILDREN)
            .property(Child::AGE)
            .less_than(5);
    });

    let predicate = compile_filter(&Dialect::default(), &filter).unwrap().unwrap();
    assert_eq!(
        predicate.text(),
        "children.Any(((name ?? \"\").StartsWith(@0))) And (id > @1) Or children.Any((age < @2))"
    );
    assert_eq!(run(filter), vec![1, 4]);
}

#[test]
fn property_scopes_compose_through_nested_collections() {
    init_logging();
    let filter = FilterCriteria::build(|f| {
        f.where_(Family::CHILDREN)
            .property(Child::TOYS)
            .property(Toy::LABEL)
            .is_equal_to("kite".to_string())
            .and(Family::CHILDREN)
            .property(Child::AGE)
            .greater_than(5);
    });

    let predicate = compile_filter(&Dialect::default(), &filter).unwrap().unwrap();
    assert_eq!(
        predicate.text(),
        "children.Any(toys.Any((label == @0))) And children.Any((age > @1))"
    );
    assert_eq!(run(filter), vec![1, 3]);
}

#[test]
fn nested_scope_matches_any_toy_of_any_child() {
    init_logging();
    let filter = FilterCriteria::build(|f| {
        f.where_(Family::CHILDREN)
            .property(Child::TOYS)
            .property(Toy::LABEL)
            .starts_with("b");
    });

    assert_eq!(run(filter), vec![4]);
}
