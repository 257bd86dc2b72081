use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sieve::Searchable;
use uuid::Uuid;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, PartialEq, Searchable)]
pub struct Owner {
    pub name: String,
    pub rank: i64,
}

#[derive(Debug, Clone, PartialEq, Searchable)]
pub struct Sample {
    pub id: u32,
    pub int_property: Option<i32>,
    pub byte_property: Option<u8>,
    pub string_property: Option<String>,
    pub name: String,
    pub flag: bool,
    pub nullable_flag: Option<bool>,
    pub identifier: Uuid,
    pub created: Option<NaiveDate>,
    #[sieve(rename = "DateTime")]
    pub date_time: Option<DateTime<Utc>>,
    #[sieve(nested)]
    pub parent: Option<Owner>,
    #[sieve(skip)]
    pub scratch: Vec<u8>,
}

impl Sample {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            int_property: None,
            byte_property: None,
            string_property: None,
            name: format!("sample-{id:03}"),
            flag: false,
            nullable_flag: None,
            identifier: Uuid::new_v4(),
            created: None,
            date_time: None,
            parent: None,
            scratch: Vec::new(),
        }
    }

    pub fn with_pair(id: u32, int_property: Option<i32>, byte_property: Option<u8>) -> Self {
        Self {
            int_property,
            byte_property,
            ..Self::new(id)
        }
    }
}

/// Deterministic data set with a mix of nulls and duplicates.
pub fn samples(count: u32) -> Vec<Sample> {
    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid timestamp");
    let day_one = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    (0..count)
        .map(|i| Sample {
            int_property: (i % 10 != 0).then_some((i % 7) as i32),
            byte_property: Some((i * 37 % 256) as u8),
            string_property: (i % 3 != 0).then(|| format!("value-{}", i % 5)),
            flag: i % 2 == 0,
            nullable_flag: (i % 4 != 0).then_some(i % 3 == 0),
            created: Some(day_one + Duration::days(i64::from(i % 30))),
            date_time: Some(epoch + Duration::hours(i64::from(i))),
            parent: (i % 5 != 0).then(|| Owner {
                name: format!("owner-{}", i % 4),
                rank: i64::from(i % 9),
            }),
            ..Sample::new(i)
        })
        .collect()
}

/// The four rows used by the grouped-logic truth table.
pub fn truth_table_rows() -> Vec<Sample> {
    vec![
        Sample::with_pair(1, Some(1), Some(221)),
        Sample::with_pair(2, Some(1), Some(123)),
        Sample::with_pair(3, Some(2), Some(50)),
        Sample::with_pair(4, Some(3), Some(221)),
    ]
}

pub fn ids(rows: &[Sample]) -> Vec<u32> {
    rows.iter().map(|row| row.id).collect()
}

#[derive(Debug, Clone, PartialEq, Searchable)]
pub struct Toy {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Searchable)]
pub struct Child {
    pub name: String,
    pub age: i64,
    #[sieve(collection)]
    pub toys: Vec<Toy>,
}

#[derive(Debug, Clone, PartialEq, Searchable)]
pub struct Family {
    pub id: u32,
    #[sieve(collection)]
    pub children: Vec<Child>,
}

fn child(name: &str, age: i64, toys: &[&str]) -> Child {
    Child {
        name: name.to_string(),
        age,
        toys: toys
            .iter()
            .map(|label| Toy {
                label: label.to_string(),
            })
            .collect(),
    }
}

pub fn families() -> Vec<Family> {
    vec![
        Family {
            id: 1,
            children: vec![child("ann", 3, &["kite"]), child("bob", 10, &[])],
        },
        Family {
            id: 2,
            children: Vec::new(),
        },
        Family {
            id: 3,
            children: vec![child("cid", 7, &["drum", "kite"])],
        },
        Family {
            id: 4,
            children: vec![child("bea", 12, &["ball"]), child("dan", 15, &[])],
        },
    ]
}

pub fn family_ids(rows: &[Family]) -> Vec<u32> {
    rows.iter().map(|row| row.id).collect()
}
