//! Integration tests for `#[derive(Inspect)]`.

#![cfg(feature = "derive")]
#![allow(dead_code)] // skipped fields are never read

use glimpse::{classify, format_summary, HasLabeledFields, Inspect, SemanticType};

#[derive(Inspect)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Inspect)]
#[inspect(name = "Run")]
struct TrainingRun {
    epoch: u32,
    #[inspect(rename = "lr")]
    learning_rate: f64,
    #[inspect(skip)]
    checkpoint: Vec<u8>,
}

#[derive(Inspect)]
struct Pair(u8, &'static str);

#[derive(Inspect)]
struct Labeled<T> {
    label: String,
    value: T,
}

#[derive(Inspect)]
struct Marker;

#[derive(Inspect)]
struct Outer {
    origin: Point,
    tags: Vec<&'static str>,
}

fn names(value: &dyn HasLabeledFields) -> Vec<String> {
    value
        .fields()
        .into_iter()
        .map(|field| field.name.into_owned())
        .collect()
}

#[test]
fn test_record_classification() {
    let p = Point { x: 1, y: 2 };
    let class = classify(&p);
    assert_eq!(class.kind(), SemanticType::Record);
    assert_eq!(class.label(), "Point");
}

#[test]
fn test_fields_in_declaration_order() {
    let p = Point { x: 1, y: 2 };
    assert_eq!(names(&p), ["x", "y"]);
    assert_eq!(format_summary("p", &p, 60), "p (Point) = x=1 (int), y=2 (int)");
}

#[test]
fn test_skip_rename_and_name() {
    let run = TrainingRun {
        epoch: 3,
        learning_rate: 0.01,
        checkpoint: vec![0; 16],
    };
    assert_eq!(names(&run), ["epoch", "lr"]);
    assert_eq!(
        format_summary("run", &run, 60),
        "run (Run) = epoch=3 (int), lr=0.01 (float)"
    );
}

#[test]
fn test_tuple_struct() {
    let pair = Pair(7, "seven");
    assert_eq!(names(&pair), ["0", "1"]);
    assert_eq!(
        format_summary("pair", &pair, 60),
        "pair (Pair) = 0=7 (int), 1=\"seven\" (str)"
    );
}

#[test]
fn test_generic_record() {
    let labeled = Labeled {
        label: "size".to_string(),
        value: vec![1, 2],
    };
    assert_eq!(
        format_summary("l", &labeled, 80),
        "l (Labeled) = label=\"size\" (str), value=[1, 2] (list)"
    );
}

#[test]
fn test_unit_struct() {
    assert_eq!(format_summary("m", &Marker, 40), "m (Marker) = ()");
}

#[test]
fn test_nested_record() {
    let outer = Outer {
        origin: Point { x: 0, y: 5 },
        tags: vec!["a"],
    };
    assert_eq!(
        format_summary("o", &outer, 80),
        "o (Outer) = origin=x=0 (int), y=5 (int) (Point), tags=[\"a\"] (list)"
    );
}

#[test]
fn test_narrow_record_drops_annotations_first() {
    let p = Point { x: 1, y: 2 };
    assert_eq!(format_summary("p", &p, 28), "p (Point) = x=1 (int), y=2");
}
