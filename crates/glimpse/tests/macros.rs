//! The printing entry points write to stdout; these tests check that they run
//! with every argument form and pick up settings from the environment.

use glimpse::{
    compact_debug, compact_debug_any, glimpse, glimpse_raw, glimpse_wrapped, named_fn,
    raw_debug, reset_width_detector, set_width_detector, wrapped_debug, IsCallable,
};
use serial_test::serial;

#[test]
#[serial]
fn test_macro_forms() {
    set_width_detector(|| Some(50));
    let scores: Vec<i64> = (0..200).collect();
    glimpse!(scores);
    glimpse!(scores, highlighted);
    glimpse!(&scores[..3]);
    glimpse_raw!(scores);
    glimpse_raw!(scores, highlighted);
    glimpse_wrapped!(scores);
    glimpse_wrapped!(scores, lines = 2);
    glimpse_wrapped!(scores, highlighted);
    glimpse_wrapped!(scores, lines = 2, highlighted);
    reset_width_detector();
}

#[test]
#[serial]
fn test_functions_without_hint() {
    set_width_detector(|| Some(50));
    let total = 12;
    compact_debug(&total, None, false);
    raw_debug(&"text", None, true);
    wrapped_debug(&vec![1.5; 40], None, Some(2), false);
    compact_debug_any(&total, None, false);
    reset_width_detector();
}

#[test]
fn test_named_fn() {
    fn scale(x: f64) -> f64 {
        x * 2.0
    }
    let f = named_fn!(scale);
    assert_eq!(f.callable_name(), "scale");
    assert_eq!((f.get())(2.0), 4.0);
}
