//! Integration tests for the visitable-internals crate.
//!
//! ## Handle Tests
//! - `test_handles_of_mixed_types_share_one_type`: Handles for unrelated
//!   element types live in one `Vec` and still dispatch with the right types
//! - `test_specialized_and_blanket_visitors`: Per-type and blanket visitor
//!   implementations are both selected correctly
//! - `test_dyn_visitor`: A trait object used as the visitor type
//! - `test_borrowing_visitor`: A visitor holding a borrow, so not `'static`
//! - `test_borrowed_elements`: Elements that borrow local data, so not
//!   `'static`
//! - `test_zero_sized_elements`: Zero-sized elements dispatch and read back
//! - `test_visitor_panic_propagates`: Panics raised by a visitor reach the
//!   caller of `accept` unchanged

use std::{
    fmt::Debug,
    panic::{AssertUnwindSafe, catch_unwind},
};

use visitable_internals::{RawHandle, Visitor};

#[derive(Default)]
struct TypeLog(Vec<&'static str>);

impl<E> Visitor<E> for TypeLog {
    fn visit(&mut self, _element: &E) {
        self.0.push(std::any::type_name::<E>());
    }
}

#[test]
fn test_handles_of_mixed_types_share_one_type() {
    let number = 1_i64;
    let flag = true;
    let text = String::from("text");
    let list = vec![1_u8, 2, 3];

    let handles: Vec<RawHandle<TypeLog>> = vec![
        RawHandle::new(&number),
        RawHandle::new(&flag),
        RawHandle::new(&text),
        RawHandle::new(&list),
    ];

    let mut log = TypeLog::default();
    for handle in &handles {
        // SAFETY: All elements outlive `handles` and are never mutated.
        unsafe { handle.accept(&mut log) };
    }

    assert_eq!(
        log.0,
        [
            "i64",
            "bool",
            std::any::type_name::<String>(),
            std::any::type_name::<Vec<u8>>(),
        ]
    );
    assert_eq!(
        handles[2].element_type_name(),
        std::any::type_name::<String>()
    );
}

#[derive(Default)]
struct Mixed {
    ints: Vec<i32>,
    others: Vec<String>,
}

impl Visitor<i32> for Mixed {
    fn visit(&mut self, element: &i32) {
        self.ints.push(*element);
    }
}

impl Visitor<&'static str> for Mixed {
    fn visit(&mut self, element: &&'static str) {
        self.others.push(element.to_string());
    }
}

impl Visitor<f64> for Mixed {
    fn visit(&mut self, element: &f64) {
        self.others.push(format!("{element:.1}"));
    }
}

#[test]
fn test_specialized_and_blanket_visitors() {
    let a = 3_i32;
    let b = "b";
    let c = 2.5_f64;
    let d = -4_i32;

    let handles: [RawHandle<Mixed>; 4] = [
        RawHandle::new(&a),
        RawHandle::new(&b),
        RawHandle::new(&c),
        RawHandle::new(&d),
    ];

    let mut mixed = Mixed::default();
    for handle in handles {
        // SAFETY: All elements outlive the loop and are never mutated.
        unsafe { handle.accept(&mut mixed) };
    }

    assert_eq!(mixed.ints, [3, -4]);
    assert_eq!(mixed.others, ["b", "2.5"]);
}

trait Inspect {
    fn inspect(&mut self, element: &dyn Debug);
}

impl<E: Debug> Visitor<E> for dyn Inspect {
    fn visit(&mut self, element: &E) {
        self.inspect(element);
    }
}

struct DebugLines(Vec<String>);

impl Inspect for DebugLines {
    fn inspect(&mut self, element: &dyn Debug) {
        self.0.push(format!("{element:?}"));
    }
}

#[test]
fn test_dyn_visitor() {
    let first = Some(5_u8);
    let second = ('x', 2_u16);

    let handles: [RawHandle<dyn Inspect>; 2] = [RawHandle::new(&first), RawHandle::new(&second)];

    let mut lines = DebugLines(Vec::new());
    for handle in handles {
        // SAFETY: Both elements outlive the loop and are never mutated.
        unsafe { handle.accept(&mut lines) };
    }

    assert_eq!(lines.0, ["Some(5)", "('x', 2)"]);
}

struct Collect<'a>(&'a mut Vec<u32>);

impl Visitor<u32> for Collect<'_> {
    fn visit(&mut self, element: &u32) {
        self.0.push(*element);
    }
}

#[test]
fn test_borrowing_visitor() {
    let values = [10_u32, 20, 30];
    let handles: Vec<RawHandle<Collect<'_>>> = values.iter().map(RawHandle::new).collect();

    let mut out = Vec::new();
    let mut collect = Collect(&mut out);
    for handle in handles.iter().rev() {
        // SAFETY: `values` outlives `handles` and is never mutated.
        unsafe { handle.accept(&mut collect) };
    }

    assert_eq!(out, [30, 20, 10]);
}

struct Spans<'a>(Vec<&'a str>);

impl<'a> Visitor<&'a str> for Spans<'a> {
    fn visit(&mut self, element: &&'a str) {
        self.0.push(*element);
    }
}

impl<'a> Visitor<(&'a str, usize)> for Spans<'a> {
    fn visit(&mut self, element: &(&'a str, usize)) {
        let (text, start) = *element;
        self.0.push(&text[start..]);
    }
}

#[test]
fn test_borrowed_elements() {
    let line = String::from("key=value");
    let (key, value) = line.split_at(3);
    let pair = (line.as_str(), 4);

    let handles: [RawHandle<Spans<'_>>; 3] = [
        RawHandle::new(&key),
        RawHandle::new(&value),
        RawHandle::new(&pair),
    ];

    let mut spans = Spans(Vec::new());
    for handle in handles {
        // SAFETY: `key`, `value` and `pair` outlive the loop and are never
        // mutated.
        unsafe { handle.accept(&mut spans) };
    }

    assert_eq!(spans.0, ["key", "=value", "value"]);
    assert_eq!(handles[2].element_type_name(), "(&str, usize)");
}

#[test]
fn test_zero_sized_elements() {
    #[derive(Debug, PartialEq)]
    struct Marker;

    let marker = Marker;
    let unit_handle = RawHandle::<TypeLog>::new(&());
    let marker_handle = RawHandle::<TypeLog>::new(&marker);

    let mut log = TypeLog::default();
    // SAFETY: The unit value is promoted to a static and `marker` outlives the
    // handles. Neither is ever mutated.
    unsafe { unit_handle.accept(&mut log) };
    // SAFETY: Same as above.
    unsafe { marker_handle.accept(&mut log) };

    assert_eq!(log.0[0], "()");
    assert!(log.0[1].ends_with("Marker"));

    // SAFETY: The handle was created from a `Marker`, and `marker` outlives the
    // returned reference and is never mutated.
    let element = unsafe { marker_handle.element_ref::<Marker>() };
    assert_eq!(element, &Marker);
}

struct Explode;

impl Visitor<u8> for Explode {
    fn visit(&mut self, element: &u8) {
        panic!("visitor rejected {element}");
    }
}

#[test]
fn test_visitor_panic_propagates() {
    let value = 9_u8;
    let handle = RawHandle::<Explode>::new(&value);

    let result = catch_unwind(AssertUnwindSafe(|| {
        // SAFETY: `value` outlives the closure and is never mutated.
        unsafe { handle.accept(&mut Explode) };
    }));

    let payload = result.unwrap_err();
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .unwrap_or_default();
    assert_eq!(message, "visitor rejected 9");
}
