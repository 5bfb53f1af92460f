//! End-to-end ownership scenarios for the `owned_ptr` package.
//!
//! These tests exercise the public API the way a caller would, verifying that every
//! resource is released exactly once no matter how ownership moves around.

#![allow(
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::indexing_slicing,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]

use std::cell::RefCell;
use std::ptr::{self, NonNull};
use std::rc::Rc;

use owned_ptr::{Deleter, Null, Owned, OwnedArray, make_owned, swap, swap_arrays};

/// Shared log of everything that happened to the widgets in one test.
type EventLog = Rc<RefCell<Vec<String>>>;

struct Widget {
    value: u32,
    log: EventLog,
}

impl Widget {
    fn new(value: u32, log: &EventLog) -> Self {
        Self {
            value,
            log: Rc::clone(log),
        }
    }

    fn value(&self) -> u32 {
        self.value
    }
}

impl Drop for Widget {
    fn drop(&mut self) {
        self.log.borrow_mut().push(format!("drop {}", self.value));
    }
}

/// Deleter that logs the value it is about to release.
#[derive(Default)]
struct LoggingDelete;

impl Deleter<Widget> for LoggingDelete {
    unsafe fn delete(&mut self, ptr: NonNull<Widget>) {
        let widget = unsafe { Box::from_raw(ptr.as_ptr()) };
        widget
            .log
            .borrow_mut()
            .push(format!("release {}", widget.value));
    }
}

fn events(log: &EventLog) -> Vec<String> {
    log.borrow().clone()
}

#[test]
fn make_owned_widget_is_released_once() {
    let log = EventLog::default();

    let owned = make_owned(Widget::new(42, &log));

    assert!(!owned.is_null());
    assert!(owned != Null);
    assert_eq!(owned.value(), 42);
    assert!(events(&log).is_empty());

    drop(owned);

    assert_eq!(events(&log), vec!["drop 42"]);
}

#[test]
fn reset_sequence_releases_in_order() {
    let log = EventLog::default();
    let p1 = Box::into_raw(Box::new(Widget::new(1, &log)));
    let p2 = Box::into_raw(Box::new(Widget::new(2, &log)));

    let mut owned = Owned::<Widget, LoggingDelete>::new();

    unsafe { owned.reset(p1) };
    assert!(events(&log).is_empty());

    unsafe { owned.reset(p2) };
    assert_eq!(events(&log), vec!["release 1", "drop 1"]);
    assert_eq!(owned.value(), 2);

    drop(owned);
    assert_eq!(
        events(&log),
        vec!["release 1", "drop 1", "release 2", "drop 2"]
    );
}

#[test]
fn ownership_chain_releases_only_at_the_end() {
    let log = EventLog::default();

    let mut first = make_owned(Widget::new(7, &log));
    let mut second: Owned<Widget> = Owned::new();
    second.assign(&mut first);

    let third = second.take();
    let fourth = third;

    assert!(first.is_null());
    assert!(second.is_null());
    assert!(events(&log).is_empty());

    drop(first);
    drop(second);
    assert!(events(&log).is_empty());

    drop(fourth);
    assert_eq!(events(&log), vec!["drop 7"]);
}

#[test]
fn swapped_owners_release_each_others_resources() {
    let log = EventLog::default();

    let mut a = make_owned(Widget::new(1, &log));
    let mut b = make_owned(Widget::new(2, &log));

    swap(&mut a, &mut b);

    drop(a);
    assert_eq!(events(&log), vec!["drop 2"]);

    drop(b);
    assert_eq!(events(&log), vec!["drop 2", "drop 1"]);
}

#[test]
fn released_resource_survives_the_owner() {
    let log = EventLog::default();

    let mut owned = make_owned(Widget::new(5, &log));
    let raw = owned.release().unwrap();
    drop(owned);

    assert!(events(&log).is_empty());

    // Ownership can be handed to a fresh owner again.
    let again = unsafe { Owned::<Widget>::from_raw(raw.as_ptr()) };
    assert_eq!(again.value(), 5);

    drop(again);
    assert_eq!(events(&log), vec!["drop 5"]);
}

#[test]
fn null_assignment_releases_and_empties() {
    let log = EventLog::default();

    let mut owned = make_owned(Widget::new(3, &log));
    assert_eq!(owned.value(), 3);

    owned = Null.into();

    assert!(owned.is_null());
    assert_eq!(events(&log), vec!["drop 3"]);
}

#[test]
fn array_owner_releases_every_element() {
    let log = EventLog::default();

    let array = OwnedArray::from_fn(3, |i| Widget::new(u32::try_from(i).unwrap(), &log));

    for i in 0..array.len() {
        assert_eq!(array[i].value(), u32::try_from(i).unwrap());
    }

    drop(array);
    assert_eq!(events(&log), vec!["drop 0", "drop 1", "drop 2"]);
}

#[test]
fn swapped_array_owners_release_each_others_arrays() {
    let log = EventLog::default();

    let mut a = OwnedArray::from(vec![Widget::new(1, &log)]);
    let mut b = OwnedArray::from(vec![Widget::new(2, &log), Widget::new(3, &log)]);

    swap_arrays(&mut a, &mut b);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 1);

    drop(a);
    assert_eq!(events(&log), vec!["drop 2", "drop 3"]);

    drop(b);
    assert_eq!(events(&log), vec!["drop 2", "drop 3", "drop 1"]);
}

#[test]
fn array_reset_with_null_is_pure_release() {
    let mut array = OwnedArray::from(vec![1_u64, 2, 3]);
    assert_eq!(array[2], 3);

    unsafe { array.reset(ptr::slice_from_raw_parts_mut(ptr::null_mut(), 0)) };

    assert!(array.is_null());
    assert!(array == Null);
}

#[test]
fn owners_move_between_threads() {
    let owned = make_owned(String::from("across"));
    let array = OwnedArray::from(vec![1_u8, 2]);

    let (owned, array) = std::thread::spawn(move || {
        assert_eq!(&*owned, "across");
        (owned, array)
    })
    .join()
    .unwrap();

    assert_eq!(owned.len(), 6);
    assert_eq!(array.len(), 2);
}
