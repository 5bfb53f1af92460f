//! Example that walks through the ownership lifecycle of `Owned` and `OwnedArray`.

use std::ptr::NonNull;

use owned_ptr::{Null, Owned, OwnedArray, make_owned, malloc_owned};

fn main() {
    println!("=== Owned Pointer README Example ===");

    // Allocate and own a value in one step.
    let mut greeting = make_owned(String::from("Hello"));
    greeting.push_str(", World!");
    println!("Owned value: {}", &*greeting);

    // Move ownership into another place; the source is left empty.
    let mut holder: Owned<String> = Owned::new();
    holder.assign(&mut greeting);
    assert!(greeting == Null);
    println!("After assign, holder has: {}", &*holder);

    // Hand ownership back as a raw pointer and adopt it again.
    let raw = holder.release().expect("holder owns a value");
    // SAFETY: The pointer came from an `Owned<String>` with the default deleter.
    let readopted = unsafe { Owned::<String>::from_raw(raw.as_ptr()) };
    println!("Readopted: {}", &*readopted);

    // A custom deleter observes the release.
    let deleter = |ptr: NonNull<u32>| {
        // SAFETY: The owner passes the Box allocation it adopted below, exactly once.
        let value = unsafe { Box::from_raw(ptr.as_ptr()) };
        println!("Custom deleter releasing {value}");
    };
    let raw_counter = Box::into_raw(Box::new(7_u32));
    // SAFETY: The pointer is a fresh Box allocation, which the deleter reverses.
    let counted = unsafe { Owned::from_raw_with_deleter(raw_counter, deleter) };
    drop(counted);

    // Arrays are owned as a whole and indexed.
    let mut squares = OwnedArray::from_fn(5, |i| i * i);
    squares[0] = 100;
    println!("Array: {:?}", squares.as_slice());

    // Memory from the C allocator is released with free().
    match malloc_owned(42_u64) {
        Ok(value) => println!("C heap value: {}", *value),
        Err(e) => println!("C allocation failed: {e}"),
    }

    println!("README example completed successfully!");
}
