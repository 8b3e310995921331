/// Add two numbers.
///
/// Only primitives cross the boundary here, so no memory needs to be
/// allocated. Overflow wraps, the same as the `i32.add` instruction would.
#[no_mangle]
pub extern "C" fn add_numbers(a: i32, b: i32) -> i32 {
    internal_add(a, b)
}

// Not exported; only reachable through `add_numbers`.
fn internal_add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds() {
        assert_eq!(add_numbers(123, 456), 579);
        assert_eq!(add_numbers(-5, 5), 0);
    }

    #[test]
    fn wraps_on_overflow() {
        assert_eq!(add_numbers(i32::MAX, 1), i32::MIN);
    }
}
