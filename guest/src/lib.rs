//! The guest side of the demo. Compiled to `wasm32-unknown-unknown`, the
//! resulting module is loaded and called by `hello-host`.
//!
//! Every export only takes and returns primitives that fit onto the Wasm
//! stack. Strings are handed back to the host as a pointer to a [`Region`];
//! the host frees them through the `deallocate` export once read. The host
//! never passes data in, so there is no `allocate` export.

pub mod add;
pub mod context;
pub mod hello;
pub mod memory;

pub use memory::Region;

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use crate::{hello::rust_hello, memory::reclaim};

    #[test]
    fn hello_through_region() {
        let bytes = unsafe { reclaim(rust_hello()) };
        let greeting = String::from_utf8(bytes).unwrap();

        assert_eq!(greeting, "Hello from Rust!");
    }
}
