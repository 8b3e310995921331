use crate::memory::leak_to_host;

/// The text returned by the entry point.
pub const GREETING: &str = "Hello from Rust!";

/// The entry point invoked by the host. Takes nothing, returns the address of
/// a Region holding the greeting.
#[no_mangle]
pub extern "C" fn rust_hello() -> usize {
    leak_to_host(GREETING.as_bytes().to_vec())
}
