//! Fixtures for driving the host without a compiled guest.
//!
//! The modules are written in the Wasm text format, which wasmer compiles the
//! same way as binary modules. They follow the guest ABI of `hello-guest`:
//! strings are returned as a pointer to a 12-byte Region. Every Region here
//! points at static data, so `deallocate` is a no-op.

use crate::{GuestValue, Presenter, Status};

/// Implements every export of `hello-guest`.
///
/// - `rust_hello` returns the Region at 8, describing `"Hello from Rust!"` at 64.
/// - `context_status` patches the count digit (offset 165) into
///   `"message: context initialized, count: 0"` at 128 and returns the Region
///   at 32. Counts stay below 10 in tests.
/// - The single context lives at address 256.
pub const HELLO_WAT: &str = r#"
(module
  (memory (export "memory") 1)
  (data (i32.const 8) "\40\00\00\00\10\00\00\00\10\00\00\00")
  (data (i32.const 32) "\80\00\00\00\26\00\00\00\26\00\00\00")
  (data (i32.const 64) "Hello from Rust!")
  (data (i32.const 128) "message: context initialized, count: 0")
  (func (export "rust_hello") (result i32)
    i32.const 8)
  (func (export "add_numbers") (param i32 i32) (result i32)
    local.get 0
    local.get 1
    i32.add)
  (func (export "deallocate") (param i32))
  (func (export "context_new") (result i32)
    i32.const 256)
  (func (export "context_increment") (param i32)
    local.get 0
    local.get 0
    i32.load
    i32.const 1
    i32.add
    i32.store)
  (func (export "context_status") (param i32) (result i32)
    i32.const 165
    local.get 0
    i32.load
    i32.const 48
    i32.add
    i32.store8
    i32.const 32)
  (func (export "context_free") (param i32))
)
"#;

/// The entry export traps every time it is called.
pub const TRAP_WAT: &str = r#"
(module
  (memory (export "memory") 1)
  (func (export "rust_hello") (result i32)
    unreachable)
  (func (export "deallocate") (param i32))
)
"#;

/// The entry export returns a null pointer.
pub const NULL_ENTRY_WAT: &str = r#"
(module
  (memory (export "memory") 1)
  (func (export "rust_hello") (result i32)
    i32.const 0)
  (func (export "deallocate") (param i32))
)
"#;

/// The entry export returns a Region that passes its own checks but reaches
/// far past the end of the module's single page of memory.
pub const OVERSIZED_REGION_WAT: &str = r#"
(module
  (memory (export "memory") 1)
  (data (i32.const 8) "\40\00\00\00\ff\ff\ff\7f\ff\ff\ff\7f")
  (func (export "rust_hello") (result i32)
    i32.const 8)
  (func (export "deallocate") (param i32))
)
"#;

/// A valid module without the entry export.
pub const MISSING_ENTRY_WAT: &str = r#"
(module
  (memory (export "memory") 1)
  (func (export "deallocate") (param i32))
)
"#;

/// Asks for far more linear memory than the default limit allows.
pub const HUNGRY_WAT: &str = r#"
(module
  (memory (export "memory") 4096)
  (func (export "rust_hello") (result i32)
    i32.const 0)
)
"#;

/// A presenter that records everything it is asked to show.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub statuses: Vec<Status>,
    pub results: Vec<GuestValue>,
}

impl Presenter for RecordingPresenter {
    fn show_status(&mut self, status: &Status) {
        self.statuses.push(status.clone());
    }

    fn show_result(&mut self, value: &GuestValue) {
        self.results.push(value.clone());
    }
}
