mod bridge;
mod engine;
mod error;
mod events;
mod instance;
mod loader;
mod memory;
mod presenter;
mod readiness;
mod region;
mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod value;

pub use {
    bridge::*, engine::*, error::*, events::*, instance::*, loader::*, memory::*, presenter::*,
    readiness::*, region::*, session::*, value::*,
};
