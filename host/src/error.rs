use {
    std::{io, path::PathBuf, string::FromUtf8Error},
    thiserror::Error,
    wasmer::{CompileError, ExportError, InstantiationError, MemoryAccessError, RuntimeError},
};

#[derive(Debug, Error)]
pub enum VmError {
    #[error("failed to fetch guest module `{}`: {source}", .path.display())]
    Fetch { path: PathBuf, source: io::Error },

    #[error(transparent)]
    FromUtf8(#[from] FromUtf8Error),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    MemoryAccess(#[from] MemoryAccessError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    // The wasmer `CompileError` and `InstantiationError` are big. We get a
    // clippy warning (result_large_err) if we wrap them directly, so they are
    // cast to strings instead.
    #[error("failed to instantiate Wasm module: {message}")]
    Instantiation { message: String },

    #[error("export `{name}` has an unexpected signature! expect: {expect}, actual: {actual}")]
    Signature {
        name: String,
        expect: String,
        actual: String,
    },

    #[error("unexpected return value count! name: {name}, expect: {expect}, actual: {actual}")]
    ReturnCount {
        name: String,
        expect: usize,
        actual: usize,
    },

    #[error("unexpected return type: {message}")]
    ReturnType { message: &'static str },

    #[error("export `{name}` returned a null pointer")]
    NullPointer { name: String },

    #[error("region has a 0 offset")]
    RegionZeroOffset,

    #[error("region length exceeds capacity! length: {length}, capacity: {capacity}")]
    RegionLengthExceedsCapacity { length: u32, capacity: u32 },

    #[error("region exceeds address space! offset: {offset}, capacity: {capacity}")]
    RegionOutOfRange { offset: u32, capacity: u32 },

    #[error("region exceeds guest memory! offset: {offset}, length: {length}, memory size: {memory_size}")]
    RegionExceedsMemory {
        offset: u32,
        length: u32,
        memory_size: u64,
    },
}

impl VmError {
    pub fn instantiation(message: impl Into<String>) -> Self {
        Self::Instantiation {
            message: message.into(),
        }
    }

    pub fn return_type(message: &'static str) -> Self {
        Self::ReturnType { message }
    }

    pub fn null_pointer(name: impl Into<String>) -> Self {
        Self::NullPointer { name: name.into() }
    }
}

impl From<CompileError> for VmError {
    fn from(err: CompileError) -> Self {
        Self::instantiation(err.to_string())
    }
}

impl From<InstantiationError> for VmError {
    fn from(err: InstantiationError) -> Self {
        Self::instantiation(err.to_string())
    }
}

pub type VmResult<T> = core::result::Result<T, VmError>;
