use {
    crate::{
        Bridge, DEFAULT_MEMORY_LIMIT_PAGES, GuestInstance, VmError, VmResult, build_engine,
    },
    std::{borrow::Cow, path::PathBuf},
    tracing::{debug, info},
    wasmer::{Imports, Instance, Module, Store},
};

/// Name of the export called by [`Bridge::invoke`] unless configured otherwise.
pub const DEFAULT_ENTRY: &str = "rust_hello";

/// Where the guest module comes from.
#[derive(Debug, Clone)]
pub enum GuestSource {
    /// A `.wasm` (or `.wat`) file, read when the loader is initialized.
    File(PathBuf),
    /// Module bytes already in memory.
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub source: GuestSource,
    /// The zero-argument export invoked by the bridge.
    pub entry: String,
    /// Maximum size of the guest's linear memory, in Wasm pages.
    pub memory_limit_pages: u32,
}

impl LoaderConfig {
    pub fn new(source: GuestSource) -> Self {
        Self {
            source,
            entry: DEFAULT_ENTRY.to_string(),
            memory_limit_pages: DEFAULT_MEMORY_LIMIT_PAGES,
        }
    }

    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = entry.into();
        self
    }

    pub fn with_memory_limit_pages(mut self, pages: u32) -> Self {
        self.memory_limit_pages = pages;
        self
    }
}

/// Fetches and instantiates the guest module.
///
/// A loader is consumed by [`initialize`](Loader::initialize), so a module can
/// be loaded at most once per loader.
#[derive(Debug)]
pub struct Loader {
    config: LoaderConfig,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Fetch and instantiate the module, and check that the entry export can
    /// be called without arguments. The fetch is the only point where this
    /// suspends.
    pub async fn initialize(self) -> VmResult<Bridge> {
        let instance = {
            let code = self.fetch().await?;
            self.instantiate(&code)?
        };

        instance.ensure_function(&self.config.entry, 0, 1)?;

        info!(entry = %self.config.entry, "guest module instantiated");

        Ok(Bridge::new(instance, self.config.entry))
    }

    async fn fetch(&self) -> VmResult<Cow<'_, [u8]>> {
        match &self.config.source {
            GuestSource::File(path) => {
                debug!(path = %path.display(), "fetching guest module");

                tokio::fs::read(path)
                    .await
                    .map(Cow::Owned)
                    .map_err(|source| VmError::Fetch {
                        path: path.clone(),
                        source,
                    })
            },
            GuestSource::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }

    fn instantiate(&self, code: &[u8]) -> VmResult<GuestInstance> {
        let engine = build_engine(self.config.memory_limit_pages);
        let module = Module::new(&engine, code)?;
        debug!(size = code.len(), "guest module compiled");

        // The guest imports nothing from the host.
        let mut store = Store::new(engine);
        let instance = Instance::new(&mut store, &module, &Imports::new())?;

        GuestInstance::new(store, instance)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::testing::{HELLO_WAT, HUNGRY_WAT, MISSING_ENTRY_WAT},
    };

    fn loader(wat: &str) -> Loader {
        Loader::new(LoaderConfig::new(GuestSource::Bytes(wat.as_bytes().to_vec())))
    }

    #[tokio::test]
    async fn loads_from_bytes() {
        let bridge = loader(HELLO_WAT).initialize().await.unwrap();
        assert_eq!(bridge.entry(), DEFAULT_ENTRY);
    }

    #[tokio::test]
    async fn missing_file_fails_fetch() {
        let loader = Loader::new(LoaderConfig::new(GuestSource::File(
            "does/not/exist.wasm".into(),
        )));

        let err = loader.initialize().await.unwrap_err();
        assert!(matches!(err, VmError::Fetch { .. }));
        assert!(err.to_string().contains("does/not/exist.wasm"));
    }

    #[tokio::test]
    async fn garbage_fails_to_compile() {
        let loader = Loader::new(LoaderConfig::new(GuestSource::Bytes(b"not wasm".to_vec())));

        let err = loader.initialize().await.unwrap_err();
        assert!(matches!(err, VmError::Instantiation { .. }));
    }

    #[tokio::test]
    async fn missing_entry_is_rejected() {
        let err = loader(MISSING_ENTRY_WAT).initialize().await.unwrap_err();
        assert!(matches!(err, VmError::Export(_)));
    }

    #[tokio::test]
    async fn entry_with_params_is_rejected() {
        let config = LoaderConfig::new(GuestSource::Bytes(HELLO_WAT.as_bytes().to_vec()))
            .with_entry("add_numbers");

        let err = Loader::new(config).initialize().await.unwrap_err();
        assert!(matches!(err, VmError::Signature { .. }));
    }

    #[tokio::test]
    async fn memory_above_limit_is_rejected() {
        let err = loader(HUNGRY_WAT).initialize().await.unwrap_err();
        assert!(matches!(err, VmError::Instantiation { .. }));
    }

    #[tokio::test]
    async fn oversized_maximum_is_lowered() {
        let wat = r#"(module
            (memory (export "memory") 1 1000)
            (func (export "rust_hello") (result i32) i32.const 0))"#;

        assert!(loader(wat).initialize().await.is_ok());
    }
}
