use {
    std::ptr::NonNull,
    wasmer::{
        CompilerConfig, Engine, MemoryType, Pages, Singlepass, TableType, Target, Tunables,
        sys::{BaseTunables, NativeEngineExt},
        vm::{
            MemoryError, MemoryStyle, TableStyle, VMMemory, VMMemoryDefinition, VMTable,
            VMTableDefinition,
        },
    },
};

/// Default cap on guest linear memory, in Wasm pages (64 KiB each): 32 MiB.
pub const DEFAULT_MEMORY_LIMIT_PAGES: u32 = 512;

/// Build the engine every guest module is compiled and run with: Singlepass,
/// with linear memory capped at `memory_limit_pages`.
pub fn build_engine(memory_limit_pages: u32) -> Engine {
    let mut compiler = Singlepass::new();
    compiler.canonicalize_nans(true);

    let mut engine = Engine::from(compiler);
    engine.set_tunables(MemoryCap {
        base: BaseTunables::for_target(&Target::default()),
        limit: Pages(memory_limit_pages),
    });

    engine
}

/// Caps every linear memory at `limit`.
///
/// The guest's declared maximum is lowered to the limit when it is missing or
/// larger, so `memory.grow` fails past the limit instead of the module being
/// refused. Only a module whose *initial* size exceeds the limit fails to
/// instantiate.
struct MemoryCap<T> {
    base: T,
    limit: Pages,
}

impl<T> MemoryCap<T> {
    fn cap(&self, requested: &MemoryType) -> Result<MemoryType, MemoryError> {
        if requested.minimum > self.limit {
            return Err(MemoryError::Generic(format!(
                "guest requests {} pages of memory, the limit is {}",
                requested.minimum.0, self.limit.0,
            )));
        }

        let maximum = match requested.maximum {
            Some(max) if max <= self.limit => max,
            _ => self.limit,
        };

        Ok(MemoryType {
            maximum: Some(maximum),
            ..*requested
        })
    }
}

impl<T> Tunables for MemoryCap<T>
where
    T: Tunables,
{
    fn memory_style(&self, memory: &MemoryType) -> MemoryStyle {
        // An oversized request is rejected when the memory is created; the
        // style is only a hint.
        let capped = self.cap(memory).unwrap_or(*memory);
        self.base.memory_style(&capped)
    }

    fn table_style(&self, table: &TableType) -> TableStyle {
        self.base.table_style(table)
    }

    fn create_host_memory(
        &self,
        ty: &MemoryType,
        style: &MemoryStyle,
    ) -> Result<VMMemory, MemoryError> {
        self.base.create_host_memory(&self.cap(ty)?, style)
    }

    unsafe fn create_vm_memory(
        &self,
        ty: &MemoryType,
        style: &MemoryStyle,
        vm_definition_location: NonNull<VMMemoryDefinition>,
    ) -> Result<VMMemory, MemoryError> {
        let capped = self.cap(ty)?;
        unsafe { self.base.create_vm_memory(&capped, style, vm_definition_location) }
    }

    fn create_host_table(&self, ty: &TableType, style: &TableStyle) -> Result<VMTable, String> {
        self.base.create_host_table(ty, style)
    }

    unsafe fn create_vm_table(
        &self,
        ty: &TableType,
        style: &TableStyle,
        vm_definition_location: NonNull<VMTableDefinition>,
    ) -> Result<VMTable, String> {
        unsafe { self.base.create_vm_table(ty, style, vm_definition_location) }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    const LIMIT: u32 = 16;

    fn cap() -> MemoryCap<BaseTunables> {
        MemoryCap {
            base: BaseTunables::for_target(&Target::default()),
            limit: Pages(LIMIT),
        }
    }

    #[test_case(MemoryType::new(1, None, false) => Some(LIMIT); "no maximum gets the limit")]
    #[test_case(MemoryType::new(1, Some(4), false) => Some(4); "smaller maximum kept")]
    #[test_case(MemoryType::new(1, Some(LIMIT), false) => Some(LIMIT); "maximum at limit kept")]
    #[test_case(MemoryType::new(1, Some(64), false) => Some(LIMIT); "larger maximum lowered")]
    #[test_case(MemoryType::new(LIMIT, None, false) => Some(LIMIT); "minimum at limit")]
    #[test_case(MemoryType::new(64, Some(64), false) => None; "minimum above limit")]
    fn capped_maximum(requested: MemoryType) -> Option<u32> {
        cap().cap(&requested).ok().map(|ty| ty.maximum.unwrap().0)
    }

    #[test]
    fn minimum_and_sharing_are_preserved() {
        let capped = cap().cap(&MemoryType::new(3, Some(64), true)).unwrap();

        assert_eq!(capped.minimum, Pages(3));
        assert!(capped.shared);
    }
}
