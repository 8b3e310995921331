use {
    crate::{VmError, VmResult},
    wasmer::{FunctionType, Instance, Memory, MemoryView, Store, Type, Value},
};

/// A guest module that has been instantiated, together with the store it
/// lives in and its exported linear memory.
///
/// Instances are never shared: the loader creates exactly one, and hands it
/// to the [`Bridge`](crate::Bridge) which owns it from then on.
#[derive(Debug)]
pub struct GuestInstance {
    store: Store,
    instance: Instance,
    memory: Memory,
}

impl GuestInstance {
    pub fn new(store: Store, instance: Instance) -> VmResult<Self> {
        let memory = instance.exports.get_memory("memory")?.clone();

        Ok(Self {
            store,
            instance,
            memory,
        })
    }

    pub fn memory_view(&self) -> MemoryView<'_> {
        self.memory.view(&self.store)
    }

    /// Ensure the named export is a function taking `params` and returning
    /// `results`, all of which are `i32`.
    pub fn ensure_function(&self, name: &str, params: usize, results: usize) -> VmResult<()> {
        let expect = FunctionType::new(vec![Type::I32; params], vec![Type::I32; results]);
        let actual = self.instance.exports.get_function(name)?.ty(&self.store);

        if actual != expect {
            return Err(VmError::Signature {
                name: name.into(),
                expect: expect.to_string(),
                actual: actual.to_string(),
            });
        }

        Ok(())
    }

    pub fn call_function1(&mut self, name: &str, args: &[Value]) -> VmResult<Value> {
        let ret = self.call_function(name, args)?;
        if ret.len() != 1 {
            return Err(VmError::ReturnCount {
                name: name.into(),
                expect: 1,
                actual: ret.len(),
            });
        }
        Ok(ret[0].clone())
    }

    pub fn call_function0(&mut self, name: &str, args: &[Value]) -> VmResult<()> {
        let ret = self.call_function(name, args)?;
        if !ret.is_empty() {
            return Err(VmError::ReturnCount {
                name: name.into(),
                expect: 0,
                actual: ret.len(),
            });
        }
        Ok(())
    }

    fn call_function(&mut self, name: &str, args: &[Value]) -> VmResult<Box<[Value]>> {
        self.instance
            .exports
            .get_function(name)?
            .call(&mut self.store, args)
            .map_err(Into::into)
    }
}
