use {
    crate::{GuestInstance, GuestValue, VmError, VmResult, read_then_wipe},
    tracing::debug,
    wasmer::Value,
};

/// Opaque handle to a counter context living inside the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextHandle(u32);

/// The call surface of an instantiated guest.
///
/// A `Bridge` only comes into existence once the guest module has been
/// instantiated, so holding one is proof that guest calls are allowed.
#[derive(Debug)]
pub struct Bridge {
    instance: GuestInstance,
    entry: String,
}

impl Bridge {
    pub(crate) fn new(instance: GuestInstance, entry: String) -> Self {
        Self { instance, entry }
    }

    /// Name of the export called by [`invoke`](Bridge::invoke).
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Call the entry export once, without arguments, and return the string
    /// it produced. Nothing is cached; every call crosses the boundary again.
    pub fn invoke(&mut self) -> VmResult<GuestValue> {
        debug!(entry = %self.entry, "calling guest entry");

        let res_ptr = call_returning_ptr(&mut self.instance, &self.entry, &[])?;
        let data = read_then_wipe(&mut self.instance, res_ptr)?;

        Ok(String::from_utf8(data)?.into())
    }

    pub fn add_numbers(&mut self, a: i32, b: i32) -> VmResult<GuestValue> {
        let sum: i32 = self
            .instance
            .call_function1("add_numbers", &[a.into(), b.into()])?
            .try_into()
            .map_err(VmError::return_type)?;

        Ok(sum.into())
    }

    pub fn new_context(&mut self) -> VmResult<ContextHandle> {
        call_returning_ptr(&mut self.instance, "context_new", &[]).map(ContextHandle)
    }

    pub fn increment(&mut self, handle: ContextHandle) -> VmResult<()> {
        self.instance.call_function0("context_increment", &[handle.0.into()])
    }

    pub fn context_status(&mut self, handle: ContextHandle) -> VmResult<GuestValue> {
        let res_ptr = call_returning_ptr(&mut self.instance, "context_status", &[handle.0.into()])?;
        let data = read_then_wipe(&mut self.instance, res_ptr)?;

        Ok(String::from_utf8(data)?.into())
    }

    pub fn free_context(&mut self, handle: ContextHandle) -> VmResult<()> {
        self.instance.call_function0("context_free", &[handle.0.into()])
    }
}

/// Call an export that returns a guest address, rejecting null.
fn call_returning_ptr(instance: &mut GuestInstance, name: &str, args: &[Value]) -> VmResult<u32> {
    let ptr: u32 = instance
        .call_function1(name, args)?
        .try_into()
        .map_err(VmError::return_type)?;

    if ptr == 0 {
        return Err(VmError::null_pointer(name));
    }

    Ok(ptr)
}

// ----------------------------------- tests -----------------------------------
