use crate::memory::leak_to_host;

/// A small piece of state living inside the guest. The host only ever sees
/// it as an opaque handle, which is the address of the boxed value.
pub struct Context {
    message: String,
    count: u32,
}

impl Context {
    pub fn new() -> Self {
        Self {
            message: "context initialized".to_string(),
            count: 0,
        }
    }

    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    pub fn status(&self) -> String {
        format!("message: {}, count: {}", self.message, self.count)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new context and return its handle.
#[no_mangle]
pub extern "C" fn context_new() -> usize {
    Box::into_raw(Box::new(Context::new())) as usize
}

/// Increment the counter of the context behind the handle.
#[no_mangle]
pub extern "C" fn context_increment(handle: usize) {
    let ctx = unsafe { borrow_mut(handle) };
    ctx.increment();
}

/// Return the address of a Region describing the context's current status.
#[no_mangle]
pub extern "C" fn context_status(handle: usize) -> usize {
    let ctx = unsafe { borrow_mut(handle) };
    leak_to_host(ctx.status().into_bytes())
}

/// Drop the context behind the handle. The handle must not be used afterwards.
#[no_mangle]
pub extern "C" fn context_free(handle: usize) {
    assert!(handle != 0, "context handle is null");
    let _ = unsafe { Box::from_raw(handle as *mut Context) };
}

unsafe fn borrow_mut<'a>(handle: usize) -> &'a mut Context {
    assert!(handle != 0, "context handle is null");
    &mut *(handle as *mut Context)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, crate::memory::reclaim};

    fn read_status(handle: usize) -> String {
        let bytes = unsafe { reclaim(context_status(handle)) };
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn counts_through_handle() {
        let handle = context_new();
        assert_eq!(read_status(handle), "message: context initialized, count: 0");

        context_increment(handle);
        context_increment(handle);
        assert_eq!(read_status(handle), "message: context initialized, count: 2");

        context_free(handle);
    }

    #[test]
    fn contexts_are_independent() {
        let a = context_new();
        let b = context_new();

        context_increment(a);

        assert_eq!(read_status(a), "message: context initialized, count: 1");
        assert_eq!(read_status(b), "message: context initialized, count: 0");

        context_free(a);
        context_free(b);
    }
}
