use std::mem::ManuallyDrop;

/// The host's view of a byte buffer we hand out: where it starts, how much
/// was allocated, and how much of that is filled. On `wasm32` every field is
/// a `u32`, which is the layout the host reads.
#[repr(C)]
pub struct Region {
    offset: usize,
    capacity: usize,
    length: usize,
}

/// Give `data` to the host. Both the buffer and the Region describing it are
/// leaked; the returned address stays valid until the host calls
/// `deallocate` on it.
pub fn leak_to_host(data: Vec<u8>) -> usize {
    let mut data = ManuallyDrop::new(data);
    let region = Region {
        offset: data.as_mut_ptr() as usize,
        capacity: data.capacity(),
        length: data.len(),
    };

    Box::into_raw(Box::new(region)) as usize
}

/// Take back a buffer handed out by [`leak_to_host`].
///
/// # Safety
///
/// `region_addr` must come from `leak_to_host` and not have been reclaimed
/// already.
pub unsafe fn reclaim(region_addr: usize) -> Vec<u8> {
    let region = Box::from_raw(region_addr as *mut Region);
    Vec::from_raw_parts(region.offset as *mut u8, region.length, region.capacity)
}

/// Called by the host once it has copied a returned value out of our memory.
/// A zero address is ignored.
#[no_mangle]
pub extern "C" fn deallocate(region_addr: usize) {
    if region_addr != 0 {
        drop(unsafe { reclaim(region_addr) });
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_describes_buffer() {
        let mut data = Vec::with_capacity(16);
        data.extend_from_slice(b"jake");

        let addr = leak_to_host(data);
        let region = unsafe { &*(addr as *const Region) };

        assert_eq!(region.length, 4);
        assert_eq!(region.capacity, 16);
        assert_ne!(region.offset, 0);

        assert_eq!(unsafe { reclaim(addr) }, b"jake");
    }

    #[test]
    fn deallocate_ignores_null() {
        deallocate(0);
        deallocate(leak_to_host(b"larry".to_vec()));
    }
}
