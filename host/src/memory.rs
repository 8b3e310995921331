use {
    crate::{GuestInstance, Region, UncheckedRegion, VmError, VmResult},
    wasmer::{MemoryView, WasmPtr},
};

/// Read the data described by the Region at `region_ptr`.
pub fn read_from_memory(instance: &GuestInstance, region_ptr: u32) -> VmResult<Vec<u8>> {
    let memory = instance.memory_view();
    let region = read_region(&memory, region_ptr)?;

    // Check the bounds before allocating a buffer sized by the guest.
    let memory_size = memory.data_size();
    if u64::from(region.offset) + u64::from(region.length) > memory_size {
        return Err(VmError::RegionExceedsMemory {
            offset: region.offset,
            length: region.length,
            memory_size,
        });
    }

    WasmPtr::<u8>::new(region.offset)
        .slice(&memory, region.length)?
        .read_to_vec()
        .map_err(Into::into)
}

/// Read the data described by the Region at `region_ptr`, then have the guest
/// free both the data and the Region. Used for values returned by the guest,
/// which are read exactly once.
pub fn read_then_wipe(instance: &mut GuestInstance, region_ptr: u32) -> VmResult<Vec<u8>> {
    let data = read_from_memory(instance, region_ptr)?;
    instance.call_function0("deallocate", &[region_ptr.into()])?;

    Ok(data)
}

fn read_region(memory: &MemoryView, offset: u32) -> VmResult<Region> {
    let wptr = <WasmPtr<UncheckedRegion>>::new(offset);
    wptr.deref(memory).read()?.try_into()
}
