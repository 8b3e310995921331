use {
    crate::{VmError, VmResult},
    wasmer::ValueType,
};

/// A `Region` as the guest wrote it into its memory, before any of its fields
/// have been checked.
///
/// Mirrors `hello_guest::Region` on `wasm32`, where each `usize` is a `u32`.
#[derive(ValueType, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct UncheckedRegion {
    pub offset: u32,
    pub capacity: u32,
    pub length: u32,
}

/// Describes a buffer in the guest's linear memory that the host may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub offset: u32,
    pub capacity: u32,
    pub length: u32,
}

impl TryFrom<UncheckedRegion> for Region {
    type Error = VmError;

    fn try_from(region: UncheckedRegion) -> VmResult<Self> {
        if region.offset == 0 {
            return Err(VmError::RegionZeroOffset);
        }

        if region.length > region.capacity {
            return Err(VmError::RegionLengthExceedsCapacity {
                length: region.length,
                capacity: region.capacity,
            });
        }

        if region.offset.checked_add(region.capacity).is_none() {
            return Err(VmError::RegionOutOfRange {
                offset: region.offset,
                capacity: region.capacity,
            });
        }

        Ok(Self {
            offset: region.offset,
            capacity: region.capacity,
            length: region.length,
        })
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test_case(64, 32, 16 => matches Ok(_); "valid")]
    #[test_case(64, 16, 16 => matches Ok(_); "full")]
    #[test_case(0, 16, 16 => matches Err(VmError::RegionZeroOffset); "zero offset")]
    #[test_case(64, 8, 16 => matches Err(VmError::RegionLengthExceedsCapacity { .. }); "too long")]
    #[test_case(u32::MAX, 16, 0 => matches Err(VmError::RegionOutOfRange { .. }); "out of range")]
    fn validate(offset: u32, capacity: u32, length: u32) -> VmResult<Region> {
        Region::try_from(UncheckedRegion {
            offset,
            capacity,
            length,
        })
    }
}
