use core::ops::Range;

unsafe extern "C" {
    static __config_storage_start: u32;
    static __config_storage_end: u32;
}

/// Flash offsets of the region reserved for persisted settings
pub fn get_config_storage_range() -> Range<u32> {
    unsafe {
        let start = &__config_storage_start as *const u32 as u32;
        let end = &__config_storage_end as *const u32 as u32;
        start..end
    }
}
