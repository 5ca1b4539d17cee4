//! Executable Memory Facade: hand assembled bytes a read+write+execute page
//! range and get a callable pointer back.
//!
//! x86-64 has coherent instruction and data caches, so no
//! icache-synchronization step runs before returning the pointer; the split
//! `acquire`/`release` pair still exists so the crate's surface has a place
//! to add one for a port to an architecture that needs it.

use std::ptr::NonNull;

use crate::error::Error;

/// A page range acquired by [`acquire_exec`], owning its `region` allocation
/// until [`release_exec`] returns it.
pub struct ExecHandle {
    ptr: NonNull<u8>,
    len: usize,
}

impl ExecHandle {
    /// The executable address of the first byte.
    #[must_use]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    /// Reconstruct a handle from the pointer and length [`acquire_exec`]
    /// handed out, for the `ffi` module to round-trip a C caller's raw
    /// pointer back into [`release_exec`].
    #[must_use]
    pub(crate) fn from_raw_parts(ptr: NonNull<u8>, len: usize) -> Self {
        Self { ptr, len }
    }
}

// Safety: the pages backing an `ExecHandle` are owned exclusively by it
// until `release_exec` consumes it; no other code mutates them concurrently.
unsafe impl Send for ExecHandle {}

/// Reserve at least `bytes.len()` bytes of read+write+execute memory and
/// copy `bytes` into it.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `bytes` is empty, or
/// [`Error::OutOfMemory`] if the host mapping facility refuses the request.
pub fn acquire_exec(bytes: &[u8]) -> Result<ExecHandle, Error> {
    if bytes.is_empty() {
        return Err(Error::InvalidArgument);
    }

    let mut map = region::alloc(bytes.len(), region::Protection::READ_WRITE_EXECUTE)
        .map_err(|e| {
            log::debug!("region::alloc failed: {e}");
            Error::OutOfMemory
        })?;
    // Safety: `map` was just allocated with room for exactly `bytes.len()`
    // bytes and is not yet shared with anyone else.
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), map.as_mut_ptr::<u8>(), bytes.len());
    }

    let ptr = NonNull::new(map.as_mut_ptr::<u8>()).expect("region::alloc never returns a null map");
    let len = map.len();
    std::mem::forget(map);
    Ok(ExecHandle { ptr, len })
}

/// Return the pages backing `handle` to the host.
pub fn release_exec(handle: ExecHandle) {
    // Safety: `handle.ptr`/`handle.len` describe exactly the mapping
    // `acquire_exec` created and forgot; nothing else holds a reference to
    // it once `handle` is consumed here.
    unsafe {
        let rc = libc::munmap(handle.ptr.as_ptr().cast(), handle.len);
        if rc != 0 {
            log::warn!("munmap failed: {}", std::io::Error::last_os_error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_and_run_a_ret_instruction() {
        // `C3` is `ret`; calling into it should return normally.
        let handle = acquire_exec(&[0xC3]).expect("page-sized executable mapping");
        let f: extern "C" fn() = unsafe { std::mem::transmute(handle.as_ptr()) };
        f();
        release_exec(handle);
    }

    #[test]
    fn empty_input_is_invalid_argument() {
        assert_eq!(acquire_exec(&[]).unwrap_err(), Error::InvalidArgument);
    }
}
