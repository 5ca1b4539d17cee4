//! The extern "C" surface, a thin wrapper around the idiomatic Rust API.
//!
//! Every function here collapses its `Result` into a falsy return (null
//! pointer or zero length) plus [`crate::error::set_last_error`], matching
//! the C ABI signatures in the external-interfaces section this crate's
//! design note is grounded on. Rust callers should prefer
//! [`crate::assemble::assemble`], [`crate::assemble::emit_single`],
//! [`crate::stringify::stringify`], and [`crate::exec`] directly.

use std::ffi::CString;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::slice;

use crate::assemble;
use crate::error::{self, Error};
use crate::exec::{self, ExecHandle};
use crate::instruction::Instruction;
use crate::stringify;

fn fail<T>(err: Error, sentinel: T) -> T {
    error::set_last_error(err);
    sentinel
}

/// # Safety
///
/// `instructions` must point to `count` valid, initialized [`Instruction`]
/// values, or be null when `count` is 0. `out_len` must be a valid pointer
/// to a `usize` the caller owns.
///
/// On success, returns a pointer to a heap buffer of `*out_len` bytes,
/// owned by the caller and freed with [`x64asm_free_buffer`]. On failure,
/// returns null and leaves the last-error channel populated.
#[no_mangle]
pub unsafe extern "C" fn x64asm_assemble(
    instructions: *const Instruction,
    count: usize,
    out_len: *mut usize,
) -> *mut u8 {
    if instructions.is_null() || out_len.is_null() || count == 0 {
        return fail(Error::InvalidArgument, ptr::null_mut());
    }
    let slice = slice::from_raw_parts(instructions, count);
    match assemble::assemble(slice) {
        Ok(mut bytes) => {
            bytes.shrink_to_fit();
            *out_len = bytes.len();
            let ptr = bytes.as_mut_ptr();
            std::mem::forget(bytes);
            ptr
        }
        Err(e) => fail(e, ptr::null_mut()),
    }
}

/// Free a buffer previously returned by [`x64asm_assemble`].
///
/// # Safety
///
/// `ptr`/`len` must be exactly the pointer and length [`x64asm_assemble`]
/// returned; calling this twice on the same buffer is undefined behavior.
#[no_mangle]
pub unsafe extern "C" fn x64asm_free_buffer(ptr: *mut u8, len: usize) {
    if !ptr.is_null() {
        drop(Vec::from_raw_parts(ptr, len, len));
    }
}

/// # Safety
///
/// `instruction` must point to one valid, initialized [`Instruction`].
/// `out` must have room for at least 15 bytes.
///
/// Does not resolve `Relative`/RIP-relative operands. Returns the number of
/// bytes written, or 0 on error (with the last-error channel populated).
#[no_mangle]
pub unsafe extern "C" fn x64asm_emit_one(
    instruction: *const Instruction,
    out: *mut u8,
    out_capacity: usize,
) -> usize {
    if instruction.is_null() || out.is_null() || out_capacity < 15 {
        return fail(Error::InvalidArgument, 0);
    }
    let buf = slice::from_raw_parts_mut(out, out_capacity);
    match assemble::emit_single(&*instruction, buf) {
        Ok(len) => len,
        Err(e) => fail(e, 0),
    }
}

/// # Safety
///
/// `instructions` must point to `count` valid, initialized [`Instruction`]
/// values, or be null when `count` is 0.
///
/// Returns a NUL-terminated heap string owned by the caller, freed with
/// [`x64asm_free_string`], or null if `count` is 0 or `instructions` is
/// null.
#[no_mangle]
pub unsafe extern "C" fn x64asm_stringify(
    instructions: *const Instruction,
    count: usize,
) -> *mut c_char {
    if count == 0 || instructions.is_null() {
        return fail(Error::InvalidArgument, ptr::null_mut());
    }
    let slice = slice::from_raw_parts(instructions, count);
    let text = stringify::stringify(slice);
    match CString::new(text) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => fail(Error::InvalidArgument, ptr::null_mut()),
    }
}

/// Free a string previously returned by [`x64asm_stringify`].
///
/// # Safety
///
/// `ptr` must be exactly the pointer [`x64asm_stringify`] returned, or
/// null.
#[no_mangle]
pub unsafe extern "C" fn x64asm_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// # Safety
///
/// `bytes` must point to `length` readable bytes.
///
/// Returns an executable pointer to a fresh copy of `bytes`, or null on
/// failure. Free with [`x64asm_release_exec`].
#[no_mangle]
pub unsafe extern "C" fn x64asm_acquire_exec(bytes: *const u8, length: usize) -> *mut c_void {
    if bytes.is_null() || length == 0 {
        return fail(Error::InvalidArgument, ptr::null_mut());
    }
    let slice = slice::from_raw_parts(bytes, length);
    match exec::acquire_exec(slice) {
        Ok(handle) => {
            let exec_ptr = handle.as_ptr().cast::<c_void>().cast_mut();
            // The handle's page range now outlives this call; ownership
            // passes to the caller, who must round-trip it through
            // `x64asm_release_exec` with the same `length`.
            std::mem::forget(handle);
            exec_ptr
        }
        Err(e) => fail(e, ptr::null_mut()),
    }
}

/// # Safety
///
/// `pointer`/`length` must be exactly the pointer and length
/// [`x64asm_acquire_exec`] returned.
#[no_mangle]
pub unsafe extern "C" fn x64asm_release_exec(pointer: *mut c_void, length: usize) {
    if pointer.is_null() {
        return;
    }
    let non_null = ptr::NonNull::new(pointer.cast::<u8>()).expect("checked non-null above");
    exec::release_exec(reconstruct_handle(non_null, length));
}

fn reconstruct_handle(ptr: ptr::NonNull<u8>, len: usize) -> ExecHandle {
    ExecHandle::from_raw_parts(ptr, len)
}

/// # Safety
///
/// `out_code`, when non-null, must be a valid pointer to an `i32` the
/// caller owns.
///
/// Returns a NUL-terminated static string; callers must not free it.
#[no_mangle]
pub unsafe extern "C" fn x64asm_last_error(out_code: *mut i32) -> *const c_char {
    let mut code = 0;
    let message = error::last_error(Some(&mut code));
    if !out_code.is_null() {
        *out_code = code;
    }
    // Safety: `message` never contains interior NULs (it is one of the
    // static messages in `error::Error::message`).
    STATIC_MESSAGE_CACHE.with(|cache| cache.borrow_mut().get(message).as_ptr())
}

thread_local! {
    static STATIC_MESSAGE_CACHE: std::cell::RefCell<MessageCache> =
        std::cell::RefCell::new(MessageCache::default());
}

#[derive(Default)]
struct MessageCache {
    entries: Vec<(&'static str, CString)>,
}

impl MessageCache {
    fn get(&mut self, message: &'static str) -> &CString {
        if let Some(i) = self.entries.iter().position(|(m, _)| *m == message) {
            return &self.entries[i].1;
        }
        let c_string = CString::new(message).expect("static error messages have no interior NUL");
        self.entries.push((message, c_string));
        &self.entries.last().unwrap().1
    }
}
