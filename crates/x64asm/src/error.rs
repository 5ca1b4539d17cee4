//! The error kind enumeration and the process-wide (thread-local) last-error
//! channel.

use std::cell::RefCell;
use thiserror::Error;

/// A failure from any stage of the encoder pipeline.
///
/// These map 1:1 onto the error kinds read back through [`last_error`]; the
/// idiomatic surface (`assemble`, `emit_one`, ...) returns this directly as
/// a `Result`, while the `ffi` module's extern "C" wrappers collapse it to a
/// falsy return plus this channel, matching the upstream C ABI this crate's
/// design note calls a "preferred re-architecture": keep the thread-local
/// accessor for compatibility, but let the Rust API return `Result`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument")]
    InvalidArgument,
    #[error("no such mnemonic")]
    NoSuchMnemonic,
    #[error("no variant matches the given operand arity")]
    NoSuchForm,
    #[error("operand shape does not match any variant")]
    OperandMismatch,
    #[error("explicit memory size is not available for this mnemonic")]
    SizeUnavailable,
    #[error("prefix hint is incompatible with every matching variant")]
    PrefixConflict,
    #[error("a high-byte GPR (ah/bh/ch/dh) cannot be combined with an operand requiring REX")]
    InvalidHighByteWithRex,
    #[error("resolved relative displacement does not fit the chosen width")]
    RelOutOfRange,
    #[error("internal buffer growth failed")]
    OutOfMemory,
}

impl Error {
    /// The numeric code surfaced through the C-style `last_error` accessor.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Error::InvalidArgument => 1,
            Error::NoSuchMnemonic => 2,
            Error::NoSuchForm => 3,
            Error::OperandMismatch => 4,
            Error::SizeUnavailable => 5,
            Error::PrefixConflict => 6,
            Error::InvalidHighByteWithRex => 7,
            Error::RelOutOfRange => 8,
            Error::OutOfMemory => 9,
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<Error>> = const { RefCell::new(None) };
}

/// Record `err` as the calling thread's last error. Only the assembler
/// itself should call this.
pub(crate) fn set_last_error(err: Error) {
    log::debug!("x64asm error: {err}");
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(err));
}

/// Read the calling thread's last error message, optionally writing the
/// numeric code through `out_code`. Reading does not clear the slot.
///
/// Returns `"no error"` if nothing has failed yet on this thread.
#[must_use]
pub fn last_error(out_code: Option<&mut i32>) -> &'static str {
    LAST_ERROR.with(|slot| {
        let err = *slot.borrow();
        if let Some(out_code) = out_code {
            *out_code = err.map_or(0, Error::code);
        }
        match err {
            None => "no error",
            Some(e) => e.message(),
        }
    })
}

impl Error {
    fn message(self) -> &'static str {
        match self {
            Error::InvalidArgument => "invalid argument",
            Error::NoSuchMnemonic => "no such mnemonic",
            Error::NoSuchForm => "no variant matches the given operand arity",
            Error::OperandMismatch => "operand shape does not match any variant",
            Error::SizeUnavailable => "explicit memory size is not available for this mnemonic",
            Error::PrefixConflict => "prefix hint is incompatible with every matching variant",
            Error::InvalidHighByteWithRex => {
                "a high-byte GPR (ah/bh/ch/dh) cannot be combined with an operand requiring REX"
            }
            Error::RelOutOfRange => "resolved relative displacement does not fit the chosen width",
            Error::OutOfMemory => "internal buffer growth failed",
        }
    }
}
