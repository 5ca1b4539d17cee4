//! The code-buffer write interface the emitter writes through.
//!
//! This is a deliberately narrowed version of the upstream `CodeSink`: no
//! label/constant/trap bookkeeping, since this assembler resolves its own
//! relative references in a dedicated linker pass (see
//! [`crate::assemble`]) rather than deferring to a surrounding JIT's code
//! buffer.

use smallvec::SmallVec;

/// Where emitted bytes go. Implemented here for a plain byte vector; callers
/// embedding this crate in a larger code buffer may implement it themselves.
pub trait CodeSink {
    fn put1(&mut self, byte: u8);
    fn put2(&mut self, value: u16);
    fn put4(&mut self, value: u32);
    fn put8(&mut self, value: u64);

    /// The offset of the next byte this sink will write, from the start of
    /// the current instruction sequence.
    fn current_offset(&self) -> u32;
}

/// A growable byte buffer used as the default [`CodeSink`].
#[derive(Default)]
pub struct VecSink {
    bytes: SmallVec<[u8; 32]>,
}

impl VecSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.into_vec()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Overwrite `width` bytes at `offset` with `value`'s low `width` bytes,
    /// little-endian. Used by the linker's pass-2 fixup patching.
    pub fn patch(&mut self, offset: u32, width: u8, value: i64) {
        let offset = offset as usize;
        let bytes = value.to_le_bytes();
        self.bytes[offset..offset + width as usize].copy_from_slice(&bytes[..width as usize]);
    }
}

impl CodeSink for VecSink {
    fn put1(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    fn put2(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    fn put4(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    fn put8(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    fn current_offset(&self) -> u32 {
        self.bytes.len() as u32
    }
}
