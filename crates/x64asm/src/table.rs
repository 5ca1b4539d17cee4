//! The generated encoding table and the types its rows are built from.
//!
//! The actual table data (`MNEMONIC_TABLE` and the per-mnemonic `*_VARIANTS`
//! slices) is written by `build.rs` via `x64asm-meta` and pulled in below
//! with `include!`; this module only defines the row shape that generated
//! text refers to unqualified.

use crate::mnemonic::Mnemonic;
use crate::registers::{FIXED_AL, FIXED_AX, FIXED_CL, FIXED_DX, FIXED_EAX, FIXED_RAX};
use crate::shape::Shape;

/// Which ModRM/opcode/VEX slot an operand in [`Instruction::operands`] binds
/// to when a [`Variant`] is selected.
///
/// [`Instruction::operands`]: crate::instruction::Instruction::operands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandRole {
    /// This slot carries no caller operand (a fixed-register or fully
    /// implicit form).
    None,
    /// Encoded in ModRM.reg.
    ModRmReg,
    /// Encoded in ModRM.rm (register-direct or memory).
    ModRmRm,
    /// Encoded in the VEX vvvv field.
    VexVvvv,
    /// An immediate, appended after ModRM/SIB/displacement; the `u8` is the
    /// encoded width in bytes (1, 2, 4, or 8).
    Imm(u8),
    /// A relative displacement; the `u8` is the encoded width in bytes (1 or 4).
    Rel(u8),
    /// Present in the operand list but encoded nowhere (e.g. the implicit
    /// `cl` of the CL-shift forms, already folded into the opcode choice).
    Implicit,
    /// Encoded as the low 3 bits of the opcode byte itself (+ REX.B), as in
    /// `push r64` / `mov r64, imm64`.
    OpcodeReg,
}

/// Which fixed mandatory prefix byte (if any) a legacy SSE-style encoding
/// requires ahead of the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MandatoryPrefix {
    None,
    P66,
    Pf2,
    Pf3,
}

/// Which opcode-extension scheme a variant uses to pick `ModRM.reg`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpcodeExt {
    /// `ModRM.reg` is a fixed digit (the "/n" opcode-extension forms).
    Digit(u8),
    /// `ModRM.reg` carries the operand mapped to [`OperandRole::ModRmReg`].
    UseReg,
}

/// A VEX prefix's fixed fields for one variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VexSpec {
    pub l: u8,
    pub pp: u8,
    pub mm: u8,
    pub w: bool,
}

/// One row of the encoding table: a single opcode form of a mnemonic.
///
/// `shapes[i]` is the set of [`Shape`] tags an operand in position `i` may
/// present to match this row (e.g. an `r/m32` slot is `&[Shape::R32,
/// Shape::M32]`); `roles[i]` says which encoding field that same position
/// binds to. The two slices always have equal length.
#[derive(Clone, Copy, Debug)]
pub struct Variant {
    pub shapes: &'static [&'static [Shape]],
    pub legacy_prefix: Option<u8>,
    pub mandatory_prefix: MandatoryPrefix,
    pub rex_w: bool,
    pub vex: Option<VexSpec>,
    pub opcode: &'static [u8],
    pub opcode_ext: OpcodeExt,
    pub roles: &'static [OperandRole],
    /// The largest operand width this variant touches, in bytes; used by the
    /// selector's size-minimization tie-break.
    pub size_category: u8,
}

include!(concat!(env!("OUT_DIR"), "/table.rs"));

/// All variants registered for `mnemonic`, in table-declaration order (the
/// selector's final tie-break is "first matching row wins").
#[must_use]
pub fn variants_for(mnemonic: Mnemonic) -> &'static [Variant] {
    MNEMONIC_TABLE
        .iter()
        .find(|(m, _)| *m == mnemonic)
        .map_or(&[], |(_, variants)| *variants)
}
