//! Shape tags: the compact per-operand key the [`crate::select`] module
//! matches against the encoding table.

use crate::operand::{ImmWidth, MemBase, Operand, PrefixHint};
use crate::registers::{Register, RegClass};
use smallvec::SmallVec;

/// A shape tag identifies an operand's kind and size for table lookup.
///
/// `M` (size-unspecified memory) is a distinct tag from `M8`..`M512`: an
/// operand only ever carries `M` when the caller left `explicit_size` unset,
/// and the selector treats it as compatible with any memory width a variant
/// declares for that slot (see `select::slot_matches`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    R8,
    R8h,
    R16,
    R32,
    R64,
    Xmm,
    Ymm,
    St,
    M8,
    M16,
    M32,
    M64,
    M80,
    M128,
    M256,
    M512,
    M,
    Imm8,
    Imm16,
    Imm32,
    Imm64,
    Rel8,
    Rel32,
    Fixed(Register),
}

impl Shape {
    /// True for the `M8`..`M512` sized-memory tags.
    #[must_use]
    pub fn is_sized_mem(self) -> bool {
        matches!(
            self,
            Shape::M8 | Shape::M16 | Shape::M32 | Shape::M64 | Shape::M80 | Shape::M128 | Shape::M256 | Shape::M512
        )
    }

    /// The size in bits this shape represents, for the selector's
    /// size-minimization tie-break. Non-sized shapes (fixed registers, `M`)
    /// return 0.
    #[must_use]
    pub fn size_bits(self) -> u16 {
        match self {
            Shape::R8 | Shape::R8h | Shape::M8 | Shape::Imm8 | Shape::Rel8 => 8,
            Shape::R16 | Shape::M16 | Shape::Imm16 => 16,
            Shape::R32 | Shape::M32 | Shape::Imm32 | Shape::Rel32 => 32,
            Shape::R64 | Shape::M64 | Shape::Imm64 => 64,
            Shape::M80 => 80,
            Shape::Xmm | Shape::M128 => 128,
            Shape::Ymm | Shape::M256 => 256,
            Shape::M512 => 512,
            Shape::St | Shape::M | Shape::Fixed(_) => 0,
        }
    }
}

fn reg_shape(r: Register) -> Shape {
    match r.class {
        RegClass::Gpr8 => Shape::R8,
        RegClass::Gpr8h => Shape::R8h,
        RegClass::Gpr16 => Shape::R16,
        RegClass::Gpr32 => Shape::R32,
        RegClass::Gpr64 => Shape::R64,
        RegClass::Xmm => Shape::Xmm,
        RegClass::Ymm => Shape::Ymm,
        RegClass::St => Shape::St,
        // Segment/control/debug/mmx/mask/bound registers only ever appear as
        // fixed operands or implicit operands in this catalog; they are
        // still modeled as classes (§ Operand Model) but none of the
        // implemented forms key a lookup on them generically.
        RegClass::Seg
        | RegClass::Cr
        | RegClass::Dr
        | RegClass::Mmx
        | RegClass::K
        | RegClass::Bnd => Shape::Fixed(r),
    }
}

fn mem_shape(explicit_size: Option<u16>) -> Shape {
    match explicit_size {
        Some(8) => Shape::M8,
        Some(16) => Shape::M16,
        Some(32) => Shape::M32,
        Some(64) => Shape::M64,
        Some(80) => Shape::M80,
        Some(128) => Shape::M128,
        Some(256) => Shape::M256,
        Some(512) => Shape::M512,
        Some(_) | None => Shape::M,
    }
}

/// Return the shape tag(s) an operand may be matched against. Only `auto`
/// immediates are genuinely multi-valued: they fan out to every width the
/// value fits in, smallest first, so the selector's size-minimization rule
/// can pick among them.
#[must_use]
pub fn shape_tags(op: &Operand) -> SmallVec<[Shape; 4]> {
    let mut tags = SmallVec::new();
    match op {
        Operand::Register(r) => tags.push(reg_shape(*r)),
        Operand::Memory(m) => tags.push(mem_shape(m.explicit_size)),
        Operand::Relative(_) => {
            tags.push(Shape::Rel8);
            tags.push(Shape::Rel32);
        }
        Operand::Immediate { width, value } => match width {
            ImmWidth::Imm8 => tags.push(Shape::Imm8),
            ImmWidth::Imm16 => tags.push(Shape::Imm16),
            ImmWidth::Imm32 => tags.push(Shape::Imm32),
            ImmWidth::Imm64 | ImmWidth::Ptr => tags.push(Shape::Imm64),
            ImmWidth::Auto => {
                if i8::try_from(*value).is_ok() || u8::try_from(*value).is_ok() {
                    tags.push(Shape::Imm8);
                }
                if i16::try_from(*value).is_ok() || u16::try_from(*value).is_ok() {
                    tags.push(Shape::Imm16);
                }
                if i32::try_from(*value).is_ok() || u32::try_from(*value).is_ok() {
                    tags.push(Shape::Imm32);
                }
                tags.push(Shape::Imm64);
            }
        },
        Operand::PrefixHint(_) | Operand::None => {}
    }
    tags
}

/// True if a memory operand's base is the instruction-relative pseudo-base.
#[must_use]
pub fn is_riprel(op: &Operand) -> bool {
    matches!(op, Operand::Memory(Memory { base: MemBase::RipRel, .. }))
}

use crate::operand::Memory;
