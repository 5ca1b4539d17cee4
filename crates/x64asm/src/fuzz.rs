//! Arbitrary-instruction generation, gated behind the `fuzz` feature.
//!
//! These are manual `Arbitrary` implementations rather than derives, since
//! the operand model's invariants (high-byte GPRs only have 4 members,
//! scale is one of 1/2/4/8, trailing operand slots are `None`) aren't
//! expressible by a derive.

use arbitrary::{Arbitrary, Result, Unstructured};

use crate::instruction::Instruction;
use crate::mnemonic::{self, Mnemonic};
use crate::operand::{ImmWidth, MemBase, Memory, Operand, PrefixHint};
use crate::registers::{RegClass, Register};

impl<'a> Arbitrary<'a> for Mnemonic {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(*u.choose(mnemonic::ALL)?)
    }
}

/// `(class, lowest valid index, count)`. `Gpr8h` occupies indices 4-7, not
/// 0-3 (see `registers.rs`), since that's the ModRM.reg/rm field the
/// no-REX encoding of AH/CH/DH/BH actually occupies.
const GPR_CLASSES: [(RegClass, u8, u8); 5] = [
    (RegClass::Gpr8, 0, 16),
    (RegClass::Gpr8h, 4, 4),
    (RegClass::Gpr16, 0, 16),
    (RegClass::Gpr32, 0, 16),
    (RegClass::Gpr64, 0, 16),
];

impl<'a> Arbitrary<'a> for Register {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let (class, low, count) = *u.choose(&GPR_CLASSES)?;
        let index = low + u.int_in_range(0..=count - 1)?;
        Ok(Register::new(class, index))
    }
}

impl<'a> Arbitrary<'a> for ImmWidth {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(*u.choose(&[
            ImmWidth::Imm8,
            ImmWidth::Imm16,
            ImmWidth::Imm32,
            ImmWidth::Imm64,
            ImmWidth::Ptr,
            ImmWidth::Auto,
        ])?)
    }
}

impl<'a> Arbitrary<'a> for MemBase {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(match u.int_in_range(0..=2u8)? {
            0 => MemBase::None,
            1 => MemBase::Reg(Register::arbitrary(u)?),
            _ => MemBase::Rip,
        })
    }
}

impl<'a> Arbitrary<'a> for Memory {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(Memory {
            base: MemBase::arbitrary(u)?,
            disp: i32::arbitrary(u)?,
            index: Option::<Register>::arbitrary(u)?,
            scale: *u.choose(&[1u8, 2, 4, 8])?,
            segment: None,
            explicit_size: None,
        })
    }
}

impl<'a> Arbitrary<'a> for Operand {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(match u.int_in_range(0..=5u8)? {
            0 => Operand::Register(Register::arbitrary(u)?),
            1 => Operand::Immediate { width: ImmWidth::arbitrary(u)?, value: i64::arbitrary(u)? },
            2 => Operand::Memory(Memory::arbitrary(u)?),
            3 => Operand::Relative(i32::arbitrary(u)?),
            4 => Operand::PrefixHint(*u.choose(&[PrefixHint::Pref66, PrefixHint::PrefRexW])?),
            _ => Operand::None,
        })
    }
}

impl<'a> Arbitrary<'a> for Instruction {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let mnemonic = Mnemonic::arbitrary(u)?;
        let arity = u.int_in_range(0..=4u8)? as usize;
        let mut operands = [Operand::None; 4];
        for slot in operands.iter_mut().take(arity) {
            *slot = Operand::arbitrary(u)?;
        }
        Ok(Instruction::new(mnemonic, operands))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;

    /// Feeds arbitrary byte streams through `Instruction::arbitrary` and
    /// `assemble`; the test's only assertion is that neither panics, and
    /// that a successful assembly doesn't fail to terminate.
    #[test]
    fn arbitrary_instructions_never_panic() {
        let mut bytes = vec![0u8; 512];
        for seed in 0u8..=255 {
            for (i, b) in bytes.iter_mut().enumerate() {
                *b = seed.wrapping_add(i as u8);
            }
            let mut u = Unstructured::new(&bytes);
            let Ok(instr) = Instruction::arbitrary(&mut u) else { continue };
            let _ = assemble(&[instr]);
        }
    }
}
