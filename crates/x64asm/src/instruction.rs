//! The instruction record: a mnemonic plus up to four operands.

use crate::mnemonic::Mnemonic;
use crate::operand::Operand;

/// One instruction record, caller-built and read-only during assembly.
///
/// Trailing unused operand slots must be [`Operand::None`]; this type is
/// intentionally POD-like so that callers may build static arrays of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub operands: [Operand; 4],
}

impl Instruction {
    #[must_use]
    pub fn new(mnemonic: Mnemonic, operands: [Operand; 4]) -> Self {
        Self { mnemonic, operands }
    }

    /// Build an instruction from up to four operands, padding the rest with
    /// [`Operand::None`].
    #[must_use]
    pub fn with_operands(mnemonic: Mnemonic, operands: &[Operand]) -> Self {
        let mut slots = [Operand::None; 4];
        assert!(operands.len() <= 4, "an instruction has at most 4 operands");
        slots[..operands.len()].copy_from_slice(operands);
        Self { mnemonic, operands: slots }
    }

    /// The number of non-`None` operands, counting from the front (trailing
    /// slots must be `None` per the record's invariant).
    #[must_use]
    pub fn arity(&self) -> usize {
        self.operands.iter().take_while(|o| !o.is_none()).count()
    }
}
