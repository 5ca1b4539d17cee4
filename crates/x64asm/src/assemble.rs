//! Sequence Assembler & Linker: drives emission across a whole instruction
//! array in one pass, then resolves instruction-relative operand
//! references (`Relative` and RIP-relative memory) in a second pass.

use crate::buffer::{CodeSink, VecSink};
use crate::emit::{emit_one as emit_bytes, PendingFixup};
use crate::error::Error;
use crate::instruction::Instruction;
use crate::rex::{fits_i32, fits_i8};
use crate::select::select;

/// A fixup recorded during pass 1, with the emitting instruction's own
/// index attached so pass 2 can compute that instruction's end offset.
struct Fixup {
    site_offset: u32,
    site_width: u8,
    owner_index: usize,
    target_instruction_index: usize,
}

/// Assemble `instructions` into a single contiguous byte buffer, resolving
/// every `Relative`/RIP-relative operand against the other instructions in
/// the same call.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if `instructions` is empty.
/// - Whatever [`crate::select::select`] or [`crate::emit::emit_one`] return
///   for the first instruction that fails to select or emit.
/// - [`Error::RelOutOfRange`] if a fixup's resolved displacement does not
///   fit the width its variant declared, or if a `rel(k)`/`riprel` delta
///   names an instruction outside the sequence.
pub fn assemble(instructions: &[Instruction]) -> Result<Vec<u8>, Error> {
    if instructions.is_empty() {
        return Err(Error::InvalidArgument);
    }

    let mut sink = VecSink::new();
    let mut start: Vec<u32> = Vec::with_capacity(instructions.len() + 1);
    let mut fixups: Vec<Fixup> = Vec::new();

    for (i, instr) in instructions.iter().enumerate() {
        start.push(sink.current_offset());
        let selection = select(instr)?;
        let mut local_fixups: Vec<PendingFixup> = Vec::new();
        emit_bytes(&selection, i, &mut sink, &mut local_fixups)?;
        fixups.extend(local_fixups.into_iter().map(|f| Fixup {
            site_offset: f.site_offset,
            site_width: f.site_width,
            owner_index: i,
            target_instruction_index: f.target_instruction_index,
        }));
    }
    start.push(sink.current_offset());

    // Fixups are applied in pass-1-recorded order, but each writes a
    // disjoint displacement slice, so the order here is not observable.
    for fixup in &fixups {
        let target_offset = i64::from(
            *start.get(fixup.target_instruction_index).ok_or(Error::RelOutOfRange)?,
        );
        let here_end = i64::from(start[fixup.owner_index + 1]);
        let displacement = target_offset - here_end;
        let fits = match fixup.site_width {
            1 => fits_i8(displacement),
            4 => fits_i32(displacement),
            _ => true,
        };
        if !fits {
            return Err(Error::RelOutOfRange);
        }
        sink.patch(fixup.site_offset, fixup.site_width, displacement);
    }

    Ok(sink.into_vec())
}

/// Emit a single instruction into `out`, returning the number of bytes
/// written. Unlike [`assemble`], this does not resolve `Relative`/RIP-
/// relative operands: their placeholder bytes are left as zero.
///
/// `out` must have room for at least 15 bytes, the maximum length of any
/// legal x86-64 instruction.
///
/// # Errors
///
/// Whatever [`crate::select::select`] or [`crate::emit::emit_one`] return.
pub fn emit_single(instruction: &Instruction, out: &mut [u8]) -> Result<usize, Error> {
    debug_assert!(out.len() >= 15, "caller must provide at least 15 bytes");
    let selection = select(instruction)?;
    let mut sink = VecSink::new();
    let mut fixups = Vec::new();
    emit_bytes(&selection, 0, &mut sink, &mut fixups)?;
    let bytes = sink.as_slice();
    out[..bytes.len()].copy_from_slice(bytes);
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;
    use crate::mnemonic::Mnemonic;
    use crate::operand::{ImmWidth, MemBase, Operand};
    use crate::registers::{gpr64, seg};

    #[test]
    fn mov_rax_imm0_matches_worked_example() {
        let instr = Instruction::with_operands(
            Mnemonic::Mov,
            &[Operand::reg(gpr64::RAX), Operand::imm(ImmWidth::Auto, 0)],
        );
        let bytes = assemble(&[instr]).expect("mov rax, 0 assembles");
        assert_eq!(bytes, vec![0x48, 0xC7, 0xC0, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn lea_with_sib_matches_worked_example() {
        let mem = Operand::Memory(crate::operand::Memory {
            base: MemBase::Reg(gpr64::RAX),
            disp: 100,
            index: Some(gpr64::RDX),
            scale: 2,
            segment: Some(seg::DS),
            explicit_size: None,
        });
        let instr = Instruction::with_operands(Mnemonic::Lea, &[Operand::reg(gpr64::RAX), mem]);
        let bytes = assemble(&[instr]).expect("lea rax, [rax+rdx*2+100] assembles");
        assert_eq!(bytes, vec![0x48, 0x8D, 0x44, 0x50, 0x64]);
    }

    #[test]
    fn jmp_rel0_is_minus_two() {
        let instr = Instruction::with_operands(Mnemonic::Jmp, &[Operand::rel(0)]);
        let bytes = assemble(&[instr]).expect("jmp $ assembles");
        assert_eq!(bytes, vec![0xEB, 0xFE]);
    }

    #[test]
    fn mov_al_imm_is_opcode_plus_reg() {
        let instr = Instruction::with_operands(
            Mnemonic::Mov,
            &[Operand::reg(crate::registers::gpr8::AL), Operand::imm(ImmWidth::Imm8, 0xFF)],
        );
        let bytes = assemble(&[instr]).expect("mov al, 0xff assembles");
        assert_eq!(bytes, vec![0xB0, 0xFF]);
    }

    #[test]
    fn mov_ah_imm_matches_worked_example() {
        let ah = Instruction::with_operands(
            Mnemonic::Mov,
            &[Operand::reg(crate::registers::gpr8h::AH), Operand::imm(ImmWidth::Imm8, 1)],
        );
        let bytes = assemble(&[ah]).expect("mov ah, 1 assembles without REX");
        assert_eq!(bytes, vec![0xB4, 0x01]);
    }

    #[test]
    fn ah_with_rex_forcing_r8b_partner_is_rejected() {
        let conflicting = Instruction::with_operands(
            Mnemonic::Mov,
            &[Operand::reg(crate::registers::gpr8h::AH), Operand::reg(crate::registers::gpr8::R9B)],
        );
        assert_eq!(assemble(&[conflicting]).unwrap_err(), Error::InvalidHighByteWithRex);
    }

    #[test]
    fn empty_sequence_is_invalid_argument() {
        assert_eq!(assemble(&[]).unwrap_err(), Error::InvalidArgument);
    }
}
