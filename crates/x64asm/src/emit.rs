//! The byte emitter: given a resolved [`crate::select::Selection`], write
//! legacy/REX/VEX prefixes, opcode, ModR/M, SIB, displacement, and
//! immediate/relative bytes into a caller-supplied sink, in the fixed
//! x86-64 emission order.

use crate::buffer::CodeSink;
use crate::error::Error;
use crate::operand::{MemBase, Memory, Operand};
use crate::registers::{RegClass, Register};
use crate::rex::{emit_le, encode_modrm, encode_sib, fits_i8, RexBits};
use crate::select::Selection;
use crate::table::{MandatoryPrefix, OpcodeExt, OperandRole, Variant};
use crate::vex::VexPrefix;

/// A not-yet-linked relative-displacement site, recorded while emitting one
/// instruction. The assembler's second pass (see [`crate::assemble`])
/// patches these once every instruction's start offset is known.
#[derive(Clone, Copy, Debug)]
pub struct PendingFixup {
    /// Offset of the placeholder's first byte, from the start of the
    /// current instruction's own emission (callers assembling a full
    /// sequence add the instruction's start offset before linking).
    pub site_offset: u32,
    pub site_width: u8,
    /// Absolute target instruction index, already resolved from the
    /// source operand's instruction-relative delta.
    pub target_instruction_index: usize,
}

enum ResolvedRm {
    Reg(u8),
    Mem(Memory),
}

/// Emit one instruction's bytes into `sink`, appending any relative-operand
/// sites to `fixups`.
///
/// # Errors
///
/// Returns [`Error::InvalidHighByteWithRex`] if a high-byte GPR operand
/// (AH/BH/CH/DH) is combined with an operand or REX.W requirement that
/// would force a REX prefix.
pub fn emit_one(
    sel: &Selection,
    instruction_index: usize,
    sink: &mut impl CodeSink,
    fixups: &mut Vec<PendingFixup>,
) -> Result<(), Error> {
    let v = sel.variant;

    if let Some(seg) = segment_override(&sel.operands) {
        sink.put1(seg);
    }
    if let Some(byte) = v.legacy_prefix {
        sink.put1(byte);
    }
    // A legacy (non-vector) variant whose output size category is 16 bits
    // implies the 0x66 operand-size override; vector/mandatory-prefix forms
    // declare their own use of 0x66 explicitly via `mandatory_prefix`.
    if v.size_category == 2 && v.mandatory_prefix == MandatoryPrefix::None && v.vex.is_none() {
        sink.put1(0x66);
    }
    match v.mandatory_prefix {
        MandatoryPrefix::None => {}
        MandatoryPrefix::P66 => sink.put1(0x66),
        MandatoryPrefix::Pf2 => sink.put1(0xF2),
        MandatoryPrefix::Pf3 => sink.put1(0xF3),
    }

    let reg_enc = find_register_for_role(v, &sel.operands, OperandRole::ModRmReg);
    let vvvv_enc = find_register_for_role(v, &sel.operands, OperandRole::VexVvvv);
    let opcode_reg_enc = find_register_for_role(v, &sel.operands, OperandRole::OpcodeReg);
    let rm = find_rm(v, &sel.operands);

    let has_high_byte = sel
        .operands
        .iter()
        .any(|op| matches!(op, Operand::Register(r) if r.class == RegClass::Gpr8h));
    let force_rex_low_byte = sel
        .operands
        .iter()
        .any(|op| matches!(op, Operand::Register(r) if r.class == RegClass::Gpr8 && (4..=7).contains(&r.index)));

    if let Some(vex) = v.vex {
        let (b, x) = match &rm {
            Some(ResolvedRm::Reg(idx)) => (Some(*idx), None),
            Some(ResolvedRm::Mem(mem)) => (mem_base_index(mem), mem.index.map(|r| r.index)),
            None => (None, None),
        };
        VexPrefix::three_op(reg_enc.unwrap_or(0), vvvv_enc.unwrap_or(0), (b, x), vex.l, vex.pp, vex.mm, vex.w)
            .encode(sink);
    } else {
        let mut bits = RexBits { w: v.rex_w, ..RexBits::default() };
        if let Some(r) = reg_enc {
            bits.r = r >= 8;
        }
        match &rm {
            Some(ResolvedRm::Reg(idx)) => bits.b = *idx >= 8,
            Some(ResolvedRm::Mem(mem)) => {
                if let Some(base_idx) = mem_base_index(mem) {
                    bits.b = base_idx >= 8;
                }
                if let Some(idx) = mem.index {
                    bits.x = idx.index >= 8;
                }
            }
            None => {}
        }
        if let Some(r) = opcode_reg_enc {
            bits.b = r >= 8;
        }
        if has_high_byte {
            if bits.is_nonzero() || force_rex_low_byte {
                return Err(Error::InvalidHighByteWithRex);
            }
        } else {
            bits.emit(sink, force_rex_low_byte);
        }
    }

    if let Some((last, head)) = v.opcode.split_last() {
        for byte in head {
            sink.put1(*byte);
        }
        let last_byte = opcode_reg_enc.map_or(*last, |r| last | (r & 7));
        sink.put1(last_byte);
    }

    let has_modrm = v.roles.iter().any(|r| matches!(r, OperandRole::ModRmReg | OperandRole::ModRmRm));
    if has_modrm {
        let reg_field = match v.opcode_ext {
            OpcodeExt::Digit(d) => d,
            OpcodeExt::UseReg => reg_enc.unwrap_or(0) & 7,
        };
        match rm {
            Some(ResolvedRm::Reg(idx)) => sink.put1(encode_modrm(0b11, reg_field, idx & 7)),
            Some(ResolvedRm::Mem(mem)) => {
                emit_memory(sink, reg_field, &mem, instruction_index, fixups)?;
            }
            None => {}
        }
    }

    for (op, role) in sel.operands.iter().zip(v.roles.iter()) {
        match role {
            OperandRole::Imm(width) => {
                if let Operand::Immediate { value, .. } = op {
                    emit_le(sink, *width, *value);
                }
            }
            OperandRole::Rel(width) => {
                if let Operand::Relative(k) = op {
                    let offset = sink.current_offset();
                    emit_le(sink, *width, 0);
                    fixups.push(PendingFixup {
                        site_offset: offset,
                        site_width: *width,
                        target_instruction_index: instruction_index.wrapping_add_signed(*k as isize),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn find_register_for_role(v: &Variant, operands: &[Operand], target: OperandRole) -> Option<u8> {
    operands.iter().zip(v.roles.iter()).find_map(|(op, role)| {
        if *role == target {
            if let Operand::Register(r) = op {
                return Some(r.index);
            }
        }
        None
    })
}

fn find_rm(v: &Variant, operands: &[Operand]) -> Option<ResolvedRm> {
    operands.iter().zip(v.roles.iter()).find_map(|(op, role)| {
        if *role == OperandRole::ModRmRm {
            return match op {
                Operand::Register(r) => Some(ResolvedRm::Reg(r.index)),
                Operand::Memory(m) => Some(ResolvedRm::Mem(*m)),
                _ => None,
            };
        }
        None
    })
}

fn mem_base_index(mem: &Memory) -> Option<u8> {
    match mem.base {
        MemBase::Reg(r) => Some(r.index),
        MemBase::None | MemBase::Rip | MemBase::RipRel => None,
    }
}

fn emit_memory(
    sink: &mut impl CodeSink,
    reg_field: u8,
    mem: &Memory,
    instruction_index: usize,
    fixups: &mut Vec<PendingFixup>,
) -> Result<(), Error> {
    match mem.base {
        MemBase::Rip | MemBase::RipRel => {
            sink.put1(encode_modrm(0b00, reg_field, 0b101));
            if matches!(mem.base, MemBase::Rip) {
                #[allow(clippy::cast_sign_loss)]
                sink.put4(mem.disp as u32);
            } else {
                let offset = sink.current_offset();
                sink.put4(0);
                fixups.push(PendingFixup {
                    site_offset: offset,
                    site_width: 4,
                    target_instruction_index: instruction_index.wrapping_add_signed(mem.disp as isize),
                });
            }
        }
        MemBase::None => {
            sink.put1(encode_modrm(0b00, reg_field, 0b100));
            let (scale, index_enc) = sib_index(mem);
            sink.put1(encode_sib(scale, index_enc, 0b101));
            #[allow(clippy::cast_sign_loss)]
            sink.put4(mem.disp as u32);
        }
        MemBase::Reg(base) => {
            let base_enc = base.enc();
            let needs_sib = base_enc == 0b100 || mem.index.is_some();
            let rbp_pattern = base_enc == 0b101;
            let (m0d, disp_width) = if mem.disp == 0 && !rbp_pattern {
                (0b00, 0u8)
            } else if fits_i8(i64::from(mem.disp)) {
                (0b01, 1)
            } else {
                (0b10, 4)
            };
            if needs_sib {
                sink.put1(encode_modrm(m0d, reg_field, 0b100));
                let (scale, index_enc) = sib_index(mem);
                sink.put1(encode_sib(scale, index_enc, base_enc));
            } else {
                sink.put1(encode_modrm(m0d, reg_field, base_enc));
            }
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            match disp_width {
                0 => {}
                1 => sink.put1(mem.disp as u8),
                4 => sink.put4(mem.disp as u32),
                _ => unreachable!("disp_width is always 0, 1, or 4"),
            }
        }
    }
    Ok(())
}

fn sib_index(mem: &Memory) -> (u8, u8) {
    match mem.index {
        Some(idx) => (scale_bits(mem.normalized_scale()), idx.enc()),
        None => (0b00, 0b100),
    }
}

fn scale_bits(scale: u8) -> u8 {
    match scale {
        2 => 0b01,
        4 => 0b10,
        8 => 0b11,
        _ => 0b00,
    }
}

fn segment_override(operands: &[Operand]) -> Option<u8> {
    operands.iter().find_map(|op| match op {
        Operand::Memory(mem) => mem.segment.and_then(|seg| segment_override_byte(mem, seg)),
        _ => None,
    })
}

fn segment_override_byte(mem: &Memory, seg: Register) -> Option<u8> {
    if seg.class != RegClass::Seg || is_default_segment(mem, seg) {
        return None;
    }
    match seg.index {
        0 => Some(0x26),
        1 => Some(0x2e),
        2 => Some(0x36),
        3 => Some(0x3e),
        4 => Some(0x64),
        5 => Some(0x65),
        _ => None,
    }
}

/// Whether `seg` is the segment the hardware already implies for `mem`'s
/// base, in which case no override byte is emitted: SS for RBP/R13-pattern
/// bases, DS otherwise.
fn is_default_segment(mem: &Memory, seg: Register) -> bool {
    let default_is_ss = matches!(mem.base, MemBase::Reg(r) if r.enc() == 0b101);
    seg.index == if default_is_ss { 2 } else { 3 }
}
