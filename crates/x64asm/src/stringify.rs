//! The Intel-syntax stringifier: renders an instruction array to text, one
//! instruction per line, tab-indented when the array has more than one
//! instruction.

use std::fmt::Write as _;

use crate::instruction::Instruction;
use crate::operand::{MemBase, Memory, Operand};
use crate::registers::{self, RegClass};

/// Render `instructions` as Intel-syntax assembly text.
///
/// This never fails: operands are rendered from the caller-supplied model
/// directly, independent of whether [`crate::select::select`] would accept
/// them. Malformed operand combinations surface as assembler errors, not
/// stringifier errors.
#[must_use]
pub fn stringify(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    for (i, instr) in instructions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if instructions.len() > 1 {
            out.push('\t');
        }
        write_instruction(&mut out, instr);
    }
    out
}

fn write_instruction(out: &mut String, instr: &Instruction) {
    let operands: Vec<&Operand> = instr.operands.iter().take(instr.arity()).collect();
    let _ = write!(out, "{}", instr.mnemonic.name());
    for (i, op) in operands.iter().enumerate() {
        out.push_str(if i == 0 { " " } else { ", " });
        write_operand(out, op, &operands);
    }
}

fn write_operand(out: &mut String, op: &Operand, siblings: &[&Operand]) {
    match op {
        Operand::Register(r) => out.push_str(registers::name(*r)),
        Operand::Immediate { value, .. } => {
            let _ = write!(out, "{value:#x}");
        }
        Operand::Relative(k) => {
            let _ = write!(out, "${}", signed_delta(*k));
        }
        Operand::Memory(mem) => write_memory(out, mem, siblings),
        Operand::PrefixHint(_) | Operand::None => {}
    }
}

fn write_memory(out: &mut String, mem: &Memory, siblings: &[&Operand]) {
    if let MemBase::RipRel = mem.base {
        let _ = write!(out, "[${}]", signed_delta(mem.disp));
        return;
    }

    if let Some(ptr) = size_keyword(mem, siblings) {
        out.push_str(ptr);
        out.push(' ');
    }
    if let Some(seg) = mem.segment {
        let _ = write!(out, "{}:", registers::name(seg));
    }
    out.push('[');
    match mem.base {
        MemBase::Rip => {
            out.push_str("rip");
            if mem.disp != 0 {
                let _ = write!(out, " {}", signed_disp(mem.disp));
            }
        }
        MemBase::RipRel => unreachable!("handled above"),
        MemBase::None => write_index_and_disp(out, mem, true),
        MemBase::Reg(base) => {
            out.push_str(registers::name(base));
            write_index_and_disp(out, mem, false);
        }
    }
    out.push(']');
}

fn write_index_and_disp(out: &mut String, mem: &Memory, first_term: bool) {
    let mut wrote_term = !first_term;
    if let Some(index) = mem.index {
        if wrote_term {
            out.push_str(" + ");
        }
        let _ = write!(out, "{}*{}", registers::name(index), mem.normalized_scale());
        wrote_term = true;
    }
    if mem.disp != 0 || !wrote_term {
        if wrote_term {
            out.push(' ');
            out.push_str(if mem.disp < 0 { "- " } else { "+ " });
            let _ = write!(out, "{:#x}", mem.disp.unsigned_abs());
        } else {
            let _ = write!(out, "{:#x}", mem.disp);
        }
    }
}

fn signed_disp(disp: i32) -> String {
    if disp < 0 {
        format!("- {:#x}", disp.unsigned_abs())
    } else {
        format!("+ {disp:#x}")
    }
}

fn signed_delta(k: i32) -> String {
    if k < 0 {
        format!("-{:#x}", k.unsigned_abs())
    } else {
        format!("+{k:#x}")
    }
}

/// Size disambiguation is required whenever no sibling operand carries a
/// register whose width the memory operand's size could otherwise borrow
/// (the common case: `mov [rax], eax` needs no `dword ptr`, but
/// `mov dword ptr [rax], 5` does).
fn size_keyword(mem: &Memory, siblings: &[&Operand]) -> Option<&'static str> {
    let bits = mem.explicit_size.or_else(|| sibling_register_width(siblings))?;
    if sibling_register_width(siblings) == Some(bits) {
        return None;
    }
    Some(match bits {
        8 => "byte ptr",
        16 => "word ptr",
        32 => "dword ptr",
        64 => "qword ptr",
        80 => "tbyte ptr",
        128 => "xmmword ptr",
        256 => "ymmword ptr",
        _ => return None,
    })
}

fn sibling_register_width(siblings: &[&Operand]) -> Option<u16> {
    siblings.iter().find_map(|op| match op {
        Operand::Register(r) => Some(match r.class {
            RegClass::Gpr8 | RegClass::Gpr8h => 8,
            RegClass::Gpr16 => 16,
            RegClass::Gpr32 => 32,
            RegClass::Gpr64 => 64,
            RegClass::Xmm => 128,
            RegClass::Ymm => 256,
            RegClass::St => 80,
            RegClass::Mmx => 64,
            RegClass::Seg | RegClass::Cr | RegClass::Dr | RegClass::K | RegClass::Bnd => return None,
        }),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mnemonic::Mnemonic;
    use crate::operand::{ImmWidth, Operand};
    use crate::registers::{gpr32, gpr64, seg};

    #[test]
    fn lea_sib_renders_with_scale_and_disp() {
        let mem = Operand::Memory(Memory {
            base: MemBase::Reg(gpr64::RAX),
            disp: 100,
            index: Some(gpr64::RDX),
            scale: 2,
            segment: Some(seg::DS),
            explicit_size: None,
        });
        let instr = Instruction::with_operands(Mnemonic::Lea, &[Operand::reg(gpr64::RAX), mem]);
        assert_eq!(stringify(&[instr]), "lea rax, [rax + rdx*2 + 0x64]");
    }

    #[test]
    fn mov_mem_imm_needs_size_keyword() {
        let mem = Operand::Memory(Memory {
            base: MemBase::Reg(gpr64::RAX),
            disp: 0,
            index: None,
            scale: 1,
            segment: None,
            explicit_size: Some(32),
        });
        let instr = Instruction::with_operands(
            Mnemonic::Mov,
            &[mem, Operand::imm(ImmWidth::Imm32, 5)],
        );
        assert_eq!(stringify(&[instr]), "mov dword ptr [rax], 0x5");
    }

    #[test]
    fn mov_mem_reg_skips_size_keyword() {
        let mem = Operand::Memory(Memory {
            base: MemBase::Reg(gpr64::RAX),
            disp: 0,
            index: None,
            scale: 1,
            segment: None,
            explicit_size: Some(32),
        });
        let instr = Instruction::with_operands(Mnemonic::Mov, &[mem, Operand::reg(gpr32::EAX)]);
        assert_eq!(stringify(&[instr]), "mov [rax], eax");
    }

    #[test]
    fn jmp_relative_renders_dollar_form() {
        let instr = Instruction::with_operands(Mnemonic::Jmp, &[Operand::rel(0)]);
        assert_eq!(stringify(&[instr]), "jmp $+0x0");
    }

    #[test]
    fn riprel_memory_renders_dollar_bracket_form() {
        let mem = Operand::Memory(Memory {
            base: MemBase::RipRel,
            disp: -5,
            index: None,
            scale: 1,
            segment: None,
            explicit_size: None,
        });
        let instr = Instruction::with_operands(Mnemonic::Lea, &[Operand::reg(gpr64::RAX), mem]);
        assert_eq!(stringify(&[instr]), "lea rax, [$-0x5]");
    }

    #[test]
    fn multi_instruction_lines_are_tab_indented() {
        let nop = Instruction::with_operands(Mnemonic::Nop, &[]);
        let text = stringify(&[nop, nop]);
        assert_eq!(text, "\tnop\n\tnop");
    }
}
