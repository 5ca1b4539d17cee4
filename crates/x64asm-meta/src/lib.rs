//! Build-time table generator for the `x64asm` crate.
//!
//! This crate owns the catalog of instruction mnemonics and their encoding
//! forms; `x64asm`'s `build.rs` calls [`generate_rust_table`] and `include!`s
//! the result into `src/table.rs`. Keeping the catalog here, rather than
//! constructed at `x64asm` startup, means the static table is pure data by
//! the time it reaches the main crate: no initialization order to reason
//! about, no runtime cost to build it.

pub mod dsl;
pub mod generate;
mod instructions;

use dsl::Inst;
use std::fs;
use std::io;
use std::path::Path;

fn all_instructions() -> Vec<Inst> {
    use instructions::*;

    let mut insts = vec![
        mov::mov(),
        mov::lea(),
        mov::xchg(),
        mov::movzx(),
        mov::movsx(),
        mov::movsxd(),
        stack::push(),
        stack::pop(),
        alu::test(),
        jmp::jmp(),
        jmp::call(),
        jmp::ret(),
        avx::vmovaps(),
        avx::vxorps(),
        avx::vaddps(),
        fpu::fld(),
        fpu::fstp(),
        fpu::fadd(),
    ];

    insts.extend(simple::simple_forms());
    insts.extend(alu::alu_group());
    insts.extend(alu::unary_group());
    insts.extend(alu::muldiv_group());
    insts.extend(alu::shift_group());
    insts.extend(jmp::jcc_group());
    insts.extend(sse::moves());
    insts.extend(sse::arith());

    insts
}

/// Generate the table source and write it to `out_path`.
///
/// # Errors
///
/// Returns an error if `out_path` cannot be written.
pub fn generate_rust_table(out_path: &Path) -> io::Result<()> {
    let insts = all_instructions();
    let text = generate::generate_table(&insts);
    fs::write(out_path, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonic_list_has_no_duplicates() {
        let insts = all_instructions();
        let mut variants: Vec<&str> = insts.iter().map(|i| i.variant).collect();
        variants.sort_unstable();
        let before = variants.len();
        variants.dedup();
        assert_eq!(before, variants.len(), "duplicate Mnemonic variant in catalog");
    }

    #[test]
    fn every_form_has_matching_role_and_shape_arity() {
        for inst in all_instructions() {
            for form in &inst.forms {
                assert_eq!(
                    form.shapes.len(),
                    form.roles.len(),
                    "{}: shape/role arity mismatch",
                    inst.mnemonic
                );
            }
        }
    }
}
