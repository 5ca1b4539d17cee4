//! Emit the generated `Variant` table as Rust source text.

use crate::dsl::{FixedReg, Form, Inst, OpcodeExt, Prefix, Role, Shape};
use std::fmt::Write;

/// A tiny indentation-tracking string builder, in the same spirit as the
/// formatter cranelift's own table generator uses: avoid a templating crate
/// for what is fundamentally a sequence of `writeln!` calls.
pub struct Formatter {
    buf: String,
    indent: usize,
}

impl Formatter {
    fn new() -> Self {
        Self { buf: String::new(), indent: 0 }
    }

    fn line(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.buf.push_str("    ");
        }
        self.buf.push_str(s);
        self.buf.push('\n');
    }

    fn indent(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }
}

fn shape_text(shape: Shape) -> String {
    match shape {
        Shape::R8 => "Shape::R8".into(),
        Shape::R8h => "Shape::R8h".into(),
        Shape::R16 => "Shape::R16".into(),
        Shape::R32 => "Shape::R32".into(),
        Shape::R64 => "Shape::R64".into(),
        Shape::Xmm => "Shape::Xmm".into(),
        Shape::Ymm => "Shape::Ymm".into(),
        Shape::St => "Shape::St".into(),
        Shape::M8 => "Shape::M8".into(),
        Shape::M16 => "Shape::M16".into(),
        Shape::M32 => "Shape::M32".into(),
        Shape::M64 => "Shape::M64".into(),
        Shape::M80 => "Shape::M80".into(),
        Shape::M128 => "Shape::M128".into(),
        Shape::M256 => "Shape::M256".into(),
        Shape::M512 => "Shape::M512".into(),
        Shape::M => "Shape::M".into(),
        Shape::Imm8 => "Shape::Imm8".into(),
        Shape::Imm16 => "Shape::Imm16".into(),
        Shape::Imm32 => "Shape::Imm32".into(),
        Shape::Imm64 => "Shape::Imm64".into(),
        Shape::Rel8 => "Shape::Rel8".into(),
        Shape::Rel32 => "Shape::Rel32".into(),
        Shape::Fixed(reg) => format!(
            "Shape::Fixed({})",
            match reg {
                FixedReg::Al => "FIXED_AL",
                FixedReg::Ax => "FIXED_AX",
                FixedReg::Eax => "FIXED_EAX",
                FixedReg::Rax => "FIXED_RAX",
                FixedReg::Cl => "FIXED_CL",
                FixedReg::Dx => "FIXED_DX",
            }
        ),
    }
}

fn role_text(role: Role) -> String {
    match role {
        Role::None => "OperandRole::None".into(),
        Role::Reg => "OperandRole::ModRmReg".into(),
        Role::Rm => "OperandRole::ModRmRm".into(),
        Role::Vvvv => "OperandRole::VexVvvv".into(),
        Role::Imm(w) => format!("OperandRole::Imm({w})"),
        Role::Rel(w) => format!("OperandRole::Rel({w})"),
        Role::Implicit => "OperandRole::Implicit".into(),
        Role::OpcodeReg => "OperandRole::OpcodeReg".into(),
    }
}

fn prefix_text(prefix: Prefix) -> &'static str {
    match prefix {
        Prefix::None => "MandatoryPrefix::None",
        Prefix::P66 => "MandatoryPrefix::P66",
        Prefix::Pf2 => "MandatoryPrefix::Pf2",
        Prefix::Pf3 => "MandatoryPrefix::Pf3",
    }
}

fn emit_form(f: &mut Formatter, form: &Form) {
    f.line("Variant {");
    f.indent(|f| {
        let slots = form
            .shapes
            .iter()
            .map(|slot| {
                let tags = slot.iter().map(|s| shape_text(*s)).collect::<Vec<_>>().join(", ");
                format!("&[{tags}]")
            })
            .collect::<Vec<_>>()
            .join(", ");
        f.line(&format!("shapes: &[{slots}],"));

        let legacy = match form.legacy_prefix {
            Some(b) => format!("Some({b:#04x})"),
            None => "None".into(),
        };
        f.line(&format!("legacy_prefix: {legacy},"));
        f.line(&format!("mandatory_prefix: {},", prefix_text(form.mandatory_prefix)));
        f.line(&format!("rex_w: {},", form.rex_w));

        let vex = match &form.vex {
            Some(v) => format!(
                "Some(VexSpec {{ l: {}, pp: {}, mm: {}, w: {} }})",
                v.l, v.pp, v.mm, v.w
            ),
            None => "None".into(),
        };
        f.line(&format!("vex: {vex},"));

        let opcode = form
            .opcode
            .iter()
            .map(|b| format!("{b:#04x}"))
            .collect::<Vec<_>>()
            .join(", ");
        f.line(&format!("opcode: &[{opcode}],"));

        let ext = match form.opcode_ext {
            OpcodeExt::Digit(d) => format!("OpcodeExt::Digit({d})"),
            OpcodeExt::UseReg => "OpcodeExt::UseReg".into(),
        };
        f.line(&format!("opcode_ext: {ext},"));

        let roles = form
            .roles
            .iter()
            .map(|r| role_text(*r))
            .collect::<Vec<_>>()
            .join(", ");
        f.line(&format!("roles: &[{roles}],"));
        f.line(&format!("size_category: {},", form.size_category));
    });
    f.line("},");
}

/// Generate the full table module body: one `&[Variant]` slice per mnemonic
/// plus the top-level `(Mnemonic, &[Variant])` lookup array.
///
/// This is `include!`-ed directly into `table.rs`'s module scope, so it can
/// refer to `Variant`, `Shape`, `OperandRole`, `OpcodeExt`, `MandatoryPrefix`,
/// `VexSpec`, `Mnemonic`, and the `FIXED_*` register constants unqualified.
pub fn generate_table(insts: &[Inst]) -> String {
    let mut f = Formatter::new();
    f.line("// @generated by x64asm-meta. Do not edit by hand.");
    f.buf.push('\n');

    for inst in insts {
        f.line(&format!(
            "pub(crate) static {}_VARIANTS: &[Variant] = &[",
            inst.variant.to_uppercase()
        ));
        f.indent(|f| {
            for form in &inst.forms {
                emit_form(f, form);
            }
        });
        f.line("];");
        f.buf.push('\n');
    }

    f.line("pub(crate) static MNEMONIC_TABLE: &[(Mnemonic, &[Variant])] = &[");
    f.indent(|f| {
        for inst in insts {
            f.line(&format!(
                "(Mnemonic::{}, {}_VARIANTS),",
                inst.variant,
                inst.variant.to_uppercase()
            ));
        }
    });
    f.line("];");

    f.buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::{Role, Shape};

    #[test]
    fn emits_well_formed_braces() {
        let insts = vec![Inst {
            mnemonic: "NOP",
            variant: "Nop",
            forms: vec![Form::new(&[], &[0x90])],
        }];
        let text = generate_table(&insts);
        assert_eq!(text.matches('{').count(), text.matches('}').count());
        assert!(text.contains("NOP_VARIANTS"));
        assert!(text.contains("Mnemonic::Nop"));
        let _ = Role::Reg;
        let _ = Shape::R8;
    }
}
