use crate::dsl::{Form, Inst, Role::*, Shape::*};

pub fn moves() -> Vec<Inst> {
    vec![
        Inst {
            mnemonic: "MOVAPS",
            variant: "Movaps",
            forms: vec![
                Form::new(&[&[Xmm], &[Xmm, M128]], &[0x0f, 0x28]).roles(&[Reg, Rm]),
                Form::new(&[&[Xmm, M128], &[Xmm]], &[0x0f, 0x29]).roles(&[Rm, Reg]),
            ],
        },
        Inst {
            mnemonic: "MOVUPS",
            variant: "Movups",
            forms: vec![
                Form::new(&[&[Xmm], &[Xmm, M128]], &[0x0f, 0x10]).roles(&[Reg, Rm]),
                Form::new(&[&[Xmm, M128], &[Xmm]], &[0x0f, 0x11]).roles(&[Rm, Reg]),
            ],
        },
        Inst {
            mnemonic: "MOVSD",
            variant: "Movsd",
            forms: vec![
                Form::new(&[&[Xmm], &[Xmm, M64]], &[0x0f, 0x10]).prefix_f2().roles(&[Reg, Rm]),
                Form::new(&[&[Xmm, M64], &[Xmm]], &[0x0f, 0x11]).prefix_f2().roles(&[Rm, Reg]),
            ],
        },
        Inst {
            mnemonic: "MOVSS",
            variant: "Movss",
            forms: vec![
                Form::new(&[&[Xmm], &[Xmm, M32]], &[0x0f, 0x10]).prefix_f3().roles(&[Reg, Rm]),
                Form::new(&[&[Xmm, M32], &[Xmm]], &[0x0f, 0x11]).prefix_f3().roles(&[Rm, Reg]),
            ],
        },
        Inst {
            mnemonic: "XORPS",
            variant: "Xorps",
            forms: vec![Form::new(&[&[Xmm], &[Xmm, M128]], &[0x0f, 0x57]).roles(&[Reg, Rm])],
        },
        Inst {
            mnemonic: "PXOR",
            variant: "Pxor",
            forms: vec![Form::new(&[&[Xmm], &[Xmm, M128]], &[0x0f, 0xef]).prefix66().roles(&[Reg, Rm])],
        },
        Inst {
            mnemonic: "UCOMISS",
            variant: "Ucomiss",
            forms: vec![Form::new(&[&[Xmm], &[Xmm, M32]], &[0x0f, 0x2e]).roles(&[Reg, Rm])],
        },
        Inst {
            mnemonic: "UCOMISD",
            variant: "Ucomisd",
            forms: vec![Form::new(&[&[Xmm], &[Xmm, M64]], &[0x0f, 0x2e]).prefix66().roles(&[Reg, Rm])],
        },
        Inst {
            mnemonic: "CVTSI2SD",
            variant: "Cvtsi2sd",
            forms: vec![
                Form::new(&[&[Xmm], &[R32, M32]], &[0x0f, 0x2a]).prefix_f2().roles(&[Reg, Rm]),
                Form::new(&[&[Xmm], &[R64, M64]], &[0x0f, 0x2a]).prefix_f2().roles(&[Reg, Rm]).rex_w(),
            ],
        },
        Inst {
            mnemonic: "CVTTSD2SI",
            variant: "Cvttsd2si",
            forms: vec![
                Form::new(&[&[R32], &[Xmm, M64]], &[0x0f, 0x2c]).prefix_f2().roles(&[Reg, Rm]),
                Form::new(&[&[R64], &[Xmm, M64]], &[0x0f, 0x2c]).prefix_f2().roles(&[Reg, Rm]).rex_w(),
            ],
        },
    ]
}

/// The four scalar arithmetic ops (ADD/SUB/MUL/DIV) each come in an `SS`
/// (single) and `SD` (double) flavor that only differ by mandatory prefix
/// and memory operand width.
pub fn arith() -> Vec<Inst> {
    let ops: &[(&str, u8)] = &[("ADD", 0x58), ("SUB", 0x5c), ("MUL", 0x59), ("DIV", 0x5e)];
    let mut insts = Vec::new();
    for &(base, opcode) in ops {
        insts.push(Inst {
            mnemonic: Box::leak(format!("{base}SS").into_boxed_str()),
            variant: Box::leak(format!("{}ss", titlecase(base)).into_boxed_str()),
            forms: vec![Form::new(&[&[Xmm], &[Xmm, M32]], &[0x0f, opcode]).prefix_f3().roles(&[Reg, Rm])],
        });
        insts.push(Inst {
            mnemonic: Box::leak(format!("{base}SD").into_boxed_str()),
            variant: Box::leak(format!("{}sd", titlecase(base)).into_boxed_str()),
            forms: vec![Form::new(&[&[Xmm], &[Xmm, M64]], &[0x0f, opcode]).prefix_f2().roles(&[Reg, Rm])],
        });
    }
    insts
}

fn titlecase(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_string() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
