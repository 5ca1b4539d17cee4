use crate::dsl::{FixedReg, Form, Inst, Role::*, Shape::*};

/// The eight two-operand ALU instructions share one encoding pattern,
/// differing only in the base opcode byte and the `/digit` extension used by
/// their immediate forms. Rather than writing each out by hand eight times,
/// build them from a table of (display name, enum variant, base, digit).
pub fn alu_group() -> Vec<Inst> {
    let ops: &[(&str, &str, u8, u8)] = &[
        ("ADD", "Add", 0x00, 0),
        ("OR", "Or", 0x08, 1),
        ("ADC", "Adc", 0x10, 2),
        ("SBB", "Sbb", 0x18, 3),
        ("AND", "And", 0x20, 4),
        ("SUB", "Sub", 0x28, 5),
        ("XOR", "Xor", 0x30, 6),
        ("CMP", "Cmp", 0x38, 7),
    ];

    ops.iter()
        .map(|&(mnemonic, variant, base, digit)| Inst {
            mnemonic,
            variant,
            forms: vec![
                Form::new(&[&[R8, R8h, M8], &[R8, R8h]], &[base]).roles(&[Rm, Reg]),
                Form::new(&[&[R16, M16], &[R16]], &[base + 1]).roles(&[Rm, Reg]),
                Form::new(&[&[R32, M32], &[R32]], &[base + 1]).roles(&[Rm, Reg]),
                Form::new(&[&[R64, M64], &[R64]], &[base + 1]).roles(&[Rm, Reg]).rex_w(),
                Form::new(&[&[R8, R8h], &[R8, R8h, M8]], &[base + 2]).roles(&[Reg, Rm]),
                Form::new(&[&[R16], &[R16, M16]], &[base + 3]).roles(&[Reg, Rm]),
                Form::new(&[&[R32], &[R32, M32]], &[base + 3]).roles(&[Reg, Rm]),
                Form::new(&[&[R64], &[R64, M64]], &[base + 3]).roles(&[Reg, Rm]).rex_w(),
                Form::new(&[&[Fixed(FixedReg::Al)], &[Imm8]], &[base + 4])
                    .roles(&[Implicit, Imm(1)]),
                Form::new(&[&[Fixed(FixedReg::Eax)], &[Imm32]], &[base + 5])
                    .roles(&[Implicit, Imm(4)]),
                Form::new(&[&[R8, R8h, M8], &[Imm8]], &[0x80]).ext(digit).roles(&[Rm, Imm(1)]),
                Form::new(&[&[R16, M16], &[Imm16]], &[0x81]).ext(digit).roles(&[Rm, Imm(2)]),
                Form::new(&[&[R32, M32], &[Imm32]], &[0x81]).ext(digit).roles(&[Rm, Imm(4)]),
                Form::new(&[&[R64, M64], &[Imm32]], &[0x81]).ext(digit).roles(&[Rm, Imm(4)]).rex_w(),
                Form::new(&[&[R16, M16], &[Imm8]], &[0x83]).ext(digit).roles(&[Rm, Imm(1)]).size(2),
                Form::new(&[&[R32, M32], &[Imm8]], &[0x83]).ext(digit).roles(&[Rm, Imm(1)]).size(4),
                Form::new(&[&[R64, M64], &[Imm8]], &[0x83]).ext(digit).roles(&[Rm, Imm(1)]).rex_w().size(8),
            ],
        })
        .collect()
}

pub fn test() -> Inst {
    Inst {
        mnemonic: "TEST",
        variant: "Test",
        forms: vec![
            Form::new(&[&[R8, R8h, M8], &[R8, R8h]], &[0x84]).roles(&[Rm, Reg]),
            Form::new(&[&[R16, M16], &[R16]], &[0x85]).roles(&[Rm, Reg]),
            Form::new(&[&[R32, M32], &[R32]], &[0x85]).roles(&[Rm, Reg]),
            Form::new(&[&[R64, M64], &[R64]], &[0x85]).roles(&[Rm, Reg]).rex_w(),
            Form::new(&[&[Fixed(FixedReg::Al)], &[Imm8]], &[0xa8]).roles(&[Implicit, Imm(1)]),
            Form::new(&[&[Fixed(FixedReg::Eax)], &[Imm32]], &[0xa9]).roles(&[Implicit, Imm(4)]),
            Form::new(&[&[R8, R8h, M8], &[Imm8]], &[0xf6]).ext(0).roles(&[Rm, Imm(1)]),
            Form::new(&[&[R16, M16], &[Imm16]], &[0xf7]).ext(0).roles(&[Rm, Imm(2)]),
            Form::new(&[&[R32, M32], &[Imm32]], &[0xf7]).ext(0).roles(&[Rm, Imm(4)]),
            Form::new(&[&[R64, M64], &[Imm32]], &[0xf7]).ext(0).roles(&[Rm, Imm(4)]).rex_w(),
        ],
    }
}

/// The `F6`/`F7` and `FE`/`FF` unary groups: NOT, NEG, INC, DEC share their
/// opcode bytes and only vary in the `/digit` extension.
pub fn unary_group() -> Vec<Inst> {
    let ops: &[(&str, &str, u8)] = &[("NOT", "Not", 2), ("NEG", "Neg", 3)];
    let mut insts: Vec<Inst> = ops
        .iter()
        .map(|&(mnemonic, variant, digit)| Inst {
            mnemonic,
            variant,
            forms: vec![
                Form::new(&[&[R8, R8h, M8]], &[0xf6]).ext(digit).roles(&[Rm]),
                Form::new(&[&[R16, M16]], &[0xf7]).ext(digit).roles(&[Rm]),
                Form::new(&[&[R32, M32]], &[0xf7]).ext(digit).roles(&[Rm]),
                Form::new(&[&[R64, M64]], &[0xf7]).ext(digit).roles(&[Rm]).rex_w(),
            ],
        })
        .collect();

    let incdec: &[(&str, &str, u8)] = &[("INC", "Inc", 0), ("DEC", "Dec", 1)];
    insts.extend(incdec.iter().map(|&(mnemonic, variant, digit)| Inst {
        mnemonic,
        variant,
        forms: vec![
            Form::new(&[&[R8, R8h, M8]], &[0xfe]).ext(digit).roles(&[Rm]),
            Form::new(&[&[R16, M16]], &[0xff]).ext(digit).roles(&[Rm]),
            Form::new(&[&[R32, M32]], &[0xff]).ext(digit).roles(&[Rm]),
            Form::new(&[&[R64, M64]], &[0xff]).ext(digit).roles(&[Rm]).rex_w(),
        ],
    }));
    insts
}

pub fn muldiv_group() -> Vec<Inst> {
    let ops: &[(&str, &str, u8)] = &[
        ("MUL", "Mul", 4),
        ("IMUL", "Imul", 5),
        ("DIV", "Div", 6),
        ("IDIV", "Idiv", 7),
    ];
    let mut insts: Vec<Inst> = ops
        .iter()
        .map(|&(mnemonic, variant, digit)| Inst {
            mnemonic,
            variant,
            forms: vec![
                Form::new(&[&[R8, R8h, M8]], &[0xf6]).ext(digit).roles(&[Rm]),
                Form::new(&[&[R16, M16]], &[0xf7]).ext(digit).roles(&[Rm]),
                Form::new(&[&[R32, M32]], &[0xf7]).ext(digit).roles(&[Rm]),
                Form::new(&[&[R64, M64]], &[0xf7]).ext(digit).roles(&[Rm]).rex_w(),
            ],
        })
        .collect();

    // Two- and three-operand IMUL forms have no single-operand counterpart
    // among the others, so append them to the IMUL entry already built.
    if let Some(imul) = insts.iter_mut().find(|i| i.variant == "Imul") {
        imul.forms.extend([
            Form::new(&[&[R16], &[R16, M16]], &[0x0f, 0xaf]).roles(&[Reg, Rm]),
            Form::new(&[&[R32], &[R32, M32]], &[0x0f, 0xaf]).roles(&[Reg, Rm]),
            Form::new(&[&[R64], &[R64, M64]], &[0x0f, 0xaf]).roles(&[Reg, Rm]).rex_w(),
            Form::new(&[&[R32], &[R32, M32], &[Imm32]], &[0x69]).roles(&[Reg, Rm, Imm(4)]),
            Form::new(&[&[R64], &[R64, M64], &[Imm32]], &[0x69]).roles(&[Reg, Rm, Imm(4)]).rex_w(),
            Form::new(&[&[R32], &[R32, M32], &[Imm8]], &[0x6b]).roles(&[Reg, Rm, Imm(1)]),
            Form::new(&[&[R64], &[R64, M64], &[Imm8]], &[0x6b]).roles(&[Reg, Rm, Imm(1)]).rex_w(),
        ]);
    }
    insts
}

pub fn shift_group() -> Vec<Inst> {
    let ops: &[(&str, &str, u8)] = &[
        ("ROL", "Rol", 0),
        ("ROR", "Ror", 1),
        ("SHL", "Shl", 4),
        ("SHR", "Shr", 5),
        ("SAR", "Sar", 7),
    ];
    ops.iter()
        .map(|&(mnemonic, variant, digit)| Inst {
            mnemonic,
            variant,
            forms: vec![
                Form::new(&[&[R8, R8h, M8], &[Imm8]], &[0xc0]).ext(digit).roles(&[Rm, Imm(1)]),
                Form::new(&[&[R16, M16], &[Imm8]], &[0xc1]).ext(digit).roles(&[Rm, Imm(1)]).size(2),
                Form::new(&[&[R32, M32], &[Imm8]], &[0xc1]).ext(digit).roles(&[Rm, Imm(1)]).size(4),
                Form::new(&[&[R64, M64], &[Imm8]], &[0xc1]).ext(digit).roles(&[Rm, Imm(1)]).rex_w().size(8),
                Form::new(&[&[R8, R8h, M8], &[Fixed(FixedReg::Cl)]], &[0xd2]).ext(digit).roles(&[Rm, Implicit]),
                Form::new(&[&[R16, M16], &[Fixed(FixedReg::Cl)]], &[0xd3]).ext(digit).roles(&[Rm, Implicit]).size(2),
                Form::new(&[&[R32, M32], &[Fixed(FixedReg::Cl)]], &[0xd3]).ext(digit).roles(&[Rm, Implicit]).size(4),
                Form::new(&[&[R64, M64], &[Fixed(FixedReg::Cl)]], &[0xd3]).ext(digit).roles(&[Rm, Implicit]).rex_w().size(8),
            ],
        })
        .collect()
}
