use crate::dsl::{Form, Inst, Role::*, Shape::*};

pub fn mov() -> Inst {
    Inst {
        mnemonic: "MOV",
        variant: "Mov",
        forms: vec![
            Form::new(&[&[R8, R8h, M8], &[R8, R8h]], &[0x88]).roles(&[Rm, Reg]),
            Form::new(&[&[R16, M16], &[R16]], &[0x89]).roles(&[Rm, Reg]),
            Form::new(&[&[R32, M32], &[R32]], &[0x89]).roles(&[Rm, Reg]),
            Form::new(&[&[R64, M64], &[R64]], &[0x89]).roles(&[Rm, Reg]).rex_w(),
            Form::new(&[&[R8, R8h], &[R8, R8h, M8]], &[0x8a]).roles(&[Reg, Rm]),
            Form::new(&[&[R16], &[R16, M16]], &[0x8b]).roles(&[Reg, Rm]),
            Form::new(&[&[R32], &[R32, M32]], &[0x8b]).roles(&[Reg, Rm]),
            Form::new(&[&[R64], &[R64, M64]], &[0x8b]).roles(&[Reg, Rm]).rex_w(),
            Form::new(&[&[R8, R8h, M8], &[Imm8]], &[0xc6]).ext(0).roles(&[Rm, Imm(1)]),
            Form::new(&[&[R16, M16], &[Imm16]], &[0xc7]).ext(0).roles(&[Rm, Imm(2)]),
            Form::new(&[&[R32, M32], &[Imm32]], &[0xc7]).ext(0).roles(&[Rm, Imm(4)]),
            Form::new(&[&[R64, M64], &[Imm32]], &[0xc7]).ext(0).roles(&[Rm, Imm(4)]).rex_w(),
            Form::new(&[&[R8, R8h], &[Imm8]], &[0xb0]).roles(&[OpcodeReg, Imm(1)]),
            Form::new(&[&[R16], &[Imm16]], &[0xb8]).roles(&[OpcodeReg, Imm(2)]),
            Form::new(&[&[R32], &[Imm32]], &[0xb8]).roles(&[OpcodeReg, Imm(4)]),
            Form::new(&[&[R64], &[Imm64]], &[0xb8]).roles(&[OpcodeReg, Imm(8)]).rex_w(),
        ],
    }
}

pub fn lea() -> Inst {
    Inst {
        mnemonic: "LEA",
        variant: "Lea",
        forms: vec![
            Form::new(&[&[R16], &[M]], &[0x8d]).roles(&[Reg, Rm]),
            Form::new(&[&[R32], &[M]], &[0x8d]).roles(&[Reg, Rm]),
            Form::new(&[&[R64], &[M]], &[0x8d]).roles(&[Reg, Rm]).rex_w(),
        ],
    }
}

pub fn xchg() -> Inst {
    Inst {
        mnemonic: "XCHG",
        variant: "Xchg",
        forms: vec![
            Form::new(&[&[R8, R8h, M8], &[R8, R8h]], &[0x86]).roles(&[Rm, Reg]),
            Form::new(&[&[R16, M16], &[R16]], &[0x87]).roles(&[Rm, Reg]),
            Form::new(&[&[R32, M32], &[R32]], &[0x87]).roles(&[Rm, Reg]),
            Form::new(&[&[R64, M64], &[R64]], &[0x87]).roles(&[Rm, Reg]).rex_w(),
        ],
    }
}

pub fn movzx() -> Inst {
    Inst {
        mnemonic: "MOVZX",
        variant: "Movzx",
        forms: vec![
            Form::new(&[&[R32], &[R8, R8h, M8]], &[0x0f, 0xb6]).roles(&[Reg, Rm]),
            Form::new(&[&[R64], &[R8, R8h, M8]], &[0x0f, 0xb6]).roles(&[Reg, Rm]).rex_w(),
            Form::new(&[&[R32], &[R16, M16]], &[0x0f, 0xb7]).roles(&[Reg, Rm]),
            Form::new(&[&[R64], &[R16, M16]], &[0x0f, 0xb7]).roles(&[Reg, Rm]).rex_w(),
        ],
    }
}

pub fn movsx() -> Inst {
    Inst {
        mnemonic: "MOVSX",
        variant: "Movsx",
        forms: vec![
            Form::new(&[&[R32], &[R8, R8h, M8]], &[0x0f, 0xbe]).roles(&[Reg, Rm]),
            Form::new(&[&[R64], &[R8, R8h, M8]], &[0x0f, 0xbe]).roles(&[Reg, Rm]).rex_w(),
            Form::new(&[&[R32], &[R16, M16]], &[0x0f, 0xbf]).roles(&[Reg, Rm]),
            Form::new(&[&[R64], &[R16, M16]], &[0x0f, 0xbf]).roles(&[Reg, Rm]).rex_w(),
        ],
    }
}

pub fn movsxd() -> Inst {
    Inst {
        mnemonic: "MOVSXD",
        variant: "Movsxd",
        forms: vec![Form::new(&[&[R64], &[R32, M32]], &[0x63]).roles(&[Reg, Rm]).rex_w()],
    }
}
