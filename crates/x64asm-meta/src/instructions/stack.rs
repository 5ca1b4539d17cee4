use crate::dsl::{Form, Inst, Role::*, Shape::*};

pub fn push() -> Inst {
    Inst {
        mnemonic: "PUSH",
        variant: "Push",
        forms: vec![
            Form::new(&[&[R64]], &[0x50]).roles(&[OpcodeReg]),
            Form::new(&[&[R64, M64]], &[0xff]).ext(6).roles(&[Rm]),
            Form::new(&[&[Imm32]], &[0x68]).roles(&[Imm(4)]),
            Form::new(&[&[Imm8]], &[0x6a]).roles(&[Imm(1)]).size(1),
        ],
    }
}

pub fn pop() -> Inst {
    Inst {
        mnemonic: "POP",
        variant: "Pop",
        forms: vec![
            Form::new(&[&[R64]], &[0x58]).roles(&[OpcodeReg]),
            Form::new(&[&[R64, M64]], &[0x8f]).ext(0).roles(&[Rm]),
        ],
    }
}
