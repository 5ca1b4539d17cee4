use crate::dsl::{Form, Inst, Role::*, Shape::*};

/// The x87 forms implemented here are memory-only: the ModRM.reg field is an
/// opcode extension and there is no register-direct rm operand, matching the
/// FPU load/store/arith subset this catalog covers.
pub fn fld() -> Inst {
    Inst {
        mnemonic: "FLD",
        variant: "Fld",
        forms: vec![
            Form::new(&[&[M32]], &[0xd9]).ext(0).roles(&[Rm]),
            Form::new(&[&[M64]], &[0xdd]).ext(0).roles(&[Rm]),
            Form::new(&[&[M80]], &[0xdb]).ext(5).roles(&[Rm]),
        ],
    }
}

pub fn fstp() -> Inst {
    Inst {
        mnemonic: "FSTP",
        variant: "Fstp",
        forms: vec![
            Form::new(&[&[M32]], &[0xd9]).ext(3).roles(&[Rm]),
            Form::new(&[&[M64]], &[0xdd]).ext(3).roles(&[Rm]),
            Form::new(&[&[M80]], &[0xdb]).ext(7).roles(&[Rm]),
        ],
    }
}

pub fn fadd() -> Inst {
    Inst {
        mnemonic: "FADD",
        variant: "Fadd",
        forms: vec![
            Form::new(&[&[M32]], &[0xd8]).ext(0).roles(&[Rm]),
            Form::new(&[&[M64]], &[0xdc]).ext(0).roles(&[Rm]),
        ],
    }
}
