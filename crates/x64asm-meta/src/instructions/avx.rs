use crate::dsl::{Form, Inst, Role::*, Shape::*};

/// `pp`/`mm` fields for the 128-bit `VEX.0F` encoding space used by the
/// packed-single forms implemented here.
const PP_NONE: u8 = 0;
const MM_0F: u8 = 1;

pub fn vmovaps() -> Inst {
    Inst {
        mnemonic: "VMOVAPS",
        variant: "Vmovaps",
        forms: vec![
            Form::new(&[&[Xmm], &[Xmm, M128]], &[0x28])
                .vex(0, PP_NONE, MM_0F, false)
                .roles(&[Reg, Rm]),
            Form::new(&[&[Xmm, M128], &[Xmm]], &[0x29])
                .vex(0, PP_NONE, MM_0F, false)
                .roles(&[Rm, Reg]),
        ],
    }
}

pub fn vxorps() -> Inst {
    Inst {
        mnemonic: "VXORPS",
        variant: "Vxorps",
        forms: vec![Form::new(&[&[Xmm], &[Xmm], &[Xmm, M128]], &[0x57])
            .vex(0, PP_NONE, MM_0F, false)
            .roles(&[Reg, Vvvv, Rm])],
    }
}

pub fn vaddps() -> Inst {
    Inst {
        mnemonic: "VADDPS",
        variant: "Vaddps",
        forms: vec![Form::new(&[&[Xmm], &[Xmm], &[Xmm, M128]], &[0x58])
            .vex(0, PP_NONE, MM_0F, false)
            .roles(&[Reg, Vvvv, Rm])],
    }
}
