//! Register classes, architectural register constants, and Intel-syntax
//! naming tables.
//!
//! The naming scheme here mirrors `reg.rs` in the upstream this crate grew
//! out of: a small `enc` style module of `u8` constants per class, plus a
//! `to_string`-style lookup for the stringifier. The difference is that here
//! a [`Register`] carries its class inline, since the operand model is a
//! flat runtime value rather than a family of generic per-class wrapper
//! types.

/// The architectural register classes in the operand lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
pub enum RegClass {
    Gpr8,
    Gpr8h,
    Gpr16,
    Gpr32,
    Gpr64,
    Mmx,
    Xmm,
    Ymm,
    Seg,
    Cr,
    Dr,
    St,
    K,
    Bnd,
}

/// One architectural register: a class plus a 0-31 hardware index.
///
/// High-byte GPRs (AH/BH/CH/DH) are [`RegClass::Gpr8h`] with indices 4-7 in
/// AH, CH, DH, BH order, matching the ModRM.reg/rm encoding (4-7) those
/// names occupy when no REX prefix is present. This lets `enc()` return the
/// right 3-bit field uniformly across register classes instead of special-
/// casing `Gpr8h`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Register {
    pub class: RegClass,
    pub index: u8,
}

impl Register {
    #[must_use]
    pub const fn new(class: RegClass, index: u8) -> Self {
        Self { class, index }
    }

    /// The low 3 bits used in ModRM/SIB/opcode+reg encodings.
    #[must_use]
    pub fn enc(&self) -> u8 {
        self.index & 7
    }

    /// Whether this register's encoding requires a REX extension bit
    /// (`R`/`X`/`B`) because its index is 8 or above.
    #[must_use]
    pub fn needs_rex_bit(&self) -> bool {
        self.index >= 8
    }
}

macro_rules! regs {
    ($modname:ident, $class:ident; $($name:ident = $idx:expr),+ $(,)?) => {
        #[allow(missing_docs)]
        pub mod $modname {
            use super::{Register, RegClass};
            $(pub const $name: Register = Register::new(RegClass::$class, $idx);)+
        }
    };
}

regs!(gpr64, Gpr64;
    RAX = 0, RCX = 1, RDX = 2, RBX = 3, RSP = 4, RBP = 5, RSI = 6, RDI = 7,
    R8 = 8, R9 = 9, R10 = 10, R11 = 11, R12 = 12, R13 = 13, R14 = 14, R15 = 15,
);
regs!(gpr32, Gpr32;
    EAX = 0, ECX = 1, EDX = 2, EBX = 3, ESP = 4, EBP = 5, ESI = 6, EDI = 7,
    R8D = 8, R9D = 9, R10D = 10, R11D = 11, R12D = 12, R13D = 13, R14D = 14, R15D = 15,
);
regs!(gpr16, Gpr16;
    AX = 0, CX = 1, DX = 2, BX = 3, SP = 4, BP = 5, SI = 6, DI = 7,
    R8W = 8, R9W = 9, R10W = 10, R11W = 11, R12W = 12, R13W = 13, R14W = 14, R15W = 15,
);
regs!(gpr8, Gpr8;
    AL = 0, CL = 1, DL = 2, BL = 3, SPL = 4, BPL = 5, SIL = 6, DIL = 7,
    R8B = 8, R9B = 9, R10B = 10, R11B = 11, R12B = 12, R13B = 13, R14B = 14, R15B = 15,
);
regs!(gpr8h, Gpr8h; AH = 4, CH = 5, DH = 6, BH = 7);
regs!(xmm, Xmm;
    XMM0 = 0, XMM1 = 1, XMM2 = 2, XMM3 = 3, XMM4 = 4, XMM5 = 5, XMM6 = 6, XMM7 = 7,
    XMM8 = 8, XMM9 = 9, XMM10 = 10, XMM11 = 11, XMM12 = 12, XMM13 = 13, XMM14 = 14, XMM15 = 15,
);
regs!(ymm, Ymm;
    YMM0 = 0, YMM1 = 1, YMM2 = 2, YMM3 = 3, YMM4 = 4, YMM5 = 5, YMM6 = 6, YMM7 = 7,
    YMM8 = 8, YMM9 = 9, YMM10 = 10, YMM11 = 11, YMM12 = 12, YMM13 = 13, YMM14 = 14, YMM15 = 15,
);
regs!(seg, Seg; ES = 0, CS = 1, SS = 2, DS = 3, FS = 4, GS = 5);
regs!(cr, Cr;
    CR0 = 0, CR1 = 1, CR2 = 2, CR3 = 3, CR4 = 4, CR5 = 5, CR6 = 6, CR7 = 7,
    CR8 = 8, CR9 = 9, CR10 = 10, CR11 = 11, CR12 = 12, CR13 = 13, CR14 = 14, CR15 = 15,
);
regs!(st, St;
    ST0 = 0, ST1 = 1, ST2 = 2, ST3 = 3, ST4 = 4, ST5 = 5, ST6 = 6, ST7 = 7,
);

/// Fixed-register operand constants used by the encoding table for forms
/// like "ADD AL, imm8" where the slot accepts exactly one register.
pub const FIXED_AL: Register = gpr8::AL;
pub const FIXED_AX: Register = gpr16::AX;
pub const FIXED_EAX: Register = gpr32::EAX;
pub const FIXED_RAX: Register = gpr64::RAX;
pub const FIXED_CL: Register = gpr8::CL;
pub const FIXED_DX: Register = gpr16::DX;

/// Render a register's Intel-syntax name.
///
/// # Panics
///
/// Panics if `index` is out of range for `class` (more than the
/// architecturally-defined count of registers in that class).
#[must_use]
pub fn name(reg: Register) -> &'static str {
    let i = reg.index as usize;
    match reg.class {
        RegClass::Gpr64 => GPR64_NAMES[i],
        RegClass::Gpr32 => GPR32_NAMES[i],
        RegClass::Gpr16 => GPR16_NAMES[i],
        RegClass::Gpr8 => GPR8_NAMES[i],
        RegClass::Gpr8h => GPR8H_NAMES[i - 4],
        RegClass::Xmm => XMM_NAMES[i],
        RegClass::Ymm => YMM_NAMES[i],
        RegClass::Seg => SEG_NAMES[i],
        RegClass::Cr => CR_NAMES[i],
        RegClass::Dr => DR_NAMES[i],
        RegClass::St => ST_NAMES[i],
        RegClass::Mmx => MMX_NAMES[i],
        RegClass::K => K_NAMES[i],
        RegClass::Bnd => BND_NAMES[i],
    }
}

const GPR64_NAMES: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12",
    "r13", "r14", "r15",
];
const GPR32_NAMES: [&str; 16] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d",
    "r12d", "r13d", "r14d", "r15d",
];
const GPR16_NAMES: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w",
    "r13w", "r14w", "r15w",
];
const GPR8_NAMES: [&str; 16] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b",
    "r13b", "r14b", "r15b",
];
const GPR8H_NAMES: [&str; 4] = ["ah", "ch", "dh", "bh"];
const SEG_NAMES: [&str; 6] = ["es", "cs", "ss", "ds", "fs", "gs"];
const ST_NAMES: [&str; 8] = ["st0", "st1", "st2", "st3", "st4", "st5", "st6", "st7"];
const MMX_NAMES: [&str; 8] = ["mm0", "mm1", "mm2", "mm3", "mm4", "mm5", "mm6", "mm7"];
const K_NAMES: [&str; 8] = ["k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7"];
const BND_NAMES: [&str; 4] = ["bnd0", "bnd1", "bnd2", "bnd3"];
const DR_NAMES: [&str; 16] = [
    "dr0", "dr1", "dr2", "dr3", "dr4", "dr5", "dr6", "dr7", "dr8", "dr9", "dr10", "dr11",
    "dr12", "dr13", "dr14", "dr15",
];
const CR_NAMES: [&str; 16] = [
    "cr0", "cr1", "cr2", "cr3", "cr4", "cr5", "cr6", "cr7", "cr8", "cr9", "cr10", "cr11",
    "cr12", "cr13", "cr14", "cr15",
];
const XMM_NAMES: [&str; 16] = [
    "xmm0", "xmm1", "xmm2", "xmm3", "xmm4", "xmm5", "xmm6", "xmm7", "xmm8", "xmm9", "xmm10",
    "xmm11", "xmm12", "xmm13", "xmm14", "xmm15",
];
const YMM_NAMES: [&str; 16] = [
    "ymm0", "ymm1", "ymm2", "ymm3", "ymm4", "ymm5", "ymm6", "ymm7", "ymm8", "ymm9", "ymm10",
    "ymm11", "ymm12", "ymm13", "ymm14", "ymm15",
];
