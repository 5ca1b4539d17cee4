//! Plain-data descriptors used only to drive [`crate::generate`].
//!
//! None of this is shared with the `x64asm` crate at the type level: these
//! structs exist to build up [`Inst`] lists in [`crate::instructions`] and are
//! consumed by `generate` to emit literal Rust source text. Keeping the two
//! crates type-disjoint means a mismatch here is a text-generation bug, never
//! a cross-crate type error.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    R8,
    R8h,
    R16,
    R32,
    R64,
    Xmm,
    Ymm,
    St,
    M8,
    M16,
    M32,
    M64,
    M80,
    M128,
    M256,
    M512,
    M,
    Imm8,
    Imm16,
    Imm32,
    Imm64,
    Rel8,
    Rel32,
    Fixed(FixedReg),
}

/// Architectural registers that a form pins exactly, rather than accepting
/// any register of a class (e.g. the accumulator forms of the ALU group).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixedReg {
    Al,
    Ax,
    Eax,
    Rax,
    Cl,
    Dx,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    None,
    Reg,
    Rm,
    Vvvv,
    Imm(u8),
    Rel(u8),
    Implicit,
    OpcodeReg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpcodeExt {
    Digit(u8),
    UseReg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prefix {
    None,
    P66,
    Pf2,
    Pf3,
}

#[derive(Clone, Copy, Debug)]
pub struct Vex {
    pub l: u8,
    pub pp: u8,
    pub mm: u8,
    pub w: bool,
}

/// One operand slot's accepted shapes. A slot like "r/m32" accepts both
/// `R32` and `M32`; a plain register or immediate slot accepts a single tag.
pub type Slot = Vec<Shape>;

#[derive(Clone, Debug)]
pub struct Form {
    pub shapes: Vec<Slot>,
    pub legacy_prefix: Option<u8>,
    pub mandatory_prefix: Prefix,
    pub rex_w: bool,
    pub vex: Option<Vex>,
    pub opcode: Vec<u8>,
    pub opcode_ext: OpcodeExt,
    pub roles: Vec<Role>,
    pub size_category: u8,
}

impl Form {
    /// A plain legacy-encoded form: no mandatory prefix, no VEX, opcode digit
    /// unused (the ModRM.reg slot carries an operand-encoded register).
    pub fn new(shapes: &[&[Shape]], opcode: &[u8]) -> Self {
        let shapes: Vec<Slot> = shapes.iter().map(|s| s.to_vec()).collect();
        Self {
            size_category: Self::default_size(&shapes),
            shapes,
            legacy_prefix: None,
            mandatory_prefix: Prefix::None,
            rex_w: false,
            vex: None,
            opcode: opcode.to_vec(),
            opcode_ext: OpcodeExt::UseReg,
            roles: Vec::new(),
        }
    }

    fn default_size(shapes: &[Slot]) -> u8 {
        shapes
            .iter()
            .flatten()
            .map(|s| match s {
                Shape::R8 | Shape::R8h | Shape::M8 | Shape::Imm8 | Shape::Rel8 => 1,
                Shape::R16 | Shape::M16 | Shape::Imm16 => 2,
                Shape::R32 | Shape::M32 | Shape::Imm32 | Shape::Rel32 => 4,
                Shape::R64 | Shape::M64 | Shape::Imm64 => 8,
                Shape::M80 | Shape::St => 10,
                Shape::Xmm | Shape::M128 => 16,
                Shape::Ymm | Shape::M256 => 32,
                Shape::M512 => 64,
                Shape::M => 0,
                Shape::Fixed(_) => 0,
            })
            .max()
            .unwrap_or(0)
    }

    pub fn roles(mut self, roles: &[Role]) -> Self {
        self.roles = roles.to_vec();
        self
    }

    pub fn ext(mut self, digit: u8) -> Self {
        self.opcode_ext = OpcodeExt::Digit(digit);
        self
    }

    pub fn rex_w(mut self) -> Self {
        self.rex_w = true;
        self
    }

    pub fn prefix66(mut self) -> Self {
        self.mandatory_prefix = Prefix::P66;
        self
    }

    pub fn prefix_f2(mut self) -> Self {
        self.mandatory_prefix = Prefix::Pf2;
        self
    }

    pub fn prefix_f3(mut self) -> Self {
        self.mandatory_prefix = Prefix::Pf3;
        self
    }

    pub fn legacy(mut self, byte: u8) -> Self {
        self.legacy_prefix = Some(byte);
        self
    }

    pub fn vex(mut self, l: u8, pp: u8, mm: u8, w: bool) -> Self {
        self.vex = Some(Vex { l, pp, mm, w });
        self
    }

    pub fn size(mut self, category: u8) -> Self {
        self.size_category = category;
        self
    }
}

pub struct Inst {
    /// Display mnemonic, e.g. `"MOV"`.
    pub mnemonic: &'static str,
    /// The `Mnemonic` enum variant name this form list belongs to, e.g. `"Mov"`.
    pub variant: &'static str,
    pub forms: Vec<Form>,
}
