//! A runtime x86-64 machine-code assembler.
//!
//! Callers build an [`Instruction`] array describing mnemonics and operands,
//! then hand it to [`assemble::assemble`] for a linked byte buffer, or to
//! [`stringify::stringify`] for Intel-syntax text. Variant selection walks
//! the generated [`table`] at runtime rather than dispatching through a
//! per-instruction Rust type, so the catalog this crate knows is data, not
//! code — see `x64asm-meta` for how that table is built.
//!
//! ```
//! use x64asm::assemble::assemble;
//! use x64asm::instruction::Instruction;
//! use x64asm::mnemonic::Mnemonic;
//! use x64asm::operand::{ImmWidth, Operand};
//! use x64asm::registers::gpr64;
//!
//! let mov = Instruction::with_operands(
//!     Mnemonic::Mov,
//!     &[Operand::reg(gpr64::RAX), Operand::imm(ImmWidth::Auto, 0)],
//! );
//! let bytes = assemble(&[mov]).expect("mov rax, 0 assembles");
//! assert_eq!(bytes, vec![0x48, 0xC7, 0xC0, 0x00, 0x00, 0x00, 0x00]);
//! ```

pub mod assemble;
pub mod buffer;
pub mod emit;
pub mod error;
pub mod exec;
pub mod ffi;
#[cfg(any(test, feature = "fuzz"))]
pub mod fuzz;
pub mod instruction;
pub mod mnemonic;
pub mod operand;
pub mod registers;
pub mod rex;
pub mod select;
pub mod shape;
pub mod stringify;
pub mod table;
pub mod vex;

pub use error::Error;
pub use exec::ExecHandle;
pub use instruction::Instruction;
pub use mnemonic::Mnemonic;
pub use operand::{ImmWidth, MemBase, Memory, Operand, PrefixHint};
pub use registers::{RegClass, Register};
