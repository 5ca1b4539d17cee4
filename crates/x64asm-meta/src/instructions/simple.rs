use crate::dsl::{Form, Inst};

/// Instructions that take no operands at all; each has exactly one form.
pub fn simple_forms() -> Vec<Inst> {
    let ops: &[(&str, &str, &[u8], bool)] = &[
        ("NOP", "Nop", &[0x90], false),
        ("LEAVE", "Leave", &[0xc9], false),
        ("CWDE", "Cwde", &[0x98], false),
        ("CDQE", "Cdqe", &[0x98], true),
        ("CDQ", "Cdq", &[0x99], false),
        ("CQO", "Cqo", &[0x99], true),
        ("SYSCALL", "Syscall", &[0x0f, 0x05], false),
        ("INT3", "Int3", &[0xcc], false),
        ("PUSHFQ", "Pushfq", &[0x9c], false),
        ("POPFQ", "Popfq", &[0x9d], false),
        ("CPUID", "Cpuid", &[0x0f, 0xa2], false),
        ("CLD", "Cld", &[0xfc], false),
        ("STD", "Std", &[0xfd], false),
    ];
    ops.iter()
        .map(|&(mnemonic, variant, opcode, rex_w)| {
            let mut form = Form::new(&[], opcode);
            if rex_w {
                form = form.rex_w();
            }
            Inst { mnemonic, variant, forms: vec![form] }
        })
        .collect()
}
