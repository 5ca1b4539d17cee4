//! The variant selector: resolves (mnemonic, operand shapes) to one table
//! row under the documented precedence order.

use crate::error::Error;
use crate::instruction::Instruction;
use crate::operand::{Operand, PrefixHint};
use crate::shape::{shape_tags, Shape};
use crate::table::{self, MandatoryPrefix, Variant};
use smallvec::SmallVec;

/// A selected variant together with the concrete shape tag chosen for each
/// real (non-prefix-hint) operand, in order. The emitter needs the chosen
/// tag to know, e.g., which immediate width an `auto` operand resolved to.
pub struct Selection {
    pub variant: &'static Variant,
    pub operands: SmallVec<[Operand; 4]>,
    pub tags: SmallVec<[Shape; 4]>,
}

type Candidate = (&'static Variant, SmallVec<[Shape; 4]>);

/// Resolve `instr` to a single table variant.
///
/// # Errors
///
/// Returns [`Error::NoSuchMnemonic`], [`Error::NoSuchForm`],
/// [`Error::OperandMismatch`], [`Error::SizeUnavailable`], or
/// [`Error::PrefixConflict`] per the documented precedence rules.
pub fn select(instr: &Instruction) -> Result<Selection, Error> {
    let mut real_operands: SmallVec<[Operand; 4]> = SmallVec::new();
    let mut hints: SmallVec<[PrefixHint; 2]> = SmallVec::new();
    for op in instr.operands.iter().take(instr.arity()) {
        match op {
            Operand::PrefixHint(h) => hints.push(*h),
            other => real_operands.push(*other),
        }
    }

    let candidate_tags: SmallVec<[SmallVec<[Shape; 4]>; 4]> =
        real_operands.iter().map(shape_tags).collect();

    let variants = table::variants_for(instr.mnemonic);
    if variants.is_empty() {
        return Err(Error::NoSuchMnemonic);
    }

    // Rule 1: arity filter.
    let arity_matched: Vec<&'static Variant> =
        variants.iter().filter(|v| v.shapes.len() == real_operands.len()).collect();
    if arity_matched.is_empty() {
        return Err(Error::NoSuchForm);
    }

    // Rule 2: per-slot compatibility.
    let shape_matched: Vec<Candidate> = arity_matched
        .into_iter()
        .filter_map(|v| choose_slot_tags(v, &real_operands, &candidate_tags).map(|tags| (v, tags)))
        .collect();
    if shape_matched.is_empty() {
        return Err(Error::OperandMismatch);
    }

    // Rule 3: prefix hint compatibility.
    let prefix_matched: Vec<Candidate> = shape_matched
        .into_iter()
        .filter(|(v, _)| hints.iter().all(|h| honors_hint(v, *h)))
        .collect();
    if prefix_matched.is_empty() {
        return Err(Error::PrefixConflict);
    }

    // Rule 5: explicit-size override. If the caller pinned a memory size,
    // only variants that match it exactly survive; a miss here is
    // SizeUnavailable rather than falling back to an implicit width.
    let survivors = if let Some(size) = explicit_mem_size(&real_operands) {
        let sized: Vec<Candidate> = prefix_matched
            .into_iter()
            .filter(|(_, tags)| tags.iter().all(|t| !t.is_sized_mem() || t.size_bits() == size))
            .collect();
        if sized.is_empty() {
            return Err(Error::SizeUnavailable);
        }
        sized
    } else {
        prefix_matched
    };

    // Rule 4 (size minimization, memory width before immediate width per the
    // documented open-question resolution) then rule 6 (first table match
    // among remaining ties; `min_by_key` keeps the first of equal elements,
    // and `survivors` preserves original table order throughout).
    let (variant, tags) = survivors
        .into_iter()
        .min_by_key(|(v, t)| (mem_width(t), imm_width(t), v.size_category))
        .expect("non-empty: checked before each early return above");

    Ok(Selection { variant, operands: real_operands, tags })
}

/// For each slot, the first candidate tag (candidates are smallest-first,
/// per [`shape_tags`]) accepted by `variant.shapes[i]`. `None` if any slot
/// has no acceptable tag.
///
/// `real_operands` is threaded through alongside the shape tags because a
/// `Shape::Fixed` slot (e.g. the `CL` operand of a shift-by-CL form) must
/// match the concrete register the caller passed, not the generic `R8`/
/// `R16`/... tag [`shape_tags`] assigns every register operand of that
/// width.
fn choose_slot_tags(
    variant: &Variant,
    real_operands: &[Operand],
    candidate_tags: &[SmallVec<[Shape; 4]>],
) -> Option<SmallVec<[Shape; 4]>> {
    let mut chosen = SmallVec::new();
    for ((slot, candidates), operand) in
        variant.shapes.iter().zip(candidate_tags.iter()).zip(real_operands.iter())
    {
        chosen.push(slot_match(slot, candidates, operand)?);
    }
    Some(chosen)
}

/// The shape `slot` (a variant's accepted shapes for one operand position)
/// resolves `operand` to, or `None` if nothing in `slot` accepts it. A
/// matched `Shape::Fixed` entry is returned as-is, since it already
/// identifies the exact register the slot requires; other matches return
/// whichever `candidates` tag was accepted.
fn slot_match(slot: &[Shape], candidates: &[Shape], operand: &Operand) -> Option<Shape> {
    for s in slot {
        if let Shape::Fixed(want) = s {
            if matches!(operand, Operand::Register(r) if r.class == want.class && r.index == want.index) {
                return Some(*s);
            }
            continue;
        }
        if let Some(tag) = candidates.iter().copied().find(|c| shapes_compatible(*s, *c)) {
            return Some(tag);
        }
    }
    None
}

fn shapes_compatible(slot_shape: Shape, tag: Shape) -> bool {
    if slot_shape == tag {
        return true;
    }
    (slot_shape.is_sized_mem() && tag == Shape::M) || (slot_shape == Shape::M && tag.is_sized_mem())
}

fn honors_hint(variant: &Variant, hint: PrefixHint) -> bool {
    match hint {
        PrefixHint::Pref66 => variant.mandatory_prefix == MandatoryPrefix::P66,
        PrefixHint::PrefRexW => variant.rex_w,
    }
}

fn explicit_mem_size(operands: &[Operand]) -> Option<u16> {
    operands.iter().find_map(|op| match op {
        Operand::Memory(m) => m.explicit_size,
        _ => None,
    })
}

fn mem_width(tags: &[Shape]) -> u16 {
    tags.iter().filter(|s| s.is_sized_mem()).map(|s| s.size_bits()).max().unwrap_or(0)
}

fn imm_width(tags: &[Shape]) -> u16 {
    tags.iter()
        .filter(|s| matches!(s, Shape::Imm8 | Shape::Imm16 | Shape::Imm32 | Shape::Imm64))
        .map(|s| s.size_bits())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;
    use crate::mnemonic::Mnemonic;
    use crate::operand::{ImmWidth, Operand};
    use crate::registers::gpr64;

    #[test]
    fn mov_reg_imm_picks_rex_w_c7_form() {
        let instr = Instruction::with_operands(
            Mnemonic::Mov,
            &[Operand::reg(gpr64::RAX), Operand::imm(ImmWidth::Auto, 0)],
        );
        let sel = select(&instr).expect("mov rax, 0 must select a variant");
        assert!(sel.variant.rex_w);
        assert_eq!(sel.variant.opcode, &[0xC7]);
    }

    #[test]
    fn shl_reg_cl_matches_fixed_cl_slot() {
        use crate::mnemonic::Mnemonic;
        use crate::registers::gpr8;

        let instr = Instruction::with_operands(
            Mnemonic::Shl,
            &[Operand::reg(gpr64::RAX), Operand::reg(gpr8::CL)],
        );
        let sel = select(&instr).expect("shl rax, cl must select the Fixed(CL) form");
        assert!(sel.variant.rex_w);
        assert_eq!(sel.variant.opcode, &[0xD3]);
    }

    #[test]
    fn shl_reg_dl_does_not_match_fixed_cl_slot() {
        use crate::mnemonic::Mnemonic;
        use crate::registers::gpr8;

        let instr = Instruction::with_operands(
            Mnemonic::Shl,
            &[Operand::reg(gpr64::RAX), Operand::reg(gpr8::DL)],
        );
        assert_eq!(select(&instr).unwrap_err(), Error::OperandMismatch);
    }

    #[test]
    fn unknown_mnemonic_variant_table_is_empty_is_unreachable() {
        // every Mnemonic variant has at least one table row; this just
        // documents that NoSuchMnemonic is reserved for future growth of
        // the enum outlrunning the generated table, not exercised today.
        for _ in table::variants_for(Mnemonic::Mov) {}
    }
}
