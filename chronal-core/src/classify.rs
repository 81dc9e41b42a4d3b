use crate::machine::{Instruction, Op, OpSet, Registers};

use std::fmt::{Display, Formatter};

/// One observed execution of the unknown machine: the register file
/// before and after running `instruction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sample {
    pub before: Registers,
    pub instruction: Instruction,
    pub after: Registers
}

impl Sample {
    pub fn new(before: Registers, instruction: Instruction, after: Registers) -> Self {
        Self { before, instruction, after }
    }

    /// Whether running `op` on this sample's input reproduces its output.
    pub fn matches(&self, op: Op) -> bool {
        op.apply(&self.instruction, &self.before) == Some(self.after)
    }

    /// Every operation this sample is consistent with. Several
    /// operations can agree on particular operands, so this is
    /// routinely more than one.
    pub fn matching_ops(&self) -> OpSet {
        Op::ALL.into_iter().filter(|op| self.matches(*op)).collect()
    }
}

impl Display for Sample {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Before: {}\n{}\nAfter:  {}", self.before, self.instruction, self.after)
    }
}

// Number of samples consistent with at least `threshold` operations
pub fn count_ambiguous<'a, I>(samples: I, threshold: usize) -> usize
where
    I: IntoIterator<Item = &'a Sample>,
{
    samples.into_iter()
        .filter(|s| s.matching_ops().len() >= threshold)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::op::Op::*;
    use test_log::test;

    fn canonical() -> Sample {
        Sample::new(
            Registers::new([3, 2, 1, 1]),
            Instruction::new(9, 2, 1, 2),
            Registers::new([3, 2, 2, 1]),
        )
    }

    #[test]
    fn canonical_sample_behaves_like_three() {
        let ops = canonical().matching_ops();
        let expected: OpSet = [Addi, Mulr, Seti].into_iter().collect();
        assert_eq!(ops, expected);
        assert!(canonical().matches(Mulr));
        assert!(!canonical().matches(Addr));
    }

    #[test]
    fn large_immediates_do_not_panic() {
        // b = 7 is only meaningful as a literal
        let s = Sample::new(
            Registers::new([1, 0, 0, 0]),
            Instruction::new(3, 0, 7, 3),
            Registers::new([1, 0, 0, 8]),
        );
        let ops = s.matching_ops();
        assert!(ops.contains(Addi));
        assert!(!ops.contains(Addr));
    }

    #[test]
    fn out_of_range_comparisons_do_not_match() {
        // gtir and eqir would read register 7
        let s = Sample::new(
            Registers::zero(),
            Instruction::new(5, 0, 7, 2),
            Registers::zero(),
        );
        assert!(!s.matches(Gtir));
        assert!(!s.matches(Eqir));
        let expected: OpSet = [Muli, Bani, Setr, Seti, Gtri, Eqri].into_iter().collect();
        assert_eq!(s.matching_ops(), expected);
    }

    #[test]
    fn ambiguous_count_uses_threshold() {
        let narrow = Sample::new(
            Registers::new([5, 3, 0, 0]),
            Instruction::new(1, 0, 1, 2),
            Registers::new([5, 3, 15, 0]),
        );
        assert_eq!(narrow.matching_ops().single(), Some(Mulr));
        let samples = vec![canonical(), narrow, canonical()];
        assert_eq!(count_ambiguous(&samples, 3), 2);
        assert_eq!(count_ambiguous(&samples, 1), 3);
        assert_eq!(count_ambiguous(&samples, 4), 0);
    }
}
