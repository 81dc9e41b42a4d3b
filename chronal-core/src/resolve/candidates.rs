use crate::classify::Sample;
use crate::machine::{Op, OpSet, Opcode};

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// The operations still open for each unresolved opcode.
///
/// A `Candidates` value is never edited in place once built; every
/// elimination step returns a fresh one, so earlier states can be kept
/// around and compared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Candidates {
    sets: BTreeMap<Opcode, OpSet>
}

impl Candidates {
    /// Groups the samples by opcode and intersects the match sets
    /// within each group. An operation survives for an opcode only
    /// if it agrees with every sample recorded under that opcode.
    pub fn from_samples<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        let mut sets: BTreeMap<Opcode, OpSet> = BTreeMap::new();
        let mut seen = 0usize;
        for sample in samples {
            let matching = sample.matching_ops();
            let set = sets.entry(sample.instruction.opcode).or_insert(OpSet::FULL);
            *set = set.intersection(matching);
            seen += 1;
        }
        log::debug!(target: "resolve", "{} samples over {} opcodes", seen, sets.len());
        Self { sets }
    }

    pub fn get(&self, opcode: Opcode) -> Option<OpSet> {
        self.sets.get(&opcode).copied()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Opcode, OpSet)> + '_ {
        self.sets.iter().map(|(k, v)| (*k, *v))
    }

    // Opcodes down to a single candidate, in opcode order
    pub fn singletons(&self) -> impl DoubleEndedIterator<Item = (Opcode, Op)> + '_ {
        self.sets.iter().filter_map(|(k, v)| v.single().map(|op| (*k, op)))
    }

    // First opcode with nothing left, if any
    pub fn exhausted(&self) -> Option<Opcode> {
        self.sets.iter().find(|(_, v)| v.is_empty()).map(|(k, _)| *k)
    }

    /// Fixes `opcode` to `op`: the opcode leaves the table and `op` is
    /// struck from every other opcode, since no operation serves two.
    pub fn assign(&self, opcode: Opcode, op: Op) -> Candidates {
        let sets = self.sets.iter()
            .filter(|(k, _)| **k != opcode)
            .map(|(k, v)| (*k, v.without(op)))
            .collect();
        Candidates { sets }
    }
}

impl FromIterator<(Opcode, OpSet)> for Candidates {
    fn from_iter<I: IntoIterator<Item = (Opcode, OpSet)>>(iter: I) -> Self {
        Candidates { sets: iter.into_iter().collect() }
    }
}

impl Display for Candidates {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for (opcode, set) in &self.sets {
            writeln!(f, "{:>3}: {}", opcode, set)?;
        }
        Ok(())
    }
}
