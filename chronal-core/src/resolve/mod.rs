use crate::{Error, ErrorKind, Result};
use crate::classify::Sample;
use crate::machine::{Op, Opcode};

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

pub mod candidates;


pub use candidates::Candidates;

/// Which opcode to settle first when several are down to one candidate.
/// The resulting mapping does not depend on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Lowest,
    Highest
}

/// A complete one-to-one assignment of opcodes to operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpcodeMapping {
    ops: BTreeMap<Opcode, Op>
}

impl OpcodeMapping {
    // Checks that the pairs form a bijection over all sixteen operations
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Opcode, Op)>,
    {
        let mut ops = BTreeMap::new();
        for (opcode, op) in pairs {
            if ops.insert(opcode, op).is_some() {
                return Err(Error::with_kind(ErrorKind::Contradiction,
                    format!("opcode {} assigned twice", opcode)));
            }
        }
        let mapping = OpcodeMapping { ops };
        for op in Op::ALL {
            if mapping.opcode_of(op).is_none() {
                return Err(Error::with_kind(ErrorKind::Unresolved,
                    format!("no opcode for {}", op)));
            }
        }
        if mapping.len() != Op::COUNT {
            return Err(Error::with_kind(ErrorKind::Contradiction,
                format!("{} opcodes for {} operations", mapping.len(), Op::COUNT)));
        }
        Ok(mapping)
    }

    pub fn get(&self, opcode: Opcode) -> Option<Op> {
        self.ops.get(&opcode).copied()
    }

    pub fn opcode_of(&self, op: Op) -> Option<Opcode> {
        self.ops.iter().find(|(_, o)| **o == op).map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Opcode, Op)> + '_ {
        self.ops.iter().map(|(k, v)| (*k, *v))
    }
}

impl Display for OpcodeMapping {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for (opcode, op) in &self.ops {
            writeln!(f, "{:>3} -> {}", opcode, op)?;
        }
        Ok(())
    }
}

/// Builds the opcode mapping from a set of samples.
pub fn resolve<'a, I>(samples: I, order: Order) -> Result<OpcodeMapping>
where
    I: IntoIterator<Item = &'a Sample>,
{
    Candidates::from_samples(samples).resolve(order)
}

impl Candidates {
    /// Runs elimination to completion.
    ///
    /// Each pass takes one opcode whose candidate set has a single
    /// member, records it, and strikes that operation from the rest.
    /// There are at most sixteen passes. Fails if the table does not
    /// cover exactly sixteen opcodes, if some opcode runs out of
    /// candidates, or if opcodes remain with no singleton to take.
    pub fn resolve(self, order: Order) -> Result<OpcodeMapping> {
        if self.len() < Op::COUNT {
            return Err(missing_samples(&self));
        }
        if self.len() > Op::COUNT {
            return Err(Error::with_kind(ErrorKind::Contradiction,
                format!("samples use {} distinct opcodes but there are only {} operations",
                    self.len(), Op::COUNT)));
        }

        let mut candidates = self;
        let mut ops = BTreeMap::new();
        loop {
            if let Some(opcode) = candidates.exhausted() {
                return Err(Error::with_kind(ErrorKind::Contradiction,
                    format!("no operation is consistent with opcode {}", opcode)));
            }
            if candidates.is_empty() {
                break;
            }
            let next = match order {
                Order::Lowest => candidates.singletons().next(),
                Order::Highest => candidates.singletons().next_back(),
            };
            let (opcode, op) = next.ok_or_else(|| stalled(&candidates))?;
            log::debug!(target: "resolve", "opcode {} is {}", opcode, op);
            ops.insert(opcode, op);
            candidates = candidates.assign(opcode, op);
        }

        let mapping = OpcodeMapping { ops };
        log::info!(target: "resolve", "resolved all {} opcodes", mapping.len());
        Ok(mapping)
    }
}

fn missing_samples(candidates: &Candidates) -> Error {
    let seen: Vec<Opcode> = candidates.iter().map(|(k, _)| k).collect();
    // Opcodes are conventionally 0-15; name the gaps when that holds
    let conventional = seen.iter().all(|k| (*k as usize) < Op::COUNT);
    if conventional {
        let missing: Vec<String> = (0..Op::COUNT as Opcode)
            .filter(|k| !seen.contains(k))
            .map(|k| k.to_string())
            .collect();
        Error::with_kind(ErrorKind::MissingSamples,
            format!("no samples for opcode(s) {}", missing.join(", ")))
    } else {
        Error::with_kind(ErrorKind::MissingSamples,
            format!("samples cover {} of {} opcodes", seen.len(), Op::COUNT))
    }
}

fn stalled(candidates: &Candidates) -> Error {
    let open: Vec<String> = candidates.iter()
        .map(|(k, v)| format!("{} {}", k, v))
        .collect();
    Error::with_kind(ErrorKind::Unresolved,
        format!("elimination stalled with {}", open.join(", ")))
}
