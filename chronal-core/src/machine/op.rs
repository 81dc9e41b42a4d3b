use super::{Instruction, Registers, Word};
use crate::{Error, ErrorKind};

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

// r = operand names a register, i = operand is the literal itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    Addr, Addi,
    Mulr, Muli,
    Banr, Bani,
    Borr, Bori,
    Setr, Seti,
    Gtir, Gtri, Gtrr,
    Eqir, Eqri, Eqrr
}

impl Op {
    pub const COUNT: usize = 16;

    pub const ALL: [Op; Op::COUNT] = {
        use Op::*;
        [
            Addr, Addi, Mulr, Muli,
            Banr, Bani, Borr, Bori,
            Setr, Seti,
            Gtir, Gtri, Gtrr,
            Eqir, Eqri, Eqrr
        ]
    };

    /// Applies the operation to `regs` using the operands of `inst`,
    /// returning the new register file.
    ///
    /// Returns `None` when the operation cannot be carried out for these
    /// operands: a register operand (or the destination) outside 0-3, or
    /// an arithmetic result that does not fit in a [`Word`]. The opcode
    /// field of `inst` is ignored.
    pub fn apply(self, inst: &Instruction, regs: &Registers) -> Option<Registers> {
        use Op::*;
        let Instruction { a, b, c, .. } = *inst;
        let reg = |idx: Word| regs.get(idx);
        let value = match self {
            Addr => reg(a)?.checked_add(reg(b)?)?,
            Addi => reg(a)?.checked_add(b)?,
            Mulr => reg(a)?.checked_mul(reg(b)?)?,
            Muli => reg(a)?.checked_mul(b)?,
            Banr => reg(a)? & reg(b)?,
            Bani => reg(a)? & b,
            Borr => reg(a)? | reg(b)?,
            Bori => reg(a)? | b,
            Setr => reg(a)?,
            Seti => a,
            Gtir => (a > reg(b)?) as Word,
            Gtri => (reg(a)? > b) as Word,
            Gtrr => (reg(a)? > reg(b)?) as Word,
            Eqir => (a == reg(b)?) as Word,
            Eqri => (reg(a)? == b) as Word,
            Eqrr => (reg(a)? == reg(b)?) as Word,
        };
        regs.with(c, value)
    }

    // Which operands are read as registers, as (a, b)
    pub fn reads_registers(self) -> (bool, bool) {
        use Op::*;
        match self {
            Addr | Mulr | Banr | Borr | Gtrr | Eqrr => (true, true),
            Addi | Muli | Bani | Bori | Gtri | Eqri | Setr => (true, false),
            Seti => (false, false),
            Gtir | Eqir => (false, true),
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl<'a> TryFrom<&'a str> for Op {
    type Error = Error;
    fn try_from(v: &'a str) -> Result<Self, Self::Error> {
        use Op::*;
        Ok(match v {
        "addr" => Addr,
        "addi" => Addi,
        "mulr" => Mulr,
        "muli" => Muli,
        "banr" => Banr,
        "bani" => Bani,
        "borr" => Borr,
        "bori" => Bori,
        "setr" => Setr,
        "seti" => Seti,
        "gtir" => Gtir,
        "gtri" => Gtri,
        "gtrr" => Gtrr,
        "eqir" => Eqir,
        "eqri" => Eqri,
        "eqrr" => Eqrr,
        _ => return Err(Error::with_kind(ErrorKind::BadFormat, format!("Unrecognized op {}", v)))
        })
    }
}

impl FromStr for Op {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Op::try_from(s)
    }
}

impl From<Op> for &'static str {
    fn from(op: Op) -> &'static str {
        use Op::*;
        match op {
        Addr => "addr",
        Addi => "addi",
        Mulr => "mulr",
        Muli => "muli",
        Banr => "banr",
        Bani => "bani",
        Borr => "borr",
        Bori => "bori",
        Setr => "setr",
        Seti => "seti",
        Gtir => "gtir",
        Gtri => "gtri",
        Gtrr => "gtrr",
        Eqir => "eqir",
        Eqri => "eqri",
        Eqrr => "eqrr"
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of operations, one bit per [`Op`].
///
/// Used both for the operations a single sample is consistent with and
/// for the candidates still open for an opcode.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OpSet(u16);

impl OpSet {
    pub const EMPTY: OpSet = OpSet(0);
    pub const FULL: OpSet = OpSet(u16::MAX);

    pub fn contains(&self, op: Op) -> bool {
        self.0 & op.bit() != 0
    }

    pub fn insert(&mut self, op: Op) {
        self.0 |= op.bit();
    }

    pub fn remove(&mut self, op: Op) {
        self.0 &= !op.bit();
    }

    pub fn without(mut self, op: Op) -> Self {
        self.remove(op);
        self
    }

    pub fn intersection(self, other: OpSet) -> Self {
        OpSet(self.0 & other.0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    // The only member, if there is exactly one
    pub fn single(&self) -> Option<Op> {
        if self.len() == 1 {
            Op::ALL.get(self.0.trailing_zeros() as usize).copied()
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Op> + '_ {
        Op::ALL.into_iter().filter(move |op| self.contains(*op))
    }
}

impl FromIterator<Op> for OpSet {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        let mut set = OpSet::EMPTY;
        for op in iter {
            set.insert(op);
        }
        set
    }
}

impl Display for OpSet {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for op in self.iter() {
            if first { write!(f, "{}", op)?; }
            else { write!(f, ", {}", op)?; }
            first = false;
        }
        write!(f, "}}")
    }
}

impl Debug for OpSet {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
