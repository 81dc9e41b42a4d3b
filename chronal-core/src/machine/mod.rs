use std::fmt::{Display, Formatter};

pub mod op;


pub use op::{Op, OpSet};

pub type Word = u64;
pub type Opcode = u32;

pub const NUM_REGISTERS: usize = 4;

// The machine state. Operations never mutate a register file,
// they hand back a new one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Registers([Word; NUM_REGISTERS]);

impl Registers {
    pub const fn new(values: [Word; NUM_REGISTERS]) -> Self {
        Self(values)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    // None when idx does not name a register
    pub fn get(&self, idx: Word) -> Option<Word> {
        let idx = usize::try_from(idx).ok()?;
        self.0.get(idx).copied()
    }

    pub fn with(&self, idx: Word, value: Word) -> Option<Self> {
        let idx = usize::try_from(idx).ok()?;
        let mut values = self.0;
        *values.get_mut(idx)? = value;
        Some(Self(values))
    }
}

impl From<[Word; NUM_REGISTERS]> for Registers {
    fn from(values: [Word; NUM_REGISTERS]) -> Self {
        Self(values)
    }
}

impl std::ops::Index<usize> for Registers {
    type Output = Word;
    fn index(&self, idx: usize) -> &Word {
        &self.0[idx]
    }
}

impl Display for Registers {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "[{a}, {b}, {c}, {d}]")
    }
}

// An instruction in the machine's own (unknown) numbering.
// Whether a and b name registers or literals depends on the
// operation the opcode turns out to be; c is always a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub opcode: Opcode,
    pub a: Word,
    pub b: Word,
    pub c: Word
}

impl Instruction {
    pub const fn new(opcode: Opcode, a: Word, b: Word, c: Word) -> Self {
        Self { opcode, a, b, c }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.opcode, self.a, self.b, self.c)
    }
}
