pub mod util;
pub mod machine;
pub mod classify;
pub mod resolve;
pub mod exec;

pub use util::error::{Error, ErrorKind, Result};
pub use machine::{Registers, Instruction, Op, OpSet, Word, Opcode};
pub use classify::{Sample, count_ambiguous};
pub use resolve::{Candidates, OpcodeMapping, Order};
pub use exec::Executor;
