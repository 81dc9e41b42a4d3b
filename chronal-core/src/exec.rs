use crate::{Error, ErrorKind, Result};
use crate::machine::{Instruction, Op, Registers};
use crate::resolve::OpcodeMapping;

// Runs straight-line programs in the machine's own numbering
pub struct Executor<'m> {
    mapping: &'m OpcodeMapping
}

impl<'m> Executor<'m> {
    pub fn new(mapping: &'m OpcodeMapping) -> Self {
        Self { mapping }
    }

    pub fn decode(&self, inst: &Instruction) -> Result<Op> {
        self.mapping.get(inst.opcode).ok_or_else(|| {
            Error::with_kind(ErrorKind::UnmappedOpcode,
                format!("opcode {} in `{}` has no operation", inst.opcode, inst))
        })
    }

    pub fn step(&self, regs: &Registers, inst: &Instruction) -> Result<Registers> {
        let op = self.decode(inst)?;
        apply(op, inst, regs)
    }

    /// Runs `program` from the all-zero register file.
    pub fn run(&self, program: &[Instruction]) -> Result<Registers> {
        self.run_from(Registers::zero(), program)
    }

    pub fn run_from(&self, start: Registers, program: &[Instruction]) -> Result<Registers> {
        let regs = program.iter().enumerate().try_fold(start, |regs, (addr, inst)| {
            let next = self.step(&regs, inst)?;
            log::trace!(target: "vm", "#{} {} ({}): {} -> {}",
                addr, inst, self.mapping.get(inst.opcode).map(Op::name).unwrap_or("?"), regs, next);
            Ok::<_, Error>(next)
        })?;
        log::debug!(target: "vm", "ran {} instructions, registers {}", program.len(), regs);
        Ok(regs)
    }
}

/// Applies a known operation, turning "not applicable" into an error
/// that says why.
pub fn apply(op: Op, inst: &Instruction, regs: &Registers) -> Result<Registers> {
    match op.apply(inst, regs) {
        Some(next) => Ok(next),
        None => {
            let (reads_a, reads_b) = op.reads_registers();
            let in_range = |r: u64| regs.get(r).is_some();
            let bad_reg = (reads_a && !in_range(inst.a))
                || (reads_b && !in_range(inst.b))
                || !in_range(inst.c);
            if bad_reg {
                Err(Error::with_kind(ErrorKind::BadRegister,
                    format!("{} {} {} {} names a register outside 0-3", op, inst.a, inst.b, inst.c)))
            } else {
                Err(Error::with_kind(ErrorKind::Overflow,
                    format!("{} {} {} {} overflows on {}", op, inst.a, inst.b, inst.c, regs)))
            }
        }
    }
}
