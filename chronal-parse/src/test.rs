use crate::{parse_input, parse_listing, parse_program, parse_statement, Named, Statement};

use chronal_core::{count_ambiguous, Executor, Instruction, Op, Opcode, Order, Registers, Sample};
use chronal_core::ErrorKind;
use chronal_core::resolve::resolve;

use std::fmt::Write;
use test_log::test;

const EXAMPLE: &str = "\
Before: [3, 2, 1, 1]
9 2 1 2
After:  [3, 2, 2, 1]
";

#[test]
fn test_parse_canonical_sample() {
    let input = parse_input(EXAMPLE).unwrap();
    assert_eq!(input.samples, vec![Sample::new(
        Registers::new([3, 2, 1, 1]),
        Instruction::new(9, 2, 1, 2),
        Registers::new([3, 2, 2, 1]),
    )]);
    assert!(input.program.is_empty());
    assert_eq!(count_ambiguous(&input.samples, 3), 1);
}

#[test]
fn test_parse_samples_and_program() {
    let src = format!("{}\nBefore: [0, 0, 0, 0]\n1 5 0 3\nAfter:  [0, 0, 0, 5]\n\n\n\n7 3 2 0\n7 2 1 1\n", EXAMPLE);
    let input = parse_input(&src).unwrap();
    assert_eq!(input.samples.len(), 2);
    assert_eq!(input.samples[1].after, Registers::new([0, 0, 0, 5]));
    assert_eq!(input.program, vec![
        Instruction::new(7, 3, 2, 0),
        Instruction::new(7, 2, 1, 1),
    ]);
}

#[test]
fn test_parse_program_only() {
    let program = parse_program("0 1 2 3\n4 5 6 7").unwrap();
    assert_eq!(program, vec![Instruction::new(0, 1, 2, 3), Instruction::new(4, 5, 6, 7)]);
    assert!(parse_program("").unwrap().is_empty());
    assert_eq!(parse_program("0 1 2").unwrap_err().kind(), ErrorKind::BadFormat);
}

#[test]
fn test_wrong_register_count() {
    let src = "Before: [3, 2, 1]\n9 2 1 2\nAfter:  [3, 2, 2, 1]\n";
    let err = parse_input(src).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadFormat);
    let msg = err.to_string();
    assert!(msg.contains("1:9"), "{}", msg);
    assert!(msg.contains("expected 4 registers, found 3"), "{}", msg);
}

#[test]
fn test_error_positions() {
    let src = "Before: [3, 2, 1, 1]\n9 2 x 2\nAfter:  [3, 2, 2, 1]\n";
    let err = parse_input(src).unwrap_err();
    assert!(err.to_string().contains("2:5"), "{}", err);

    let err = parse_input("Before: [3, 2, 1, 1]\n9 2 1 2\n").unwrap_err();
    assert!(err.to_string().contains("end of input"), "{}", err);

    let err = parse_input("Before: [3, 2, 1, 1]\n9 2 1 2\nAfter [3, 2, 2, 1]").unwrap_err();
    assert!(err.to_string().contains("expected `:`"), "{}", err);
}

#[test]
fn test_lexer_errors_are_located() {
    let err = parse_program("0 1 2 3\n4 ? 6 7").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadFormat);
    assert!(err.to_string().contains("2:3: unexpected `?`"), "{}", err);

    let err = parse_statement("seti 1 0").unwrap_err();
    assert!(err.to_string().contains("expected a number"), "{}", err);
}

#[test]
fn test_huge_opcode() {
    let err = parse_program("99999999999 0 0 0").unwrap_err();
    assert!(err.to_string().contains("too large"), "{}", err);
}

#[test]
fn test_listing() {
    let listing = parse_listing("seti 5 0 0\naddi 0 7 3 // immediate b\ngtir 9 1 2").unwrap();
    assert_eq!(listing, vec![
        Named { op: Op::Seti, a: 5, b: 0, c: 0 },
        Named { op: Op::Addi, a: 0, b: 7, c: 3 },
        Named { op: Op::Gtir, a: 9, b: 1, c: 2 },
    ]);
    assert_eq!(listing[1].to_string(), "addi 0 7 3");
}

#[test]
fn test_listing_checks_registers() {
    let err = parse_listing("addr 0 7 3").unwrap_err();
    assert!(err.to_string().contains("7 is not a register"), "{}", err);
    assert!(parse_listing("seti 0 0 4").is_err());
    assert!(parse_listing("frob 0 0 0").unwrap_err().to_string().contains("unknown operation"));
}

#[test]
fn test_statement() {
    assert_eq!(parse_statement("mulr 1 2 3").unwrap(),
        Statement::Named(Named { op: Op::Mulr, a: 1, b: 2, c: 3 }));
    assert_eq!(parse_statement("  4 1 2 3 ").unwrap(),
        Statement::Raw(Instruction::new(4, 1, 2, 3)));
    assert!(parse_statement("4 1 2 3 5").is_err());
    assert!(parse_statement("").is_err());
}

// opcode k stands for op (3k + 1) mod 16
fn secret(opcode: Opcode) -> Op {
    Op::ALL[(opcode as usize * 3 + 1) % Op::COUNT]
}

fn render_input(program: &[Named]) -> String {
    let befores = [[3, 2, 1, 1], [5, 0, 7, 2], [1, 9, 4, 6], [12, 3, 3, 8]];
    let mut src = String::new();
    for opcode in 0..16 {
        for before in befores {
            for (a, b, c) in [(0, 1, 2), (1, 2, 3), (2, 3, 0), (3, 0, 1), (1, 1, 1), (0, 3, 2), (2, 0, 3)] {
                let inst = Instruction::new(opcode, a, b, c);
                let before = Registers::new(before);
                let after = secret(opcode).apply(&inst, &before).unwrap();
                write!(src, "Before: {}\n{}\nAfter:  {}\n\n", before, inst, after).unwrap();
            }
        }
    }
    src.push_str("\n\n");
    let opcode_of = |op: Op| (0..16).find(|k| secret(*k) == op).unwrap();
    for named in program {
        writeln!(src, "{} {} {} {}", opcode_of(named.op), named.a, named.b, named.c).unwrap();
    }
    src
}

#[test]
fn test_end_to_end() {
    let listing = parse_listing("seti 5 0 0\nseti 3 0 1\nmulr 0 1 2\naddi 2 4 0\ngtri 0 10 3").unwrap();
    let src = render_input(&listing);
    let input = parse_input(&src).unwrap();
    assert_eq!(input.samples.len(), 16 * 4 * 7);
    assert_eq!(input.program.len(), listing.len());

    let mapping = resolve(&input.samples, Order::Lowest).unwrap();
    for opcode in 0..16 {
        assert_eq!(mapping.get(opcode), Some(secret(opcode)));
    }

    let regs = Executor::new(&mapping).run(&input.program).unwrap();
    let manual = listing.iter().fold(Registers::zero(), |regs, named| {
        named.op.apply(&named.operands(), &regs).unwrap()
    });
    assert_eq!(regs, manual);
    assert_eq!(regs, Registers::new([19, 3, 15, 1]));

    // decoding the program gives back the listing
    let decoded: Vec<Named> = input.program.iter()
        .map(|inst| Named::new(mapping.get(inst.opcode).unwrap(), inst))
        .collect();
    assert_eq!(decoded, listing);
}
