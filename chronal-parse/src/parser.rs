use chronal_core::{Error, ErrorKind, Result};
use chronal_core::{Instruction, Op, Sample, Word};

use codespan::{Files, Span};
use lalrpop_util::ParseError;
use std::fmt::{Display, Formatter};

use crate::grammar;
use crate::lexer::{Lexer, Token};

/// The two sections of a puzzle input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub samples: Vec<Sample>,
    pub program: Vec<Instruction>
}

// An instruction written with its operation's name instead of an opcode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Named {
    pub op: Op,
    pub a: Word,
    pub b: Word,
    pub c: Word
}

impl Named {
    pub fn new(op: Op, inst: &Instruction) -> Self {
        Self { op, a: inst.a, b: inst.b, c: inst.c }
    }

    // Operands only; the opcode field is meaningless here
    pub fn operands(&self) -> Instruction {
        Instruction::new(0, self.a, self.b, self.c)
    }
}

impl Display for Named {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.op, self.a, self.b, self.c)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Statement {
    Named(Named),
    Raw(Instruction)
}

pub fn parse_input(src: &str) -> Result<Input> {
    let input = grammar::InputParser::new().parse(Lexer::new(src))
        .map_err(|e| syntax_error(src, e))?;
    log::debug!(target: "parse", "{} samples, {} instructions",
        input.samples.len(), input.program.len());
    Ok(input)
}

pub fn parse_program(src: &str) -> Result<Vec<Instruction>> {
    grammar::ProgramParser::new().parse(Lexer::new(src))
        .map_err(|e| syntax_error(src, e))
}

pub fn parse_listing(src: &str) -> Result<Vec<Named>> {
    grammar::ListingParser::new().parse(Lexer::new(src))
        .map_err(|e| syntax_error(src, e))
}

pub fn parse_statement(src: &str) -> Result<Statement> {
    grammar::StatementParser::new().parse(Lexer::new(src))
        .map_err(|e| syntax_error(src, e))
}

// Raised by the lexer and by the checks inside grammar actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub span: Span,
    pub message: String
}

impl SyntaxError {
    pub fn new<M: Display>(start: usize, end: usize, msg: M) -> Self {
        Self { span: Span::new(start as u32, end as u32), message: msg.to_string() }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

type GrammarError<'src> = ParseError<usize, Token<'src>, SyntaxError>;

// Terminal names as the grammar spells them, quotes included
fn expecting(expected: &[String]) -> String {
    let names: Vec<String> = expected.iter().map(|e| match e.trim_matches('"') {
        "int" => "a number".to_string(),
        "mnemonic" => "an operation".to_string(),
        t => format!("`{}`", t)
    }).collect();
    match names.as_slice() {
        [] => String::new(),
        [one] => format!(", expected {}", one),
        many => format!(", expected one of {}", many.join(", "))
    }
}

fn syntax_error(src: &str, err: GrammarError<'_>) -> Error {
    let (at, msg) = match err {
        ParseError::InvalidToken { location } => (location, "invalid token".to_string()),
        ParseError::UnrecognizedEOF { location, expected } =>
            (location, format!("unexpected end of input{}", expecting(&expected))),
        ParseError::UnrecognizedToken { token: (l, tok, _), expected } =>
            (l, format!("unexpected {}{}", tok, expecting(&expected))),
        ParseError::ExtraToken { token: (l, tok, _) } =>
            (l, format!("unexpected {} after statement", tok)),
        ParseError::User { error } => (error.span.start().to_usize(), error.message)
    };
    let mut files = Files::new();
    let file = files.add("input", src);
    let msg = match files.location(file, at as u32) {
        Ok(loc) => format!("{}:{}: {}", loc.line.number(), loc.column.number(), msg),
        Err(_) => msg
    };
    Error::with_kind(ErrorKind::BadFormat, msg)
}
