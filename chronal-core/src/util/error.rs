use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct Error(Repr);

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadFormat,
    IO,
    // resolver
    MissingSamples,
    Contradiction,
    Unresolved,
    // executor
    UnmappedOpcode,
    BadRegister,
    Overflow,
    Custom
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            BadFormat => "bad format",
            IO => "i/o error",
            MissingSamples => "missing samples",
            Contradiction => "contradictory samples",
            Unresolved => "unresolved opcodes",
            UnmappedOpcode => "unmapped opcode",
            BadRegister => "bad register",
            Overflow => "overflow",
            Custom => "error"
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub fn new<E>(error: E) -> Error
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error(Repr::Custom(ErrorKind::Custom, error.into()))
    }

    // Like new(), but tagged with a kind callers can match on
    pub fn with_kind<E>(kind: ErrorKind, error: E) -> Error
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error(Repr::Custom(kind, error.into()))
    }

    pub fn new_const(kind : ErrorKind, message: &'static str) -> Self {
        Error(Repr::SimpleMessage(kind, message))
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.0 {
            Repr::Custom(c, _) => *c,
            Repr::Simple(c) => *c,
            Repr::SimpleMessage(c, _) => *c
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(e: ErrorKind) -> Self {
        Error(Repr::Simple(e))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::with_kind(ErrorKind::IO, e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match &self.0 {
            Repr::Simple(kind) => write!(f, "{}", kind),
            Repr::SimpleMessage(kind, msg) => write!(f, "{}: {}", kind, msg),
            Repr::Custom(ErrorKind::Custom, e) => write!(f, "{}", e),
            Repr::Custom(kind, e) => write!(f, "{}: {}", kind, e)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            Repr::Custom(_, e) => Some(e.as_ref()),
            _ => None
        }
    }
}

#[derive(Debug)]
enum Repr {
    Simple(ErrorKind),
    SimpleMessage(ErrorKind, &'static str),
    Custom(ErrorKind, Box<dyn std::error::Error + Send + Sync>)
}
