pub use logos::Logos;

use crate::parser::SyntaxError;

use std::fmt::{Display, Formatter};

// Tokens of the sample dump and of mnemonic listings
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token<'src> {
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[token("Before")]
    Before,
    #[token("After")]
    After,

    #[regex(r"[a-z][a-z_0-9]*")]
    Mnemonic(&'src str),

    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("[")] LBracket, #[token("]")] RBracket,

    #[regex(r"[0-9]+", |x| x.slice().parse())]
    Integer(u64),

    #[error]
    Error
}

impl<'src> Display for Token<'src> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Whitespace => write!(f, "whitespace"),
            LineComment => write!(f, "comment"),
            Before => write!(f, "`Before`"),
            After => write!(f, "`After`"),
            Mnemonic(m) => write!(f, "`{}`", m),
            Colon => write!(f, "`:`"),
            Comma => write!(f, "`,`"),
            LBracket => write!(f, "`[`"),
            RBracket => write!(f, "`]`"),
            Integer(i) => write!(f, "`{}`", i),
            Error => write!(f, "invalid token")
        }
    }
}

use logos::Lexer as LogosLexer;

pub type LexerItem<'src> = Result<(usize, Token<'src>, usize), SyntaxError>;

pub struct Lexer<'src> {
    logos_lex : LogosLexer<'src, Token<'src>>,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Lexer {
        Lexer {
            logos_lex: Token::lexer(src)
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = LexerItem<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let tok = self.logos_lex.next()?;
        let range = self.logos_lex.span();
        Some(match tok {
            Token::Error => Err(SyntaxError::new(range.start, range.end,
                format!("unexpected `{}`", self.logos_lex.slice()))),
            tok => Ok((range.start, tok, range.end))
        })
    }
}
