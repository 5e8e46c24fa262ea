use crate::common::*;
use crate::dice::{DiceGroup, Die};
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+", |lex| lex.slice().parse())]
    Integer(usize),

    #[regex(r"([1-9][0-9]*)?d[1-9][0-9]*", |lex| parse_dice(lex.slice()))]
    Dice(DiceGroup),

    #[token("+")]
    Plus,

    #[token("k")]
    Keep,
    #[token("p")]
    Drop,

    #[token("h")]
    Highest,
    #[token("l")]
    Lowest,

    #[regex(r"0d[0-9]*")]
    #[regex(r"([1-9][0-9]*)?d0[0-9]*")]
    ErrZeroDice,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer(_) => "<integer>",
            Dice(_) => "<dice>",
            Plus => "'+'",
            Keep => "'k'",
            Drop => "'p'",
            Highest => "'h'",
            Lowest => "'l'",
            ErrZeroDice | Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// `None` turns the token into `Error`, e.g. when the count overflows
fn parse_dice(s: &str) -> Option<DiceGroup> {
    let (num, sides) = s.split_once('d')?;
    let num = if num.is_empty() { 1 } else { num.parse().ok()? };
    let die = Die::try_from(sides.parse::<UInt>().ok()?).ok()?;
    Some(DiceGroup::new(num, die))
}
