use super::{ast::Expression, lexer::*};
use crate::common::*;
use crate::dice::DiceGroup;
use crate::ops::SelectionRule;
use logos_iter::LogosIter;
use std::fmt;
use std::ops::Range;

type PResult<T> = Result<T, ParseError>;

type Expected = &'static [&'static str];

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: Expected,
    },
    UnexpectedString {
        expected: Expected,
    },
    ZeroDice,
    ZeroCount,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                match found {
                    Some(found) => write!(f, "unexpected {}, expected ", found)?,
                    None => write!(f, "unexpected end of input, expected ")?,
                }
                fmt_expected(expected, f)
            }
            Self::UnexpectedString { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::ZeroDice => write!(f, "dice need at least one die and one side"),
            Self::ZeroCount => write!(f, "a keep or drop rule needs a count of at least 1"),
        }
    }
}

fn fmt_expected(expected: &[&str], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expected {
        [] => Ok(()),
        [a] => f.write_str(a),
        [a, b] => write!(f, "{} or {}", a, b),
        [init @ .., last] => write!(f, "{}, or {}", init.join(", "), last),
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    const DICE: Expected = &["<dice>"];
    const RULE_OPS: Expected = &["'k'", "'p'"];
    const SELECTORS: Expected = &["'h'", "'l'"];
    const COUNT: Expected = &["<integer>"];
    const AFTER_GROUP: Expected = &["'+'", "'k'", "'p'", "end of input"];
    const END: Expected = &["end of input"];

    pub fn new(s: &'a str) -> Self {
        Self { lexer: lexer(s) }
    }

    pub fn parse(mut self) -> PResult<Expression> {
        let groups = self.parse_groups()?;

        if self.matches_any(&[TokenKind::Keep, TokenKind::Drop]) {
            let rule = self.parse_rule()?;
            self.consume_end(Self::END)?;
            Ok(Expression::new(groups, rule))
        } else {
            self.consume_end(Self::AFTER_GROUP)?;
            Ok(Expression::new(groups, SelectionRule::none()))
        }
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek() == Some(&kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.lexer
            .peek()
            .map_or(false, |peeked| options.contains(peeked))
    }

    fn consume_end(&mut self, expected: Expected) -> PResult<()> {
        if self.lexer.peek().is_none() {
            Ok(())
        } else {
            let found = self.advance();
            self.unexpected(found, expected)
        }
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }

    fn unexpected<T>(&mut self, found: Option<TokenKind>, expected: Expected) -> PResult<T> {
        match found {
            Some(TokenKind::ErrZeroDice) => self.error(ParseErrorKind::ZeroDice),
            Some(TokenKind::Error) => self.error(ParseErrorKind::UnexpectedString { expected }),
            found => self.error(ParseErrorKind::UnexpectedToken { found, expected }),
        }
    }

    fn parse_groups(&mut self) -> PResult<NonEmpty<DiceGroup>> {
        let mut groups = vec1![self.parse_group()?];
        while self.matches(TokenKind::Plus) {
            self.advance();
            groups.push(self.parse_group()?);
        }
        Ok(groups)
    }

    fn parse_group(&mut self) -> PResult<DiceGroup> {
        match self.advance() {
            Some(TokenKind::Dice(group)) => Ok(group),
            found => self.unexpected(found, Self::DICE),
        }
    }

    fn parse_rule(&mut self) -> PResult<SelectionRule> {
        let keep = match self.advance() {
            Some(TokenKind::Keep) => true,
            Some(TokenKind::Drop) => false,
            found => return self.unexpected(found, Self::RULE_OPS),
        };
        let highest = match self.advance() {
            Some(TokenKind::Highest) => true,
            Some(TokenKind::Lowest) => false,
            found => return self.unexpected(found, Self::SELECTORS),
        };
        let count = match self.advance() {
            Some(TokenKind::Integer(0)) => return self.error(ParseErrorKind::ZeroCount),
            Some(TokenKind::Integer(n)) => n,
            found => return self.unexpected(found, Self::COUNT),
        };

        Ok(match (keep, highest) {
            (true, true) => SelectionRule::keep_high(count),
            (true, false) => SelectionRule::keep_low(count),
            (false, true) => SelectionRule::drop_high(count),
            (false, false) => SelectionRule::drop_low(count),
        })
    }
}
