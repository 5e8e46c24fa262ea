pub mod ast;
mod lexer;
mod parser;

pub use lexer::TokenKind;
pub use parser::{ParseError, ParseErrorKind};

/// Parses dice notation such as `4d6pl1` or `3d6 + d8 kh2`.
///
/// # Examples
/// ```
/// # use dice_odds::{parse::parse, SelectionRule};
/// let expr = parse("2d20kh1").unwrap();
/// assert_eq!(expr.groups().len(), 1);
/// assert_eq!(expr.rule(), SelectionRule::keep_high(1));
/// ```
pub fn parse(s: &str) -> Result<ast::Expression, ParseError> {
    parser::Parser::new(s).parse()
}
