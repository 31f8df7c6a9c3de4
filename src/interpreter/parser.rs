use log::debug;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        value::{atom::Atom, expression::Expression},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Deepest nesting of parenthesized expressions a program may use.
pub const MAX_NESTING: usize = 100;

/// Tokenizes and parses a complete program.
///
/// # Parameters
/// - `source`: The program text.
///
/// # Returns
/// The root expression of the program.
///
/// # Errors
/// Returns a `ParseError` if the program is not exactly one well-formed,
/// parenthesized expression.
///
/// # Example
/// ```
/// use plotscript::interpreter::parser::parse_program;
///
/// let ast = parse_program("(begin (define r 10) (* pi (* r r)))").unwrap();
/// assert_eq!(ast.tail.len(), 2);
///
/// assert!(parse_program("(+ 1 2) (+ 3 4)").is_err());
/// assert!(parse_program("hello").is_err());
/// ```
pub fn parse_program(source: &str) -> ParseResult<Expression> {
    let tokens = tokenize(source)?;
    parse(&tokens).inspect_err(|e| debug!("parse failed: {e}"))
}

/// Builds the syntax tree for a token sequence.
///
/// The parser keeps a stack of the nodes that are still open. An opening
/// parenthesis marks that the next lexeme is the head of a new node; that node
/// is pushed onto the stack. Any other lexeme is appended to the tail of the
/// node on top of the stack. A closing parenthesis pops the top node and
/// appends it to its parent, or makes it the root when the stack empties.
///
/// String literal tokens always become `Str` atoms. Plain lexemes are
/// classified with [`Atom::from_lexeme`].
///
/// # Parameters
/// - `tokens`: `(Token, line)` pairs as produced by
///   [`tokenize`](crate::interpreter::lexer::tokenize).
///
/// # Returns
/// The root expression.
///
/// # Errors
/// - `EmptyProgram` if there are no tokens.
/// - `UnexpectedToken` for `()` or for a `(` directly after another `(`.
/// - `UnbalancedParens` for a `)` with nothing open.
/// - `TrailingTokens` if anything follows the closed root.
/// - `BareLexeme` for a lexeme outside of any parentheses.
/// - `InvalidLiteral` for malformed numbers such as `1abc`.
/// - `UnterminatedString` for a string literal that is never closed.
/// - `UnexpectedEndOfInput` if the input ends while a node is still open.
/// - `NestingTooDeep` if more than [`MAX_NESTING`] nodes are open at once.
pub fn parse(tokens: &[(Token, usize)]) -> ParseResult<Expression> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyProgram);
    }

    let mut stack: Vec<Expression> = Vec::new();
    let mut root: Option<Expression> = None;
    let mut at_head = false;
    let mut last_line = 1;

    for (token, line) in tokens {
        let line = *line;
        last_line = line;

        if root.is_some() {
            return Err(ParseError::TrailingTokens { token: token.to_string(),
                                                    line });
        }

        match token {
            Token::Open => {
                if at_head {
                    return Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                             line });
                }
                at_head = true;
            },
            Token::Close => {
                if at_head {
                    return Err(ParseError::UnexpectedToken { token: token.to_string(),
                                                             line });
                }
                let node = stack.pop().ok_or(ParseError::UnbalancedParens { line })?;
                match stack.last_mut() {
                    Some(parent) => parent.push(node),
                    None => root = Some(node),
                }
            },
            Token::Str(text) => {
                place(Atom::Str(text.clone()), &mut stack, &mut at_head, token, line)?;
            },
            Token::Lexeme(lexeme) => {
                let atom =
                    Atom::from_lexeme(lexeme).ok_or_else(|| ParseError::InvalidLiteral {
                                                  lexeme: lexeme.clone(),
                                                  line,
                                              })?;
                place(atom, &mut stack, &mut at_head, token, line)?;
            },
            Token::UnterminatedStr => return Err(ParseError::UnterminatedString { line }),
            Token::Comment | Token::NewLine | Token::Ignored => {},
        }
    }

    root.ok_or(ParseError::UnexpectedEndOfInput { line: last_line })
}

/// Places a classified atom in the tree under construction.
///
/// Directly after `(` the atom heads a new node that becomes the top of the
/// stack. Otherwise it is appended as a leaf to the current top.
fn place(atom: Atom,
         stack: &mut Vec<Expression>,
         at_head: &mut bool,
         token: &Token,
         line: usize)
         -> ParseResult<()> {
    if *at_head {
        if stack.len() >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                    line });
        }
        stack.push(Expression::new(atom));
        *at_head = false;
        return Ok(());
    }

    match stack.last_mut() {
        Some(top) => {
            top.push(Expression::new(atom));
            Ok(())
        },
        None => Err(ParseError::BareLexeme { lexeme: token.to_string(),
                                             line }),
    }
}
