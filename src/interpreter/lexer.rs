use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
///
/// Outside of string literals the language only knows parentheses and plain
/// lexemes; whether a lexeme is a number or a symbol is decided later by the
/// parser. String literals are captured verbatim, including parentheses,
/// semicolons and whitespace.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// `(`
    #[token("(")]
    Open,
    /// `)`
    #[token(")")]
    Close,
    /// A double-quoted string literal. Holds the text between the quotes.
    #[regex(r#""[^"]*""#, parse_string, allow_greedy = true)]
    Str(String),
    /// A string literal whose closing quote never appears. The parser always
    /// rejects it.
    #[regex(r#""[^"]*"#, count_lines, allow_greedy = true)]
    UnterminatedStr,
    /// Any other run of characters, such as `define`, `+`, `3.14` or `1abc`.
    #[regex(r#"[^ \t\r\n\f\x0B()";]+"#, |lex| lex.slice().to_string(), allow_greedy = true)]
    Lexeme(String),
    /// `; Comments.`
    #[regex(r";[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Newlines advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f\x0B]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "("),
            Self::Close => write!(f, ")"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::UnterminatedStr => write!(f, "\""),
            Self::Lexeme(s) => write!(f, "{s}"),
            Self::Comment | Self::NewLine | Self::Ignored => Ok(()),
        }
    }
}

/// Splits a program into its full token sequence.
///
/// Each token is paired with the line it was found on. The sequence is
/// materialized before parsing begins so it can be walked more than once.
///
/// # Parameters
/// - `source`: The program text.
///
/// # Returns
/// The ordered `(Token, line)` pairs.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` if the lexer cannot classify a piece
/// of input.
///
/// # Example
/// ```
/// use plotscript::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("(+ 1 \"a b\") ; trailing comment").unwrap();
/// let tokens: Vec<Token> = tokens.into_iter().map(|(t, _)| t).collect();
///
/// assert_eq!(tokens,
///            vec![Token::Open,
///                 Token::Lexeme("+".to_string()),
///                 Token::Lexeme("1".to_string()),
///                 Token::Str("a b".to_string()),
///                 Token::Close]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        let line = lexer.extras.line;
        match token {
            Ok(tok) => tokens.push((tok, line)),
            Err(()) => {
                return Err(ParseError::UnexpectedToken { token: lexer.slice().to_string(),
                                                         line });
            },
        }
    }

    Ok(tokens)
}

/// Extracts the text of a string literal and counts the newlines inside it.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// The literal without its surrounding quotes.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.matches('\n').count();
    slice[1..slice.len() - 1].to_string()
}

/// Counts the newlines swallowed by an unterminated string literal.
fn count_lines(lex: &mut logos::Lexer<Token>) {
    lex.extras.line += lex.slice().matches('\n').count();
}
