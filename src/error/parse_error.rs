#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The program contained no tokens at all.
    EmptyProgram,
    /// Found a token that cannot appear at this position.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A closing parenthesis `)` appeared with no expression left open.
    UnbalancedParens {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Reached the end of input while an expression was still open.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after the root expression was closed.
    TrailingTokens {
        /// The first extra token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A lexeme starts with a digit but is not a valid number.
    InvalidLiteral {
        /// The offending lexeme.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A lexeme appeared outside of any parenthesized expression.
    BareLexeme {
        /// The offending lexeme.
        lexeme: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// The source line where the input ran out.
        line: usize,
    },
    /// Expressions were nested deeper than the parser allows.
    NestingTooDeep {
        /// The maximum nesting depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The program stream could not be read.
    Io {
        /// Description of the underlying I/O failure.
        message: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProgram => write!(f, "Error: Program is empty."),
            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },
            Self::UnbalancedParens { line } => {
                write!(f, "Error on line {line}: Unbalanced closing parenthesis ')'.")
            },
            Self::UnexpectedEndOfInput { line } => write!(f,
                                                          "Error on line {line}: Unexpected end of input, expected closing parenthesis ')'."),
            Self::TrailingTokens { token, line } => write!(f,
                                                           "Error on line {line}: Extra tokens after expression. Check your input: {token}"),
            Self::InvalidLiteral { lexeme, line } => {
                write!(f, "Error on line {line}: Malformed numeric literal '{lexeme}'.")
            },
            Self::BareLexeme { lexeme, line } => write!(f,
                                                        "Error on line {line}: '{lexeme}' must be enclosed in parentheses."),
            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: String literal is never closed.")
            },
            Self::NestingTooDeep { limit, line } => write!(f,
                                                           "Error on line {line}: Expressions are nested deeper than {limit} levels."),
            Self::Io { message } => write!(f, "Error: Could not read program: {message}"),
        }
    }
}

impl std::error::Error for ParseError {}
