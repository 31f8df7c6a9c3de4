#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
pub enum SemanticError {
    /// Tried to look up a symbol with no bound value.
    UnknownSymbol {
        /// The name of the symbol.
        name: String,
    },
    /// The head of an application does not name a procedure.
    NotAProcedure {
        /// The rendered head that was applied.
        name: String,
    },
    /// The wrong number of arguments was supplied to a procedure or form.
    ArgumentCountMismatch {
        /// The procedure or special form that was called.
        procedure: String,
    },
    /// An argument had an unexpected or incompatible type.
    TypeError {
        /// The procedure or special form that was called.
        procedure: String,
        /// Details about the type mismatch.
        details:   String,
    },
    /// An argument had the right type but an unusable value.
    InvalidArgument {
        /// The procedure or special form that was called.
        procedure: String,
        /// Details about why the argument is invalid.
        details:   String,
    },
    /// Attempted to bind the name of a special form.
    SpecialFormRedefinition {
        /// The reserved name.
        name: String,
    },
    /// Attempted to bind the name of a built-in procedure.
    BuiltinRedefinition {
        /// The built-in name.
        name: String,
    },
    /// Attempted to bind a symbol that already has a value.
    SymbolRedefinition {
        /// The symbol name.
        name: String,
    },
    /// A special form was used with the wrong shape.
    MalformedSpecialForm {
        /// The special form.
        form:    String,
        /// Details about what is wrong.
        details: String,
    },
    /// Evaluation was requested before a program was parsed successfully.
    NoProgram,
    /// Evaluation nested deeper than the evaluator allows.
    DepthExceeded {
        /// The maximum nesting depth.
        limit: usize,
    },
    /// Evaluation was aborted by an external interrupt request.
    Interrupted,
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSymbol { name } => {
                write!(f, "Error during evaluation: unknown symbol '{name}'.")
            },
            Self::NotAProcedure { name } => {
                write!(f, "Error during evaluation: '{name}' does not name a procedure.")
            },
            Self::ArgumentCountMismatch { procedure } => write!(f,
                                                                "Error in call to {procedure}: invalid number of arguments."),
            Self::TypeError { procedure, details } => {
                write!(f, "Error in call to {procedure}: {details}.")
            },
            Self::InvalidArgument { procedure, details } => {
                write!(f, "Error in call to {procedure}: invalid argument: {details}.")
            },
            Self::SpecialFormRedefinition { name } => write!(f,
                                                             "Error during evaluation: attempt to redefine the special-form '{name}'."),
            Self::BuiltinRedefinition { name } => write!(f,
                                                         "Error during evaluation: attempt to redefine the built-in procedure '{name}'."),
            Self::SymbolRedefinition { name } => write!(f,
                                                        "Error during evaluation: attempt to redefine the previously defined symbol '{name}'."),
            Self::MalformedSpecialForm { form, details } => {
                write!(f, "Error during evaluation of {form}: {details}.")
            },
            Self::NoProgram => write!(f, "Error: Invalid Program. Could not parse."),
            Self::DepthExceeded { limit } => write!(f,
                                                    "Error during evaluation: maximum evaluation depth of {limit} exceeded."),
            Self::Interrupted => write!(f, "Error: interpreter kernel interrupted"),
        }
    }
}

impl std::error::Error for SemanticError {}
