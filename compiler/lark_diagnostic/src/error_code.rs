use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit is the band:
/// - E0xxx: lexical
/// - E1xxx: syntactic
/// - E2xxx: type
/// - E3xxx: scope
/// - E4xxx: constraint (recursion, unsupported syntax)
/// - E5xxx: overload / operation resolution
/// - E6xxx: network / sync validation
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical (E0xxx)
    /// Illegal character in source
    E0001,
    /// Unterminated string literal
    E0002,
    /// Unterminated block comment
    E0003,
    /// Invalid number literal
    E0004,
    /// Unterminated interpolation fragment inside a string
    E0005,

    // Syntactic (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Expected type
    E1005,
    /// Invalid declaration
    E1006,
    /// Invalid assignment target
    E1007,
    /// Invalid sync mode
    E1008,

    // Type (E2xxx)
    /// Type mismatch
    E2001,
    /// Unknown type
    E2002,
    /// Condition must be bool
    E2003,
    /// Return type mismatch
    E2004,
    /// `break`/`continue` outside a loop
    E2005,
    /// Value is not callable
    E2006,
    /// Value is not indexable
    E2007,
    /// Void value used where a value is required
    E2008,
    /// Cannot infer type (no annotation, no initializer)
    E2009,
    /// Array literal elements disagree on type
    E2010,
    /// Argument count mismatch on a user function
    E2011,
    /// Module variable initializer must be a literal
    E2012,

    // Scope (E3xxx)
    /// Unknown identifier
    E3001,
    /// Duplicate definition
    E3002,
    /// Unknown custom event in `send`
    E3003,

    // Constraint (E4xxx)
    /// Recursive call cycle (the target has no call stack)
    E4001,
    /// Generic type parameters are not supported
    E4002,
    /// Unknown platform event
    E4003,

    // Overload / operation resolution (E5xxx)
    /// No matching overload
    E5001,
    /// Ambiguous overload
    E5002,
    /// Unknown member
    E5003,
    /// Unknown property
    E5004,
    /// Read-only property
    E5005,
    /// No operator for the operand types
    E5006,

    // Network / sync (E6xxx)
    /// Sync variable mutated without a serialization request (warning)
    E6001,
    /// Sync mode invalid for the variable's type
    E6002,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E5003 => "E5003",
            ErrorCode::E5004 => "E5004",
            ErrorCode::E5005 => "E5005",
            ErrorCode::E5006 => "E5006",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
        }
    }

    /// Parse a code from its `E####` spelling.
    pub fn parse(text: &str) -> Option<ErrorCode> {
        ALL_CODES.iter().copied().find(|c| c.as_str() == text)
    }

    /// A longer explanation of the error, for `lark explain`.
    pub fn explanation(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "The lexer found a character that is not part of the language.",
            ErrorCode::E0002 => {
                "A string literal was opened but never closed before the end of the line."
            }
            ErrorCode::E0003 => {
                "A block comment was opened but never closed. Block comments nest; \
                 each `/*` needs a matching `*/`."
            }
            ErrorCode::E0004 => "A number literal could not be parsed.",
            ErrorCode::E0005 => {
                "An interpolation fragment `{...}` inside a string was opened but never closed."
            }
            ErrorCode::E1001 => "The parser found a token it did not expect at this position.",
            ErrorCode::E1002 => "An expression was expected here.",
            ErrorCode::E1003 => "A `(`, `[` or `{` was opened but never closed.",
            ErrorCode::E1004 => "An identifier was expected here.",
            ErrorCode::E1005 => "A type was expected here.",
            ErrorCode::E1006 => "This declaration is malformed.",
            ErrorCode::E1007 => {
                "Only variables, member accesses and index expressions can be assigned to."
            }
            ErrorCode::E1008 => "Sync mode must be one of `none`, `linear` or `smooth`.",
            ErrorCode::E2001 => "A value of one type was used where another type was required.",
            ErrorCode::E2002 => "This type name is not a language type or a known platform type.",
            ErrorCode::E2003 => "The condition of `if`, `while` and `for` tests must be `bool`.",
            ErrorCode::E2004 => {
                "The value returned does not match the declared return type, or a value \
                 was returned from a body that returns nothing."
            }
            ErrorCode::E2005 => "`break` and `continue` are only valid inside a loop body.",
            ErrorCode::E2006 => "Only functions and platform methods can be called.",
            ErrorCode::E2007 => "Only arrays can be indexed.",
            ErrorCode::E2008 => "This operation returns no value, so its result cannot be used.",
            ErrorCode::E2009 => {
                "A variable needs either a type annotation or an initializer to fix its type."
            }
            ErrorCode::E2010 => "Every element of an array literal must have the same type.",
            ErrorCode::E2011 => "The call passes a different number of arguments than the \
                 function declares.",
            ErrorCode::E2012 => {
                "Module-level variables become heap slots with a literal initial value; \
                 computed initializers are only allowed on locals."
            }
            ErrorCode::E3001 => "This name is not declared in any enclosing scope.",
            ErrorCode::E3002 => "This name is already declared in the same scope.",
            ErrorCode::E3003 => "`send` names a custom event, declared with `event Name { ... }`.",
            ErrorCode::E4001 => {
                "The target platform has no call stack: each function holds a single \
                 return address, so re-entering a function in a call cycle would \
                 overwrite it. Recursion is rejected statically."
            }
            ErrorCode::E4002 => "The target platform has no generics; type parameter lists \
                 are rejected.",
            ErrorCode::E4003 => "This is not a platform event the runtime can raise.",
            ErrorCode::E5001 => {
                "None of the operation's overloads accepts the argument types at this call."
            }
            ErrorCode::E5002 => {
                "Two or more overloads match the argument types equally well; the compiler \
                 never guesses. Convert an argument explicitly to pick one."
            }
            ErrorCode::E5003 => "The receiver type has no member with this name.",
            ErrorCode::E5004 => "The receiver type has no property with this name.",
            ErrorCode::E5005 => {
                "The property lacks the accessor this use needs. Writing needs a setter; \
                 reading, including the old value of a compound assignment, needs a getter."
            }
            ErrorCode::E5006 => "No whitelisted operator exists for these operand types.",
            ErrorCode::E6001 => {
                "A synced variable was written, but the handler never requests \
                 serialization, so the change may not replicate. This check is \
                 heuristic: it only looks within the same body."
            }
            ErrorCode::E6002 => {
                "`linear` and `smooth` interpolation only apply to numeric variables."
            }
        }
    }
}

/// Every defined code, in band order.
pub const ALL_CODES: &[ErrorCode] = &[
    ErrorCode::E0001,
    ErrorCode::E0002,
    ErrorCode::E0003,
    ErrorCode::E0004,
    ErrorCode::E0005,
    ErrorCode::E1001,
    ErrorCode::E1002,
    ErrorCode::E1003,
    ErrorCode::E1004,
    ErrorCode::E1005,
    ErrorCode::E1006,
    ErrorCode::E1007,
    ErrorCode::E1008,
    ErrorCode::E2001,
    ErrorCode::E2002,
    ErrorCode::E2003,
    ErrorCode::E2004,
    ErrorCode::E2005,
    ErrorCode::E2006,
    ErrorCode::E2007,
    ErrorCode::E2008,
    ErrorCode::E2009,
    ErrorCode::E2010,
    ErrorCode::E2011,
    ErrorCode::E2012,
    ErrorCode::E3001,
    ErrorCode::E3002,
    ErrorCode::E3003,
    ErrorCode::E4001,
    ErrorCode::E4002,
    ErrorCode::E4003,
    ErrorCode::E5001,
    ErrorCode::E5002,
    ErrorCode::E5003,
    ErrorCode::E5004,
    ErrorCode::E5005,
    ErrorCode::E5006,
    ErrorCode::E6001,
    ErrorCode::E6002,
];

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
