//! Defines the `Error` type for the andrey library

use std::error::Error;
use std::fmt;
use std::result;

pub type Result<T> = result::Result<T, AndreyError>;

#[derive(Clone, Debug, PartialEq)]
pub enum AndreyError {

    /// Represents an incomplete assignment where a complete assignment was required.
    IncompleteAssignment,

    /// Represents an error where a certain constraint on a scope was not satisfied
    InvalidScope,

    /// Exactly what it sounds like
    DivideByZero,

    /// Represents a variable that was present multiple times in a situation where it should only
    /// have been present once
    DuplicateVariable,

    /// Represents a name that was already bound to a different variable
    DuplicateName(String),

    /// Represents a reference (by name or by token) to a variable the model does not contain
    UnknownVariable(String),

    /// Represents an initial chain state that contradicts the evidence it must respect
    InconsistentEvidence,

    /// Represents a caller-supplied parameter that is outside its legal range
    InvalidArgument(String),

    /// Represents a potential table containing a negative entry
    NegativePotential,

    /// Represents an attempt to initialize a factor with an incompatible Initialization
    InvalidInitialization,

    /// A general error with the given description
    General(String),

    /// An unknown error condition
    Unknown

}

impl Error for AndreyError {

    fn description(&self) -> &str {
        match self {
            &AndreyError::IncompleteAssignment => "Missing assignments to the required Variables",
            &AndreyError::InvalidScope => "Provided scope did not satisfy constraints",
            &AndreyError::DivideByZero => "Encountered division by zero",
            &AndreyError::DuplicateVariable => "A variable was encountered twice",
            &AndreyError::DuplicateName(_) => "A variable name was bound twice",
            &AndreyError::UnknownVariable(_) => "Referenced a variable not present in the model",
            &AndreyError::InconsistentEvidence => "Initial state contradicts the evidence",
            &AndreyError::InvalidArgument(_) => "Parameter outside its legal range",
            &AndreyError::NegativePotential => "Potential tables must be non-negative",
            &AndreyError::InvalidInitialization => "An invalid initialization was provided",
            &AndreyError::General(ref err) => err.as_str(),
            &AndreyError::Unknown => "An unknown error occured"
        }
    }

    fn cause(&self) -> Option<&Error> {
        None
    }

}

impl fmt::Display for AndreyError {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &AndreyError::DuplicateName(ref name) => {
                write!(f, "{}: {}", self.description(), name)
            },
            &AndreyError::UnknownVariable(ref name) => {
                write!(f, "{}: {}", self.description(), name)
            },
            &AndreyError::InvalidArgument(ref what) => {
                write!(f, "{}: {}", self.description(), what)
            },
            _ => write!(f, "{}", self.description())
        }
    }

}
