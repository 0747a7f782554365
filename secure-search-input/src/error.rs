use crate::rules::TermIssue;
use crate::verdict::Rejection;
use thiserror::Error;

/// Typed form of a [`Rejection`]; displays as the rejection's user message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{}", Rejection::XssDetected.user_message())]
    XssDetected,

    #[error("{}", Rejection::SqlInjectionDetected.user_message())]
    SqlInjectionDetected,

    #[error("{}", validation_message(.0))]
    ValidationFailed(TermIssue),
}

fn validation_message(issue: &TermIssue) -> String {
    Rejection::ValidationFailed(*issue).user_message()
}

impl InputError {
    pub fn rejection(&self) -> Rejection {
        match self {
            InputError::XssDetected => Rejection::XssDetected,
            InputError::SqlInjectionDetected => Rejection::SqlInjectionDetected,
            InputError::ValidationFailed(issue) => Rejection::ValidationFailed(*issue),
        }
    }
}

impl From<Rejection> for InputError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::XssDetected => InputError::XssDetected,
            Rejection::SqlInjectionDetected => InputError::SqlInjectionDetected,
            Rejection::ValidationFailed(issue) => InputError::ValidationFailed(issue),
        }
    }
}

pub type Result<T> = std::result::Result<T, InputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_user_message() {
        for rejection in [
            Rejection::XssDetected,
            Rejection::SqlInjectionDetected,
            Rejection::ValidationFailed(TermIssue::Empty),
            Rejection::ValidationFailed(TermIssue::TooLong),
        ] {
            let err = InputError::from(rejection);
            assert_eq!(err.to_string(), rejection.user_message());
            assert_eq!(err.rejection(), rejection);
        }
    }
}
