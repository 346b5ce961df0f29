/// Failure categories for errors that reach a page view-model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure or non-2xx status from an upstream service
    Network,
    /// Successful response rejected by a content rule after the fetch
    ContentPolicy,
    /// Required form fields missing before submission
    Validation,
    /// Response body did not match the expected shape
    Malformed,
}

/// Trait for errors that cross the view boundary.
///
/// Pages never expose structured error codes; every failure ends up as a
/// single human-readable message bound to the page's error state.
pub trait UserFacing: std::error::Error {
    /// Category of this error, used for logging and tests
    fn kind(&self) -> ErrorKind;

    /// Message shown to the user (French, like the rest of the UI strings)
    fn user_message(&self) -> String {
        self.to_string()
    }
}
