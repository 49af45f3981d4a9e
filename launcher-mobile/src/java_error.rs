use anyhow::anyhow;

/// A Java exception taken off the JNI env.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct JavaException {
    /// `Throwable.getLocalizedMessage()`, null for bare exceptions.
    pub localized_message: Option<String>,
    /// `Throwable.toString()`, class name included.
    pub description: String,
}

impl JavaException {
    pub fn message(&self) -> &str {
        match self.localized_message.as_deref() {
            Some(message) if !message.trim().is_empty() => message,
            _ => &self.description,
        }
    }
}

/// Error for a failed JNI step. A thrown exception surfaces with its
/// localized message only; the step name goes to the log.
pub(crate) fn java_failure(what: &str, exception: Option<&JavaException>, cause: &str) -> anyhow::Error {
    match exception {
        Some(exception) => {
            log::warn!("{}: {}", what, exception.description);
            anyhow!("{}", exception.message())
        }
        None => anyhow!("{}: {}", what, cause),
    }
}
