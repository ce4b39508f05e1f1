use std::{backtrace::Backtrace, fmt::Display};

/// An error message paired with the stack captured when it was wrapped.
///
/// Displays as the bare message; the trace is only reachable through
/// [`WrappedError::stack_trace`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct WrappedError {
    message: String,
    stack_trace: String,
}

impl WrappedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack_trace: capture_stack(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack_trace(&self) -> &str {
        &self.stack_trace
    }
}

// Only the calling thread can be walked, so the dump covers that thread.
fn capture_stack() -> String {
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>");
    format!(
        "thread '{name}' [running]:\n{}",
        Backtrace::force_capture()
    )
}

/// Wraps a message with the current stack.
pub fn wrap_error(message: impl Into<String>) -> WrappedError {
    WrappedError::new(message)
}

/// Re-wraps any error with a stack captured here, at the wrap site, not where
/// `err` was created.
pub fn wrap<E: Display>(err: E) -> WrappedError {
    WrappedError::new(err.to_string())
}

/// `Result` adapter for [`wrap`].
pub trait WrapResult<T> {
    fn wrap_stack(self) -> Result<T, WrappedError>;
}

impl<T, E: Display> WrapResult<T> for Result<T, E> {
    fn wrap_stack(self) -> Result<T, WrappedError> {
        self.map_err(wrap)
    }
}
