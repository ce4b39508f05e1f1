//! Logging macros for the global logger.
//!
//! The plain forms concatenate their operands, the `f` forms take a format
//! string. Both report the line that invoked the macro.

#[doc(hidden)]
#[macro_export]
macro_rules! __concat_args {
    ($($arg:expr),+ $(,)?) => {
        $crate::__private::concat(&[$(&$arg as &dyn ::std::fmt::Display),+])
    };
}

/// Logs the concatenation of its operands at info severity:
/// `info!("started ", jobs, " jobs")`.
#[macro_export]
macro_rules! info {
    ($($arg:expr),+ $(,)?) => {
        $crate::info(::std::format_args!("{}", $crate::__concat_args!($($arg),+)))
    };
}

/// Logs a formatted message at info severity.
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::info(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warning {
    ($($arg:expr),+ $(,)?) => {
        $crate::warning(::std::format_args!("{}", $crate::__concat_args!($($arg),+)))
    };
}

#[macro_export]
macro_rules! warningf {
    ($($arg:tt)+) => {
        $crate::warning(::std::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:expr),+ $(,)?) => {
        $crate::error(::std::format_args!("{}", $crate::__concat_args!($($arg),+)))
    };
}

#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::error(::std::format_args!($($arg)+))
    };
}

/// Logs at fatal severity, closes every sink and exits with status 1.
#[macro_export]
macro_rules! fatal {
    ($($arg:expr),+ $(,)?) => {
        $crate::fatal(::std::format_args!("{}", $crate::__concat_args!($($arg),+)))
    };
}

#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::fatal(::std::format_args!($($arg)+))
    };
}
