/// How much a parser reports through the `log` facade while it runs.
///
/// The parsers carry their verbosity with them and check it at each logging
/// point, so a quiet parse never formats a message.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum Verbosity {
    #[default]
    Quiet,
    /// predict / scan / complete, at `debug` level.
    Steps,
    /// additionally every advance and chart insertion, at `trace` level.
    Items,
}

impl Verbosity {
    pub fn steps(self) -> bool { self >= Verbosity::Steps }
    pub fn items(self) -> bool { self >= Verbosity::Items }
}

/// `step!(verbosity, "fmt", args..)` logs at debug level when steps are on.
macro_rules! step {
    ($verbosity:expr, $($arg:tt)+) => {
        if $verbosity.steps() {
            log::debug!($($arg)+);
        }
    }
}

/// `detail!(verbosity, "fmt", args..)` logs at trace level when items are on.
macro_rules! detail {
    ($verbosity:expr, $($arg:tt)+) => {
        if $verbosity.items() {
            log::trace!($($arg)+);
        }
    }
}

pub(crate) use {detail, step};
