use std::str::FromStr;

use tracing::metadata::LevelFilter;
use tracing_subscriber::{
    Layer, filter::FilterFn, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

#[macro_export]
macro_rules! log {
    ($level:expr, $span:expr, $($arg:tt)*) => {{
        let span = $crate::tracing::span!($level, $span);
        let _enter = span.enter();

        $crate::tracing::event!($level, $($arg)*)
    }};
}

/// Log something a channel is doing on our behalf, e.g. a delivery attempt
#[macro_export]
macro_rules! outgoing {
    (level = $level:ident, $($arg:tt)*) => {
        $crate::log!($crate::tracing::Level::$level, "outgoing", $($arg)*)
    };

    ($($arg:tt)*) => {
        $crate::outgoing!(level = TRACE, $($arg)*)
    };
}

/// Log bookkeeping that never leaves the process (pool state, cache bindings)
#[macro_export]
macro_rules! internal {
    (level = $level:ident, $($arg:tt)*) => {
        $crate::log!($crate::tracing::Level::$level, "internal", $($arg)*)
    };

    ($($arg:tt)*) => {
        $crate::internal!(level = TRACE, $($arg)*)
    };
}

fn level_from_env(value: Option<&str>) -> LevelFilter {
    let default = if cfg!(debug_assertions) {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    };

    value.map_or(default, |level| {
        LevelFilter::from_str(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level specified {level}, defaulting to {default}");
            default
        })
    })
}

/// Install the global subscriber.
///
/// The level comes from `LOG_LEVEL`, and only events emitted by `quill*`
/// targets are printed.
pub fn init() {
    let level = level_from_env(std::env::var("LOG_LEVEL").ok().as_deref());

    tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_ansi(true)
                .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339())
                .with_filter(level)
                .with_filter(FilterFn::new(|metadata| {
                    metadata.target().starts_with("quill")
                })),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_env() {
        assert_eq!(level_from_env(Some("warn")), LevelFilter::WARN);
        assert_eq!(level_from_env(Some("DEBUG")), LevelFilter::DEBUG);

        let default = if cfg!(debug_assertions) {
            LevelFilter::TRACE
        } else {
            LevelFilter::INFO
        };
        assert_eq!(level_from_env(None), default);
        assert_eq!(level_from_env(Some("chatty")), default);
    }

    #[test]
    fn test_macros_expand_without_subscriber() {
        let name = "primary";
        crate::internal!(level = DEBUG, channel = %name, "quarantined");
        crate::outgoing!("attempting delivery");
    }
}
