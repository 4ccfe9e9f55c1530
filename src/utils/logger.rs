use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins; otherwise the exporter logs at info, or debug with `verbose`.
fn export_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = if verbose {
            "rocketchat_user_export=debug,info"
        } else {
            "rocketchat_user_export=info"
        };
        EnvFilter::new(directive)
    })
}

/// Compact human-readable progress lines.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(export_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

/// One JSON object per event, for log collectors.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(export_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filter_levels() {
        // only meaningful when the environment does not override it
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(export_filter(false)
            .to_string()
            .contains("rocketchat_user_export=info"));
        assert!(export_filter(true)
            .to_string()
            .contains("rocketchat_user_export=debug"));
    }
}
