use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Set `ACCOUNT_SYNC_LOG_JSON=1`
/// for JSON lines instead of human readable output. Calling this twice is harmless.
pub fn init_logging() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let use_json = std::env::var("ACCOUNT_SYNC_LOG_JSON")
		.map(|value| value == "1")
		.unwrap_or(false);

	if use_json {
		let _ = fmt::Subscriber::builder()
			.with_env_filter(env_filter)
			.json()
			.with_writer(std::io::stderr)
			.try_init();
	} else {
		let _ = fmt::Subscriber::builder()
			.with_env_filter(env_filter)
			.with_target(false)
			.with_thread_ids(false)
			.with_thread_names(false)
			.with_file(false)
			.with_line_number(false)
			.with_timer(fmt::time::time())
			.with_writer(std::io::stderr)
			.try_init();
	}
}
