//! Channels example: filter, colors and elapsed time on stderr
//!
//! This example creates a few channels under different namespaces and
//! shows which of them print for a given filter.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channels -- "worker:*,-worker:noisy"
//! ```
//!
//! Filter state is kept in a file store under the system temp directory,
//! so running again without an argument reuses the last filter.

use std::env;
use std::thread;
use std::time::Duration;

use nsdebug::{Arg, DebugBuilder, FileStorage, emit};

fn main() {
    // Initialize logging (set RUST_LOG=trace to see filter and storage diagnostics)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let store = FileStorage::new(env::temp_dir().join("nsdebug-example"));
    let mut builder = DebugBuilder::new().storage(store);
    if let Some(filter) = env::args().nth(1) {
        builder = builder.filter(filter);
    }
    let debug = builder.build();

    println!("Filter: '{}' ({} output)", debug.filter().raw(), debug.mode_name());
    println!("{}", "-".repeat(50));

    let queue = debug.create("worker:queue");
    let noisy = debug.create("worker:noisy");
    let http = debug.create("http");
    let request = http.extend("request");

    for job in 1..=3 {
        emit!(queue, "picked job %d", job);
        emit!(noisy, "polling...");
        thread::sleep(Duration::from_millis(120 * job));
    }

    emit!(request, "GET %s -> %d", "/health", 200);

    let err = std::io::Error::other("connection refused");
    queue.log([Arg::error(&err)]);

    println!("{}", "-".repeat(50));
    for channel in [&queue, &noisy, &http, &request] {
        println!(
            "{:<16} {}",
            channel.name(),
            if channel.is_enabled() { "enabled" } else { "disabled" }
        );
    }
}
