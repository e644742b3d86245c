//! Log bridge example: route `log` macros through channel filters
//!
//! Records are printed on the channel named after their target, so
//! module paths become namespaces.
//!
//! # Usage
//!
//! ```bash
//! DEBUG="log_bridge::*" cargo run --example log_bridge
//! ```

use log::{debug, info};
use nsdebug::{DebugBuilder, EnvStorage, LogBridge};

mod database {
    pub fn connect(url: &str) {
        log::info!("connecting to {}", url);
        log::debug!("pool size {}", 8);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let context = DebugBuilder::new().storage(EnvStorage::default()).build();
    let filter = context.filter();
    LogBridge::new(context).install()?;

    println!("Filter from DEBUG: '{}'", filter.raw());

    info!("starting up");
    database::connect("postgres://localhost/app");
    debug!("ready");

    Ok(())
}
