//! Startup logging.

use log::info;
use std::net::SocketAddr;

use crate::config::Config;

/// Logs where the server listens and which limits apply.
pub fn log_startup(config: &Config, addr: SocketAddr) {
    info!("Book API listening on http://{}/api/books", addr);
    if config.rate_limit == 0 {
        info!("  - Rate limiting: disabled");
    } else {
        info!(
            "  - Rate limiting: {} requests per {}s per client and route group",
            config.rate_limit,
            config.rate_window.as_secs_f64()
        );
    }
    match config.evict_interval {
        Some(every) => info!(
            "  - Expired counters swept every {}s",
            every.as_secs_f64()
        ),
        None => info!("  - Expired counters are never swept"),
    }
    info!(
        "  - Catalogue: {} books, page size {}",
        config.seed_books, config.page_size
    );
}
