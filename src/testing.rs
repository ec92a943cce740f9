//! Shared helpers for unit tests.

use std::sync::Once;

pub const ACCESS_SECRET: &str = "unit-test-access-secret";
pub const REFRESH_SECRET: &str = "unit-test-refresh-secret";

static INIT: Once = Once::new();

/// Point the config singleton at known token secrets. Must run before the
/// first `config()` access in any test that verifies or mints tokens.
pub fn init_config() {
    INIT.call_once(|| {
        std::env::set_var("ACCESS_TOKEN_SECRET", ACCESS_SECRET);
        std::env::set_var("REFRESH_TOKEN_SECRET", REFRESH_SECRET);
    });
    let _ = crate::config::config();
}
