//! The utilities module provides general capabilities that span the input
//! modeling, models, output analysis, and simulator modules: the error
//! type, logging setup, and debugging support for WASM builds.

pub mod errors;
pub mod logging;

/// When the `console_error_panic_hook` feature is enabled, we can call the
/// `set_panic_hook` function at least once during initialization, and then
/// we will get better error messages if our code ever panics.
///
/// For more details see
/// <https://github.com/rustwasm/console_error_panic_hook#readme>
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
