//! Client core of the Qamqor Vision monitoring platform: typed gateway
//! clients, the persisted session, and the view models behind the sign-in,
//! registration, institutions and user management screens. Shells own the
//! routing and markup; everything here is framework state and IO.

pub mod api;
pub mod config;
pub mod pages;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Routes `log` output to the browser console and upgrades panics to
/// readable stack traces. Shells call this once before mounting anything.
#[cfg(target_arch = "wasm32")]
pub fn init_browser() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}
