pub mod config;
pub mod console;
pub mod menu;
pub mod nav;
pub mod notifications;
pub mod server;
pub mod settings;
#[doc(hidden)]
pub mod test_support;
