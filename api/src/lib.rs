//! HTTP access to the mock REST API that holds Koinsave's `users` and `transactions`
//! collections. [`HttpBackend`] implements [`app::backend::Backend`] on top of `reqwest`.

mod client;
mod error;

pub use client::HttpBackend;
pub use error::Error;

/// The hosted mock API the application was built against.
pub const DEFAULT_BASE_URL: &str = "https://691adb2c2d8d7855757071e9.mockapi.io";
