//! Koinsave: sign up, log in, look at a balance and history, and send money to another user by
//! email. All data lives in a mock REST API reached through [`backend::Backend`]; the only local
//! state is the session in [`session::Store`].

pub mod auth;
pub mod backend;
pub mod dashboard;
mod id;
pub mod money;
pub mod session;
pub mod transaction;
pub mod transfer;
pub mod user;

pub use dashboard::Dashboard;
pub use money::Money;
