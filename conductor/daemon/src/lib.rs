//! GALAXRX Server
//!
//! HTTP daemon for the landing site's contact form. The router lives here so
//! integration tests can drive it without binding a socket.

pub mod server;

pub use server::{router, serve, AppState};
