//! datachore-cli library: HTTP server, commands and env loading, exposed for tests.

pub mod commands;
pub mod http;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
