//! Atlas library exports: country data client, search, and config.

pub mod cli;
pub mod config;
pub mod countries;

#[cfg(test)]
pub mod test_support;
