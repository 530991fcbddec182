pub mod config;
pub mod controller;
pub mod helpers;
pub mod models;
pub mod repositories;
pub mod services;
#[cfg(test)]
pub mod test_support;
