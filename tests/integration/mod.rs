//! Integration tests for the fileguard integrity checker

mod baseline_store;
mod digest_verification;
mod path_keys;
mod scanner_behavior;
