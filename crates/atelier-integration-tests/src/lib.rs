//! This crate exists solely to host cross-crate integration tests; see
//! the `tests/` directory.
