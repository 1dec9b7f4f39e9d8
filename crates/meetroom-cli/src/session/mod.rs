//! Credential file location.

pub mod storage;
