//! Request and response bodies

pub mod policy;
