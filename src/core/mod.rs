//! Core domain logic

pub mod batch;
