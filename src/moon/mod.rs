// src/moon/mod.rs
pub mod client;
