// src/util/mod.rs
pub mod ids;
pub mod nullable;
pub mod testing;
pub mod text;
