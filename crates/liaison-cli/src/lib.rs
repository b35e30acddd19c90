//! Liaison CLI library.
//!
//! This crate provides the command-line interface and the interactive
//! agenda REPL for Liaison.

pub mod cli;
pub mod commands;
pub mod repl;
