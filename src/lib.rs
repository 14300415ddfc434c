//! Fogrounder provides the instance generators and the ground translator used to ground an extended first-order logic.

#![warn(missing_docs)]

pub mod generators;

pub mod structure;

pub mod theory;

pub mod translation;

pub mod utils;
