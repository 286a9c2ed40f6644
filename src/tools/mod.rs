//! The tools module provides several helper functions for huffpack.
//!
//! The tools are:
//! - cli: Command line interface and the options it produces.
//! - data_io: Opening the input and output channels named by the options.
//! - freq_count: Frequency count of the input bytes.
//!
pub mod cli;
pub mod data_io;
pub mod freq_count;
