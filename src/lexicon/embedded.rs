//! Embedded puzzle data
//!
//! Word lists, equations and sentences compiled into the binary at build time.

// Include generated lists from build script
include!(concat!(env!("OUT_DIR"), "/answers.rs"));
include!(concat!(env!("OUT_DIR"), "/allowed.rs"));
include!(concat!(env!("OUT_DIR"), "/equations.rs"));
include!(concat!(env!("OUT_DIR"), "/feudle.rs"));
