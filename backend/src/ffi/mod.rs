//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings exposing the lock-free engine to Python.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: only the draws and seeding operations
//! 2. **Simple types**: ints, floats, bools and JSON strings
//! 3. **Safe errors**: Rust errors become `ValueError`

pub mod random;
