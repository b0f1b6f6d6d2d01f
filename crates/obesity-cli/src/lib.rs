//! Library surface of the `obesity` CLI: subcommand configuration types
//! and runners, kept out of `main.rs` so they can be integration tested.
pub mod predict;
pub mod train;
pub mod validate;
