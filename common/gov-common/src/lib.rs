#![no_std]

pub mod elector;
pub mod errors;
pub mod monitors_gov_proxy;
pub mod operators_gov_proxy;
pub mod pubkey;
pub mod slot_arena;
