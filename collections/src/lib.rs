#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod block_list;
pub mod config;
pub mod generational_arena;
pub mod memory_block;

pub use block_list::{BlockList, NodeRef};
pub use config::ListConfig;
pub use memory_block::MemoryBlock;
