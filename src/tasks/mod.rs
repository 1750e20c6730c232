//! Background tasks module
//! 
//! This module contains the tick loop behind every countdown and the tasks
//! that run alongside the HTTP server.

pub mod tick_loop;
pub mod title_updates;

// Re-export main functions
pub use tick_loop::tick_loop_task;
pub use title_updates::title_update_task;
