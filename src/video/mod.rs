pub mod tools;
pub mod probe;
pub mod frame_stream;
pub mod processor;
pub mod task;

pub use processor::*;
pub use task::*;
