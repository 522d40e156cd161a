pub mod order_memory;

// Re-export commonly used types
pub use order_memory::OrderMemory;
