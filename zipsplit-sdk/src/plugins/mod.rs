pub mod archiver;
pub mod partitioner;
pub mod selector;
