pub mod class;
pub mod edge;
pub mod graph;
pub mod builder;
pub mod analyzer;
pub mod init_entry;
pub mod services;
pub mod error;
pub mod ports;
