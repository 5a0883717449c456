pub mod budget;
pub mod chunker;
pub mod compact;
pub mod formatter;
pub mod gather;
pub mod symbols;
pub mod tree;
pub mod types;
pub mod xml;
