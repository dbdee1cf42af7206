//! Free text to canonical market symbol

pub mod resolver;
pub mod tables;

pub use resolver::{ResolutionStrategy, ResolvedSymbol, SymbolResolver};
