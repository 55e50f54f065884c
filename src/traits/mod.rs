//! Core traits for service lookup.

mod resolver;

pub use resolver::{Resolver, ResolverCore};
