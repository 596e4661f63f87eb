//! Pricing engine: bracket classification, age weighting and cost quotation.

pub mod age;
pub mod brackets;
pub mod engine;

pub use engine::{compute_cost, Parameter, ParameterLookup, Quote, QuoteRequest};
