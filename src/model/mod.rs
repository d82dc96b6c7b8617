//! Diagram marshalling
//!
//! Reads DMN documents into diagram graphs and writes them back.

pub mod marshaller;

pub use marshaller::{DMNMarshaller, MarshalError};
