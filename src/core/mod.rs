//! Core data types for accessions and genome metadata.

pub mod accession;
pub mod genome;
