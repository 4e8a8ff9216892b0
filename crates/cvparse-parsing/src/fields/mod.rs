//! Field-level extractors, each pulling one slice of the structured CV
//! out of the raw transcript.

pub mod certifications;
pub mod contact;
pub mod entries;
pub mod languages;
pub mod name;
pub mod skills;
pub mod summary;
