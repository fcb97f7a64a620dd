//! Learning modules built on the levelmark core: vocabulary flashcards,
//! graded bilingual reading, and the achievement poster.

pub mod error;
pub mod flashcard;
pub mod poster;
pub mod reading;
pub mod vocab;
