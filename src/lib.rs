//! Core library for the jsonld-lite command line application.
//!
//! The library exposes the building blocks used to turn stored settings and
//! testimonial content into a schema.org structured data document. The
//! modules are structured to keep responsibilities narrow and composable:
//! string field parsers live under [`jsonld::lite::parse`], the typed output
//! document inside [`jsonld::lite::model`], entity assembly in
//! [`jsonld::lite::build`], and the render orchestration under
//! [`jsonld::lite::render`].

pub mod jsonld;

pub use jsonld::lite::{JsonLdError, Result, build, error, model, parse, render, settings, store};
