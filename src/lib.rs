//! Client SDK for the AutoQuiz API: quiz authoring, the quiz dashboard and
//! the HTTP client they submit through.

pub mod config;
pub mod logging;
pub mod quiz;
