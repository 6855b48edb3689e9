//! trivio-engine: trivia duel core modules

pub mod bank;
pub mod duel;
pub mod errors;
pub mod logger;
pub mod participant;
pub mod question;
pub mod rules;
