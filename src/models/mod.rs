// src/models/mod.rs

pub mod profile;
pub mod question;
pub mod quiz_record;
pub mod session;
