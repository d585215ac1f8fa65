//! Application layer: editing, validation, saving, and file transfer

pub mod editor;
pub mod validation;
pub mod service;
pub mod transfer;
pub mod preview;
