//! Interactive game adapters

pub mod presenter;
