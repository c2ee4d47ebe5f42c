//! Request/Response DTOs

pub mod travel;
