pub mod check;
pub mod completion;
pub mod config;
pub mod contact;
pub mod copyright;
