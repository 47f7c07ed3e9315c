pub mod achievements;
pub mod catalog;
pub mod cli;
pub mod detect;
pub mod error;
pub mod ledger;
pub mod metadata;
pub mod selector;
pub mod session;
pub mod storage;
pub mod types;
