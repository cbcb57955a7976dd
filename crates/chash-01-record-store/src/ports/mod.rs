//! Ports module for the Record Store

pub mod inbound;

pub use inbound::RecordStoreApi;
