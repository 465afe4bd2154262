pub mod common;
pub mod coords;
pub mod data;
pub mod lookup;
pub mod mapper;
pub mod server;
pub mod static_data;
