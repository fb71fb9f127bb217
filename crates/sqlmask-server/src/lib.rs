pub mod server;

pub use server::{MaskServer, ServerOptions};
