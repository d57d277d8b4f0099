pub mod address;
pub mod errors;
pub mod list;
pub mod network;
pub mod provider;
pub mod raw_token;
pub mod token;

pub use address::*;
pub use list::*;
pub use network::*;
pub use provider::*;
pub use raw_token::*;
pub use token::*;
