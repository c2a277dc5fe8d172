pub mod error;
pub mod key;
pub mod node;
pub mod storage;
pub mod tree;
pub mod visitor;

pub use error::*;
pub use key::*;
pub use node::*;
pub use storage::*;
pub use tree::*;
pub use visitor::*;
