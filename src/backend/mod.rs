//! Account service client module

mod local;
mod traits;

pub use local::LocalBackend;
pub use traits::{AccountBackend, BackendError};

#[cfg(test)]
pub use traits::MockAccountBackend;
