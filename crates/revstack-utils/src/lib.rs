pub mod error;
pub mod output;
pub mod subprocess;

// Re-export core types at crate root for convenience
pub use bstr::{BStr, BString, ByteSlice};
pub use error::UtilError;
pub use subprocess::{CommandOutput, VcsCommand};

pub type Result<T> = std::result::Result<T, UtilError>;
