//! Scanner module: Directory listing and filename canonicalization
//!
//! Responsible for enumerating the direct entries of one directory,
//! keeping regular files, and mapping each raw filename to the ASCII key
//! it is stored under in the manifest.

mod normalize;
mod walker;

pub use normalize::{NormalizedName, normalize, normalize_os};
pub use walker::{DirEntry, DirectoryWalker, Listing};
