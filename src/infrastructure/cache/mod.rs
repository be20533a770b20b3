//! Cache file infrastructure module

mod scratch_dir;

pub use scratch_dir::ScratchDirCache;
