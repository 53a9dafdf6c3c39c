mod storage;

pub use storage::{fs_store::FileSystemStore, previous::PreviousData};
