pub(crate) mod csv_tables;
pub(crate) mod fs_store;
pub(crate) mod previous;
