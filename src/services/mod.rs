pub(crate) mod merging;
