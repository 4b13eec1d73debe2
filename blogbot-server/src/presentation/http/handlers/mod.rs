pub(crate) mod posts;
pub(crate) mod system;
