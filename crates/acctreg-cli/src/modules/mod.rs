pub(crate) mod maintenance;
pub(crate) mod retry;
pub(crate) mod system;
