mod actions;
pub(crate) mod args;

pub(crate) use actions::{handle_enable_all, handle_purge_disabled, handle_stats};
