use acctreg_core::Clock;
use acctreg_db::SqlitePool;

use super::Settings;

pub(crate) struct CommandContext<'a> {
    pub pool: &'a SqlitePool,
    pub settings: &'a Settings,
    pub clock: &'a dyn Clock,
}
