macro_rules! query {
    ($sql:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut q = sqlx_core::query::query::<sqlx_sqlite::Sqlite>($sql);
        $(q = q.bind($arg);)*
        q
    }};
}

macro_rules! query_as {
    ($ty:ty, $sql:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut q = sqlx_core::query_as::query_as::<sqlx_sqlite::Sqlite, $ty>($sql);
        $(q = q.bind($arg);)*
        q
    }};
}

macro_rules! query_scalar {
    ($ty:ty, $sql:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut q = sqlx_core::query_scalar::query_scalar::<sqlx_sqlite::Sqlite, $ty>($sql);
        $(q = q.bind($arg);)*
        q
    }};
}

mod account_repo;
mod store;

pub use account_repo::AccountRepo;
