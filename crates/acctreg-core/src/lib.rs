#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod clock;
pub mod models;
pub mod refresh;
pub mod stats;

pub use crate::clock::*;
pub use crate::models::*;
pub use crate::refresh::*;
pub use crate::stats::*;
