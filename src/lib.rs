//! Compare air, sea and rail freight options between two cities by cost,
//! transit time and emissions, using a static rate table.

pub mod config;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod util;
