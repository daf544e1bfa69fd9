#![allow(dead_code)]

pub mod client;
pub mod nuggets;
pub mod protocol;
pub mod server;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::collections::BTreeMap;
    }
}

pub mod prelude {
    pub use super::client::*;
    pub use super::nuggets::prelude::*;
    pub use super::protocol::*;
    pub use super::server::*;
    pub use super::utils::prelude::*;
}
