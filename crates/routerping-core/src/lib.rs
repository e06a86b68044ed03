pub mod classifier;
pub mod config;
pub mod cycle;
pub mod elapsed;
pub mod error;
pub mod history;
pub mod io;
pub mod localtime;
pub mod notify;
pub mod paths;
pub mod policy;
pub mod probe;
pub mod record;
pub mod types;

pub use error::{PingError, Result};
