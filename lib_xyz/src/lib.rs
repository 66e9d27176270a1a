pub mod batch;
pub mod codec;
pub mod palette;
pub mod progress;
pub mod quantize;

use log::*;
use std::io::Write;

pub use crate::codec::format::XyzImage;
pub use crate::codec::{decode, encode};

pub fn init_logging() {
    env_logger::Builder::new()
        .filter(Some("lib_xyz"), LevelFilter::Debug)
        .filter(None, LevelFilter::Info)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
