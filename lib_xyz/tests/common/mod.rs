#![allow(dead_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// 2x2 RGBA buffer with two distinct colors, fully opaque.
pub fn two_color_rgba() -> (u16, u16, Vec<u8>) {
    let data = vec![
        255, 0, 0, 255, // Red
        255, 0, 0, 255, // Red
        0, 0, 255, 255, // Blue
        255, 0, 0, 255, // Red
    ];
    (2, 2, data)
}

/// 16x16 grayscale gradient: exactly 256 distinct colors, the format's
/// maximum.
pub fn gradient_rgba() -> (u16, u16, Vec<u8>) {
    let mut data = Vec::with_capacity(256 * 4);
    for i in 0..256u32 {
        data.extend_from_slice(&[i as u8, i as u8, i as u8, 255]);
    }
    (16, 16, data)
}

/// Fresh per-test scratch directory under the system temp dir.
pub fn temp_root(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("lib-xyz-{}-{}", name, process::id()));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_png(path: &Path, width: u32, height: u32, rgba: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image::save_buffer(path, rgba, width, height, image::ExtendedColorType::Rgba8).unwrap();
}

pub fn write_xyz(path: &Path, width: u16, height: u16, rgba: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let encoded = lib_xyz::encode(width, height, rgba).unwrap();
    fs::write(path, encoded).unwrap();
}
