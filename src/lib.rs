//! # lsb_splice 库
//!
//! 本库包含图像 LSB 隐写工具的核心逻辑：位流编解码、像素缓冲区，
//! 以及把一幅图像拼接进另一幅图像最低有效位的隐写算法。

// 声明库包含的所有模块。

pub mod bitstream;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod pixels;
pub mod steganography;

pub use config::HeaderWidth;
pub use error::SpliceError;
pub use pixels::PixelBuffer;
pub use steganography::{decode, encode, validate_capacity};
