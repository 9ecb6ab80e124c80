//! # 错误类型模块
//!
//! 定义隐写核心 (编解码与拼接) 可能返回的所有错误。
//! 每个变体都携带足以诊断问题的数值 (期望值与实际值)，无需重新运行即可定位原因。

use thiserror::Error;

/// 隐写核心操作失败时返回的错误。
///
/// 所有错误都会中止当前操作，不会返回部分结果。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpliceError {
    /// 负载图像的宽或高无法用头部位宽表示。
    #[error("payload of {width}x{height} exceeds the header limit of {max}x{max}")]
    PayloadTooLarge { width: u32, height: u32, max: u32 },

    /// 载体图像的像素不足以容纳头部与负载。
    #[error("carrier too small: {required} pixels required, {available} available")]
    CarrierTooSmall { required: u64, available: u64 },

    /// 头部解析出的尺寸为 0 或超出上限，图像中很可能没有隐藏数据。
    #[error("invalid header: decoded payload size {width}x{height} (allowed 1..={max})")]
    InvalidHeader { width: u32, height: u32, max: u32 },

    /// 头部声明的负载超出了图像实际能承载的范围。
    #[error(
        "header declares a {width}x{height} payload needing {required} pixels, image has {available}"
    )]
    TruncatedPayload {
        width: u32,
        height: u32,
        required: u64,
        available: u64,
    },

    /// 所需的载体像素数超出 `u64` 范围 (溢出)。
    #[error("a {width}x{height} payload overflows the carrier pixel count")]
    PixelCountOverflow { width: u32, height: u32 },

    /// 像素数量与声明的宽高不一致。
    #[error("shape mismatch: a {width}x{height} buffer cannot hold {pixels} pixels")]
    ShapeMismatch { width: u32, height: u32, pixels: usize },

    /// 宽或高为 0。
    #[error("empty pixel buffer: {width}x{height}")]
    EmptyBuffer { width: u32, height: u32 },

    /// 头部位宽不在允许范围内。
    #[error("header width of {bits} bits is outside the supported range 1..=31")]
    InvalidHeaderWidth { bits: u8 },
}
