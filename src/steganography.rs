//! # 隐写拼接模块
//!
//! 把一幅负载图像的尺寸与像素逐位写入载体图像 R、G、B 通道的最低有效位，
//! 以及相反的提取过程。
//!
//! ## 布局
//!
//! * 头部：前 `W` 个像素。像素 `i` 的绿色最低位存宽度的第 `i` 位，
//!   蓝色最低位存高度的第 `i` 位 (均为 `W` 位大端序)。红色通道保持不变。
//! * 负载：从像素 `W` 开始，每个像素的 R、G、B 最低位依次存 3 位负载数据。
//!
//! 因此需要的载体像素数为 `W + 8 * 负载宽 * 负载高`。

use crate::bitstream::{BitSequence, bits_to_pixels, bits_to_uint, pixels_to_bits, uint_to_bits};
use crate::config::HeaderWidth;
use crate::constants::{
    BITS_PER_PIXEL, CARRIER_PIXELS_PER_PAYLOAD_PIXEL, CHANNELS_PER_PIXEL, HEIGHT_CHANNEL,
    WIDTH_CHANNEL,
};
use crate::error::SpliceError;
use crate::pixels::PixelBuffer;
use log::debug;

/// 容量校验的结果，单位为载体像素。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub required: u64,
    pub available: u64,
}

/// 从 `offset` 开始，每隔 `step` 个通道写入一位，替换该通道的最低位。
pub fn modify(
    bits: &[u8],
    channels: &mut [u8],
    offset: usize,
    step: usize,
) -> Result<(), SpliceError> {
    check_region(channels.len(), offset, step, bits.len())?;

    channels
        .iter_mut()
        .skip(offset)
        .step_by(step)
        .zip(bits)
        .for_each(|(channel, &bit)| *channel = (*channel & 0xFE) | (bit & 1));

    Ok(())
}

/// 从 `offset` 开始，每隔 `step` 个通道读取一个最低位，共 `count` 位。
pub fn recover(
    channels: &[u8],
    offset: usize,
    step: usize,
    count: usize,
) -> Result<BitSequence, SpliceError> {
    check_region(channels.len(), offset, step, count)?;

    Ok(channels
        .iter()
        .skip(offset)
        .step_by(step)
        .take(count)
        .map(|&channel| channel & 1)
        .collect())
}

fn check_region(len: usize, offset: usize, step: usize, count: usize) -> Result<(), SpliceError> {
    if count == 0 {
        return Ok(());
    }

    let end = (count - 1)
        .checked_mul(step)
        .and_then(|span| span.checked_add(offset))
        .and_then(|last| last.checked_add(1));

    match end {
        Some(end) if end <= len => Ok(()),
        _ => Err(SpliceError::CarrierTooSmall {
            required: end.map_or(u64::MAX, |end| end.div_ceil(CHANNELS_PER_PIXEL) as u64),
            available: (len / CHANNELS_PER_PIXEL) as u64,
        }),
    }
}

/// 头部加负载所需的载体像素数。溢出 `u64` 时返回 `None`。
pub fn required_pixels(width: u32, height: u32, header_width: HeaderWidth) -> Option<u64> {
    u64::from(width)
        .checked_mul(u64::from(height))?
        .checked_mul(CARRIER_PIXELS_PER_PAYLOAD_PIXEL)?
        .checked_add(header_width.pixels())
}

/// 只依据尺寸做容量校验，不需要实际的像素数据。
pub fn check_capacity(
    carrier_pixels: u64,
    payload_width: u32,
    payload_height: u32,
    header_width: HeaderWidth,
) -> Result<Capacity, SpliceError> {
    let max = header_width.max_dimension();
    if payload_width > max || payload_height > max {
        return Err(SpliceError::PayloadTooLarge {
            width: payload_width,
            height: payload_height,
            max,
        });
    }

    let required = required_pixels(payload_width, payload_height, header_width).ok_or(
        SpliceError::PixelCountOverflow {
            width: payload_width,
            height: payload_height,
        },
    )?;

    debug!(
        "capacity check: payload {payload_width}x{payload_height}, header {header_width} bits, \
         {required} pixels required, {carrier_pixels} available"
    );

    if carrier_pixels < required {
        return Err(SpliceError::CarrierTooSmall {
            required,
            available: carrier_pixels,
        });
    }

    Ok(Capacity {
        required,
        available: carrier_pixels,
    })
}

/// 校验载体能否容纳负载及其头部。
///
/// # Errors
///
/// * 负载宽或高 `>= 2^W` 时返回 [`SpliceError::PayloadTooLarge`]。
/// * 载体像素数少于 `W + 8 * 负载像素数` 时返回 [`SpliceError::CarrierTooSmall`]。
pub fn validate_capacity(
    carrier: &PixelBuffer,
    payload: &PixelBuffer,
    header_width: HeaderWidth,
) -> Result<Capacity, SpliceError> {
    check_capacity(
        carrier.len(),
        payload.width(),
        payload.height(),
        header_width,
    )
}

/// 载体最多能容纳的负载像素数。
pub fn max_payload_pixels(carrier: &PixelBuffer, header_width: HeaderWidth) -> u64 {
    carrier.len().saturating_sub(header_width.pixels()) / CARRIER_PIXELS_PER_PAYLOAD_PIXEL
}

/// 载体能容纳的最大正方形负载的边长，不超过头部上限 `2^W - 1`。
pub fn max_square_side(carrier: &PixelBuffer, header_width: HeaderWidth) -> u64 {
    max_payload_pixels(carrier, header_width)
        .isqrt()
        .min(u64::from(header_width.max_dimension()))
}

/// 将负载藏入载体的副本，返回隐写后的图像。原载体保持不变。
pub fn encode(
    carrier: &PixelBuffer,
    payload: &PixelBuffer,
    header_width: HeaderWidth,
) -> Result<PixelBuffer, SpliceError> {
    let mut stego = carrier.clone();
    embed(&mut stego, payload, header_width)?;
    Ok(stego)
}

/// 原地版本的 [`encode`]：直接修改 `carrier`。
///
/// 容量校验先于任何写入，失败时 `carrier` 不会被改动。
pub fn embed(
    carrier: &mut PixelBuffer,
    payload: &PixelBuffer,
    header_width: HeaderWidth,
) -> Result<(), SpliceError> {
    validate_capacity(carrier, payload, header_width)?;

    let bits = header_width.bits();
    let width_bits = uint_to_bits(payload.width(), bits);
    let height_bits = uint_to_bits(payload.height(), bits);
    let payload_bits = pixels_to_bits(payload);
    let payload_offset = usize::from(bits) * CHANNELS_PER_PIXEL;

    let channels = carrier.channels_mut();
    modify(&width_bits, channels, WIDTH_CHANNEL, CHANNELS_PER_PIXEL)?;
    modify(&height_bits, channels, HEIGHT_CHANNEL, CHANNELS_PER_PIXEL)?;
    modify(&payload_bits, channels, payload_offset, 1)?;

    debug!(
        "embedded {}x{} payload ({} bits) after a {}-pixel header",
        payload.width(),
        payload.height(),
        payload_bits.len(),
        bits
    );

    Ok(())
}

/// 从隐写图像中提取负载图像。
///
/// # Errors
///
/// * 图像像素数少于 `W` 时返回 [`SpliceError::CarrierTooSmall`]。
/// * 头部解析出的宽或高为 0 或超过 `2^W - 1` 时返回 [`SpliceError::InvalidHeader`]。
/// * 头部声明的负载超出图像容量时返回 [`SpliceError::TruncatedPayload`]。
pub fn decode(stego: &PixelBuffer, header_width: HeaderWidth) -> Result<PixelBuffer, SpliceError> {
    let bits = header_width.bits();
    let header_pixels = header_width.pixels();
    let available = stego.len();

    if available < header_pixels {
        return Err(SpliceError::CarrierTooSmall {
            required: header_pixels,
            available,
        });
    }

    let channels = stego.channels();
    let count = usize::from(bits);
    let width = bits_to_uint(&recover(channels, WIDTH_CHANNEL, CHANNELS_PER_PIXEL, count)?);
    let height = bits_to_uint(&recover(channels, HEIGHT_CHANNEL, CHANNELS_PER_PIXEL, count)?);

    debug!("header reads a {width}x{height} payload");

    let max = header_width.max_dimension();
    if width == 0 || height == 0 || width > max || height > max {
        return Err(SpliceError::InvalidHeader { width, height, max });
    }

    let required = required_pixels(width, height, header_width)
        .ok_or(SpliceError::PixelCountOverflow { width, height })?;
    if available < required {
        return Err(SpliceError::TruncatedPayload {
            width,
            height,
            required,
            available,
        });
    }

    // required <= available，而 available 来自内存中的缓冲区，不会溢出 usize
    let payload_bits = (u64::from(width) * u64::from(height)) as usize * BITS_PER_PIXEL;
    let payload = recover(channels, count * CHANNELS_PER_PIXEL, 1, payload_bits)?;

    PixelBuffer::new(width, height, bits_to_pixels(&payload))
}
