//! # 位流编解码模块
//!
//! 在 8-bit 通道值、定宽整数字段、像素序列与扁平位序列之间做无损转换。
//! 位序列中的每个元素都是 0 或 1，按大端序 (最高位在前) 排列。

use crate::constants::{BITS_PER_CHANNEL, BITS_PER_PIXEL};
use crate::pixels::PixelBuffer;

/// 扁平的位序列，元素取值为 0 或 1。
pub type BitSequence = Vec<u8>;

/// 将一个通道值转换为 8 个大端序位。
pub fn int_to_bits(value: u8) -> [u8; BITS_PER_CHANNEL] {
    std::array::from_fn(|i| (value >> (BITS_PER_CHANNEL - 1 - i)) & 1)
}

/// [`int_to_bits`] 的逆运算。只使用每个元素的最低位。
pub fn bits_to_int(bits: &[u8; BITS_PER_CHANNEL]) -> u8 {
    bits.iter().fold(0, |acc, &bit| (acc << 1) | (bit & 1))
}

/// 将 `value` 的低 `width` 位编码为定宽大端序位序列。
///
/// 超出 `width` 的高位会被丢弃，调用方需事先确认取值范围。
pub fn uint_to_bits(value: u32, width: u8) -> BitSequence {
    (0..width)
        .rev()
        .map(|shift| ((u64::from(value) >> shift) & 1) as u8)
        .collect()
}

pub fn bits_to_uint(bits: &[u8]) -> u32 {
    bits.iter().fold(0, |acc, &bit| (acc << 1) | u32::from(bit & 1))
}

/// 依次拼接每个像素的 `int_to_bits(r) ++ int_to_bits(g) ++ int_to_bits(b)`。
///
/// 结果长度恰好为 `24 * width * height`。
pub fn pixels_to_bits(buffer: &PixelBuffer) -> BitSequence {
    buffer
        .channels()
        .iter()
        .flat_map(|&channel| int_to_bits(channel))
        .collect()
}

/// 每 24 位还原为一个 RGB 像素。末尾不足 24 位的部分会被忽略。
pub fn bits_to_pixels(bits: &[u8]) -> Vec<[u8; 3]> {
    bits.chunks_exact(BITS_PER_PIXEL)
        .map(|pixel| {
            std::array::from_fn(|c| {
                let start = c * BITS_PER_CHANNEL;
                let mut byte = [0u8; BITS_PER_CHANNEL];
                byte.copy_from_slice(&pixel[start..start + BITS_PER_CHANNEL]);
                bits_to_int(&byte)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpliceError;

    #[test]
    fn int_to_bits_is_big_endian() {
        assert_eq!(int_to_bits(0b1000_0001), [1, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(int_to_bits(6), [0, 0, 0, 0, 0, 1, 1, 0]);
        assert_eq!(int_to_bits(255), [1; 8]);
    }

    #[test]
    fn every_byte_survives_round_trip() {
        for value in 0..=u8::MAX {
            assert_eq!(bits_to_int(&int_to_bits(value)), value, "value {value}");
        }
    }

    #[test]
    fn fixed_width_fields() {
        assert_eq!(uint_to_bits(5, 4), vec![0, 1, 0, 1]);
        assert_eq!(uint_to_bits(8191, 13), vec![1; 13]);
        assert_eq!(bits_to_uint(&uint_to_bits(4000, 13)), 4000);
        assert_eq!(bits_to_uint(&[]), 0);
    }

    #[test]
    fn pixels_to_bits_has_24_bits_per_pixel() -> Result<(), SpliceError> {
        let buffer = PixelBuffer::new(2, 1, vec![[255, 0, 1], [128, 2, 3]])?;
        let bits = pixels_to_bits(&buffer);

        assert_eq!(bits.len(), 48);
        assert_eq!(&bits[..8], &[1; 8]);
        assert_eq!(&bits[8..16], &[0; 8]);
        assert_eq!(&bits[16..24], &[0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(&bits[24..32], &[1, 0, 0, 0, 0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn bits_to_pixels_inverts_pixels_to_bits() -> Result<(), SpliceError> {
        let pixels = vec![[12, 34, 56], [78, 90, 210], [0, 255, 7]];
        let buffer = PixelBuffer::new(3, 1, pixels.clone())?;
        assert_eq!(bits_to_pixels(&pixels_to_bits(&buffer)), pixels);
        Ok(())
    }
}
