//! # 像素缓冲区模块
//!
//! 隐写核心只处理已解码的 8-bit RGB 像素，不关心文件格式。
//! 读写图像文件由外部 (`handler`) 负责，这里只提供与 `image::RgbImage` 之间的转换。

use crate::error::SpliceError;
use image::RgbImage;

/// 按行优先顺序排列的 RGB 像素，以及图像的宽高。
///
/// 通过 [`PixelBuffer::new`] 构造时保证 `pixels.len() == width * height`
/// 且宽高均大于 0。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PixelBuffer {
    /// 构造像素缓冲区并校验其形状。
    ///
    /// # Errors
    ///
    /// * 宽或高为 0 时返回 [`SpliceError::EmptyBuffer`]。
    /// * 像素数量与 `width * height` 不符时返回 [`SpliceError::ShapeMismatch`]。
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Result<Self, SpliceError> {
        if width == 0 || height == 0 {
            return Err(SpliceError::EmptyBuffer { width, height });
        }

        if u64::from(width) * u64::from(height) != pixels.len() as u64 {
            return Err(SpliceError::ShapeMismatch {
                width,
                height,
                pixels: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 用同一种颜色填充整幅图像。
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Result<Self, SpliceError> {
        let count = usize::try_from(u64::from(width) * u64::from(height)).map_err(|_| {
            SpliceError::ShapeMismatch {
                width,
                height,
                pixels: 0,
            }
        })?;
        Self::new(width, height, vec![color; count])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 像素总数。
    pub fn len(&self) -> u64 {
        self.pixels.len() as u64
    }

    /// 构造时已保证非空，恒为 `false`。
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// 展平后的通道序列：`r, g, b, r, g, b, ...`
    pub fn channels(&self) -> &[u8] {
        self.pixels.as_flattened()
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [u8] {
        self.pixels.as_flattened_mut()
    }
}

impl TryFrom<RgbImage> for PixelBuffer {
    type Error = SpliceError;

    fn try_from(image: RgbImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|pixel| pixel.0).collect();
        Self::new(width, height, pixels)
    }
}

impl TryFrom<PixelBuffer> for RgbImage {
    type Error = SpliceError;

    fn try_from(buffer: PixelBuffer) -> Result<Self, Self::Error> {
        let (width, height) = (buffer.width, buffer.height);
        let pixels = buffer.pixels.len();
        RgbImage::from_raw(width, height, buffer.pixels.into_flattened()).ok_or(
            SpliceError::ShapeMismatch {
                width,
                height,
                pixels,
            },
        )
    }
}
