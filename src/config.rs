//! # 配置模块
//!
//! 隐写格式唯一的可配置参数：头部位宽 `W`。
//! 该值不会写入图像本身，隐藏与恢复时必须使用相同的值。

use crate::constants::{DEFAULT_HEADER_WIDTH, MAX_HEADER_WIDTH};
use crate::error::SpliceError;
use std::fmt;
use std::str::FromStr;

/// 头部中宽度、高度字段各自占用的位数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderWidth(u8);

impl HeaderWidth {
    /// 位数。
    pub fn bits(self) -> u8 {
        self.0
    }

    /// 头部占用的载体像素数 (每个像素存宽、高各 1 bit)。
    pub fn pixels(self) -> u64 {
        u64::from(self.0)
    }

    /// 可表示的最大尺寸，即 `2^W - 1`。
    pub fn max_dimension(self) -> u32 {
        ((1u64 << self.0) - 1) as u32
    }
}

impl Default for HeaderWidth {
    fn default() -> Self {
        Self(DEFAULT_HEADER_WIDTH)
    }
}

impl TryFrom<u8> for HeaderWidth {
    type Error = SpliceError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if (1..=MAX_HEADER_WIDTH).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(SpliceError::InvalidHeaderWidth { bits })
        }
    }
}

impl FromStr for HeaderWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("'{s}' is not a valid bit count"))?;
        Self::try_from(bits).map_err(|e| e.to_string())
    }
}

impl fmt::Display for HeaderWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
