/// 每个颜色通道的位数。
pub const BITS_PER_CHANNEL: usize = 8;

/// 每个像素的颜色通道数 (R, G, B)。
pub const CHANNELS_PER_PIXEL: usize = 3;

/// 每个负载像素序列化后的位数。
/// 3 个通道 × 8 bits = 24 bits。
pub const BITS_PER_PIXEL: usize = BITS_PER_CHANNEL * CHANNELS_PER_PIXEL;

/// 每个负载像素需要的载体像素数。
/// 每个载体像素的 R、G、B 最低位各存 1 bit，因此 24 / 3 = 8 个载体像素。
pub const CARRIER_PIXELS_PER_PAYLOAD_PIXEL: u64 = (BITS_PER_PIXEL / CHANNELS_PER_PIXEL) as u64;

/// 头部位宽的默认值。
/// 13 bits 意味着负载的宽高最大为 8191。
pub const DEFAULT_HEADER_WIDTH: u8 = 13;

/// 头部位宽允许的最大值，保证 `2^W` 仍能放进 `u32`。
pub const MAX_HEADER_WIDTH: u8 = 31;

/// 头部中存放宽度的通道下标 (绿色)。
pub const WIDTH_CHANNEL: usize = 1;

/// 头部中存放高度的通道下标 (蓝色)。
pub const HEIGHT_CHANNEL: usize = 2;

/// 未指定输出路径时，隐写结果图像的文件名前缀。
pub const HIDDEN_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复出的负载图像的文件名前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";

/// 默认输出文件的扩展名。
pub const DEFAULT_EXTENSION: &str = "png";
