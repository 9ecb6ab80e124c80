//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{DEFAULT_EXTENSION, HIDDEN_PREFIX, RECOVERED_PREFIX};
use crate::pixels::PixelBuffer;
use crate::steganography::{decode, encode, max_payload_pixels, max_square_side};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbImage};
use log::info;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体与负载图像、调用隐写核心函数将负载藏入载体，
/// 最后将结果写入无损格式的目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与头部位宽的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`，或目标格式不是无损格式。
/// * 无法读取或解码输入的图像文件。
/// * 负载尺寸超出头部上限，或载体没有足够的空间。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = resolve_dest(&args.carrier, args.dest, HIDDEN_PREFIX);
    let format = check_output(&dest, args.force)?;

    let started = Instant::now();
    let carrier = load_pixels(&args.carrier)?;
    let payload = load_pixels(&args.payload)?;
    info!("loaded carrier and payload in {:?}", started.elapsed());

    let splice_started = Instant::now();
    let stego = encode(&carrier, &payload, args.header_width).with_context(|| {
        format!(
            "Unable to hide the payload in the carrier. \nCarrier: {} ({}x{}), Payload: {} ({}x{})",
            args.carrier.to_string_lossy().red().bold(),
            carrier.width(),
            carrier.height(),
            args.payload.to_string_lossy().red().bold(),
            payload.width(),
            payload.height()
        )
    })?;
    info!("spliced payload in {:?}", splice_started.elapsed());

    save_pixels(stego, &dest, format)?;
    info!("hide finished in {:?}", started.elapsed());

    println!(
        "{}",
        success_message("hidden", &dest, started.elapsed())
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数重建隐藏的图像，
/// 最后将其写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与头部位宽的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`，或目标格式不是无损格式。
/// * 无法读取输入的图像文件。
/// * 图像中没有有效的头部 (很可能没有隐藏数据，或头部位宽不一致)。
/// * 无法写入到目标图像文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = resolve_dest(&args.image, args.dest, RECOVERED_PREFIX);
    let format = check_output(&dest, args.force)?;

    let started = Instant::now();
    let stego = load_pixels(&args.image)?;

    let payload = decode(&stego, args.header_width).with_context(|| {
        format!(
            "Failed to recover a hidden image from '{}' with a {}-bit header. \nThe image may not contain a hidden image or was hidden with another header width.",
            args.image.to_string_lossy().red().bold(),
            args.header_width.to_string().red().bold()
        )
    })?;
    info!(
        "recovered a {}x{} image in {:?}",
        payload.width(),
        payload.height(),
        started.elapsed()
    );

    save_pixels(payload, &dest, format)?;

    println!(
        "{}",
        success_message("recovered", &dest, started.elapsed())
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑。
///
/// 读取载体图像并报告在给定头部位宽下最多能隐藏多少像素的图像。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let carrier = load_pixels(&args.image)?;
    let pixels = max_payload_pixels(&carrier, args.header_width);
    let side = max_square_side(&carrier, args.header_width);

    println!(
        "{} ({}x{}) can hide up to {} pixels, e.g. a {} image (header: {} bits)",
        args.image.to_string_lossy().green().bold(),
        carrier.width(),
        carrier.height(),
        pixels.to_string().green().bold(),
        format!("{side}x{side}").green().bold(),
        args.header_width
    );
    Ok(())
}

/// 操作成功后向用户展示的提示，包含输出路径与耗时。
fn success_message(action: &str, dest: &Path, elapsed: Duration) -> String {
    format!(
        "The image has been successfully {action} and saved: {} ({})",
        dest.to_string_lossy().green().bold(),
        format!("{elapsed:.2?}").cyan()
    )
}

/// 未指定输出路径时，在输入文件同目录下生成 `<前缀><名称>.png`。
fn resolve_dest(input: &Path, dest: Option<PathBuf>, prefix: &str) -> PathBuf {
    dest.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{prefix}{stem}.{DEFAULT_EXTENSION}"))
    })
}

/// 检查输出路径：不得覆盖已有文件 (除非 `force`)，且必须是无损格式。
/// 有损格式会破坏最低位中的数据。
fn check_output(dest: &Path, force: bool) -> Result<ImageFormat> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );

    let format = ImageFormat::from_path(dest).with_context(|| {
        format!(
            "Unable to determine the image format of: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    anyhow::ensure!(
        matches!(
            format,
            ImageFormat::Png
                | ImageFormat::Bmp
                | ImageFormat::Tiff
                | ImageFormat::WebP
                | ImageFormat::Qoi
        ),
        "Output format {:?} is not lossless and would destroy the hidden data: {}",
        format,
        dest.to_string_lossy().red().bold()
    );

    Ok(format)
}

fn load_pixels(path: &Path) -> Result<PixelBuffer> {
    let image = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    PixelBuffer::try_from(image.into_rgb8()).with_context(|| {
        format!(
            "Image has no pixels: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn save_pixels(buffer: PixelBuffer, path: &Path, format: ImageFormat) -> Result<()> {
    RgbImage::try_from(buffer)?
        .save_with_format(path, format)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                path.to_string_lossy().red().bold()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_destination_sits_next_to_input() {
        let dest = resolve_dest(Path::new("/tmp/pics/cat.bmp"), None, HIDDEN_PREFIX);
        assert_eq!(dest, PathBuf::from("/tmp/pics/doctored_cat.png"));
    }

    #[test]
    fn explicit_destination_wins() {
        let explicit = PathBuf::from("out/result.bmp");
        let dest = resolve_dest(Path::new("cat.png"), Some(explicit.clone()), RECOVERED_PREFIX);
        assert_eq!(dest, explicit);
    }

    #[test]
    fn success_message_reports_elapsed_time() {
        let message = success_message(
            "hidden",
            Path::new("out/doctored_cat.png"),
            Duration::from_millis(1500),
        );
        assert!(message.contains("successfully hidden"));
        assert!(message.contains("doctored_cat.png"));
        assert!(message.contains("1.50s"));
    }

    #[test]
    fn lossy_destination_is_rejected() {
        let result = check_output(Path::new("no_such_dir/result.jpg"), false);
        assert!(result.is_err());
        assert!(check_output(Path::new("no_such_dir/result.png"), false).is_ok());
    }
}
