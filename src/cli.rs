//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::config::HeaderWidth;
use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于把一幅图像藏进另一幅无损格式图像 (如 PNG, BMP) 中，或将其恢复。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于把一幅图像藏进另一幅无损格式图像 (如 PNG, BMP) 中，或将其恢复。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量查询)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将负载图像隐藏到载体图像中。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的图像。
    Recover(RecoverArgs),

    /// 查询载体图像最多能隐藏多大的图像。
    Capacity(CapacityArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于承载隐藏数据的载体图像路径。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 要隐藏的负载图像路径。
    #[arg(short, long)]
    pub payload: PathBuf,

    /// 结果图像的输出路径，必须是无损格式。默认为载体同目录下的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 头部中宽、高字段的位数，恢复时必须使用相同的值。
    #[arg(short = 'w', long, default_value_t = HeaderWidth::default())]
    pub header_width: HeaderWidth,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏图像数据的隐写图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复出的图像的输出路径。默认为同目录下的 `recovered_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 头部中宽、高字段的位数，必须与隐藏时一致。
    #[arg(short = 'w', long, default_value_t = HeaderWidth::default())]
    pub header_width: HeaderWidth,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 载体图像路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 头部中宽、高字段的位数。
    #[arg(short = 'w', long, default_value_t = HeaderWidth::default())]
    pub header_width: HeaderWidth,
}
