//! # Robopost Core
//!
//! 机器人程序后处理器的核心模型与引擎（无 IO 依赖）
//!
//! ## 模块
//!
//! - `frame`: 帧数据模型（关节角、外部轴、位姿、IO）
//! - `command`: 类型化命令（运动 / 记录）
//! - `options`: 用户选项闭集与后端支持矩阵
//! - `format`: 数值格式化策略
//! - `template`: 结构/模板机制与拼接原语
//! - `checksum`: CRC-32 校验和变体
//! - `engine`: `Dialect` trait 与 `PostProcessor` 流水线
//! - `error`: 分层错误类型
//!
//! ## 定位
//!
//! 本 crate 只做纯计算：帧列表进、程序文本出。方言后端
//! 实现与注册表在 `robopost-dialects`，文件读写在 CLI。

pub mod checksum;
pub mod command;
pub mod engine;
pub mod error;
pub mod format;
pub mod frame;
pub mod options;
pub mod template;

// 重新导出常用类型
pub use checksum::Crc32;
pub use command::{Command, CommandKind, MotionCommand, RecordsCommand};
pub use engine::{Dialect, PostProcessor, TargetInfo};
pub use error::{DialectError, OptionsError, PostprocError};
pub use format::NumberFormat;
pub use frame::{
    AXIS_COUNT, AnalogState, Axes, Configuration, DigitalState, ExternalAxes, Frame, Pose,
};
pub use options::{OptionName, SupportedOptions, UserOptions};
pub use template::{
    Structure, count_placeholders, fill_program_template, replace_marker, splice_after_marker,
};
