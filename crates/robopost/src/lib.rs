//! # Robopost
//!
//! 多目标机器人运动后处理器的门面 crate：把厂商中立的逐帧
//! 命令序列翻译成特定控制器方言的程序文本。
//!
//! 重新导出 `robopost-core`（模型与引擎）和 `robopost-dialects`
//! （内置后端与注册表）的公开接口，并提供一步到位的
//! [`generate`] 便捷函数。
//!
//! ## 快速开始
//!
//! ```rust
//! use robopost::{Frame, generate};
//!
//! let frames = vec![
//!     Frame::new().with_axes([0.0, -90.0, 90.0, 0.0, 0.0, 0.0]),
//!     Frame::new().with_axes([10.0, -90.0, 90.0, 0.0, 0.0, 0.0]),
//! ];
//! // None 表示采用该后端的会话默认选项
//! let program = generate("ABB", "RAPID", &frames, None).unwrap();
//! assert!(program.contains("MoveAbsJ"));
//! ```
//!
//! 需要更细的控制（自定义选项、模板覆盖、复用注册表实例）时
//! 直接使用 [`ProcessorRegistry`] 与 [`PostProcessor`]：
//!
//! ```rust
//! use robopost::{Frame, OptionName, ProcessorRegistry};
//!
//! let registry = ProcessorRegistry::global();
//! let mut processor = registry.resolve("General", "CSV").unwrap();
//! let options = processor
//!     .default_options()
//!     .with(OptionName::IncludeAnalogOutputs, false);
//! let program = processor
//!     .generate_program(&[Frame::new().with_time(0.0)], &options)
//!     .unwrap();
//! assert_eq!(program, "0\n");
//! ```

pub use robopost_core::{
    AXIS_COUNT, AnalogState, Axes, Command, CommandKind, Configuration, Crc32, Dialect,
    DialectError, DigitalState, ExternalAxes, Frame, MotionCommand, NumberFormat, OptionName,
    OptionsError, Pose, PostProcessor, PostprocError, RecordsCommand, Structure, SupportedOptions,
    TargetInfo, UserOptions,
};
pub use robopost_dialects::{
    Csv, DEFAULT_TARGET, DEFAULT_TIME_STEP, DialectConstructor, EntertainTech, Karel, Krl,
    ProcessorRegistry, Rapid, Val3,
};

/// 一步生成：解析后端、套用选项、产出程序文本
///
/// `options` 传 `None` 时采用该后端声明的会话默认选项。
/// 后端实例由全局注册表按调用新建，并发调用互不干扰。
pub fn generate(
    family: &str,
    dialect: &str,
    frames: &[Frame],
    options: Option<&UserOptions>,
) -> Result<String, PostprocError> {
    let mut processor = ProcessorRegistry::global().resolve(family, dialect)?;
    let options = options
        .copied()
        .unwrap_or_else(|| processor.default_options());
    processor.generate_program(frames, &options)
}
