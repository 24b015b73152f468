//! 后处理引擎
//!
//! 所有方言共享同一条固定流水线（模板方法）：
//!
//! ```text
//! 帧列表
//!   ↓ 选项降级 + reset()
//!   ↓ 逐帧：屏蔽字段 → format_command() → 命令 / 跳过
//!   ↓ 逐命令：ignore_motion 门控 → process_command() → 一行文本
//!   ↓ 按帧序拼接 → 填入程序模板
//!   ↓ post_process()（校验和、运动块展开）
//! 程序文本
//! ```
//!
//! 后端只提供表和逐命令格式化；流水线的顺序、跳过语义和
//! 错误上下文都在引擎里，各方言不得自行其是。

use tracing::{debug, trace};

use crate::command::{Command, CommandKind};
use crate::error::{DialectError, PostprocError};
use crate::frame::Frame;
use crate::options::{SupportedOptions, UserOptions};
use crate::template::{Structure, fill_program_template};

/// 后端目标元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetInfo {
    /// 机器人厂商/家族名（注册键第一段，不含空格）
    pub family: &'static str,
    /// 方言名（注册键其余部分）
    pub dialect: &'static str,
    /// 输出文件扩展名（含点，如 `.src`）
    pub extension: &'static str,
}

impl TargetInfo {
    pub const fn new(
        family: &'static str,
        dialect: &'static str,
        extension: &'static str,
    ) -> Self {
        TargetInfo {
            family,
            dialect,
            extension,
        }
    }

    /// 注册名：`"{family} {dialect}"`
    pub fn name(&self) -> String {
        format!("{} {}", self.family, self.dialect)
    }
}

/// 方言后端接口
///
/// 实现者声明表（目标、选项、结构、程序模板），并提供
/// 帧→命令、命令→行两步格式化。带实例内计数器的后端
/// （EntertainTech 时钟、KAREL 位置寄存器号）在
/// [`reset`](Dialect::reset) 里清零，引擎在每次生成开始时调用。
///
/// `Send` 约束允许注册表在线程间共享构造器；单次生成
/// 通过 `&mut self` 独占实例，天然不可交错。
pub trait Dialect: Send {
    /// 目标元数据
    fn target(&self) -> TargetInfo;

    /// 本后端有意义的选项集
    fn supported_options(&self) -> SupportedOptions;

    /// 会话默认选项（调用方未显式给选项时采用）
    fn default_options(&self) -> UserOptions;

    /// 程序模板，恰含一个 `{}` 插入点
    fn program_template(&self) -> &str;

    /// 覆盖程序模板
    ///
    /// 覆盖模板同样必须含 `{}` 插入点，且保留该后端后处理
    /// 依赖的标记；违反在生成时以
    /// [`PostprocError::TemplateMarkerMissing`] 暴露。
    fn set_program_template(&mut self, template: String);

    /// 已声明的结构表（动态拼行的后端为空表）
    fn structures(&self) -> &'static [Structure];

    /// 清零实例内计数器；无状态后端用默认空实现
    fn reset(&mut self) {}

    /// 把一帧转成命令；该后端视角下的空帧返回 `None`
    fn format_command(&mut self, frame: &Frame) -> Option<Command>;

    /// 把一条命令渲染成一行程序文本
    fn process_command(
        &mut self,
        command: &Command,
        options: &UserOptions,
    ) -> Result<String, DialectError>;

    /// 程序级后处理；默认原样返回
    fn post_process(
        &mut self,
        program: String,
        options: &UserOptions,
    ) -> Result<String, DialectError> {
        let _ = options;
        Ok(program)
    }
}

/// 程序生成器
///
/// 持有一个后端实例并驱动固定流水线。实例内计数器决定了
/// 并发纪律：并发生成各用各的实例（由注册表每次构造新实例
/// 保证），单个实例上的一次调用从头跑到尾。
pub struct PostProcessor {
    dialect: Box<dyn Dialect>,
}

// 后端是 trait 对象，手写 Debug 报告目标名
impl std::fmt::Debug for PostProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostProcessor")
            .field("target", &self.dialect.target().name())
            .finish_non_exhaustive()
    }
}

impl PostProcessor {
    pub fn new(dialect: Box<dyn Dialect>) -> Self {
        PostProcessor { dialect }
    }

    pub fn from_dialect(dialect: impl Dialect + 'static) -> Self {
        PostProcessor {
            dialect: Box::new(dialect),
        }
    }

    /// 目标元数据
    pub fn target(&self) -> TargetInfo {
        self.dialect.target()
    }

    /// 后端会话默认选项
    pub fn default_options(&self) -> UserOptions {
        self.dialect.default_options()
    }

    /// 只读访问底层后端（自省、测试用）
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// 覆盖程序模板
    pub fn set_program_template(&mut self, template: String) {
        self.dialect.set_program_template(template);
    }

    /// 生成完整程序文本
    ///
    /// 纯批处理：同样的 `(frames, options)` 必然产出逐字节
    /// 相同的结果。任何失败都使整次调用失败，不产出部分
    /// 程序。输出行顺序严格等于输入帧顺序，不重排、不去重。
    pub fn generate_program(
        &mut self,
        frames: &[Frame],
        options: &UserOptions,
    ) -> Result<String, PostprocError> {
        let target = self.dialect.target().name();
        let effective = options.restricted(&self.dialect.supported_options(), &target);

        debug!(
            target_name = %target,
            frames = frames.len(),
            "generating program"
        );

        self.dialect.reset();

        let mut lines = Vec::with_capacity(frames.len());
        for (index, frame) in frames.iter().enumerate() {
            let masked = frame.masked(&effective);
            let Some(command) = self.dialect.format_command(&masked) else {
                trace!(frame = index, "frame has no data for this target, skipped");
                continue;
            };
            if effective.ignore_motion && command.kind() == CommandKind::Motion {
                trace!(frame = index, "motion command skipped");
                continue;
            }
            let line = self
                .dialect
                .process_command(&command, &effective)
                .map_err(|e| PostprocError::from_dialect(e, &target, Some(index)))?;
            lines.push(line);
        }

        let line_count = lines.len();
        let block = lines.join("\n");
        let program = fill_program_template(self.dialect.program_template(), &block)
            .map_err(|e| PostprocError::from_dialect(e, &target, None))?;
        let program = self
            .dialect
            .post_process(program, &effective)
            .map_err(|e| PostprocError::from_dialect(e, &target, None))?;

        debug!(
            target_name = %target,
            lines = line_count,
            bytes = program.len(),
            "program generated"
        );
        Ok(program)
    }
}
