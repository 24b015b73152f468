//! 命令模型
//!
//! 命令是一帧数据到一行程序文本之间的类型化中间表示：
//! 每种结构形态一个变体，构造时即确定种类判别，字段存在性
//! 用 `Option` 表达、只检查一次。命令构造后不可变，生命周期
//! 不超出一次生成调用。

use crate::frame::{AnalogState, Axes, Configuration, DigitalState, ExternalAxes, Frame, Pose};

/// 命令种类判别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// 运动目标（受 `ignore_motion` 门控）
    Motion,
    /// 采样记录 / IO 状态
    Records,
}

/// 运动命令：一个运动目标点
#[derive(Debug, Clone, PartialEq)]
pub struct MotionCommand {
    pub axes: Option<Axes>,
    pub external_axes: Option<ExternalAxes>,
    pub pose: Option<Pose>,
    pub configuration: Option<Configuration>,
}

impl MotionCommand {
    /// 从（已屏蔽的）帧中取运动字段
    ///
    /// 帧里有的字段带走，没有的留空；全空则不产生命令。
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        let command = MotionCommand {
            axes: frame.axes,
            external_axes: frame.external_axes.clone(),
            pose: frame.pose,
            configuration: frame.configuration,
        };
        let empty = command.axes.is_none()
            && command.external_axes.is_none()
            && command.pose.is_none()
            && command.configuration.is_none();
        (!empty).then_some(command)
    }
}

/// 记录命令：一个采样瞬间的状态行
#[derive(Debug, Clone, PartialEq)]
pub struct RecordsCommand {
    pub time_index: Option<f64>,
    pub axes: Option<Axes>,
    pub external_axes: Option<ExternalAxes>,
    pub digital_outputs: Vec<DigitalState>,
    pub analog_outputs: Vec<AnalogState>,
}

impl RecordsCommand {
    /// 从（已屏蔽的）帧中取记录字段
    pub fn from_frame(frame: &Frame) -> Option<Self> {
        let command = RecordsCommand {
            time_index: frame.time_index,
            axes: frame.axes,
            external_axes: frame.external_axes.clone(),
            digital_outputs: frame.digital_outputs.clone(),
            analog_outputs: frame.analog_outputs.clone(),
        };
        let empty = command.time_index.is_none()
            && command.axes.is_none()
            && command.external_axes.is_none()
            && command.digital_outputs.is_empty()
            && command.analog_outputs.is_empty();
        (!empty).then_some(command)
    }
}

/// 一条待格式化的程序命令
///
/// 闭集枚举：引擎对命令的分发是对变体的穷尽 `match`，
/// 不做开放式类型探测。
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Motion(MotionCommand),
    Records(RecordsCommand),
}

impl Command {
    /// 命令种类
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Motion(_) => CommandKind::Motion,
            Command::Records(_) => CommandKind::Records,
        }
    }
}
