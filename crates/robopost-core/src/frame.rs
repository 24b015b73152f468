//! 帧数据模型
//!
//! 一帧（[`Frame`]）是机器人运动/IO 状态的一个采样瞬间，
//! 所有字段均为可选：调用方只填它拥有的数据，后端只取它
//! 认识的字段。字段全空的帧在生成时被跳过，不产生输出行。

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::options::UserOptions;

/// 机器人本体关节数（六轴工业臂）
pub const AXIS_COUNT: usize = 6;

/// 六个关节角（度）
///
/// 固定长度的有序序列，顺序即 A1..A6 / J1..J6。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axes(pub [f64; AXIS_COUNT]);

impl Axes {
    /// 全零关节角（各方言测试中常用的原点姿态）
    pub const ZERO: Axes = Axes([0.0; AXIS_COUNT]);

    /// 按关节顺序返回切片
    #[inline]
    pub fn values(&self) -> &[f64; AXIS_COUNT] {
        &self.0
    }
}

impl From<[f64; AXIS_COUNT]> for Axes {
    fn from(values: [f64; AXIS_COUNT]) -> Self {
        Axes(values)
    }
}

/// 外部轴值序列
///
/// 长度可变（0..=6），每个槽位可空：`None` 表示该外部轴
/// 在本帧没有值，由后端决定如何渲染（RAPID 渲染为 `9E9`，
/// KRL 渲染为 `0.0`）。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExternalAxes(pub SmallVec<[Option<f64>; AXIS_COUNT]>);

impl ExternalAxes {
    /// 由连续已知值构造（常见情形：导轨/转台各有一个值）
    pub fn from_values(values: &[f64]) -> Self {
        ExternalAxes(values.iter().map(|v| Some(*v)).collect())
    }

    /// 槽位数
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 是否没有任何已知值
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|v| v.is_none())
    }

    /// 第 `i` 个槽位的值（越界视为未知）
    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.0.get(i).copied().flatten()
    }
}

/// 笛卡尔位姿目标
///
/// 平移 `x/y/z`（毫米）加欧拉角 `a/b/c`（度），
/// 字段顺序与 KUKA E6POS 一致。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// 姿态配置标志位
///
/// 三个整数槽位，各方言按需取用（KRL 取槽位 0/1 作为
/// `S`/`T`，其余方言忽略）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Configuration(pub [i32; 3]);

/// 数字输出状态（标识符 + 布尔值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalState {
    /// 输出口标识符（后端决定其含义：端口名、位序号等）
    pub identifier: String,
    /// 输出电平
    pub value: bool,
}

/// 模拟输出状态（标识符 + 数值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogState {
    /// 输出口标识符
    pub identifier: String,
    /// 输出值
    pub value: f64,
}

/// 每帧原始参数记录
///
/// 生成调用的输入单元：一帧至多编码为一条命令、一行输出。
/// 字段全部可选，JSON 反序列化时缺省字段按空处理。
///
/// # 构造示例
///
/// ```rust
/// use robopost_core::Frame;
///
/// let frame = Frame::new()
///     .with_time(0.012)
///     .with_axes([0.0, -90.0, 90.0, 0.0, 0.0, 0.0])
///     .with_digital_output("GRIPPER", true);
/// assert!(!frame.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    /// 时间戳（秒）；无时间戳的帧由支持时间列的后端用内部时钟补齐
    pub time_index: Option<f64>,

    /// 本体六关节角
    pub axes: Option<Axes>,

    /// 外部轴值
    pub external_axes: Option<ExternalAxes>,

    /// 笛卡尔位姿
    pub pose: Option<Pose>,

    /// 姿态配置标志
    pub configuration: Option<Configuration>,

    /// 数字输出列表（顺序即位打包顺序，首项为 bit 0）
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub digital_outputs: Vec<DigitalState>,

    /// 模拟输出列表
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub analog_outputs: Vec<AnalogState>,
}

impl Frame {
    /// 创建空帧
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置时间戳（秒）
    pub fn with_time(mut self, time: f64) -> Self {
        self.time_index = Some(time);
        self
    }

    /// 设置六关节角
    pub fn with_axes(mut self, axes: [f64; AXIS_COUNT]) -> Self {
        self.axes = Some(Axes(axes));
        self
    }

    /// 设置外部轴（连续已知值）
    pub fn with_external_axes(mut self, values: &[f64]) -> Self {
        self.external_axes = Some(ExternalAxes::from_values(values));
        self
    }

    /// 设置笛卡尔位姿
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = Some(pose);
        self
    }

    /// 设置姿态配置标志
    pub fn with_configuration(mut self, flags: [i32; 3]) -> Self {
        self.configuration = Some(Configuration(flags));
        self
    }

    /// 追加一个数字输出
    pub fn with_digital_output(mut self, identifier: impl Into<String>, value: bool) -> Self {
        self.digital_outputs.push(DigitalState {
            identifier: identifier.into(),
            value,
        });
        self
    }

    /// 追加一个模拟输出
    pub fn with_analog_output(mut self, identifier: impl Into<String>, value: f64) -> Self {
        self.analog_outputs.push(AnalogState {
            identifier: identifier.into(),
            value,
        });
        self
    }

    /// 是否不含任何数据
    pub fn is_empty(&self) -> bool {
        self.time_index.is_none()
            && self.axes.is_none()
            && self.external_axes.is_none()
            && self.pose.is_none()
            && self.configuration.is_none()
            && self.digital_outputs.is_empty()
            && self.analog_outputs.is_empty()
    }

    /// 按生效选项屏蔽字段
    ///
    /// 被 `include_*` 标志排除的字段置空；时间戳不受选项
    /// 控制（是否输出时间列由后端结构决定）。
    pub fn masked(&self, options: &UserOptions) -> Frame {
        Frame {
            time_index: self.time_index,
            axes: if options.include_axes { self.axes } else { None },
            external_axes: if options.include_external_axes {
                self.external_axes.clone()
            } else {
                None
            },
            pose: if options.include_pose { self.pose } else { None },
            configuration: if options.include_configuration {
                self.configuration
            } else {
                None
            },
            digital_outputs: if options.include_digital_outputs {
                self.digital_outputs.clone()
            } else {
                Vec::new()
            },
            analog_outputs: if options.include_analog_outputs {
                self.analog_outputs.clone()
            } else {
                Vec::new()
            },
        }
    }
}
