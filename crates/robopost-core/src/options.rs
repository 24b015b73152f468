//! 用户选项与后端支持矩阵
//!
//! 选项是一个闭集：九个命名布尔开关。调用方按名字配置
//! （[`UserOptions::configure`]），未知名字立即报错；已知但
//! 后端不支持的开关在生成时被静默降级为 `false`，每个被降级
//! 的开关记录一条 `warn` 日志。

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::OptionsError;

/// 选项名闭集
///
/// 与 [`UserOptions`] 的字段一一对应，提供统一的按名访问，
/// 避免在降级、CLI 解析等处逐字段匹配。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    /// 跳过所有运动类命令（只输出 IO / 记录类行）
    IgnoreMotion,
    /// 允许非线性（关节空间）运动编码
    UseNonlinearMotion,
    /// 输出本体关节角
    IncludeAxes,
    /// 输出外部轴
    IncludeExternalAxes,
    /// 输出笛卡尔位姿
    IncludePose,
    /// 输出姿态配置标志
    IncludeConfiguration,
    /// 输出数字输出口
    IncludeDigitalOutputs,
    /// 输出模拟输出口
    IncludeAnalogOutputs,
    /// 在程序中插入校验和
    IncludeChecksum,
}

impl OptionName {
    /// 全部选项名（声明顺序即文档顺序）
    pub const ALL: [OptionName; 9] = [
        OptionName::IgnoreMotion,
        OptionName::UseNonlinearMotion,
        OptionName::IncludeAxes,
        OptionName::IncludeExternalAxes,
        OptionName::IncludePose,
        OptionName::IncludeConfiguration,
        OptionName::IncludeDigitalOutputs,
        OptionName::IncludeAnalogOutputs,
        OptionName::IncludeChecksum,
    ];

    /// 选项的外部名字（与字段名一致）
    pub const fn as_str(self) -> &'static str {
        match self {
            OptionName::IgnoreMotion => "ignore_motion",
            OptionName::UseNonlinearMotion => "use_nonlinear_motion",
            OptionName::IncludeAxes => "include_axes",
            OptionName::IncludeExternalAxes => "include_external_axes",
            OptionName::IncludePose => "include_pose",
            OptionName::IncludeConfiguration => "include_configuration",
            OptionName::IncludeDigitalOutputs => "include_digital_outputs",
            OptionName::IncludeAnalogOutputs => "include_analog_outputs",
            OptionName::IncludeChecksum => "include_checksum",
        }
    }

    /// 按名字解析，未知名字报 [`OptionsError::UnknownOption`]
    pub fn parse(name: &str) -> Result<Self, OptionsError> {
        OptionName::ALL
            .iter()
            .copied()
            .find(|o| o.as_str() == name)
            .ok_or_else(|| OptionsError::UnknownOption {
                name: name.to_string(),
            })
    }
}

/// 一次生成调用的完整选项
///
/// 全部字段默认 `false`；构造后不再修改（引擎只读取）。
/// 可比较、可哈希，方便测试断言。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserOptions {
    pub ignore_motion: bool,
    pub use_nonlinear_motion: bool,
    pub include_axes: bool,
    pub include_external_axes: bool,
    pub include_pose: bool,
    pub include_configuration: bool,
    pub include_digital_outputs: bool,
    pub include_analog_outputs: bool,
    pub include_checksum: bool,
}

impl UserOptions {
    /// 全部关闭的选项
    pub fn new() -> Self {
        Self::default()
    }

    /// 按名读取
    pub fn get(&self, name: OptionName) -> bool {
        match name {
            OptionName::IgnoreMotion => self.ignore_motion,
            OptionName::UseNonlinearMotion => self.use_nonlinear_motion,
            OptionName::IncludeAxes => self.include_axes,
            OptionName::IncludeExternalAxes => self.include_external_axes,
            OptionName::IncludePose => self.include_pose,
            OptionName::IncludeConfiguration => self.include_configuration,
            OptionName::IncludeDigitalOutputs => self.include_digital_outputs,
            OptionName::IncludeAnalogOutputs => self.include_analog_outputs,
            OptionName::IncludeChecksum => self.include_checksum,
        }
    }

    /// 按名写入
    pub fn set(&mut self, name: OptionName, value: bool) {
        match name {
            OptionName::IgnoreMotion => self.ignore_motion = value,
            OptionName::UseNonlinearMotion => self.use_nonlinear_motion = value,
            OptionName::IncludeAxes => self.include_axes = value,
            OptionName::IncludeExternalAxes => self.include_external_axes = value,
            OptionName::IncludePose => self.include_pose = value,
            OptionName::IncludeConfiguration => self.include_configuration = value,
            OptionName::IncludeDigitalOutputs => self.include_digital_outputs = value,
            OptionName::IncludeAnalogOutputs => self.include_analog_outputs = value,
            OptionName::IncludeChecksum => self.include_checksum = value,
        }
    }

    /// 链式设置（测试与后端默认值声明用）
    pub fn with(mut self, name: OptionName, value: bool) -> Self {
        self.set(name, value);
        self
    }

    /// 由 `(名字, 值)` 对构造
    ///
    /// 未出现的选项保持默认 `false`；出现未知名字则整体失败。
    ///
    /// ```rust
    /// use robopost_core::UserOptions;
    ///
    /// let options = UserOptions::configure([
    ///     ("include_axes", true),
    ///     ("use_nonlinear_motion", true),
    /// ])
    /// .unwrap();
    /// assert!(options.include_axes);
    /// assert!(!options.include_pose);
    ///
    /// assert!(UserOptions::configure([("include_sound", true)]).is_err());
    /// ```
    pub fn configure<'a, I>(pairs: I) -> Result<UserOptions, OptionsError>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut options = UserOptions::default();
        for (name, value) in pairs {
            options.set(OptionName::parse(name)?, value);
        }
        Ok(options)
    }

    /// 按后端支持集降级
    ///
    /// 开着但不被支持的选项置为 `false`，每个降级记一条
    /// `warn`。`target` 只用于日志。
    pub fn restricted(&self, supported: &SupportedOptions, target: &str) -> UserOptions {
        let mut effective = *self;
        for name in OptionName::ALL {
            if effective.get(name) && !supported.supports(name) {
                warn!(
                    target_name = target,
                    option = name.as_str(),
                    "option not supported by this target, ignoring"
                );
                effective.set(name, false);
            }
        }
        effective
    }
}

/// 后端支持的选项集合
///
/// 每个后端声明一张静态表；不在表内的选项对该后端无意义。
#[derive(Debug, Clone, Copy)]
pub struct SupportedOptions(pub &'static [OptionName]);

impl SupportedOptions {
    /// 是否支持某选项
    pub fn supports(&self, name: OptionName) -> bool {
        self.0.contains(&name)
    }

    /// 支持的选项名表
    pub fn names(&self) -> &'static [OptionName] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试选项名与字段的一一对应
    #[test]
    fn test_option_name_roundtrip() {
        for name in OptionName::ALL {
            assert_eq!(OptionName::parse(name.as_str()).unwrap(), name);
        }
        assert!(matches!(
            OptionName::parse("include_sound"),
            Err(OptionsError::UnknownOption { .. })
        ));
    }

    /// 测试 get/set 覆盖全部选项
    #[test]
    fn test_get_set_all_options() {
        let mut options = UserOptions::default();
        for name in OptionName::ALL {
            assert!(!options.get(name));
            options.set(name, true);
            assert!(options.get(name));
        }
    }

    /// 测试 configure 的构造与失败
    #[test]
    fn test_configure() {
        let options = UserOptions::configure([
            ("include_axes", true),
            ("include_checksum", true),
            ("ignore_motion", false),
        ])
        .unwrap();
        assert!(options.include_axes);
        assert!(options.include_checksum);
        assert!(!options.ignore_motion);
        assert!(!options.include_pose);

        let err = UserOptions::configure([("axes", true)]).unwrap_err();
        match err {
            OptionsError::UnknownOption { name } => assert_eq!(name, "axes"),
        }
    }

    /// 测试不支持选项的静默降级
    #[test]
    fn test_restricted_downgrades_unsupported() {
        static SUPPORTED: SupportedOptions =
            SupportedOptions(&[OptionName::IncludeAxes, OptionName::UseNonlinearMotion]);

        let requested = UserOptions::default()
            .with(OptionName::IncludeAxes, true)
            .with(OptionName::IncludePose, true)
            .with(OptionName::IncludeChecksum, true);

        let effective = requested.restricted(&SUPPORTED, "ABB RAPID");
        assert!(effective.include_axes);
        assert!(!effective.include_pose);
        assert!(!effective.include_checksum);

        // 关闭的选项不触发降级，也不改变
        assert!(!effective.use_nonlinear_motion);
    }

    /// 测试选项值的相等与哈希（测试断言依赖）
    #[test]
    fn test_options_eq_hash() {
        use std::collections::HashSet;

        let a = UserOptions::default().with(OptionName::IncludeAxes, true);
        let b = UserOptions::default().with(OptionName::IncludeAxes, true);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
