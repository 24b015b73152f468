//! ABB RAPID 后端
//!
//! 生成 `.prg` 程序模块：每个运动帧一条 `MoveAbsJ` 关节目标
//! 指令。RAPID 的 jointtarget 分两段，第一段是本体六关节，
//! 第二段是外部轴；未使用的外部轴槽位按 RAPID 惯例渲染为
//! `9E9`。数值用最短形式（`0` 而非 `0.0000`）。

use robopost_core::{
    AXIS_COUNT, Command, Dialect, DialectError, Frame, MotionCommand, NumberFormat, OptionName,
    Structure, SupportedOptions, TargetInfo, UserOptions,
};

/// 未使用外部轴槽位的 RAPID 惯例值
const UNUSED_EXTERNAL_AXIS: &str = "9E9";

/// 数值策略：最短形式
const NUMBERS: NumberFormat = NumberFormat::SHORTEST;

/// 六关节目标，外部轴全部未用
const MOVE_JOINTS: Structure = Structure::new(
    "MOVE_JOINTS",
    &["a1", "a2", "a3", "a4", "a5", "a6"],
    "        MoveAbsJ [[{},{},{},{},{},{}],[9E9,9E9,9E9,9E9,9E9,9E9]],v1000,fine,tool0;",
);

/// 六关节目标加六个外部轴槽位
const MOVE_JOINTS_EXT: Structure = Structure::new(
    "MOVE_JOINTS_EXT",
    &[
        "a1", "a2", "a3", "a4", "a5", "a6", "e1", "e2", "e3", "e4", "e5", "e6",
    ],
    "        MoveAbsJ [[{},{},{},{},{},{}],[{},{},{},{},{},{}]],v1000,fine,tool0;",
);

const STRUCTURES: &[Structure] = &[MOVE_JOINTS, MOVE_JOINTS_EXT];

const PROGRAM_TEMPLATE: &str = "\
MODULE MainModule
    PROC main()
        ConfJ \\On;
        ConfL \\Off;
{}
    ENDPROC
ENDMODULE
";

/// ABB RAPID 方言
pub struct Rapid {
    template: String,
}

impl Rapid {
    pub fn new() -> Self {
        Rapid {
            template: PROGRAM_TEMPLATE.to_string(),
        }
    }
}

impl Default for Rapid {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for Rapid {
    fn target(&self) -> TargetInfo {
        TargetInfo::new("ABB", "RAPID", ".prg")
    }

    fn supported_options(&self) -> SupportedOptions {
        SupportedOptions(&[
            OptionName::IgnoreMotion,
            OptionName::UseNonlinearMotion,
            OptionName::IncludeAxes,
            OptionName::IncludeExternalAxes,
        ])
    }

    fn default_options(&self) -> UserOptions {
        UserOptions::default()
            .with(OptionName::UseNonlinearMotion, true)
            .with(OptionName::IncludeAxes, true)
    }

    fn program_template(&self) -> &str {
        &self.template
    }

    fn set_program_template(&mut self, template: String) {
        self.template = template;
    }

    fn structures(&self) -> &'static [Structure] {
        STRUCTURES
    }

    fn format_command(&mut self, frame: &Frame) -> Option<Command> {
        MotionCommand::from_frame(frame).map(Command::Motion)
    }

    fn process_command(
        &mut self,
        command: &Command,
        options: &UserOptions,
    ) -> Result<String, DialectError> {
        let Command::Motion(motion) = command else {
            return Err(DialectError::InvalidCommand {
                detail: "RAPID renders motion commands only".to_string(),
            });
        };
        if !options.use_nonlinear_motion {
            return Err(DialectError::InvalidMotionType {
                reason: "linear motion is not available, enable use_nonlinear_motion".to_string(),
            });
        }
        let axes = motion.axes.ok_or_else(|| DialectError::InvalidCommand {
            detail: "MoveAbsJ requires six joint values".to_string(),
        })?;

        let mut values = NUMBERS.format_all(axes.values());
        match &motion.external_axes {
            Some(ext) if !ext.is_empty() => {
                for slot in 0..AXIS_COUNT {
                    values.push(match ext.get(slot) {
                        Some(v) => NUMBERS.format(v),
                        None => UNUSED_EXTERNAL_AXIS.to_string(),
                    });
                }
                MOVE_JOINTS_EXT.fill(&values)
            }
            _ => MOVE_JOINTS.fill(&values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robopost_core::PostProcessor;

    /// 测试零位帧按默认选项生成一条关节指令
    #[test]
    fn test_zero_frame_default_options() {
        let mut pp = PostProcessor::from_dialect(Rapid::new());
        let options = pp.default_options();
        let frames = vec![Frame::new().with_axes([0.0; 6])];
        let program = pp.generate_program(&frames, &options).unwrap();

        let motion_lines: Vec<&str> = program
            .lines()
            .filter(|l| l.contains("MoveAbsJ"))
            .collect();
        assert_eq!(motion_lines.len(), 1);
        assert_eq!(
            motion_lines[0].trim(),
            "MoveAbsJ [[0,0,0,0,0,0],[9E9,9E9,9E9,9E9,9E9,9E9]],v1000,fine,tool0;"
        );
        assert!(program.starts_with("MODULE MainModule"));
        assert!(program.contains("ENDMODULE"));
    }

    /// 测试外部轴渲染与 9E9 占位
    #[test]
    fn test_external_axes_with_holes() {
        let mut pp = PostProcessor::from_dialect(Rapid::new());
        let options = pp
            .default_options()
            .with(OptionName::IncludeExternalAxes, true);
        let frame = Frame::new()
            .with_axes([10.0, 20.0, 30.0, 40.0, 50.0, 60.0])
            .with_external_axes(&[500.0]);
        let program = pp.generate_program(&[frame], &options).unwrap();
        assert!(program.contains(
            "MoveAbsJ [[10,20,30,40,50,60],[500,9E9,9E9,9E9,9E9,9E9]],v1000,fine,tool0;"
        ));
    }

    /// 测试关闭非线性运动时的失败
    #[test]
    fn test_nonlinear_disabled_fails() {
        let mut pp = PostProcessor::from_dialect(Rapid::new());
        let options = UserOptions::default().with(OptionName::IncludeAxes, true);
        let err = pp
            .generate_program(&[Frame::new().with_axes([0.0; 6])], &options)
            .unwrap_err();
        assert!(matches!(
            err,
            robopost_core::PostprocError::InvalidMotionType { frame: 0, .. }
        ));
    }

    /// 测试结构表的字段数与占位符数一致
    #[test]
    fn test_structure_arity() {
        for structure in STRUCTURES {
            assert_eq!(structure.arity(), structure.placeholder_count());
        }
    }
}
