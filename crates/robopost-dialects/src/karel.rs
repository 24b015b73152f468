//! FANUC KAREL 后端
//!
//! 生成 `.ls` 程序：每个运动帧在 `/POS` 段产出一个编号的
//! `P[n]` 关节位置，后处理阶段把模板里的 `[MOTION]` 标记展开
//! 成对应的 `/MN` 运动块（每个位置一条 `J P[n] 100% FINE ;`）。
//! 位置编号是实例内递增计数器，每次生成从 1 重新开始。

use robopost_core::{
    Command, Dialect, DialectError, Frame, MotionCommand, NumberFormat, OptionName, Structure,
    SupportedOptions, TargetInfo, UserOptions, replace_marker,
};

/// 运动块展开标记
const MOTION_MARKER: &str = "[MOTION]\n";

/// 数值策略：固定三位小数
const NUMBERS: NumberFormat = NumberFormat::fixed(3);

/// 一个编号关节位置（/POS 段条目）
const POSITION: Structure = Structure::new(
    "POSITION",
    &["index", "j1", "j2", "j3", "j4", "j5", "j6"],
    "P[{}]{\n   GP1:\n\tUF : 0, UT : 1,\n\tJ1 = {} deg, J2 = {} deg, J3 = {} deg,\n\tJ4 = {} deg, J5 = {} deg, J6 = {} deg\n};",
);

const STRUCTURES: &[Structure] = &[POSITION];

const PROGRAM_TEMPLATE: &str = "\
/PROG  MAIN
/ATTR
OWNER\t\t= MNEDITOR;
COMMENT\t\t= \"ROBOPOST\";
PROG_SIZE\t= 0;
/MN
[MOTION]
/POS
{}
/END
";

/// FANUC KAREL 方言
pub struct Karel {
    template: String,
    /// 已发出的位置数；同时是下一个位置的编号减一
    index: u32,
}

impl Karel {
    pub fn new() -> Self {
        Karel {
            template: PROGRAM_TEMPLATE.to_string(),
            index: 0,
        }
    }
}

impl Default for Karel {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for Karel {
    fn target(&self) -> TargetInfo {
        TargetInfo::new("FANUC", "KAREL", ".ls")
    }

    fn supported_options(&self) -> SupportedOptions {
        SupportedOptions(&[
            OptionName::IgnoreMotion,
            OptionName::UseNonlinearMotion,
            OptionName::IncludeAxes,
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

    fn reset(&mut self) {
        self.index = 0;
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
                detail: "KAREL renders motion commands only".to_string(),
            });
        };
        if !options.use_nonlinear_motion {
            return Err(DialectError::InvalidMotionType {
                reason: "linear motion is not available, enable use_nonlinear_motion".to_string(),
            });
        }
        let axes = motion.axes.ok_or_else(|| DialectError::InvalidCommand {
            detail: "position entry requires six joint values".to_string(),
        })?;

        self.index += 1;
        let mut values = vec![self.index.to_string()];
        values.extend(NUMBERS.format_all(axes.values()));
        POSITION.fill(&values)
    }

    fn post_process(
        &mut self,
        program: String,
        _options: &UserOptions,
    ) -> Result<String, DialectError> {
        let mut block = String::new();
        for n in 1..=self.index {
            block.push_str(&format!("{n:4}:J P[{n}] 100% FINE    ;\n"));
        }
        replace_marker(&program, MOTION_MARKER, &block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robopost_core::PostProcessor;

    fn axes_frame(a1: f64) -> Frame {
        Frame::new().with_axes([a1, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    /// 测试位置条目与运动块的编号对应
    #[test]
    fn test_positions_and_motion_block() {
        let mut pp = PostProcessor::from_dialect(Karel::new());
        let options = pp.default_options();
        let frames = vec![axes_frame(10.0), axes_frame(20.0)];
        let program = pp.generate_program(&frames, &options).unwrap();

        assert!(program.contains("P[1]{"));
        assert!(program.contains("P[2]{"));
        assert!(program.contains("J1 = 10.000 deg"));
        assert!(program.contains("J1 = 20.000 deg"));
        assert!(program.contains("   1:J P[1] 100% FINE    ;"));
        assert!(program.contains("   2:J P[2] 100% FINE    ;"));
        // 标记本身不残留
        assert!(!program.contains("[MOTION]"));
        // 运动块在 /MN 段、位置在 /POS 段
        let mn = program.find("/MN").unwrap();
        let pos = program.find("/POS").unwrap();
        let first_move = program.find(":J P[1]").unwrap();
        let first_entry = program.find("P[1]{").unwrap();
        assert!(mn < first_move && first_move < pos);
        assert!(pos < first_entry);
    }

    /// 测试 ignore_motion 下运动块为空
    #[test]
    fn test_ignore_motion_empty_blocks() {
        let mut pp = PostProcessor::from_dialect(Karel::new());
        let options = pp.default_options().with(OptionName::IgnoreMotion, true);
        let program = pp
            .generate_program(&[axes_frame(1.0), axes_frame(2.0)], &options)
            .unwrap();
        assert!(!program.contains("P["));
        assert!(!program.contains("[MOTION]"));
    }

    /// 测试编号每次生成从 1 重新开始
    #[test]
    fn test_index_resets_between_calls() {
        let mut pp = PostProcessor::from_dialect(Karel::new());
        let options = pp.default_options();
        let frames = vec![axes_frame(1.0)];
        let first = pp.generate_program(&frames, &options).unwrap();
        let second = pp.generate_program(&frames, &options).unwrap();
        assert_eq!(first, second);
        assert!(!second.contains("P[2]"));
    }

    /// 测试结构表的字段数与占位符数一致（模板含字面大括号）
    #[test]
    fn test_structure_arity() {
        assert_eq!(POSITION.arity(), 7);
        assert_eq!(POSITION.placeholder_count(), 7);
    }
}
