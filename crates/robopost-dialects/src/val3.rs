//! Stäubli VAL3 后端
//!
//! 生成 `.pgx` 程序文档（VAL3 的 XML 容器格式）：每个运动帧
//! 一条 `movej` 关节运动指令，嵌在 `main` 程序体里。注册键用
//! ASCII 形式的厂商名 `Staubli`，展示文本保留变音符号。

use robopost_core::{
    Command, Dialect, DialectError, Frame, MotionCommand, NumberFormat, OptionName, Structure,
    SupportedOptions, TargetInfo, UserOptions,
};

/// 数值策略：固定三位小数
const NUMBERS: NumberFormat = NumberFormat::fixed(3);

/// 关节运动指令
const MOVE_JOINTS: Structure = Structure::new(
    "MOVE_JOINTS",
    &["j1", "j2", "j3", "j4", "j5", "j6"],
    "    movej({{},{},{},{},{},{}},flange,mNomSpeed)",
);

const STRUCTURES: &[Structure] = &[MOVE_JOINTS];

const PROGRAM_TEMPLATE: &str = "\
<?xml version=\"1.0\" encoding=\"utf-8\"?>
<Programs xmlns=\"http://www.staubli.com/robotics/VAL3/Program/2\">
  <Program name=\"main\">
    <Code><![CDATA[
begin
{}
end
]]></Code>
  </Program>
</Programs>
";

/// Stäubli VAL3 方言
pub struct Val3 {
    template: String,
}

impl Val3 {
    pub fn new() -> Self {
        Val3 {
            template: PROGRAM_TEMPLATE.to_string(),
        }
    }
}

impl Default for Val3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for Val3 {
    fn target(&self) -> TargetInfo {
        TargetInfo::new("Staubli", "VAL3", ".pgx")
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
                detail: "VAL3 renders motion commands only".to_string(),
            });
        };
        if !options.use_nonlinear_motion {
            return Err(DialectError::InvalidMotionType {
                reason: "linear motion is not available, enable use_nonlinear_motion".to_string(),
            });
        }
        let axes = motion.axes.ok_or_else(|| DialectError::InvalidCommand {
            detail: "movej requires six joint values".to_string(),
        })?;
        MOVE_JOINTS.fill(&NUMBERS.format_all(axes.values()))
    }
}
