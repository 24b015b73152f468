//! KUKA KRL 后端
//!
//! 生成 `.src` 程序：关节空间用 `PTP {A1 ...}`（可带 E1..E6
//! 外部轴），笛卡尔空间用 `LIN {X ...}`（可带 S/T 姿态配置）。
//! 这是唯一同时声明非线性与线性运动结构的后端：关节角存在且
//! 允许非线性时走 PTP，否则帧里有位姿就退回 LIN。
//!
//! 数值固定四位小数（KRL 源程序的常见书写习惯）；外部轴
//! 未知槽位渲染为 `0.0000`。

use robopost_core::{
    AXIS_COUNT, Command, Dialect, DialectError, Frame, MotionCommand, NumberFormat, OptionName,
    Structure, SupportedOptions, TargetInfo, UserOptions,
};

/// 数值策略：固定四位小数
const NUMBERS: NumberFormat = NumberFormat::fixed(4);

/// 关节空间目标
const MOVE_JOINTS: Structure = Structure::new(
    "MOVE_JOINTS",
    &["a1", "a2", "a3", "a4", "a5", "a6"],
    "PTP {A1 {}, A2 {}, A3 {}, A4 {}, A5 {}, A6 {}}",
);

/// 关节空间目标加外部轴
const MOVE_JOINTS_EXT: Structure = Structure::new(
    "MOVE_JOINTS_EXT",
    &[
        "a1", "a2", "a3", "a4", "a5", "a6", "e1", "e2", "e3", "e4", "e5", "e6",
    ],
    "PTP {A1 {}, A2 {}, A3 {}, A4 {}, A5 {}, A6 {}, E1 {}, E2 {}, E3 {}, E4 {}, E5 {}, E6 {}}",
);

/// 笛卡尔直线目标
const MOVE_POSE: Structure = Structure::new(
    "MOVE_POSE",
    &["x", "y", "z", "a", "b", "c"],
    "LIN {X {}, Y {}, Z {}, A {}, B {}, C {}}",
);

/// 笛卡尔直线目标加姿态配置（S/T 取配置槽位 0/1）
const MOVE_POSE_CONF: Structure = Structure::new(
    "MOVE_POSE_CONF",
    &["x", "y", "z", "a", "b", "c", "s", "t"],
    "LIN {X {}, Y {}, Z {}, A {}, B {}, C {}, S {}, T {}}",
);

const STRUCTURES: &[Structure] = &[MOVE_JOINTS, MOVE_JOINTS_EXT, MOVE_POSE, MOVE_POSE_CONF];

const PROGRAM_TEMPLATE: &str = "\
&ACCESS RVP
&REL 1
&PARAM EDITMASK = *
DEF main()
BAS(#INITMOV, 0)
{}
END
";

/// KUKA KRL 方言
pub struct Krl {
    template: String,
}

impl Krl {
    pub fn new() -> Self {
        Krl {
            template: PROGRAM_TEMPLATE.to_string(),
        }
    }
}

impl Default for Krl {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for Krl {
    fn target(&self) -> TargetInfo {
        TargetInfo::new("KUKA", "KRL", ".src")
    }

    fn supported_options(&self) -> SupportedOptions {
        SupportedOptions(&[
            OptionName::IgnoreMotion,
            OptionName::UseNonlinearMotion,
            OptionName::IncludeAxes,
            OptionName::IncludeExternalAxes,
            OptionName::IncludePose,
            OptionName::IncludeConfiguration,
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
                detail: "KRL renders motion commands only".to_string(),
            });
        };

        if options.use_nonlinear_motion
            && let Some(axes) = motion.axes
        {
            let mut values = NUMBERS.format_all(axes.values());
            return match &motion.external_axes {
                Some(ext) if !ext.is_empty() => {
                    for slot in 0..AXIS_COUNT {
                        values.push(NUMBERS.format(ext.get(slot).unwrap_or(0.0)));
                    }
                    MOVE_JOINTS_EXT.fill(&values)
                }
                _ => MOVE_JOINTS.fill(&values),
            };
        }

        if let Some(pose) = motion.pose {
            let mut values =
                NUMBERS.format_all(&[pose.x, pose.y, pose.z, pose.a, pose.b, pose.c]);
            return match motion.configuration {
                Some(conf) => {
                    values.push(conf.0[0].to_string());
                    values.push(conf.0[1].to_string());
                    MOVE_POSE_CONF.fill(&values)
                }
                None => MOVE_POSE.fill(&values),
            };
        }

        if motion.axes.is_some() {
            Err(DialectError::InvalidMotionType {
                reason: "nonlinear motion is disabled and the frame carries no pose".to_string(),
            })
        } else {
            Err(DialectError::InvalidCommand {
                detail: "frame carries neither joint values nor a pose".to_string(),
            })
        }
    }
}
