//! KUKA EntertainTech 后端
//!
//! 生成 `.emily` 记录文件：每帧一行时间戳加六关节角，可附带
//! 按位打包的数字输出字。列格式是控制器逐字节校验的：固定
//! 六位小数、强制符号、零填充（时间列总宽 12、关节列总宽 16）。
//!
//! 程序头部携带记录块的 CRC-32：生成结束后把累计的记录文本
//! 剥去全部空白计算校验和，拼成 `CRC = ...` 行插到
//! `[HEADER]` 标记之后。默认用娱乐工具链的 JAMCRC 变体
//! （[`Crc32::Jam`]），可通过 builder 换成标准 CRC-32。
//!
//! 实例内带一个递增时钟：无时间戳的帧用时钟值补齐，有时间戳
//! 的帧以帧值为准；两种情况下时钟都推进一个步长，混合帧序列
//! 在显式时间戳之后仍保持单调。

use robopost_core::{
    Command, Crc32, Dialect, DialectError, Frame, NumberFormat, OptionName, RecordsCommand,
    Structure, SupportedOptions, TargetInfo, UserOptions, splice_after_marker,
};

/// 默认时间步长：12 毫秒插补周期
pub const DEFAULT_TIME_STEP: f64 = 0.012;

/// 校验和插入标记
const HEADER_MARKER: &str = "[HEADER]\n";

/// 时间列：六位小数、强制符号、总宽 12
const TIME_FORMAT: NumberFormat = NumberFormat::signed_padded(6, 12);

/// 关节列：六位小数、强制符号、总宽 16
const AXIS_FORMAT: NumberFormat = NumberFormat::signed_padded(6, 16);

/// 记录行：时间 + 六关节
const RECORDS: Structure = Structure::new(
    "RECORDS",
    &["time", "a1", "a2", "a3", "a4", "a5", "a6"],
    "{}  {}  {}  {}  {}  {}  {}",
);

/// 记录行加打包数字输出字
const RECORDS_IO: Structure = Structure::new(
    "RECORDS_IO",
    &["time", "a1", "a2", "a3", "a4", "a5", "a6", "digital"],
    "{}  {}  {}  {}  {}  {}  {}  {}",
);

/// 校验和行
const CHECKSUM: Structure = Structure::new("CHECKSUM", &["crc"], "CRC = {}");

const STRUCTURES: &[Structure] = &[RECORDS, RECORDS_IO, CHECKSUM];

const PROGRAM_TEMPLATE: &str = "\
[HEADER]
  ROBOT_NAME = KR
  TIME_STEP = 0.012
  DATA_TYPE = E6AXIS
[RECORDS]
{}
[END]
";

/// KUKA EntertainTech 方言
pub struct EntertainTech {
    template: String,
    crc: Crc32,
    time_step: f64,
    clock: f64,
    /// 本次生成已发出的记录行（校验和的输入）
    records: String,
}

impl EntertainTech {
    pub fn new() -> Self {
        EntertainTech {
            template: PROGRAM_TEMPLATE.to_string(),
            crc: Crc32::Jam,
            time_step: DEFAULT_TIME_STEP,
            clock: 0.0,
            records: String::new(),
        }
    }

    /// 换用另一个 CRC-32 变体
    pub fn with_checksum(mut self, crc: Crc32) -> Self {
        self.crc = crc;
        self
    }

    /// 覆盖时间步长（秒）
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// 当前声明的 CRC-32 变体
    pub fn checksum_variant(&self) -> Crc32 {
        self.crc
    }

    /// 把数字输出按声明顺序打包成整数字（首项为 bit 0）
    fn pack_digital(command: &RecordsCommand) -> u32 {
        command
            .digital_outputs
            .iter()
            .enumerate()
            .fold(0u32, |word, (bit, output)| {
                if output.value { word | (1 << bit) } else { word }
            })
    }
}

impl Default for EntertainTech {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for EntertainTech {
    fn target(&self) -> TargetInfo {
        TargetInfo::new("KUKA", "EntertainTech", ".emily")
    }

    fn supported_options(&self) -> SupportedOptions {
        SupportedOptions(&[
            OptionName::IncludeAxes,
            OptionName::IncludeDigitalOutputs,
            OptionName::IncludeChecksum,
        ])
    }

    fn default_options(&self) -> UserOptions {
        UserOptions::default()
            .with(OptionName::IncludeAxes, true)
            .with(OptionName::IncludeChecksum, true)
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
        self.clock = 0.0;
        self.records.clear();
    }

    fn format_command(&mut self, frame: &Frame) -> Option<Command> {
        RecordsCommand::from_frame(frame).map(Command::Records)
    }

    fn process_command(
        &mut self,
        command: &Command,
        _options: &UserOptions,
    ) -> Result<String, DialectError> {
        let Command::Records(records) = command else {
            return Err(DialectError::InvalidCommand {
                detail: "EntertainTech renders records commands only".to_string(),
            });
        };
        let axes = records.axes.ok_or_else(|| DialectError::InvalidCommand {
            detail: "records line requires six joint values".to_string(),
        })?;

        // 帧时间戳优先于内部时钟；两种情况下时钟都向前推进
        let time = records.time_index.unwrap_or(self.clock);
        self.clock = time + self.time_step;

        let mut values = vec![TIME_FORMAT.format(time)];
        values.extend(AXIS_FORMAT.format_all(axes.values()));

        let line = if records.digital_outputs.is_empty() {
            RECORDS.fill(&values)?
        } else {
            values.push(Self::pack_digital(records).to_string());
            RECORDS_IO.fill(&values)?
        };

        self.records.push_str(&line);
        self.records.push('\n');
        Ok(line)
    }

    fn post_process(
        &mut self,
        program: String,
        options: &UserOptions,
    ) -> Result<String, DialectError> {
        if !options.include_checksum {
            return Ok(program);
        }
        let checksum = self.crc.records_checksum(&self.records);
        let line = CHECKSUM.fill(&[checksum.to_string()])?;
        splice_after_marker(&program, HEADER_MARKER, &format!("{line}\n"))
    }
}
