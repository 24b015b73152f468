//! 通用 CSV / TSV 后端
//!
//! 不针对任何控制器：把每帧的字段按固定顺序（时间、关节、
//! 外部轴、数字输出、模拟输出）拼成一行分隔值，供分析工具和
//! 自定义导入管线消费。行是按字段存在性动态拼出来的，不走
//! 位置占位模板，结构表为空（元数一致性不变式对它空成立）。
//!
//! TSV 是同一个后端换成制表符分隔；两者在注册表里是两个
//! 目标名。

use robopost_core::{
    Command, Dialect, DialectError, Frame, NumberFormat, OptionName, RecordsCommand, Structure,
    SupportedOptions, TargetInfo, UserOptions,
};

/// 数值策略：最短形式
const NUMBERS: NumberFormat = NumberFormat::SHORTEST;

/// 程序模板：行块本身即程序，无头尾文本
const PROGRAM_TEMPLATE: &str = "{}\n";

/// 通用分隔值方言（CSV / TSV）
pub struct Csv {
    target: TargetInfo,
    delimiter: &'static str,
    template: String,
}

impl Csv {
    /// 逗号分隔（`.csv`）
    pub fn csv() -> Self {
        Csv {
            target: TargetInfo::new("General", "CSV", ".csv"),
            delimiter: ",",
            template: PROGRAM_TEMPLATE.to_string(),
        }
    }

    /// 制表符分隔（`.tsv`）
    pub fn tsv() -> Self {
        Csv {
            target: TargetInfo::new("General", "TSV", ".tsv"),
            delimiter: "\t",
            template: PROGRAM_TEMPLATE.to_string(),
        }
    }
}

impl Dialect for Csv {
    fn target(&self) -> TargetInfo {
        self.target
    }

    fn supported_options(&self) -> SupportedOptions {
        SupportedOptions(&[
            OptionName::IncludeAxes,
            OptionName::IncludeExternalAxes,
            OptionName::IncludeDigitalOutputs,
            OptionName::IncludeAnalogOutputs,
        ])
    }

    fn default_options(&self) -> UserOptions {
        UserOptions::default()
            .with(OptionName::IncludeAxes, true)
            .with(OptionName::IncludeExternalAxes, true)
            .with(OptionName::IncludeDigitalOutputs, true)
            .with(OptionName::IncludeAnalogOutputs, true)
    }

    fn program_template(&self) -> &str {
        &self.template
    }

    fn set_program_template(&mut self, template: String) {
        self.template = template;
    }

    fn structures(&self) -> &'static [Structure] {
        &[]
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
                detail: "CSV renders records commands only".to_string(),
            });
        };

        let mut fields = Vec::new();
        if let Some(time) = records.time_index {
            fields.push(NUMBERS.format(time));
        }
        if let Some(axes) = records.axes {
            fields.extend(NUMBERS.format_all(axes.values()));
        }
        if let Some(ext) = &records.external_axes {
            // 未知槽位渲染为空字段，保持列对齐
            for slot in ext.0.iter() {
                fields.push(slot.map(|v| NUMBERS.format(v)).unwrap_or_default());
            }
        }
        for output in &records.digital_outputs {
            fields.push(if output.value { "1" } else { "0" }.to_string());
        }
        for output in &records.analog_outputs {
            fields.push(NUMBERS.format(output.value));
        }
        Ok(fields.join(self.delimiter))
    }
}
