//! # Robopost CLI
//!
//! 后处理器的命令行外壳：读入帧列表（JSON），解析目标后端，
//! 驱动生成，把程序文本写到磁盘。所有生成逻辑都在库里，
//! 这里只做 IO 与参数装配。
//!
//! ```bash
//! # 列出全部目标（默认目标在最前）
//! robopost list
//!
//! # 查看某个目标的选项矩阵
//! robopost show "KUKA EntertainTech"
//!
//! # 生成：输出文件名默认取输入名换上后端扩展名
//! robopost generate --target "ABB RAPID" --input frames.json
//!
//! # 覆盖单个选项 / 从 TOML 读一组选项 / 覆盖程序模板
//! robopost generate --target "General CSV" --input frames.json \
//!     --set include_digital_outputs=false \
//!     --options-file job.toml \
//!     --template custom.tmpl \
//!     --output out.csv
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use robopost::{Frame, OptionName, ProcessorRegistry, UserOptions};

/// Robopost - 机器人程序后处理器命令行工具
#[derive(Parser, Debug)]
#[command(name = "robopost")]
#[command(about = "Translate per-frame robot commands into controller programs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 列出全部可用目标
    List,

    /// 查看一个目标的元数据与选项矩阵
    Show {
        /// 目标名，如 "KUKA EntertainTech"
        target: String,
    },

    /// 从帧列表生成程序文件
    Generate {
        /// 目标名，如 "ABB RAPID"
        #[arg(short, long)]
        target: String,

        /// 帧列表 JSON 文件
        #[arg(short, long)]
        input: PathBuf,

        /// 输出文件；缺省为输入名换上后端扩展名
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 覆盖单个选项（可重复），如 --set include_checksum=false
        #[arg(long = "set", value_name = "OPTION=BOOL")]
        set: Vec<String>,

        /// 选项文件（TOML 布尔表）
        #[arg(long)]
        options_file: Option<PathBuf>,

        /// 程序模板覆盖文件
        #[arg(long)]
        template: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("robopost=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            for name in ProcessorRegistry::global().list_names() {
                println!("{name}");
            }
            Ok(())
        }

        Commands::Show { target } => show_target(&target),

        Commands::Generate {
            target,
            input,
            output,
            set,
            options_file,
            template,
        } => generate(&target, &input, output, &set, options_file, template),
    }
}

/// 打印一个目标的元数据与选项矩阵
fn show_target(target: &str) -> Result<()> {
    let processor = ProcessorRegistry::global()
        .resolve_name(target)
        .with_context(|| format!("cannot resolve target {target:?}"))?;

    let info = processor.target();
    let supported = processor.dialect().supported_options();
    let defaults = processor.default_options();

    println!("target:    {}", info.name());
    println!("extension: {}", info.extension);
    println!("options:");
    for name in OptionName::ALL {
        if supported.supports(name) {
            let default = if defaults.get(name) { "on" } else { "off" };
            println!("  {:<26} (default {default})", name.as_str());
        }
    }
    Ok(())
}

/// 装配选项并驱动一次生成
fn generate(
    target: &str,
    input: &Path,
    output: Option<PathBuf>,
    set: &[String],
    options_file: Option<PathBuf>,
    template: Option<PathBuf>,
) -> Result<()> {
    let registry = ProcessorRegistry::global();
    let mut processor = registry
        .resolve_name(target)
        .with_context(|| format!("cannot resolve target {target:?}"))?;

    let text = fs::read_to_string(input)
        .with_context(|| format!("cannot read frame list {}", input.display()))?;
    let frames: Vec<Frame> = serde_json::from_str(&text)
        .with_context(|| format!("cannot parse frame list {}", input.display()))?;

    // 选项优先级：后端默认 < 选项文件 < --set
    let mut options = processor.default_options();
    if let Some(path) = &options_file {
        apply_options_file(&mut options, path)?;
    }
    for assignment in set {
        apply_assignment(&mut options, assignment)?;
    }

    if let Some(path) = &template {
        let custom = fs::read_to_string(path)
            .with_context(|| format!("cannot read template {}", path.display()))?;
        processor.set_program_template(custom);
    }

    info!(target_name = %processor.target().name(), frames = frames.len(), "generating");
    let program = processor
        .generate_program(&frames, &options)
        .context("program generation failed")?;

    let output = output.unwrap_or_else(|| {
        // ".prg" -> "prg"：with_extension 不吃前导点
        input.with_extension(processor.target().extension.trim_start_matches('.'))
    });
    fs::write(&output, &program)
        .with_context(|| format!("cannot write program {}", output.display()))?;

    println!("{}", output.display());
    Ok(())
}

/// 读入 TOML 布尔表并套用到选项上
fn apply_options_file(options: &mut UserOptions, path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read options file {}", path.display()))?;
    let table: toml::Table = toml::from_str(&text)
        .with_context(|| format!("cannot parse options file {}", path.display()))?;
    for (key, value) in &table {
        let name = OptionName::parse(key)
            .with_context(|| format!("in options file {}", path.display()))?;
        let Some(value) = value.as_bool() else {
            bail!(
                "in options file {}: option {key:?} must be a boolean",
                path.display()
            );
        };
        options.set(name, value);
    }
    Ok(())
}

/// 套用一条 `option=bool` 形式的命令行覆盖
fn apply_assignment(options: &mut UserOptions, assignment: &str) -> Result<()> {
    let Some((key, value)) = assignment.split_once('=') else {
        bail!("invalid --set {assignment:?}, expected OPTION=BOOL");
    };
    let name = OptionName::parse(key).with_context(|| format!("in --set {assignment:?}"))?;
    let value: bool = value
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid --set {assignment:?}, value must be true or false"))?;
    options.set(name, value);
    Ok(())
}
