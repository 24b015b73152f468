//! # Robopost Dialects
//!
//! 内置方言后端与处理器注册表
//!
//! ## 后端清单
//!
//! | 目标名 | 扩展名 | 形态 |
//! | --- | --- | --- |
//! | `ABB RAPID` | `.prg` | 关节运动（`MoveAbsJ`） |
//! | `KUKA KRL` | `.src` | 关节 `PTP` / 直线 `LIN` |
//! | `KUKA EntertainTech` | `.emily` | 记录行 + CRC-32 校验和 |
//! | `FANUC KAREL` | `.ls` | 编号位置 + `/MN` 运动块 |
//! | `Staubli VAL3` | `.pgx` | 关节运动（XML 程序文档） |
//! | `General CSV` / `General TSV` | `.csv` / `.tsv` | 分隔值记录 |
//!
//! 每个后端一个模块，实现 `robopost-core` 的 [`Dialect`] trait：
//! 声明目标元数据、支持的选项、数值策略、结构/模板表，以及
//! 需要时的程序级后处理。新方言照同样的样子加一个模块、
//! 在 [`ProcessorRegistry::with_defaults`] 里登记即可。
//!
//! [`Dialect`]: robopost_core::Dialect

pub mod csv;
pub mod entertaintech;
pub mod karel;
pub mod krl;
pub mod rapid;
pub mod registry;
pub mod val3;

pub use csv::Csv;
pub use entertaintech::{DEFAULT_TIME_STEP, EntertainTech};
pub use karel::Karel;
pub use krl::Krl;
pub use rapid::Rapid;
pub use registry::{DEFAULT_TARGET, DialectConstructor, ProcessorRegistry};
pub use val3::Val3;
