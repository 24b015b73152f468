//! 处理器注册表
//!
//! 从固定的后端清单出发，把 `"{厂商} {方言}"` 名字映射到后端
//! 构造器。注册表构造一次、之后只读；`resolve` 每次都构造全新
//! 的后端实例，带实例内计数器的后端因此天然满足"并发生成
//! 各用各的实例"的纪律。
//!
//! 进程级共享表通过 [`ProcessorRegistry::global`] 暴露
//! （`OnceLock`，首次访问构造）；测试可以另建独立实例。

use std::collections::BTreeMap;
use std::sync::OnceLock;

use robopost_core::{Dialect, PostProcessor, PostprocError, TargetInfo};
use tracing::debug;

use crate::csv::Csv;
use crate::entertaintech::EntertainTech;
use crate::karel::Karel;
use crate::krl::Krl;
use crate::rapid::Rapid;
use crate::val3::Val3;

/// 默认目标：在 `list_names` 里提到最前面
pub const DEFAULT_TARGET: &str = "KUKA EntertainTech";

/// 后端构造器：每次调用产出一个全新实例
pub type DialectConstructor = fn() -> Box<dyn Dialect>;

/// 方言后端注册表
pub struct ProcessorRegistry {
    backends: BTreeMap<String, DialectConstructor>,
    default_name: Option<String>,
}

impl ProcessorRegistry {
    /// 空注册表（测试、自定义清单用）
    pub fn new() -> Self {
        ProcessorRegistry {
            backends: BTreeMap::new(),
            default_name: None,
        }
    }

    /// 装入全部内置后端的注册表
    pub fn with_defaults() -> Self {
        let mut registry = ProcessorRegistry::new();
        registry.register(|| Box::new(Rapid::new()));
        registry.register(|| Box::new(Krl::new()));
        registry.register(|| Box::new(EntertainTech::new()));
        registry.register(|| Box::new(Karel::new()));
        registry.register(|| Box::new(Val3::new()));
        registry.register(|| Box::new(Csv::csv()));
        registry.register(|| Box::new(Csv::tsv()));
        registry.set_default(DEFAULT_TARGET);
        registry
    }

    /// 进程级共享注册表
    pub fn global() -> &'static ProcessorRegistry {
        static GLOBAL: OnceLock<ProcessorRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ProcessorRegistry::with_defaults)
    }

    /// 注册一个后端构造器
    ///
    /// 注册名取自构造出的实例的目标元数据。结构表的元数一致性
    /// （字段数 == 占位符数）是写表时的不变式，在这里断言。
    pub fn register(&mut self, constructor: DialectConstructor) {
        let probe = constructor();
        let name = probe.target().name();
        for structure in probe.structures() {
            debug_assert_eq!(
                structure.arity(),
                structure.placeholder_count(),
                "structure {} of {}: field count differs from placeholder count",
                structure.name,
                name,
            );
        }
        debug!(target_name = %name, "dialect registered");
        self.backends.insert(name, constructor);
    }

    /// 指定 `list_names` 里提前的默认目标
    pub fn set_default(&mut self, name: &str) {
        self.default_name = Some(name.to_string());
    }

    /// 解析 (厂商, 方言) 为一个可驱动生成的处理器
    ///
    /// 每次调用返回全新的后端实例。
    pub fn resolve(&self, family: &str, dialect: &str) -> Result<PostProcessor, PostprocError> {
        let name = format!("{family} {dialect}");
        match self.backends.get(&name) {
            Some(constructor) => Ok(PostProcessor::new(constructor())),
            None => Err(PostprocError::UnknownProcessor {
                family: family.to_string(),
                dialect: dialect.to_string(),
            }),
        }
    }

    /// 按完整注册名解析（首个空格拆分厂商与方言）
    pub fn resolve_name(&self, name: &str) -> Result<PostProcessor, PostprocError> {
        match name.split_once(' ') {
            Some((family, dialect)) => self.resolve(family, dialect),
            None => Err(PostprocError::UnknownProcessor {
                family: name.to_string(),
                dialect: String::new(),
            }),
        }
    }

    /// 全部注册名：字典序，默认目标（若已注册）提到最前
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.keys().cloned().collect();
        if let Some(default) = &self.default_name
            && let Some(pos) = names.iter().position(|n| n == default)
        {
            let promoted = names.remove(pos);
            names.insert(0, promoted);
        }
        names
    }

    /// 全部目标元数据（`list_names` 同序）
    pub fn targets(&self) -> Vec<TargetInfo> {
        self.list_names()
            .iter()
            .map(|name| {
                // list_names 只返回已注册的名字
                (self.backends[name])().target()
            })
            .collect()
    }

    /// 是否注册了该名字
    pub fn contains(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// 注册的后端数
    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
