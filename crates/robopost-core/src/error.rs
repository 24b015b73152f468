//! 后处理器错误类型定义

use thiserror::Error;

/// 方言后端内部错误
///
/// 后端实现只描述"哪里不对"，不携带目标名和帧号；
/// 引擎在传播时通过 [`PostprocError`] 补充这些上下文。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialectError {
    /// 当前选项下无法表达所需的运动类型
    #[error("invalid motion type: {reason}")]
    InvalidMotionType {
        /// 失败原因（如 "linear motion is not available"）
        reason: String,
    },

    /// 命令字段与任何已声明的结构都不匹配
    #[error("invalid command: {detail}")]
    InvalidCommand {
        /// 具体不匹配的描述
        detail: String,
    },

    /// 程序模板缺少必需的插入标记
    #[error("template marker not found: {marker:?}")]
    MarkerMissing {
        /// 缺失的字面标记
        marker: String,
    },
}

/// 选项配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// 选项名不在已声明的闭集内
    #[error("unknown option: {name:?}")]
    UnknownOption {
        /// 调用方提供的名字
        name: String,
    },
}

/// 程序生成的对外错误类型
///
/// 所有失败都是致命的：一次生成要么产出完整程序文本，要么
/// 返回错误且不产出任何部分结果。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostprocError {
    /// 调用方请求了未声明的选项名
    #[error("unknown option: {name:?}")]
    UnknownOption {
        /// 调用方提供的名字
        name: String,
    },

    /// 注册表中不存在请求的 (厂商, 方言) 组合
    #[error("unknown processor: {family} {dialect}")]
    UnknownProcessor {
        /// 机器人厂商/家族名
        family: String,
        /// 方言名
        dialect: String,
    },

    /// 某一帧在当前选项下无法编码为该方言支持的运动类型
    #[error("{target}: frame {frame}: invalid motion type: {reason}")]
    InvalidMotionType {
        /// 后端目标名
        target: String,
        /// 失败帧的下标（从 0 开始）
        frame: usize,
        /// 失败原因
        reason: String,
    },

    /// 命令与后端声明的结构/模板不匹配
    #[error("{target}: {}invalid command: {detail}", frame.map(|i| format!("frame {i}: ")).unwrap_or_default())]
    InvalidCommand {
        /// 后端目标名
        target: String,
        /// 失败帧的下标；装配阶段的失败没有帧号
        frame: Option<usize>,
        /// 具体不匹配的描述
        detail: String,
    },

    /// 程序模板缺少必需的插入标记
    #[error("{target}: template marker not found: {marker:?}")]
    TemplateMarkerMissing {
        /// 后端目标名
        target: String,
        /// 缺失的字面标记
        marker: String,
    },
}

impl PostprocError {
    /// 将后端内部错误提升为对外错误，附加目标名与帧号
    pub fn from_dialect(err: DialectError, target: &str, frame: Option<usize>) -> Self {
        match err {
            DialectError::InvalidMotionType { reason } => PostprocError::InvalidMotionType {
                target: target.to_string(),
                frame: frame.unwrap_or(0),
                reason,
            },
            DialectError::InvalidCommand { detail } => PostprocError::InvalidCommand {
                target: target.to_string(),
                frame,
                detail,
            },
            DialectError::MarkerMissing { marker } => PostprocError::TemplateMarkerMissing {
                target: target.to_string(),
                marker,
            },
        }
    }
}

impl From<OptionsError> for PostprocError {
    fn from(err: OptionsError) -> Self {
        match err {
            OptionsError::UnknownOption { name } => PostprocError::UnknownOption { name },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试 DialectError 的 Display 实现
    #[test]
    fn test_dialect_error_display() {
        let err = DialectError::InvalidMotionType {
            reason: "linear motion is not available".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "invalid motion type: linear motion is not available"
        );

        let err = DialectError::InvalidCommand {
            detail: "expected 6 values, got 5".to_string(),
        };
        assert_eq!(format!("{}", err), "invalid command: expected 6 values, got 5");

        let err = DialectError::MarkerMissing {
            marker: "[HEADER]\n".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("template marker not found"));
        assert!(msg.contains("[HEADER]"));
    }

    /// 测试 PostprocError 的 Display 实现
    #[test]
    fn test_postproc_error_display() {
        let err = PostprocError::UnknownProcessor {
            family: "Unknown".to_string(),
            dialect: "Dialect".to_string(),
        };
        assert_eq!(format!("{}", err), "unknown processor: Unknown Dialect");

        let err = PostprocError::InvalidMotionType {
            target: "ABB RAPID".to_string(),
            frame: 3,
            reason: "no linear structure".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.starts_with("ABB RAPID: frame 3:"));
        assert!(msg.contains("no linear structure"));
    }

    /// 测试 InvalidCommand 有无帧号两种形态
    #[test]
    fn test_invalid_command_frame_context() {
        let with_frame = PostprocError::InvalidCommand {
            target: "KUKA KRL".to_string(),
            frame: Some(7),
            detail: "bad".to_string(),
        };
        assert_eq!(format!("{}", with_frame), "KUKA KRL: frame 7: invalid command: bad");

        let without_frame = PostprocError::InvalidCommand {
            target: "KUKA KRL".to_string(),
            frame: None,
            detail: "bad".to_string(),
        };
        assert_eq!(format!("{}", without_frame), "KUKA KRL: invalid command: bad");
    }

    /// 测试 from_dialect 的上下文补充
    #[test]
    fn test_from_dialect_adds_context() {
        let err = DialectError::InvalidCommand {
            detail: "arity mismatch".to_string(),
        };
        let lifted = PostprocError::from_dialect(err, "FANUC KAREL", Some(12));
        match lifted {
            PostprocError::InvalidCommand { target, frame, detail } => {
                assert_eq!(target, "FANUC KAREL");
                assert_eq!(frame, Some(12));
                assert_eq!(detail, "arity mismatch");
            }
            _ => panic!("Expected InvalidCommand variant"),
        }

        let err = DialectError::MarkerMissing {
            marker: "[MOTION]\n".to_string(),
        };
        let lifted = PostprocError::from_dialect(err, "FANUC KAREL", None);
        assert!(matches!(lifted, PostprocError::TemplateMarkerMissing { .. }));
    }

    /// 测试 OptionsError 到 PostprocError 的转换
    #[test]
    fn test_from_options_error() {
        let err = OptionsError::UnknownOption {
            name: "include_sound".to_string(),
        };
        let lifted: PostprocError = err.into();
        match lifted {
            PostprocError::UnknownOption { name } => assert_eq!(name, "include_sound"),
            _ => panic!("Expected UnknownOption variant"),
        }
    }
}
