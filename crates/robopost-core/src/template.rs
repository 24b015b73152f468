//! 结构与模板机制
//!
//! 每个后端用静态表声明它能渲染的程序元素：一个结构是
//! 一张有序字段名表加一条配对模板。模板里的占位符是字面
//! `{}` 子串，按字段声明顺序从左到右依次替换；字段数必须
//! 与占位符数相等，不等是后端写表时的缺陷（注册时断言，
//! 测试穷举），不是运行时条件。
//!
//! KRL / VAL3 的模板含有字面大括号（`PTP {A1 {}, ...}`），
//! 占位符按精确的 `{}` 子串识别，单个 `{` / `}` 不参与。

use crate::error::DialectError;

/// 一个可渲染的程序元素
#[derive(Debug, Clone, Copy)]
pub struct Structure {
    /// 结构名（如 `MOVE_JOINTS`、`RECORDS`、`CHECKSUM`）
    pub name: &'static str,
    /// 有序字段名表
    pub fields: &'static [&'static str],
    /// 与字段一一配对的格式模板
    pub template: &'static str,
}

impl Structure {
    /// 声明一个结构（后端表中使用）
    pub const fn new(
        name: &'static str,
        fields: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Structure {
            name,
            fields,
            template,
        }
    }

    /// 字段数
    #[inline]
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// 模板中的占位符数
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(self.template)
    }

    /// 按声明顺序把值填入模板
    ///
    /// 值的个数必须与字段数完全相等，否则报
    /// [`DialectError::InvalidCommand`]。
    pub fn fill(&self, values: &[String]) -> Result<String, DialectError> {
        if values.len() != self.arity() {
            return Err(DialectError::InvalidCommand {
                detail: format!(
                    "{}: expected {} values, got {}",
                    self.name,
                    self.arity(),
                    values.len()
                ),
            });
        }
        let mut text = self.template.to_string();
        for value in values {
            text = text.replacen("{}", value, 1);
        }
        Ok(text)
    }
}

/// 统计模板中的字面 `{}` 占位符个数
pub fn count_placeholders(template: &str) -> usize {
    template.matches("{}").count()
}

/// 把 `marker` 的首次出现整体替换为 `replacement`
///
/// 后处理阶段的另一条拼接原语（FANUC 的 `[MOTION]` 块展开、
/// 程序模板的插入点填充都走这里）。标记缺失立即报错。
pub fn replace_marker(
    text: &str,
    marker: &str,
    replacement: &str,
) -> Result<String, DialectError> {
    if !text.contains(marker) {
        return Err(DialectError::MarkerMissing {
            marker: marker.to_string(),
        });
    }
    Ok(text.replacen(marker, replacement, 1))
}

/// 把拼好的行块填入程序模板的唯一插入点
///
/// 程序模板必须恰好含一个 `{}` 插入点；缺失说明模板
/// 本身写错（或覆盖模板不合法），立即报错。
pub fn fill_program_template(template: &str, block: &str) -> Result<String, DialectError> {
    replace_marker(template, "{}", block)
}

/// 在 `marker` 首次出现之后插入 `insertion`
///
/// 后处理阶段的拼接原语（校验和行、FANUC 运动块）。
/// 标记缺失立即报错，绝不静默跳过。
pub fn splice_after_marker(
    text: &str,
    marker: &str,
    insertion: &str,
) -> Result<String, DialectError> {
    match text.find(marker) {
        Some(pos) => {
            let at = pos + marker.len();
            let mut out = String::with_capacity(text.len() + insertion.len());
            out.push_str(&text[..at]);
            out.push_str(insertion);
            out.push_str(&text[at..]);
            Ok(out)
        }
        None => Err(DialectError::MarkerMissing {
            marker: marker.to_string(),
        }),
    }
}
