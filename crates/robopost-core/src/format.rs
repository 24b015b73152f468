//! 数值格式化策略
//!
//! 每个后端声明一个 [`NumberFormat`]，逐字节决定浮点字段在
//! 程序文本里的样子。控制器对数值文本非常挑剔（符号、宽度、
//! 小数位都是格式的一部分），所以策略集中声明、单独测试，
//! 不允许后端各处手写格式串。

/// 浮点字段的渲染策略
///
/// 整数字段（配置标志、寄存器号、打包 IO 字）不走此策略，
/// 直接按十进制整数输出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// 固定小数位数；`None` 输出最短形式（`0` 而非 `0.0`）
    pub precision: Option<usize>,
    /// 非负值是否强制前导 `+`
    pub force_sign: bool,
    /// 含符号与小数点的总宽度，零填充；`None` 不填充
    pub pad_width: Option<usize>,
}

impl NumberFormat {
    /// 最短形式：无符号、无填充（RAPID、CSV）
    pub const SHORTEST: NumberFormat = NumberFormat {
        precision: None,
        force_sign: false,
        pad_width: None,
    };

    /// 固定小数位、无符号、无填充（KRL、VAL3、KAREL）
    pub const fn fixed(precision: usize) -> NumberFormat {
        NumberFormat {
            precision: Some(precision),
            force_sign: false,
            pad_width: None,
        }
    }

    /// 固定小数位、强制符号、零填充到总宽度（EntertainTech）
    pub const fn signed_padded(precision: usize, pad_width: usize) -> NumberFormat {
        NumberFormat {
            precision: Some(precision),
            force_sign: true,
            pad_width: Some(pad_width),
        }
    }

    /// 渲染一个浮点值
    pub fn format(&self, value: f64) -> String {
        match (self.precision, self.pad_width, self.force_sign) {
            (Some(p), Some(w), true) => format!("{value:+0w$.p$}"),
            (Some(p), Some(w), false) => format!("{value:0w$.p$}"),
            (Some(p), None, true) => format!("{value:+.p$}"),
            (Some(p), None, false) => format!("{value:.p$}"),
            (None, Some(w), true) => format!("{value:+0w$}"),
            (None, Some(w), false) => format!("{value:0w$}"),
            (None, None, true) => format!("{value:+}"),
            (None, None, false) => format!("{value}"),
        }
    }

    /// 渲染一组浮点值
    pub fn format_all(&self, values: &[f64]) -> Vec<String> {
        values.iter().map(|v| self.format(*v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试最短形式
    #[test]
    fn test_shortest() {
        let f = NumberFormat::SHORTEST;
        assert_eq!(f.format(0.0), "0");
        assert_eq!(f.format(1.5), "1.5");
        assert_eq!(f.format(-2.25), "-2.25");
        assert_eq!(f.format(123.0), "123");
    }

    /// 测试固定小数位
    #[test]
    fn test_fixed_precision() {
        let f = NumberFormat::fixed(4);
        assert_eq!(f.format(0.0), "0.0000");
        assert_eq!(f.format(-90.0), "-90.0000");
        assert_eq!(f.format(12.34567), "12.3457");

        let f = NumberFormat::fixed(3);
        assert_eq!(f.format(1.0), "1.000");
    }

    /// 测试强制符号加零填充（EntertainTech 列格式）
    #[test]
    fn test_signed_padded() {
        let time = NumberFormat::signed_padded(6, 12);
        assert_eq!(time.format(0.0), "+0000.000000");
        assert_eq!(time.format(0.012), "+0000.012000");
        assert_eq!(time.format(-1.5), "-0001.500000");

        let axis = NumberFormat::signed_padded(6, 16);
        assert_eq!(axis.format(0.0), "+00000000.000000");
        assert_eq!(axis.format(-90.0), "-00000090.000000");
        assert_eq!(axis.format(123.456), "+00000123.456000");
    }

    /// 测试批量渲染保持顺序
    #[test]
    fn test_format_all() {
        let f = NumberFormat::fixed(1);
        assert_eq!(
            f.format_all(&[1.0, -2.0, 3.25]),
            vec!["1.0", "-2.0", "3.2"]
        );
    }
}
