//! 结构/模板与数值策略的性质测试

use proptest::prelude::*;
use robopost::{DialectError, NumberFormat, ProcessorRegistry, Structure};

/// 全部内置后端的结构表：字段数 == 占位符数
#[test]
fn test_structure_arity_invariant_all_backends() {
    let registry = ProcessorRegistry::with_defaults();
    for name in registry.list_names() {
        let pp = registry.resolve_name(&name).unwrap();
        for structure in pp.dialect().structures() {
            assert_eq!(
                structure.arity(),
                structure.placeholder_count(),
                "{name}: structure {} is misconfigured",
                structure.name
            );
        }
    }
}

const PROBE: Structure = Structure::new("PROBE", &["a", "b", "c"], "A={} B={} C={}");

proptest! {
    /// fill 恰在值数等于字段数时成功
    #[test]
    fn prop_fill_succeeds_iff_exact_arity(count in 0usize..8) {
        let values: Vec<String> = (0..count).map(|i| i.to_string()).collect();
        let result = PROBE.fill(&values);
        if count == PROBE.arity() {
            prop_assert_eq!(result.unwrap(), "A=0 B=1 C=2");
        } else {
            prop_assert!(
                matches!(result, Err(DialectError::InvalidCommand { .. })),
                "expected InvalidCommand for {} values",
                count
            );
        }
    }

    /// 填充结果不再含占位符，且值按声明顺序出现
    #[test]
    fn prop_fill_consumes_all_placeholders(a in -1000.0f64..1000.0, b in -1000.0f64..1000.0, c in -1000.0f64..1000.0) {
        let format = NumberFormat::fixed(3);
        let values = format.format_all(&[a, b, c]);
        let line = PROBE.fill(&values).unwrap();
        prop_assert!(
            !line.contains("{}"),
            "unfilled placeholder left in {:?}",
            line
        );
        let pos_a = line.find(&values[0]).unwrap();
        let pos_c = line.rfind(&values[2]).unwrap();
        prop_assert!(pos_a < pos_c);
    }

    /// 固定小数位渲染总是恰好 n 位小数
    #[test]
    fn prop_fixed_precision_digit_count(value in -10000.0f64..10000.0, precision in 0usize..7) {
        let format = NumberFormat {
            precision: Some(precision),
            force_sign: false,
            pad_width: None,
        };
        let text = format.format(value);
        if precision == 0 {
            prop_assert!(!text.contains('.'));
        } else {
            let decimals = text.split('.').nth(1).unwrap();
            prop_assert_eq!(decimals.len(), precision);
        }
    }

    /// 符号加填充的渲染总是达到声明宽度且首字符是符号
    #[test]
    fn prop_signed_padded_width(value in -9999.0f64..9999.0) {
        let format = NumberFormat::signed_padded(6, 12);
        let text = format.format(value);
        prop_assert_eq!(text.len(), 12);
        prop_assert!(text.starts_with('+') || text.starts_with('-'));
        // 渲染结果可以按原精度读回
        let parsed: f64 = text.parse().unwrap();
        prop_assert!((parsed - value).abs() < 1e-6 + 1e-9);
    }

    /// 任意帧列表对 CSV 生成都不会失败，行数不超过帧数
    #[test]
    fn prop_csv_never_fails(times in proptest::collection::vec(proptest::option::of(0.0f64..100.0), 0..20)) {
        let frames: Vec<robopost::Frame> = times
            .iter()
            .map(|t| match t {
                Some(t) => robopost::Frame::new().with_time(*t),
                None => robopost::Frame::new(),
            })
            .collect();
        let program = robopost::generate("General", "CSV", &frames, None).unwrap();
        let populated = times.iter().filter(|t| t.is_some()).count();
        let rows = program.lines().filter(|l| !l.is_empty()).count();
        prop_assert_eq!(rows, populated);
    }
}
