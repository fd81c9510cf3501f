//! 合规结果汇总 - 业务能力层
//!
//! 纯函数层：只读取评估载荷，派生各合规状态的计数与占比，
//! 不持有状态，不产生副作用

use std::collections::BTreeMap;

use crate::models::assessment::ComplianceAssessment;

/// 合规状态计数汇总
///
/// 计数按字面状态符号归类（契约之外的符号按其字面值保留，不丢弃），
/// 各项计数之和恒等于判定条目总数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplianceSummary {
    counts: BTreeMap<String, usize>,
    total: usize,
}

/// 汇总一次评估的全部合规判定
///
/// 每个条目恰好被计数一次，键为其字面状态符号
pub fn aggregate_compliance(items: &[ComplianceAssessment]) -> ComplianceSummary {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(item.assessment.compliance_status.clone()).or_insert(0) += 1;
    }
    ComplianceSummary {
        counts,
        total: items.len(),
    }
}

impl ComplianceSummary {
    /// 指定符号的条目数
    pub fn count_of(&self, symbol: &str) -> usize {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// 指定符号的占比（四舍五入到整数百分比）
    ///
    /// 判定列表为空是合法的退化输入，占比按 0 处理，不做除零
    pub fn percentage(&self, symbol: &str) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.count_of(symbol) * 100) as f64 / self.total as f64).round() as u32
    }

    /// 判定条目总数
    pub fn total(&self) -> usize {
        self.total
    }

    /// 出现过的符号及其计数（按符号排序，迭代顺序稳定）
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(symbol, count)| (symbol.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
