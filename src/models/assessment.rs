//! 合规性判定模型

use serde::{Deserialize, Serialize};

/// 完全符合
pub const FULL_COMPLIANCE: &str = "○";
/// 部分符合
pub const PARTIAL_COMPLIANCE: &str = "△";
/// 不符合
pub const NON_COMPLIANCE: &str = "×";

/// 合规状态分类
///
/// 远程服务约定只返回三种序数符号；其他取值属于数据契约之外的情况，
/// 按其字面符号归入 `Unknown` 保留，不丢弃
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComplianceStatus {
    /// 完全符合（○）
    Compliant,
    /// 部分符合（△）
    Partial,
    /// 不符合（×）
    NonCompliant,
    /// 契约之外的符号，保留字面值
    Unknown(String),
}

impl ComplianceStatus {
    /// 从状态符号解析
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            FULL_COMPLIANCE => ComplianceStatus::Compliant,
            PARTIAL_COMPLIANCE => ComplianceStatus::Partial,
            NON_COMPLIANCE => ComplianceStatus::NonCompliant,
            other => ComplianceStatus::Unknown(other.to_string()),
        }
    }

    /// 状态符号字面值
    pub fn symbol(&self) -> &str {
        match self {
            ComplianceStatus::Compliant => FULL_COMPLIANCE,
            ComplianceStatus::Partial => PARTIAL_COMPLIANCE,
            ComplianceStatus::NonCompliant => NON_COMPLIANCE,
            ComplianceStatus::Unknown(symbol) => symbol,
        }
    }

    /// 展示用名称
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "符合",
            ComplianceStatus::Partial => "部分符合",
            ComplianceStatus::NonCompliant => "不符合",
            ComplianceStatus::Unknown(_) => "未知",
        }
    }
}

/// 单条要求的合规性判定（评估载荷的组成部分）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceAssessment {
    /// 被判定的要求原文
    pub original_item: String,
    /// 判定内容
    pub assessment: AssessmentVerdict,
}

/// 判定内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentVerdict {
    /// 合规符号（○ / △ / ×，其他取值按未知类别保留）
    pub compliance_status: String,
    /// 判定理由
    #[serde(default)]
    pub reasoning: String,
    /// 替代方案（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_solution: Option<String>,
    /// 参考来源（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_source: Option<String>,
}

impl ComplianceAssessment {
    /// 判定的合规状态分类
    pub fn status(&self) -> ComplianceStatus {
        ComplianceStatus::from_symbol(&self.assessment.compliance_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_symbol_known() {
        assert_eq!(ComplianceStatus::from_symbol("○"), ComplianceStatus::Compliant);
        assert_eq!(ComplianceStatus::from_symbol("△"), ComplianceStatus::Partial);
        assert_eq!(ComplianceStatus::from_symbol("×"), ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_from_symbol_unknown_keeps_literal() {
        let status = ComplianceStatus::from_symbol("?");
        assert_eq!(status, ComplianceStatus::Unknown("?".to_string()));
        assert_eq!(status.symbol(), "?");
        assert_eq!(status.label(), "未知");
    }

    #[test]
    fn test_symbol_roundtrip() {
        for symbol in [FULL_COMPLIANCE, PARTIAL_COMPLIANCE, NON_COMPLIANCE] {
            assert_eq!(ComplianceStatus::from_symbol(symbol).symbol(), symbol);
        }
    }

    #[test]
    fn test_deserialize_wire_item() {
        let json = r#"{
            "original_item": "req1",
            "assessment": {
                "compliance_status": "○",
                "reasoning": "ok"
            }
        }"#;
        let item: ComplianceAssessment = serde_json::from_str(json).expect("解析失败");
        assert_eq!(item.original_item, "req1");
        assert_eq!(item.status(), ComplianceStatus::Compliant);
        assert_eq!(item.assessment.reasoning, "ok");
        assert!(item.assessment.alternative_solution.is_none());
        assert!(item.assessment.reference_source.is_none());
    }
}
