// Response module - validates the backend's `analysis` payload once
//
// The backend returns free-form JSON produced by a language model. Everything
// downstream pattern-matches on `AnalysisResponse`, so all shape checks live
// here: the discriminant key picks the variant, nested data either decodes
// completely or the whole response is Invalid. The optional savings block is
// the exception and degrades to absent.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tagged result of one analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResponse {
    Report(MedicalReport),
    Bill(BillAudit),
    Invalid(InvalidReason),
}

/// Why a payload could not be rendered as a report or a bill
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum InvalidReason {
    /// No `analysis` value at all (or it was null)
    Missing,
    /// `analysis` is not an object, or has neither `findings` nor `audit_findings`
    NoDiscriminant,
    /// Discriminant present but the nested data did not decode
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicalReport {
    pub summary: String,
    pub findings: Vec<Finding>,
    #[serde(flatten)]
    pub closing: Closing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(default, deserialize_with = "lenient_text")]
    pub parameter: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillAudit {
    /// 0-100 when the backend behaves; kept as sent otherwise
    pub bill_trust_score: Option<f64>,
    pub audit_findings: Vec<AuditFinding>,
    pub savings_opportunity: Option<SavingsOpportunity>,
    #[serde(flatten)]
    pub closing: Closing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFinding {
    #[serde(default, deserialize_with = "lenient_text")]
    pub item: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cost: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub issue_detected: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub suggested_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsOpportunity {
    pub detected: bool,
    pub generic_alternatives: Vec<GenericAlternative>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericAlternative {
    #[serde(default, deserialize_with = "lenient_text")]
    pub branded: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub generic: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub estimated_savings: String,
}

/// Trailing elements shared by both variants
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Closing {
    pub questions: Option<Questions>,
    pub gentle_reminder: Option<String>,
    pub safety_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Questions {
    pub audience: QuestionAudience,
    pub items: Vec<String>,
}

/// Which field the question list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionAudience {
    Doctor,
    BillingDepartment,
}

impl QuestionAudience {
    pub fn label(self) -> &'static str {
        match self {
            QuestionAudience::Doctor => "Doctor",
            QuestionAudience::BillingDepartment => "Billing Department",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Classification
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ReportBody {
    #[serde(default, deserialize_with = "lenient_text")]
    summary: String,
    findings: Vec<Finding>,
}

#[derive(Deserialize)]
struct BillBody {
    #[serde(default, deserialize_with = "lenient_score")]
    bill_trust_score: Option<f64>,
    audit_findings: Vec<AuditFinding>,
    #[serde(default, deserialize_with = "lenient_savings")]
    savings_opportunity: Option<SavingsOpportunity>,
}

#[derive(Deserialize)]
struct ClosingBody {
    #[serde(default, deserialize_with = "lenient_list")]
    questions_for_doctor: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_list")]
    questions_for_bill_department: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    gentle_reminder: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text")]
    safety_note: Option<String>,
}

impl AnalysisResponse {
    /// Classify the `analysis` value of a success body.
    ///
    /// `findings` decides Report, `audit_findings` decides Bill; `findings`
    /// wins when both are present and a `null` key counts as absent.
    pub fn classify(analysis: Option<&Value>) -> Self {
        let Some(value) = analysis.filter(|v| !v.is_null()) else {
            return AnalysisResponse::Invalid(InvalidReason::Missing);
        };
        let Some(object) = value.as_object() else {
            return AnalysisResponse::Invalid(InvalidReason::NoDiscriminant);
        };

        let present = |key: &str| object.get(key).is_some_and(|v| !v.is_null());

        let decoded = if present("findings") {
            decode_report(value)
        } else if present("audit_findings") {
            decode_bill(value)
        } else {
            return AnalysisResponse::Invalid(InvalidReason::NoDiscriminant);
        };

        decoded.unwrap_or_else(|e| AnalysisResponse::Invalid(InvalidReason::Malformed(e.to_string())))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, AnalysisResponse::Invalid(_))
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisResponse::Report(_) => "report",
            AnalysisResponse::Bill(_) => "bill",
            AnalysisResponse::Invalid(_) => "invalid",
        }
    }
}

fn decode_report(value: &Value) -> Result<AnalysisResponse, serde_json::Error> {
    let body = ReportBody::deserialize(value)?;
    let closing = decode_closing(value)?;
    Ok(AnalysisResponse::Report(MedicalReport {
        summary: body.summary,
        findings: body.findings,
        closing,
    }))
}

fn decode_bill(value: &Value) -> Result<AnalysisResponse, serde_json::Error> {
    let body = BillBody::deserialize(value)?;
    let closing = decode_closing(value)?;
    Ok(AnalysisResponse::Bill(BillAudit {
        bill_trust_score: body.bill_trust_score,
        audit_findings: body.audit_findings,
        savings_opportunity: body.savings_opportunity,
        closing,
    }))
}

fn decode_closing(value: &Value) -> Result<Closing, serde_json::Error> {
    let body = ClosingBody::deserialize(value)?;

    // Doctor list wins whenever it is present, even if empty
    let questions = match (body.questions_for_doctor, body.questions_for_bill_department) {
        (Some(items), _) => Some(Questions {
            audience: QuestionAudience::Doctor,
            items,
        }),
        (None, Some(items)) => Some(Questions {
            audience: QuestionAudience::BillingDepartment,
            items,
        }),
        (None, None) => None,
    };

    Ok(Closing {
        questions,
        gentle_reminder: body.gentle_reminder.filter(|s| !s.trim().is_empty()),
        safety_note: body.safety_note.filter(|s| !s.trim().is_empty()),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Lenient scalar decoding
// ─────────────────────────────────────────────────────────────────────────────

fn scalar_text(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::Bool(b) => Some(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(lenient_opt_text(d)?.unwrap_or_default())
}

fn lenient_opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(d)?;
    scalar_text(&value).ok_or_else(|| de::Error::custom("expected text, found a list or object"))
}

fn lenient_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                scalar_text(item)
                    .map(Option::unwrap_or_default)
                    .ok_or_else(|| de::Error::custom("expected a list of text"))
            })
            .collect::<Result<Vec<String>, D::Error>>()
            .map(Some),
        _ => Err(de::Error::custom("expected a list of text")),
    }
}

fn lenient_score<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => {
            let trimmed = s.trim().trim_end_matches("/100").trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("bill_trust_score is not a number: {}", s)))
        }
        _ => Err(de::Error::custom("bill_trust_score is not a number")),
    }
}

/// Loose truthiness: any non-empty string, non-zero number, list or object
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The savings block is optional decoration and never invalidates a bill.
///
/// Anything but an object is absent. Alternatives are only read once
/// `detected` holds; a non-list counts as empty and entries that do not
/// decode are dropped.
fn lenient_savings<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<SavingsOpportunity>, D::Error> {
    let value = Value::deserialize(d)?;
    let Some(object) = value.as_object() else {
        return Ok(None);
    };

    let detected = object.get("detected").is_some_and(truthy);
    let generic_alternatives = match object.get("generic_alternatives") {
        Some(Value::Array(items)) if detected => items
            .iter()
            .filter_map(|item| match GenericAlternative::deserialize(item) {
                Ok(alt) => Some(alt),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping malformed generic alternative");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(Some(SavingsOpportunity {
        detected,
        generic_alternatives,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(value: Value) -> AnalysisResponse {
        AnalysisResponse::classify(Some(&value))
    }

    #[test]
    fn missing_analysis_is_invalid() {
        assert_eq!(
            AnalysisResponse::classify(None),
            AnalysisResponse::Invalid(InvalidReason::Missing)
        );
        assert_eq!(
            classify(Value::Null),
            AnalysisResponse::Invalid(InvalidReason::Missing)
        );
    }

    #[test]
    fn object_without_discriminant_is_invalid() {
        assert_eq!(
            classify(json!({"foo": "bar"})),
            AnalysisResponse::Invalid(InvalidReason::NoDiscriminant)
        );
        assert_eq!(
            classify(json!("just some text")),
            AnalysisResponse::Invalid(InvalidReason::NoDiscriminant)
        );
    }

    #[test]
    fn null_discriminant_counts_as_absent() {
        let response = classify(json!({"findings": null, "audit_findings": []}));
        assert_eq!(response.kind(), "bill");
    }

    #[test]
    fn report_keeps_findings_in_order() {
        let response = classify(json!({
            "summary": "Mild anemia",
            "findings": [
                {"parameter": "Hemoglobin", "value": "10.2 g/dL", "status": "Low", "explanation": "Below range"},
                {"parameter": "WBC", "value": 7000, "status": "normal", "explanation": "Fine"}
            ]
        }));

        let AnalysisResponse::Report(report) = response else {
            panic!("expected report, got {:?}", response);
        };
        assert_eq!(report.summary, "Mild anemia");
        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.findings[0].parameter, "Hemoglobin");
        assert_eq!(report.findings[1].value, "7000");
    }

    #[test]
    fn findings_win_when_both_keys_present() {
        let response = classify(json!({
            "summary": "",
            "findings": [],
            "audit_findings": [{"item": "X-ray"}]
        }));
        assert_eq!(response.kind(), "report");
    }

    #[test]
    fn malformed_nested_data_invalidates_whole_response() {
        let response = classify(json!({"findings": "Hemoglobin is low"}));
        assert!(matches!(
            response,
            AnalysisResponse::Invalid(InvalidReason::Malformed(_))
        ));

        let response = classify(json!({"audit_findings": [["X-ray", 100]]}));
        assert!(response.is_invalid());
    }

    #[test]
    fn bill_decodes_score_and_savings() {
        let response = classify(json!({
            "bill_trust_score": "72",
            "audit_findings": [{"item": "X-ray", "cost": 1200, "issue_detected": "Duplicate", "suggested_action": "Dispute"}],
            "savings_opportunity": {
                "detected": true,
                "generic_alternatives": [{"branded": "Crocin", "generic": "Paracetamol", "estimated_savings": "40%"}]
            }
        }));

        let AnalysisResponse::Bill(bill) = response else {
            panic!("expected bill, got {:?}", response);
        };
        assert_eq!(bill.bill_trust_score, Some(72.0));
        assert_eq!(bill.audit_findings[0].cost, "1200");
        let savings = bill.savings_opportunity.expect("savings");
        assert!(savings.detected);
        assert_eq!(savings.generic_alternatives[0].generic, "Paracetamol");
    }

    #[test]
    fn malformed_savings_block_keeps_the_bill() {
        let findings = json!([{"item": "MRI", "cost": 4500}]);

        let response = classify(json!({
            "bill_trust_score": 72,
            "audit_findings": findings.clone(),
            "savings_opportunity": {"detected": false, "generic_alternatives": "none"}
        }));
        let AnalysisResponse::Bill(bill) = response else {
            panic!("expected bill, got {:?}", response);
        };
        let savings = bill.savings_opportunity.expect("savings");
        assert!(!savings.detected);
        assert!(savings.generic_alternatives.is_empty());

        let response = classify(json!({
            "audit_findings": findings.clone(),
            "savings_opportunity": "No savings detected"
        }));
        let AnalysisResponse::Bill(bill) = response else {
            panic!("expected bill, got {:?}", response);
        };
        assert_eq!(bill.savings_opportunity, None);

        let response = classify(json!({
            "audit_findings": findings,
            "savings_opportunity": {
                "detected": true,
                "generic_alternatives": ["Paracetamol", {"branded": "Crocin", "generic": "Paracetamol"}]
            }
        }));
        let AnalysisResponse::Bill(bill) = response else {
            panic!("expected bill, got {:?}", response);
        };
        let savings = bill.savings_opportunity.expect("savings");
        assert_eq!(savings.generic_alternatives.len(), 1);
        assert_eq!(savings.generic_alternatives[0].branded, "Crocin");
    }

    #[test]
    fn detected_follows_loose_truthiness() {
        let detected = |flag: Value| {
            let response = classify(json!({
                "audit_findings": [],
                "savings_opportunity": {"detected": flag, "generic_alternatives": []}
            }));
            let AnalysisResponse::Bill(bill) = response else {
                panic!("expected bill");
            };
            bill.savings_opportunity.is_some_and(|s| s.detected)
        };

        assert!(detected(json!(true)));
        assert!(detected(json!("yes")));
        assert!(detected(json!(1)));
        assert!(!detected(json!(false)));
        assert!(!detected(json!("")));
        assert!(!detected(json!(0)));
        assert!(!detected(Value::Null));
    }

    #[test]
    fn doctor_questions_win_over_billing_questions() {
        let response = classify(json!({
            "audit_findings": [],
            "questions_for_doctor": ["Is this dose right?"],
            "questions_for_bill_department": ["Why was I charged twice?"]
        }));

        let AnalysisResponse::Bill(bill) = response else {
            panic!("expected bill");
        };
        let questions = bill.closing.questions.expect("questions");
        assert_eq!(questions.audience, QuestionAudience::Doctor);
        assert_eq!(questions.items, vec!["Is this dose right?".to_string()]);
    }

    #[test]
    fn blank_callouts_count_as_absent() {
        let response = classify(json!({
            "findings": [],
            "gentle_reminder": "   ",
            "safety_note": ""
        }));

        let AnalysisResponse::Report(report) = response else {
            panic!("expected report");
        };
        assert_eq!(report.closing.gentle_reminder, None);
        assert_eq!(report.closing.safety_note, None);
    }
}
