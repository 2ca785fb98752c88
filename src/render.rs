//! Result rendering, independent of the terminal
//!
//! `render` turns a classified response into a `ResultView`: the exact rows,
//! headings and callouts to show. The TUI styles it, the headless command and
//! the clipboard action print it with `to_plain_text`.

use crate::analysis::{AnalysisResponse, BillAudit, Closing, MedicalReport};
use serde::Serialize;

pub const INVALID_TITLE: &str = "Analysis Format Error";
pub const INVALID_MESSAGE: &str = "The AI provided a response, but it couldn't be parsed correctly. \
This usually happens with blurry images or complex layouts.";
pub const RETRY_LABEL: &str = "Try Again";
pub const REPORT_TITLE: &str = "Medical Report Analysis";
pub const BILL_TITLE: &str = "Billing Audit Results";
pub const SAVINGS_TITLE: &str = "Savings Opportunities Found";
pub const REMINDER_TITLE: &str = "Gentle Reminder";
pub const DEFAULT_SAFETY_NOTE: &str = "This audit is powered by AI. \
Please consult with a healthcare professional before taking action.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ResultView {
    Invalid,
    Report(ReportView),
    Bill(BillView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub summary: String,
    pub rows: Vec<FindingRow>,
    pub trailing: Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Normal,
    Abnormal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindingRow {
    pub parameter: String,
    pub value: String,
    pub status: String,
    pub explanation: String,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillView {
    /// "72/100", or "not provided" when the backend omitted the score
    pub score_line: String,
    pub rows: Vec<AuditRow>,
    /// Present only when the backend flagged savings as detected
    pub savings: Option<Vec<SavingsRow>>,
    pub trailing: Trailing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRow {
    pub item: String,
    pub cost: String,
    pub issue: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsRow {
    pub branded: String,
    pub generic: String,
    pub estimated_savings: String,
}

/// Questions checklist, reminder callout and safety note
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trailing {
    pub questions: Option<QuestionList>,
    pub gentle_reminder: Option<String>,
    pub safety_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionList {
    pub heading: String,
    pub items: Vec<String>,
}

/// Case-insensitive "normal"; anything else (empty or padded included) is abnormal
pub fn is_normal_status(status: &str) -> bool {
    status.eq_ignore_ascii_case("normal")
}

pub fn render(response: Option<&AnalysisResponse>) -> ResultView {
    match response {
        None | Some(AnalysisResponse::Invalid(_)) => ResultView::Invalid,
        Some(AnalysisResponse::Report(report)) => ResultView::Report(report_view(report)),
        Some(AnalysisResponse::Bill(bill)) => ResultView::Bill(bill_view(bill)),
    }
}

fn report_view(report: &MedicalReport) -> ReportView {
    let rows = report
        .findings
        .iter()
        .map(|f| FindingRow {
            parameter: f.parameter.clone(),
            value: f.value.clone(),
            status: f.status.clone(),
            explanation: f.explanation.clone(),
            emphasis: if is_normal_status(&f.status) {
                Emphasis::Normal
            } else {
                Emphasis::Abnormal
            },
        })
        .collect();

    ReportView {
        summary: report.summary.clone(),
        rows,
        trailing: trailing(&report.closing),
    }
}

fn bill_view(bill: &BillAudit) -> BillView {
    let rows = bill
        .audit_findings
        .iter()
        .map(|a| AuditRow {
            item: a.item.clone(),
            cost: format_cost(&a.cost),
            issue: a.issue_detected.clone(),
            action: a.suggested_action.clone(),
        })
        .collect();

    let savings = bill
        .savings_opportunity
        .as_ref()
        .filter(|s| s.detected)
        .map(|s| {
            s.generic_alternatives
                .iter()
                .map(|alt| SavingsRow {
                    branded: alt.branded.clone(),
                    generic: alt.generic.clone(),
                    estimated_savings: alt.estimated_savings.clone(),
                })
                .collect()
        });

    BillView {
        score_line: bill
            .bill_trust_score
            .map(format_score)
            .unwrap_or_else(|| "not provided".to_string()),
        rows,
        savings,
        trailing: trailing(&bill.closing),
    }
}

fn trailing(closing: &Closing) -> Trailing {
    let questions = closing
        .questions
        .as_ref()
        .filter(|q| !q.items.is_empty())
        .map(|q| QuestionList {
            heading: format!("Questions to Ask Your {}", q.audience.label()),
            items: q.items.clone(),
        });

    Trailing {
        questions,
        gentle_reminder: closing.gentle_reminder.clone(),
        safety_note: closing
            .safety_note
            .clone()
            .unwrap_or_else(|| DEFAULT_SAFETY_NOTE.to_string()),
    }
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}/100", score as i64)
    } else {
        format!("{:.1}/100", score)
    }
}

/// Bare numbers get a currency sign, anything else is shown as sent
fn format_cost(cost: &str) -> String {
    let trimmed = cost.trim();
    if !trimmed.is_empty() && trimmed.replace(',', "").parse::<f64>().is_ok() {
        format!("${}", trimmed)
    } else {
        trimmed.to_string()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plain text
// ─────────────────────────────────────────────────────────────────────────────

pub fn to_plain_text(view: &ResultView) -> String {
    let mut out = String::new();
    match view {
        ResultView::Invalid => {
            out.push_str(INVALID_TITLE);
            out.push('\n');
            out.push_str(INVALID_MESSAGE);
            out.push('\n');
            return out;
        }
        ResultView::Report(report) => {
            out.push_str(&format!("{}\n\n{}\n\n", REPORT_TITLE, report.summary));
            for row in &report.rows {
                let marker = match row.emphasis {
                    Emphasis::Normal => "✓",
                    Emphasis::Abnormal => "!",
                };
                out.push_str(&format!(
                    "{} {}: {} [{}]\n",
                    marker, row.parameter, row.value, row.status
                ));
                if !row.explanation.is_empty() {
                    out.push_str(&format!("    {}\n", row.explanation));
                }
            }
            push_trailing(&mut out, &report.trailing);
        }
        ResultView::Bill(bill) => {
            out.push_str(&format!(
                "{}\n\nBill Trust Score: {}\n\n",
                BILL_TITLE, bill.score_line
            ));
            for row in &bill.rows {
                out.push_str(&format!("- {} {}\n", row.item, row.cost));
                if !row.issue.is_empty() {
                    out.push_str(&format!("    {}\n", row.issue));
                }
                if !row.action.is_empty() {
                    out.push_str(&format!("    Recommendation: {}\n", row.action));
                }
            }
            if let Some(savings) = &bill.savings {
                out.push_str(&format!("\n{}\n", SAVINGS_TITLE));
                for alt in savings {
                    out.push_str(&format!(
                        "- Switch from {} to {}, save approx {}\n",
                        alt.branded, alt.generic, alt.estimated_savings
                    ));
                }
            }
            push_trailing(&mut out, &bill.trailing);
        }
    }
    out
}

fn push_trailing(out: &mut String, trailing: &Trailing) {
    if let Some(questions) = &trailing.questions {
        out.push_str(&format!("\n{}\n", questions.heading));
        for q in &questions.items {
            out.push_str(&format!("[ ] {}\n", q));
        }
    }
    if let Some(reminder) = &trailing.gentle_reminder {
        out.push_str(&format!("\n{}: {}\n", REMINDER_TITLE, reminder));
    }
    out.push_str(&format!("\n{}\n", trailing.safety_note));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn view(value: Value) -> ResultView {
        render(Some(&AnalysisResponse::classify(Some(&value))))
    }

    #[test]
    fn absent_response_renders_invalid() {
        assert_eq!(render(None), ResultView::Invalid);
        assert_eq!(view(json!({"foo": "bar"})), ResultView::Invalid);
    }

    #[test]
    fn anemia_report_has_one_abnormal_row() {
        let ResultView::Report(report) = view(json!({
            "summary": "Your hemoglobin is a little low.",
            "findings": [{"parameter": "Hemoglobin", "value": "10.2 g/dL", "status": "Low", "explanation": "Slightly below range"}]
        })) else {
            panic!("expected report view");
        };

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].emphasis, Emphasis::Abnormal);
        assert_eq!(report.trailing.safety_note, DEFAULT_SAFETY_NOTE);
    }

    #[test]
    fn row_count_and_order_follow_findings() {
        let ResultView::Report(report) = view(json!({
            "summary": "",
            "findings": [
                {"parameter": "A", "status": "NORMAL"},
                {"parameter": "B", "status": ""},
                {"parameter": "C", "status": "Normal "}
            ]
        })) else {
            panic!("expected report view");
        };

        let names: Vec<_> = report.rows.iter().map(|r| r.parameter.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        let emphasis: Vec<_> = report.rows.iter().map(|r| r.emphasis).collect();
        assert_eq!(
            emphasis,
            [Emphasis::Normal, Emphasis::Abnormal, Emphasis::Abnormal]
        );
    }

    #[test]
    fn status_comparison() {
        assert!(is_normal_status("normal"));
        assert!(is_normal_status("nOrMaL"));
        assert!(!is_normal_status(""));
        assert!(!is_normal_status("borderline normal"));
        assert!(!is_normal_status("Normal "));
        assert!(!is_normal_status(" normal"));
    }

    #[test]
    fn bill_score_and_rows() {
        let ResultView::Bill(bill) = view(json!({
            "bill_trust_score": 72,
            "audit_findings": [{"item": "MRI", "cost": 4500, "issue_detected": "Billed twice", "suggested_action": "Ask for refund"}]
        })) else {
            panic!("expected bill view");
        };

        assert_eq!(bill.score_line, "72/100");
        assert_eq!(bill.rows.len(), 1);
        assert_eq!(bill.rows[0].cost, "$4500");
        assert!(bill.savings.is_none());
    }

    #[test]
    fn savings_hidden_unless_detected() {
        let alternatives = json!([{"branded": "Crocin", "generic": "Paracetamol", "estimated_savings": "₹40"}]);

        let ResultView::Bill(hidden) = view(json!({
            "audit_findings": [],
            "savings_opportunity": {"detected": false, "generic_alternatives": alternatives.clone()}
        })) else {
            panic!("expected bill view");
        };
        assert!(hidden.savings.is_none());
        assert_eq!(hidden.score_line, "not provided");

        let ResultView::Bill(shown) = view(json!({
            "audit_findings": [],
            "savings_opportunity": {"detected": true, "generic_alternatives": alternatives}
        })) else {
            panic!("expected bill view");
        };
        let savings = shown.savings.expect("savings");
        assert_eq!(savings.len(), 1);
        assert_eq!(savings[0].estimated_savings, "₹40");
    }

    #[test]
    fn exactly_one_question_list() {
        let ResultView::Report(report) = view(json!({
            "findings": [],
            "questions_for_doctor": ["Should I retest?"],
            "questions_for_bill_department": ["Why twice?"]
        })) else {
            panic!("expected report view");
        };

        let questions = report.trailing.questions.expect("questions");
        assert_eq!(questions.heading, "Questions to Ask Your Doctor");
        assert_eq!(questions.items, ["Should I retest?"]);
    }

    #[test]
    fn costs_keep_currency_text() {
        assert_eq!(format_cost("1,200"), "$1,200");
        assert_eq!(format_cost("₹1200"), "₹1200");
        assert_eq!(format_cost(""), "");
        assert_eq!(format_score(87.5), "87.5/100");
    }

    #[test]
    fn plain_text_includes_callouts() {
        let text = to_plain_text(&view(json!({
            "bill_trust_score": 72,
            "audit_findings": [{"item": "MRI", "cost": "100", "issue_detected": "Duplicate", "suggested_action": "Dispute"}],
            "gentle_reminder": "Take a breath",
            "safety_note": "Custom note"
        })));

        assert!(text.contains("Bill Trust Score: 72/100"));
        assert!(text.contains("Recommendation: Dispute"));
        assert!(text.contains("Gentle Reminder: Take a breath"));
        assert!(text.contains("Custom note"));
        assert!(!text.contains(DEFAULT_SAFETY_NOTE));

        assert!(to_plain_text(&ResultView::Invalid).starts_with(INVALID_TITLE));
    }
}
