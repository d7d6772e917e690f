//! Masking session reports
//!
//! Summarizes what a session masked, what it passed through, and which
//! unknown keys it met. Reports carry counts and tokens only, never original
//! values.

use crate::masking::engine::MaskingEngine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Report for one masking session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskingReport {
    /// Session identifier
    pub session_id: String,

    /// Source names masked in this session
    pub sources: Vec<String>,

    /// Documents masked
    pub documents: usize,

    /// Scalar fields replaced by tokens
    pub fields_masked: usize,

    /// Scalar fields kept by policy
    pub fields_passed_through: usize,

    /// Distinct tokens issued
    pub total_tokens: usize,

    /// Distinct tokens by key prefix (keys with no tokens omitted)
    pub tokens_by_key: BTreeMap<String, u64>,

    /// Unknown string fields by key
    pub unknown_fields: BTreeMap<String, usize>,

    /// Wall-clock processing time (ms)
    pub processing_time_ms: u64,
}

impl MaskingReport {
    /// Build a report from a session's current state
    pub fn from_engine(engine: &MaskingEngine, sources: Vec<String>, processing_time_ms: u64) -> Self {
        let stats = engine.stats();
        let tokens_by_key = engine
            .tokens()
            .counters()
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(key, &count)| (key.clone(), count))
            .collect();

        Self {
            session_id: engine.session_id().to_string(),
            sources,
            documents: stats.documents,
            fields_masked: stats.fields_masked,
            fields_passed_through: stats.fields_passed_through,
            total_tokens: engine.tokens().len(),
            tokens_by_key,
            unknown_fields: stats.unknown_fields.clone(),
            processing_time_ms,
        }
    }

    /// Whether any unknown fields were passed through
    pub fn has_policy_gaps(&self) -> bool {
        !self.unknown_fields.is_empty()
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("                     PII MASKING REPORT                        \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Session:                  {}\n", self.session_id));
        output.push_str(&format!("  Sources:                  {}\n", self.sources.join(", ")));
        output.push_str(&format!("  Documents Masked:         {}\n", self.documents));
        output.push_str(&format!("  Fields Masked:            {}\n", self.fields_masked));
        output.push_str(&format!(
            "  Fields Passed Through:    {}\n",
            self.fields_passed_through
        ));
        output.push_str(&format!("  Distinct Tokens:          {}\n", self.total_tokens));
        output.push_str(&format!(
            "  Processing Time:          {} ms\n",
            self.processing_time_ms
        ));
        output.push('\n');

        if !self.tokens_by_key.is_empty() {
            output.push_str("🔐 TOKENS BY KEY\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");

            let mut keys: Vec<_> = self.tokens_by_key.iter().collect();
            keys.sort_by(|a, b| b.1.cmp(a.1));

            for (key, count) in keys {
                output.push_str(&format!("  {key:30} {count:>5}\n"));
            }
            output.push('\n');
        }

        if self.has_policy_gaps() {
            output.push_str("⚠️  UNKNOWN FIELDS (passed through unmasked)\n");
            output.push_str("───────────────────────────────────────────────────────────────\n");
            for (key, count) in &self.unknown_fields {
                output.push_str(&format!("  {key:30} {count:>5}\n"));
            }
            output.push('\n');
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
