//! Assertion helpers that turn oracle verdicts into errors with diagnostics.

use crate::helpers::HarnessError;
use crate::oracle::OracleVerdict;

/// Fail with the verdict's detail unless it passed.
pub fn assert_verdict(verdict: &OracleVerdict, ctx: &str) -> Result<(), HarnessError> {
    if verdict.passed {
        Ok(())
    } else {
        Err(HarnessError::OracleFailure {
            oracle: verdict.oracle_name.clone(),
            detail: format!("[{}] {}", ctx, verdict.detail),
        })
    }
}

/// Fail listing every verdict that did not pass.
pub fn assert_all_pass(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    let failed: Vec<String> = verdicts
        .iter()
        .filter(|v| !v.passed)
        .map(|v| format!("{}: {}", v.oracle_name, v.detail))
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] {} of {} oracles failed:\n  {}",
                ctx,
                failed.len(),
                verdicts.len(),
                failed.join("\n  ")
            ),
        })
    }
}
