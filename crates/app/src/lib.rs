pub mod app_loop;
pub mod launch_args;
pub mod round_record_file;
pub mod run_journal_file;

use rcb_core::{LossCause, RoundOutcome};

pub const APP_NAME: &str = "Lost in RCB";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Map a `RoundOutcome` to its reason code string.
pub fn outcome_code(outcome: RoundOutcome) -> &'static str {
    match outcome {
        RoundOutcome::Won => "WIN_ESCAPED",
        RoundOutcome::Lost(LossCause::Caught) => "LOSS_CAUGHT",
        RoundOutcome::Lost(LossCause::ScoreDepleted) => "LOSS_SCORE_DEPLETED",
        RoundOutcome::Aborted => "ABORTED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_seed_is_exact_decimal() {
        assert_eq!(format_seed(0), "0");
        assert_eq!(format_seed(12345), "12345");
        assert_eq!(format_seed(u64::MAX), "18446744073709551615");
    }

    #[test]
    fn format_snapshot_hash_is_16_hex_digits() {
        assert_eq!(format_snapshot_hash(0), "0x0000000000000000");
        assert_eq!(format_snapshot_hash(255), "0x00000000000000ff");
        assert_eq!(format_snapshot_hash(0xDEADBEEF), "0x00000000deadbeef");
    }

    #[test]
    fn outcome_codes_are_distinct() {
        assert_eq!(outcome_code(RoundOutcome::Won), "WIN_ESCAPED");
        assert_eq!(outcome_code(RoundOutcome::Lost(LossCause::Caught)), "LOSS_CAUGHT");
        assert_eq!(
            outcome_code(RoundOutcome::Lost(LossCause::ScoreDepleted)),
            "LOSS_SCORE_DEPLETED"
        );
        assert_eq!(outcome_code(RoundOutcome::Aborted), "ABORTED");
    }
}
