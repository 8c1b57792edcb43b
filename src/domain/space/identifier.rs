//! Space identifier allocation
//!
//! IDs look like `{lotID}_{NN}`. The next one is derived from the IDs that
//! already exist, so the form pre-fill and the insert path compute the same
//! value without a stored counter.

use crate::domain::{DomainError, DomainResult};

/// Longest sequence suffix accepted on a caller-supplied ID
pub const MAX_SEQUENCE_DIGITS: usize = 9;

/// Sequence number of `space_id` within `lot_id`, if it has the
/// `{lot_id}_{digits}` shape.
pub fn sequence_number(lot_id: &str, space_id: &str) -> Option<u64> {
    let digits = space_id.strip_prefix(lot_id)?.strip_prefix('_')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Highest sequence number in use for the lot plus one (1 for an empty lot).
/// IDs belonging to other lots are ignored.
pub fn next_space_number<I, S>(lot_id: &str, existing: I) -> DomainResult<u64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if lot_id.trim().is_empty() {
        return Err(DomainError::Validation("lotID is required".to_string()));
    }

    let max = existing
        .into_iter()
        .filter_map(|id| sequence_number(lot_id, id.as_ref()))
        .max()
        .unwrap_or(0);

    max.checked_add(1).ok_or_else(|| {
        DomainError::Validation(format!("no sequence numbers left for lot {}", lot_id))
    })
}

pub fn format_space_id(lot_id: &str, number: u64) -> String {
    format!("{}_{:02}", lot_id, number)
}

/// Validates a caller-supplied space ID: it must be `{lot_id}_{digits}`
/// with a non-zero number of at most [`MAX_SEQUENCE_DIGITS`] digits.
pub fn check_space_id(space_id: &str, lot_id: &str) -> DomainResult<()> {
    if lot_id.trim().is_empty() {
        return Err(DomainError::Validation("lotID is required".to_string()));
    }
    if space_id.trim().is_empty() {
        return Err(DomainError::Validation(
            "parkingSpaceID must not be empty".to_string(),
        ));
    }

    let digits = space_id.len().saturating_sub(lot_id.len() + 1);
    match sequence_number(lot_id, space_id) {
        Some(n) if n > 0 && digits <= MAX_SEQUENCE_DIGITS => Ok(()),
        _ => Err(DomainError::Validation(format!(
            "parkingSpaceID '{}' must look like {}_NN (1 to {} digits, not all zero)",
            space_id, lot_id, MAX_SEQUENCE_DIGITS
        ))),
    }
}

/// Next free `{lotID}_{NN}` identifier for the lot.
pub fn next_space_id<I, S>(lot_id: &str, existing: I) -> DomainResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    next_space_number(lot_id, existing).map(|n| format_space_id(lot_id, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lot_starts_at_01() {
        assert_eq!(next_space_id("L1", Vec::<String>::new()).unwrap(), "L1_01");
    }

    #[test]
    fn continues_after_the_highest_number() {
        let existing = ["L1_01", "L1_07", "L1_03"];
        assert_eq!(next_space_id("L1", existing).unwrap(), "L1_08");
    }

    #[test]
    fn gaps_are_not_reused() {
        assert_eq!(next_space_id("L1", ["L1_05"]).unwrap(), "L1_06");
    }

    #[test]
    fn padding_grows_past_two_digits() {
        assert_eq!(next_space_id("L1", ["L1_99"]).unwrap(), "L1_100");
        assert_eq!(next_space_id("L1", ["L1_100"]).unwrap(), "L1_101");
    }

    #[test]
    fn other_lots_and_malformed_ids_are_ignored() {
        let existing = ["L2_40", "L1_02", "L1_x", "L1_", "XL1_50", "L10_30", "L1_3a"];
        assert_eq!(next_space_id("L1", existing).unwrap(), "L1_03");
    }

    #[test]
    fn prefix_sharing_lot_ids_do_not_collide() {
        // "L1" must not count "L10_*" and vice versa.
        assert_eq!(next_space_id("L10", ["L1_09", "L10_02"]).unwrap(), "L10_03");
    }

    #[test]
    fn result_is_unused_and_greater_than_every_match() {
        let existing = vec!["A_01".to_string(), "A_02".into(), "A_10".into(), "B_11".into()];
        let next = next_space_id("A", &existing).unwrap();
        assert!(!existing.contains(&next));
        let n = sequence_number("A", &next).unwrap();
        assert!(existing
            .iter()
            .filter_map(|id| sequence_number("A", id))
            .all(|m| m < n));
    }

    #[test]
    fn missing_lot_id_is_rejected() {
        assert!(matches!(
            next_space_id("", ["_01"]),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn exhausted_sequence_is_an_error_not_a_wrap() {
        let last = format!("L1_{}", u64::MAX);
        assert!(matches!(
            next_space_number("L1", [last.as_str()]),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(
            next_space_number("L1", [format!("L1_{}", u64::MAX - 1)]).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn explicit_ids_must_belong_to_their_lot() {
        assert!(check_space_id("L1_01", "L1").is_ok());
        assert!(check_space_id("L1_999999999", "L1").is_ok());

        for bad in ["L2_01", "L1", "L1_", "L1_x1", "L10_01", "L1_00", "L1_1000000000"] {
            assert!(
                matches!(check_space_id(bad, "L1"), Err(DomainError::Validation(_))),
                "{} should be rejected",
                bad
            );
        }
        let overflowing = format!("L1_{}", u64::MAX);
        assert!(check_space_id(&overflowing, "L1").is_err());
        assert!(check_space_id("", "L1").is_err());
        assert!(check_space_id("L1_01", " ").is_err());
    }

    #[test]
    fn sequence_number_parsing() {
        assert_eq!(sequence_number("L1", "L1_01"), Some(1));
        assert_eq!(sequence_number("L1", "L1_0012"), Some(12));
        assert_eq!(sequence_number("L1", "L1_-1"), None);
        assert_eq!(sequence_number("L1", "L2_01"), None);
    }
}
