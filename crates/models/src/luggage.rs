use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ModelError;

/// Where a bag is in its journey. Only ever moves forward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum LuggageStatus {
    CheckedIn,
    EnRoute,
    Ready,
    Collected,
}

impl LuggageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LuggageStatus::CheckedIn => "checked-in",
            LuggageStatus::EnRoute => "en-route",
            LuggageStatus::Ready => "ready",
            LuggageStatus::Collected => "collected",
        }
    }

    fn rank(self) -> u8 {
        match self {
            LuggageStatus::CheckedIn => 0,
            LuggageStatus::EnRoute => 1,
            LuggageStatus::Ready => 2,
            LuggageStatus::Collected => 3,
        }
    }

    /// The status a bag must be in before it may move to `self`.
    pub fn predecessor(self) -> Option<LuggageStatus> {
        match self {
            LuggageStatus::CheckedIn => None,
            LuggageStatus::EnRoute => Some(LuggageStatus::CheckedIn),
            LuggageStatus::Ready => Some(LuggageStatus::EnRoute),
            LuggageStatus::Collected => Some(LuggageStatus::Ready),
        }
    }

    pub fn is_terminal(self) -> bool {
        self == LuggageStatus::Collected
    }
}

impl fmt::Display for LuggageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How strictly status transitions are validated.
///
/// - `Strict`: every transition needs the exact predecessor status.
/// - `Lenient`: states may be skipped or repeated, but status never moves backwards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    #[default]
    Strict,
    Lenient,
}

impl TransitionPolicy {
    pub fn check(self, from: LuggageStatus, to: LuggageStatus) -> Result<(), ModelError> {
        let allowed = match self {
            TransitionPolicy::Strict => to.predecessor() == Some(from),
            TransitionPolicy::Lenient => from.rank() <= to.rank(),
        };
        if allowed {
            Ok(())
        } else {
            Err(ModelError::InvalidTransition { from: from.to_string(), to: to.to_string() })
        }
    }
}

/// Check-in input: everything the passenger supplies at the desk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckInInput {
    pub id: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
}

/// One tracked bag, keyed by its tag id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LuggageItem {
    pub id: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub owner_identity: String,
    pub check_in_time: u64,
    #[serde(default)]
    pub check_out_time: Option<u64>,
    pub status: LuggageStatus,
    #[serde(default)]
    pub collection_point: Option<String>,
}

pub fn validate_tag_id(id: &str) -> Result<(), ModelError> {
    if id.trim().is_empty() {
        return Err(ModelError::Validation("luggage id required".into()));
    }
    Ok(())
}

impl LuggageItem {
    /// Build a freshly checked-in record owned by `owner`.
    pub fn check_in(input: CheckInInput, owner: &str, at: u64) -> Result<Self, ModelError> {
        validate_tag_id(&input.id)?;
        Ok(Self {
            id: input.id,
            flight_number: input.flight_number,
            origin: input.origin,
            destination: input.destination,
            owner_identity: owner.to_string(),
            check_in_time: at,
            check_out_time: None,
            status: LuggageStatus::CheckedIn,
            collection_point: None,
        })
    }

    pub fn is_owned_by(&self, caller: &str) -> bool {
        self.owner_identity == caller
    }

    /// The bag is aboard and travelling to its destination.
    pub fn mark_en_route(&mut self, policy: TransitionPolicy) -> Result<(), ModelError> {
        policy.check(self.status, LuggageStatus::EnRoute)?;
        self.status = LuggageStatus::EnRoute;
        Ok(())
    }

    /// The bag has arrived at a gate or carousel.
    pub fn mark_ready(&mut self, collection_point: &str, policy: TransitionPolicy) -> Result<(), ModelError> {
        if collection_point.trim().is_empty() {
            return Err(ModelError::Validation("collection point required".into()));
        }
        policy.check(self.status, LuggageStatus::Ready)?;
        self.collection_point = Some(collection_point.to_string());
        self.status = LuggageStatus::Ready;
        Ok(())
    }

    /// Hand the bag over. Ownership is checked by the caller before this runs.
    ///
    /// Under `Lenient`, collecting an already collected bag keeps the first
    /// check-out time.
    pub fn mark_collected(&mut self, at: u64, policy: TransitionPolicy) -> Result<(), ModelError> {
        policy.check(self.status, LuggageStatus::Collected)?;
        if self.status.is_terminal() {
            return Ok(());
        }
        if at < self.check_in_time {
            return Err(ModelError::Validation(format!(
                "check-out time {at} precedes check-in time {}",
                self.check_in_time
            )));
        }
        self.check_out_time = Some(at);
        self.status = LuggageStatus::Collected;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(id: &str) -> LuggageItem {
        let input = CheckInInput {
            id: id.into(),
            flight_number: "QF1".into(),
            origin: "SYD".into(),
            destination: "LAX".into(),
        };
        LuggageItem::check_in(input, "alice.near", 100).expect("check in")
    }

    #[test]
    fn status_serializes_as_kebab_case() {
        let encoded = serde_json::to_string(&LuggageStatus::CheckedIn).unwrap();
        assert_eq!(encoded, "\"checked-in\"");
        let decoded: LuggageStatus = serde_json::from_str("\"en-route\"").unwrap();
        assert_eq!(decoded, LuggageStatus::EnRoute);
        assert_eq!(LuggageStatus::Ready.to_string(), "ready");
    }

    #[test]
    fn check_in_sets_owner_and_time() {
        let b = bag("bag1");
        assert_eq!(b.status, LuggageStatus::CheckedIn);
        assert_eq!(b.check_in_time, 100);
        assert!(b.is_owned_by("alice.near"));
        assert!(!b.is_owned_by("bob.near"));
        assert!(b.check_out_time.is_none());
        assert!(b.collection_point.is_none());
    }

    #[test]
    fn check_in_rejects_blank_id() {
        let input = CheckInInput {
            id: "   ".into(),
            flight_number: "QF1".into(),
            origin: "SYD".into(),
            destination: "LAX".into(),
        };
        let res = LuggageItem::check_in(input, "alice.near", 1);
        assert!(matches!(res, Err(ModelError::Validation(_))));
    }

    #[test]
    fn strict_policy_walks_forward_one_step_at_a_time() {
        let mut b = bag("bag1");
        b.mark_en_route(TransitionPolicy::Strict).unwrap();
        b.mark_ready("Carousel 8", TransitionPolicy::Strict).unwrap();
        b.mark_collected(200, TransitionPolicy::Strict).unwrap();
        assert_eq!(b.status, LuggageStatus::Collected);
        assert_eq!(b.collection_point.as_deref(), Some("Carousel 8"));
        assert_eq!(b.check_out_time, Some(200));
    }

    #[test]
    fn strict_policy_rejects_skips_and_repeats() {
        let mut b = bag("bag1");
        let err = b.mark_collected(200, TransitionPolicy::Strict).unwrap_err();
        match err {
            ModelError::InvalidTransition { from, to } => {
                assert_eq!(from, "checked-in");
                assert_eq!(to, "collected");
            }
            other => panic!("unexpected error: {other}"),
        }
        b.mark_en_route(TransitionPolicy::Strict).unwrap();
        assert!(b.mark_en_route(TransitionPolicy::Strict).is_err());
        assert_eq!(b.status, LuggageStatus::EnRoute);
    }

    #[test]
    fn lenient_policy_skips_and_repeats_but_never_regresses() {
        let mut b = bag("bag1");
        b.mark_ready("Gate 4", TransitionPolicy::Lenient).unwrap();
        assert!(b.mark_en_route(TransitionPolicy::Lenient).is_err());
        b.mark_collected(300, TransitionPolicy::Lenient).unwrap();
        b.mark_collected(900, TransitionPolicy::Lenient).unwrap();
        assert_eq!(b.check_out_time, Some(300));
        assert!(b.mark_ready("Gate 5", TransitionPolicy::Lenient).is_err());
        assert_eq!(b.collection_point.as_deref(), Some("Gate 4"));
    }

    #[test]
    fn collect_before_check_in_is_rejected() {
        let mut b = bag("bag1");
        b.mark_en_route(TransitionPolicy::Strict).unwrap();
        b.mark_ready("Carousel 2", TransitionPolicy::Strict).unwrap();
        let res = b.mark_collected(99, TransitionPolicy::Strict);
        assert!(matches!(res, Err(ModelError::Validation(_))));
        assert_eq!(b.status, LuggageStatus::Ready);
        assert!(b.check_out_time.is_none());
    }

    #[test]
    fn ready_requires_collection_point() {
        let mut b = bag("bag1");
        b.mark_en_route(TransitionPolicy::Strict).unwrap();
        assert!(matches!(b.mark_ready(" ", TransitionPolicy::Strict), Err(ModelError::Validation(_))));
        assert_eq!(b.status, LuggageStatus::EnRoute);
    }
}
