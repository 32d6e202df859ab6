use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Player Types
// ============================================================================

/// The authenticated player as issued by the auth service. `id` is the
/// provider-issued identifier that keys the remote economy record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub provider: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub player: PlayerProfile,
}

// ============================================================================
// Economy Types
// ============================================================================

pub const DEFAULT_COINS: i64 = 1000;
pub const DEFAULT_EXPERIENCE: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("insufficient coins: requested {requested}, available {available}")]
    InsufficientCoins { requested: i64, available: i64 },
}

/// The pair of progress currencies a player owns. Values are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomySnapshot {
    pub coins: i64,
    pub experience: i64,
}

impl Default for EconomySnapshot {
    fn default() -> Self {
        Self {
            coins: DEFAULT_COINS,
            experience: DEFAULT_EXPERIENCE,
        }
    }
}

impl EconomySnapshot {
    /// Adopts a remote record, defaulting each missing field and clamping
    /// anything negative to zero.
    pub fn from_record(record: &EconomyRecord) -> Self {
        Self {
            coins: record.coins.unwrap_or(DEFAULT_COINS).max(0),
            experience: record.experience.unwrap_or(DEFAULT_EXPERIENCE).max(0),
        }
    }

    pub fn credit(&self, amount: i64) -> Self {
        Self {
            coins: self.coins.saturating_add(amount.max(0)),
            experience: self.experience,
        }
    }

    pub fn debit(&self, amount: i64) -> Result<Self, EconomyError> {
        let amount = amount.max(0);
        if amount > self.coins {
            return Err(EconomyError::InsufficientCoins {
                requested: amount,
                available: self.coins,
            });
        }
        Ok(Self {
            coins: self.coins - amount,
            experience: self.experience,
        })
    }

    pub fn gain_experience(&self, amount: i64) -> Self {
        Self {
            coins: self.coins,
            experience: self.experience.saturating_add(amount.max(0)),
        }
    }
}

/// Wire form of the remote per-player record. Every field is optional
/// because the service stores partial documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyRecord {
    pub coins: Option<i64>,
    pub experience: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveEconomyRequest {
    pub coins: i64,
    pub experience: i64,
}

impl From<EconomySnapshot> for SaveEconomyRequest {
    fn from(snapshot: EconomySnapshot) -> Self {
        Self {
            coins: snapshot.coins,
            experience: snapshot.experience,
        }
    }
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    pub data: T,
}

impl<T> ApiSuccess<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_defaults() {
        let snapshot = EconomySnapshot::default();
        assert_eq!(snapshot.coins, 1000);
        assert_eq!(snapshot.experience, 0);
    }

    #[test]
    fn test_from_record_adopts_values() {
        let record = EconomyRecord {
            coins: Some(500),
            experience: Some(20),
            updated_at: None,
        };
        let snapshot = EconomySnapshot::from_record(&record);
        assert_eq!(snapshot.coins, 500);
        assert_eq!(snapshot.experience, 20);
    }

    #[test]
    fn test_from_record_defaults_missing_fields() {
        let record = EconomyRecord {
            coins: None,
            experience: Some(7),
            updated_at: None,
        };
        let snapshot = EconomySnapshot::from_record(&record);
        assert_eq!(snapshot.coins, 1000);
        assert_eq!(snapshot.experience, 7);

        let snapshot = EconomySnapshot::from_record(&EconomyRecord::default());
        assert_eq!(snapshot, EconomySnapshot::default());
    }

    #[test]
    fn test_from_record_clamps_negatives() {
        let record = EconomyRecord {
            coins: Some(-50),
            experience: Some(-1),
            updated_at: None,
        };
        let snapshot = EconomySnapshot::from_record(&record);
        assert_eq!(snapshot.coins, 0);
        assert_eq!(snapshot.experience, 0);
    }

    #[test]
    fn test_credit_ignores_negative_amounts() {
        let snapshot = EconomySnapshot::default().credit(-100);
        assert_eq!(snapshot.coins, 1000);
    }

    #[test]
    fn test_debit_refuses_overdraft() {
        let snapshot = EconomySnapshot {
            coins: 30,
            experience: 0,
        };
        let result = snapshot.debit(31);
        assert_eq!(
            result,
            Err(EconomyError::InsufficientCoins {
                requested: 31,
                available: 30,
            })
        );
        assert_eq!(snapshot.debit(30).unwrap().coins, 0);
    }

    #[test]
    fn test_gain_experience_saturates() {
        let snapshot = EconomySnapshot {
            coins: 0,
            experience: i64::MAX,
        };
        assert_eq!(snapshot.gain_experience(1).experience, i64::MAX);
    }

    #[test]
    fn test_save_request_from_snapshot() {
        let request = SaveEconomyRequest::from(EconomySnapshot {
            coins: 510,
            experience: 20,
        });
        assert_eq!(request.coins, 510);
        assert_eq!(request.experience, 20);
    }

    #[test]
    fn test_api_success() {
        let success = ApiSuccess::new("test data");
        assert_eq!(success.data, "test data");
    }
}
