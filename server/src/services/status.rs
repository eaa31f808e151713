//! Membership Status Engine
//!
//! Derives a client's status from the single most recent membership
//! record. Recency is `created_at`, falling back to `start_date` for
//! records imported without a server timestamp. Status is a function of
//! wall-clock time and is recomputed on every request.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::db::models::Membership;
use crate::utils::time;

/// Memberships expiring within this many days are flagged
pub const EXPIRY_WARNING_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipState {
    NoMembership,
    Current,
    ExpiringSoon,
    Expired,
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipStatus {
    pub state: MembershipState,
    pub message: String,
}

fn recency_key(membership: &Membership) -> i64 {
    membership.created_at.unwrap_or(membership.start_date)
}

/// Most recent membership among `records`
pub fn latest(records: &[Membership]) -> Option<&Membership> {
    records.iter().max_by_key(|m| recency_key(m))
}

/// Expiration state of a single record relative to `today`, plus the
/// signed day distance (negative when overdue)
pub fn expiry_state(membership: &Membership, today: NaiveDate, tz: Tz) -> (MembershipState, i64) {
    let expiry = time::millis_to_date(membership.expires_at, tz);
    let days = (expiry - today).num_days();
    let state = if days < 0 {
        MembershipState::Expired
    } else if days <= EXPIRY_WARNING_DAYS {
        MembershipState::ExpiringSoon
    } else {
        MembershipState::Current
    };
    (state, days)
}

/// Status of a client given all of their membership records
pub fn evaluate(records: &[Membership], today: NaiveDate, tz: Tz) -> MembershipStatus {
    let Some(last) = latest(records) else {
        return MembershipStatus {
            state: MembershipState::NoMembership,
            message: "Sin membresías".to_string(),
        };
    };

    if !last.is_active {
        return MembershipStatus {
            state: MembershipState::NoMembership,
            message: "Última membresía desactivada".to_string(),
        };
    }

    let tipo = last.membership_type;
    let (state, days) = expiry_state(last, today, tz);
    let message = match state {
        MembershipState::Expired => {
            format!("Membresía {} vencida hace {} día(s)", tipo, -days)
        }
        MembershipState::ExpiringSoon => {
            format!("Membresía {} vence en {} día(s)", tipo, days)
        }
        _ => format!("Membresía {} vigente ({} días restantes)", tipo, days),
    };

    MembershipStatus { state, message }
}

/// Reduce to one record per client (the most recent), sorted ascending
/// by expiration so the soonest-expiring memberships list first
pub fn dedupe_latest_per_client(records: Vec<Membership>) -> Vec<Membership> {
    let mut by_client: HashMap<String, Membership> = HashMap::new();
    for membership in records {
        match by_client.get(&membership.client_dni) {
            Some(existing) if recency_key(existing) >= recency_key(&membership) => {}
            _ => {
                by_client.insert(membership.client_dni.clone(), membership);
            }
        }
    }

    let mut deduped: Vec<Membership> = by_client.into_values().collect();
    deduped.sort_by_key(|m| m.expires_at);
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{MembershipPayment, MembershipType};
    use chrono_tz::Tz;

    const TZ: Tz = chrono_tz::UTC;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn membership(
        dni: &str,
        membership_type: MembershipType,
        start: NaiveDate,
        is_active: bool,
        created_at: Option<i64>,
    ) -> Membership {
        let expiry = membership_type.expiry_from(start);
        Membership {
            id: None,
            client_dni: dni.to_string(),
            membership_type,
            start_date: time::day_start_millis(start, TZ),
            expires_at: time::day_start_millis(expiry, TZ),
            price_cents: 500_000,
            payment_method: MembershipPayment::Efectivo,
            notes: String::new(),
            is_active,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn client_without_records_has_no_membership() {
        let status = evaluate(&[], date(2024, 1, 25), TZ);
        assert_eq!(status.state, MembershipState::NoMembership);
        assert_eq!(status.message, "Sin membresías");
    }

    #[test]
    fn deactivated_latest_counts_as_no_membership() {
        let records = vec![membership(
            "111",
            MembershipType::Anual,
            date(2024, 1, 1),
            false,
            Some(1),
        )];
        let status = evaluate(&records, date(2024, 1, 25), TZ);
        assert_eq!(status.state, MembershipState::NoMembership);
        assert_eq!(status.message, "Última membresía desactivada");
    }

    #[test]
    fn monthly_membership_expires_thirty_days_after_start() {
        let m = membership("111", MembershipType::Mensual, date(2024, 1, 1), true, None);
        assert_eq!(time::millis_to_date(m.expires_at, TZ), date(2024, 1, 31));
    }

    #[test]
    fn six_days_before_expiry_is_expiring_soon() {
        let records = vec![membership(
            "111",
            MembershipType::Mensual,
            date(2024, 1, 1),
            true,
            Some(1),
        )];
        let status = evaluate(&records, date(2024, 1, 25), TZ);
        assert_eq!(status.state, MembershipState::ExpiringSoon);
        assert_eq!(status.message, "Membresía Mensual vence en 6 día(s)");
    }

    #[test]
    fn three_days_after_expiry_is_expired() {
        let records = vec![membership(
            "111",
            MembershipType::Mensual,
            date(2024, 1, 1),
            true,
            Some(1),
        )];
        let status = evaluate(&records, date(2024, 2, 3), TZ);
        assert_eq!(status.state, MembershipState::Expired);
        assert_eq!(status.message, "Membresía Mensual vencida hace 3 día(s)");
    }

    #[test]
    fn well_before_expiry_is_current() {
        let records = vec![membership(
            "111",
            MembershipType::Mensual,
            date(2024, 1, 1),
            true,
            Some(1),
        )];
        let status = evaluate(&records, date(2024, 1, 10), TZ);
        assert_eq!(status.state, MembershipState::Current);
        assert_eq!(status.message, "Membresía Mensual vigente (21 días restantes)");
    }

    #[test]
    fn expiry_exactly_today_is_expiring_soon() {
        let records = vec![membership(
            "111",
            MembershipType::Mensual,
            date(2024, 1, 1),
            true,
            Some(1),
        )];
        let status = evaluate(&records, date(2024, 1, 31), TZ);
        assert_eq!(status.state, MembershipState::ExpiringSoon);
        assert_eq!(status.message, "Membresía Mensual vence en 0 día(s)");
    }

    #[test]
    fn warning_window_boundary_is_seven_days() {
        let records = vec![membership(
            "111",
            MembershipType::Mensual,
            date(2024, 1, 1),
            true,
            Some(1),
        )];
        // Expires 2024-01-31: 7 days out warns, 8 days out does not.
        assert_eq!(
            evaluate(&records, date(2024, 1, 24), TZ).state,
            MembershipState::ExpiringSoon
        );
        assert_eq!(
            evaluate(&records, date(2024, 1, 23), TZ).state,
            MembershipState::Current
        );
    }

    #[test]
    fn creation_timestamp_wins_over_start_date() {
        // Older start date but newer creation timestamp: the second
        // record is the one that drives status.
        let first = membership("111", MembershipType::Anual, date(2024, 3, 1), true, Some(10));
        let second = membership("111", MembershipType::Mensual, date(2024, 1, 1), false, Some(20));
        let records = vec![first, second];

        let status = evaluate(&records, date(2024, 3, 5), TZ);
        assert_eq!(status.state, MembershipState::NoMembership);
    }

    #[test]
    fn legacy_record_orders_by_start_date_when_untimestamped() {
        // The first record was created (and timestamped) in early January.
        // The legacy record has no creation timestamp, so its March start
        // date is its ordering key and it wins as the most recent.
        let created_jan_5 = time::day_start_millis(date(2024, 1, 5), TZ);
        let timestamped = membership(
            "111",
            MembershipType::Mensual,
            date(2024, 1, 1),
            true,
            Some(created_jan_5),
        );
        let legacy = membership("111", MembershipType::Anual, date(2024, 3, 1), true, None);
        let records = vec![timestamped, legacy];

        let status = evaluate(&records, date(2024, 3, 10), TZ);
        // The January monthly is already expired; only the legacy annual
        // record yields a current status.
        assert_eq!(status.state, MembershipState::Current);
        assert!(status.message.starts_with("Membresía Anual vigente"));

        let last = latest(&records).unwrap();
        assert_eq!(last.membership_type, MembershipType::Anual);
        assert!(last.created_at.is_none());
    }

    #[test]
    fn toggling_active_twice_restores_status() {
        let mut records = vec![membership(
            "111",
            MembershipType::Mensual,
            date(2024, 1, 1),
            true,
            Some(1),
        )];
        let today = date(2024, 1, 10);
        let before = evaluate(&records, today, TZ).state;

        records[0].is_active = false;
        assert_eq!(evaluate(&records, today, TZ).state, MembershipState::NoMembership);

        records[0].is_active = true;
        assert_eq!(evaluate(&records, today, TZ).state, before);
    }

    #[test]
    fn dedupe_keeps_latest_per_client_sorted_by_expiry() {
        let records = vec![
            membership("111", MembershipType::Mensual, date(2024, 1, 1), true, Some(10)),
            membership("111", MembershipType::Anual, date(2024, 2, 1), true, Some(20)),
            membership("222", MembershipType::Mensual, date(2024, 1, 15), true, Some(5)),
        ];

        let deduped = dedupe_latest_per_client(records);
        assert_eq!(deduped.len(), 2);
        // 222's monthly expires 2024-02-14, before 111's annual.
        assert_eq!(deduped[0].client_dni, "222");
        assert_eq!(deduped[1].client_dni, "111");
        assert_eq!(deduped[1].membership_type, MembershipType::Anual);
    }
}
