//! Monthly aggregation against the embedded store
//! Run: cargo test -p barber-server --test dashboard_month

use std::time::Duration;

use barber_server::db::models::{Expense, ExpenseConcept, Income, PaymentMethod};
use barber_server::db::repository::{ExpenseRepository, IncomeRepository};
use barber_server::db::DbService;
use barber_server::services::DashboardService;
use barber_server::utils::time;
use chrono::NaiveDate;
use chrono_tz::UTC;
use rust_decimal::Decimal;
use std::str::FromStr;

fn day_millis(y: i32, m: u32, d: u32) -> i64 {
    time::day_start_millis(NaiveDate::from_ymd_opt(y, m, d).unwrap(), UTC)
}

fn income(date: i64, total_cents: i64) -> Income {
    Income {
        id: None,
        date,
        client_name: "Juan".to_string(),
        operator: "Benja".to_string(),
        payment_method: PaymentMethod::Efectivo,
        note: String::new(),
        items: Vec::new(),
        total_cents,
        created_at: None,
        updated_at: None,
    }
}

fn expense(date: i64, amount_cents: i64) -> Expense {
    Expense {
        id: None,
        date,
        concept: ExpenseConcept::Insumos,
        supplier: "Proveedor".to_string(),
        description: String::new(),
        payment_method: PaymentMethod::Efectivo,
        amount_cents,
        created_at: None,
        updated_at: None,
    }
}

#[tokio::test]
async fn march_scenario_totals() {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path()).await.unwrap();
    let incomes = IncomeRepository::new(db.db.clone());
    let expenses = ExpenseRepository::new(db.db.clone());

    incomes
        .create(income(day_millis(2024, 3, 10), 15_000))
        .await
        .unwrap();
    expenses
        .create(expense(day_millis(2024, 3, 12), 5_000))
        .await
        .unwrap();

    let dashboard = DashboardService::new(db.db.clone(), UTC, Duration::from_secs(600));
    let data = dashboard.month_data(2024, 3).await.unwrap();
    let summary = dashboard.summarize(&data);

    assert_eq!(summary.total_income, Decimal::from_str("150.00").unwrap());
    assert_eq!(summary.total_expense, Decimal::from_str("50.00").unwrap());
    assert_eq!(summary.total_membership, Decimal::ZERO);
    assert_eq!(summary.net, Decimal::from_str("100.00").unwrap());
}

#[tokio::test]
async fn month_boundaries_partition_records() {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path()).await.unwrap();
    let incomes = IncomeRepository::new(db.db.clone());

    // Last instant of March and first instant of April
    let march_end = day_millis(2024, 4, 1) - 1;
    let april_start = day_millis(2024, 4, 1);
    incomes.create(income(march_end, 1_000)).await.unwrap();
    incomes.create(income(april_start, 2_000)).await.unwrap();

    let dashboard = DashboardService::new(db.db.clone(), UTC, Duration::from_secs(600));

    let march = dashboard.month_data(2024, 3).await.unwrap();
    assert_eq!(march.incomes.len(), 1);
    assert_eq!(march.incomes[0].total_cents, 1_000);

    let april = dashboard.month_data(2024, 4).await.unwrap();
    assert_eq!(april.incomes.len(), 1);
    assert_eq!(april.incomes[0].total_cents, 2_000);
}

#[tokio::test]
async fn cache_invalidation_makes_new_writes_visible() {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path()).await.unwrap();
    let incomes = IncomeRepository::new(db.db.clone());

    let dashboard = DashboardService::new(db.db.clone(), UTC, Duration::from_secs(600));

    // Prime the cache on an empty month
    let before = dashboard.month_data(2024, 3).await.unwrap();
    assert!(!before.has_data());

    incomes
        .create(income(day_millis(2024, 3, 10), 1_000))
        .await
        .unwrap();

    // Still cached
    let cached = dashboard.month_data(2024, 3).await.unwrap();
    assert!(!cached.has_data());

    dashboard.invalidate();
    let fresh = dashboard.month_data(2024, 3).await.unwrap();
    assert_eq!(fresh.incomes.len(), 1);
}

#[tokio::test]
async fn recent_listing_is_newest_first_and_truncated() {
    let tmp = tempfile::tempdir().unwrap();
    let db = DbService::new(tmp.path()).await.unwrap();
    let incomes = IncomeRepository::new(db.db.clone());

    for day in 1..=5 {
        incomes
            .create(income(day_millis(2024, 3, day), day as i64 * 100))
            .await
            .unwrap();
    }

    let recent = incomes.find_recent(3).await.unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].total_cents, 500);
    assert_eq!(recent[2].total_cents, 300);
}
