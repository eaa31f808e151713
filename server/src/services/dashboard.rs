//! Dashboard Aggregator
//!
//! Fetches the three record sets for a month (incomes, expenses,
//! memberships started) and reduces them to totals and breakdowns.
//! Month data is cached per (year, month) with a TTL; every financial
//! write clears the cache so the dashboard never shows stale numbers
//! for the current month.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use chrono_tz::Tz;
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::db::models::{
    Expense, Income, Membership, MembershipWithClient, MISSING_CLIENT_NAME,
};
use crate::db::repository::{
    ClientRepository, ExpenseRepository, IncomeRepository, MembershipRepository,
};
use crate::utils::{time, AppResult};

/// Raw record sets for one month
#[derive(Debug, Clone)]
pub struct MonthData {
    pub year: i32,
    pub month: u32,
    pub incomes: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub memberships: Vec<MembershipWithClient>,
}

impl MonthData {
    pub fn has_data(&self) -> bool {
        !self.incomes.is_empty() || !self.expenses.is_empty() || !self.memberships.is_empty()
    }
}

fn cents_to_major(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Per-day totals for the evolution chart
#[derive(Debug, Clone, Serialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub membership: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CountTotal {
    pub count: u32,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductSales {
    pub name: String,
    pub quantity: u32,
}

/// Per-client membership spend for the top-clients ranking
#[derive(Debug, Clone, Serialize)]
pub struct ClientMembershipSpend {
    pub client_name: String,
    pub client_dni: String,
    pub count: u32,
    pub total: Decimal,
}

/// Everything the dashboard view needs, money in major units
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub year: i32,
    pub month: u32,
    pub has_data: bool,

    pub total_income: Decimal,
    pub total_membership: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,

    pub income_count: usize,
    pub expense_count: usize,
    pub membership_count: usize,

    pub average_membership_price: Option<Decimal>,
    pub top_membership_type: Option<String>,

    pub daily: Vec<DailyTotals>,
    pub income_by_payment_method: BTreeMap<String, Decimal>,
    pub expenses_by_concept: BTreeMap<String, Decimal>,
    pub memberships_by_type: BTreeMap<String, CountTotal>,
    pub memberships_by_payment: BTreeMap<String, CountTotal>,
    pub top_membership_clients: Vec<ClientMembershipSpend>,
    pub top_products: Vec<ProductSales>,
    pub income_by_operator: BTreeMap<String, Decimal>,
}

pub struct DashboardService {
    incomes: IncomeRepository,
    expenses: ExpenseRepository,
    memberships: MembershipRepository,
    clients: ClientRepository,
    tz: Tz,
    ttl: Duration,
    cache: DashMap<(i32, u32), (Instant, Arc<MonthData>)>,
}

impl DashboardService {
    pub fn new(db: Surreal<Db>, tz: Tz, ttl: Duration) -> Self {
        Self {
            incomes: IncomeRepository::new(db.clone()),
            expenses: ExpenseRepository::new(db.clone()),
            memberships: MembershipRepository::new(db.clone()),
            clients: ClientRepository::new(db),
            tz,
            ttl,
            cache: DashMap::new(),
        }
    }

    /// Record sets for a month, cached until TTL or the next write
    pub async fn month_data(&self, year: i32, month: u32) -> AppResult<Arc<MonthData>> {
        if let Some(entry) = self.cache.get(&(year, month)) {
            let (fetched_at, data) = entry.value();
            if fetched_at.elapsed() < self.ttl {
                return Ok(data.clone());
            }
        }

        let data = Arc::new(self.fetch_month(year, month).await?);
        self.cache.insert((year, month), (Instant::now(), data.clone()));
        Ok(data)
    }

    /// Drop all cached months; called after every financial write
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    async fn fetch_month(&self, year: i32, month: u32) -> AppResult<MonthData> {
        let (start, end) = time::month_range_millis(year, month, self.tz)?;

        let incomes = self.incomes.find_between(start, end).await?;
        let expenses = self.expenses.find_between(start, end).await?;
        let memberships = self.memberships.find_started_between(start, end).await?;

        let client_names: HashMap<String, String> = self
            .clients
            .find_all()
            .await?
            .into_iter()
            .map(|c| (c.dni.clone(), c.name))
            .collect();

        let memberships = memberships
            .into_iter()
            .map(|m| enrich_membership(m, &client_names))
            .collect();

        tracing::debug!(year, month, "dashboard month data fetched");

        Ok(MonthData {
            year,
            month,
            incomes,
            expenses,
            memberships,
        })
    }

    /// Reduce a month's records to the dashboard summary
    pub fn summarize(&self, data: &MonthData) -> DashboardSummary {
        summarize(data, self.tz)
    }
}

fn enrich_membership(
    membership: Membership,
    client_names: &HashMap<String, String>,
) -> MembershipWithClient {
    let client_name = client_names
        .get(&membership.client_dni)
        .cloned()
        .unwrap_or_else(|| MISSING_CLIENT_NAME.to_string());
    MembershipWithClient {
        membership,
        client_name,
    }
}

fn summarize(data: &MonthData, tz: Tz) -> DashboardSummary {
    let total_income_cents: i64 = data.incomes.iter().map(|i| i.total_cents).sum();
    let total_expense_cents: i64 = data.expenses.iter().map(|e| e.amount_cents).sum();
    let total_membership_cents: i64 = data
        .memberships
        .iter()
        .map(|m| m.membership.price_cents)
        .sum();
    let net_cents = total_income_cents + total_membership_cents - total_expense_cents;

    let mut daily: BTreeMap<NaiveDate, (i64, i64, i64)> = BTreeMap::new();
    for income in &data.incomes {
        let day = time::millis_to_date(income.date, tz);
        daily.entry(day).or_default().0 += income.total_cents;
    }
    for expense in &data.expenses {
        let day = time::millis_to_date(expense.date, tz);
        daily.entry(day).or_default().1 += expense.amount_cents;
    }
    for membership in &data.memberships {
        let day = time::millis_to_date(membership.membership.start_date, tz);
        daily.entry(day).or_default().2 += membership.membership.price_cents;
    }
    let daily = daily
        .into_iter()
        .map(|(date, (income, expense, membership))| DailyTotals {
            date,
            income: cents_to_major(income),
            expense: cents_to_major(expense),
            membership: cents_to_major(membership),
        })
        .collect();

    let mut income_by_payment_method: BTreeMap<String, i64> = BTreeMap::new();
    let mut income_by_operator: BTreeMap<String, i64> = BTreeMap::new();
    let mut product_counts: BTreeMap<String, u32> = BTreeMap::new();
    for income in &data.incomes {
        *income_by_payment_method
            .entry(income.payment_method.to_string())
            .or_default() += income.total_cents;
        *income_by_operator.entry(income.operator.clone()).or_default() += income.total_cents;
        for item in &income.items {
            *product_counts.entry(item.name.clone()).or_default() += 1;
        }
    }

    let mut expenses_by_concept: BTreeMap<String, i64> = BTreeMap::new();
    for expense in &data.expenses {
        *expenses_by_concept
            .entry(expense.concept.to_string())
            .or_default() += expense.amount_cents;
    }

    let mut memberships_by_type: BTreeMap<String, (u32, i64)> = BTreeMap::new();
    let mut memberships_by_payment: BTreeMap<String, (u32, i64)> = BTreeMap::new();
    let mut spend_by_client: BTreeMap<(String, String), (u32, i64)> = BTreeMap::new();
    for with_client in &data.memberships {
        let m = &with_client.membership;
        let by_type = memberships_by_type
            .entry(m.membership_type.to_string())
            .or_default();
        by_type.0 += 1;
        by_type.1 += m.price_cents;

        let by_payment = memberships_by_payment
            .entry(m.payment_method.display().to_string())
            .or_default();
        by_payment.0 += 1;
        by_payment.1 += m.price_cents;

        let by_client = spend_by_client
            .entry((with_client.client_name.clone(), m.client_dni.clone()))
            .or_default();
        by_client.0 += 1;
        by_client.1 += m.price_cents;
    }

    let mut top_membership_clients: Vec<ClientMembershipSpend> = spend_by_client
        .into_iter()
        .map(|((client_name, client_dni), (count, cents))| ClientMembershipSpend {
            client_name,
            client_dni,
            count,
            total: cents_to_major(cents),
        })
        .collect();
    top_membership_clients.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then(a.client_name.cmp(&b.client_name))
    });
    top_membership_clients.truncate(10);

    let membership_count = data.memberships.len();
    let average_membership_price = if membership_count > 0 {
        Some(cents_to_major(total_membership_cents) / Decimal::from(membership_count as u64))
    } else {
        None
    };
    let top_membership_type = memberships_by_type
        .iter()
        .max_by_key(|(_, (count, _))| *count)
        .map(|(label, _)| label.clone());

    let mut top_products: Vec<ProductSales> = product_counts
        .into_iter()
        .map(|(name, quantity)| ProductSales { name, quantity })
        .collect();
    top_products.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
    top_products.truncate(10);

    DashboardSummary {
        year: data.year,
        month: data.month,
        has_data: data.has_data(),

        total_income: cents_to_major(total_income_cents),
        total_membership: cents_to_major(total_membership_cents),
        total_expense: cents_to_major(total_expense_cents),
        net: cents_to_major(net_cents),

        income_count: data.incomes.len(),
        expense_count: data.expenses.len(),
        membership_count,

        average_membership_price,
        top_membership_type,

        daily,
        income_by_payment_method: to_major_map(income_by_payment_method),
        expenses_by_concept: to_major_map(expenses_by_concept),
        memberships_by_type: to_count_total_map(memberships_by_type),
        memberships_by_payment: to_count_total_map(memberships_by_payment),
        top_membership_clients,
        top_products,
        income_by_operator: to_major_map(income_by_operator),
    }
}

fn to_major_map(map: BTreeMap<String, i64>) -> BTreeMap<String, Decimal> {
    map.into_iter()
        .map(|(k, cents)| (k, cents_to_major(cents)))
        .collect()
}

fn to_count_total_map(map: BTreeMap<String, (u32, i64)>) -> BTreeMap<String, CountTotal> {
    map.into_iter()
        .map(|(k, (count, cents))| {
            (
                k,
                CountTotal {
                    count,
                    total: cents_to_major(cents),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{
        ExpenseConcept, IncomeItem, MembershipPayment, MembershipType, PaymentMethod,
    };
    use chrono_tz::UTC;
    use std::str::FromStr;

    fn day_millis(y: i32, m: u32, d: u32) -> i64 {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        time::day_start_millis(date, UTC)
    }

    fn income(date: i64, total_cents: i64, method: PaymentMethod, operator: &str) -> Income {
        Income {
            id: None,
            date,
            client_name: String::new(),
            operator: operator.to_string(),
            payment_method: method,
            note: String::new(),
            items: Vec::new(),
            total_cents,
            created_at: None,
            updated_at: None,
        }
    }

    fn membership_with_client(name: &str, dni: &str, price_cents: i64) -> MembershipWithClient {
        MembershipWithClient {
            membership: Membership {
                id: None,
                client_dni: dni.to_string(),
                membership_type: MembershipType::Mensual,
                start_date: day_millis(2024, 3, 5),
                expires_at: day_millis(2024, 4, 4),
                price_cents,
                payment_method: MembershipPayment::Efectivo,
                notes: String::new(),
                is_active: true,
                created_at: None,
                updated_at: None,
            },
            client_name: name.to_string(),
        }
    }

    fn expense(date: i64, amount_cents: i64) -> Expense {
        Expense {
            id: None,
            date,
            concept: ExpenseConcept::Insumos,
            supplier: String::new(),
            description: String::new(),
            payment_method: PaymentMethod::Efectivo,
            amount_cents,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn march_totals_in_major_units() {
        let data = MonthData {
            year: 2024,
            month: 3,
            incomes: vec![income(
                day_millis(2024, 3, 10),
                15_000,
                PaymentMethod::Efectivo,
                "Benja",
            )],
            expenses: vec![expense(day_millis(2024, 3, 12), 5_000)],
            memberships: Vec::new(),
        };

        let summary = summarize(&data, UTC);
        assert_eq!(summary.total_income, Decimal::from_str("150.00").unwrap());
        assert_eq!(summary.total_expense, Decimal::from_str("50.00").unwrap());
        assert_eq!(summary.total_membership, Decimal::ZERO);
        assert_eq!(summary.net, Decimal::from_str("100.00").unwrap());
        assert!(summary.has_data);
    }

    #[test]
    fn empty_month_has_no_data() {
        let data = MonthData {
            year: 2024,
            month: 2,
            incomes: Vec::new(),
            expenses: Vec::new(),
            memberships: Vec::new(),
        };

        let summary = summarize(&data, UTC);
        assert!(!summary.has_data);
        assert_eq!(summary.net, Decimal::ZERO);
        assert!(summary.daily.is_empty());
    }

    #[test]
    fn breakdowns_group_by_method_concept_and_product() {
        let mut sale = income(
            day_millis(2024, 3, 10),
            10_000,
            PaymentMethod::Efectivo,
            "Benja",
        );
        sale.items.push(IncomeItem {
            product_id: None,
            name: "Corte".to_string(),
            price_cents: 10_000,
        });
        let other = income(day_millis(2024, 3, 11), 20_000, PaymentMethod::Qr, "Lucas");

        let data = MonthData {
            year: 2024,
            month: 3,
            incomes: vec![sale, other],
            expenses: vec![
                expense(day_millis(2024, 3, 12), 3_000),
                expense(day_millis(2024, 3, 13), 4_000),
            ],
            memberships: Vec::new(),
        };

        let summary = summarize(&data, UTC);
        assert_eq!(
            summary.income_by_payment_method["efectivo"],
            Decimal::from_str("100.00").unwrap()
        );
        assert_eq!(
            summary.income_by_payment_method["qr"],
            Decimal::from_str("200.00").unwrap()
        );
        assert_eq!(
            summary.expenses_by_concept["insumos"],
            Decimal::from_str("70.00").unwrap()
        );
        assert_eq!(summary.top_products.len(), 1);
        assert_eq!(summary.top_products[0].name, "Corte");
        assert_eq!(summary.top_products[0].quantity, 1);
        assert_eq!(
            summary.income_by_operator["Lucas"],
            Decimal::from_str("200.00").unwrap()
        );
    }

    #[test]
    fn top_membership_clients_ranked_by_spend() {
        let data = MonthData {
            year: 2024,
            month: 3,
            incomes: Vec::new(),
            expenses: Vec::new(),
            memberships: vec![
                membership_with_client("Ana Gómez", "111", 500_000),
                membership_with_client("Ana Gómez", "111", 500_000),
                membership_with_client("Juan Pérez", "222", 1_350_000),
                membership_with_client("Mara López", "333", 400_000),
            ],
        };

        let summary = summarize(&data, UTC);
        let top = &summary.top_membership_clients;
        assert_eq!(top.len(), 3);

        assert_eq!(top[0].client_name, "Juan Pérez");
        assert_eq!(top[0].client_dni, "222");
        assert_eq!(top[0].count, 1);
        assert_eq!(top[0].total, Decimal::from_str("13500.00").unwrap());

        assert_eq!(top[1].client_name, "Ana Gómez");
        assert_eq!(top[1].count, 2);
        assert_eq!(top[1].total, Decimal::from_str("10000.00").unwrap());

        assert_eq!(top[2].client_dni, "333");
    }

    #[test]
    fn average_membership_price_keeps_sub_cent_precision() {
        let data = MonthData {
            year: 2024,
            month: 3,
            incomes: Vec::new(),
            expenses: Vec::new(),
            memberships: vec![
                membership_with_client("Ana Gómez", "111", 500_000),
                membership_with_client("Juan Pérez", "222", 500_001),
            ],
        };

        let summary = summarize(&data, UTC);
        assert_eq!(
            summary.average_membership_price,
            Some(Decimal::from_str("5000.005").unwrap())
        );
    }

    #[test]
    fn daily_trend_is_sorted_and_merged_per_day() {
        let day = day_millis(2024, 3, 10);
        let data = MonthData {
            year: 2024,
            month: 3,
            incomes: vec![
                income(day, 1_000, PaymentMethod::Efectivo, "a"),
                income(day, 2_000, PaymentMethod::Efectivo, "a"),
            ],
            expenses: vec![expense(day_millis(2024, 3, 9), 500)],
            memberships: Vec::new(),
        };

        let summary = summarize(&data, UTC);
        assert_eq!(summary.daily.len(), 2);
        assert_eq!(summary.daily[0].date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(summary.daily[1].income, Decimal::from_str("30.00").unwrap());
    }
}
