//! Report Exporter
//!
//! Builds the monthly Excel workbook in memory: one sheet per record
//! set (Ingresos, Gastos, Membresías), each included only when the set
//! is non-empty. Amounts are written in major units; dates are written
//! timezone-naive in the business timezone.

use chrono_tz::Tz;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::db::models::IncomeItem;
use crate::services::dashboard::MonthData;
use crate::utils::time;

const INCOME_HEADERS: [&str; 7] = [
    "Fecha",
    "Cliente",
    "Operador",
    "Método de Pago",
    "Monto (ARS)",
    "Productos/Servicios",
    "Consumición",
];

const EXPENSE_HEADERS: [&str; 6] = [
    "Fecha",
    "Concepto",
    "Proveedor",
    "Método de Pago",
    "Monto (ARS)",
    "Descripción",
];

const MEMBERSHIP_HEADERS: [&str; 7] = [
    "Fecha Alta",
    "Cliente",
    "DNI",
    "Tipo",
    "Precio (ARS)",
    "Método Pago",
    "Vencimiento",
];

/// Suggested download filename, e.g. `Reporte_Marzo_2024.xlsx`
pub fn report_filename(year: i32, month: u32) -> String {
    format!("Reporte_{}_{}.xlsx", time::month_name_es(month), year)
}

/// Serialize a month's records to an xlsx byte buffer
pub fn build_workbook(data: &MonthData, tz: Tz) -> Result<Vec<u8>, XlsxError> {
    build(data, tz)?.save_to_buffer()
}

fn build(data: &MonthData, tz: Tz) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    if !data.incomes.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Ingresos")?;
        write_headers(sheet, &INCOME_HEADERS, &header_format)?;
        for (i, income) in data.incomes.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_string(row, 0, format_millis(income.date, tz))?;
            sheet.write_string(row, 1, &income.client_name)?;
            sheet.write_string(row, 2, &income.operator)?;
            sheet.write_string(row, 3, income.payment_method.as_str())?;
            sheet.write_number(row, 4, cents_to_f64(income.total_cents))?;
            sheet.write_string(row, 5, item_names(&income.items))?;
            sheet.write_string(row, 6, &income.note)?;
        }
    }

    if !data.expenses.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Gastos")?;
        write_headers(sheet, &EXPENSE_HEADERS, &header_format)?;
        for (i, expense) in data.expenses.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_string(row, 0, format_millis(expense.date, tz))?;
            sheet.write_string(row, 1, expense.concept.as_str())?;
            sheet.write_string(row, 2, &expense.supplier)?;
            sheet.write_string(row, 3, expense.payment_method.as_str())?;
            sheet.write_number(row, 4, cents_to_f64(expense.amount_cents))?;
            sheet.write_string(row, 5, &expense.description)?;
        }
    }

    if !data.memberships.is_empty() {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Membresías")?;
        write_headers(sheet, &MEMBERSHIP_HEADERS, &header_format)?;
        for (i, with_client) in data.memberships.iter().enumerate() {
            let row = (i + 1) as u32;
            let m = &with_client.membership;
            sheet.write_string(row, 0, format_millis(m.start_date, tz))?;
            sheet.write_string(row, 1, &with_client.client_name)?;
            sheet.write_string(row, 2, &m.client_dni)?;
            sheet.write_string(row, 3, m.membership_type.as_str())?;
            sheet.write_number(row, 4, cents_to_f64(m.price_cents))?;
            sheet.write_string(row, 5, m.payment_method.display())?;
            sheet.write_string(row, 6, format_millis(m.expires_at, tz))?;
        }
    }

    Ok(workbook)
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<(), XlsxError> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    Ok(())
}

fn format_millis(millis: i64, tz: Tz) -> String {
    time::millis_to_naive(millis, tz)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn cents_to_f64(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn item_names(items: &[IncomeItem]) -> String {
    if items.is_empty() {
        return "N/A".to_string();
    }
    items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Income, PaymentMethod};
    use chrono::NaiveDate;
    use chrono_tz::UTC;

    fn sample_income() -> Income {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        Income {
            id: None,
            date: time::day_start_millis(date, UTC),
            client_name: "Juan".to_string(),
            operator: "Benja".to_string(),
            payment_method: PaymentMethod::Efectivo,
            note: String::new(),
            items: Vec::new(),
            total_cents: 15_000,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn month_with_only_incomes_yields_single_sheet() {
        let data = MonthData {
            year: 2024,
            month: 3,
            incomes: vec![sample_income()],
            expenses: Vec::new(),
            memberships: Vec::new(),
        };

        let mut workbook = build(&data, UTC).unwrap();
        let names: Vec<String> = workbook
            .worksheets_mut()
            .iter()
            .map(|sheet| sheet.name())
            .collect();
        assert_eq!(names, vec!["Ingresos".to_string()]);

        let bytes = build_workbook(&data, UTC).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn item_names_joins_or_falls_back() {
        assert_eq!(item_names(&[]), "N/A");
        let items = vec![
            IncomeItem {
                product_id: None,
                name: "Corte".to_string(),
                price_cents: 1,
            },
            IncomeItem {
                product_id: None,
                name: "Gel".to_string(),
                price_cents: 1,
            },
        ];
        assert_eq!(item_names(&items), "Corte, Gel");
    }

    #[test]
    fn filename_uses_spanish_month_name() {
        assert_eq!(report_filename(2024, 3), "Reporte_Marzo_2024.xlsx");
    }
}
