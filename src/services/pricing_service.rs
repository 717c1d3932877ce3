//! Calculadora de precios
//!
//! Aritmética pura de costes de una reserva: días de alquiler, coste del
//! vehículo, líneas de extras y descuento. Sin I/O, determinista y con
//! `Decimal` exacto de principio a fin: segura para cotizar fuera de
//! cualquier transacción.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Entrada de una línea de extra ya resuelta (precio congelado)
#[derive(Debug, Clone)]
pub struct PricingLineInput {
    pub extra_id: Uuid,
    pub extra_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
}

/// Línea valorada: unit_price × quantity × días
#[derive(Debug, Clone, Serialize)]
pub struct PricedLine {
    pub extra_id: Uuid,
    pub extra_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Desglose completo de costes de una reserva
#[derive(Debug, Clone, Serialize)]
pub struct CostBreakdown {
    pub total_days: i32,
    pub rental_cost: Decimal,
    pub extras_cost: Decimal,
    pub total_cost: Decimal,
    pub lines: Vec<PricedLine>,
}

/// Días totales de alquiler con semántica inclusiva: (end − start) + 1
pub fn rental_days(start_date: NaiveDate, end_date: NaiveDate) -> Result<i32, AppError> {
    if end_date <= start_date {
        return Err(AppError::InvalidRange(format!(
            "end date {} must be after start date {}",
            end_date, start_date
        )));
    }

    Ok(((end_date - start_date).num_days() + 1) as i32)
}

/// Calcular el desglose de costes para un rango de fechas, una tarifa
/// diaria congelada y un juego de líneas ya resueltas
pub fn compute_cost(
    start_date: NaiveDate,
    end_date: NaiveDate,
    daily_rate: Decimal,
    lines: &[PricingLineInput],
) -> Result<CostBreakdown, AppError> {
    let total_days = rental_days(start_date, end_date)?;
    let days = Decimal::from(total_days);

    let rental_cost = daily_rate * days;

    let priced: Vec<PricedLine> = lines
        .iter()
        .map(|line| PricedLine {
            extra_id: line.extra_id,
            extra_name: line.extra_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.unit_price * Decimal::from(line.quantity) * days,
        })
        .collect();

    let extras_cost: Decimal = priced.iter().map(|line| line.total_price).sum();

    Ok(CostBreakdown {
        total_days,
        rental_cost,
        extras_cost,
        total_cost: rental_cost + extras_cost,
        lines: priced,
    })
}

/// El descuento debe quedar dentro de `0 ≤ discount ≤ total_cost`;
/// los importes finales negativos se rechazan
pub fn validate_discount(discount: Decimal, total_cost: Decimal) -> Result<(), AppError> {
    if discount < Decimal::ZERO {
        return Err(AppError::InvalidDiscount(format!(
            "discount must not be negative, got {}",
            discount
        )));
    }
    if discount > total_cost {
        return Err(AppError::InvalidDiscount(format!(
            "discount {} exceeds total cost {}",
            discount, total_cost
        )));
    }

    Ok(())
}

/// Importe final tras aplicar el descuento ya validado
pub fn final_amount(total_cost: Decimal, discount: Decimal) -> Decimal {
    total_cost - discount
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_rental_days_inclusive() {
        // 10..12 son 3 días de alquiler
        assert_eq!(rental_days(date(2024, 1, 10), date(2024, 1, 12)).unwrap(), 3);
        assert_eq!(rental_days(date(2024, 1, 10), date(2024, 1, 11)).unwrap(), 2);
        assert_eq!(rental_days(date(2024, 12, 30), date(2025, 1, 2)).unwrap(), 4);
    }

    #[test]
    fn test_rental_days_rejects_bad_ranges() {
        assert!(matches!(
            rental_days(date(2024, 1, 10), date(2024, 1, 10)),
            Err(AppError::InvalidRange(_))
        ));
        assert!(matches!(
            rental_days(date(2024, 1, 12), date(2024, 1, 10)),
            Err(AppError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_compute_cost_worked_example() {
        // Tarifa 100, 2024-01-10..2024-01-12, un extra de 20 x1
        let lines = vec![PricingLineInput {
            extra_id: Uuid::new_v4(),
            extra_name: "GPS".to_string(),
            unit_price: dec(20),
            quantity: 1,
        }];

        let breakdown =
            compute_cost(date(2024, 1, 10), date(2024, 1, 12), dec(100), &lines).unwrap();

        assert_eq!(breakdown.total_days, 3);
        assert_eq!(breakdown.rental_cost, dec(300));
        assert_eq!(breakdown.extras_cost, dec(60));
        assert_eq!(breakdown.total_cost, dec(360));

        validate_discount(dec(60), breakdown.total_cost).unwrap();
        assert_eq!(final_amount(breakdown.total_cost, dec(60)), dec(300));
    }

    #[test]
    fn test_compute_cost_without_extras() {
        let breakdown =
            compute_cost(date(2024, 3, 1), date(2024, 3, 5), dec(75), &[]).unwrap();

        assert_eq!(breakdown.total_days, 5);
        assert_eq!(breakdown.rental_cost, dec(375));
        assert_eq!(breakdown.extras_cost, Decimal::ZERO);
        assert_eq!(breakdown.total_cost, dec(375));
        assert!(breakdown.lines.is_empty());
    }

    #[test]
    fn test_extras_cost_is_sum_of_line_totals() {
        let lines = vec![
            PricingLineInput {
                extra_id: Uuid::new_v4(),
                extra_name: "Child seat".to_string(),
                unit_price: Decimal::new(1250, 2), // 12.50
                quantity: 2,
            },
            PricingLineInput {
                extra_id: Uuid::new_v4(),
                extra_name: "GPS".to_string(),
                unit_price: Decimal::new(999, 2), // 9.99
                quantity: 1,
            },
        ];

        let breakdown =
            compute_cost(date(2024, 6, 1), date(2024, 6, 2), dec(50), &lines).unwrap();

        // 2 días: 12.50×2×2 = 50.00, 9.99×1×2 = 19.98
        assert_eq!(breakdown.lines[0].total_price, Decimal::new(5000, 2));
        assert_eq!(breakdown.lines[1].total_price, Decimal::new(1998, 2));
        assert_eq!(breakdown.extras_cost, Decimal::new(6998, 2));
        assert_eq!(
            breakdown.extras_cost,
            breakdown.lines.iter().map(|l| l.total_price).sum()
        );
    }

    #[test]
    fn test_validate_discount_bounds() {
        assert!(validate_discount(Decimal::ZERO, dec(100)).is_ok());
        assert!(validate_discount(dec(100), dec(100)).is_ok());
        assert!(matches!(
            validate_discount(dec(-1), dec(100)),
            Err(AppError::InvalidDiscount(_))
        ));
        assert!(matches!(
            validate_discount(dec(101), dec(100)),
            Err(AppError::InvalidDiscount(_))
        ));
    }

    #[test]
    fn test_decimal_arithmetic_is_exact() {
        // 0.10 × 3 días no acumula error de coma flotante
        let breakdown = compute_cost(
            date(2024, 1, 10),
            date(2024, 1, 12),
            Decimal::new(10, 2),
            &[],
        )
        .unwrap();
        assert_eq!(breakdown.rental_cost, Decimal::new(30, 2));
    }
}
