//! Comprobador de disponibilidad
//!
//! Decide si un vehículo está libre para un intervalo de fechas. La
//! variante sobre conexión se ejecuta dentro de la misma transacción que
//! la escritura posterior (create / modify con cambio de fechas); la
//! variante sobre pool sirve para cotizaciones de solo lectura.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::repositories::booking_repository::BookingRepository;
use crate::utils::errors::AppError;

/// Predicado de solapamiento con días inclusivos:
/// `existing.start <= requested.end AND existing.end >= requested.start`
///
/// Es el mismo predicado que aplica la consulta de
/// `BookingRepository::has_conflict` en SQL; cualquier cambio de
/// semántica de bordes debe hacerse en los dos sitios a la vez.
pub fn ranges_overlap(
    existing_start: NaiveDate,
    existing_end: NaiveDate,
    requested_start: NaiveDate,
    requested_end: NaiveDate,
) -> bool {
    existing_start <= requested_end && existing_end >= requested_start
}

/// Disponibilidad dentro de la transacción del llamador.
///
/// `exclude_booking_id` excluye la propia reserva en el flujo de
/// modificación, para que un cambio de fechas no colisione consigo mismo.
pub async fn is_available(
    conn: &mut PgConnection,
    vehicle_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    exclude_booking_id: Option<Uuid>,
) -> Result<bool, AppError> {
    let conflict = BookingRepository::has_conflict(
        &mut *conn,
        vehicle_id,
        start_date,
        end_date,
        exclude_booking_id,
    )
    .await?;

    Ok(!conflict)
}

/// Variante de solo lectura contra el pool (cotizaciones)
pub async fn is_available_on_pool(
    pool: &PgPool,
    vehicle_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<bool, AppError> {
    let conflict =
        BookingRepository::has_conflict(pool, vehicle_id, start_date, end_date, None).await?;

    Ok(!conflict)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overlapping_ranges() {
        // Solapamiento parcial por la izquierda
        assert!(ranges_overlap(
            date(2024, 1, 10),
            date(2024, 1, 15),
            date(2024, 1, 13),
            date(2024, 1, 20),
        ));
        // La existente contiene a la pedida
        assert!(ranges_overlap(
            date(2024, 1, 1),
            date(2024, 1, 31),
            date(2024, 1, 10),
            date(2024, 1, 12),
        ));
        // Mismo día en el borde: los días son inclusivos, conflicto
        assert!(ranges_overlap(
            date(2024, 1, 10),
            date(2024, 1, 15),
            date(2024, 1, 15),
            date(2024, 1, 20),
        ));
    }

    #[test]
    fn test_disjoint_ranges() {
        assert!(!ranges_overlap(
            date(2024, 1, 10),
            date(2024, 1, 15),
            date(2024, 1, 16),
            date(2024, 1, 20),
        ));
        assert!(!ranges_overlap(
            date(2024, 1, 16),
            date(2024, 1, 20),
            date(2024, 1, 10),
            date(2024, 1, 15),
        ));
    }
}
