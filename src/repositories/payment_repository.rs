//! Repositorio de BookingPayments
//!
//! Apuntes de pago contra una reserva. Solo inserción y lectura: el libro
//! mayor real es externo y aquí no se concilia contra final_amount.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::payment::BookingPayment;
use crate::utils::errors::AppError;

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        booking_id: Uuid,
        amount: Decimal,
        method: String,
        reference: Option<String>,
        paid_at: DateTime<Utc>,
    ) -> Result<BookingPayment, AppError> {
        let payment = sqlx::query_as::<_, BookingPayment>(
            r#"
            INSERT INTO booking_payments (id, booking_id, amount, method, reference, paid_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(amount)
        .bind(method)
        .bind(reference)
        .bind(paid_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn list_by_booking(&self, booking_id: Uuid) -> Result<Vec<BookingPayment>, AppError> {
        let payments = sqlx::query_as::<_, BookingPayment>(
            "SELECT * FROM booking_payments WHERE booking_id = $1 ORDER BY paid_at",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Borrado en cascada al purgar una reserva (misma transacción)
    pub async fn delete_by_booking(
        conn: &mut PgConnection,
        booking_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM booking_payments WHERE booking_id = $1")
            .bind(booking_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
