//! Repositorio de Bookings
//!
//! Acceso a las tablas bookings y booking_extras. Los métodos que forman
//! parte de una sección crítica (lock, insert, update, conflicto de fechas)
//! reciben la conexión de la transacción del llamador; los de solo lectura
//! trabajan contra el pool.

use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::models::booking::{
    Booking, BookingExtra, BookingFilters, BookingSortKey, BookingStatusCount, SortDirection,
};
use crate::utils::errors::AppError;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    /// Bloquear la fila de la reserva dentro de la transacción del llamador
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Booking>, AppError> {
        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(booking)
    }

    pub async fn find_extras(&self, booking_id: Uuid) -> Result<Vec<BookingExtra>, AppError> {
        let extras = sqlx::query_as::<_, BookingExtra>(
            "SELECT * FROM booking_extras WHERE booking_id = $1 ORDER BY extra_name",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(extras)
    }

    pub async fn find_extras_in_tx(
        conn: &mut PgConnection,
        booking_id: Uuid,
    ) -> Result<Vec<BookingExtra>, AppError> {
        let extras = sqlx::query_as::<_, BookingExtra>(
            "SELECT * FROM booking_extras WHERE booking_id = $1 ORDER BY extra_name",
        )
        .bind(booking_id)
        .fetch_all(conn)
        .await?;

        Ok(extras)
    }

    /// ¿Existe una reserva en conflicto de fechas para el vehículo?
    ///
    /// Bloquean las reservas en estado open/confirmed/in_progress; las
    /// canceladas y completadas son históricas. El solapamiento usa
    /// semántica de días inclusivos, la misma que el predicado
    /// `availability_service::ranges_overlap`. Genérico sobre el executor para poder
    /// ejecutarse dentro de la transacción de escritura (create/modify) o
    /// contra el pool (cotizaciones de solo lectura).
    pub async fn has_conflict<'e, E>(
        executor: E,
        vehicle_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_booking_id: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE vehicle_id = $1
                  AND status IN ('open', 'confirmed', 'in_progress')
                  AND start_date <= $3
                  AND end_date >= $2
                  AND ($4::uuid IS NULL OR id <> $4::uuid)
            )
            "#,
        )
        .bind(vehicle_id)
        .bind(start_date)
        .bind(end_date)
        .bind(exclude_booking_id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    /// Insertar la reserva dentro de la transacción del llamador
    pub async fn insert(conn: &mut PgConnection, booking: &Booking) -> Result<Booking, AppError> {
        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                id, booking_number, renter_id, vehicle_id, pickup_branch_id, return_branch_id,
                start_date, end_date, total_days, daily_rate, rental_cost, extras_cost,
                total_cost, discount_amount, final_amount, status, notes, cancellation_reason,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING *
            "#,
        )
        .bind(booking.id)
        .bind(&booking.booking_number)
        .bind(booking.renter_id)
        .bind(booking.vehicle_id)
        .bind(booking.pickup_branch_id)
        .bind(booking.return_branch_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.total_days)
        .bind(booking.daily_rate)
        .bind(booking.rental_cost)
        .bind(booking.extras_cost)
        .bind(booking.total_cost)
        .bind(booking.discount_amount)
        .bind(booking.final_amount)
        .bind(booking.status)
        .bind(&booking.notes)
        .bind(&booking.cancellation_reason)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(conn)
        .await?;

        Ok(created)
    }

    pub async fn insert_extras(
        conn: &mut PgConnection,
        extras: &[BookingExtra],
    ) -> Result<(), AppError> {
        for extra in extras {
            sqlx::query(
                r#"
                INSERT INTO booking_extras (id, booking_id, extra_id, extra_name, quantity, unit_price, total_price)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(extra.id)
            .bind(extra.booking_id)
            .bind(extra.extra_id)
            .bind(&extra.extra_name)
            .bind(extra.quantity)
            .bind(extra.unit_price)
            .bind(extra.total_price)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Reemplazar el juego completo de líneas (delete + insert)
    pub async fn replace_extras(
        conn: &mut PgConnection,
        booking_id: Uuid,
        extras: &[BookingExtra],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM booking_extras WHERE booking_id = $1")
            .bind(booking_id)
            .execute(&mut *conn)
            .await?;

        Self::insert_extras(conn, extras).await
    }

    /// Actualizar fechas, sucursales y todos los campos derivados de coste
    /// en una sola escritura (los derivados siempre viajan juntos)
    pub async fn update(conn: &mut PgConnection, booking: &Booking) -> Result<Booking, AppError> {
        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET start_date = $2,
                end_date = $3,
                pickup_branch_id = $4,
                return_branch_id = $5,
                total_days = $6,
                daily_rate = $7,
                rental_cost = $8,
                extras_cost = $9,
                total_cost = $10,
                discount_amount = $11,
                final_amount = $12,
                notes = $13,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(booking.id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.pickup_branch_id)
        .bind(booking.return_branch_id)
        .bind(booking.total_days)
        .bind(booking.daily_rate)
        .bind(booking.rental_cost)
        .bind(booking.extras_cost)
        .bind(booking.total_cost)
        .bind(booking.discount_amount)
        .bind(booking.final_amount)
        .bind(&booking.notes)
        .fetch_one(conn)
        .await?;

        Ok(updated)
    }

    pub async fn update_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: crate::models::booking::BookingStatus,
        cancellation_reason: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Booking, AppError> {
        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2,
                cancellation_reason = COALESCE($3, cancellation_reason),
                notes = COALESCE($4, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(cancellation_reason)
        .bind(notes)
        .fetch_one(conn)
        .await?;

        Ok(updated)
    }

    /// Las notas de auditoría se pueden editar en cualquier estado
    pub async fn update_notes(
        &self,
        id: Uuid,
        notes: Option<&str>,
    ) -> Result<Booking, AppError> {
        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET notes = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Borrado físico de la reserva (el guard de estado es del llamador)
    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM booking_extras WHERE booking_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }

    /// Listado con filtros dinámicos, ordenación por lista blanca y paginación
    pub async fn list(
        &self,
        filters: &BookingFilters,
        default_page_size: i64,
        max_page_size: i64,
    ) -> Result<Vec<Booking>, AppError> {
        let mut query = QueryBuilder::new("SELECT * FROM bookings WHERE 1=1");

        if let Some(status) = filters.status {
            query.push(" AND status = ");
            query.push_bind(status);
        }
        if let Some(vehicle_id) = filters.vehicle_id {
            query.push(" AND vehicle_id = ");
            query.push_bind(vehicle_id);
        }
        if let Some(renter_id) = filters.renter_id {
            query.push(" AND renter_id = ");
            query.push_bind(renter_id);
        }
        if let Some(branch_id) = filters.branch_id {
            query.push(" AND (pickup_branch_id = ");
            query.push_bind(branch_id);
            query.push(" OR return_branch_id = ");
            query.push_bind(branch_id);
            query.push(")");
        }
        if let Some(from) = filters.start_date_from {
            query.push(" AND start_date >= ");
            query.push_bind(from);
        }
        if let Some(to) = filters.start_date_to {
            query.push(" AND start_date <= ");
            query.push_bind(to);
        }
        if let Some(from) = filters.end_date_from {
            query.push(" AND end_date >= ");
            query.push_bind(from);
        }
        if let Some(to) = filters.end_date_to {
            query.push(" AND end_date <= ");
            query.push_bind(to);
        }
        if let Some(min) = filters.min_final_amount {
            query.push(" AND final_amount >= ");
            query.push_bind(min);
        }
        if let Some(max) = filters.max_final_amount {
            query.push(" AND final_amount <= ");
            query.push_bind(max);
        }

        let sort_key = filters.sort_by.unwrap_or(BookingSortKey::CreatedAt);
        let sort_dir = filters.sort_dir.unwrap_or(SortDirection::Desc);
        query.push(format!(" ORDER BY {} {}", sort_key.column(), sort_dir.keyword()));

        let (limit, offset) = filters.limit_offset(default_page_size, max_page_size);
        query.push(" LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let bookings = query
            .build_query_as::<Booking>()
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    /// Resumen agregado por estado (reservas y facturación)
    pub async fn status_counts(&self) -> Result<Vec<BookingStatusCount>, AppError> {
        let counts = sqlx::query_as::<_, BookingStatusCount>(
            r#"
            SELECT status, COUNT(*) AS bookings, COALESCE(SUM(final_amount), 0) AS revenue
            FROM bookings
            GROUP BY status
            ORDER BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}
