//! Orquestador de reservas
//!
//! Capa de casos de uso transaccionales: create, modify, transiciones de
//! estado (individuales y en bloque), purga, pagos y consultas. Compone la
//! calculadora de precios, el comprobador de disponibilidad y la máquina
//! de estados bajo una única unidad de trabajo atómica por petición.
//!
//! La sección crítica "comprobar disponibilidad + escribir reserva" se
//! serializa por vehículo con `SELECT ... FOR UPDATE` sobre la fila del
//! vehículo: de dos peticiones concurrentes con fechas solapadas solo una
//! llega a insertar; la otra observa la fila ganadora y recibe Conflict.

use std::collections::HashMap;

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::environment::{EnvironmentConfig, ExtraPricingPolicy};
use crate::dto::booking_dto::{
    BookingExtraRequest, BookingStatsResponse, BulkTransitionItem, BulkTransitionOutcome,
    BulkTransitionRequest, BulkTransitionResponse, CreateBookingRequest, ModifyBookingRequest,
    QuoteRequest, QuoteResponse, RecordPaymentRequest, TransitionStatusRequest,
};
use crate::models::booking::{Booking, BookingExtra, BookingFilters, BookingStatus};
use crate::models::extra::Extra;
use crate::models::payment::BookingPayment;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::branch_repository::BranchRepository;
use crate::repositories::extra_repository::ExtraRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::renter_repository::RenterRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::{availability_service, lifecycle_service, pricing_service};
use crate::services::pricing_service::{PricedLine, PricingLineInput};
use crate::utils::errors::{not_found_error, AppError};

pub struct BookingService {
    pool: PgPool,
    policy: ExtraPricingPolicy,
    default_page_size: i64,
    max_page_size: i64,
    bookings: BookingRepository,
    vehicles: VehicleRepository,
    branches: BranchRepository,
    renters: RenterRepository,
    extras: ExtraRepository,
    payments: PaymentRepository,
}

impl BookingService {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            branches: BranchRepository::new(pool.clone()),
            renters: RenterRepository::new(pool.clone()),
            extras: ExtraRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            policy: config.extra_pricing_policy,
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
            pool,
        }
    }

    /// Crear una reserva: validaciones sin escritura, lock del vehículo,
    /// disponibilidad, precio y alta atómica de reserva + líneas
    pub async fn create(
        &self,
        request: CreateBookingRequest,
    ) -> Result<(Booking, Vec<BookingExtra>), AppError> {
        // Validaciones que no tocan nada: rango y catálogos de referencia
        pricing_service::rental_days(request.start_date, request.end_date)?;
        let discount = request.discount_amount.unwrap_or(Decimal::ZERO);

        if !self.renters.exists(request.renter_id).await? {
            return Err(not_found_error("Renter", &request.renter_id.to_string()));
        }
        if !self.branches.exists(request.pickup_branch_id).await? {
            return Err(not_found_error("Branch", &request.pickup_branch_id.to_string()));
        }
        if !self.branches.exists(request.return_branch_id).await? {
            return Err(not_found_error("Branch", &request.return_branch_id.to_string()));
        }

        let lines = self.resolve_extras(&request.extras).await?;

        let mut tx = self.pool.begin().await?;

        let vehicle = VehicleRepository::find_by_id_for_update(&mut tx, request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &request.vehicle_id.to_string()))?;

        if vehicle.status != VehicleStatus::Available {
            return Err(AppError::UnavailableVehicle(format!(
                "vehicle '{}' is currently {}",
                vehicle.license_plate, vehicle.status
            )));
        }

        let available = availability_service::is_available(
            &mut tx,
            request.vehicle_id,
            request.start_date,
            request.end_date,
            None,
        )
        .await?;
        if !available {
            return Err(AppError::Conflict(format!(
                "vehicle '{}' is already booked between {} and {}",
                vehicle.license_plate, request.start_date, request.end_date
            )));
        }

        let breakdown = pricing_service::compute_cost(
            request.start_date,
            request.end_date,
            vehicle.daily_rate,
            &lines,
        )?;
        pricing_service::validate_discount(discount, breakdown.total_cost)?;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            booking_number: generate_booking_number(),
            renter_id: request.renter_id,
            vehicle_id: request.vehicle_id,
            pickup_branch_id: request.pickup_branch_id,
            return_branch_id: request.return_branch_id,
            start_date: request.start_date,
            end_date: request.end_date,
            total_days: breakdown.total_days,
            daily_rate: vehicle.daily_rate,
            rental_cost: breakdown.rental_cost,
            extras_cost: breakdown.extras_cost,
            total_cost: breakdown.total_cost,
            discount_amount: discount,
            final_amount: pricing_service::final_amount(breakdown.total_cost, discount),
            status: BookingStatus::Open,
            notes: request.notes,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        };

        let created = BookingRepository::insert(&mut tx, &booking).await?;
        let rows = extra_rows(created.id, &breakdown.lines);
        BookingRepository::insert_extras(&mut tx, &rows).await?;

        tx.commit().await?;

        log::info!(
            "booking {} created: vehicle {} from {} to {}, final amount {}",
            created.booking_number,
            created.vehicle_id,
            created.start_date,
            created.end_date,
            created.final_amount
        );

        Ok((created, rows))
    }

    /// Modificar una reserva no terminal. Cualquier cambio efectivo
    /// dispara la recomputación completa de los campos derivados; una
    /// petición sin cambios efectivos no escribe nada.
    pub async fn modify(
        &self,
        id: Uuid,
        request: ModifyBookingRequest,
    ) -> Result<(Booking, Vec<BookingExtra>), AppError> {
        if let Some(branch_id) = request.pickup_branch_id {
            if !self.branches.exists(branch_id).await? {
                return Err(not_found_error("Branch", &branch_id.to_string()));
            }
        }
        if let Some(branch_id) = request.return_branch_id {
            if !self.branches.exists(branch_id).await? {
                return Err(not_found_error("Branch", &branch_id.to_string()));
            }
        }

        let mut tx = self.pool.begin().await?;

        let booking = BookingRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))?;
        lifecycle_service::ensure_modifiable(booking.status)?;

        let current_extras = BookingRepository::find_extras_in_tx(&mut tx, id).await?;

        let new_start = request.start_date.unwrap_or(booking.start_date);
        let new_end = request.end_date.unwrap_or(booking.end_date);
        let dates_changed =
            new_start != booking.start_date || new_end != booking.end_date;

        let new_pickup = request.pickup_branch_id.unwrap_or(booking.pickup_branch_id);
        let new_return = request.return_branch_id.unwrap_or(booking.return_branch_id);
        let branches_changed =
            new_pickup != booking.pickup_branch_id || new_return != booking.return_branch_id;

        let new_discount = request.discount_amount.unwrap_or(booking.discount_amount);
        let discount_changed = new_discount != booking.discount_amount;

        let extras_changed = request
            .extras
            .as_deref()
            .map(|requested| !same_line_set(requested, &current_extras))
            .unwrap_or(false);

        let notes_changed = request.notes.is_some() && request.notes != booking.notes;

        if !dates_changed && !branches_changed && !discount_changed && !extras_changed && !notes_changed
        {
            // Recomputación idempotente: sin cambios efectivos, sin escritura
            tx.commit().await?;
            return Ok((booking, current_extras));
        }

        // Cambio de fechas: re-chequear disponibilidad excluyéndose a sí
        // misma bajo el lock del vehículo y re-congelar la tarifa vigente
        let daily_rate = if dates_changed {
            pricing_service::rental_days(new_start, new_end)?;

            let vehicle = VehicleRepository::find_by_id_for_update(&mut tx, booking.vehicle_id)
                .await?
                .ok_or_else(|| not_found_error("Vehicle", &booking.vehicle_id.to_string()))?;

            let available = availability_service::is_available(
                &mut tx,
                booking.vehicle_id,
                new_start,
                new_end,
                Some(id),
            )
            .await?;
            if !available {
                return Err(AppError::Conflict(format!(
                    "vehicle '{}' is already booked between {} and {}",
                    vehicle.license_plate, new_start, new_end
                )));
            }

            vehicle.daily_rate
        } else {
            booking.daily_rate
        };

        // Cambio de extras: re-congelar precios del catálogo; si no, las
        // líneas se revalorizan desde sus propios snapshots
        let lines: Vec<PricingLineInput> = match &request.extras {
            Some(requested) if extras_changed => self.resolve_extras(requested).await?,
            _ => snapshot_lines(&current_extras),
        };

        let breakdown = pricing_service::compute_cost(new_start, new_end, daily_rate, &lines)?;
        pricing_service::validate_discount(new_discount, breakdown.total_cost)?;

        let notes = request.notes.clone().or_else(|| booking.notes.clone());
        let updated = Booking {
            start_date: new_start,
            end_date: new_end,
            pickup_branch_id: new_pickup,
            return_branch_id: new_return,
            total_days: breakdown.total_days,
            daily_rate,
            rental_cost: breakdown.rental_cost,
            extras_cost: breakdown.extras_cost,
            total_cost: breakdown.total_cost,
            discount_amount: new_discount,
            final_amount: pricing_service::final_amount(breakdown.total_cost, new_discount),
            notes,
            ..booking
        };

        let saved = BookingRepository::update(&mut tx, &updated).await?;

        let final_extras = if extras_changed || dates_changed {
            let rows = extra_rows(id, &breakdown.lines);
            BookingRepository::replace_extras(&mut tx, id, &rows).await?;
            rows
        } else {
            current_extras
        };

        tx.commit().await?;

        log::info!(
            "booking {} modified: {} days, final amount {}",
            saved.booking_number,
            saved.total_days,
            saved.final_amount
        );

        Ok((saved, final_extras))
    }

    /// Transición de estado individual. Para Canceled el motivo es
    /// obligatorio y se comprueba antes de abrir la transacción.
    pub async fn transition_status(
        &self,
        id: Uuid,
        request: TransitionStatusRequest,
    ) -> Result<Booking, AppError> {
        let cancellation_reason = if request.status == BookingStatus::Canceled {
            Some(lifecycle_service::require_cancellation_reason(
                request.cancellation_reason.as_deref(),
            )?)
        } else {
            None
        };

        self.transition_inner(id, request.status, request.notes, cancellation_reason)
            .await
    }

    /// Escritura atómica del estado de la reserva y del comando de
    /// vehículo que la máquina de estados ordene
    async fn transition_inner(
        &self,
        id: Uuid,
        target: BookingStatus,
        notes: Option<String>,
        cancellation_reason: Option<String>,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = BookingRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))?;

        let command = lifecycle_service::validate_transition(booking.status, target)?;

        let updated = BookingRepository::update_status(
            &mut tx,
            id,
            target,
            cancellation_reason.as_deref(),
            notes.as_deref(),
        )
        .await?;

        if let Some(vehicle_status) = command {
            VehicleRepository::set_status(&mut tx, booking.vehicle_id, vehicle_status).await?;
        }

        tx.commit().await?;

        log::info!(
            "booking {} transitioned {} -> {}",
            updated.booking_number,
            booking.status,
            target
        );

        Ok(updated)
    }

    /// Transición en bloque con éxito parcial por diseño: cada reserva se
    /// procesa en su propia transacción y reporta su desenlace. La
    /// cancelación en bloque se rechaza de entrada porque cada cancelación
    /// exige su propio motivo.
    pub async fn bulk_transition(
        &self,
        request: BulkTransitionRequest,
    ) -> Result<BulkTransitionResponse, AppError> {
        if request.status == BookingStatus::Canceled {
            return Err(AppError::BadRequest(
                "bulk cancellation is not supported: each cancellation requires its own reason"
                    .to_string(),
            ));
        }

        let mut results = Vec::with_capacity(request.booking_ids.len());
        let (mut succeeded, mut skipped, mut failed) = (0usize, 0usize, 0usize);

        for booking_id in &request.booking_ids {
            let outcome = self
                .bulk_item(*booking_id, request.status, request.notes.clone())
                .await;

            match &outcome {
                BulkTransitionOutcome::Success => succeeded += 1,
                BulkTransitionOutcome::Skipped => skipped += 1,
                BulkTransitionOutcome::Failed { .. } => failed += 1,
            }
            results.push(BulkTransitionItem {
                booking_id: *booking_id,
                outcome,
            });
        }

        log::info!(
            "bulk transition to {}: {} ok, {} skipped, {} failed",
            request.status,
            succeeded,
            skipped,
            failed
        );

        Ok(BulkTransitionResponse {
            total: results.len(),
            succeeded,
            skipped,
            failed,
            results,
        })
    }

    async fn bulk_item(
        &self,
        booking_id: Uuid,
        target: BookingStatus,
        notes: Option<String>,
    ) -> BulkTransitionOutcome {
        match self.bookings.find_by_id(booking_id).await {
            Ok(Some(booking)) if booking.status == target => BulkTransitionOutcome::Skipped,
            Ok(Some(_)) => match self.transition_inner(booking_id, target, notes, None).await {
                Ok(_) => BulkTransitionOutcome::Success,
                Err(error) => BulkTransitionOutcome::Failed {
                    reason: error.to_string(),
                },
            },
            Ok(None) => BulkTransitionOutcome::Failed {
                reason: "booking not found".to_string(),
            },
            Err(error) => BulkTransitionOutcome::Failed {
                reason: error.to_string(),
            },
        }
    }

    /// Borrado físico: solo open/confirmed/canceled; la cascada
    /// (pagos → líneas → reserva) corre en una sola transacción
    pub async fn purge(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = BookingRepository::find_by_id_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))?;
        lifecycle_service::ensure_purgeable(booking.status)?;

        PaymentRepository::delete_by_booking(&mut tx, id).await?;
        BookingRepository::delete(&mut tx, id).await?;

        tx.commit().await?;

        log::info!("booking {} purged", booking.booking_number);

        Ok(())
    }

    /// Registrar un apunte de pago (libro mayor externo, sin conciliación)
    pub async fn record_payment(
        &self,
        booking_id: Uuid,
        request: RecordPaymentRequest,
    ) -> Result<BookingPayment, AppError> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))?;

        let payment = self
            .payments
            .insert(
                booking_id,
                request.amount,
                request.method,
                request.reference,
                request.paid_at.unwrap_or_else(Utc::now),
            )
            .await?;

        Ok(payment)
    }

    pub async fn list_payments(&self, booking_id: Uuid) -> Result<Vec<BookingPayment>, AppError> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &booking_id.to_string()))?;

        self.payments.list_by_booking(booking_id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<(Booking, Vec<BookingExtra>), AppError> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))?;
        let extras = self.bookings.find_extras(id).await?;

        Ok((booking, extras))
    }

    pub async fn list(&self, filters: &BookingFilters) -> Result<Vec<Booking>, AppError> {
        self.bookings
            .list(filters, self.default_page_size, self.max_page_size)
            .await
    }

    /// Las notas de auditoría se pueden editar en cualquier estado,
    /// incluidos los terminales
    pub async fn update_notes(
        &self,
        id: Uuid,
        notes: Option<String>,
    ) -> Result<Booking, AppError> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))?;

        self.bookings.update_notes(id, notes.as_deref()).await
    }

    /// Resumen agregado por estado para el dashboard (solo lectura)
    pub async fn stats(&self) -> Result<BookingStatsResponse, AppError> {
        let by_status = self.bookings.status_counts().await?;
        let total_bookings = by_status.iter().map(|row| row.bookings).sum();
        let total_revenue = by_status.iter().map(|row| row.revenue).sum();

        Ok(BookingStatsResponse {
            total_bookings,
            total_revenue,
            by_status,
        })
    }

    /// Cotización pura, sin persistencia: precio + disponibilidad de
    /// solo lectura contra el pool
    pub async fn quote(&self, request: QuoteRequest) -> Result<QuoteResponse, AppError> {
        pricing_service::rental_days(request.start_date, request.end_date)?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &request.vehicle_id.to_string()))?;

        let lines = self.resolve_extras(&request.extras).await?;
        let breakdown = pricing_service::compute_cost(
            request.start_date,
            request.end_date,
            vehicle.daily_rate,
            &lines,
        )?;

        let discount = request.discount_amount.unwrap_or(Decimal::ZERO);
        pricing_service::validate_discount(discount, breakdown.total_cost)?;

        let vehicle_available = vehicle.status == VehicleStatus::Available
            && availability_service::is_available_on_pool(
                &self.pool,
                request.vehicle_id,
                request.start_date,
                request.end_date,
            )
            .await?;

        Ok(QuoteResponse {
            vehicle_id: vehicle.id,
            vehicle_available,
            total_days: breakdown.total_days,
            daily_rate: vehicle.daily_rate,
            rental_cost: breakdown.rental_cost,
            extras_cost: breakdown.extras_cost,
            total_cost: breakdown.total_cost,
            discount_amount: discount,
            final_amount: pricing_service::final_amount(breakdown.total_cost, discount),
            lines: breakdown.lines,
        })
    }

    /// Resolver las líneas pedidas contra la lista de precios vigente
    async fn resolve_extras(
        &self,
        requested: &[BookingExtraRequest],
    ) -> Result<Vec<PricingLineInput>, AppError> {
        if requested.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = requested.iter().map(|line| line.extra_id).collect();
        let catalog = self.extras.resolve_prices(&ids).await?;

        price_requested_lines(requested, &catalog, self.policy)
    }
}

/// Valorar las líneas pedidas con el catálogo resuelto. Los ids no
/// resueltos siguen la política configurada: lenient descarta la línea
/// (con aviso), strict falla con NotFound antes de escribir nada.
fn price_requested_lines(
    requested: &[BookingExtraRequest],
    catalog: &[Extra],
    policy: ExtraPricingPolicy,
) -> Result<Vec<PricingLineInput>, AppError> {
    let by_id: HashMap<Uuid, _> = catalog.iter().map(|extra| (extra.id, extra)).collect();

    let mut lines = Vec::with_capacity(requested.len());
    for line in requested {
        match by_id.get(&line.extra_id) {
            Some(extra) => lines.push(PricingLineInput {
                extra_id: extra.id,
                extra_name: extra.name.clone(),
                unit_price: extra.daily_price,
                quantity: line.quantity,
            }),
            None => match policy {
                ExtraPricingPolicy::Lenient => {
                    log::warn!(
                        "extra {} not found in price list, line skipped (lenient policy)",
                        line.extra_id
                    );
                }
                ExtraPricingPolicy::Strict => {
                    return Err(not_found_error("Extra", &line.extra_id.to_string()));
                }
            },
        }
    }

    Ok(lines)
}

/// Número de reserva legible: timestamp UTC + sufijo aleatorio
pub fn generate_booking_number() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(1000..10000);
    format!("BK-{}-{}", Utc::now().format("%Y%m%d%H%M%S"), suffix)
}

/// ¿El juego de líneas pedido coincide con el persistido?
/// Comparación por multiconjunto de (extra_id, quantity).
fn same_line_set(requested: &[BookingExtraRequest], current: &[BookingExtra]) -> bool {
    if requested.len() != current.len() {
        return false;
    }

    let mut wanted: Vec<(Uuid, i32)> = requested
        .iter()
        .map(|line| (line.extra_id, line.quantity))
        .collect();
    let mut stored: Vec<(Uuid, i32)> = current
        .iter()
        .map(|line| (line.extra_id, line.quantity))
        .collect();
    wanted.sort();
    stored.sort();

    wanted == stored
}

/// Revalorizar líneas persistidas desde sus snapshots (sin releer catálogo)
fn snapshot_lines(extras: &[BookingExtra]) -> Vec<PricingLineInput> {
    extras
        .iter()
        .map(|line| PricingLineInput {
            extra_id: line.extra_id,
            extra_name: line.extra_name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
        })
        .collect()
}

/// Materializar líneas valoradas como filas de booking_extras
fn extra_rows(booking_id: Uuid, lines: &[PricedLine]) -> Vec<BookingExtra> {
    lines
        .iter()
        .map(|line| BookingExtra {
            id: Uuid::new_v4(),
            booking_id,
            extra_id: line.extra_id,
            extra_name: line.extra_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            total_price: line.total_price,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_number_format() {
        let number = generate_booking_number();
        // BK- + 14 dígitos de timestamp + - + 4 de sufijo
        assert!(number.starts_with("BK-"));
        assert_eq!(number.len(), 3 + 14 + 1 + 4);

        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_same_line_set_ignores_order() {
        let id_a = Uuid::new_v4();
        let id_b = Uuid::new_v4();

        let requested = vec![
            BookingExtraRequest { extra_id: id_b, quantity: 1 },
            BookingExtraRequest { extra_id: id_a, quantity: 2 },
        ];
        let current = vec![
            stored_line(id_a, 2),
            stored_line(id_b, 1),
        ];

        assert!(same_line_set(&requested, &current));
    }

    #[test]
    fn test_same_line_set_detects_changes() {
        let id_a = Uuid::new_v4();
        let id_b = Uuid::new_v4();

        let current = vec![stored_line(id_a, 2)];

        // Cantidad distinta
        let changed_qty = vec![BookingExtraRequest { extra_id: id_a, quantity: 3 }];
        assert!(!same_line_set(&changed_qty, &current));

        // Extra distinto
        let changed_id = vec![BookingExtraRequest { extra_id: id_b, quantity: 2 }];
        assert!(!same_line_set(&changed_id, &current));

        // Línea añadida
        let added = vec![
            BookingExtraRequest { extra_id: id_a, quantity: 2 },
            BookingExtraRequest { extra_id: id_b, quantity: 1 },
        ];
        assert!(!same_line_set(&added, &current));

        // Juego vacío
        assert!(!same_line_set(&[], &current));
    }

    #[test]
    fn test_extra_rows_carry_line_totals() {
        let booking_id = Uuid::new_v4();
        let lines = vec![PricedLine {
            extra_id: Uuid::new_v4(),
            extra_name: "GPS".to_string(),
            quantity: 2,
            unit_price: Decimal::from(20),
            total_price: Decimal::from(120),
        }];

        let rows = extra_rows(booking_id, &lines);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].booking_id, booking_id);
        assert_eq!(rows[0].total_price, Decimal::from(120));

        // Ida y vuelta por snapshot conserva precio y cantidad
        let snapshots = snapshot_lines(&rows);
        assert_eq!(snapshots[0].unit_price, Decimal::from(20));
        assert_eq!(snapshots[0].quantity, 2);
    }

    #[test]
    fn test_lenient_policy_skips_unknown_extras() {
        let known = catalog_extra("GPS", Decimal::from(20));
        let bogus_id = Uuid::new_v4();

        let requested = vec![
            BookingExtraRequest { extra_id: known.id, quantity: 1 },
            BookingExtraRequest { extra_id: bogus_id, quantity: 3 },
        ];

        let lines = price_requested_lines(
            &requested,
            std::slice::from_ref(&known),
            ExtraPricingPolicy::Lenient,
        )
        .unwrap();

        // La línea desconocida se descarta; la conocida conserva su snapshot
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].extra_id, known.id);
        assert_eq!(lines[0].unit_price, Decimal::from(20));
    }

    #[test]
    fn test_strict_policy_rejects_unknown_extras() {
        let known = catalog_extra("GPS", Decimal::from(20));
        let bogus_id = Uuid::new_v4();

        let requested = vec![
            BookingExtraRequest { extra_id: known.id, quantity: 1 },
            BookingExtraRequest { extra_id: bogus_id, quantity: 3 },
        ];

        let result = price_requested_lines(
            &requested,
            std::slice::from_ref(&known),
            ExtraPricingPolicy::Strict,
        );

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_fully_resolved_lines_ignore_policy() {
        let gps = catalog_extra("GPS", Decimal::from(20));
        let silla = catalog_extra("Silla infantil", Decimal::from(8));

        let requested = vec![
            BookingExtraRequest { extra_id: silla.id, quantity: 2 },
            BookingExtraRequest { extra_id: gps.id, quantity: 1 },
        ];
        let catalog = vec![gps, silla];

        for policy in [ExtraPricingPolicy::Lenient, ExtraPricingPolicy::Strict] {
            let lines = price_requested_lines(&requested, &catalog, policy).unwrap();
            assert_eq!(lines.len(), 2);
            // El orden de las líneas pedidas se respeta
            assert_eq!(lines[0].extra_name, "Silla infantil");
            assert_eq!(lines[0].quantity, 2);
            assert_eq!(lines[1].extra_name, "GPS");
        }
    }

    fn catalog_extra(name: &str, daily_price: Decimal) -> Extra {
        Extra {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            daily_price,
            active: true,
            created_at: Utc::now(),
        }
    }

    fn stored_line(extra_id: Uuid, quantity: i32) -> BookingExtra {
        BookingExtra {
            id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
            extra_id,
            extra_name: "extra".to_string(),
            quantity,
            unit_price: Decimal::from(10),
            total_price: Decimal::from(10) * Decimal::from(quantity),
        }
    }
}
