//! Round-trips transaccionales contra PostgreSQL
//!
//! Opt-in: requieren `DATABASE_URL` apuntando a una base de pruebas y se
//! ejecutan con `cargo test -- --ignored`. Cada test siembra sus propios
//! catálogos con datos únicos para poder repetirse.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use rental_booking::config::environment::{EnvironmentConfig, ExtraPricingPolicy};
use rental_booking::database::connection::run_migrations;
use rental_booking::dto::booking_dto::{
    BookingExtraRequest, CreateBookingRequest, ModifyBookingRequest, TransitionStatusRequest,
};
use rental_booking::models::booking::BookingStatus;
use rental_booking::models::vehicle::VehicleStatus;
use rental_booking::services::BookingService;
use rental_booking::utils::errors::AppError;

async fn setup_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point to a test database");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .expect("connect to test database");

    run_migrations(&pool).await.expect("apply migrations");
    pool
}

struct Seed {
    renter_id: Uuid,
    branch_id: Uuid,
    vehicle_id: Uuid,
    extra_id: Uuid,
}

/// Sembrar catálogos con identificadores únicos por ejecución
async fn seed_catalogs(pool: &PgPool, daily_rate: Decimal, extra_price: Decimal) -> Seed {
    let renter_id = Uuid::new_v4();
    let branch_id = Uuid::new_v4();
    let vehicle_id = Uuid::new_v4();
    let extra_id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO renters (id, full_name, email, phone, created_at) VALUES ($1, $2, $3, NULL, NOW())",
    )
    .bind(renter_id)
    .bind("Test Renter")
    .bind(format!("renter-{}@example.com", renter_id))
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO branches (id, name, city, address, created_at) VALUES ($1, $2, $3, $4, NOW())",
    )
    .bind(branch_id)
    .bind("Central")
    .bind("Madrid")
    .bind("Gran Vía 1")
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        r#"
        INSERT INTO vehicles (id, license_plate, brand, model, daily_rate, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, 'available', NOW(), NOW())
        "#,
    )
    .bind(vehicle_id)
    .bind(format!("TST-{}", &vehicle_id.to_string()[..8]))
    .bind("Seat")
    .bind("León")
    .bind(daily_rate)
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        r#"
        INSERT INTO extras (id, name, description, daily_price, active, created_at)
        VALUES ($1, $2, NULL, $3, TRUE, NOW())
        "#,
    )
    .bind(extra_id)
    .bind("GPS")
    .bind(extra_price)
    .execute(pool)
    .await
    .unwrap();

    Seed {
        renter_id,
        branch_id,
        vehicle_id,
        extra_id,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_request(seed: &Seed, start: NaiveDate, end: NaiveDate) -> CreateBookingRequest {
    CreateBookingRequest {
        renter_id: seed.renter_id,
        vehicle_id: seed.vehicle_id,
        pickup_branch_id: seed.branch_id,
        return_branch_id: seed.branch_id,
        start_date: start,
        end_date: end,
        extras: Vec::new(),
        discount_amount: None,
        notes: None,
    }
}

async fn vehicle_status(pool: &PgPool, id: Uuid) -> VehicleStatus {
    sqlx::query_scalar::<_, VehicleStatus>("SELECT status FROM vehicles WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Escenario completo del motor: precio con extra y descuento, transición
/// a in_progress con el vehículo pasando a rented, cancelación con motivo
/// liberando el vehículo y cierre de la máquina de estados.
#[tokio::test]
#[ignore]
async fn test_full_lifecycle_roundtrip() {
    let pool = setup_pool().await;
    let config = EnvironmentConfig::default();
    let seed = seed_catalogs(&pool, Decimal::from(100), Decimal::from(20)).await;
    let service = BookingService::new(pool.clone(), &config);

    // Tarifa 100, 3 días, extra 20×1×3, descuento 60
    let mut request = create_request(&seed, date(2024, 1, 10), date(2024, 1, 12));
    request.extras = vec![BookingExtraRequest {
        extra_id: seed.extra_id,
        quantity: 1,
    }];
    request.discount_amount = Some(Decimal::from(60));

    let (booking, extras) = service.create(request).await.unwrap();
    assert_eq!(booking.total_days, 3);
    assert_eq!(booking.rental_cost, Decimal::from(300));
    assert_eq!(booking.extras_cost, Decimal::from(60));
    assert_eq!(booking.total_cost, Decimal::from(360));
    assert_eq!(booking.final_amount, Decimal::from(300));
    assert_eq!(booking.status, BookingStatus::Open);
    assert_eq!(extras.len(), 1);
    assert_eq!(extras[0].total_price, Decimal::from(60));

    // La creación no toca el estado del vehículo
    assert_eq!(vehicle_status(&pool, seed.vehicle_id).await, VehicleStatus::Available);

    // Open -> InProgress: el vehículo pasa a rented
    service
        .transition_status(
            booking.id,
            TransitionStatusRequest {
                status: BookingStatus::InProgress,
                notes: None,
                cancellation_reason: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(vehicle_status(&pool, seed.vehicle_id).await, VehicleStatus::Rented);

    // Cancelación con motivo: terminal y el vehículo queda libre
    let canceled = service
        .transition_status(
            booking.id,
            TransitionStatusRequest {
                status: BookingStatus::Canceled,
                notes: None,
                cancellation_reason: Some("customer request".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(canceled.status, BookingStatus::Canceled);
    assert_eq!(canceled.cancellation_reason.as_deref(), Some("customer request"));
    assert_eq!(vehicle_status(&pool, seed.vehicle_id).await, VehicleStatus::Available);

    // Segunda cancelación: la máquina de estados está cerrada
    let again = service
        .transition_status(
            booking.id,
            TransitionStatusRequest {
                status: BookingStatus::Canceled,
                notes: None,
                cancellation_reason: Some("again".to_string()),
            },
        )
        .await;
    assert!(matches!(again, Err(AppError::InvalidState(_))));

    // Y modificar una terminal también falla sin alterar el registro
    let modify = service
        .modify(
            booking.id,
            ModifyBookingRequest {
                start_date: None,
                end_date: None,
                pickup_branch_id: None,
                return_branch_id: None,
                extras: None,
                discount_amount: Some(Decimal::ZERO),
                notes: None,
            },
        )
        .await;
    assert!(matches!(modify, Err(AppError::InvalidState(_))));

    let (after, _) = service.get(booking.id).await.unwrap();
    assert_eq!(after.status, BookingStatus::Canceled);
    assert_eq!(after.discount_amount, Decimal::from(60));
}

/// Propiedad de no-doble-reserva: N creates concurrentes sobre el mismo
/// vehículo y fechas solapadas; exactamente uno gana, el resto recibe
/// Conflict.
#[tokio::test]
#[ignore]
async fn test_concurrent_creates_only_one_wins() {
    let pool = setup_pool().await;
    let config = EnvironmentConfig::default();
    let seed = seed_catalogs(&pool, Decimal::from(80), Decimal::from(10)).await;
    let seed = Arc::new(seed);
    let service = Arc::new(BookingService::new(pool.clone(), &config));

    let mut handles = Vec::new();
    for offset in 0..5i64 {
        let service = Arc::clone(&service);
        let seed = Arc::clone(&seed);
        handles.push(tokio::spawn(async move {
            // Rangos distintos pero todos solapados entre sí
            let start = date(2024, 3, 10) + chrono::Duration::days(offset);
            let end = date(2024, 3, 20) + chrono::Duration::days(offset);
            service.create(create_request(&seed, start, end)).await
        }));
    }

    let mut winners = 0;
    let mut conflicts = 0;
    for result in futures::future::join_all(handles).await {
        match result.unwrap() {
            Ok(_) => winners += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(conflicts, 4);
}

/// Modify: consistencia de costes tras cambiar fechas y extras, exclusión
/// de la propia reserva en el chequeo y conflicto contra otra reserva.
#[tokio::test]
#[ignore]
async fn test_modify_recomputes_and_detects_conflicts() {
    let pool = setup_pool().await;
    let config = EnvironmentConfig::default();
    let seed = seed_catalogs(&pool, Decimal::from(50), Decimal::from(5)).await;
    let service = BookingService::new(pool.clone(), &config);

    let (booking, _) = service
        .create(create_request(&seed, date(2024, 5, 1), date(2024, 5, 3)))
        .await
        .unwrap();
    assert_eq!(booking.rental_cost, Decimal::from(150));

    // Redimensionar sobre su propio rango: se excluye a sí misma
    let (resized, extras) = service
        .modify(
            booking.id,
            ModifyBookingRequest {
                start_date: Some(date(2024, 5, 1)),
                end_date: Some(date(2024, 5, 5)),
                pickup_branch_id: None,
                return_branch_id: None,
                extras: Some(vec![BookingExtraRequest {
                    extra_id: seed.extra_id,
                    quantity: 2,
                }]),
                discount_amount: None,
                notes: None,
            },
        )
        .await
        .unwrap();

    // 5 días: alquiler 250, extra 5×2×5 = 50
    assert_eq!(resized.total_days, 5);
    assert_eq!(resized.rental_cost, Decimal::from(250));
    assert_eq!(resized.extras_cost, Decimal::from(50));
    assert_eq!(resized.final_amount, Decimal::from(300));
    assert_eq!(extras.len(), 1);

    // Modify sin cambios efectivos: campos derivados idénticos
    let (unchanged, _) = service
        .modify(
            booking.id,
            ModifyBookingRequest {
                start_date: Some(resized.start_date),
                end_date: Some(resized.end_date),
                pickup_branch_id: None,
                return_branch_id: None,
                extras: None,
                discount_amount: Some(resized.discount_amount),
                notes: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(unchanged.updated_at, resized.updated_at);
    assert_eq!(unchanged.final_amount, resized.final_amount);

    // Una segunda reserva no puede invadir el rango de la primera
    let (other, _) = service
        .create(create_request(&seed, date(2024, 5, 10), date(2024, 5, 12)))
        .await
        .unwrap();
    let clash = service
        .modify(
            other.id,
            ModifyBookingRequest {
                start_date: Some(date(2024, 5, 4)),
                end_date: Some(date(2024, 5, 12)),
                pickup_branch_id: None,
                return_branch_id: None,
                extras: None,
                discount_amount: None,
                notes: None,
            },
        )
        .await;
    assert!(matches!(clash, Err(AppError::Conflict(_))));
}

/// Política de extras no resueltos: lenient descarta la línea y la
/// reserva se crea sin ella; strict rechaza con NotFound sin escribir.
#[tokio::test]
#[ignore]
async fn test_unresolved_extra_policy_on_create() {
    let pool = setup_pool().await;
    let seed = seed_catalogs(&pool, Decimal::from(100), Decimal::from(20)).await;
    let bogus_extra = Uuid::new_v4();

    let mut lenient_config = EnvironmentConfig::default();
    lenient_config.extra_pricing_policy = ExtraPricingPolicy::Lenient;
    let lenient = BookingService::new(pool.clone(), &lenient_config);

    // Lenient: la línea desconocida se descarta, la conocida se factura
    let mut request = create_request(&seed, date(2024, 9, 1), date(2024, 9, 3));
    request.extras = vec![
        BookingExtraRequest { extra_id: seed.extra_id, quantity: 1 },
        BookingExtraRequest { extra_id: bogus_extra, quantity: 3 },
    ];
    let (booking, extras) = lenient.create(request).await.unwrap();

    assert_eq!(extras.len(), 1);
    assert_eq!(extras[0].extra_id, seed.extra_id);
    // 20×1×3 días; sin rastro de la línea descartada
    assert_eq!(booking.extras_cost, Decimal::from(60));
    assert_eq!(booking.total_cost, Decimal::from(360));

    let mut strict_config = EnvironmentConfig::default();
    strict_config.extra_pricing_policy = ExtraPricingPolicy::Strict;
    let strict = BookingService::new(pool.clone(), &strict_config);

    // Strict: misma petición (fechas libres), rechazo antes de escribir
    let mut request = create_request(&seed, date(2024, 9, 10), date(2024, 9, 12));
    request.extras = vec![
        BookingExtraRequest { extra_id: seed.extra_id, quantity: 1 },
        BookingExtraRequest { extra_id: bogus_extra, quantity: 3 },
    ];
    let rejected = strict.create(request).await;
    assert!(matches!(rejected, Err(AppError::NotFound(_))));

    let bookings_for_vehicle: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE vehicle_id = $1")
            .bind(seed.vehicle_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(bookings_for_vehicle, 1);
}

/// Purga: permitida en open, prohibida en in_progress, y la cascada
/// elimina pagos y líneas.
#[tokio::test]
#[ignore]
async fn test_purge_guards_and_cascade() {
    let pool = setup_pool().await;
    let config = EnvironmentConfig::default();
    let seed = seed_catalogs(&pool, Decimal::from(40), Decimal::from(5)).await;
    let service = BookingService::new(pool.clone(), &config);

    let mut request = create_request(&seed, date(2024, 7, 1), date(2024, 7, 3));
    request.extras = vec![BookingExtraRequest {
        extra_id: seed.extra_id,
        quantity: 1,
    }];
    let (booking, _) = service.create(request).await.unwrap();

    service
        .record_payment(
            booking.id,
            rental_booking::dto::booking_dto::RecordPaymentRequest {
                amount: Decimal::from(50),
                method: "card".to_string(),
                reference: None,
                paid_at: None,
            },
        )
        .await
        .unwrap();

    // En curso: purga prohibida
    service
        .transition_status(
            booking.id,
            TransitionStatusRequest {
                status: BookingStatus::InProgress,
                notes: None,
                cancellation_reason: None,
            },
        )
        .await
        .unwrap();
    assert!(matches!(service.purge(booking.id).await, Err(AppError::InvalidState(_))));

    // Cancelada: purga permitida, cascada completa
    service
        .transition_status(
            booking.id,
            TransitionStatusRequest {
                status: BookingStatus::Canceled,
                notes: None,
                cancellation_reason: Some("test cleanup".to_string()),
            },
        )
        .await
        .unwrap();
    service.purge(booking.id).await.unwrap();

    assert!(matches!(service.get(booking.id).await, Err(AppError::NotFound(_))));
    let orphan_extras: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM booking_extras WHERE booking_id = $1")
            .bind(booking.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let orphan_payments: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM booking_payments WHERE booking_id = $1")
            .bind(booking.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphan_extras, 0);
    assert_eq!(orphan_payments, 0);
}
