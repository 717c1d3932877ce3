//! Máquina de estados del ciclo de vida de la reserva
//!
//! Posee la tabla de transiciones legales y los efectos secundarios sobre
//! el estado del vehículo, expresados como comandos que solo el
//! orquestador ejecuta (dentro de la misma transacción que la escritura
//! del estado de la reserva).
//!
//! Transiciones:
//!   open        → confirmed | in_progress | canceled
//!   confirmed   → in_progress | canceled
//!   in_progress → completed | canceled
//!   completed / canceled → (terminales)

use crate::models::booking::BookingStatus;
use crate::models::vehicle::VehicleStatus;
use crate::utils::errors::AppError;

/// Efecto secundario que la transición ordena sobre el vehículo
pub fn vehicle_status_command(target: BookingStatus) -> Option<VehicleStatus> {
    match target {
        // El vehículo sale del parking
        BookingStatus::InProgress => Some(VehicleStatus::Rented),
        // Devolución o cancelación: el vehículo queda libre
        BookingStatus::Completed | BookingStatus::Canceled => Some(VehicleStatus::Available),
        // Reservas pendientes no tocan el estado del vehículo
        BookingStatus::Open | BookingStatus::Confirmed => None,
    }
}

/// Validar una transición y devolver el comando de vehículo asociado.
///
/// Las transiciones al mismo estado no existen en la tabla y se rechazan
/// con `InvalidState` (en bulk el llamador las trata como Skipped).
pub fn validate_transition(
    from: BookingStatus,
    to: BookingStatus,
) -> Result<Option<VehicleStatus>, AppError> {
    use BookingStatus::*;

    let allowed = matches!(
        (from, to),
        (Open, Confirmed)
            | (Open, InProgress)
            | (Open, Canceled)
            | (Confirmed, InProgress)
            | (Confirmed, Canceled)
            | (InProgress, Completed)
            | (InProgress, Canceled)
    );

    if !allowed {
        return Err(AppError::InvalidState(format!(
            "transition from '{}' to '{}' is not allowed",
            from, to
        )));
    }

    Ok(vehicle_status_command(to))
}

/// Las reservas terminales no admiten modificaciones de fechas, extras,
/// sucursales ni descuento
pub fn ensure_modifiable(status: BookingStatus) -> Result<(), AppError> {
    if status.is_terminal() {
        return Err(AppError::InvalidState(format!(
            "booking in terminal status '{}' cannot be modified",
            status
        )));
    }

    Ok(())
}

/// Solo open/confirmed/canceled admiten borrado físico
pub fn ensure_purgeable(status: BookingStatus) -> Result<(), AppError> {
    if matches!(status, BookingStatus::InProgress | BookingStatus::Completed) {
        return Err(AppError::InvalidState(format!(
            "booking in status '{}' cannot be deleted",
            status
        )));
    }

    Ok(())
}

/// La cancelación exige un motivo no vacío, que se persiste tal cual
pub fn require_cancellation_reason(reason: Option<&str>) -> Result<String, AppError> {
    match reason.map(str::trim) {
        Some(r) if !r.is_empty() => Ok(r.to_string()),
        _ => Err(AppError::BadRequest(
            "cancellation requires a non-empty reason".to_string(),
        )),
    }
}
