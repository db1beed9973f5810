use crate::models::delivery::DeliveryStatus;

/// Single-step transitions a driver may perform. Dispatch-side and terminal
/// statuses have no driver-initiated exits; anything not listed is denied.
pub fn can_driver_update_status(current: DeliveryStatus, proposed: DeliveryStatus) -> bool {
    use DeliveryStatus::*;

    matches!(
        (current, proposed),
        (Assigned, EnRoutePickup)
            | (EnRoutePickup, ArrivedPickup)
            | (ArrivedPickup, PickedUp)
            | (PickedUp, EnRouteDelivery)
            | (EnRouteDelivery, ArrivedDelivery)
            | (ArrivedDelivery, Delivered)
            | (ArrivedDelivery, Failed)
    )
}
