//! Side effects of authorization, decoupled from the fiscal core.
//!
//! The reconciler fires [`AuthorizationHook::on_authorized`] exactly once
//! per document, on the transition edge into `Authorized` — never on
//! steady-state polls. Double-dispatch protection therefore lives in the
//! engine, not in the hook.

use crate::core::{Error, FiscalDocument};

/// Consumer of the "document authorized" edge.
pub trait AuthorizationHook {
    fn on_authorized(&mut self, document: &FiscalDocument);
}

/// No side effects. Useful for company-sync-only deployments and tests.
#[derive(Debug, Default)]
pub struct NoopHook;

impl AuthorizationHook for NoopHook {
    fn on_authorized(&mut self, _document: &FiscalDocument) {}
}

/// Order subsystem boundary: status writes driven by authorization.
pub trait OrderService {
    fn mark_shipped(&mut self, order_id: u64, tracking_code: &str) -> Result<(), Error>;
    fn mark_dispatched(&mut self, order_id: u64) -> Result<(), Error>;
}

/// Shipment subsystem boundary.
pub trait ShipmentService {
    /// Create a shipment for the order; returns the tracking code.
    fn create_shipment(&mut self, order_id: u64) -> Result<String, Error>;
}

/// The shipped hook implementation: on authorization of an order-linked
/// document, attempt shipment creation. Success advances the order to
/// "shipped"; failure degrades to the "dispatched" placeholder instead of
/// failing the reconciliation.
pub struct ShipmentDispatcher<S, O> {
    shipments: S,
    orders: O,
}

impl<S: ShipmentService, O: OrderService> ShipmentDispatcher<S, O> {
    pub fn new(shipments: S, orders: O) -> Self {
        Self { shipments, orders }
    }
}

impl<S: ShipmentService, O: OrderService> AuthorizationHook for ShipmentDispatcher<S, O> {
    fn on_authorized(&mut self, document: &FiscalDocument) {
        let Some(order_id) = document.order_id else {
            return;
        };

        let result = match self.shipments.create_shipment(order_id) {
            Ok(tracking) => self.orders.mark_shipped(order_id, &tracking),
            Err(err) => {
                tracing::warn!(order_id, %err, "shipment creation failed, degrading to dispatched");
                self.orders.mark_dispatched(order_id)
            }
        };
        if let Err(err) = result {
            // Order-state write failure must not undo the fiscal outcome;
            // the authority has already authorized the document.
            tracing::warn!(order_id, %err, "order status update failed after authorization");
        }
    }
}
