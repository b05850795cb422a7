use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use colmado_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Event};

/// Supplier identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(pub AggregateId);

impl SupplierId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for SupplierId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Supplier status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierStatus {
    Active,
    Inactive,
}

/// Contact information for a supplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Aggregate root: Supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    id: SupplierId,
    name: String,
    /// Tax registration number (RNC), when the supplier is a registered business.
    rnc: Option<String>,
    contact: ContactInfo,
    status: SupplierStatus,
    version: u64,
    registered: bool,
}

impl Supplier {
    /// Create an empty, not-yet-registered aggregate instance for rehydration.
    pub fn empty(id: SupplierId) -> Self {
        Self {
            id,
            name: String::new(),
            rnc: None,
            contact: ContactInfo::default(),
            status: SupplierStatus::Active,
            version: 0,
            registered: false,
        }
    }

    pub fn id_typed(&self) -> SupplierId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rnc(&self) -> Option<&str> {
        self.rnc.as_deref()
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn status(&self) -> SupplierStatus {
        self.status
    }

    /// Invariant helper: whether this supplier is allowed to transact.
    ///
    /// Inactive suppliers cannot receive purchase orders.
    pub fn can_transact(&self) -> bool {
        self.status == SupplierStatus::Active
    }
}

impl AggregateRoot for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterSupplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSupplier {
    pub supplier_id: SupplierId,
    pub name: String,
    pub rnc: Option<String>,
    pub contact: Option<ContactInfo>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateDetails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDetails {
    pub supplier_id: SupplierId,
    /// Optional new name (if None, keep existing).
    pub name: Option<String>,
    /// Optional new RNC (if None, keep existing).
    pub rnc: Option<String>,
    /// Optional new contact info (if None, keep existing).
    pub contact: Option<ContactInfo>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeactivateSupplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivateSupplier {
    pub supplier_id: SupplierId,
    /// Optional human-readable reason for deactivation.
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReactivateSupplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactivateSupplier {
    pub supplier_id: SupplierId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplierCommand {
    RegisterSupplier(RegisterSupplier),
    UpdateDetails(UpdateDetails),
    DeactivateSupplier(DeactivateSupplier),
    ReactivateSupplier(ReactivateSupplier),
}

/// Event: SupplierRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRegistered {
    pub supplier_id: SupplierId,
    pub name: String,
    pub rnc: Option<String>,
    pub contact: ContactInfo,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SupplierUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierUpdated {
    pub supplier_id: SupplierId,
    pub name: Option<String>,
    pub rnc: Option<String>,
    pub contact: Option<ContactInfo>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SupplierDeactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierDeactivated {
    pub supplier_id: SupplierId,
    pub reason: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SupplierReactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierReactivated {
    pub supplier_id: SupplierId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplierEvent {
    SupplierRegistered(SupplierRegistered),
    SupplierUpdated(SupplierUpdated),
    SupplierDeactivated(SupplierDeactivated),
    SupplierReactivated(SupplierReactivated),
}

impl Event for SupplierEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SupplierEvent::SupplierRegistered(_) => "suppliers.supplier.registered",
            SupplierEvent::SupplierUpdated(_) => "suppliers.supplier.updated",
            SupplierEvent::SupplierDeactivated(_) => "suppliers.supplier.deactivated",
            SupplierEvent::SupplierReactivated(_) => "suppliers.supplier.reactivated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SupplierEvent::SupplierRegistered(e) => e.occurred_at,
            SupplierEvent::SupplierUpdated(e) => e.occurred_at,
            SupplierEvent::SupplierDeactivated(e) => e.occurred_at,
            SupplierEvent::SupplierReactivated(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Supplier {
    type Command = SupplierCommand;
    type Event = SupplierEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SupplierEvent::SupplierRegistered(e) => {
                self.id = e.supplier_id;
                self.name = e.name.clone();
                self.rnc = e.rnc.clone();
                self.contact = e.contact.clone();
                self.status = SupplierStatus::Active;
                self.registered = true;
            }
            SupplierEvent::SupplierUpdated(e) => {
                if let Some(name) = &e.name {
                    self.name = name.clone();
                }
                if let Some(rnc) = &e.rnc {
                    self.rnc = Some(rnc.clone());
                }
                if let Some(contact) = &e.contact {
                    self.contact = contact.clone();
                }
            }
            SupplierEvent::SupplierDeactivated(_) => {
                self.status = SupplierStatus::Inactive;
            }
            SupplierEvent::SupplierReactivated(_) => {
                self.status = SupplierStatus::Active;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SupplierCommand::RegisterSupplier(cmd) => self.handle_register(cmd),
            SupplierCommand::UpdateDetails(cmd) => self.handle_update(cmd),
            SupplierCommand::DeactivateSupplier(cmd) => self.handle_deactivate(cmd),
            SupplierCommand::ReactivateSupplier(cmd) => self.handle_reactivate(cmd),
        }
    }
}

impl Supplier {
    fn ensure_supplier_id(&self, supplier_id: SupplierId) -> Result<(), DomainError> {
        if self.id != supplier_id {
            return Err(DomainError::invariant("supplier_id mismatch"));
        }
        Ok(())
    }

    fn handle_register(&self, cmd: &RegisterSupplier) -> Result<Vec<SupplierEvent>, DomainError> {
        if self.registered {
            return Err(DomainError::conflict("supplier already exists"));
        }

        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("supplier name must not be empty"));
        }

        Ok(vec![SupplierEvent::SupplierRegistered(SupplierRegistered {
            supplier_id: cmd.supplier_id,
            name: cmd.name.clone(),
            rnc: cmd.rnc.clone(),
            contact: cmd.contact.clone().unwrap_or_default(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateDetails) -> Result<Vec<SupplierEvent>, DomainError> {
        if !self.registered {
            return Err(DomainError::not_found());
        }
        self.ensure_supplier_id(cmd.supplier_id)?;

        if let Some(name) = &cmd.name
            && name.trim().is_empty()
        {
            return Err(DomainError::validation("supplier name must not be empty"));
        }

        Ok(vec![SupplierEvent::SupplierUpdated(SupplierUpdated {
            supplier_id: cmd.supplier_id,
            name: cmd.name.clone(),
            rnc: cmd.rnc.clone(),
            contact: cmd.contact.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deactivate(
        &self,
        cmd: &DeactivateSupplier,
    ) -> Result<Vec<SupplierEvent>, DomainError> {
        if !self.registered {
            return Err(DomainError::not_found());
        }
        self.ensure_supplier_id(cmd.supplier_id)?;

        if self.status == SupplierStatus::Inactive {
            return Err(DomainError::invariant("supplier is already inactive"));
        }

        Ok(vec![SupplierEvent::SupplierDeactivated(
            SupplierDeactivated {
                supplier_id: cmd.supplier_id,
                reason: cmd.reason.clone(),
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_reactivate(
        &self,
        cmd: &ReactivateSupplier,
    ) -> Result<Vec<SupplierEvent>, DomainError> {
        if !self.registered {
            return Err(DomainError::not_found());
        }
        self.ensure_supplier_id(cmd.supplier_id)?;

        if self.status == SupplierStatus::Active {
            return Err(DomainError::invariant("supplier is already active"));
        }

        Ok(vec![SupplierEvent::SupplierReactivated(
            SupplierReactivated {
                supplier_id: cmd.supplier_id,
                occurred_at: cmd.occurred_at,
            },
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_supplier_id() -> SupplierId {
        SupplierId::new(AggregateId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn registered_supplier(name: &str) -> (Supplier, SupplierId) {
        let supplier_id = test_supplier_id();
        let mut supplier = Supplier::empty(supplier_id);
        let events = supplier
            .handle(&SupplierCommand::RegisterSupplier(RegisterSupplier {
                supplier_id,
                name: name.to_string(),
                rnc: Some("1-31-12345-6".to_string()),
                contact: None,
                occurred_at: test_time(),
            }))
            .unwrap();
        supplier.apply(&events[0]);
        (supplier, supplier_id)
    }

    #[test]
    fn register_supplier_emits_registered_event() {
        let supplier_id = test_supplier_id();
        let supplier = Supplier::empty(supplier_id);

        let events = supplier
            .handle(&SupplierCommand::RegisterSupplier(RegisterSupplier {
                supplier_id,
                name: "Distribuidora del Este".to_string(),
                rnc: None,
                contact: Some(ContactInfo {
                    email: Some("ventas@distribuidora.do".to_string()),
                    phone: Some("809-555-0123".to_string()),
                    address: None,
                }),
                occurred_at: test_time(),
            }))
            .unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            SupplierEvent::SupplierRegistered(e) => {
                assert_eq!(e.supplier_id, supplier_id);
                assert_eq!(e.name, "Distribuidora del Este");
                assert_eq!(e.contact.phone.as_deref(), Some("809-555-0123"));
            }
            _ => panic!("Expected SupplierRegistered event"),
        }
    }

    #[test]
    fn rejects_blank_name() {
        let supplier_id = test_supplier_id();
        let supplier = Supplier::empty(supplier_id);

        let err = supplier
            .handle(&SupplierCommand::RegisterSupplier(RegisterSupplier {
                supplier_id,
                name: "   ".to_string(),
                rnc: None,
                contact: None,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn duplicate_registration_conflicts() {
        let (supplier, supplier_id) = registered_supplier("Almacén Central");

        let err = supplier
            .handle(&SupplierCommand::RegisterSupplier(RegisterSupplier {
                supplier_id,
                name: "Almacén Central".to_string(),
                rnc: None,
                contact: None,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn partial_update_keeps_unspecified_fields() {
        let (mut supplier, supplier_id) = registered_supplier("Almacén Central");
        let original_rnc = supplier.rnc().map(str::to_string);

        let events = supplier
            .handle(&SupplierCommand::UpdateDetails(UpdateDetails {
                supplier_id,
                name: Some("Almacén Central SRL".to_string()),
                rnc: None,
                contact: None,
                occurred_at: test_time(),
            }))
            .unwrap();
        supplier.apply(&events[0]);

        assert_eq!(supplier.name(), "Almacén Central SRL");
        assert_eq!(supplier.rnc().map(str::to_string), original_rnc);
    }

    #[test]
    fn deactivate_then_reactivate_lifecycle() {
        let (mut supplier, supplier_id) = registered_supplier("Importadora Norte");
        assert!(supplier.can_transact());

        let events = supplier
            .handle(&SupplierCommand::DeactivateSupplier(DeactivateSupplier {
                supplier_id,
                reason: Some("repeated late deliveries".to_string()),
                occurred_at: test_time(),
            }))
            .unwrap();
        supplier.apply(&events[0]);
        assert_eq!(supplier.status(), SupplierStatus::Inactive);
        assert!(!supplier.can_transact());

        // Deactivating twice violates the lifecycle.
        let err = supplier
            .handle(&SupplierCommand::DeactivateSupplier(DeactivateSupplier {
                supplier_id,
                reason: None,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));

        let events = supplier
            .handle(&SupplierCommand::ReactivateSupplier(ReactivateSupplier {
                supplier_id,
                occurred_at: test_time(),
            }))
            .unwrap();
        supplier.apply(&events[0]);
        assert!(supplier.can_transact());
    }

    #[test]
    fn update_unregistered_supplier_is_not_found() {
        let supplier_id = test_supplier_id();
        let supplier = Supplier::empty(supplier_id);

        let err = supplier
            .handle(&SupplierCommand::UpdateDetails(UpdateDetails {
                supplier_id,
                name: Some("Nuevo nombre".to_string()),
                rnc: None,
                contact: None,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn event_types_are_stable() {
        let supplier_id = test_supplier_id();
        let at = test_time();

        let registered = SupplierEvent::SupplierRegistered(SupplierRegistered {
            supplier_id,
            name: "Distribuidora del Este".to_string(),
            rnc: None,
            contact: ContactInfo::default(),
            occurred_at: at,
        });
        assert_eq!(registered.event_type(), "suppliers.supplier.registered");
        assert_eq!(registered.occurred_at(), at);
    }

    #[test]
    fn version_increments_on_apply() {
        let (supplier, _) = registered_supplier("Almacén Central");
        assert_eq!(supplier.version(), 1);
    }
}
