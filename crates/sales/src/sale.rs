use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use colmado_core::{Aggregate, AggregateId, AggregateRoot, DomainError, Event, Percent};
use colmado_pricing::{LineItem, SaleRequest, SaleTotals, compute_totals};

/// Sale identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(pub AggregateId);

impl SaleId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for SaleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product identifier. The catalog itself lives outside this module; sales
/// only carry the reference plus a display description.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub AggregateId);

impl ProductId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Sale status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Draft,
    Confirmed,
}

/// Sale line: product, decimal quantity (weighed goods sell in fractional
/// units), unit price and this line's own discount/tax rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub line_no: u32,
    pub product_id: ProductId,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percent: Percent,
    pub tax_percent: Percent,
}

/// Aggregate root: Sale (a transient point-of-sale ticket).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    id: SaleId,
    status: SaleStatus,
    lines: Vec<SaleLine>,
    global_discount_percent: Percent,
    version: u64,
    opened: bool,
}

impl Sale {
    /// Create an empty, not-yet-opened aggregate instance for rehydration.
    pub fn empty(id: SaleId) -> Self {
        Self {
            id,
            status: SaleStatus::Draft,
            lines: Vec::new(),
            global_discount_percent: Percent::ZERO,
            version: 0,
            opened: false,
        }
    }

    pub fn id_typed(&self) -> SaleId {
        self.id
    }

    pub fn status(&self) -> SaleStatus {
        self.status
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn global_discount_percent(&self) -> Percent {
        self.global_discount_percent
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self.status, SaleStatus::Draft)
    }

    /// Immutable pricing snapshot, rebuilt from the current lines on every
    /// call. Edits never mutate a shared request in place.
    pub fn request(&self) -> SaleRequest {
        let lines = self
            .lines
            .iter()
            .map(|line| LineItem {
                quantity: line.quantity,
                unit_price: line.unit_price,
                discount_percent: line.discount_percent,
                tax_percent: line.tax_percent,
            })
            .collect();
        SaleRequest::new(lines, self.global_discount_percent)
    }

    /// Current totals for live display; recomputed from scratch per edit.
    pub fn totals(&self) -> SaleTotals {
        compute_totals(&self.request())
    }
}

impl AggregateRoot for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: OpenSale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSale {
    pub sale_id: SaleId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddLine.
///
/// Percent fields arrive as raw decimals and are validated here, at the data
/// entry boundary; `available_stock` is the availability the caller looked up
/// for the product, mirrored from the entry-form guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLine {
    pub sale_id: SaleId,
    pub product_id: ProductId,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
    pub tax_percent: Decimal,
    pub available_stock: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveLine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLine {
    pub sale_id: SaleId,
    pub line_no: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetGlobalDiscount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetGlobalDiscount {
    pub sale_id: SaleId,
    pub percent: Decimal,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ConfirmSale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmSale {
    pub sale_id: SaleId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleCommand {
    OpenSale(OpenSale),
    AddLine(AddLine),
    RemoveLine(RemoveLine),
    SetGlobalDiscount(SetGlobalDiscount),
    ConfirmSale(ConfirmSale),
}

/// Event: SaleOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleOpened {
    pub sale_id: SaleId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdded {
    pub sale_id: SaleId,
    pub line_no: u32,
    pub product_id: ProductId,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percent: Percent,
    pub tax_percent: Percent,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRemoved {
    pub sale_id: SaleId,
    pub line_no: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: GlobalDiscountSet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalDiscountSet {
    pub sale_id: SaleId,
    pub percent: Percent,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SaleConfirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleConfirmed {
    pub sale_id: SaleId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleEvent {
    SaleOpened(SaleOpened),
    LineAdded(LineAdded),
    LineRemoved(LineRemoved),
    GlobalDiscountSet(GlobalDiscountSet),
    SaleConfirmed(SaleConfirmed),
}

impl Event for SaleEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SaleEvent::SaleOpened(_) => "sales.sale.opened",
            SaleEvent::LineAdded(_) => "sales.sale.line_added",
            SaleEvent::LineRemoved(_) => "sales.sale.line_removed",
            SaleEvent::GlobalDiscountSet(_) => "sales.sale.global_discount_set",
            SaleEvent::SaleConfirmed(_) => "sales.sale.confirmed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SaleEvent::SaleOpened(e) => e.occurred_at,
            SaleEvent::LineAdded(e) => e.occurred_at,
            SaleEvent::LineRemoved(e) => e.occurred_at,
            SaleEvent::GlobalDiscountSet(e) => e.occurred_at,
            SaleEvent::SaleConfirmed(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Sale {
    type Command = SaleCommand;
    type Event = SaleEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SaleEvent::SaleOpened(e) => {
                self.id = e.sale_id;
                self.status = SaleStatus::Draft;
                self.lines.clear();
                self.global_discount_percent = Percent::ZERO;
                self.opened = true;
            }
            SaleEvent::LineAdded(e) => {
                let line = SaleLine {
                    line_no: e.line_no,
                    product_id: e.product_id,
                    description: e.description.clone(),
                    quantity: e.quantity,
                    unit_price: e.unit_price,
                    discount_percent: e.discount_percent,
                    tax_percent: e.tax_percent,
                };
                self.lines.push(line);
            }
            SaleEvent::LineRemoved(e) => {
                self.lines.retain(|line| line.line_no != e.line_no);
            }
            SaleEvent::GlobalDiscountSet(e) => {
                self.global_discount_percent = e.percent;
            }
            SaleEvent::SaleConfirmed(_) => {
                self.status = SaleStatus::Confirmed;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SaleCommand::OpenSale(cmd) => self.handle_open(cmd),
            SaleCommand::AddLine(cmd) => self.handle_add_line(cmd),
            SaleCommand::RemoveLine(cmd) => self.handle_remove_line(cmd),
            SaleCommand::SetGlobalDiscount(cmd) => self.handle_set_global_discount(cmd),
            SaleCommand::ConfirmSale(cmd) => self.handle_confirm(cmd),
        }
    }
}

impl Sale {
    fn ensure_sale_id(&self, sale_id: SaleId) -> Result<(), DomainError> {
        if self.id != sale_id {
            return Err(DomainError::invariant("sale_id mismatch"));
        }
        Ok(())
    }

    fn ensure_modifiable(&self) -> Result<(), DomainError> {
        if !self.is_modifiable() {
            return Err(DomainError::invariant(
                "cannot modify sale once it is confirmed",
            ));
        }
        Ok(())
    }

    fn handle_open(&self, cmd: &OpenSale) -> Result<Vec<SaleEvent>, DomainError> {
        if self.opened {
            return Err(DomainError::conflict("sale already exists"));
        }

        Ok(vec![SaleEvent::SaleOpened(SaleOpened {
            sale_id: cmd.sale_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_line(&self, cmd: &AddLine) -> Result<Vec<SaleEvent>, DomainError> {
        if !self.opened {
            return Err(DomainError::not_found());
        }
        self.ensure_sale_id(cmd.sale_id)?;
        self.ensure_modifiable()?;

        if cmd.quantity <= Decimal::ZERO {
            return Err(DomainError::validation("quantity must be positive"));
        }

        if cmd.unit_price < Decimal::ZERO {
            return Err(DomainError::validation("unit_price must not be negative"));
        }

        if cmd.quantity > cmd.available_stock {
            return Err(DomainError::validation(format!(
                "quantity {} exceeds available stock {}",
                cmd.quantity, cmd.available_stock
            )));
        }

        let discount_percent = Percent::new(cmd.discount_percent)?;
        let tax_percent = Percent::new(cmd.tax_percent)?;

        // Line numbers stay stable across removals.
        let next_line_no = self.lines.iter().map(|l| l.line_no).max().unwrap_or(0) + 1;

        Ok(vec![SaleEvent::LineAdded(LineAdded {
            sale_id: cmd.sale_id,
            line_no: next_line_no,
            product_id: cmd.product_id,
            description: cmd.description.clone(),
            quantity: cmd.quantity,
            unit_price: cmd.unit_price,
            discount_percent,
            tax_percent,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_line(&self, cmd: &RemoveLine) -> Result<Vec<SaleEvent>, DomainError> {
        if !self.opened {
            return Err(DomainError::not_found());
        }
        self.ensure_sale_id(cmd.sale_id)?;
        self.ensure_modifiable()?;

        if !self.lines.iter().any(|line| line.line_no == cmd.line_no) {
            return Err(DomainError::validation(format!(
                "line {} does not exist",
                cmd.line_no
            )));
        }

        Ok(vec![SaleEvent::LineRemoved(LineRemoved {
            sale_id: cmd.sale_id,
            line_no: cmd.line_no,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_global_discount(
        &self,
        cmd: &SetGlobalDiscount,
    ) -> Result<Vec<SaleEvent>, DomainError> {
        if !self.opened {
            return Err(DomainError::not_found());
        }
        self.ensure_sale_id(cmd.sale_id)?;
        self.ensure_modifiable()?;

        let percent = Percent::new(cmd.percent)?;

        Ok(vec![SaleEvent::GlobalDiscountSet(GlobalDiscountSet {
            sale_id: cmd.sale_id,
            percent,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_confirm(&self, cmd: &ConfirmSale) -> Result<Vec<SaleEvent>, DomainError> {
        if !self.opened {
            return Err(DomainError::not_found());
        }
        self.ensure_sale_id(cmd.sale_id)?;

        if self.status != SaleStatus::Draft {
            return Err(DomainError::invariant("only draft sales can be confirmed"));
        }

        if self.lines.is_empty() {
            return Err(DomainError::validation("cannot confirm sale without lines"));
        }

        Ok(vec![SaleEvent::SaleConfirmed(SaleConfirmed {
            sale_id: cmd.sale_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
