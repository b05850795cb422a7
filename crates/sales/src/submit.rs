//! Sale submission (application-level orchestration).
//!
//! On explicit confirmation a sale leaves this module through the
//! [`OrderProcessor`] port. The payload carries the **original line items**
//! and the global discount, never the computed totals: authoritative
//! recomputation, persistence and stock adjustment are the collaborator's
//! responsibility. This module contains no IO itself; it composes the
//! injected port.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use colmado_core::{DomainError, DomainResult, Percent, format_currency};

use crate::sale::{Sale, SaleId, SaleLine, SaleStatus};

/// Payload handed to the external order-processing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSubmission {
    pub sale_id: SaleId,
    pub lines: Vec<SaleLine>,
    pub global_discount_percent: Percent,
    pub submitted_at: DateTime<Utc>,
}

/// Port to the external order-processing collaborator.
pub trait OrderProcessor {
    fn process(&mut self, submission: &SaleSubmission) -> DomainResult<()>;
}

/// Forward a confirmed sale to the order processor.
///
/// Only confirmed sales may be submitted; confirmation already guarantees at
/// least one line, so an empty order can never reach the processor.
pub fn submit_sale(
    sale: &Sale,
    processor: &mut dyn OrderProcessor,
    submitted_at: DateTime<Utc>,
) -> DomainResult<SaleSubmission> {
    if sale.status() != SaleStatus::Confirmed {
        return Err(DomainError::invariant(
            "only confirmed sales can be submitted",
        ));
    }

    let submission = SaleSubmission {
        sale_id: sale.id_typed(),
        lines: sale.lines().to_vec(),
        global_discount_percent: sale.global_discount_percent(),
        submitted_at,
    };

    processor.process(&submission)?;

    let totals = sale.totals();
    tracing::info!(
        sale_id = %submission.sale_id,
        lines = submission.lines.len(),
        grand_total = %format_currency(totals.grand_total),
        "sale submitted to order processor"
    );

    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sale::{AddLine, ConfirmSale, OpenSale, ProductId, SaleCommand};
    use colmado_core::{Aggregate, AggregateId};
    use rust_decimal_macros::dec;

    #[derive(Default)]
    struct RecordingProcessor {
        received: Vec<SaleSubmission>,
        fail: bool,
    }

    impl OrderProcessor for RecordingProcessor {
        fn process(&mut self, submission: &SaleSubmission) -> DomainResult<()> {
            if self.fail {
                return Err(DomainError::conflict("order processor unavailable"));
            }
            self.received.push(submission.clone());
            Ok(())
        }
    }

    fn confirmed_sale() -> Sale {
        let sale_id = SaleId::new(AggregateId::new());
        let mut sale = Sale::empty(sale_id);

        let commands = vec![
            SaleCommand::OpenSale(OpenSale {
                sale_id,
                occurred_at: Utc::now(),
            }),
            SaleCommand::AddLine(AddLine {
                sale_id,
                product_id: ProductId::new(AggregateId::new()),
                description: "Café molido 1lb".to_string(),
                quantity: dec!(2),
                unit_price: dec!(175.00),
                discount_percent: dec!(0),
                tax_percent: dec!(18),
                available_stock: dec!(24),
                occurred_at: Utc::now(),
            }),
            SaleCommand::ConfirmSale(ConfirmSale {
                sale_id,
                occurred_at: Utc::now(),
            }),
        ];

        for command in &commands {
            let events = sale.handle(command).unwrap();
            for event in &events {
                sale.apply(event);
            }
        }
        sale
    }

    #[test]
    fn submits_original_lines_not_totals() {
        let sale = confirmed_sale();
        let mut processor = RecordingProcessor::default();

        let submission = submit_sale(&sale, &mut processor, Utc::now()).unwrap();

        assert_eq!(processor.received.len(), 1);
        assert_eq!(processor.received[0], submission);
        assert_eq!(submission.lines, sale.lines());
        assert_eq!(submission.lines[0].unit_price, dec!(175.00));
    }

    #[test]
    fn rejects_unconfirmed_sale() {
        let sale_id = SaleId::new(AggregateId::new());
        let sale = Sale::empty(sale_id);
        let mut processor = RecordingProcessor::default();

        let err = submit_sale(&sale, &mut processor, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert!(processor.received.is_empty());
    }

    #[test]
    fn processor_failure_propagates() {
        let sale = confirmed_sale();
        let mut processor = RecordingProcessor {
            fail: true,
            ..Default::default()
        };

        let err = submit_sale(&sale, &mut processor, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
