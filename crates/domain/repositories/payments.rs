use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::payments::NewPaymentEntity;

#[automock]
#[async_trait]
pub trait PaymentRepository {
    async fn record_payment(&self, payment: NewPaymentEntity) -> Result<i64>;
    async fn total_amount_minor(&self) -> Result<i64>;
}
