use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::data::LIST_LIMIT;

pub struct InvoiceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InvoiceRepository<'a, C> {
    /// Creates a new instance of [`InvoiceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an invoice
    ///
    /// Fails with a unique constraint violation if an invoice for the same month exists.
    pub async fn create(
        &self,
        invoice: entity::invoice::Model,
    ) -> Result<entity::invoice::Model, DbErr> {
        let invoice = entity::invoice::ActiveModel {
            id: ActiveValue::Set(invoice.id),
            date: ActiveValue::Set(invoice.date),
            status: ActiveValue::Set(invoice.status),
            total: ActiveValue::Set(invoice.total),
            items: ActiveValue::Set(invoice.items),
            filename: ActiveValue::Set(invoice.filename),
            file: ActiveValue::Set(invoice.file),
        };

        invoice.insert(self.db).await
    }

    pub async fn find_by_id(&self, invoice_id: &str) -> Result<Option<entity::invoice::Model>, DbErr> {
        entity::prelude::Invoice::find_by_id(invoice_id.to_string())
            .one(self.db)
            .await
    }

    pub async fn find_by_date(&self, date: &str) -> Result<Option<entity::invoice::Model>, DbErr> {
        entity::prelude::Invoice::find()
            .filter(entity::invoice::Column::Date.eq(date))
            .one(self.db)
            .await
    }

    /// Lists invoices, latest month first, bounded to [`LIST_LIMIT`] rows
    pub async fn find_all(&self) -> Result<Vec<entity::invoice::Model>, DbErr> {
        entity::prelude::Invoice::find()
            .order_by_desc(entity::invoice::Column::Date)
            .limit(LIST_LIMIT)
            .all(self.db)
            .await
    }

    /// Updates the status of an invoice, returns `None` if the invoice does not exist
    pub async fn update_status(
        &self,
        invoice_id: &str,
        status: &str,
    ) -> Result<Option<entity::invoice::Model>, DbErr> {
        let invoice = match self.find_by_id(invoice_id).await? {
            Some(invoice) => invoice,
            None => return Ok(None),
        };

        let mut invoice_am = invoice.into_active_model();
        invoice_am.status = ActiveValue::Set(status.to_string());

        Ok(Some(invoice_am.update(self.db).await?))
    }

    /// Stores a document on an invoice, returns `None` if the invoice does not exist
    pub async fn update_file(
        &self,
        invoice_id: &str,
        filename: String,
        file: Vec<u8>,
    ) -> Result<Option<entity::invoice::Model>, DbErr> {
        let invoice = match self.find_by_id(invoice_id).await? {
            Some(invoice) => invoice,
            None => return Ok(None),
        };

        let mut invoice_am = invoice.into_active_model();
        invoice_am.filename = ActiveValue::Set(Some(filename));
        invoice_am.file = ActiveValue::Set(Some(file));

        Ok(Some(invoice_am.update(self.db).await?))
    }

    /// Deletes an invoice
    ///
    /// Returns OK regardless of the invoice existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, invoice_id: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::Invoice::delete_by_id(invoice_id.to_string())
            .exec(self.db)
            .await
    }
}
