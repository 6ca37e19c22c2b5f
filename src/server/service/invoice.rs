//! Invoice lifecycle.
//!
//! An invoice covers one calendar month and is derived entirely from the sessions stored for
//! that month. It is created as `Draft`, moved to `Sent` and `Payed` by status updates, and
//! can be regenerated at any time, which brings it back to `Draft` without its document.

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, SqlErr, TransactionTrait};

use crate::{
    model::invoice::{InvoiceDto, InvoiceStatus},
    server::{
        data::{invoice::InvoiceRepository, session::SessionRepository, student::StudentRepository},
        error::{invoice::InvoiceError, Error},
        model::db::InvoiceModel,
        service::aggregation::aggregate_month,
        util::time::YearMonth,
    },
};

/// Prefix of invoice ids, followed by the invoice month.
pub const INVOICE_ID_PREFIX: &str = "OC-";

/// Id of the invoice covering `month`.
pub fn invoice_id(month: &YearMonth) -> String {
    format!("{}{}", INVOICE_ID_PREFIX, month)
}

/// Service managing monthly invoices.
///
/// Provides creation from stored sessions, regeneration, status transitions and document
/// attachment. Lookups return `Option`; operations on a specific invoice report
/// [`InvoiceError::NotFound`] when it does not exist.
pub struct InvoiceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InvoiceService<'a> {
    /// Creates a new instance of [`InvoiceService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the invoice of `month` from the stored sessions without persisting it.
    ///
    /// # Returns
    /// - `Ok(InvoiceModel)` - Draft invoice without document
    /// - `Err(Error::InvoiceError(InvoiceError::UnknownProjectLevel))` - A session has a level
    ///   without a rate
    /// - `Err(Error::DbErr)` - Sessions or students could not be loaded
    async fn build(&self, month: &YearMonth) -> Result<InvoiceModel, Error> {
        let sessions = SessionRepository::new(self.db)
            .find_billable_in_month(month)
            .await?;

        let mut recipients: Vec<i64> = sessions.iter().map(|s| s.recipient).collect();
        recipients.sort_unstable();
        recipients.dedup();

        let students: HashMap<_, _> = StudentRepository::new(self.db)
            .find_many(&recipients)
            .await?
            .into_iter()
            .map(|student| (student.id, student))
            .collect();

        let billing = aggregate_month(month, &sessions, &students)?;

        Ok(InvoiceModel {
            id: invoice_id(month),
            date: month.to_string(),
            status: InvoiceStatus::Draft.to_string(),
            total: billing.total,
            items: serde_json::to_value(&billing.items)?,
            filename: None,
            file: None,
        })
    }

    /// Creates the invoice of a month.
    ///
    /// # Returns
    /// - `Ok(InvoiceDto)` - The new draft invoice
    /// - `Err(Error::InvoiceError(InvoiceError::AlreadyExists))` - The month is already invoiced
    pub async fn add(&self, month: &YearMonth) -> Result<InvoiceDto, Error> {
        let invoice_repo = InvoiceRepository::new(self.db);

        if invoice_repo.find_by_date(&month.to_string()).await?.is_some() {
            return Err(InvoiceError::AlreadyExists(month.to_string()).into());
        }

        let invoice = self.build(month).await?;
        let invoice = self.insert(month, invoice).await?;

        tracing::info!("Created invoice {} totalling {}", invoice.id, invoice.total);

        Ok(InvoiceDto::try_from(invoice)?)
    }

    /// Inserts a built invoice, reporting a month invoiced concurrently as a conflict.
    async fn insert(&self, month: &YearMonth, invoice: InvoiceModel) -> Result<InvoiceModel, Error> {
        match InvoiceRepository::new(self.db).create(invoice).await {
            Ok(invoice) => Ok(invoice),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(InvoiceError::AlreadyExists(month.to_string()).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Creates the invoices of every month of `year` that is not invoiced yet.
    ///
    /// Returns the created invoices in calendar order.
    pub async fn add_year(&self, year: i32) -> Result<Vec<InvoiceDto>, Error> {
        let invoice_repo = InvoiceRepository::new(self.db);

        let mut created = Vec::new();
        for month in YearMonth::months_of(year)? {
            if invoice_repo.find_by_date(&month.to_string()).await?.is_some() {
                continue;
            }

            match self.add(&month).await {
                Err(Error::InvoiceError(InvoiceError::AlreadyExists(_))) => continue,
                invoice => created.push(invoice?),
            }
        }

        Ok(created)
    }

    /// Regenerates an invoice from the sessions currently stored for its month.
    ///
    /// The replacement is built first, then the old invoice is deleted and the new one
    /// inserted in a single transaction. Status returns to `Draft` and any document is dropped.
    ///
    /// # Returns
    /// - `Ok(InvoiceDto)` - The regenerated invoice
    /// - `Err(Error::InvoiceError(InvoiceError::NotFound))` - No invoice has this id
    pub async fn refresh(&self, invoice_id: &str) -> Result<InvoiceDto, Error> {
        let existing = InvoiceRepository::new(self.db)
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| InvoiceError::NotFound(invoice_id.to_string()))?;

        let month = existing
            .date
            .parse::<YearMonth>()
            .map_err(|e| InvoiceError::Corrupt {
                id: existing.id.clone(),
                reason: e.to_string(),
            })?;
        let replacement = self.build(&month).await?;

        let txn = self.db.begin().await?;
        let invoice_repo = InvoiceRepository::new(&txn);
        invoice_repo.delete(&existing.id).await?;
        let invoice = invoice_repo.create(replacement).await?;
        txn.commit().await?;

        tracing::info!("Regenerated invoice {} totalling {}", invoice.id, invoice.total);

        Ok(InvoiceDto::try_from(invoice)?)
    }

    /// Sets the status of an invoice, leaving its items untouched
    pub async fn set_status(
        &self,
        invoice_id: &str,
        status: InvoiceStatus,
    ) -> Result<InvoiceDto, Error> {
        let invoice = InvoiceRepository::new(self.db)
            .update_status(invoice_id, status.as_str())
            .await?
            .ok_or_else(|| InvoiceError::NotFound(invoice_id.to_string()))?;

        Ok(InvoiceDto::try_from(invoice)?)
    }

    /// Attaches a document to an invoice, replacing any previous one
    pub async fn attach_file(
        &self,
        invoice_id: &str,
        filename: String,
        file: Vec<u8>,
    ) -> Result<InvoiceDto, Error> {
        let invoice = InvoiceRepository::new(self.db)
            .update_file(invoice_id, filename, file)
            .await?
            .ok_or_else(|| InvoiceError::NotFound(invoice_id.to_string()))?;

        Ok(InvoiceDto::try_from(invoice)?)
    }

    /// Gets the document attached to an invoice as its filename and content.
    ///
    /// # Returns
    /// - `Err(Error::InvoiceError(InvoiceError::NotFound))` - No invoice has this id
    /// - `Err(Error::InvoiceError(InvoiceError::FileMissing))` - The invoice has no document
    pub async fn file(&self, invoice_id: &str) -> Result<(String, Vec<u8>), Error> {
        let invoice = InvoiceRepository::new(self.db)
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| InvoiceError::NotFound(invoice_id.to_string()))?;

        match (invoice.filename, invoice.file) {
            (Some(filename), Some(file)) => Ok((filename, file)),
            _ => Err(InvoiceError::FileMissing(invoice_id.to_string()).into()),
        }
    }

    /// Deletes an invoice, returns the number of invoices removed
    pub async fn remove(&self, invoice_id: &str) -> Result<u64, Error> {
        let result = InvoiceRepository::new(self.db).delete(invoice_id).await?;

        Ok(result.rows_affected)
    }

    pub async fn get(&self, invoice_id: &str) -> Result<Option<InvoiceDto>, Error> {
        InvoiceRepository::new(self.db)
            .find_by_id(invoice_id)
            .await?
            .map(InvoiceDto::try_from)
            .transpose()
            .map_err(Error::from)
    }

    pub async fn get_by_date(&self, month: &YearMonth) -> Result<Option<InvoiceDto>, Error> {
        InvoiceRepository::new(self.db)
            .find_by_date(&month.to_string())
            .await?
            .map(InvoiceDto::try_from)
            .transpose()
            .map_err(Error::from)
    }

    pub async fn list(&self) -> Result<Vec<InvoiceDto>, Error> {
        let invoices = InvoiceRepository::new(self.db).find_all().await?;

        Ok(invoices
            .into_iter()
            .map(InvoiceDto::try_from)
            .collect::<Result<Vec<_>, _>>()?)
    }
}
