//! Database model type aliases.
//!
//! This module provides type aliases for the SeaORM entity models used throughout the
//! application, along with their conversions into the API DTOs. Conversions that can fail
//! because of stored data (invoice items and status) are `TryFrom` and report a data
//! integrity error.

use crate::{
    model::{
        invoice::{InvoiceDto, InvoiceItem, InvoiceStatus},
        session::SessionDto,
        student::{StudentDto, StudentSummaryDto},
    },
    server::error::invoice::InvoiceError,
};

/// Type alias for the student database model.
///
/// # Fields (from `entity::student::Model`)
/// - `id` - Platform user id of the student
/// - `display_name` - Name shown on invoices, used to count self-funded students
/// - `email` - Used to resolve webhook invitees
/// - `status` - Billing classification scraped from the platform
/// - remaining profile fields as returned by the platform
pub type StudentModel = entity::student::Model;

/// Type alias for the session database model.
///
/// # Fields (from `entity::session::Model`)
/// - `id` - Platform session id
/// - `recipient` - Platform id of the student
/// - `session_date` - Start of the session in UTC
/// - `project_level` - Project level `"1"`, `"2"` or `"3"`
/// - `session_type` - `mentoring` or `presentation`
/// - `status` - Lifecycle status such as `completed` or `marked student as absent`
pub type SessionModel = entity::session::Model;

/// Type alias for the invoice database model.
///
/// # Fields (from `entity::invoice::Model`)
/// - `id` - `OC-` followed by the invoice month
/// - `date` - Invoice month as `YYYY-MM`, unique
/// - `status` - `Draft`, `Sent` or `Payed`
/// - `total` - Sum of item prices
/// - `items` - JSON array of [`InvoiceItem`]
/// - `filename`, `file` - Optional attached document
pub type InvoiceModel = entity::invoice::Model;

/// Type alias for the stored platform login.
pub type PlatformCookieModel = entity::platform_cookie::Model;

impl From<StudentModel> for StudentDto {
    fn from(student: StudentModel) -> Self {
        Self {
            id: student.id,
            display_name: student.display_name,
            email: student.email,
            first_name: student.first_name,
            last_name: student.last_name,
            enrollment: student.enrollment,
            language: student.language,
            organization: student.organization,
            premium: student.premium,
            identity_locked: student.identity_locked,
            profile_picture: student.profile_picture,
            profile_url: student.profile_url,
            status: student.status,
        }
    }
}

impl From<StudentModel> for StudentSummaryDto {
    fn from(student: StudentModel) -> Self {
        Self {
            id: student.id,
            display_name: student.display_name,
            email: student.email,
            status: student.status,
        }
    }
}

impl From<SessionModel> for SessionDto {
    fn from(session: SessionModel) -> Self {
        Self {
            id: session.id,
            recipient: session.recipient,
            session_date: session.session_date,
            project_level: session.project_level,
            session_type: session.session_type,
            status: session.status,
            life_cycle_status: session.life_cycle_status,
            video_conference: session.video_conference,
        }
    }
}

impl TryFrom<InvoiceModel> for InvoiceDto {
    type Error = InvoiceError;

    fn try_from(invoice: InvoiceModel) -> Result<Self, Self::Error> {
        let status = invoice
            .status
            .parse::<InvoiceStatus>()
            .map_err(|reason| InvoiceError::Corrupt {
                id: invoice.id.clone(),
                reason,
            })?;
        let item = serde_json::from_value::<Vec<InvoiceItem>>(invoice.items).map_err(|e| {
            InvoiceError::Corrupt {
                id: invoice.id.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            id: invoice.id,
            date: invoice.date,
            status,
            total: invoice.total,
            item,
            filename: invoice.filename,
        })
    }
}
