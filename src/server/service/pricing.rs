//! Pricing rules for invoice items.
//!
//! A group of sessions is priced from the rate of its project level. Mentoring for students
//! who are not funded by a third party is billed at half rate, and sessions that were not
//! completed (the student was absent) are halved again. Self-funded students additionally
//! yield one package line per distinct student for the time spent between sessions.

use crate::{
    model::{
        invoice::InvoiceItem,
        session::{STATUS_COMPLETED, TYPE_MENTORING},
    },
    server::error::invoice::InvoiceError,
};

/// Billing status of a student paying for their own training.
pub const SELF_FUNDED: &str = "Auto-financé";
/// Billing status of a student whose training is paid by a third party.
pub const THIRD_PARTY_FUNDED: &str = "Financé par un tiers";
/// Billing status used when the platform dashboard shows none.
pub const UNKNOWN_FUNDING: &str = "Ext";

/// Item type of the inter-session package line.
pub const PACKAGE_ITEM_TYPE: &str = "inter-session package";
/// Unit price of the inter-session package, per self-funded student.
pub const PACKAGE_UNIT_PRICE: f64 = 30.0;

/// Session rate of a project level, `None` for levels without a rate.
pub fn base_rate(project_level: &str) -> Option<f64> {
    match project_level {
        "1" => Some(30.0),
        "2" => Some(35.0),
        "3" => Some(40.0),
        _ => None,
    }
}

/// Prices `count` sessions sharing a project level, type, status and student billing status.
///
/// # Returns
/// - `Ok(InvoiceItem)` - Item with `price = count * unit_price`
/// - `Err(InvoiceError::UnknownProjectLevel)` - The project level has no rate
pub fn price_item(
    project_level: &str,
    session_type: &str,
    status: &str,
    student_status: &str,
    count: u64,
) -> Result<InvoiceItem, InvoiceError> {
    let mut unit_price = base_rate(project_level)
        .ok_or_else(|| InvoiceError::UnknownProjectLevel(project_level.to_string()))?;

    if student_status != THIRD_PARTY_FUNDED && session_type == TYPE_MENTORING {
        unit_price /= 2.0;
    }
    if status != STATUS_COMPLETED {
        unit_price /= 2.0;
    }

    Ok(InvoiceItem {
        item_type: session_type.to_string(),
        project_level: project_level.to_string(),
        status: status.to_string(),
        student_status: student_status.to_string(),
        count,
        unit_price,
        price: count as f64 * unit_price,
    })
}

/// Package line for `student_count` distinct self-funded students, `None` when there are none.
pub fn package_item(student_count: u64) -> Option<InvoiceItem> {
    if student_count == 0 {
        return None;
    }

    Some(InvoiceItem {
        item_type: PACKAGE_ITEM_TYPE.to_string(),
        count: student_count,
        unit_price: PACKAGE_UNIT_PRICE,
        price: student_count as f64 * PACKAGE_UNIT_PRICE,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect third-party funded completed sessions at the full level rate
    #[test]
    fn third_party_completed_is_never_halved() {
        let item = price_item("3", "mentoring", "completed", THIRD_PARTY_FUNDED, 4).unwrap();

        assert_eq!(item.unit_price, 40.0);
        assert_eq!(item.price, 160.0);
    }

    /// Expect self-funded mentoring to be billed at half rate
    #[test]
    fn self_funded_mentoring_is_halved_once() {
        let item = price_item("1", "mentoring", "completed", SELF_FUNDED, 1).unwrap();

        assert_eq!(item.unit_price, 15.0);
    }

    /// Expect self-funded absences to be halved twice
    #[test]
    fn self_funded_absence_is_halved_twice() {
        let item = price_item("2", "mentoring", "marked student as absent", SELF_FUNDED, 2).unwrap();

        assert_eq!(item.unit_price, 8.75);
        assert_eq!(item.price, 17.5);
    }

    /// Expect presentations to keep the full rate regardless of funding
    #[test]
    fn presentations_are_not_discounted_for_funding() {
        let item = price_item("2", "presentation", "completed", SELF_FUNDED, 1).unwrap();

        assert_eq!(item.unit_price, 35.0);
    }

    /// Expect unknown billing status to be treated like self-funded
    #[test]
    fn unknown_funding_is_discounted() {
        let item = price_item("3", "mentoring", "completed", UNKNOWN_FUNDING, 1).unwrap();

        assert_eq!(item.unit_price, 20.0);
    }

    /// Expect a data integrity error for a level without a rate
    #[test]
    fn rejects_unknown_project_level() {
        let result = price_item("4", "mentoring", "completed", SELF_FUNDED, 1);

        assert!(matches!(result, Err(InvoiceError::UnknownProjectLevel(level)) if level == "4"));
    }

    /// Expect a package line priced per student and none for zero students
    #[test]
    fn prices_package_per_student() {
        let item = package_item(3).unwrap();

        assert_eq!(item.item_type, PACKAGE_ITEM_TYPE);
        assert_eq!(item.unit_price, 30.0);
        assert_eq!(item.price, 90.0);
        assert!(package_item(0).is_none());
    }
}
