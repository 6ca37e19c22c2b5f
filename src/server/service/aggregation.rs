//! Monthly aggregation of billable sessions into invoice items.
//!
//! Sessions that were held (completed or student absent) during the month are joined to
//! their student, grouped by project level, type, status and student billing status, and each
//! group is priced. Sessions whose student is not stored are left out. Self-funded students
//! are counted once per display name for the package line appended after the groups.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    model::{
        invoice::InvoiceItem,
        session::{STATUS_COMPLETED, STATUS_STUDENT_ABSENT},
    },
    server::{
        error::invoice::InvoiceError,
        model::db::{SessionModel, StudentModel},
        service::pricing::{package_item, price_item, SELF_FUNDED},
        util::time::YearMonth,
    },
};

/// Priced content of one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBilling {
    pub items: Vec<InvoiceItem>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey<'a> {
    month: YearMonth,
    project_level: &'a str,
    session_type: &'a str,
    status: &'a str,
    student_status: &'a str,
}

fn is_billable(session: &SessionModel) -> bool {
    session.status == STATUS_COMPLETED || session.status == STATUS_STUDENT_ABSENT
}

/// Builds the invoice items of `month`.
///
/// # Arguments
/// - `month` - Month being invoiced; sessions outside it are ignored
/// - `sessions` - Candidate sessions, not required to be pre-filtered
/// - `students` - Known students keyed by id
///
/// # Returns
/// - `Ok(MonthlyBilling)` - Items ordered by month (latest first) then group key, followed by
///   the package line when at least one self-funded student had a session
/// - `Err(InvoiceError::UnknownProjectLevel)` - A billable session has a level without a rate
pub fn aggregate_month(
    month: &YearMonth,
    sessions: &[SessionModel],
    students: &HashMap<i64, StudentModel>,
) -> Result<MonthlyBilling, InvoiceError> {
    let mut groups: BTreeMap<GroupKey, u64> = BTreeMap::new();
    let mut self_funded = BTreeSet::new();

    for session in sessions
        .iter()
        .filter(|s| is_billable(s) && month.contains(s.session_date))
    {
        let Some(student) = students.get(&session.recipient) else {
            continue;
        };

        let key = GroupKey {
            month: YearMonth::of(session.session_date),
            project_level: &session.project_level,
            session_type: &session.session_type,
            status: &session.status,
            student_status: &student.status,
        };
        *groups.entry(key).or_default() += 1;

        if student.status == SELF_FUNDED {
            self_funded.insert(student.display_name.as_str());
        }
    }

    let mut groups: Vec<(GroupKey, u64)> = groups.into_iter().collect();
    // Latest month first, ties keep the key order of the map
    groups.sort_by(|(a, _), (b, _)| b.month.cmp(&a.month));

    let mut items = groups
        .into_iter()
        .map(|(key, count)| {
            price_item(
                key.project_level,
                key.session_type,
                key.status,
                key.student_status,
                count,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(package) = package_item(self_funded.len() as u64) {
        items.push(package);
    }

    let total = items.iter().map(|item| item.price).sum();

    Ok(MonthlyBilling { items, total })
}
