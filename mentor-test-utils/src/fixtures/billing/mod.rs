//! Database fixtures for billing records.

pub mod data;

use crate::TestContext;

impl TestContext {
    pub fn billing(&self) -> BillingFixtures<'_> {
        BillingFixtures { setup: self }
    }
}

pub struct BillingFixtures<'a> {
    pub setup: &'a TestContext,
}
