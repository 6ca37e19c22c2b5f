//! Mocked learning platform endpoints.
//!
//! A single mockito server plays both the platform API and its website, so paths of both
//! are registered on it.

pub mod mockito;

use crate::TestContext;

impl TestContext {
    pub fn platform(&mut self) -> PlatformFixtures<'_> {
        PlatformFixtures { setup: self }
    }
}

pub struct PlatformFixtures<'a> {
    pub setup: &'a mut TestContext,
}
