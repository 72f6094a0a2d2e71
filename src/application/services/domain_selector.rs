//! Active-domain selection.

use std::sync::Arc;
use tracing::info;

use crate::domain::entities::PortfolioDomain;
use crate::domain::repositories::PreferenceStore;
use crate::domain::repositories::preference_store::{DEFAULT_LANDING_KEY, DOMAIN_KEY};
use crate::error::AppError;

/// Decides which domain a visitor sees.
///
/// Two stores are involved: the visitor's own store (their cookies) holds the
/// domain they picked, and the site-wide `settings` store holds the admin's
/// default landing override. Resolution order on read is visitor flag, then
/// admin default, then the configured `fallback`.
pub struct DomainSelector<S: PreferenceStore + ?Sized> {
    settings: Arc<S>,
    fallback: PortfolioDomain,
}

impl<S: PreferenceStore + ?Sized> DomainSelector<S> {
    pub fn new(settings: Arc<S>, fallback: PortfolioDomain) -> Self {
        Self { settings, fallback }
    }

    pub fn fallback(&self) -> PortfolioDomain {
        self.fallback
    }

    /// The visitor's persisted domain; absent or malformed values resolve to
    /// [`Self::get_default_landing`].
    pub fn get_domain(&self, visitor: &dyn PreferenceStore) -> PortfolioDomain {
        PortfolioDomain::parse_lenient(visitor.get(DOMAIN_KEY).as_deref())
            .unwrap_or_else(|| self.get_default_landing())
    }

    /// Persists `domain` as the visitor's choice.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the visitor store cannot be written.
    pub fn set_domain(
        &self,
        visitor: &dyn PreferenceStore,
        domain: PortfolioDomain,
    ) -> Result<(), AppError> {
        visitor.set(DOMAIN_KEY, domain.as_str())?;
        Ok(())
    }

    /// The admin override, if one is set and well-formed.
    pub fn configured_default_landing(&self) -> Option<PortfolioDomain> {
        PortfolioDomain::parse_lenient(self.settings.get(DEFAULT_LANDING_KEY).as_deref())
    }

    pub fn get_default_landing(&self) -> PortfolioDomain {
        self.configured_default_landing().unwrap_or(self.fallback)
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the settings store cannot be written.
    pub fn set_default_landing(&self, domain: PortfolioDomain) -> Result<(), AppError> {
        self.settings.set(DEFAULT_LANDING_KEY, domain.as_str())?;
        info!(domain = %domain, "Default landing domain updated");
        Ok(())
    }

    /// Clears the admin override so the fallback applies again.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the settings store cannot be written.
    pub fn reset_default_landing(&self) -> Result<(), AppError> {
        self.settings.remove(DEFAULT_LANDING_KEY)?;
        info!(fallback = %self.fallback, "Default landing domain reset");
        Ok(())
    }
}
