//! Client config and license.

use super::Dispatcher;
use crate::api::{ApiError, ClientConfig, ClientLicense};
use crate::store::Action;

impl Dispatcher {
    /// Fetch client config and store it.
    pub async fn get_client_config(&self) -> Result<ClientConfig, ApiError> {
        let config = self.api.get_client_config().await?;
        self.store
            .dispatch(Action::ReceivedClientConfig(config.clone()))
            .await;
        Ok(config)
    }

    /// Fetch client license and store it.
    pub async fn get_license_config(&self) -> Result<ClientLicense, ApiError> {
        let license = self.api.get_license_config().await?;
        self.store
            .dispatch(Action::ReceivedClientLicense(license.clone()))
            .await;
        Ok(license)
    }
}
