//! Cached view of a user's saved addresses.

use common::UserEmail;
use domain::AddressRole;
use services::{AddressBookService, NewAddress, SavedAddress, ServiceError};

/// Holds the saved-address lists shown next to the booking form.
///
/// The server owns the data; after every mutation the affected list is
/// re-fetched rather than patched locally, so whatever the server decided
/// (ordering, normalization) is what the user sees.
#[derive(Debug)]
pub struct AddressBookManager<A: AddressBookService> {
    service: A,
    user: UserEmail,
    senders: Vec<SavedAddress>,
    receivers: Vec<SavedAddress>,
}

impl<A: AddressBookService> AddressBookManager<A> {
    /// Creates an empty manager for the given user. Call [`Self::refresh`]
    /// to load the lists.
    pub fn new(service: A, user: UserEmail) -> Self {
        Self {
            service,
            user,
            senders: Vec::new(),
            receivers: Vec::new(),
        }
    }

    pub fn senders(&self) -> &[SavedAddress] {
        &self.senders
    }

    pub fn receivers(&self) -> &[SavedAddress] {
        &self.receivers
    }

    /// Finds a cached address by id, in either list.
    pub fn find(&self, id: u64) -> Option<&SavedAddress> {
        self.senders
            .iter()
            .chain(self.receivers.iter())
            .find(|a| a.id == id)
    }

    /// Reloads both lists from the server.
    #[tracing::instrument(skip(self), fields(user = %self.user))]
    pub async fn refresh(&mut self) -> Result<(), ServiceError> {
        self.senders = self.service.list(&self.user, AddressRole::Sender).await?;
        self.receivers = self.service.list(&self.user, AddressRole::Receiver).await?;
        Ok(())
    }

    /// Saves a new address, then reloads the list it belongs to.
    pub async fn create(&mut self, address: NewAddress) -> Result<(), ServiceError> {
        let role = address.address_type;
        self.service.create(&self.user, address).await?;
        self.refresh_role(role).await
    }

    /// Replaces an existing address, then reloads the list it belongs to.
    pub async fn update(&mut self, id: u64, address: NewAddress) -> Result<(), ServiceError> {
        let role = address.address_type;
        self.service.update(&self.user, id, address).await?;
        self.refresh_role(role).await
    }

    /// Deletes an address, then reloads the list it belonged to.
    pub async fn delete(&mut self, id: u64) -> Result<(), ServiceError> {
        let role = self
            .find(id)
            .map(|a| a.address_type)
            .ok_or_else(|| ServiceError::Rejected {
                message: "Address not found".to_string(),
            })?;
        self.service.delete(&self.user, id).await?;
        self.refresh_role(role).await
    }

    async fn refresh_role(&mut self, role: AddressRole) -> Result<(), ServiceError> {
        let list = self.service.list(&self.user, role).await?;
        match role {
            AddressRole::Sender => self.senders = list,
            AddressRole::Receiver => self.receivers = list,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Address;
    use services::InMemoryAddressBookService;

    fn user() -> UserEmail {
        UserEmail::new("customer@example.com")
    }

    fn new_address(role: AddressRole, nickname: &str) -> NewAddress {
        NewAddress::from_address(
            role,
            nickname,
            &Address {
                name: "Asha Patil".to_string(),
                street: "14 Shivaji Nagar".to_string(),
                city: "Pune".to_string(),
                state: "Maharashtra".to_string(),
                pincode: "411005".to_string(),
                country: "India".to_string(),
                phone: "9876543210".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn create_refreshes_only_the_affected_list() {
        let mut manager = AddressBookManager::new(InMemoryAddressBookService::new(), user());
        manager.refresh().await.unwrap();

        manager
            .create(new_address(AddressRole::Sender, "Home"))
            .await
            .unwrap();
        assert_eq!(manager.senders().len(), 1);
        assert!(manager.receivers().is_empty());
    }

    #[tokio::test]
    async fn lists_reflect_server_ordering_after_mutations() {
        let mut manager = AddressBookManager::new(InMemoryAddressBookService::new(), user());
        for nickname in ["Warehouse", "Home"] {
            manager
                .create(new_address(AddressRole::Sender, nickname))
                .await
                .unwrap();
        }

        let nicknames: Vec<&str> = manager
            .senders()
            .iter()
            .map(|a| a.nickname.as_str())
            .collect();
        assert_eq!(nicknames, vec!["Home", "Warehouse"]);
    }

    #[tokio::test]
    async fn delete_removes_from_the_cached_list() {
        let mut manager = AddressBookManager::new(InMemoryAddressBookService::new(), user());
        manager
            .create(new_address(AddressRole::Receiver, "Office"))
            .await
            .unwrap();
        let id = manager.receivers()[0].id;

        manager.delete(id).await.unwrap();
        assert!(manager.receivers().is_empty());
        assert!(manager.find(id).is_none());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_rejected() {
        let mut manager = AddressBookManager::new(InMemoryAddressBookService::new(), user());
        let err = manager.delete(99).await.unwrap_err();
        assert!(matches!(err, ServiceError::Rejected { .. }));
    }

    #[tokio::test]
    async fn failed_refresh_surfaces_the_service_error() {
        let service = InMemoryAddressBookService::new();
        service.set_fail_with("Authentication required");
        let mut manager = AddressBookManager::new(service, user());

        let err = manager.refresh().await.unwrap_err();
        assert_eq!(err.to_string(), "Authentication required");
    }
}
