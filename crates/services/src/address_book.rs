//! Address book service trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::UserEmail;
use domain::{Address, AddressRole};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// A reusable sender/receiver profile, independent of any shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAddress {
    pub id: u64,
    pub address_type: AddressRole,
    pub nickname: String,
    pub name: String,
    pub address_street: String,
    pub address_city: String,
    pub address_state: String,
    pub address_pincode: String,
    pub address_country: String,
    pub phone: String,
}

impl SavedAddress {
    /// Returns the address fields as a domain address, ready to copy into
    /// a form section.
    pub fn address(&self) -> Address {
        Address {
            name: self.name.clone(),
            street: self.address_street.clone(),
            city: self.address_city.clone(),
            state: self.address_state.clone(),
            pincode: self.address_pincode.clone(),
            country: self.address_country.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Payload for creating or updating a saved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    pub address_type: AddressRole,
    pub nickname: String,
    pub name: String,
    pub address_street: String,
    pub address_city: String,
    pub address_state: String,
    pub address_pincode: String,
    pub address_country: String,
    pub phone: String,
}

impl NewAddress {
    /// Builds a saveable address from form fields and a nickname.
    pub fn from_address(role: AddressRole, nickname: impl Into<String>, address: &Address) -> Self {
        Self {
            address_type: role,
            nickname: nickname.into(),
            name: address.name.clone(),
            address_street: address.street.clone(),
            address_city: address.city.clone(),
            address_state: address.state.clone(),
            address_pincode: address.pincode.clone(),
            address_country: address.country.clone(),
            phone: address.phone.clone(),
        }
    }
}

/// Trait for the customer address book.
///
/// Every operation acts on behalf of an explicit user; there is no ambient
/// session. Implementations surface server errors verbatim.
#[async_trait]
pub trait AddressBookService: Send + Sync {
    /// Fetches all saved addresses of the given type for the user.
    async fn list(
        &self,
        user: &UserEmail,
        role: AddressRole,
    ) -> Result<Vec<SavedAddress>, ServiceError>;

    /// Persists a new address and returns it with its assigned id.
    async fn create(
        &self,
        user: &UserEmail,
        address: NewAddress,
    ) -> Result<SavedAddress, ServiceError>;

    /// Replaces an existing address.
    async fn update(
        &self,
        user: &UserEmail,
        id: u64,
        address: NewAddress,
    ) -> Result<SavedAddress, ServiceError>;

    /// Deletes an address by id.
    async fn delete(&self, user: &UserEmail, id: u64) -> Result<(), ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryAddressBookState {
    addresses: Vec<SavedAddress>,
    next_id: u64,
    fail_with: Option<String>,
}

/// In-memory address book for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAddressBookService {
    state: Arc<RwLock<InMemoryAddressBookState>>,
}

impl InMemoryAddressBookService {
    /// Creates a new in-memory address book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent calls fail with the given server message.
    pub fn set_fail_with(&self, message: impl Into<String>) {
        self.state.write().unwrap().fail_with = Some(message.into());
    }

    /// Clears a previously configured failure.
    pub fn clear_failure(&self) {
        self.state.write().unwrap().fail_with = None;
    }

    /// Returns the total number of stored addresses.
    pub fn address_count(&self) -> usize {
        self.state.read().unwrap().addresses.len()
    }

    fn check_failure(state: &InMemoryAddressBookState) -> Result<(), ServiceError> {
        if let Some(message) = &state.fail_with {
            return Err(ServiceError::Rejected {
                message: message.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AddressBookService for InMemoryAddressBookService {
    async fn list(
        &self,
        _user: &UserEmail,
        role: AddressRole,
    ) -> Result<Vec<SavedAddress>, ServiceError> {
        let state = self.state.read().unwrap();
        Self::check_failure(&state)?;
        let mut addresses: Vec<SavedAddress> = state
            .addresses
            .iter()
            .filter(|a| a.address_type == role)
            .cloned()
            .collect();
        // The backend orders by nickname.
        addresses.sort_by(|a, b| a.nickname.cmp(&b.nickname));
        Ok(addresses)
    }

    async fn create(
        &self,
        _user: &UserEmail,
        address: NewAddress,
    ) -> Result<SavedAddress, ServiceError> {
        let mut state = self.state.write().unwrap();
        Self::check_failure(&state)?;

        state.next_id += 1;
        let saved = SavedAddress {
            id: state.next_id,
            address_type: address.address_type,
            nickname: address.nickname,
            name: address.name,
            address_street: address.address_street,
            address_city: address.address_city,
            address_state: address.address_state,
            address_pincode: address.address_pincode,
            address_country: address.address_country,
            phone: address.phone,
        };
        state.addresses.push(saved.clone());
        Ok(saved)
    }

    async fn update(
        &self,
        _user: &UserEmail,
        id: u64,
        address: NewAddress,
    ) -> Result<SavedAddress, ServiceError> {
        let mut state = self.state.write().unwrap();
        Self::check_failure(&state)?;

        let slot = state
            .addresses
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ServiceError::Rejected {
                message: "Address not found".to_string(),
            })?;

        *slot = SavedAddress {
            id,
            address_type: address.address_type,
            nickname: address.nickname,
            name: address.name,
            address_street: address.address_street,
            address_city: address.address_city,
            address_state: address.address_state,
            address_pincode: address.address_pincode,
            address_country: address.address_country,
            phone: address.phone,
        };
        Ok(slot.clone())
    }

    async fn delete(&self, _user: &UserEmail, id: u64) -> Result<(), ServiceError> {
        let mut state = self.state.write().unwrap();
        Self::check_failure(&state)?;

        let before = state.addresses.len();
        state.addresses.retain(|a| a.id != id);
        if state.addresses.len() == before {
            return Err(ServiceError::Rejected {
                message: "Address not found".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserEmail {
        UserEmail::new("customer@example.com")
    }

    fn new_address(role: AddressRole, nickname: &str) -> NewAddress {
        NewAddress {
            address_type: role,
            nickname: nickname.to_string(),
            name: "Asha Patil".to_string(),
            address_street: "14 Shivaji Nagar".to_string(),
            address_city: "Pune".to_string(),
            address_state: "Maharashtra".to_string(),
            address_pincode: "411005".to_string(),
            address_country: "India".to_string(),
            phone: "9876543210".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_list_filters_by_role() {
        let book = InMemoryAddressBookService::new();
        book.create(&user(), new_address(AddressRole::Sender, "Home"))
            .await
            .unwrap();
        book.create(&user(), new_address(AddressRole::Receiver, "Office"))
            .await
            .unwrap();

        let senders = book.list(&user(), AddressRole::Sender).await.unwrap();
        assert_eq!(senders.len(), 1);
        assert_eq!(senders[0].nickname, "Home");

        let receivers = book.list(&user(), AddressRole::Receiver).await.unwrap();
        assert_eq!(receivers.len(), 1);
    }

    #[tokio::test]
    async fn list_is_ordered_by_nickname() {
        let book = InMemoryAddressBookService::new();
        for nickname in ["Warehouse", "Home", "Office"] {
            book.create(&user(), new_address(AddressRole::Sender, nickname))
                .await
                .unwrap();
        }

        let senders = book.list(&user(), AddressRole::Sender).await.unwrap();
        let nicknames: Vec<&str> = senders.iter().map(|a| a.nickname.as_str()).collect();
        assert_eq!(nicknames, vec!["Home", "Office", "Warehouse"]);
    }

    #[tokio::test]
    async fn update_replaces_fields_in_place() {
        let book = InMemoryAddressBookService::new();
        let saved = book
            .create(&user(), new_address(AddressRole::Sender, "Home"))
            .await
            .unwrap();

        let mut replacement = new_address(AddressRole::Sender, "My Home");
        replacement.address_city = "Mumbai".to_string();
        let updated = book.update(&user(), saved.id, replacement).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.nickname, "My Home");
        assert_eq!(updated.address_city, "Mumbai");
        assert_eq!(book.address_count(), 1);
    }

    #[tokio::test]
    async fn delete_removes_and_missing_id_is_rejected() {
        let book = InMemoryAddressBookService::new();
        let saved = book
            .create(&user(), new_address(AddressRole::Sender, "Home"))
            .await
            .unwrap();

        book.delete(&user(), saved.id).await.unwrap();
        assert_eq!(book.address_count(), 0);

        let err = book.delete(&user(), saved.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Rejected { .. }));
    }

    #[test]
    fn saved_address_converts_to_domain_address() {
        let saved = SavedAddress {
            id: 1,
            address_type: AddressRole::Receiver,
            nickname: "Office".to_string(),
            name: "Ravi Kumar".to_string(),
            address_street: "12 MG Road".to_string(),
            address_city: "Bengaluru".to_string(),
            address_state: "Karnataka".to_string(),
            address_pincode: "560001".to_string(),
            address_country: "India".to_string(),
            phone: "9123456780".to_string(),
        };
        let address = saved.address();
        assert_eq!(address.city, "Bengaluru");
        assert_eq!(address.name, "Ravi Kumar");
    }
}
