//! Shipment form state manager.

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::BookingConfig;

use super::{
    Address, AddressRole, DomesticService, GoodsItem, PackageDetails, PriceQuote, QuoteError,
    QuoteRequest, QuoteTicket, ShipmentKind, ShipmentType, INTERNATIONAL_MAX_WEIGHT_KG,
};

/// Edit to one field of a sender or receiver address.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressEdit {
    Name(String),
    Street(String),
    City(String),
    State(String),
    Pincode(String),
    Country(String),
    Phone(String),
}

/// Edit to the goods declaration list.
#[derive(Debug, Clone, PartialEq)]
pub enum GoodsEdit {
    /// Appends a blank line with quantity 1.
    Add,
    Remove(usize),
    Description(usize, String),
    Quantity(usize, u32),
    HsnCode(usize, String),
    Value(usize, f64),
}

/// A single field change on the booking form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    ShipmentType(ShipmentType),
    Sender(AddressEdit),
    Receiver(AddressEdit),
    Weight(f64),
    Length(Option<f64>),
    Width(Option<f64>),
    Height(Option<f64>),
    PickupDate(NaiveDate),
    Service(DomesticService),
    Goods(GoodsEdit),
    SaveSenderAddress(bool),
    SenderNickname(String),
    SaveReceiverAddress(bool),
    ReceiverNickname(String),
}

/// Edits rejected by the form's cross-field rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Receiver country is not user-editable while the shipment is domestic.
    #[error("Receiver country is fixed to {home} for domestic shipments")]
    ReceiverCountryLocked { home: String },

    /// International shipments have exactly one service.
    #[error("Service type is fixed to International Express for international shipments")]
    ServiceLocked,

    /// A goods edit referenced a line that does not exist.
    #[error("Goods item {index} does not exist")]
    GoodsIndexOutOfRange { index: usize },

    /// The goods list must keep at least one line.
    #[error("At least one goods item is required")]
    LastGoodsItem,
}

/// In-progress shipment request for one booking session.
///
/// The form owns every user-editable field plus the held price quote.
/// Invalidation is the strongest the UI supported: any successful edit
/// clears the quote synchronously, so a stale price can never be observed
/// next to changed inputs.
#[derive(Debug, Clone)]
pub struct ShipmentForm {
    config: BookingConfig,
    kind: ShipmentKind,
    sender: Address,
    receiver: Address,
    package: PackageDetails,
    pickup_date: NaiveDate,
    goods: Vec<GoodsItem>,
    save_sender_address: bool,
    sender_nickname: String,
    save_receiver_address: bool,
    receiver_nickname: String,
    quote: Option<PriceQuote>,
    quote_seq: u64,
}

impl ShipmentForm {
    /// Creates a form with safe defaults: domestic shipment, home-country
    /// sender and receiver, 0.5 kg package, pickup today, and one blank
    /// goods line.
    pub fn new(config: BookingConfig, today: NaiveDate) -> Self {
        let sender = Address::with_country(config.home_country.clone());
        let receiver = Address::with_country(config.home_country.clone());
        Self {
            config,
            kind: ShipmentKind::default(),
            sender,
            receiver,
            package: PackageDetails::default(),
            pickup_date: today,
            goods: vec![GoodsItem::blank()],
            save_sender_address: false,
            sender_nickname: String::new(),
            save_receiver_address: false,
            receiver_nickname: String::new(),
            quote: None,
            quote_seq: 0,
        }
    }

    /// Applies a single field edit.
    ///
    /// Every successful edit drops the held quote before returning, which
    /// is the clear-on-change contract the submit path relies on.
    pub fn apply(&mut self, edit: FormEdit) -> Result<(), EditError> {
        match edit {
            FormEdit::ShipmentType(shipment_type) => self.set_shipment_type(shipment_type),
            FormEdit::Sender(edit) => apply_address_edit(&mut self.sender, edit),
            FormEdit::Receiver(edit) => {
                if matches!(edit, AddressEdit::Country(_)) && self.kind.is_domestic() {
                    return Err(EditError::ReceiverCountryLocked {
                        home: self.config.home_country.clone(),
                    });
                }
                apply_address_edit(&mut self.receiver, edit);
            }
            FormEdit::Weight(weight_kg) => self.package.weight_kg = weight_kg,
            FormEdit::Length(length_cm) => self.package.length_cm = length_cm,
            FormEdit::Width(width_cm) => self.package.width_cm = width_cm,
            FormEdit::Height(height_cm) => self.package.height_cm = height_cm,
            FormEdit::PickupDate(date) => self.pickup_date = date,
            FormEdit::Service(service) => match &mut self.kind {
                ShipmentKind::Domestic { service: slot } => *slot = Some(service),
                ShipmentKind::International => return Err(EditError::ServiceLocked),
            },
            FormEdit::Goods(edit) => self.apply_goods_edit(edit)?,
            FormEdit::SaveSenderAddress(save) => self.save_sender_address = save,
            FormEdit::SenderNickname(nickname) => self.sender_nickname = nickname,
            FormEdit::SaveReceiverAddress(save) => self.save_receiver_address = save,
            FormEdit::ReceiverNickname(nickname) => self.receiver_nickname = nickname,
        }

        self.clear_quote();
        Ok(())
    }

    /// Copies a saved address into the sender or receiver section.
    ///
    /// Package, goods, and service fields are untouched. A domestic
    /// receiver keeps the home country regardless of what the saved
    /// address carries.
    pub fn apply_address(&mut self, role: AddressRole, address: Address) {
        match role {
            AddressRole::Sender => self.sender = address,
            AddressRole::Receiver => {
                self.receiver = address;
                if self.kind.is_domestic() {
                    self.receiver.country = self.config.home_country.clone();
                }
            }
        }
        self.clear_quote();
    }

    fn set_shipment_type(&mut self, shipment_type: ShipmentType) {
        match shipment_type {
            ShipmentType::Domestic => {
                self.kind = ShipmentKind::Domestic { service: None };
                self.receiver.country = self.config.home_country.clone();
            }
            ShipmentType::International => {
                self.kind = ShipmentKind::International;
                self.receiver.country.clear();
            }
        }
    }

    fn apply_goods_edit(&mut self, edit: GoodsEdit) -> Result<(), EditError> {
        match edit {
            GoodsEdit::Add => self.goods.push(GoodsItem::blank()),
            GoodsEdit::Remove(index) => {
                if self.goods.len() == 1 {
                    return Err(EditError::LastGoodsItem);
                }
                self.goods_line(index)?;
                self.goods.remove(index);
            }
            GoodsEdit::Description(index, description) => {
                self.goods_line(index)?.description = description;
            }
            GoodsEdit::Quantity(index, quantity) => {
                self.goods_line(index)?.quantity = quantity;
            }
            GoodsEdit::HsnCode(index, hsn_code) => {
                self.goods_line(index)?.hsn_code =
                    if hsn_code.is_empty() { None } else { Some(hsn_code) };
            }
            GoodsEdit::Value(index, value) => {
                self.goods_line(index)?.value = value;
            }
        }
        Ok(())
    }

    fn goods_line(&mut self, index: usize) -> Result<&mut GoodsItem, EditError> {
        self.goods
            .get_mut(index)
            .ok_or(EditError::GoodsIndexOutOfRange { index })
    }

    /// Starts a quote request for the current form state.
    ///
    /// Checks the pricing preconditions locally, drops any held quote, and
    /// returns the ticket plus the normalized request to send. No network
    /// work happens here.
    pub fn begin_quote(&mut self) -> Result<(QuoteTicket, QuoteRequest), QuoteError> {
        let request = self.build_quote_request()?;
        self.clear_quote();
        Ok((QuoteTicket(self.quote_seq), request))
    }

    /// Stores a quote response if its ticket is still the latest issued.
    ///
    /// Returns false when the response is stale and was discarded.
    pub fn accept_quote(&mut self, ticket: QuoteTicket, quote: PriceQuote) -> bool {
        if ticket.0 != self.quote_seq {
            tracing::debug!(
                ticket = ticket.seq(),
                latest = self.quote_seq,
                "discarding stale quote response"
            );
            return false;
        }
        self.quote = Some(quote);
        true
    }

    /// Drops the held quote and invalidates any outstanding ticket.
    ///
    /// Advancing the sequence here means a response still in flight when
    /// the form changed can never be accepted against the new inputs.
    pub fn clear_quote(&mut self) {
        self.quote = None;
        self.quote_seq += 1;
    }

    fn build_quote_request(&self) -> Result<QuoteRequest, QuoteError> {
        let weight = self.package.weight_kg;
        match &self.kind {
            ShipmentKind::Domestic { service } => {
                if self.receiver.city.trim().is_empty() && self.receiver.state.trim().is_empty() {
                    return Err(QuoteError::MissingDetails("receiver city or state"));
                }
                if weight <= 0.0 {
                    return Err(QuoteError::MissingDetails("positive package weight"));
                }
                let mode =
                    service.ok_or(QuoteError::MissingDetails("service type"))?;
                Ok(QuoteRequest::Domestic {
                    city: self.receiver.city.clone(),
                    state: self.receiver.state.clone(),
                    weight,
                    mode,
                })
            }
            ShipmentKind::International => {
                if self.receiver.country.trim().is_empty() {
                    return Err(QuoteError::MissingDetails("receiver country"));
                }
                if weight <= 0.0 {
                    return Err(QuoteError::MissingDetails("positive package weight"));
                }
                if weight > INTERNATIONAL_MAX_WEIGHT_KG {
                    return Err(QuoteError::MissingDetails(
                        "weight within the 30 kg international limit",
                    ));
                }
                Ok(QuoteRequest::International {
                    country: self.receiver.country.clone(),
                    weight,
                })
            }
        }
    }
}

// Query methods
impl ShipmentForm {
    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    pub fn kind(&self) -> &ShipmentKind {
        &self.kind
    }

    pub fn shipment_type(&self) -> ShipmentType {
        self.kind.shipment_type()
    }

    pub fn sender(&self) -> &Address {
        &self.sender
    }

    pub fn receiver(&self) -> &Address {
        &self.receiver
    }

    pub fn package(&self) -> &PackageDetails {
        &self.package
    }

    pub fn pickup_date(&self) -> NaiveDate {
        self.pickup_date
    }

    pub fn goods(&self) -> &[GoodsItem] {
        &self.goods
    }

    pub fn save_sender_address(&self) -> bool {
        self.save_sender_address
    }

    pub fn sender_nickname(&self) -> &str {
        &self.sender_nickname
    }

    pub fn save_receiver_address(&self) -> bool {
        self.save_receiver_address
    }

    pub fn receiver_nickname(&self) -> &str {
        &self.receiver_nickname
    }

    /// Returns the held quote, if one is current.
    pub fn quote(&self) -> Option<&PriceQuote> {
        self.quote.as_ref()
    }
}

fn apply_address_edit(address: &mut Address, edit: AddressEdit) {
    match edit {
        AddressEdit::Name(value) => address.name = value,
        AddressEdit::Street(value) => address.street = value,
        AddressEdit::City(value) => address.city = value,
        AddressEdit::State(value) => address.state = value,
        AddressEdit::Pincode(value) => address.pincode = value,
        AddressEdit::Country(value) => address.country = value,
        AddressEdit::Phone(value) => address.phone = value,
    }
}
