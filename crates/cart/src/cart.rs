use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopcart_core::{Aggregate, CartId, Currency, DomainError};
use shopcart_events::Event;

use crate::item::{ItemName, LineItem, Quantity};

/// Aggregate root: Cart.
///
/// An ordered, name-keyed collection of line items in a single currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: CartId,
    currency: Currency,
    items: Vec<LineItem>,
    version: u64,
}

impl Cart {
    /// Create an empty cart at version 0.
    pub fn new(id: CartId, currency: Currency) -> Self {
        Self {
            id,
            currency,
            items: Vec::new(),
            version: 0,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, name: &ItemName) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.name == name)
    }

    /// Immutable copy of the current state.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            cart_id: self.id,
            version: self.version,
            currency: self.currency,
            items: self.items.clone(),
        }
    }
}

/// The cart's state at a given instant, as observed by readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    cart_id: CartId,
    version: u64,
    currency: Currency,
    items: Vec<LineItem>,
}

impl CartSnapshot {
    pub fn cart_id(&self) -> CartId {
        self.cart_id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, name: &ItemName) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.name == name)
    }

    pub fn contains(&self, name: &ItemName) -> bool {
        self.item(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Command: AddItem.
///
/// `item.quantity` is the amount to add (the product's default add amount).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub item: LineItem,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub name: ItemName,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateQuantity {
    pub name: ItemName,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    UpdateQuantity(UpdateQuantity),
}

impl CartCommand {
    pub fn add_item(item: LineItem) -> Self {
        Self::AddItem(AddItem {
            item,
            occurred_at: Utc::now(),
        })
    }

    pub fn remove_item(name: ItemName) -> Self {
        Self::RemoveItem(RemoveItem {
            name,
            occurred_at: Utc::now(),
        })
    }

    pub fn update_quantity(name: ItemName, quantity: Quantity) -> Self {
        Self::UpdateQuantity(UpdateQuantity {
            name,
            quantity,
            occurred_at: Utc::now(),
        })
    }

    pub fn name(&self) -> &ItemName {
        match self {
            CartCommand::AddItem(cmd) => &cmd.item.name,
            CartCommand::RemoveItem(cmd) => &cmd.name,
            CartCommand::UpdateQuantity(cmd) => &cmd.name,
        }
    }
}

/// Event: ItemAdded (a name not previously in the cart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item: LineItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub name: ItemName,
    pub from: Quantity,
    pub to: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub name: ItemName,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    QuantityChanged(QuantityChanged),
    ItemRemoved(ItemRemoved),
}

impl CartEvent {
    pub fn name(&self) -> &ItemName {
        match self {
            CartEvent::ItemAdded(e) => &e.item.name,
            CartEvent::QuantityChanged(e) => &e.name,
            CartEvent::ItemRemoved(e) => &e.name,
        }
    }
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item.added",
            CartEvent::QuantityChanged(_) => "cart.item.quantity_changed",
            CartEvent::ItemRemoved(_) => "cart.item.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::QuantityChanged(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Id = CartId;
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                self.items.push(e.item.clone());
            }
            CartEvent::QuantityChanged(e) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.name == e.name) {
                    item.quantity = e.to;
                }
            }
            CartEvent::ItemRemoved(e) => {
                self.items.retain(|item| item.name != e.name);
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add_item(cmd),
            CartCommand::RemoveItem(cmd) => Ok(self.handle_remove_item(cmd)),
            CartCommand::UpdateQuantity(cmd) => Ok(self.handle_update_quantity(cmd)),
        }
    }
}

impl Cart {
    fn handle_add_item(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, DomainError> {
        if cmd.item.unit_cost.currency() != self.currency {
            return Err(DomainError::validation(format!(
                "cannot add {} priced in {} to a {} cart",
                cmd.item.name,
                cmd.item.unit_cost.currency(),
                self.currency
            )));
        }

        match self.item(&cmd.item.name) {
            None => Ok(vec![CartEvent::ItemAdded(ItemAdded {
                item: cmd.item.clone(),
                occurred_at: cmd.occurred_at,
            })]),
            Some(existing) => {
                let to = existing
                    .quantity
                    .checked_add(cmd.item.quantity)
                    .ok_or_else(|| DomainError::validation("quantity overflow"))?;
                Ok(vec![CartEvent::QuantityChanged(QuantityChanged {
                    name: existing.name.clone(),
                    from: existing.quantity,
                    to,
                    occurred_at: cmd.occurred_at,
                })])
            }
        }
    }

    fn handle_remove_item(&self, cmd: &RemoveItem) -> Vec<CartEvent> {
        if self.item(&cmd.name).is_none() {
            return Vec::new();
        }
        vec![CartEvent::ItemRemoved(ItemRemoved {
            name: cmd.name.clone(),
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_update_quantity(&self, cmd: &UpdateQuantity) -> Vec<CartEvent> {
        match self.item(&cmd.name) {
            Some(existing) if existing.quantity != cmd.quantity => {
                vec![CartEvent::QuantityChanged(QuantityChanged {
                    name: cmd.name.clone(),
                    from: existing.quantity,
                    to: cmd.quantity,
                    occurred_at: cmd.occurred_at,
                })]
            }
            _ => Vec::new(),
        }
    }
}
