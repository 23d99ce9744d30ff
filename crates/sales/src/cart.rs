use serde::{Deserialize, Serialize};

use chemsales_catalog::Product;
use chemsales_core::{
    Aggregate, DomainError, DomainResult, Event, Money, ProductId, Quantity, QuantityDelta,
};

/// Cart line: a product snapshot and the accumulated quantity.
///
/// Invariant: `quantity >= product.min_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartLine {
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// `unit_price × quantity`, rounded to the cent.
    pub fn line_total(&self) -> DomainResult<Money> {
        self.product
            .unit_price
            .checked_mul_quantity(self.quantity)
            .ok_or_else(|| DomainError::invariant("cart line amount overflow"))
    }
}

/// Aggregate root: Cart.
///
/// Lines are kept in first-added order, with at most one line per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    version: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one minimum order of `product`, creating the line if needed.
    pub fn add_to_cart(&mut self, product: &Product) -> DomainResult<()> {
        self.execute(&CartCommand::AddItem(AddItem {
            product: product.clone(),
        }))
        .map(|_| ())
    }

    /// Shift a line's quantity by `delta`, never below the product's minimum
    /// order. Unknown ids are ignored.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        delta: QuantityDelta,
    ) -> DomainResult<()> {
        self.execute(&CartCommand::AdjustQuantity(AdjustQuantity { product_id, delta }))
            .map(|_| ())
    }

    /// Drop a line. Unknown ids are ignored.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        // Removal has no failure path.
        let events = self.handle_remove(&RemoveItem { product_id });
        for event in &events {
            self.apply(event);
        }
    }

    /// Sum of all line totals.
    pub fn total_price(&self) -> DomainResult<Money> {
        self.lines.iter().try_fold(Money::ZERO, |acc, line| {
            acc.checked_add(line.line_total()?)
                .ok_or_else(|| DomainError::invariant("cart total overflow"))
        })
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub product: Product,
}

/// Command: AdjustQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustQuantity {
    pub product_id: ProductId,
    pub delta: QuantityDelta,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub product_id: ProductId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    AdjustQuantity(AdjustQuantity),
    RemoveItem(RemoveItem),
}

/// Event: ItemAdded (a new line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub product: Product,
    pub quantity: Quantity,
}

/// Event: QuantityChanged (absolute new quantity of an existing line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub product_id: ProductId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    QuantityChanged(QuantityChanged),
    ItemRemoved(ItemRemoved),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "sales.cart.item_added",
            CartEvent::QuantityChanged(_) => "sales.cart.quantity_changed",
            CartEvent::ItemRemoved(_) => "sales.cart.item_removed",
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                self.lines.push(CartLine {
                    product: e.product.clone(),
                    quantity: e.quantity,
                });
            }
            CartEvent::QuantityChanged(e) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.product_id() == e.product_id) {
                    line.quantity = e.quantity;
                }
            }
            CartEvent::ItemRemoved(e) => {
                self.lines.retain(|l| l.product_id() != e.product_id);
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add(cmd),
            CartCommand::AdjustQuantity(cmd) => self.handle_adjust(cmd),
            CartCommand::RemoveItem(cmd) => Ok(self.handle_remove(cmd)),
        }
    }
}

impl Cart {
    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, DomainError> {
        let product = &cmd.product;

        let Some(line) = self.line(product.id) else {
            return Ok(vec![CartEvent::ItemAdded(ItemAdded {
                product: product.clone(),
                quantity: product.min_order,
            })]);
        };

        let quantity = line
            .quantity
            .checked_add(product.min_order)
            .ok_or_else(|| DomainError::invariant("cart line quantity overflow"))?;

        Ok(vec![CartEvent::QuantityChanged(QuantityChanged {
            product_id: product.id,
            quantity,
        })])
    }

    fn handle_adjust(&self, cmd: &AdjustQuantity) -> Result<Vec<CartEvent>, DomainError> {
        let Some(line) = self.line(cmd.product_id) else {
            return Ok(Vec::new());
        };

        let quantity = line
            .quantity
            .offset_clamped(cmd.delta, line.product.min_order)
            .ok_or_else(|| DomainError::invariant("cart line quantity overflow"))?;

        if quantity == line.quantity {
            return Ok(Vec::new());
        }

        Ok(vec![CartEvent::QuantityChanged(QuantityChanged {
            product_id: cmd.product_id,
            quantity,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Vec<CartEvent> {
        if self.line(cmd.product_id).is_none() {
            return Vec::new();
        }
        vec![CartEvent::ItemRemoved(ItemRemoved {
            product_id: cmd.product_id,
        })]
    }
}
