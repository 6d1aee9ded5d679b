use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dioca_auth::{CredentialPolicy, Credentials};
use dioca_core::{Aggregate, AggregateRoot, DomainError, DomainResult, ProductId, SessionId};
use dioca_events::{Event, EventEnvelope};
use dioca_products::{Catalog, Product, ProductDraft, ProductName, Quantity};

use crate::form::{Field, FormMode, ProductForm};

/// Aggregate root: the in-memory state of one run of the app.
///
/// # Invariants
/// - Product ids are never reused.
/// - Quantities never go negative (purchase of an empty product is rejected).
/// - `add_or_increment` never creates a second product with the same
///   normalized name. `update` does not re-check names.
/// - Deleting the selected product also clears the form.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    policy: CredentialPolicy,
    authenticated: bool,
    catalog: Catalog,
    form: ProductForm,
    version: u64,
}

impl Session {
    pub fn new(policy: CredentialPolicy) -> Self {
        Self {
            id: SessionId::new(),
            policy,
            authenticated: false,
            catalog: Catalog::new(),
            form: ProductForm::default(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn products(&self) -> &Catalog {
        &self.catalog
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.get(id)
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn mode(&self) -> FormMode {
        self.form.mode()
    }

    pub fn selected(&self) -> Option<ProductId> {
        self.form.selected()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CredentialPolicy::default())
    }
}

impl AggregateRoot for Session {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// A user action against the session.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    Authenticate {
        credentials: Credentials,
        occurred_at: DateTime<Utc>,
    },
    Logout {
        occurred_at: DateTime<Utc>,
    },
    /// `product_id` is used only if a new product has to be created.
    AddOrIncrement {
        product_id: ProductId,
        name: String,
        price: String,
        quantity: String,
        occurred_at: DateTime<Utc>,
    },
    /// Apply the form's current fields to the selected product.
    UpdateSelected {
        occurred_at: DateTime<Utc>,
    },
    Delete {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    Purchase {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    Select {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    ResetForm {
        occurred_at: DateTime<Utc>,
    },
}

impl SessionCommand {
    pub fn authenticate(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Authenticate {
            credentials: Credentials::new(username, password),
            occurred_at: Utc::now(),
        }
    }

    pub fn logout() -> Self {
        Self::Logout {
            occurred_at: Utc::now(),
        }
    }

    /// Allocates a fresh id for the product in case one gets created.
    pub fn add_or_increment(
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self::AddOrIncrement {
            product_id: ProductId::new(),
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn update_selected() -> Self {
        Self::UpdateSelected {
            occurred_at: Utc::now(),
        }
    }

    pub fn delete(product_id: ProductId) -> Self {
        Self::Delete {
            product_id,
            occurred_at: Utc::now(),
        }
    }

    pub fn purchase(product_id: ProductId) -> Self {
        Self::Purchase {
            product_id,
            occurred_at: Utc::now(),
        }
    }

    pub fn select(product_id: ProductId) -> Self {
        Self::Select {
            product_id,
            occurred_at: Utc::now(),
        }
    }

    pub fn reset_form() -> Self {
        Self::ResetForm {
            occurred_at: Utc::now(),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::Authenticate { .. } => "authenticate",
            SessionCommand::Logout { .. } => "logout",
            SessionCommand::AddOrIncrement { .. } => "add_or_increment",
            SessionCommand::UpdateSelected { .. } => "update_selected",
            SessionCommand::Delete { .. } => "delete",
            SessionCommand::Purchase { .. } => "purchase",
            SessionCommand::Select { .. } => "select",
            SessionCommand::ResetForm { .. } => "reset_form",
        }
    }
}

/// Something that happened to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    Authenticated {
        username: String,
        occurred_at: DateTime<Utc>,
    },
    LoggedOut {
        occurred_at: DateTime<Utc>,
    },
    ProductAdded {
        product: Product,
        occurred_at: DateTime<Utc>,
    },
    /// `quantity` is the new total after adding `added`.
    StockIncremented {
        product_id: ProductId,
        added: Quantity,
        quantity: Quantity,
        occurred_at: DateTime<Utc>,
    },
    ProductUpdated {
        product_id: ProductId,
        draft: ProductDraft,
        occurred_at: DateTime<Utc>,
    },
    ProductDeleted {
        product_id: ProductId,
        name: ProductName,
        occurred_at: DateTime<Utc>,
    },
    ProductPurchased {
        product_id: ProductId,
        name: ProductName,
        remaining: Quantity,
        occurred_at: DateTime<Utc>,
    },
    ProductSelected {
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    },
    FormReset {
        occurred_at: DateTime<Utc>,
    },
}

impl Event for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::Authenticated { .. } => "session.authenticated",
            SessionEvent::LoggedOut { .. } => "session.logged_out",
            SessionEvent::ProductAdded { .. } => "session.product.added",
            SessionEvent::StockIncremented { .. } => "session.product.stock_incremented",
            SessionEvent::ProductUpdated { .. } => "session.product.updated",
            SessionEvent::ProductDeleted { .. } => "session.product.deleted",
            SessionEvent::ProductPurchased { .. } => "session.product.purchased",
            SessionEvent::ProductSelected { .. } => "session.form.product_selected",
            SessionEvent::FormReset { .. } => "session.form.reset",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::Authenticated { occurred_at, .. }
            | SessionEvent::LoggedOut { occurred_at }
            | SessionEvent::ProductAdded { occurred_at, .. }
            | SessionEvent::StockIncremented { occurred_at, .. }
            | SessionEvent::ProductUpdated { occurred_at, .. }
            | SessionEvent::ProductDeleted { occurred_at, .. }
            | SessionEvent::ProductPurchased { occurred_at, .. }
            | SessionEvent::ProductSelected { occurred_at, .. }
            | SessionEvent::FormReset { occurred_at } => *occurred_at,
        }
    }
}

impl Aggregate for Session {
    type Command = SessionCommand;
    type Event = SessionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SessionEvent::Authenticated { .. } => {
                self.authenticated = true;
            }
            SessionEvent::LoggedOut { .. } => {
                // Products and the form survive a logout.
                self.authenticated = false;
            }
            SessionEvent::ProductAdded { product, .. } => {
                self.catalog.push(product.clone());
            }
            SessionEvent::StockIncremented {
                product_id,
                quantity,
                ..
            } => {
                if let Some(product) = self.catalog.get_mut(*product_id) {
                    product.set_quantity(*quantity);
                }
            }
            SessionEvent::ProductUpdated {
                product_id, draft, ..
            } => {
                if let Some(product) = self.catalog.get_mut(*product_id) {
                    product.revise(draft.clone());
                }
            }
            SessionEvent::ProductDeleted { product_id, .. } => {
                self.catalog.remove(*product_id);
            }
            SessionEvent::ProductPurchased {
                product_id,
                remaining,
                ..
            } => {
                if let Some(product) = self.catalog.get_mut(*product_id) {
                    product.set_quantity(*remaining);
                }
            }
            SessionEvent::ProductSelected { product_id, .. } => {
                if let Some(product) = self.catalog.get(*product_id) {
                    self.form.load(product);
                }
            }
            SessionEvent::FormReset { .. } => {
                self.form.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SessionCommand::Authenticate {
                credentials,
                occurred_at,
            } => self.handle_authenticate(credentials, *occurred_at),
            SessionCommand::Logout { occurred_at } => Ok(vec![SessionEvent::LoggedOut {
                occurred_at: *occurred_at,
            }]),
            SessionCommand::AddOrIncrement {
                product_id,
                name,
                price,
                quantity,
                occurred_at,
            } => self.handle_add_or_increment(*product_id, name, price, quantity, *occurred_at),
            SessionCommand::UpdateSelected { occurred_at } => self.handle_update(*occurred_at),
            SessionCommand::Delete {
                product_id,
                occurred_at,
            } => Ok(self.handle_delete(*product_id, *occurred_at)),
            SessionCommand::Purchase {
                product_id,
                occurred_at,
            } => self.handle_purchase(*product_id, *occurred_at),
            SessionCommand::Select {
                product_id,
                occurred_at,
            } => self.handle_select(*product_id, *occurred_at),
            SessionCommand::ResetForm { occurred_at } => Ok(vec![SessionEvent::FormReset {
                occurred_at: *occurred_at,
            }]),
        }
    }
}

impl Session {
    fn handle_authenticate(
        &self,
        credentials: &Credentials,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Vec<SessionEvent>> {
        self.policy
            .verify(&credentials.username, &credentials.password)?;
        Ok(vec![SessionEvent::Authenticated {
            username: credentials.username.clone(),
            occurred_at,
        }])
    }

    fn handle_add_or_increment(
        &self,
        product_id: ProductId,
        name: &str,
        price: &str,
        quantity: &str,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Vec<SessionEvent>> {
        let draft = ProductDraft::parse(name, price, quantity)?;

        let change = match self.catalog.find_by_name(draft.name.as_str()) {
            // Existing product: only the quantity moves, the typed price is ignored.
            Some(existing) => SessionEvent::StockIncremented {
                product_id: existing.id_typed(),
                added: draft.quantity,
                quantity: existing.quantity().checked_add(draft.quantity)?,
                occurred_at,
            },
            None => {
                if self.catalog.contains(product_id) {
                    return Err(DomainError::invariant("product id already in use"));
                }
                SessionEvent::ProductAdded {
                    product: Product::new(product_id, draft),
                    occurred_at,
                }
            }
        };

        Ok(vec![change, SessionEvent::FormReset { occurred_at }])
    }

    fn handle_update(&self, occurred_at: DateTime<Utc>) -> DomainResult<Vec<SessionEvent>> {
        let product_id = self
            .form
            .selected()
            .filter(|id| self.catalog.contains(*id))
            .ok_or(DomainError::NoSelection)?;

        let draft = ProductDraft::parse(
            self.form.get(Field::Name),
            self.form.get(Field::Price),
            self.form.get(Field::Quantity),
        )?;

        Ok(vec![
            SessionEvent::ProductUpdated {
                product_id,
                draft,
                occurred_at,
            },
            SessionEvent::FormReset { occurred_at },
        ])
    }

    fn handle_delete(
        &self,
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    ) -> Vec<SessionEvent> {
        let Some(product) = self.catalog.get(product_id) else {
            return Vec::new();
        };

        let mut events = vec![SessionEvent::ProductDeleted {
            product_id,
            name: product.name().clone(),
            occurred_at,
        }];
        if self.form.selected() == Some(product_id) {
            events.push(SessionEvent::FormReset { occurred_at });
        }
        events
    }

    fn handle_purchase(
        &self,
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Vec<SessionEvent>> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| DomainError::not_found(product_id))?;

        let remaining = product
            .quantity()
            .decrement()
            .ok_or_else(|| DomainError::out_of_stock(product.name().as_str()))?;

        Ok(vec![SessionEvent::ProductPurchased {
            product_id,
            name: product.name().clone(),
            remaining,
            occurred_at,
        }])
    }

    fn handle_select(
        &self,
        product_id: ProductId,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Vec<SessionEvent>> {
        if !self.catalog.contains(product_id) {
            return Err(DomainError::not_found(product_id));
        }
        Ok(vec![SessionEvent::ProductSelected {
            product_id,
            occurred_at,
        }])
    }
}

/// What a successful form submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Added(ProductId),
    Incremented(ProductId),
    Updated(ProductId),
}

impl Submission {
    pub fn product_id(self) -> ProductId {
        match self {
            Submission::Added(id) | Submission::Incremented(id) | Submission::Updated(id) => id,
        }
    }
}

// Command execution + the operations the screens call.
impl Session {
    /// Decide, then apply every resulting event in order.
    ///
    /// A rejected command leaves the session untouched (same version, same
    /// state) and returns the error.
    pub fn execute(
        &mut self,
        command: SessionCommand,
    ) -> DomainResult<Vec<EventEnvelope<SessionEvent>>> {
        let events = self.handle(&command).inspect_err(|err| {
            tracing::debug!(
                session_id = %self.id,
                command = command.name(),
                error = %err,
                "command rejected"
            );
        })?;

        let mut applied = Vec::with_capacity(events.len());
        for event in events {
            self.apply(&event);
            tracing::debug!(
                session_id = %self.id,
                sequence = self.version,
                event_type = event.event_type(),
                event_version = event.version(),
                occurred_at = %event.occurred_at(),
                payload = %serde_json::to_string(&event).unwrap_or_default(),
                "event applied"
            );
            applied.push(EventEnvelope::new(self.id, self.version, event));
        }
        Ok(applied)
    }

    /// Run a command whose handler never rejects.
    fn execute_infallible(&mut self, command: SessionCommand) -> Vec<EventEnvelope<SessionEvent>> {
        match self.execute(command) {
            Ok(applied) => applied,
            Err(err) => {
                tracing::error!(session_id = %self.id, error = %err, "infallible command rejected");
                Vec::new()
            }
        }
    }

    pub fn authenticate(&mut self, username: &str, password: &str) -> DomainResult<()> {
        match self.execute(SessionCommand::authenticate(username, password)) {
            Ok(_) => {
                tracing::info!(session_id = %self.id, username, "signed in");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(session_id = %self.id, username, "login rejected");
                Err(err)
            }
        }
    }

    pub fn logout(&mut self) {
        self.execute_infallible(SessionCommand::logout());
        tracing::info!(session_id = %self.id, "signed out");
    }

    /// Create a product, or add `quantity` to the one with the same name.
    pub fn add_or_increment(
        &mut self,
        name: &str,
        price: &str,
        quantity: &str,
    ) -> DomainResult<Submission> {
        let applied = self.execute(SessionCommand::add_or_increment(name, price, quantity))?;
        applied
            .iter()
            .find_map(|envelope| match envelope.payload() {
                SessionEvent::ProductAdded { product, .. } => {
                    Some(Submission::Added(product.id_typed()))
                }
                SessionEvent::StockIncremented { product_id, .. } => {
                    Some(Submission::Incremented(*product_id))
                }
                _ => None,
            })
            .ok_or_else(|| DomainError::invariant("add produced no product change"))
    }

    /// Overwrite the selected product with the form's fields.
    pub fn update(&mut self) -> DomainResult<()> {
        self.execute(SessionCommand::update_selected())?;
        Ok(())
    }

    /// Remove a product. Returns `false` if no product has that id.
    pub fn delete(&mut self, id: ProductId) -> bool {
        !self.execute_infallible(SessionCommand::delete(id)).is_empty()
    }

    /// Sell one unit. Returns the remaining quantity.
    pub fn purchase(&mut self, id: ProductId) -> DomainResult<Quantity> {
        self.execute(SessionCommand::purchase(id))?;
        self.catalog
            .get(id)
            .map(Product::quantity)
            .ok_or_else(|| DomainError::not_found(id))
    }

    pub fn select(&mut self, id: ProductId) -> DomainResult<()> {
        self.execute(SessionCommand::select(id))?;
        Ok(())
    }

    pub fn reset_form(&mut self) {
        self.execute_infallible(SessionCommand::reset_form());
    }

    /// Text edit in one form field. Parsing waits until submit.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// The form's single button: add in add mode, update in edit mode.
    pub fn submit(&mut self) -> DomainResult<Submission> {
        match self.form.mode() {
            FormMode::Adding => {
                let name = self.form.name().to_string();
                let price = self.form.price().to_string();
                let quantity = self.form.quantity().to_string();
                self.add_or_increment(&name, &price, &quantity)
            }
            FormMode::Editing(id) => {
                self.update()?;
                Ok(Submission::Updated(id))
            }
        }
    }
}
