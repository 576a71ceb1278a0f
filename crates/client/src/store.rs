//! The cart store.
//!
//! [`CartStore`] owns the cart, the session and the catalog snapshot. It is a
//! plain owned value: build one with its backend and notifier injected and
//! pass references to whatever needs it. Mutations are synchronous and take
//! `&mut self`; the only asynchronous effect of a mutation is the debounced
//! push handled by [`crate::sync::CartSyncer`].
//!
//! # Sync rules
//!
//! A successful mutation schedules a push only when the cart has been loaded
//! from the backend and the session is authenticated. Before that, pushing
//! would overwrite the persisted cart with an empty default.

use std::sync::Arc;

use greencart_core::{Cart, Price, ProductId, Quantity, User};
use tracing::{debug, info, instrument, warn};

use crate::api::Backend;
use crate::catalog::{CartTotal, Catalog};
use crate::error::CartError;
use crate::notify::{Notification, Notifier};
use crate::session::Session;
use crate::sync::{CartSyncer, SyncConfig};

const ADDED_MESSAGE: &str = "Added to Cart";
const UPDATED_MESSAGE: &str = "Cart Updated";
const REMOVED_MESSAGE: &str = "Removed from Cart";

/// Client-side cart state with backend sync.
pub struct CartStore<B> {
    backend: Arc<B>,
    notifier: Arc<dyn Notifier>,
    syncer: CartSyncer,
    session: Session,
    cart: Cart,
    loaded: bool,
    catalog: Catalog,
    is_seller: bool,
    login_requested: bool,
}

impl<B: Backend> CartStore<B> {
    /// Create an empty, anonymous store and start its sync worker.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn new(backend: Arc<B>, notifier: Arc<dyn Notifier>, sync: SyncConfig) -> Self {
        let syncer = CartSyncer::spawn(Arc::clone(&backend), Arc::clone(&notifier), sync);
        Self {
            backend,
            notifier,
            syncer,
            session: Session::Anonymous,
            cart: Cart::new(),
            loaded: false,
            catalog: Catalog::default(),
            is_seller: false,
            login_requested: false,
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load the session and adopt the user's persisted cart.
    ///
    /// Failures are treated as an anonymous session. Never schedules a push.
    #[instrument(skip(self))]
    pub async fn initialize(&mut self) {
        let session = match self.backend.get_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Failed to fetch session, continuing anonymously");
                Session::Anonymous
            }
        };
        self.adopt_session(session);
    }

    /// Run the startup fetches: session, catalog and seller status.
    pub async fn bootstrap(&mut self) {
        self.initialize().await;
        self.refresh_catalog().await;
        self.refresh_seller().await;
    }

    /// Replace the catalog snapshot with a fresh product listing.
    ///
    /// On failure the previous snapshot is kept and the user is notified.
    #[instrument(skip(self))]
    pub async fn refresh_catalog(&mut self) {
        match self.backend.list_products().await {
            Ok(products) => {
                debug!(count = products.len(), "Catalog refreshed");
                self.catalog = Catalog::from_products(products);
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch products");
                self.notifier.notify(Notification::error(e.to_string()));
            }
        }
    }

    /// Refresh the seller flag; failures mean "not a seller".
    #[instrument(skip(self))]
    pub async fn refresh_seller(&mut self) {
        self.is_seller = match self.backend.is_seller().await {
            Ok(is_seller) => is_seller,
            Err(e) => {
                debug!(error = %e, "Seller check failed");
                false
            }
        };
    }

    /// Replace the session with a freshly logged-in user.
    pub fn login(&mut self, user: User) {
        self.adopt_session(Session::Authenticated(user));
    }

    /// Clear the cart and session. Pending pushes of the old session are dropped.
    pub fn logout(&mut self) {
        self.syncer.advance_epoch();
        self.session = Session::Anonymous;
        self.cart = Cart::new();
        self.loaded = false;
        info!("Logged out, cart cleared");
    }

    /// Replace the session and reload the cart from it. Snapshots queued
    /// under the previous session are never pushed.
    fn adopt_session(&mut self, session: Session) {
        self.syncer.advance_epoch();
        match &session {
            Session::Authenticated(user) => {
                self.cart = user.cart_items.clone();
                self.loaded = true;
                self.login_requested = false;
                info!(user_id = %user.id, items = self.cart.len(), "Cart loaded");
            }
            Session::Anonymous => {
                self.cart = Cart::new();
                self.loaded = false;
            }
        }
        self.session = session;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotAuthenticated` without a logged-in user; the
    /// store then asks for a login (see [`CartStore::login_requested`]).
    pub fn add_item(&mut self, id: &ProductId) -> Result<(), CartError> {
        if !self.session.is_authenticated() {
            self.login_requested = true;
            self.notifier
                .notify(Notification::error(CartError::NotAuthenticated.to_string()));
            return Err(CartError::NotAuthenticated);
        }

        let next = self.cart.incremented(id);
        self.commit(next);
        self.notifier.notify(Notification::success(ADDED_MESSAGE));
        Ok(())
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Products not in the cart are left alone. A quantity of zero or less
    /// removes the entry.
    ///
    /// # Errors
    ///
    /// Returns `CartError::QuantityOutOfRange` if `quantity` is larger than a
    /// cart quantity can hold.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<(), CartError> {
        if !self.cart.contains(id) {
            debug!(product_id = %id, "Ignoring quantity update for product not in cart");
            return Ok(());
        }

        let quantity = if quantity <= 0 {
            0
        } else {
            Quantity::try_from(quantity).map_err(|_| CartError::QuantityOutOfRange(quantity))?
        };

        let next = self.cart.with_quantity(id, quantity);
        self.commit(next);
        self.notifier.notify(Notification::success(UPDATED_MESSAGE));
        Ok(())
    }

    /// Remove one unit of a product, deleting the entry at zero.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if the product has no entry.
    pub fn remove_one(&mut self, id: &ProductId) -> Result<(), CartError> {
        let next = self
            .cart
            .decremented(id)
            .ok_or_else(|| CartError::NotInCart(id.clone()))?;
        self.commit(next);
        self.notifier.notify(Notification::success(REMOVED_MESSAGE));
        Ok(())
    }

    fn commit(&mut self, next: Cart) {
        self.cart = next;
        if self.loaded && self.session.is_authenticated() {
            self.syncer.schedule(self.cart.clone());
        } else {
            debug!("Cart not loaded from backend yet, skipping sync");
        }
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Total number of units in the cart.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Cart amount truncated to cents. Products missing from the catalog
    /// are left out and logged.
    #[must_use]
    pub fn cart_amount(&self) -> Price {
        self.cart_total().amount
    }

    /// Cart amount together with the products that could not be priced.
    #[must_use]
    pub fn cart_total(&self) -> CartTotal {
        let total = self.catalog.price_cart(&self.cart);
        for id in &total.unpriced {
            warn!(product_id = %id, "Cart item missing from catalog, left out of total");
        }
        total
    }

    // =========================================================================
    // Sync control
    // =========================================================================

    /// Push any pending cart snapshot now and wait for it.
    pub async fn flush(&self) {
        self.syncer.flush().await;
    }

    /// Stop the sync worker after pushing what is pending.
    pub async fn shutdown(self) {
        self.syncer.shutdown().await;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.session.user()
    }

    /// Whether the cart was initialized from the backend.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn is_seller(&self) -> bool {
        self.is_seller
    }

    /// Set when a mutation was refused for lack of a session, cleared on login.
    #[must_use]
    pub const fn login_requested(&self) -> bool {
        self.login_requested
    }
}
