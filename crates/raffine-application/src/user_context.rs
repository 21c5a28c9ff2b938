//! User context: the session, cart and favorites stores of one client,
//! kept consistent with the remote profile across sign-in and sign-out.

use std::sync::Arc;

use futures::FutureExt;
use raffine_core::auth::{AuthService, AuthToken, Session, SessionStore};
use raffine_core::cart::CartStore;
use raffine_core::error::Result;
use raffine_core::favorites::FavoritesStore;
use raffine_core::listing::ListingId;
use raffine_core::profile::{CartEntry, ProfileService};
use raffine_core::storage::LocalStorage;
use raffine_core::sync::{Reconciliation, WriteThrough};
use raffine_core::validation::{LoginForm, RegisterForm};

/// What happened to local state when a session became active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The profile was read and both stores reconciled against it
    Reconciled {
        cart: Reconciliation,
        favorites: Reconciliation,
    },
    /// The profile read failed; local state was kept as is
    ProfileUnavailable,
    /// No session is active
    Anonymous,
}

/// Owns the three persisted stores and the collaborators they sync with.
///
/// Sign-in (`login`, `register`, or a session restored by `start`) runs
/// [`on_authenticated`](Self::on_authenticated); `logout` runs
/// [`on_signed_out`](Self::on_signed_out).
pub struct UserContext {
    session: SessionStore,
    cart: CartStore,
    favorites: FavoritesStore,
    auth: Arc<dyn AuthService>,
    profile: Arc<dyn ProfileService>,
}

impl UserContext {
    /// Restores every store from `storage`. No network traffic happens here.
    pub fn open(
        storage: Arc<dyn LocalStorage>,
        auth: Arc<dyn AuthService>,
        profile: Arc<dyn ProfileService>,
    ) -> Self {
        Self {
            session: SessionStore::restore(storage.clone()),
            cart: CartStore::restore(storage.clone()),
            favorites: FavoritesStore::restore(storage),
            auth,
            profile,
        }
    }

    /// Resumes a restored session, if any.
    pub async fn start(&mut self) -> SyncOutcome {
        if self.session.is_authenticated() {
            self.on_authenticated().await
        } else {
            SyncOutcome::Anonymous
        }
    }

    pub async fn login(&mut self, form: &LoginForm) -> Result<Session> {
        let session = self.session.login(self.auth.as_ref(), form).await?;
        self.on_authenticated().await;
        Ok(session)
    }

    pub async fn register(&mut self, form: &RegisterForm) -> Result<Session> {
        let session = self.session.register(self.auth.as_ref(), form).await?;
        self.on_authenticated().await;
        Ok(session)
    }

    /// Signs out. Local cart and favorites are kept; mirroring stops.
    pub fn logout(&mut self) -> bool {
        let ended = self.session.logout();
        self.on_signed_out();
        ended
    }

    /// Reads the profile once and reconciles both stores against it, then
    /// starts mirroring them.
    ///
    /// A store that kept non-empty guest state (because the remote copy was
    /// empty) pushes it once so the remote converges. When the read fails,
    /// nothing is pushed until the next local change.
    pub async fn on_authenticated(&mut self) -> SyncOutcome {
        let Some(token) = self.session.session().map(|s| s.token.clone()) else {
            return SyncOutcome::Anonymous;
        };

        self.cart.detach_remote();
        self.favorites.detach_remote();

        let outcome = match self.profile.get_profile(&token).await {
            Ok(remote) => SyncOutcome::Reconciled {
                cart: self.cart.reconcile(remote.cart),
                favorites: self.favorites.reconcile(remote.favorites),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Profile read failed, keeping local cart and favorites");
                SyncOutcome::ProfileUnavailable
            }
        };

        self.cart
            .attach_remote(cart_writer(self.profile.clone(), token.clone()));
        self.favorites
            .attach_remote(favorites_writer(self.profile.clone(), token));

        if let SyncOutcome::Reconciled { cart, favorites } = outcome {
            if cart == Reconciliation::KeptLocal && !self.cart.is_empty() {
                self.cart.publish();
            }
            if favorites == Reconciliation::KeptLocal && !self.favorites.is_empty() {
                self.favorites.publish();
            }
        }

        tracing::info!(
            ?outcome,
            cart_lines = self.cart.lines().len(),
            favorites = self.favorites.len(),
            "Session active"
        );
        outcome
    }

    pub fn on_signed_out(&mut self) {
        let cart = self.cart.detach_remote();
        let favorites = self.favorites.detach_remote();
        tracing::debug!(cart, favorites, "Stopped mirroring to remote profile");
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    /// Waits until every queued write-through has been attempted.
    pub async fn settle(&self) {
        self.cart.settle().await;
        self.favorites.settle().await;
    }
}

fn cart_writer(profile: Arc<dyn ProfileService>, token: AuthToken) -> WriteThrough<Vec<CartEntry>> {
    WriteThrough::spawn("cart", move |entries: Vec<CartEntry>| {
        let profile = profile.clone();
        let token = token.clone();
        async move { profile.put_cart(&token, entries).await }.boxed()
    })
}

fn favorites_writer(
    profile: Arc<dyn ProfileService>,
    token: AuthToken,
) -> WriteThrough<Vec<ListingId>> {
    WriteThrough::spawn("favorites", move |ids: Vec<ListingId>| {
        let profile = profile.clone();
        let token = token.clone();
        async move { profile.put_favorites(&token, ids).await }.boxed()
    })
}
