//! The branch-off combinator: show a screen, route on the chosen key.

use keepsake_core::action::ActionKey;
use keepsake_core::error::FlowError;
use keepsake_core::presenter::{PresenterError, ScreenPresenter};
use keepsake_core::screen::InteractiveScreen;

/// A total mapping from every `ActionKey` to a route.
///
/// Totality is checked once, when the map is built, so routing a key can never
/// fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchMap<T> {
    forward: T,
    back: T,
    delete: T,
}

impl<T: Clone> BranchMap<T> {
    /// A map with an explicit route for each key.
    #[must_use]
    pub fn new(forward: T, back: T, delete: T) -> Self {
        Self {
            forward,
            back,
            delete,
        }
    }

    /// Starts a sparse map; see [`BranchMapBuilder::build`].
    #[must_use]
    pub fn builder() -> BranchMapBuilder<T> {
        BranchMapBuilder {
            forward: None,
            back: None,
            delete: None,
            default: None,
        }
    }

    /// The route for `key`.
    #[must_use]
    pub fn route(&self, key: ActionKey) -> &T {
        match key {
            ActionKey::Forward => &self.forward,
            ActionKey::Back => &self.back,
            ActionKey::Delete => &self.delete,
        }
    }
}

/// Collects routes for some keys plus an optional default.
#[derive(Debug)]
pub struct BranchMapBuilder<T> {
    forward: Option<T>,
    back: Option<T>,
    delete: Option<T>,
    default: Option<T>,
}

impl<T: Clone> BranchMapBuilder<T> {
    /// Routes `key` to `target`, replacing an earlier route for it.
    #[must_use]
    pub fn on(mut self, key: ActionKey, target: T) -> Self {
        let slot = match key {
            ActionKey::Forward => &mut self.forward,
            ActionKey::Back => &mut self.back,
            ActionKey::Delete => &mut self.delete,
        };
        *slot = Some(target);
        self
    }

    /// Routes every key without its own route to `target`.
    #[must_use]
    pub fn otherwise(mut self, target: T) -> Self {
        self.default = Some(target);
        self
    }

    /// Finishes the map.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::UnmappedActionKeys` listing the keys that have
    /// neither a route nor a default to fall back on.
    pub fn build(self) -> Result<BranchMap<T>, FlowError> {
        let fill = |slot: Option<T>| slot.or_else(|| self.default.clone());
        let forward = fill(self.forward);
        let back = fill(self.back);
        let delete = fill(self.delete);

        match (forward, back, delete) {
            (Some(forward), Some(back), Some(delete)) => Ok(BranchMap {
                forward,
                back,
                delete,
            }),
            (forward, back, delete) => {
                let missing = [
                    (ActionKey::Forward, forward.is_none()),
                    (ActionKey::Back, back.is_none()),
                    (ActionKey::Delete, delete.is_none()),
                ]
                .into_iter()
                .filter_map(|(key, absent)| absent.then_some(key))
                .collect();
                Err(FlowError::UnmappedActionKeys { missing })
            }
        }
    }
}

/// A branching stage body: a source screen whose answer picks the successor.
#[derive(Debug, Clone)]
pub struct BranchOff<T> {
    source: InteractiveScreen,
    routes: BranchMap<T>,
}

impl<T: Clone> BranchOff<T> {
    /// Combines a source screen with its routes.
    #[must_use]
    pub fn new(source: InteractiveScreen, routes: BranchMap<T>) -> Self {
        Self { source, routes }
    }

    /// Presents the source screen and returns the chosen key.
    ///
    /// # Errors
    ///
    /// Propagates the presenter's error.
    pub async fn choose(&self, presenter: &dyn ScreenPresenter) -> Result<ActionKey, PresenterError> {
        presenter.interact(&self.source).await
    }

    /// The successor for `key`.
    #[must_use]
    pub fn dispatch(&self, key: ActionKey) -> T {
        self.routes.route(key).clone()
    }
}
