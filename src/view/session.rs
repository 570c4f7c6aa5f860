//! Navigation state for an interactive reader
//!
//! Loads run concurrently with further navigation. Each navigation hands out
//! a [`LoadTicket`]; a finished load is applied only if its ticket is still
//! the latest one, so a slow response can never overwrite a newer page.

use super::{IndexView, PostView};

/// What the reader asked to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Post(String),
}

/// What is currently on screen
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading(Route),
    Index(IndexView),
    Post(PostView),
}

/// Proof of which navigation a load belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    route: Route,
}

impl LoadTicket {
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Current route and screen, plus the generation counter guarding them
#[derive(Debug)]
pub struct Navigator {
    generation: u64,
    route: Route,
    screen: Screen,
}

impl Navigator {
    /// Start on the index, waiting for its first load
    pub fn new() -> (Self, LoadTicket) {
        let mut navigator = Self {
            generation: 0,
            route: Route::Index,
            screen: Screen::Loading(Route::Index),
        };
        let ticket = navigator.navigate(Route::Index);
        (navigator, ticket)
    }

    /// Switch to a route; the returned ticket identifies its load
    pub fn navigate(&mut self, route: Route) -> LoadTicket {
        self.generation += 1;
        self.route = route.clone();
        self.screen = Screen::Loading(route.clone());
        LoadTicket {
            generation: self.generation,
            route,
        }
    }

    /// Open a post
    pub fn open(&mut self, slug: &str) -> LoadTicket {
        self.navigate(Route::Post(slug.to_string()))
    }

    /// Return to the index
    pub fn back(&mut self) -> LoadTicket {
        self.navigate(Route::Index)
    }

    /// Load the current route again
    pub fn retry(&mut self) -> LoadTicket {
        self.navigate(self.route.clone())
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a finished load
    ///
    /// Returns `false` and leaves the screen untouched when a newer
    /// navigation has happened since the ticket was issued.
    pub fn complete(&mut self, ticket: &LoadTicket, screen: Screen) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Discarding stale load for {:?} (generation {}, current {})",
                ticket.route,
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.screen = screen;
        true
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.screen, Screen::Loading(_))
    }
}
